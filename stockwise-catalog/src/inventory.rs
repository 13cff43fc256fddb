use crate::product::{NewProduct, Product, ProductDraft, ProductError, ProductId, ProductUpdate};

/// In-memory product catalog with stock tracking.
///
/// Products are kept in insertion order; listings come back in that order.
#[derive(Debug, Clone, Default)]
pub struct InventoryManager {
    products: Vec<Product>,
}

impl InventoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from products that already carry ids
    pub fn with_products(products: Vec<Product>) -> Result<Self, InventoryError> {
        let mut manager = Self::new();
        for product in products {
            if manager.get(product.id).is_some() {
                return Err(InventoryError::DuplicateId(product.id));
            }
            manager.products.push(product);
        }
        Ok(manager)
    }

    /// Add a product, assigning the next free id
    pub fn add(&mut self, new: NewProduct) -> Product {
        let id = self.products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let product = Product::from_new(id, new);
        self.products.push(product.clone());
        product
    }

    /// Parse form input and add the resulting product
    pub fn add_draft(&mut self, draft: ProductDraft) -> Result<Product, InventoryError> {
        let new = draft.parse()?;
        Ok(self.add(new))
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Resolve a scanned barcode against product SKUs
    pub fn find_by_barcode(&self, code: &str) -> Option<&Product> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        self.products.iter().find(|p| p.sku.eq_ignore_ascii_case(code))
    }

    /// Case-insensitive substring match on name, SKU or category; a blank query matches everything
    pub fn search(&self, query: &str) -> Vec<&Product> {
        if query.trim().is_empty() {
            return self.products.iter().collect();
        }
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.sku.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn update(&mut self, id: ProductId, update: ProductUpdate) -> Result<Product, InventoryError> {
        let product = self.get_mut(id)?;
        update.apply(product)?;
        Ok(product.clone())
    }

    pub fn remove(&mut self, id: ProductId) -> Result<Product, InventoryError> {
        let index = self.products.iter().position(|p| p.id == id)
            .ok_or(InventoryError::NotFound(id))?;
        Ok(self.products.remove(index))
    }

    /// Products at or below their low-stock threshold
    pub fn low_stock(&self) -> Vec<Product> {
        self.products.iter().filter(|p| p.is_low_stock()).cloned().collect()
    }

    pub fn set_stock(&mut self, id: ProductId, level: u32) -> Result<Product, InventoryError> {
        let product = self.get_mut(id)?;
        product.stock_level = level;
        Ok(product.clone())
    }

    /// Remove sold units; stock never drops below zero
    pub fn deduct(&mut self, id: ProductId, quantity: u32) -> Result<Product, InventoryError> {
        let product = self.get_mut(id)?;
        product.stock_level = product.stock_level.saturating_sub(quantity);
        Ok(product.clone())
    }

    /// Total value of stock on hand
    pub fn inventory_value(&self) -> f64 {
        self.products.iter().map(Product::stock_value).sum()
    }

    fn get_mut(&mut self, id: ProductId) -> Result<&mut Product, InventoryError> {
        self.products.iter_mut().find(|p| p.id == id)
            .ok_or(InventoryError::NotFound(id))
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InventoryError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    #[error("Duplicate product id: {0}")]
    DuplicateId(ProductId),

    #[error(transparent)]
    Invalid(#[from] ProductError),
}
