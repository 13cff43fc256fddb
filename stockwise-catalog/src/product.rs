use serde::{Deserialize, Serialize};

/// Threshold applied when a draft leaves the low-stock floor blank
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

pub type ProductId = u32;

/// Core product structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub stock_level: u32,
    pub low_stock_threshold: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub supplier: String,
}

impl Product {
    /// Stock at or below the reorder floor
    pub fn is_low_stock(&self) -> bool {
        self.stock_level <= self.low_stock_threshold
    }

    /// Value of the units currently on hand
    pub fn stock_value(&self) -> f64 {
        self.price * self.stock_level as f64
    }

    pub(crate) fn from_new(id: ProductId, new: NewProduct) -> Self {
        Self {
            id,
            name: new.name,
            sku: new.sku,
            price: new.price,
            stock_level: new.stock_level,
            low_stock_threshold: new.low_stock_threshold,
            category: new.category,
            supplier: new.supplier,
        }
    }
}

/// Validated product ready to be added to the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub stock_level: u32,
    pub low_stock_threshold: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub supplier: String,
}

/// Untyped product input, as typed into a form or read from a seed file.
///
/// Numeric fields are kept as text until [`ProductDraft::parse`] runs, so the
/// rest of the system only ever sees validated numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub sku: String,
    pub price: String,
    #[serde(default)]
    pub stock_level: String,
    #[serde(default)]
    pub low_stock_threshold: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub supplier: String,
}

impl ProductDraft {
    pub fn parse(self) -> Result<NewProduct, ProductError> {
        let name = required("name", &self.name)?;
        let sku = required("sku", &self.sku)?;
        let price = parse_price(&self.price)?;
        let stock_level = parse_count("stock_level", &self.stock_level)?.unwrap_or(0);
        let low_stock_threshold = parse_count("low_stock_threshold", &self.low_stock_threshold)?
            .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);

        Ok(NewProduct {
            name,
            sku,
            price,
            stock_level,
            low_stock_threshold,
            category: self.category.trim().to_string(),
            supplier: self.supplier.trim().to_string(),
        })
    }
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub stock_level: Option<u32>,
    pub low_stock_threshold: Option<u32>,
    pub category: Option<String>,
    pub supplier: Option<String>,
}

impl ProductUpdate {
    /// Validates every present field before touching `product`; on error it is left as it was
    pub fn apply(self, product: &mut Product) -> Result<(), ProductError> {
        let mut next = product.clone();
        if let Some(name) = self.name {
            next.name = required("name", &name)?;
        }
        if let Some(sku) = self.sku {
            next.sku = required("sku", &sku)?;
        }
        if let Some(price) = self.price {
            next.price = check_price(price)?;
        }
        if let Some(stock_level) = self.stock_level {
            next.stock_level = stock_level;
        }
        if let Some(threshold) = self.low_stock_threshold {
            next.low_stock_threshold = threshold;
        }
        if let Some(category) = self.category {
            next.category = category.trim().to_string();
        }
        if let Some(supplier) = self.supplier {
            next.supplier = supplier.trim().to_string();
        }
        *product = next;
        Ok(())
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ProductError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ProductError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn parse_price(raw: &str) -> Result<f64, ProductError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ProductError::MissingField("price"));
    }
    let price: f64 = trimmed.parse().map_err(|_| ProductError::InvalidField {
        field: "price",
        value: raw.to_string(),
    })?;
    check_price(price)
}

fn check_price(price: f64) -> Result<f64, ProductError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ProductError::InvalidField {
            field: "price",
            value: price.to_string(),
        });
    }
    Ok(price)
}

/// Blank means "not provided"
fn parse_count(field: &'static str, raw: &str) -> Result<Option<u32>, ProductError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| ProductError::InvalidField {
            field,
            value: raw.to_string(),
        })
}

/// Product-related errors
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ProductError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {value:?}")]
    InvalidField {
        field: &'static str,
        value: String,
    },
}
