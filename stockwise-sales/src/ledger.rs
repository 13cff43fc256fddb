use crate::models::{Sale, SaleDraft, SaleError, SaleId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// In-memory sales history, kept in recording order
#[derive(Debug, Clone, Default)]
pub struct SalesLedger {
    sales: Vec<Sale>,
}

/// Totals for a single calendar day (UTC)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_revenue: f64,
    pub total_transactions: usize,
    pub total_items: u64,
    pub sales: Vec<Sale>,
}

impl SalesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sales(sales: Vec<Sale>) -> Result<Self, LedgerError> {
        let mut ledger = Self::new();
        for sale in sales {
            if ledger.get(sale.id).is_some() {
                return Err(LedgerError::DuplicateId(sale.id));
            }
            ledger.sales.push(sale);
        }
        Ok(ledger)
    }

    /// Validate a draft and append it as a sale made at `at`
    pub fn record(&mut self, draft: SaleDraft, at: DateTime<Utc>) -> Result<Sale, LedgerError> {
        let items = draft.into_items()?;
        let total_amount = items.iter().map(|item| item.total_price).sum();
        let id = self.sales.iter().map(|s| s.id).max().unwrap_or(0) + 1;

        let sale = Sale {
            id,
            timestamp: at,
            items,
            total_amount,
        };
        self.sales.push(sale.clone());
        Ok(sale)
    }

    pub fn get(&self, id: SaleId) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == id)
    }

    pub fn all(&self) -> &[Sale] {
        &self.sales
    }

    pub fn remove(&mut self, id: SaleId) -> Result<Sale, LedgerError> {
        let index = self.sales.iter().position(|s| s.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        Ok(self.sales.remove(index))
    }

    /// Sales with `start <= timestamp <= end`
    pub fn in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Sale> {
        self.sales
            .iter()
            .filter(|s| s.timestamp >= start && s.timestamp <= end)
            .cloned()
            .collect()
    }

    pub fn on_day(&self, date: NaiveDate) -> Vec<Sale> {
        self.sales
            .iter()
            .filter(|s| s.timestamp.date_naive() == date)
            .cloned()
            .collect()
    }

    pub fn daily_summary(&self, date: NaiveDate) -> DailySummary {
        let sales = self.on_day(date);
        DailySummary {
            date,
            total_revenue: sales.iter().map(|s| s.total_amount).sum(),
            total_transactions: sales.len(),
            total_items: sales.iter().map(Sale::total_items).sum(),
            sales,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LedgerError {
    #[error("Sale not found: {0}")]
    NotFound(SaleId),

    #[error("Duplicate sale id: {0}")]
    DuplicateId(SaleId),

    #[error(transparent)]
    Invalid(#[from] SaleError),
}
