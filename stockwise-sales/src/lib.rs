pub mod models;
pub mod ledger;

pub use models::{Sale, SaleDraft, SaleError, SaleId, SaleItem, SaleLineDraft};
pub use ledger::{DailySummary, LedgerError, SalesLedger};
