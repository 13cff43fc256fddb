pub mod models;
pub mod velocity;
pub mod rules;
pub mod engine;
pub mod report;
pub mod dashboard;

pub use models::{Priority, ReorderSuggestion, StockOutProjection, VelocityRecord};
pub use engine::{compute_suggestions, ReorderEngine, ReorderError};
pub use report::{ReportPeriod, SalesReport};
pub use dashboard::{Dashboard, DashboardError, DashboardStats};
