// Domain types and value objects
pub mod forecast;
pub mod horizon;
pub mod sales_history;

// Re-export commonly used types
pub use forecast::{Forecast, ForecastPoint};
pub use horizon::Horizon;
pub use sales_history::{SalesHistory, SalesObservation};
