//! File persistence and serialization configuration

/// Fixed relative path the dashboard loads the model from
pub const MODEL_PATH: &str = "sales_forecasting_model.bin";

/// Current version of the model artifact format
/// Bump whenever ForecastModel or ModelFile change shape (bincode is not self-describing)
pub const MODEL_VERSION: f64 = 2.0;
