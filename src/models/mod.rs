// Forecasting models
// Pure maths, independent of UI/visualization

pub mod arima;
pub mod exponential_smoothing;
pub mod forecast_model;
pub mod forecaster;
pub mod training;

// Re-export key types for convenience
pub use arima::Arima;
pub use exponential_smoothing::{Holt, HoltWinters, SimpleExponentialSmoothing};
pub use forecast_model::{ForecastModel, Naive};
pub use forecaster::{Fitted, ForecastError, Forecaster};
pub use training::{ModelKind, TrainOptions, fit_model};
