#![allow(clippy::collapsible_if)]

// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use data::{ModelFile, load_model};
pub use domain::{Forecast, Horizon};
pub use engine::ForecastEngine;
pub use models::{ForecastError, ForecastModel, Forecaster};
pub use ui::ForecastApp;

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext, engine: ForecastEngine) -> Box<dyn eframe::App> {
    let app = ui::ForecastApp::new(cc, engine);
    Box::new(app)
}
