//! Configuration module for the sales forecast dashboard.

pub mod forecast;
pub mod persistence;
pub mod plot;

mod debug; // Private: files use crate::config::DEBUG_FLAGS, not crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

// Re-export commonly used items
pub use forecast::FORECAST;
pub use persistence::{MODEL_PATH, MODEL_VERSION};
pub use plot::PLOT_CONFIG;
