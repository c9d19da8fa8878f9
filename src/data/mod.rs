// Artifact loading and persistence
pub mod model_file;

// Re-export commonly used types
pub use model_file::{ModelFile, load_model};
