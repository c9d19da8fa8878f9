use std::sync::Arc;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::ModelFile;
use crate::domain::{Forecast, Horizon};
use crate::models::{ForecastError, Forecaster};

/// Application context: the model loaded at startup, shared read-only with the UI.
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    model_file: Arc<ModelFile>,
}

impl ForecastEngine {
    pub fn new(model_file: ModelFile) -> Self {
        Self {
            model_file: Arc::new(model_file),
        }
    }

    pub fn model_file(&self) -> &ModelFile {
        &self.model_file
    }

    pub fn model_name(&self) -> &'static str {
        self.model_file.model.name()
    }

    /// One render cycle's worth of work: ask the model for `horizon` days and date-index them.
    /// Nothing is cached; the same horizon is recomputed every call.
    pub fn forecast(&self, horizon: Horizon) -> Result<Forecast, ForecastError> {
        let steps = horizon.steps();
        if let Some(max) = self.model_file.max_horizon {
            if steps > max {
                return Err(ForecastError::HorizonTooLong {
                    requested: steps,
                    max,
                });
            }
        }

        let values = self.model_file.model.forecast(steps)?;
        if values.len() != steps {
            return Err(ForecastError::LengthMismatch {
                expected: steps,
                actual: values.len(),
            });
        }

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_render_cycle {
            log::info!("Forecast cycle: {} -> {} points", horizon, values.len());
        }

        Ok(Forecast::from_values(self.model_file.last_observation, values))
    }
}
