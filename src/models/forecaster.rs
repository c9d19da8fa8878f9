use std::fmt;

/// Errors raised by a model when asked to validate itself or to forecast.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// A model parameter is outside its valid domain
    InvalidParameter { name: &'static str, reason: String },
    /// Not enough observations to fit or to seed the recursion
    InsufficientData { required: usize, actual: usize },
    /// The recursion produced NaN/inf at the given (1-based) step
    NonFinite { step: usize },
    /// The artifact caps how far ahead it may be asked to forecast
    HorizonTooLong { requested: usize, max: usize },
    /// The model returned a different number of values than requested
    LengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for ForecastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            ForecastError::InsufficientData { required, actual } => write!(
                f,
                "Insufficient data: need at least {} observations, got {}",
                required, actual
            ),
            ForecastError::NonFinite { step } => {
                write!(f, "Forecast became non-finite at step {}", step)
            }
            ForecastError::HorizonTooLong { requested, max } => write!(
                f,
                "Requested {} steps but this model forecasts at most {}",
                requested, max
            ),
            ForecastError::LengthMismatch { expected, actual } => write!(
                f,
                "Model returned {} values, expected {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for ForecastError {}

/// The single capability the dashboard needs from a loaded model.
pub trait Forecaster {
    /// Short human readable model name (used in the plot legend)
    fn name(&self) -> &'static str;

    /// Predict the next `steps` values following the training data.
    fn forecast(&self, steps: usize) -> Result<Vec<f64>, ForecastError>;

    /// Check that the deserialized state can actually produce forecasts.
    fn validate(&self) -> Result<(), ForecastError>;
}

/// Result of fitting: the model plus its in-sample one-step mean squared error.
#[derive(Debug, Clone)]
pub struct Fitted<M> {
    pub model: M,
    pub mse: f64,
}

/// Smoothing constants must lie strictly inside (0, 1).
pub(crate) fn check_unit_interval(name: &'static str, value: f64) -> Result<(), ForecastError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ForecastError::InvalidParameter {
            name,
            reason: format!("must be between 0 and 1 (exclusive), got {}", value),
        })
    }
}

pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<(), ForecastError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ForecastError::InvalidParameter {
            name,
            reason: format!("must be finite, got {}", value),
        })
    }
}

/// Reject output containing NaN/inf, reporting the first offending step.
pub(crate) fn ensure_finite(values: Vec<f64>) -> Result<Vec<f64>, ForecastError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(ForecastError::NonFinite { step: idx + 1 }),
        None => Ok(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_interval_is_exclusive() {
        assert!(check_unit_interval("alpha", 0.5).is_ok());
        assert!(check_unit_interval("alpha", 0.0).is_err());
        assert!(check_unit_interval("alpha", 1.0).is_err());
        assert!(check_unit_interval("alpha", f64::NAN).is_err());
    }

    #[test]
    fn test_ensure_finite_reports_step() {
        assert_eq!(
            ensure_finite(vec![1.0, 2.0, f64::INFINITY]),
            Err(ForecastError::NonFinite { step: 3 })
        );
        assert_eq!(ensure_finite(vec![1.0]), Ok(vec![1.0]));
    }

    #[test]
    fn test_error_display() {
        let err = ForecastError::HorizonTooLong {
            requested: 45,
            max: 30,
        };
        assert_eq!(
            err.to_string(),
            "Requested 45 steps but this model forecasts at most 30"
        );
    }
}
