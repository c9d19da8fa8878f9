use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::arima::Arima;
use crate::models::exponential_smoothing::{Holt, HoltWinters, SimpleExponentialSmoothing};
use crate::models::forecaster::{ForecastError, Forecaster, check_finite, ensure_finite};

/// Repeats the last observed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Naive {
    pub last_value: f64,
}

impl Forecaster for Naive {
    fn name(&self) -> &'static str {
        "Naive (last value)"
    }

    fn forecast(&self, steps: usize) -> Result<Vec<f64>, ForecastError> {
        ensure_finite(vec![self.last_value; steps])
    }

    fn validate(&self) -> Result<(), ForecastError> {
        check_finite("last_value", self.last_value)
    }
}

/// Every model kind an artifact can carry.
/// New variants must go at the end: bincode encodes the variant index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ForecastModel {
    Naive(Naive),
    SimpleExponentialSmoothing(SimpleExponentialSmoothing),
    Holt(Holt),
    HoltWinters(HoltWinters),
    Arima(Arima),
}

impl ForecastModel {
    fn inner(&self) -> &dyn Forecaster {
        match self {
            ForecastModel::Naive(m) => m,
            ForecastModel::SimpleExponentialSmoothing(m) => m,
            ForecastModel::Holt(m) => m,
            ForecastModel::HoltWinters(m) => m,
            ForecastModel::Arima(m) => m,
        }
    }
}

impl Forecaster for ForecastModel {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn forecast(&self, steps: usize) -> Result<Vec<f64>, ForecastError> {
        self.inner().forecast(steps)
    }

    fn validate(&self) -> Result<(), ForecastError> {
        self.inner().validate()
    }
}

impl fmt::Display for ForecastModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastModel::Naive(m) => write!(f, "{} [{:.2}]", self.name(), m.last_value),
            ForecastModel::SimpleExponentialSmoothing(m) => {
                write!(f, "{} [α={:.2}]", self.name(), m.alpha)
            }
            ForecastModel::Holt(m) => {
                write!(f, "{} [α={:.2}, β={:.2}]", self.name(), m.alpha, m.beta)
            }
            ForecastModel::HoltWinters(m) => write!(
                f,
                "{} [α={:.2}, β={:.2}, γ={:.2}, m={}]",
                self.name(),
                m.alpha,
                m.beta,
                m.gamma,
                m.season.len()
            ),
            ForecastModel::Arima(m) => {
                write!(f, "{} [p={}, d={}, q={}]", self.name(), m.p(), m.d, m.q())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_reaches_inner_model() {
        let model = ForecastModel::Holt(Holt {
            alpha: 0.5,
            beta: 0.5,
            level: 10.0,
            trend: 1.0,
        });
        assert_eq!(model.forecast(3).unwrap(), vec![11.0, 12.0, 13.0]);
        assert_eq!(model.name(), "Holt Linear Trend");
        assert_eq!(model.to_string(), "Holt Linear Trend [α=0.50, β=0.50]");
    }

    #[test]
    fn test_naive() {
        let model = ForecastModel::Naive(Naive { last_value: 7.0 });
        assert_eq!(model.forecast(2).unwrap(), vec![7.0, 7.0]);
        assert!(model.validate().is_ok());
        let broken = ForecastModel::Naive(Naive {
            last_value: f64::NAN,
        });
        assert!(broken.validate().is_err());
    }
}
