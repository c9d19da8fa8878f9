//! Exponential smoothing models.
//!
//! Each model stores only the final smoothed state after a pass over the training
//! data, which is all that is needed to forecast forward.
//!
//! - **Simple (SES)**: flat forecast at the last level
//! - **Holt**: level plus linear trend
//! - **Holt-Winters**: level, trend and an additive seasonal profile

use serde::{Deserialize, Serialize};

use crate::models::forecaster::{
    Fitted, ForecastError, Forecaster, check_finite, check_unit_interval, ensure_finite,
};

/// Yields the interior grid points k/steps for k in 1..steps.
fn smoothing_grid(steps: u32) -> impl Iterator<Item = f64> + Clone {
    let steps = steps.max(2);
    (1..steps).map(move |k| k as f64 / steps as f64)
}

fn require(data: &[f64], required: usize) -> Result<(), ForecastError> {
    if data.len() < required {
        return Err(ForecastError::InsufficientData {
            required,
            actual: data.len(),
        });
    }
    Ok(())
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Picks the candidate with the lowest finite MSE.
fn best_of<M>(
    candidates: impl Iterator<Item = Result<Fitted<M>, ForecastError>>,
) -> Option<Fitted<M>> {
    candidates
        .filter_map(Result::ok)
        .filter(|f| f.mse.is_finite())
        .min_by(|a, b| a.mse.partial_cmp(&b.mse).unwrap_or(std::cmp::Ordering::Equal))
}

// ============================================================================
// Simple Exponential Smoothing
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleExponentialSmoothing {
    pub alpha: f64,
    pub level: f64,
}

impl SimpleExponentialSmoothing {
    /// `S_t = α * Y_t + (1 - α) * S_{t-1}`, seeded with the first observation.
    pub fn fit(data: &[f64], alpha: f64) -> Result<Fitted<Self>, ForecastError> {
        check_unit_interval("alpha", alpha)?;
        require(data, 2)?;

        let mut level = data[0];
        let mut sse = 0.0;
        for &y in &data[1..] {
            let error = y - level;
            sse += error * error;
            level = alpha * y + (1.0 - alpha) * level;
        }

        Ok(Fitted {
            model: Self { alpha, level },
            mse: sse / (data.len() - 1) as f64,
        })
    }

    /// Grid search over alpha.
    pub fn auto(data: &[f64], grid_steps: u32) -> Result<Fitted<Self>, ForecastError> {
        require(data, 2)?;
        best_of(smoothing_grid(grid_steps).map(|alpha| Self::fit(data, alpha))).ok_or(
            ForecastError::InvalidParameter {
                name: "alpha",
                reason: "no candidate produced a finite fit".to_string(),
            },
        )
    }
}

impl Forecaster for SimpleExponentialSmoothing {
    fn name(&self) -> &'static str {
        "Simple Exponential Smoothing"
    }

    fn forecast(&self, steps: usize) -> Result<Vec<f64>, ForecastError> {
        ensure_finite(vec![self.level; steps])
    }

    fn validate(&self) -> Result<(), ForecastError> {
        check_unit_interval("alpha", self.alpha)?;
        check_finite("level", self.level)
    }
}

// ============================================================================
// Holt's linear trend
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holt {
    pub alpha: f64,
    pub beta: f64,
    pub level: f64,
    pub trend: f64,
}

impl Holt {
    pub fn fit(data: &[f64], alpha: f64, beta: f64) -> Result<Fitted<Self>, ForecastError> {
        check_unit_interval("alpha", alpha)?;
        check_unit_interval("beta", beta)?;
        require(data, 3)?;

        let mut level = data[0];
        let mut trend = data[1] - data[0];
        let mut sse = 0.0;
        for &y in &data[1..] {
            let prediction = level + trend;
            let error = y - prediction;
            sse += error * error;

            let prev_level = level;
            level = alpha * y + (1.0 - alpha) * (level + trend);
            trend = beta * (level - prev_level) + (1.0 - beta) * trend;
        }

        Ok(Fitted {
            model: Self {
                alpha,
                beta,
                level,
                trend,
            },
            mse: sse / (data.len() - 1) as f64,
        })
    }

    pub fn auto(data: &[f64], grid_steps: u32) -> Result<Fitted<Self>, ForecastError> {
        require(data, 3)?;
        let grid = smoothing_grid(grid_steps);
        let candidates = grid.clone().flat_map(move |alpha| {
            grid.clone().map(move |beta| Self::fit(data, alpha, beta))
        });
        best_of(candidates).ok_or(ForecastError::InvalidParameter {
            name: "alpha/beta",
            reason: "no candidate produced a finite fit".to_string(),
        })
    }
}

impl Forecaster for Holt {
    fn name(&self) -> &'static str {
        "Holt Linear Trend"
    }

    fn forecast(&self, steps: usize) -> Result<Vec<f64>, ForecastError> {
        ensure_finite(
            (1..=steps)
                .map(|h| self.level + h as f64 * self.trend)
                .collect(),
        )
    }

    fn validate(&self) -> Result<(), ForecastError> {
        check_unit_interval("alpha", self.alpha)?;
        check_unit_interval("beta", self.beta)?;
        check_finite("level", self.level)?;
        check_finite("trend", self.trend)
    }
}

// ============================================================================
// Holt-Winters (additive)
// ============================================================================

/// `season[k]` is the seasonal offset for forecast step `k + 1` (rotated after fitting).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoltWinters {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub level: f64,
    pub trend: f64,
    pub season: Vec<f64>,
}

impl HoltWinters {
    pub fn fit(
        data: &[f64],
        season_length: usize,
        alpha: f64,
        beta: f64,
        gamma: f64,
    ) -> Result<Fitted<Self>, ForecastError> {
        check_unit_interval("alpha", alpha)?;
        check_unit_interval("beta", beta)?;
        check_unit_interval("gamma", gamma)?;
        if season_length < 2 {
            return Err(ForecastError::InvalidParameter {
                name: "season_length",
                reason: format!("must be at least 2, got {}", season_length),
            });
        }
        let m = season_length;
        // Two full seasons to initialise level, trend and the seasonal profile
        require(data, 2 * m + 1)?;

        let first = mean(&data[..m]);
        let second = mean(&data[m..2 * m]);
        let mut level = first;
        let mut trend = (second - first) / m as f64;
        let mut season: Vec<f64> = data[..m].iter().map(|y| y - first).collect();

        let mut sse = 0.0;
        for (t, &y) in data.iter().enumerate().skip(m) {
            let s = season[t % m];
            let prediction = level + trend + s;
            let error = y - prediction;
            sse += error * error;

            let prev_level = level;
            level = alpha * (y - s) + (1.0 - alpha) * (level + trend);
            trend = beta * (level - prev_level) + (1.0 - beta) * trend;
            season[t % m] = gamma * (y - level) + (1.0 - gamma) * s;
        }

        let n = data.len();
        let rotated = (0..m).map(|k| season[(n + k) % m]).collect();

        Ok(Fitted {
            model: Self {
                alpha,
                beta,
                gamma,
                level,
                trend,
                season: rotated,
            },
            mse: sse / (n - m) as f64,
        })
    }

    pub fn auto(
        data: &[f64],
        season_length: usize,
        grid_steps: u32,
    ) -> Result<Fitted<Self>, ForecastError> {
        require(data, 2 * season_length.max(2) + 1)?;
        let grid = smoothing_grid(grid_steps);
        let (g1, g2) = (grid.clone(), grid.clone());
        let candidates = grid.flat_map(move |alpha| {
            let g2 = g2.clone();
            g1.clone().flat_map(move |beta| {
                g2.clone()
                    .map(move |gamma| Self::fit(data, season_length, alpha, beta, gamma))
            })
        });
        best_of(candidates).ok_or(ForecastError::InvalidParameter {
            name: "alpha/beta/gamma",
            reason: "no candidate produced a finite fit".to_string(),
        })
    }
}

impl Forecaster for HoltWinters {
    fn name(&self) -> &'static str {
        "Holt-Winters (additive)"
    }

    fn forecast(&self, steps: usize) -> Result<Vec<f64>, ForecastError> {
        let m = self.season.len();
        if m == 0 {
            return Err(ForecastError::InvalidParameter {
                name: "season",
                reason: "seasonal profile is empty".to_string(),
            });
        }
        ensure_finite(
            (1..=steps)
                .map(|h| self.level + h as f64 * self.trend + self.season[(h - 1) % m])
                .collect(),
        )
    }

    fn validate(&self) -> Result<(), ForecastError> {
        check_unit_interval("alpha", self.alpha)?;
        check_unit_interval("beta", self.beta)?;
        check_unit_interval("gamma", self.gamma)?;
        check_finite("level", self.level)?;
        check_finite("trend", self.trend)?;
        if self.season.len() < 2 {
            return Err(ForecastError::InvalidParameter {
                name: "season",
                reason: format!("needs at least 2 offsets, got {}", self.season.len()),
            });
        }
        self.season
            .iter()
            .try_for_each(|&s| check_finite("season", s))
    }
}
