//! ARIMA(p, d, q) with d <= 2.
//!
//! The series is differenced `d` times and an ARMA(p, q) is fitted to the result by
//! two-stage least squares: a long autoregression supplies residual estimates, then the
//! series is regressed on its own lags and the lagged residuals. Forecasts are produced
//! recursively (future shocks are zero) and integrated back `d` times.

use serde::{Deserialize, Serialize};

use crate::models::forecaster::{Fitted, ForecastError, Forecaster, check_finite, ensure_finite};

const MAX_ORDER: usize = 30;
const MAX_DIFFERENCING: usize = 2;
// Upper bound on the first-stage autoregression used to estimate shocks
const LONG_AR_ORDER: usize = 10;
const RIDGE: f64 = 1e-8;
// MA coefficients are bounded inside the invertible region
const MA_BOUND: f64 = 0.99;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arima {
    pub intercept: f64,
    /// ar[i] multiplies lag i + 1
    pub ar: Vec<f64>,
    /// ma[i] multiplies the shock at lag i + 1
    pub ma: Vec<f64>,
    pub d: usize,
    /// The last p values of the differenced series, oldest first
    pub history: Vec<f64>,
    /// The last q in-sample residuals, oldest first
    pub residuals: Vec<f64>,
    /// anchors[k] is the last value of the series differenced k times, for k < d
    pub anchors: Vec<f64>,
}

fn difference(data: &[f64]) -> Vec<f64> {
    data.windows(2).map(|w| w[1] - w[0]).collect()
}

fn check_order(name: &'static str, value: usize, max: usize) -> Result<(), ForecastError> {
    if value > max {
        return Err(ForecastError::InvalidParameter {
            name,
            reason: format!("must be <= {}, got {}", max, value),
        });
    }
    Ok(())
}

/// Weighted sum of coefficients against the newest values of `recent` (oldest first).
fn lag_sum(coefficients: &[f64], recent: &[f64]) -> f64 {
    coefficients
        .iter()
        .zip(recent.iter().rev())
        .map(|(c, y)| c * y)
        .sum()
}

impl Arima {
    pub fn p(&self) -> usize {
        self.ar.len()
    }

    pub fn q(&self) -> usize {
        self.ma.len()
    }

    pub fn fit(data: &[f64], p: usize, d: usize, q: usize) -> Result<Fitted<Self>, ForecastError> {
        check_order("p", p, MAX_ORDER)?;
        check_order("q", q, MAX_ORDER)?;
        check_order("d", d, MAX_DIFFERENCING)?;

        let mut anchors = Vec::with_capacity(d);
        let mut series = data.to_vec();
        for _ in 0..d {
            let Some(&last) = series.last() else { break };
            anchors.push(last);
            series = difference(&series);
        }
        let n = series.len();

        // Shock estimates from a long autoregression, zero where it has no lags yet
        let long_order = if q == 0 {
            0
        } else {
            (p + q).max((n / 10).min(LONG_AR_ORDER))
        };
        let start = if q == 0 { p } else { (long_order + q).max(p) };
        let unknowns = 1 + p + q;
        // One regression row per target, and at least as many rows as unknowns
        let required = (start + unknowns).max(2 * long_order + 1);
        if n < required || anchors.len() < d {
            return Err(ForecastError::InsufficientData {
                required: required + d,
                actual: data.len(),
            });
        }

        let mut shocks = vec![0.0; n];
        if q > 0 {
            let rows: Vec<(Vec<f64>, f64)> = (long_order..n)
                .map(|t| (lagged_row(&series[..t], long_order, &[], 0), series[t]))
                .collect();
            let long = least_squares(&rows)?;
            for t in long_order..n {
                shocks[t] = series[t] - long[0] - lag_sum(&long[1..], &series[..t]);
            }
        }

        let rows: Vec<(Vec<f64>, f64)> = (start..n)
            .map(|t| (lagged_row(&series[..t], p, &shocks[..t], q), series[t]))
            .collect();
        let beta = least_squares(&rows)?;

        let mut model = Self {
            intercept: beta[0],
            ar: beta[1..=p].to_vec(),
            ma: beta[p + 1..]
                .iter()
                .map(|c| c.clamp(-MA_BOUND, MA_BOUND))
                .collect(),
            d,
            history: series[n - p..].to_vec(),
            residuals: Vec::new(),
            anchors,
        };

        // Conditional residuals of the final model, also the in-sample one-step errors
        let mut residuals = vec![0.0; n];
        let mut sse = 0.0;
        for t in p..n {
            let error = series[t] - model.predict_next(&series[..t], &residuals[..t]);
            residuals[t] = error;
            sse += error * error;
        }
        model.residuals = residuals[n - q..].to_vec();
        let mse = sse / (n - p) as f64;

        Ok(Fitted { model, mse })
    }

    fn predict_next(&self, values: &[f64], shocks: &[f64]) -> f64 {
        self.intercept + lag_sum(&self.ar, values) + lag_sum(&self.ma, shocks)
    }

    fn validate_shape(&self) -> Result<(), ForecastError> {
        check_order("p", self.p(), MAX_ORDER)?;
        check_order("q", self.q(), MAX_ORDER)?;
        check_order("d", self.d, MAX_DIFFERENCING)?;
        for (required, actual) in [
            (self.p(), self.history.len()),
            (self.q(), self.residuals.len()),
            (self.d, self.anchors.len()),
        ] {
            if required != actual {
                return Err(ForecastError::InsufficientData { required, actual });
            }
        }
        Ok(())
    }
}

/// `[1, y_{t-1}, ..., y_{t-p}, e_{t-1}, ..., e_{t-q}]` for the target following `values`.
fn lagged_row(values: &[f64], p: usize, shocks: &[f64], q: usize) -> Vec<f64> {
    let mut row = Vec::with_capacity(1 + p + q);
    row.push(1.0);
    row.extend(values.iter().rev().take(p));
    row.extend(shocks.iter().rev().take(q));
    row
}

impl Forecaster for Arima {
    fn name(&self) -> &'static str {
        if self.d == 0 && self.ma.is_empty() {
            "Autoregressive AR(p)"
        } else {
            "ARIMA(p,d,q)"
        }
    }

    fn forecast(&self, steps: usize) -> Result<Vec<f64>, ForecastError> {
        self.validate_shape()?;

        let p = self.p();
        let mut values = self.history.clone();
        let mut shocks = self.residuals.clone();
        for _ in 0..steps {
            let next = self.predict_next(&values, &shocks);
            values.push(next);
            shocks.push(0.0);
        }

        let mut out = values.split_off(p);
        for &anchor in self.anchors.iter().rev() {
            let mut level = anchor;
            for value in out.iter_mut() {
                level += *value;
                *value = level;
            }
        }
        ensure_finite(out)
    }

    fn validate(&self) -> Result<(), ForecastError> {
        self.validate_shape()?;
        check_finite("intercept", self.intercept)?;
        self.ar
            .iter()
            .chain(&self.ma)
            .try_for_each(|&v| check_finite("coefficients", v))?;
        self.history
            .iter()
            .chain(&self.residuals)
            .chain(&self.anchors)
            .try_for_each(|&v| check_finite("state", v))
    }
}

/// Ordinary least squares via the normal equations, with a small ridge on the diagonal.
fn least_squares(rows: &[(Vec<f64>, f64)]) -> Result<Vec<f64>, ForecastError> {
    let unknowns = rows.first().map_or(0, |(row, _)| row.len());
    let mut xtx = vec![vec![0.0; unknowns]; unknowns];
    let mut xty = vec![0.0; unknowns];
    for (row, target) in rows {
        for i in 0..unknowns {
            xty[i] += row[i] * target;
            for j in 0..unknowns {
                xtx[i][j] += row[i] * row[j];
            }
        }
    }
    let scale = (0..unknowns).map(|i| xtx[i][i]).fold(1.0_f64, f64::max);
    for (i, r) in xtx.iter_mut().enumerate() {
        r[i] += RIDGE * scale;
    }
    solve(xtx, xty)
}

/// Gaussian elimination with partial pivoting.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>, ForecastError> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| {
                a[i][col]
                    .abs()
                    .partial_cmp(&a[j][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        if a[pivot][col].abs() < f64::EPSILON {
            return Err(ForecastError::InvalidParameter {
                name: "coefficients",
                reason: "design matrix is singular".to_string(),
            });
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for r in col + 1..n {
            let factor = a[r][col] / a[col][col];
            for c in col..n {
                a[r][c] -= factor * a[col][c];
            }
            b[r] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for r in (0..n).rev() {
        let tail: f64 = (r + 1..n).map(|c| a[r][c] * x[c]).sum();
        x[r] = (b[r] - tail) / a[r][r];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic zero-mean noise in [-1, 1).
    fn noise(len: usize) -> Vec<f64> {
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        (0..len)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                (state >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0
            })
            .collect()
    }

    #[test]
    fn test_recovers_ar1_process() {
        // y_t = 2 + 0.5 * y_{t-1}, fixed point at 4
        let mut data = vec![10.0];
        for _ in 0..40 {
            let prev = *data.last().unwrap();
            data.push(2.0 + 0.5 * prev);
        }
        // Long tail sits at the fixed point and makes the fit degenerate, so keep the transient
        let data = &data[..15];
        let fitted = Arima::fit(data, 1, 0, 0).unwrap();
        assert!((fitted.model.intercept - 2.0).abs() < 1e-4);
        assert!((fitted.model.ar[0] - 0.5).abs() < 1e-4);
        assert_eq!(fitted.model.name(), "Autoregressive AR(p)");

        let forecast = fitted.model.forecast(3).unwrap();
        let mut expected = *data.last().unwrap();
        for value in forecast {
            expected = 2.0 + 0.5 * expected;
            assert!((value - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn test_recovers_ma1_process() {
        // y_t = 10 + e_t + 0.6 * e_{t-1}
        let e = noise(600);
        let data: Vec<f64> = (1..e.len()).map(|t| 10.0 + e[t] + 0.6 * e[t - 1]).collect();
        let fitted = Arima::fit(&data, 0, 0, 1).unwrap();
        let model = &fitted.model;
        assert!((model.ma[0] - 0.6).abs() < 0.15, "theta = {}", model.ma[0]);
        assert!((model.intercept - 10.0).abs() < 0.2);
        // Noise variance of U(-1, 1) is 1/3
        assert!(fitted.mse < 0.45, "mse = {}", fitted.mse);

        // Only the first step sees the last shock, after that the forecast is the mean
        let forecast = model.forecast(3).unwrap();
        let expected_first = model.intercept + model.ma[0] * model.residuals[0];
        assert!((forecast[0] - expected_first).abs() < 1e-12);
        assert!((forecast[1] - model.intercept).abs() < 1e-12);
        assert!((forecast[2] - model.intercept).abs() < 1e-12);
    }

    #[test]
    fn test_first_difference_extends_linear_trend() {
        let data: Vec<f64> = (0..30).map(|x| 50.0 + 3.0 * x as f64).collect();
        let fitted = Arima::fit(&data, 0, 1, 0).unwrap();
        let forecast = fitted.model.forecast(4).unwrap();
        for (h, value) in forecast.iter().enumerate() {
            let expected = 50.0 + 3.0 * (30 + h) as f64;
            assert!((value - expected).abs() < 1e-6, "{} vs {}", value, expected);
        }
        assert_eq!(fitted.model.name(), "ARIMA(p,d,q)");
    }

    #[test]
    fn test_second_difference_extends_quadratic() {
        let data: Vec<f64> = (0..25).map(|t| (t * t) as f64).collect();
        let fitted = Arima::fit(&data, 0, 2, 0).unwrap();
        assert_eq!(fitted.model.anchors, vec![576.0, 47.0]);
        let forecast = fitted.model.forecast(5).unwrap();
        for (h, value) in forecast.iter().enumerate() {
            let t = (25 + h) as f64;
            assert!((value - t * t).abs() < 1e-4, "{} vs {}", value, t * t);
        }
    }

    #[test]
    fn test_forecast_length_matches_steps() {
        let data: Vec<f64> = (0..80)
            .map(|x| (x as f64 * 0.7).sin() * 10.0 + 100.0)
            .collect();
        for (p, d, q) in [(3, 0, 0), (2, 1, 1), (1, 2, 2)] {
            let fitted = Arima::fit(&data, p, d, q).unwrap();
            assert!(fitted.model.validate().is_ok());
            for steps in [1, 7, 60] {
                assert_eq!(fitted.model.forecast(steps).unwrap().len(), steps);
            }
        }
    }

    #[test]
    fn test_insufficient_data_and_bad_orders() {
        let err = Arima::fit(&[1.0, 2.0, 3.0], 2, 0, 0).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::InsufficientData {
                required: 5,
                actual: 3
            }
        ));
        assert!(Arima::fit(&[], 0, 0, 0).is_err());
        assert!(Arima::fit(&[1.0, 2.0], 0, 2, 0).is_err());
        assert!(Arima::fit(&[1.0; 100], MAX_ORDER + 1, 0, 0).is_err());
        assert!(Arima::fit(&[1.0; 100], 1, 3, 0).is_err());
    }

    #[test]
    fn test_validate_rejects_inconsistent_state() {
        let model = Arima {
            intercept: 0.0,
            ar: vec![0.5, 0.2],
            ma: vec![0.3],
            d: 1,
            history: vec![1.0, 2.0],
            residuals: vec![0.1],
            anchors: vec![5.0],
        };
        assert!(model.validate().is_ok());

        let mut truncated = model.clone();
        truncated.history.pop();
        assert!(truncated.validate().is_err());
        assert!(truncated.forecast(3).is_err());

        let mut missing_shock = model.clone();
        missing_shock.residuals.clear();
        assert!(missing_shock.validate().is_err());

        let mut missing_anchor = model;
        missing_anchor.anchors.clear();
        assert!(missing_anchor.validate().is_err());
    }

    #[test]
    fn test_solve_identity() {
        let a = vec![vec![2.0, 0.0], vec![0.0, 4.0]];
        let x = solve(a, vec![2.0, 8.0]).unwrap();
        assert_eq!(x, vec![1.0, 2.0]);
        assert!(solve(vec![vec![0.0]], vec![1.0]).is_err());
    }
}
