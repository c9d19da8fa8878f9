//! Fitting a `ForecastModel` from sales history.

use clap::ValueEnum;

use crate::config::FORECAST;
use crate::models::arima::Arima;
use crate::models::exponential_smoothing::{Holt, HoltWinters, SimpleExponentialSmoothing};
use crate::models::forecast_model::{ForecastModel, Naive};
use crate::models::forecaster::{Fitted, ForecastError};

/// Which model family to fit.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    ValueEnum,
    strum_macros::EnumIter,
    strum_macros::Display,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ModelKind {
    Naive,
    Ses,
    Holt,
    #[default]
    HoltWinters,
    Ar,
    Arima,
    /// Fit every kind and keep the lowest in-sample MSE
    Auto,
}

#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub season_length: usize,
    pub ar_order: usize,
    /// Differencing order for `Arima`
    pub differencing: usize,
    /// Moving-average order for `Arima`
    pub ma_order: usize,
    pub grid_steps: u32,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            season_length: FORECAST.training.default_season_length,
            ar_order: FORECAST.training.default_ar_order,
            differencing: FORECAST.training.default_differencing,
            ma_order: FORECAST.training.default_ma_order,
            grid_steps: FORECAST.training.smoothing_grid_steps,
        }
    }
}

fn wrap<M>(fitted: Fitted<M>, variant: fn(M) -> ForecastModel) -> Fitted<ForecastModel> {
    Fitted {
        model: variant(fitted.model),
        mse: fitted.mse,
    }
}

/// Fit `kind` to `data`. `Auto` silently skips kinds that cannot be fitted (e.g. too
/// little data for two seasons) and fails only if none can.
pub fn fit_model(
    kind: ModelKind,
    data: &[f64],
    options: &TrainOptions,
) -> Result<Fitted<ForecastModel>, ForecastError> {
    let min = FORECAST.training.min_observations;
    if data.len() < min {
        return Err(ForecastError::InsufficientData {
            required: min,
            actual: data.len(),
        });
    }

    match kind {
        ModelKind::Naive => {
            let last_value = data[data.len() - 1];
            let mse = data
                .windows(2)
                .map(|w| (w[1] - w[0]).powi(2))
                .sum::<f64>()
                / (data.len() - 1) as f64;
            Ok(Fitted {
                model: ForecastModel::Naive(Naive { last_value }),
                mse,
            })
        }
        ModelKind::Ses => Ok(wrap(
            SimpleExponentialSmoothing::auto(data, options.grid_steps)?,
            ForecastModel::SimpleExponentialSmoothing,
        )),
        ModelKind::Holt => Ok(wrap(
            Holt::auto(data, options.grid_steps)?,
            ForecastModel::Holt,
        )),
        ModelKind::HoltWinters => Ok(wrap(
            HoltWinters::auto(data, options.season_length, options.grid_steps)?,
            ForecastModel::HoltWinters,
        )),
        ModelKind::Ar => Ok(wrap(
            Arima::fit(data, options.ar_order, 0, 0)?,
            ForecastModel::Arima,
        )),
        ModelKind::Arima => Ok(wrap(
            Arima::fit(data, options.ar_order, options.differencing, options.ma_order)?,
            ForecastModel::Arima,
        )),
        ModelKind::Auto => {
            let candidates = [
                ModelKind::Naive,
                ModelKind::Ses,
                ModelKind::Holt,
                ModelKind::HoltWinters,
                ModelKind::Ar,
                ModelKind::Arima,
            ];
            let mut best: Option<Fitted<ForecastModel>> = None;
            let mut last_err = None;
            for candidate in candidates {
                match fit_model(candidate, data, options) {
                    Ok(fitted) => {
                        log::info!("{:>12}: in-sample MSE {:.4}", candidate, fitted.mse);
                        if fitted.mse.is_finite()
                            && best.as_ref().is_none_or(|b| fitted.mse < b.mse)
                        {
                            best = Some(fitted);
                        }
                    }
                    Err(e) => {
                        log::info!("{:>12}: skipped ({})", candidate, e);
                        last_err = Some(e);
                    }
                }
            }
            best.ok_or(last_err.unwrap_or(ForecastError::InsufficientData {
                required: min,
                actual: data.len(),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::forecaster::Forecaster;
    use strum::IntoEnumIterator;

    fn weekly_sales(weeks: usize) -> Vec<f64> {
        let pattern = [100.0, 110.0, 120.0, 115.0, 130.0, 160.0, 90.0];
        (0..weeks * 7)
            .map(|i| pattern[i % 7] + 0.5 * i as f64)
            .collect()
    }

    #[test]
    fn test_every_kind_fits_weekly_sales() {
        let data = weekly_sales(8);
        let options = TrainOptions::default();
        for kind in ModelKind::iter() {
            let fitted = fit_model(kind, &data, &options)
                .unwrap_or_else(|e| panic!("{} failed: {}", kind, e));
            assert!(fitted.model.validate().is_ok());
            assert_eq!(fitted.model.forecast(60).unwrap().len(), 60);
        }
    }

    #[test]
    fn test_auto_prefers_seasonal_model_for_seasonal_data() {
        let data = weekly_sales(8);
        let auto = fit_model(ModelKind::Auto, &data, &TrainOptions::default()).unwrap();
        let naive = fit_model(ModelKind::Naive, &data, &TrainOptions::default()).unwrap();
        assert!(auto.mse < naive.mse);
        assert!(!matches!(auto.model, ForecastModel::Naive(_)));
    }

    #[test]
    fn test_auto_skips_kinds_that_need_more_data() {
        let data = vec![10.0, 11.0, 12.0, 13.0];
        let fitted = fit_model(ModelKind::Auto, &data, &TrainOptions::default()).unwrap();
        assert!(!matches!(fitted.model, ForecastModel::HoltWinters(_)));
    }

    #[test]
    fn test_arima_orders_come_from_options() {
        let data = weekly_sales(8);
        let options = TrainOptions {
            ar_order: 2,
            differencing: 2,
            ma_order: 3,
            ..TrainOptions::default()
        };
        let fitted = fit_model(ModelKind::Arima, &data, &options).unwrap();
        let ForecastModel::Arima(arima) = &fitted.model else {
            panic!("expected ARIMA, got {}", fitted.model);
        };
        assert_eq!((arima.p(), arima.d, arima.q()), (2, 2, 3));

        let ar = fit_model(ModelKind::Ar, &data, &options).unwrap();
        let ForecastModel::Arima(ar) = &ar.model else {
            panic!("expected AR, got {}", ar.model);
        };
        assert_eq!((ar.p(), ar.d, ar.q()), (2, 0, 0));

        let too_much_differencing = TrainOptions {
            differencing: 3,
            ..options
        };
        assert!(fit_model(ModelKind::Arima, &data, &too_much_differencing).is_err());
    }

    #[test]
    fn test_too_little_data() {
        assert!(fit_model(ModelKind::Naive, &[1.0, 2.0], &TrainOptions::default()).is_err());
    }

    #[test]
    fn test_kind_display_is_kebab_case() {
        assert_eq!(ModelKind::HoltWinters.to_string(), "holt-winters");
        assert_eq!(ModelKind::default(), ModelKind::HoltWinters);
    }
}
