use eframe::{Frame, egui};
use std::fmt;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::{Forecast, Horizon};
use crate::engine::ForecastEngine;
use crate::models::ForecastError;
use crate::ui::config::UI_TEXT;
use crate::ui::ui_plot_view::ForecastPlotView;
use crate::ui::utils::setup_custom_visuals;

/// Error types surfaced by a render cycle
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// The model refused or failed to forecast this horizon
    Forecast {
        horizon: Horizon,
        source: ForecastError,
    },
    /// The model produced nothing to draw
    EmptyForecast,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Forecast { horizon, source } => {
                write!(f, "{} ({}): {}", UI_TEXT.forecast_failed, horizon, source)
            }
            AppError::EmptyForecast => write!(f, "{}", UI_TEXT.forecast_empty),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Forecast { source, .. } => Some(source),
            AppError::EmptyForecast => None,
        }
    }
}

/// Everything one frame needs to draw a successful forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub horizon: Horizon,
    pub caption: String,
    pub forecast: Forecast,
}

pub fn caption_for(horizon: Horizon) -> String {
    format!(
        "{} {} {}",
        UI_TEXT.caption_prefix,
        horizon.days(),
        UI_TEXT.caption_suffix
    )
}

/// One render cycle: read the horizon, ask the model, package the result.
/// Stateless: a failure here affects only the frame that asked.
pub fn render_cycle(engine: &ForecastEngine, horizon: Horizon) -> Result<ForecastView, AppError> {
    let forecast = engine
        .forecast(horizon)
        .map_err(|source| AppError::Forecast { horizon, source })?;
    if forecast.is_empty() {
        return Err(AppError::EmptyForecast);
    }
    Ok(ForecastView {
        horizon,
        caption: caption_for(horizon),
        forecast,
    })
}

pub struct ForecastApp {
    pub(super) engine: ForecastEngine,
    // Transient: every launch starts at the default
    pub(super) horizon: Horizon,
    pub(super) plot_view: ForecastPlotView,
    // Last failure written to the log, so a failing horizon is logged once, not every frame
    pub(super) last_logged_failure: Option<AppError>,
}

impl ForecastApp {
    pub fn new(cc: &eframe::CreationContext<'_>, engine: ForecastEngine) -> Self {
        setup_custom_visuals(&cc.egui_ctx);
        Self::with_engine(engine)
    }

    pub fn with_engine(engine: ForecastEngine) -> Self {
        Self {
            engine,
            horizon: Horizon::default(),
            plot_view: ForecastPlotView::new(),
            last_logged_failure: None,
        }
    }

    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    pub(super) fn set_horizon(&mut self, horizon: Horizon) {
        self.horizon = horizon;
    }

    /// Runs the cycle for the current horizon and logs new failures.
    pub(super) fn current_view(&mut self) -> Result<ForecastView, AppError> {
        let result = render_cycle(&self.engine, self.horizon);
        match &result {
            Ok(_) => self.last_logged_failure = None,
            Err(e) => {
                if self.last_logged_failure.as_ref() != Some(e) {
                    log::warn!("{}", e);
                    self.last_logged_failure = Some(e.clone());
                }
            }
        }
        result
    }
}

impl eframe::App for ForecastApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Application shutdown complete.");
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ModelFile;
    use crate::models::{ForecastModel, Holt};
    use chrono::NaiveDate;

    fn engine(max_horizon: Option<usize>) -> ForecastEngine {
        ForecastEngine::new(ModelFile::new(
            "test",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            max_horizon,
            ForecastModel::Holt(Holt {
                alpha: 0.5,
                beta: 0.5,
                level: 200.0,
                trend: -1.5,
            }),
        ))
    }

    #[test]
    fn test_default_cycle_has_thirty_points_and_caption() {
        let view = render_cycle(&engine(None), Horizon::default()).unwrap();
        assert_eq!(view.forecast.len(), 30);
        assert_eq!(view.caption, "Predicted Sales for next 30 days");
    }

    #[test]
    fn test_slider_extremes() {
        let engine = engine(None);
        assert_eq!(render_cycle(&engine, Horizon::clamped(1)).unwrap().forecast.len(), 1);
        assert_eq!(render_cycle(&engine, Horizon::clamped(60)).unwrap().forecast.len(), 60);
    }

    #[test]
    fn test_failing_horizon_then_recovery() {
        let mut app = ForecastApp::with_engine(engine(Some(10)));
        app.set_horizon(Horizon::clamped(20));
        let err = app.current_view().unwrap_err();
        assert!(matches!(
            err,
            AppError::Forecast {
                source: ForecastError::HorizonTooLong { requested: 20, max: 10 },
                ..
            }
        ));
        assert!(err.to_string().starts_with("Forecast failed (20 days)"));
        assert_eq!(app.last_logged_failure, Some(err));

        app.set_horizon(Horizon::clamped(5));
        let view = app.current_view().unwrap();
        assert_eq!(view.forecast.len(), 5);
        assert_eq!(app.last_logged_failure, None);
    }

    #[test]
    fn test_app_starts_at_default_horizon() {
        let app = ForecastApp::with_engine(engine(None));
        assert_eq!(app.horizon(), Horizon::default());
    }
}
