use chrono::{Days, NaiveDate};
use eframe::egui;
use egui_plot::{AxisHints, Corner, GridMark, HPlacement, Legend, Line, Plot, PlotPoints, Points};

use crate::config::PLOT_CONFIG;
use crate::domain::Forecast;
use crate::ui::config::UI_TEXT;
use crate::ui::utils::format_sales;
use crate::utils::time_utils::format_date;

/// Line chart of a forecast, x = day index (1-based), y = predicted sales.
#[derive(Default)]
pub struct ForecastPlotView;

impl ForecastPlotView {
    pub fn new() -> Self {
        Self
    }

    pub fn show(
        &self,
        ui: &mut egui::Ui,
        forecast: &Forecast,
        last_observation: NaiveDate,
        series_name: &str,
    ) {
        let points = plot_points(forecast);
        let day_count = forecast.len() as f64;
        let (y_min, y_max) = padded_range(forecast);

        Plot::new("forecast_plot")
            .view_aspect(PLOT_CONFIG.plot_aspect_ratio)
            .legend(Legend::default().position(Corner::LeftTop))
            .custom_x_axes(vec![create_x_axis(last_observation)])
            .custom_y_axes(vec![create_y_axis()])
            .label_formatter(move |_name, value| {
                match day_to_date(last_observation, value.x) {
                    Some(date) => format!("{}\n{}", format_date(date), format_sales(value.y)),
                    None => String::new(),
                }
            })
            .x_grid_spacer(move |input| day_grid_marks(input.bounds, day_count))
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds_x(0.5..=day_count + 0.5);
                plot_ui.set_plot_bounds_y(y_min..=y_max);

                plot_ui.line(
                    Line::new(series_name, PlotPoints::new(points.clone()))
                        .color(PLOT_CONFIG.forecast_line_color)
                        .width(PLOT_CONFIG.forecast_line_width),
                );
                if PLOT_CONFIG.marker_radius > 0.0 {
                    plot_ui.points(
                        Points::new(series_name, PlotPoints::new(points))
                            .color(PLOT_CONFIG.forecast_line_color)
                            .radius(PLOT_CONFIG.marker_radius),
                    );
                }
            });
    }
}

pub(crate) fn plot_points(forecast: &Forecast) -> Vec<[f64; 2]> {
    forecast
        .values()
        .enumerate()
        .map(|(i, v)| [(i + 1) as f64, v])
        .collect()
}

/// Value range with headroom; a flat forecast still gets a visible band.
pub(crate) fn padded_range(forecast: &Forecast) -> (f64, f64) {
    let (lo, hi) = forecast.value_range().unwrap_or((0.0, 1.0));
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * PLOT_CONFIG.y_padding_pct
    } else {
        lo.abs().max(1.0) * PLOT_CONFIG.y_padding_pct
    };
    (lo - pad, hi + pad)
}

/// Day index (1 = day after last observation) back to a date; None off the integer grid.
pub(crate) fn day_to_date(last_observation: NaiveDate, x: f64) -> Option<NaiveDate> {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 1.0 {
        return None;
    }
    last_observation.checked_add_days(Days::new(rounded as u64))
}

/// Tick every day for short horizons, weekly otherwise.
fn day_grid_marks(bounds: (f64, f64), day_count: f64) -> Vec<GridMark> {
    let step_size = if day_count <= 14.0 { 1.0 } else { 7.0 };
    let (min, max) = bounds;
    let first = min.ceil().max(1.0) as i64;
    let last = max.floor().min(day_count) as i64;
    (first..=last)
        .filter(|day| step_size == 1.0 || (day - 1) % 7 == 0)
        .map(|day| GridMark {
            value: day as f64,
            step_size,
        })
        .collect()
}

fn create_x_axis(last_observation: NaiveDate) -> AxisHints<'static> {
    AxisHints::new_x()
        .label(UI_TEXT.plot_x_axis)
        .formatter(move |grid_mark, _range| {
            day_to_date(last_observation, grid_mark.value)
                .map(format_date)
                .unwrap_or_default()
        })
}

fn create_y_axis() -> AxisHints<'static> {
    AxisHints::new_y()
        .label(UI_TEXT.plot_y_axis)
        .formatter(|grid_mark, _range| format_sales(grid_mark.value))
        .placement(HPlacement::Left)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    }

    #[test]
    fn test_plot_points_are_one_based() {
        let forecast = Forecast::from_values(last(), vec![3.0, 4.0]);
        assert_eq!(plot_points(&forecast), vec![[1.0, 3.0], [2.0, 4.0]]);
    }

    #[test]
    fn test_day_to_date() {
        assert_eq!(day_to_date(last(), 1.0), NaiveDate::from_ymd_opt(2024, 4, 1));
        assert_eq!(day_to_date(last(), 1.5), None);
        assert_eq!(day_to_date(last(), 0.0), None);
    }

    #[test]
    fn test_flat_forecast_gets_visible_range() {
        let forecast = Forecast::from_values(last(), vec![50.0; 5]);
        let (lo, hi) = padded_range(&forecast);
        assert!(lo < 50.0 && hi > 50.0);
    }

    #[test]
    fn test_grid_marks_weekly_for_long_horizons() {
        let marks: Vec<f64> = day_grid_marks((0.5, 30.5), 30.0)
            .into_iter()
            .map(|m| m.value)
            .collect();
        assert_eq!(marks, vec![1.0, 8.0, 15.0, 22.0, 29.0]);
        assert_eq!(day_grid_marks((0.5, 3.5), 3.0).len(), 3);
    }
}
