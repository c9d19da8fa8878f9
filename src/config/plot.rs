//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    pub forecast_line_color: Color32,
    /// Width of the forecast line
    pub forecast_line_width: f32,
    /// Radius of the per-day markers (0.0 hides them)
    pub marker_radius: f32,
    /// Plot aspect ratio (width:height)
    pub plot_aspect_ratio: f32,
    /// Headroom added above/below the forecast range, as a fraction of the range
    pub y_padding_pct: f64,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    forecast_line_color: Color32::from_rgb(0, 191, 255), // Deep sky blue
    forecast_line_width: 2.0,
    marker_radius: 2.5,
    plot_aspect_ratio: 2.0,
    y_padding_pct: 0.05,
};
