/// Every user-visible string in one place
pub struct UiText {
    pub window_title: &'static str,
    pub app_title: &'static str,
    pub slider_label: &'static str,
    pub slider_suffix: &'static str,
    pub caption_prefix: &'static str,
    pub caption_suffix: &'static str,
    pub forecast_failed: &'static str,
    pub forecast_empty: &'static str,
    pub horizon_cap_prefix: &'static str,
    pub plot_x_axis: &'static str,
    pub plot_y_axis: &'static str,
    pub status_model: &'static str,
    pub status_dataset: &'static str,
    pub status_last_observation: &'static str,
    pub status_trained: &'static str,
    pub status_total: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    window_title: "Sales Forecasting App",
    app_title: "Sales Forecasting App",
    slider_label: "Select number of days to forecast",
    slider_suffix: " days",
    caption_prefix: "Predicted Sales for next",
    caption_suffix: "days",
    forecast_failed: "Forecast failed",
    forecast_empty: "Model returned no forecast values",
    horizon_cap_prefix: "This model forecasts at most",
    plot_x_axis: "Date",
    plot_y_axis: "Sales",
    status_model: "Model",
    status_dataset: "Dataset",
    status_last_observation: "Last observation",
    status_trained: "Trained",
    status_total: "Forecast total",
};
