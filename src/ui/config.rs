use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub metric_value: Color32,
    pub error: Color32,
    pub warning: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub initial_window_size: [f32; 2],
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,     // This sets every label globally to this color
        heading: Color32::YELLOW, // Sets every heading
        subsection_heading: Color32::ORANGE, // Sets every subsection heading
        central_panel: Color32::from_rgb(30, 30, 36),
        side_panel: Color32::from_rgb(25, 25, 25),
        metric_value: Color32::from_rgb(100, 200, 255),
        error: Color32::from_rgb(255, 100, 100),
        warning: Color32::from_rgb(255, 215, 0),
    },
    initial_window_size: [960.0, 640.0],
};
