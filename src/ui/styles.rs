use eframe::egui::{Color32, RichText, Ui};

use crate::ui::config::UI_CONFIG;

/// Text roles used by the dashboard, so panels never pick colours themselves.
pub trait UiStyleExt {
    /// Hint text under a control or next to an error.
    fn label_subdued(&mut self, text: impl Into<String>);

    /// `label: value` pair for the status bar and the forecast summary.
    fn metric(&mut self, label: &str, value: &str, color: Color32);

    /// Page title.
    fn label_header(&mut self, text: impl Into<String>);

    /// Forecast caption above the chart.
    fn label_subheader(&mut self, text: impl Into<String>);

    /// A failed forecast for the selected horizon.
    fn label_error(&mut self, text: impl Into<String>);

    /// The model caps the horizon below the slider's maximum.
    fn label_warning(&mut self, text: impl Into<String>);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(UI_CONFIG.colors.label));
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.label_subdued(format!("{}:", label));
            ui.label(RichText::new(value).small().color(color));
        });
    }

    fn label_header(&mut self, text: impl Into<String>) {
        self.heading(RichText::new(text).color(UI_CONFIG.colors.heading).strong());
    }

    fn label_subheader(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).color(UI_CONFIG.colors.subsection_heading));
    }

    fn label_error(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).color(UI_CONFIG.colors.error));
    }

    fn label_warning(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(UI_CONFIG.colors.warning));
    }
}
