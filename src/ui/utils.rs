use eframe::egui::{Context, Ui, Visuals};

use crate::ui::config::UI_CONFIG;

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;

    // Make the widgets stand out a bit more
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

/// Creates a separator with standard spacing
pub fn spaced_separator(ui: &mut Ui) {
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);
}

/// Formats a sales figure with thousands separators.
/// - Large (>=1000): no decimals (12,345)
/// - Otherwise: 2 decimals (123.45)
pub fn format_sales(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value.abs() < 1000.0 {
        return format!("{:.2}", value);
    }

    let rounded = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sales() {
        assert_eq!(format_sales(0.0), "0.00");
        assert_eq!(format_sales(123.456), "123.46");
        assert_eq!(format_sales(1234.4), "1,234");
        assert_eq!(format_sales(-1234567.0), "-1,234,567");
        assert_eq!(format_sales(999999.6), "1,000,000");
    }
}
