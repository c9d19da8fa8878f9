use eframe::egui::{CentralPanel, Context, Frame, Margin, TopBottomPanel};

use crate::domain::Horizon;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_panels::{HorizonEvent, HorizonPanel, Panel};
use crate::ui::utils::{format_sales, spaced_separator};
use crate::utils::time_utils::{epoch_ms_to_utc, format_date};

use super::app::ForecastApp;

impl ForecastApp {
    fn horizon_panel(&mut self, ui: &mut eframe::egui::Ui) -> Vec<HorizonEvent> {
        let mut panel = HorizonPanel::new(self.horizon, self.engine.model_file().max_horizon);
        panel.render(ui)
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::same(16));
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                ui.label_header(UI_TEXT.app_title);
                ui.add_space(10.0);

                for event in self.horizon_panel(ui) {
                    match event {
                        HorizonEvent::Changed(horizon) => self.set_horizon(horizon),
                    }
                }

                spaced_separator(ui);

                match self.current_view() {
                    Ok(view) => {
                        ui.label_subheader(&view.caption);
                        ui.metric(
                            UI_TEXT.status_total,
                            &format_sales(view.forecast.total()),
                            UI_CONFIG.colors.metric_value,
                        );
                        ui.add_space(5.0);
                        self.plot_view.show(
                            ui,
                            &view.forecast,
                            self.engine.model_file().last_observation,
                            self.engine.model_name(),
                        );
                    }
                    Err(e) => {
                        ui.label_error(e.to_string());
                        ui.label_subdued(format!(
                            "Try a different value between {} and {}.",
                            Horizon::MIN.days(),
                            Horizon::MAX.days()
                        ));
                    }
                }
            });
    }

    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        let status_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                let model_file = self.engine.model_file();
                let color = UI_CONFIG.colors.metric_value;
                ui.horizontal(|ui| {
                    ui.metric(UI_TEXT.status_model, &model_file.model.to_string(), color);
                    ui.separator();
                    if !model_file.name.is_empty() {
                        ui.metric(UI_TEXT.status_dataset, &model_file.name, color);
                        ui.separator();
                    }
                    ui.metric(
                        UI_TEXT.status_last_observation,
                        &format_date(model_file.last_observation),
                        color,
                    );
                    ui.separator();
                    ui.metric(
                        UI_TEXT.status_trained,
                        &epoch_ms_to_utc(model_file.trained_at_ms),
                        color,
                    );
                });
            });
    }
}
