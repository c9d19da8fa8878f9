#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe::{NativeOptions, egui};
use sales_forecast::config::MODEL_PATH;
use sales_forecast::ui::UI_CONFIG;
use sales_forecast::ui::config::UI_TEXT;
use sales_forecast::{ForecastEngine, load_model, run_app};

fn main() -> anyhow::Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Load the model (fatal: no window without it)
    let model_file = match load_model() {
        Ok(model_file) => model_file,
        Err(e) => {
            log::error!("Cannot start: failed to load model from {}: {:#}", MODEL_PATH, e);
            return Err(e);
        }
    };
    log::info!(
        "Loaded {} ({}), last observation {}",
        model_file.model,
        model_file.name,
        model_file.last_observation
    );
    let engine = ForecastEngine::new(model_file);

    // C. Run Native App
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(UI_TEXT.window_title)
            .with_inner_size(UI_CONFIG.initial_window_size),
        ..Default::default()
    };

    eframe::run_native(
        UI_TEXT.window_title,
        options,
        Box::new(move |cc| Ok(run_app(cc, engine))),
    )
    .map_err(|e| anyhow::anyhow!("UI terminated with an error: {}", e))
}
