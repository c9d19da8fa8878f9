use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::PathBuf;
use strum::IntoEnumIterator;

use sales_forecast::config::{FORECAST, MODEL_PATH};
use sales_forecast::data::ModelFile;
use sales_forecast::domain::SalesHistory;
use sales_forecast::models::{ModelKind, TrainOptions, fit_model};

/// Fit a forecasting model to daily sales history and write the artifact the dashboard loads.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Sales history: CSV (`date,sales`) or JSON array of {date, sales}
    #[arg(long, short)]
    input: PathBuf,

    /// Model family to fit
    #[arg(long, short, value_enum, default_value_t = ModelKind::default())]
    kind: ModelKind,

    /// Where to write the model
    #[arg(long, short, default_value = MODEL_PATH)]
    output: PathBuf,

    /// Season length in days (Holt-Winters)
    #[arg(long, default_value_t = FORECAST.training.default_season_length)]
    season: usize,

    /// Number of lags (AR / ARIMA)
    #[arg(long, default_value_t = FORECAST.training.default_ar_order)]
    ar_order: usize,

    /// Differencing order, 0..=2 (ARIMA)
    #[arg(long, default_value_t = FORECAST.training.default_differencing)]
    d: usize,

    /// Moving-average order (ARIMA)
    #[arg(long, default_value_t = FORECAST.training.default_ma_order)]
    q: usize,

    /// Refuse forecasts longer than this many days
    #[arg(long)]
    max_horizon: Option<usize>,

    /// Dataset label shown in the dashboard status bar (defaults to the input file name)
    #[arg(long)]
    name: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    let history = SalesHistory::load_from_path(&args.input)?;
    let last_observation = history
        .last_date()
        .ok_or_else(|| anyhow!("Sales history is empty"))?;
    log::info!(
        "Loaded {} observations from {:?} (last {})",
        history.len(),
        args.input,
        last_observation
    );

    let options = TrainOptions {
        season_length: args.season,
        ar_order: args.ar_order,
        differencing: args.d,
        ma_order: args.q,
        ..TrainOptions::default()
    };
    let fitted = fit_model(args.kind, &history.values(), &options).with_context(|| {
        let kinds: Vec<String> = ModelKind::iter().map(|k| k.to_string()).collect();
        format!(
            "Failed to fit {} (available kinds: {})",
            args.kind,
            kinds.join(", ")
        )
    })?;
    log::info!("Fitted {} with in-sample MSE {:.4}", fitted.model, fitted.mse);

    let name = args.name.clone().unwrap_or_else(|| {
        args.input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    let model_file = ModelFile::new(name, last_observation, args.max_horizon, fitted.model);
    model_file.check()?;
    model_file.save_to_path(&args.output)?;

    println!("✅ Model written to {:?}", args.output);
    Ok(())
}
