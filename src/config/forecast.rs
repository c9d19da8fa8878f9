//! Forecast horizon configuration

/// Configuration for the Horizon UI slider
pub struct HorizonConfig {
    pub min_days: u32,
    pub max_days: u32,
    pub default_days: u32,
}

/// Settings used when fitting a model from sales history
pub struct TrainingSettings {
    // Grid resolution for smoothing constants (alpha, beta, gamma). 20 => 0.05 steps
    pub smoothing_grid_steps: u32,
    // Fewer observations than this and fitting is refused
    pub min_observations: usize,
    pub default_ar_order: usize,
    // ARIMA d (0..=2) and q
    pub default_differencing: usize,
    pub default_ma_order: usize,
    pub default_season_length: usize,
}

/// The Master Forecast Configuration
pub struct ForecastConfig {
    pub horizon: HorizonConfig,
    pub training: TrainingSettings,
}

pub const FORECAST: ForecastConfig = ForecastConfig {
    horizon: HorizonConfig {
        min_days: 1,
        max_days: 60,
        default_days: 30,
    },

    training: TrainingSettings {
        smoothing_grid_steps: 20,
        min_observations: 3,
        default_ar_order: 7,
        default_differencing: 1,
        default_ma_order: 1,
        default_season_length: 7,
    },
};
