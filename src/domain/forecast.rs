use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single predicted value, indexed by calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Ordered predictions for the days following the last observation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Forecast {
    pub points: Vec<ForecastPoint>,
}

impl Forecast {
    /// Attach dates `last_observation + 1 .. last_observation + n` to raw model output.
    pub fn from_values(last_observation: NaiveDate, values: Vec<f64>) -> Self {
        let points = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| ForecastPoint {
                // Falls back to the last observation only at the end of chrono's calendar
                date: last_observation
                    .checked_add_days(Days::new(i as u64 + 1))
                    .unwrap_or(last_observation),
                value,
            })
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// (min, max) over the predicted values, None when empty
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    pub fn total(&self) -> f64 {
        self.values().sum()
    }
}
