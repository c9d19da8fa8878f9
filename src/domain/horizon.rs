use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::FORECAST;

/// Number of future days to forecast.
/// Only constructible through `clamped`, so the value always sits inside the slider bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Horizon(u32);

impl Horizon {
    pub const MIN: Horizon = Horizon(FORECAST.horizon.min_days);
    pub const MAX: Horizon = Horizon(FORECAST.horizon.max_days);

    pub fn clamped(days: u32) -> Self {
        Self(days.clamp(FORECAST.horizon.min_days, FORECAST.horizon.max_days))
    }

    #[inline]
    pub fn days(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn steps(self) -> usize {
        self.0 as usize
    }

    /// Inclusive slider range
    pub fn range() -> std::ops::RangeInclusive<u32> {
        Self::MIN.0..=Self::MAX.0
    }

    pub fn all() -> impl Iterator<Item = Horizon> {
        Self::range().map(Horizon)
    }
}

impl Default for Horizon {
    fn default() -> Self {
        Self(FORECAST.horizon.default_days)
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} days", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_thirty_days() {
        assert_eq!(Horizon::default().days(), 30);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(Horizon::clamped(0).days(), 1);
        assert_eq!(Horizon::clamped(1).days(), 1);
        assert_eq!(Horizon::clamped(60).days(), 60);
        assert_eq!(Horizon::clamped(61).days(), 60);
        assert_eq!(Horizon::clamped(u32::MAX).days(), 60);
    }

    #[test]
    fn test_all_covers_slider_range() {
        let all: Vec<u32> = Horizon::all().map(Horizon::days).collect();
        assert_eq!(all.len(), 60);
        assert_eq!(all.first(), Some(&1));
        assert_eq!(all.last(), Some(&60));
    }
}
