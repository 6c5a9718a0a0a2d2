//! Synthetic index series for example charts.

mod derived;

pub use derived::{
    DistributionPoint, QuartileCurvePoint, SurvivalPoint, quartile_curves, return_distribution,
    survival_curves,
};

use chrono::NaiveDate;
use rand::Rng;

use crate::core::DailyReturn;

/// Default series length: one year of trading days.
pub const DEFAULT_LEN: usize = 252;
/// Default starting index level.
pub const DEFAULT_INITIAL: f64 = 100.0;

/// Daily returns are drawn from `(u - DRIFT_CENTER) * DAILY_SPREAD` with `u` uniform in `[0, 1)`.
const DRIFT_CENTER: f64 = 0.48;
const DAILY_SPREAD: f64 = 0.02;

/// The first calendar date of every generated series.
#[must_use]
pub fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 2, 4).unwrap_or_default()
}

/// A builder for a biased random walk over consecutive calendar days.
///
/// Each call to [`generate`](Self::generate) draws a fresh sequence; nothing is cached.
#[derive(Debug, Clone, Copy)]
pub struct TimeSeriesBuilder {
    len: usize,
    start: NaiveDate,
    initial: f64,
}

impl Default for TimeSeriesBuilder {
    fn default() -> Self {
        Self {
            len: DEFAULT_LEN,
            start: default_start(),
            initial: DEFAULT_INITIAL,
        }
    }
}

impl TimeSeriesBuilder {
    /// Creates a builder with the defaults: 252 points from 2021-02-04, starting at 100.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of points to produce.
    #[must_use]
    pub const fn len(mut self, len: usize) -> Self {
        self.len = len;
        self
    }

    /// Sets the date of the first point.
    #[must_use]
    pub const fn start(mut self, start: NaiveDate) -> Self {
        self.start = start;
        self
    }

    /// Sets the level the walk compounds from. Must be positive for the output to stay positive.
    #[must_use]
    pub const fn initial(mut self, initial: f64) -> Self {
        self.initial = initial;
        self
    }

    /// Draws a new series from `rng`.
    ///
    /// The first point is already one step away from the initial level. Dates increase by
    /// one calendar day per point.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<DailyReturn> {
        let mut current = self.initial;
        self.start
            .iter_days()
            .take(self.len)
            .map(|date| {
                let change = (rng.random::<f64>() - DRIFT_CENTER) * DAILY_SPREAD;
                current *= 1.0 + change;
                DailyReturn {
                    date,
                    value: current,
                }
            })
            .collect()
    }
}

/// Shorthand for `TimeSeriesBuilder::new().len(len).generate(rng)`.
pub fn generate_time_series<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<DailyReturn> {
    TimeSeriesBuilder::new().len(len).generate(rng)
}
