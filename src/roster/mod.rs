//! Company universes: one capability ("produce a roster plus its quartile aggregates")
//! behind [`UniverseSource`], with a synthetic and an external-dataset implementation.

pub mod dataset;
mod hashed;
mod synthetic;

pub use dataset::{Dataset, DatasetSource};
pub use hashed::{hashed_profile, hashed_sector};
pub use synthetic::{SYNTHETIC_TICKERS, SyntheticSource};

use serde::Serialize;

use crate::config::{DashboardConfig, SourceConfig};
use crate::core::{Company, EsgError, Quartile, Sector};
use crate::metrics::QuartileMetrics;

/// A company roster together with its per-quartile aggregates.
///
/// Held read-only by the views for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Universe {
    pub companies: Vec<Company>,
    #[serde(rename = "quartileMetrics")]
    pub metrics: QuartileMetrics,
}

impl Universe {
    /// The fallback universe: no companies and all-zero metrics for every quartile.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            companies: Vec::new(),
            metrics: QuartileMetrics::zeroed(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.companies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    /// Looks up a company by exact ticker.
    #[must_use]
    pub fn company(&self, ticker: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.ticker == ticker)
    }

    /// Case-insensitive substring search on ticker or name, in roster order, at most `limit` hits.
    #[must_use]
    pub fn search(&self, term: &str, limit: usize) -> Vec<&Company> {
        let needle = term.to_lowercase();
        self.companies
            .iter()
            .filter(|c| {
                c.ticker.to_lowercase().contains(&needle) || c.name.to_lowercase().contains(&needle)
            })
            .take(limit)
            .collect()
    }

    /// Companies assigned to `q`.
    pub fn members(&self, q: Quartile) -> impl Iterator<Item = &Company> + '_ {
        self.companies.iter().filter(move |c| c.quartile == q)
    }

    /// Mean ESG total over the roster, `None` when empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_total(&self) -> Option<f64> {
        if self.companies.is_empty() {
            return None;
        }
        Some(self.companies.iter().map(|c| c.esg.total).sum::<f64>() / self.companies.len() as f64)
    }

    /// Mean ESG total of the companies in `sector`, `None` when the sector has no members.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sector_mean_total(&self, sector: Sector) -> Option<f64> {
        let totals: Vec<f64> = self
            .companies
            .iter()
            .filter(|c| c.sector == sector)
            .map(|c| c.esg.total)
            .collect();
        if totals.is_empty() {
            return None;
        }
        Some(totals.iter().sum::<f64>() / totals.len() as f64)
    }
}

/// Anything that can produce a [`Universe`].
///
/// Implementations are interchangeable; which one runs is a configuration choice.
pub trait UniverseSource {
    /// Produces a roster and its aggregates.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying data cannot be read or parsed.
    fn load(&mut self) -> Result<Universe, EsgError>;
}

/// Builds the source selected by `config` and loads it.
///
/// Load failures never reach the caller: they are logged (with the `tracing` feature) and
/// replaced by [`Universe::empty`].
#[cfg_attr(feature = "tracing", tracing::instrument(skip(config)))]
#[must_use]
pub fn load_universe(config: &DashboardConfig) -> Universe {
    let loaded = match &config.source {
        SourceConfig::Synthetic { seed } => {
            let source = match seed {
                Some(s) => SyntheticSource::seeded(*s),
                None => SyntheticSource::new(),
            };
            source.metrics_strategy(config.metrics).load()
        }
        SourceConfig::Dataset { path } => DatasetSource::from_path(path)
            .label_policy(config.label_policy)
            .metrics_strategy(config.metrics)
            .load(),
    };

    match loaded {
        Ok(universe) => universe,
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, "universe load failed, falling back to an empty roster");
            Universe::empty()
        }
    }
}
