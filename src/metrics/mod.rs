//! Per-quartile performance aggregates.

mod baseline;
pub mod compute;

pub use baseline::baseline;

use std::ops::Index;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::core::{Company, EsgError, PerformanceMetrics, Quartile};

/// A total mapping from every [`Quartile`] to its [`PerformanceMetrics`].
///
/// Backed by a fixed array, so a map missing one of the four keys cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuartileMetrics {
    by_quartile: [PerformanceMetrics; 4],
}

impl QuartileMetrics {
    /// Builds the map from one record per quartile, in `Q1..Q4` order.
    #[must_use]
    pub const fn new(q1: PerformanceMetrics, q2: PerformanceMetrics, q3: PerformanceMetrics, q4: PerformanceMetrics) -> Self {
        Self {
            by_quartile: [q1, q2, q3, q4],
        }
    }

    /// Builds the map by calling `f` once for each quartile.
    pub fn from_fn(mut f: impl FnMut(Quartile) -> PerformanceMetrics) -> Self {
        Self {
            by_quartile: Quartile::ALL.map(&mut f),
        }
    }

    /// The all-zero map used for an empty universe.
    #[must_use]
    pub fn zeroed() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn get(&self, q: Quartile) -> &PerformanceMetrics {
        &self.by_quartile[q.index()]
    }

    /// Iterates `(quartile, metrics)` pairs from Q1 to Q4.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Quartile, &PerformanceMetrics)> + '_ {
        Quartile::ALL.into_iter().zip(self.by_quartile.iter())
    }
}

impl Index<Quartile> for QuartileMetrics {
    type Output = PerformanceMetrics;

    fn index(&self, q: Quartile) -> &Self::Output {
        self.get(q)
    }
}

impl Serialize for QuartileMetrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        for (q, m) in self.iter() {
            map.serialize_entry(q.as_str(), m)?;
        }
        map.end()
    }
}

/// How quartile aggregates are produced for a universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricsStrategy {
    /// Use precomputed aggregates when the source supplies them, otherwise the baseline table.
    #[default]
    Auto,
    /// Always use the illustrative baseline table.
    Baseline,
    /// Average the metrics embedded in each company, per quartile.
    CompanyAverage,
}

impl MetricsStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MetricsStrategy::Auto => "auto",
            MetricsStrategy::Baseline => "baseline",
            MetricsStrategy::CompanyAverage => "company-average",
        }
    }
}

impl FromStr for MetricsStrategy {
    type Err = EsgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(MetricsStrategy::Auto),
            "baseline" => Ok(MetricsStrategy::Baseline),
            "company-average" | "company_average" | "average" => Ok(MetricsStrategy::CompanyAverage),
            other => Err(EsgError::InvalidParams(format!("unknown metrics strategy: {other}"))),
        }
    }
}

/// Produces the quartile aggregates for `companies`.
///
/// The result always holds all four quartiles, also for an empty roster. Under
/// [`MetricsStrategy::Auto`] the baseline values are illustrative and do not depend on
/// `companies`.
#[must_use]
pub fn aggregate(
    strategy: MetricsStrategy,
    companies: &[Company],
    precomputed: Option<&QuartileMetrics>,
) -> QuartileMetrics {
    match (strategy, precomputed) {
        (MetricsStrategy::Auto, Some(pre)) => *pre,
        (MetricsStrategy::Auto | MetricsStrategy::Baseline, _) => baseline(),
        (MetricsStrategy::CompanyAverage, _) => average_by_quartile(companies),
    }
}

/// Mean of every metric field over the companies of each quartile that carry metrics.
///
/// A quartile without any contributing company gets the all-zero record.
#[must_use]
pub fn average_by_quartile(companies: &[Company]) -> QuartileMetrics {
    QuartileMetrics::from_fn(|q| {
        let members: Vec<&PerformanceMetrics> = companies
            .iter()
            .filter(|c| c.quartile == q)
            .filter_map(|c| c.metrics.as_ref())
            .collect();
        mean_metrics(&members)
    })
}

#[allow(clippy::cast_precision_loss)]
fn mean_metrics(members: &[&PerformanceMetrics]) -> PerformanceMetrics {
    if members.is_empty() {
        return PerformanceMetrics::default();
    }
    let n = members.len() as f64;
    let avg = |field: fn(&PerformanceMetrics) -> f64| members.iter().map(|m| field(*m)).sum::<f64>() / n;

    PerformanceMetrics {
        annualized_return: avg(|m| m.annualized_return),
        sharpe_ratio: avg(|m| m.sharpe_ratio),
        sortino_ratio: avg(|m| m.sortino_ratio),
        volatility: avg(|m| m.volatility),
        max_drawdown: avg(|m| m.max_drawdown),
        var_95: avg(|m| m.var_95),
        var_99: avg(|m| m.var_99),
        tail_risk: avg(|m| m.tail_risk),
        survival_probability: avg(|m| m.survival_probability),
        recovery_days: avg(|m| m.recovery_days),
    }
}
