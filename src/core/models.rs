use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/* ----- QUARTILES (shared by quartile/, metrics/, roster/, dashboard/) ----- */

/// An ordinal ESG-score band. `Q1` holds the highest-scoring companies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quartile {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quartile {
    /// All four quartiles, best band first.
    pub const ALL: [Quartile; 4] = [Quartile::Q1, Quartile::Q2, Quartile::Q3, Quartile::Q4];

    /// The lowest band, used as the fallback for unrecognized labels.
    pub const LOWEST: Quartile = Quartile::Q4;

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Quartile::Q1 => "Q1",
            Quartile::Q2 => "Q2",
            Quartile::Q3 => "Q3",
            Quartile::Q4 => "Q4",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Quartile::Q1 => 0,
            Quartile::Q2 => 1,
            Quartile::Q3 => 2,
            Quartile::Q4 => 3,
        }
    }
}

impl fmt::Display for Quartile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/* ----- SECTORS ----- */

/// The fixed sector enumeration used across the company universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sector {
    Technology,
    Financials,
    Healthcare,
    Energy,
    #[serde(rename = "Consumer Discretionary")]
    ConsumerDiscretionary,
    Industrials,
    Utilities,
    #[serde(rename = "Real Estate")]
    RealEstate,
}

impl Sector {
    /// All sectors in their canonical order. Index positions are used for hash-based assignment.
    pub const ALL: [Sector; 8] = [
        Sector::Technology,
        Sector::Financials,
        Sector::Healthcare,
        Sector::Energy,
        Sector::ConsumerDiscretionary,
        Sector::Industrials,
        Sector::Utilities,
        Sector::RealEstate,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Sector::Technology => "Technology",
            Sector::Financials => "Financials",
            Sector::Healthcare => "Healthcare",
            Sector::Energy => "Energy",
            Sector::ConsumerDiscretionary => "Consumer Discretionary",
            Sector::Industrials => "Industrials",
            Sector::Utilities => "Utilities",
            Sector::RealEstate => "Real Estate",
        }
    }

    /// Parses a display name such as `"Real Estate"`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Sector> {
        Sector::ALL.into_iter().find(|s| s.as_str() == name.trim())
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/* ----- COMPANIES ----- */

/// A composite ESG rating and its three pillar sub-scores, each nominally 0 to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EsgScore {
    pub total: f64,
    pub environmental: f64,
    pub social: f64,
    pub governance: f64,
}

/// A single member of the company universe.
///
/// Companies are created once when a universe is generated or loaded and are
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub ticker: String,
    pub name: String,
    pub sector: Sector,
    pub esg: EsgScore,
    /// Derived from `esg.total` for generated companies, remapped from the dataset otherwise.
    pub quartile: Quartile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<PerformanceMetrics>,
}

/* ----- METRICS ----- */

/// Performance and risk statistics for a quartile aggregate or a single company.
///
/// The `Default` value is the all-zero record used for empty quartiles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub annualized_return: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub volatility: f64,
    /// Largest peak-to-trough decline, as a negative fraction.
    pub max_drawdown: f64,
    #[serde(rename = "var95")]
    pub var_95: f64,
    #[serde(rename = "var99")]
    pub var_99: f64,
    /// Count (or intensity) of extreme down days.
    pub tail_risk: f64,
    pub survival_probability: f64,
    pub recovery_days: f64,
}

/* ----- SERIES ----- */

/// One point of a synthetic index series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyReturn {
    pub date: NaiveDate,
    #[serde(rename = "return")]
    pub value: f64,
}
