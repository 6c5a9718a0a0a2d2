//! The external, pre-processed dataset document.
//!
//! ```json
//! {
//!   "companies": [
//!     { "ticker": "AAPL", "name": "AAPL Inc.", "sector": "Technology",
//!       "esg": { "total": 71.2, "environmental": 70.1, "social": 68.0, "governance": 75.5 },
//!       "quartile": "Q2", "metrics": { "annualizedReturn": 0.21, ... } }
//!   ],
//!   "quartileMetrics": { "Q1": { ... }, "Q2": { ... }, "Q3": { ... }, "Q4": { ... } }
//! }
//! ```

mod wire;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::{Company, EsgError, PerformanceMetrics, Quartile, Sector};
use crate::metrics::{self, MetricsStrategy, QuartileMetrics};
use crate::quartile::{LabelPolicy, classify};

use super::{Universe, UniverseSource};
use wire::{CompanyNode, DatasetNode};

/// A parsed dataset: resolved companies plus optional precomputed aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub companies: Vec<Company>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quartile_metrics: Option<QuartileMetrics>,
}

impl Dataset {
    /// Parses a dataset document.
    ///
    /// Company quartile strings are remapped under `policy`; a company without a quartile
    /// string is classified from its total score. In `quartileMetrics`, keys other than
    /// `Q1`..`Q4` are ignored and a missing key gets the all-zero record.
    ///
    /// # Errors
    ///
    /// Returns [`EsgError::Json`] for malformed JSON, [`EsgError::Data`] for an unknown sector,
    /// and [`EsgError::UnknownQuartile`] for an unknown label under [`LabelPolicy::Reject`].
    pub fn from_json_str(text: &str, policy: LabelPolicy) -> Result<Self, EsgError> {
        let node: DatasetNode = serde_json::from_str(text)?;
        Self::from_node(node, policy)
    }

    /// Reads and parses a dataset document from `reader`.
    ///
    /// # Errors
    ///
    /// See [`Dataset::from_json_str`]; I/O failures are [`EsgError::Io`].
    pub fn from_reader<R: Read>(mut reader: R, policy: LabelPolicy) -> Result<Self, EsgError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_json_str(&text, policy)
    }

    /// Reads and parses the dataset file at `path`.
    ///
    /// # Errors
    ///
    /// See [`Dataset::from_reader`].
    pub fn from_path(path: impl AsRef<Path>, policy: LabelPolicy) -> Result<Self, EsgError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text, policy)
    }

    /// Serialises the dataset in the document format above.
    ///
    /// # Errors
    ///
    /// Returns [`EsgError::Json`] if serialisation fails.
    pub fn to_json_pretty(&self) -> Result<String, EsgError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the dataset to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`EsgError::Io`] or [`EsgError::Json`].
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), EsgError> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    fn from_node(node: DatasetNode, policy: LabelPolicy) -> Result<Self, EsgError> {
        let companies = node
            .companies
            .into_iter()
            .map(|c| company_from_node(c, policy))
            .collect::<Result<Vec<_>, _>>()?;

        let quartile_metrics = node.quartile_metrics.map(|mut map| {
            QuartileMetrics::from_fn(|q| {
                map.remove(q.as_str())
                    .map(PerformanceMetrics::from)
                    .unwrap_or_default()
            })
        });

        Ok(Self {
            companies,
            quartile_metrics,
        })
    }
}

fn company_from_node(node: CompanyNode, policy: LabelPolicy) -> Result<Company, EsgError> {
    let sector = Sector::from_name(&node.sector).ok_or_else(|| {
        EsgError::Data(format!("unknown sector {:?} for {}", node.sector, node.ticker))
    })?;
    let quartile = match node.quartile.as_deref() {
        Some(label) => Quartile::from_label(label, policy)?,
        None => classify(node.esg.total),
    };

    Ok(Company {
        ticker: node.ticker,
        name: node.name,
        sector,
        esg: node.esg,
        quartile,
        description: node.description,
        metrics: node.metrics.map(PerformanceMetrics::from),
    })
}

#[derive(Debug, Clone)]
enum DatasetInput {
    Path(PathBuf),
    Json(String),
    Parsed(Dataset),
}

/// A [`UniverseSource`] backed by an external dataset document.
#[derive(Debug, Clone)]
pub struct DatasetSource {
    input: DatasetInput,
    policy: LabelPolicy,
    strategy: MetricsStrategy,
}

impl DatasetSource {
    fn with_input(input: DatasetInput) -> Self {
        Self {
            input,
            policy: LabelPolicy::default(),
            strategy: MetricsStrategy::Auto,
        }
    }

    /// Reads the document from `path` when loaded.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::with_input(DatasetInput::Path(path.into()))
    }

    /// Parses `json` when loaded.
    pub fn from_json(json: impl Into<String>) -> Self {
        Self::with_input(DatasetInput::Json(json.into()))
    }

    /// Uses an already parsed dataset.
    #[must_use]
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self::with_input(DatasetInput::Parsed(dataset))
    }

    /// Sets how unrecognized quartile labels are handled. (Default: coerce to Q4)
    #[must_use]
    pub const fn label_policy(mut self, policy: LabelPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets how quartile aggregates are produced. (Default: [`MetricsStrategy::Auto`])
    #[must_use]
    pub const fn metrics_strategy(mut self, strategy: MetricsStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

impl UniverseSource for DatasetSource {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    fn load(&mut self) -> Result<Universe, EsgError> {
        let dataset = match &self.input {
            DatasetInput::Path(path) => Dataset::from_path(path, self.policy)?,
            DatasetInput::Json(json) => Dataset::from_json_str(json, self.policy)?,
            DatasetInput::Parsed(ds) => ds.clone(),
        };

        let metrics = metrics::aggregate(
            self.strategy,
            &dataset.companies,
            dataset.quartile_metrics.as_ref(),
        );
        Ok(Universe {
            companies: dataset.companies,
            metrics,
        })
    }
}
