//! Session configuration: which universe source to use, how to aggregate it, and how to
//! reach the narrative service.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::core::EsgError;
use crate::metrics::MetricsStrategy;
use crate::narrative::{Credential, DEFAULT_KEY_VAR, NarrativeClient};
use crate::quartile::LabelPolicy;

/// Selects the [`UniverseSource`](crate::roster::UniverseSource) implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// Randomly generated roster; `seed` makes it reproducible.
    Synthetic { seed: Option<u64> },
    /// Pre-processed dataset document at `path`.
    Dataset { path: PathBuf },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Synthetic { seed: None }
    }
}

/// Everything a dashboard session is configured with.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub source: SourceConfig,
    pub metrics: MetricsStrategy,
    pub label_policy: LabelPolicy,
    pub ai_model: Option<String>,
    pub ai_base_url: Option<Url>,
    pub ai_credential: Credential,
    pub ai_timeout: Option<Duration>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            metrics: MetricsStrategy::Auto,
            label_policy: LabelPolicy::CoerceToLowest,
            ai_model: None,
            ai_base_url: None,
            ai_credential: Credential::Env(DEFAULT_KEY_VAR.to_string()),
            ai_timeout: None,
        }
    }
}

impl DashboardConfig {
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::default()
    }

    /// Reads the configuration from the process environment.
    ///
    /// | variable               | effect                                              |
    /// |------------------------|-----------------------------------------------------|
    /// | `ESG_DATASET`          | path of a dataset document; selects that source     |
    /// | `ESG_SEED`             | `u64` seed for the synthetic source                 |
    /// | `ESG_STRICT_QUARTILES` | `1` rejects unknown quartile labels                 |
    /// | `ESG_METRICS`          | `auto`, `baseline` or `company-average`             |
    /// | `ESG_AI_MODEL`         | narrative model name                                |
    /// | `ESG_AI_BASE_URL`      | narrative API base URL                              |
    /// | `ESG_AI_KEY_VAR`       | name of the API key variable (default `API_KEY`)    |
    ///
    /// # Errors
    ///
    /// Returns [`EsgError::InvalidParams`] or [`EsgError::Url`] for unparsable values.
    pub fn from_env() -> Result<Self, EsgError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EsgError> {
        let mut b = DashboardConfig::builder();

        if let Some(path) = lookup("ESG_DATASET").filter(|p| !p.trim().is_empty()) {
            b = b.dataset(path);
        } else if let Some(seed) = lookup("ESG_SEED") {
            let seed = seed
                .trim()
                .parse::<u64>()
                .map_err(|e| EsgError::InvalidParams(format!("ESG_SEED: {e}")))?;
            b = b.synthetic(Some(seed));
        }
        if lookup("ESG_STRICT_QUARTILES").as_deref() == Some("1") {
            b = b.label_policy(LabelPolicy::Reject);
        }
        if let Some(strategy) = lookup("ESG_METRICS") {
            b = b.metrics(strategy.parse()?);
        }
        if let Some(model) = lookup("ESG_AI_MODEL") {
            b = b.ai_model(model);
        }
        if let Some(url) = lookup("ESG_AI_BASE_URL") {
            b = b.ai_base_url(Url::parse(&url)?);
        }
        if let Some(var) = lookup("ESG_AI_KEY_VAR") {
            b = b.ai_credential(Credential::Env(var));
        }
        Ok(b.build())
    }

    /// Builds the narrative client described by this configuration.
    ///
    /// # Errors
    ///
    /// See [`NarrativeClientBuilder::build`](crate::narrative::NarrativeClientBuilder::build).
    pub fn narrative_client(&self) -> Result<NarrativeClient, EsgError> {
        let mut b = NarrativeClient::builder().credential(self.ai_credential.clone());
        if let Some(model) = &self.ai_model {
            b = b.model(model.clone());
        }
        if let Some(url) = &self.ai_base_url {
            b = b.base_url(url.clone());
        }
        if let Some(t) = self.ai_timeout {
            b = b.timeout(t);
        }
        b.build()
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct DashboardConfigBuilder {
    inner: DashboardConfig,
}

impl DashboardConfigBuilder {
    /// Use a generated roster.
    #[must_use]
    pub fn synthetic(mut self, seed: Option<u64>) -> Self {
        self.inner.source = SourceConfig::Synthetic { seed };
        self
    }

    /// Use the dataset document at `path`.
    #[must_use]
    pub fn dataset(mut self, path: impl Into<PathBuf>) -> Self {
        self.inner.source = SourceConfig::Dataset { path: path.into() };
        self
    }

    #[must_use]
    pub const fn metrics(mut self, strategy: MetricsStrategy) -> Self {
        self.inner.metrics = strategy;
        self
    }

    #[must_use]
    pub const fn label_policy(mut self, policy: LabelPolicy) -> Self {
        self.inner.label_policy = policy;
        self
    }

    #[must_use]
    pub fn ai_model(mut self, model: impl Into<String>) -> Self {
        self.inner.ai_model = Some(model.into());
        self
    }

    #[must_use]
    pub fn ai_base_url(mut self, url: Url) -> Self {
        self.inner.ai_base_url = Some(url);
        self
    }

    #[must_use]
    pub fn ai_credential(mut self, credential: Credential) -> Self {
        self.inner.ai_credential = credential;
        self
    }

    #[must_use]
    pub const fn ai_timeout(mut self, dur: Duration) -> Self {
        self.inner.ai_timeout = Some(dur);
        self
    }

    #[must_use]
    pub fn build(self) -> DashboardConfig {
        self.inner
    }
}
