//! Tab routing and the view models each dashboard tab renders.
//!
//! A [`Dashboard`] owns one [`Universe`] for the whole session. Views are pure functions of
//! that universe plus a caller-supplied random source for the illustrative series; the
//! narrative request is started separately with [`Dashboard::spawn_insight`] and never
//! blocks a view.

pub mod views;

use std::sync::Arc;

use rand::Rng;
use serde::Serialize;

use crate::config::{DashboardConfig, SourceConfig};
use crate::core::EsgError;
use crate::narrative::{self, Insight, NarrativeService, NO_CREDENTIAL_MESSAGE};
use crate::roster::{self, Universe};

pub use views::{
    CompanyView, DataEngineeringView, DownsideView, OverviewView, PillarsView, ReturnsView,
    RiskView, SettingsView, SurvivalView,
};

/// The navigable tabs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tab {
    Overview,
    Returns,
    Risk,
    Downside,
    Survival,
    Pillars,
    DataEngineering,
    /// Drill-down for the company with this ticker.
    Company(String),
    Settings,
}

impl Tab {
    /// Tabs listed in the navigation, in display order.
    pub const NAVIGATION: [Tab; 8] = [
        Tab::Overview,
        Tab::Returns,
        Tab::Risk,
        Tab::Downside,
        Tab::Survival,
        Tab::Pillars,
        Tab::DataEngineering,
        Tab::Settings,
    ];

    /// Resolves a tab id. Unknown ids, and `company` without a ticker, resolve to
    /// [`Tab::Overview`].
    #[must_use]
    pub fn from_id(id: &str, ticker: Option<&str>) -> Tab {
        match id {
            "overview" => Tab::Overview,
            "returns" => Tab::Returns,
            "risk" => Tab::Risk,
            "downside" => Tab::Downside,
            "survival" => Tab::Survival,
            "pillars" => Tab::Pillars,
            "data-eng" => Tab::DataEngineering,
            "settings" => Tab::Settings,
            "company" => match ticker.map(str::trim).filter(|t| !t.is_empty()) {
                Some(t) => Tab::Company(t.to_string()),
                None => Tab::Overview,
            },
            _ => Tab::Overview,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Returns => "returns",
            Tab::Risk => "risk",
            Tab::Downside => "downside",
            Tab::Survival => "survival",
            Tab::Pillars => "pillars",
            Tab::DataEngineering => "data-eng",
            Tab::Company(_) => "company",
            Tab::Settings => "settings",
        }
    }

    /// Navigation label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "Executive Summary",
            Tab::Returns => "FQ1: Raw Returns",
            Tab::Risk => "FQ2: Risk-Adjusted",
            Tab::Downside => "FQ3: Downside Risk",
            Tab::Survival => "FQ4: Survival",
            Tab::Pillars => "FQ5: Pillar Analysis",
            Tab::DataEngineering => "Data Engineering",
            Tab::Company(_) => "Company Deep Dive",
            Tab::Settings => "Settings",
        }
    }
}

/// A rendered tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tab", content = "data", rename_all = "kebab-case")]
pub enum View {
    Overview(OverviewView),
    Returns(ReturnsView),
    Risk(RiskView),
    Downside(DownsideView),
    Survival(SurvivalView),
    Pillars(PillarsView),
    #[serde(rename = "data-eng")]
    DataEngineering(DataEngineeringView),
    Company(Box<CompanyView>),
    Settings(SettingsView),
}

impl View {
    /// The tab that was actually rendered (after fallbacks).
    #[must_use]
    pub fn tab_id(&self) -> &'static str {
        match self {
            View::Overview(_) => "overview",
            View::Returns(_) => "returns",
            View::Risk(_) => "risk",
            View::Downside(_) => "downside",
            View::Survival(_) => "survival",
            View::Pillars(_) => "pillars",
            View::DataEngineering(_) => "data-eng",
            View::Company(_) => "company",
            View::Settings(_) => "settings",
        }
    }
}

/// One dashboard session.
pub struct Dashboard {
    universe: Universe,
    config: DashboardConfig,
    narrator: Option<Arc<dyn NarrativeService>>,
}

impl Dashboard {
    /// A session over `universe` with default configuration and no narrative service.
    #[must_use]
    pub fn new(universe: Universe) -> Self {
        Self {
            universe,
            config: DashboardConfig::default(),
            narrator: None,
        }
    }

    /// Loads the configured universe and builds the narrative client.
    ///
    /// Universe load failures fall back to an empty roster and do not surface here. The
    /// credential is not resolved until the first narrative request.
    ///
    /// # Errors
    ///
    /// Returns an error only if the narrative HTTP client cannot be constructed.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(config), err))]
    pub fn from_config(config: DashboardConfig) -> Result<Self, EsgError> {
        let universe = roster::load_universe(&config);
        let client = config.narrative_client()?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            companies = universe.len(),
            credential = client.credential_available(),
            model = client.model(),
            "dashboard session ready"
        );

        Ok(Self {
            universe,
            config,
            narrator: Some(Arc::new(client)),
        })
    }

    /// Replaces the narrative service.
    #[must_use]
    pub fn with_narrator(mut self, narrator: Arc<dyn NarrativeService>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    /// Whether the narrative service is set and reports a usable credential.
    #[must_use]
    pub fn narrative_enabled(&self) -> bool {
        self.narrator.as_ref().is_some_and(|n| n.is_configured())
    }

    /// Replaces the configuration reported by the settings view.
    #[must_use]
    pub fn with_config(mut self, config: DashboardConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn universe(&self) -> &Universe {
        &self.universe
    }

    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Renders `tab`. A company tab whose ticker is not in the roster renders the overview.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, tab, rng), fields(tab = tab.id())))]
    pub fn view<R: Rng + ?Sized>(&self, tab: &Tab, rng: &mut R) -> View {
        match tab {
            Tab::Overview => View::Overview(self.overview("")),
            Tab::Returns => View::Returns(views::returns(&self.universe.metrics, rng)),
            Tab::Risk => View::Risk(views::risk(&self.universe, rng)),
            Tab::Downside => View::Downside(views::downside(&self.universe.metrics)),
            Tab::Survival => View::Survival(views::survival(&self.universe.metrics)),
            Tab::Pillars => View::Pillars(views::pillars(&self.universe)),
            Tab::DataEngineering => View::DataEngineering(views::data_engineering(rng)),
            Tab::Settings => View::Settings(self.settings()),
            Tab::Company(ticker) => match self.universe.company(ticker) {
                Some(c) => View::Company(Box::new(views::company(&self.universe, c, rng))),
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(ticker = %ticker, "company not in roster, showing overview");
                    View::Overview(self.overview(""))
                }
            },
        }
    }

    /// The overview with its company list filtered by `search`.
    #[must_use]
    pub fn overview(&self, search: &str) -> OverviewView {
        views::overview(&self.universe, search)
    }

    #[must_use]
    pub fn settings(&self) -> SettingsView {
        let data_source = match &self.config.source {
            SourceConfig::Synthetic { seed: Some(s) } => format!("synthetic (seed {s})"),
            SourceConfig::Synthetic { seed: None } => "synthetic".to_string(),
            SourceConfig::Dataset { path } => format!("dataset ({})", path.display()),
        };
        SettingsView {
            data_source,
            metrics_strategy: self.config.metrics.as_str().to_string(),
            label_policy: self.config.label_policy.as_str().to_string(),
            narrative_model: self
                .config
                .ai_model
                .clone()
                .unwrap_or_else(|| narrative::DEFAULT_MODEL.to_string()),
            narrative_enabled: self.narrative_enabled(),
            var_confidence_levels: [95, 99, 90],
        }
    }

    /// Starts the overview narrative in the background.
    ///
    /// Without a narrative service the insight is immediately ready with the no-credential
    /// advisory. Must be called from within a tokio runtime when a service is set.
    #[must_use]
    pub fn spawn_insight(&self) -> Insight {
        match &self.narrator {
            Some(service) => Insight::spawn(
                Arc::clone(service),
                narrative::summary_context(&self.universe.metrics),
            ),
            None => Insight::ready(NO_CREDENTIAL_MESSAGE),
        }
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("companies", &self.universe.len())
            .field("config", &self.config)
            .field("narrative", &self.narrator.is_some())
            .finish_non_exhaustive()
    }
}
