//! esg-insights-rs: quartile-level ESG versus financial-performance analytics.
//!
//! A company roster (generated or loaded from a pre-processed dataset) is banded into
//! ESG quartiles, per-quartile performance aggregates are attached, and the dashboard
//! module shapes everything into serialisable view models. An optional narrative
//! client asks a generative model for a short executive summary.
//!
//! ```no_run
//! use esg_insights::{Dashboard, DashboardConfig, Tab};
//! use rand::SeedableRng;
//!
//! # fn main() -> Result<(), esg_insights::EsgError> {
//! let config = DashboardConfig::builder().synthetic(Some(7)).build();
//! let dashboard = Dashboard::from_config(config)?;
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let view = dashboard.view(&Tab::Returns, &mut rng);
//! println!("{}", serde_json::to_string_pretty(&view)?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod dashboard;
pub mod ingest;
pub mod metrics;
pub mod narrative;
pub mod quartile;
pub mod roster;
pub mod series;

pub use config::{DashboardConfig, DashboardConfigBuilder, SourceConfig};
pub use crate::core::{Company, DailyReturn, EsgError, EsgScore, PerformanceMetrics, Quartile, Sector};
pub use dashboard::{Dashboard, Tab, View};
pub use metrics::{MetricsStrategy, QuartileMetrics};
pub use narrative::{Insight, NarrativeClient, NarrativeService};
pub use quartile::{LabelPolicy, classify};
pub use roster::{Dataset, DatasetSource, SyntheticSource, Universe, UniverseSource, load_universe};
pub use series::{TimeSeriesBuilder, generate_time_series};

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Does nothing if a global subscriber is already set.
#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
