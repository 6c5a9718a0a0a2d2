use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{Company, EsgError, EsgScore, Sector};
use crate::metrics::{self, MetricsStrategy};
use crate::quartile::classify;

use super::{Universe, UniverseSource};

/// The fixed symbol list the synthetic roster is generated for.
pub const SYNTHETIC_TICKERS: [&str; 30] = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META", "BRK.B", "JPM", "UNH", "V", "JNJ", "XOM",
    "TSLA", "PG", "MA", "HD", "LLY", "CVX", "MRK", "ABBV", "PEP", "KO", "AVGO", "COST", "TMO",
    "PFE", "ORCL", "NKE", "BAC", "DHR",
];

/// A roster of randomly scored companies.
///
/// Totals are uniform in `[40, 95)`, pillar sub-scores independently uniform in `[30, 90)`,
/// and the sector is drawn uniformly from [`Sector::ALL`]. The random source is injected, so a
/// seeded generator gives reproducible rosters.
#[derive(Debug, Clone)]
pub struct SyntheticSource<R = StdRng> {
    rng: R,
    tickers: Vec<String>,
    strategy: MetricsStrategy,
}

impl SyntheticSource<StdRng> {
    /// A source seeded from the operating system; rosters differ between runs.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// A reproducible source.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for SyntheticSource<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SyntheticSource<R> {
    /// Uses `rng` for every draw.
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            tickers: SYNTHETIC_TICKERS.iter().map(|t| (*t).to_string()).collect(),
            strategy: MetricsStrategy::Auto,
        }
    }

    /// Replaces the ticker list.
    #[must_use]
    pub fn tickers<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tickers = tickers.into_iter().map(Into::into).collect();
        self
    }

    /// Sets how quartile aggregates are produced. Synthetic companies carry no metrics, so
    /// [`MetricsStrategy::CompanyAverage`] yields all-zero records.
    #[must_use]
    pub const fn metrics_strategy(mut self, strategy: MetricsStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Draws one company per ticker, in ticker order.
    pub fn generate(&mut self) -> Vec<Company> {
        let tickers = self.tickers.clone();
        tickers.into_iter().map(|t| self.company(t)).collect()
    }

    fn company(&mut self, ticker: String) -> Company {
        let total = self.rng.random_range(40.0..95.0);
        let sector = Sector::ALL[self.rng.random_range(0..Sector::ALL.len())];
        let esg = EsgScore {
            total,
            environmental: self.rng.random_range(30.0..90.0),
            social: self.rng.random_range(30.0..90.0),
            governance: self.rng.random_range(30.0..90.0),
        };

        Company {
            name: format!("{ticker} Corp"),
            ticker,
            sector,
            esg,
            quartile: classify(total),
            description: None,
            metrics: None,
        }
    }
}

impl<R: Rng> UniverseSource for SyntheticSource<R> {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(tickers = self.tickers.len())))]
    fn load(&mut self) -> Result<Universe, EsgError> {
        let companies = self.generate();
        let metrics = metrics::aggregate(self.strategy, &companies, None);
        Ok(Universe { companies, metrics })
    }
}
