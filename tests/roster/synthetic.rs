use esg_insights::metrics::{self, MetricsStrategy, QuartileMetrics};
use esg_insights::roster::SYNTHETIC_TICKERS;
use esg_insights::{SyntheticSource, UniverseSource, classify};

use crate::common::rng;

#[test]
fn generates_one_company_per_ticker() {
    let companies = SyntheticSource::seeded(11).generate();
    assert_eq!(companies.len(), 30);
    let tickers: Vec<&str> = companies.iter().map(|c| c.ticker.as_str()).collect();
    assert_eq!(tickers, SYNTHETIC_TICKERS);
    assert_eq!(companies[0].name, "AAPL Corp");
}

#[test]
fn scores_stay_in_their_ranges_and_quartile_matches_total() {
    for seed in 0..20 {
        for c in SyntheticSource::seeded(seed).generate() {
            assert!((40.0..95.0).contains(&c.esg.total), "{}: {}", c.ticker, c.esg.total);
            for pillar in [c.esg.environmental, c.esg.social, c.esg.governance] {
                assert!((30.0..90.0).contains(&pillar));
            }
            assert_eq!(c.quartile, classify(c.esg.total));
            assert!(c.metrics.is_none());
        }
    }
}

#[test]
fn same_seed_same_roster() {
    let a = SyntheticSource::seeded(42).generate();
    let b = SyntheticSource::seeded(42).generate();
    assert_eq!(a, b);

    let c = SyntheticSource::seeded(43).generate();
    assert_ne!(a, c);
}

#[test]
fn injected_rng_and_custom_tickers() {
    let companies = SyntheticSource::with_rng(rng(5))
        .tickers(["ONE", "TWO"])
        .generate();
    assert_eq!(companies.len(), 2);
    assert_eq!(companies[1].ticker, "TWO");
    assert_eq!(companies[1].name, "TWO Corp");
}

#[test]
fn load_attaches_aggregates_per_strategy() {
    let u = SyntheticSource::seeded(3).load().unwrap();
    assert_eq!(u.len(), 30);
    assert_eq!(u.metrics, metrics::baseline());

    // Synthetic companies carry no metrics, so averaging yields zero records.
    let u = SyntheticSource::seeded(3)
        .metrics_strategy(MetricsStrategy::CompanyAverage)
        .load()
        .unwrap();
    assert_eq!(u.metrics, QuartileMetrics::zeroed());
}

#[test]
fn empty_ticker_list_gives_empty_roster_with_four_quartiles() {
    let u = SyntheticSource::seeded(1)
        .tickers(Vec::<String>::new())
        .load()
        .unwrap();
    assert!(u.is_empty());
    assert_eq!(u.metrics.iter().count(), 4);
}
