use esg_insights::metrics::{self, MetricsStrategy, QuartileMetrics, aggregate, average_by_quartile};
use esg_insights::{PerformanceMetrics, Quartile, Sector};

use crate::common::{company, with_return};

fn precomputed() -> QuartileMetrics {
    QuartileMetrics::from_fn(|q| PerformanceMetrics {
        annualized_return: match q {
            Quartile::Q1 => 0.3,
            Quartile::Q2 => 0.2,
            Quartile::Q3 => 0.1,
            Quartile::Q4 => 0.0,
        },
        ..PerformanceMetrics::default()
    })
}

#[test]
fn auto_prefers_precomputed_aggregates() {
    let pre = precomputed();
    let out = aggregate(MetricsStrategy::Auto, &[], Some(&pre));
    assert_eq!(out, pre);
}

#[test]
fn auto_without_precomputed_uses_baseline() {
    let companies = vec![company("AAA", 90.0, Sector::Energy)];
    assert_eq!(aggregate(MetricsStrategy::Auto, &companies, None), metrics::baseline());
    assert_eq!(aggregate(MetricsStrategy::Auto, &[], None), metrics::baseline());
}

#[test]
fn baseline_strategy_ignores_precomputed() {
    let pre = precomputed();
    assert_eq!(aggregate(MetricsStrategy::Baseline, &[], Some(&pre)), metrics::baseline());
}

#[test]
fn company_average_means_each_quartile() {
    let companies = vec![
        with_return(company("AAA", 90.0, Sector::Energy), 0.10),
        with_return(company("BBB", 85.0, Sector::Energy), 0.20),
        with_return(company("CCC", 70.0, Sector::Energy), 0.05),
        // No metrics: does not contribute.
        company("DDD", 72.0, Sector::Energy),
    ];

    let out = aggregate(MetricsStrategy::CompanyAverage, &companies, None);
    assert!((out[Quartile::Q1].annualized_return - 0.15).abs() < 1e-12);
    assert!((out[Quartile::Q2].annualized_return - 0.05).abs() < 1e-12);
    assert_eq!(out[Quartile::Q3], PerformanceMetrics::default());
    assert_eq!(out[Quartile::Q4], PerformanceMetrics::default());
}

#[test]
fn empty_roster_still_has_four_quartiles() {
    let out = average_by_quartile(&[]);
    assert_eq!(out.iter().count(), 4);
    assert_eq!(out, QuartileMetrics::zeroed());
}

#[test]
fn iter_runs_q1_to_q4_and_reverses() {
    let m = metrics::baseline();
    let order: Vec<Quartile> = m.iter().map(|(q, _)| q).collect();
    assert_eq!(order, Quartile::ALL.to_vec());
    let reversed: Vec<Quartile> = m.iter().rev().map(|(q, _)| q).collect();
    assert_eq!(reversed, vec![Quartile::Q4, Quartile::Q3, Quartile::Q2, Quartile::Q1]);
}

#[test]
fn strategy_parses_from_config_strings() {
    assert_eq!("auto".parse::<MetricsStrategy>().unwrap(), MetricsStrategy::Auto);
    assert_eq!(" Baseline ".parse::<MetricsStrategy>().unwrap(), MetricsStrategy::Baseline);
    assert_eq!(
        "company-average".parse::<MetricsStrategy>().unwrap(),
        MetricsStrategy::CompanyAverage
    );
    assert_eq!("average".parse::<MetricsStrategy>().unwrap(), MetricsStrategy::CompanyAverage);
    assert!("median".parse::<MetricsStrategy>().is_err());
    assert_eq!(MetricsStrategy::CompanyAverage.as_str(), "company-average");
}
