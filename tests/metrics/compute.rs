use esg_insights::TimeSeriesBuilder;
use esg_insights::metrics::compute::{self, MIN_RETURNS};

use crate::common::rng;

fn walk(len: usize, seed: u64) -> Vec<f64> {
    TimeSeriesBuilder::new()
        .len(len)
        .generate(&mut rng(seed))
        .into_iter()
        .map(|d| d.value)
        .collect()
}

#[test]
fn too_little_history_yields_none() {
    // n prices give n - 1 returns.
    assert!(compute::from_prices(&walk(MIN_RETURNS, 1)).is_none());
    assert!(compute::from_prices(&walk(MIN_RETURNS + 1, 1)).is_some());
    assert!(compute::from_prices(&[]).is_none());
}

#[test]
fn missing_prices_are_skipped() {
    let mut prices = walk(40, 2);
    prices[5] = f64::NAN;
    prices[6] = f64::NAN;
    let returns = compute::daily_returns(&prices);
    assert_eq!(returns.len(), 37);
    assert!(returns.iter().all(|r| r.is_finite()));
}

#[test]
fn daily_returns_are_simple_returns() {
    let r = compute::daily_returns(&[100.0, 110.0, f64::NAN, 99.0]);
    assert_eq!(r.len(), 2);
    assert!((r[0] - 0.1).abs() < 1e-12);
    assert!((r[1] + 0.1).abs() < 1e-12);
}

#[test]
fn constant_growth_has_no_drawdown() {
    let prices: Vec<f64> = (0..60).map(|i| 100.0 * 1.001_f64.powi(i)).collect();
    let m = compute::from_prices(&prices).unwrap();
    assert!((m.annualized_return - 0.252).abs() < 1e-9);
    assert_eq!(m.max_drawdown, 0.0);
    assert_eq!(m.recovery_days, 0.0);
    assert!((m.var_95 - 0.001).abs() < 1e-9);
    assert!(m.volatility < 1e-9);
}

#[test]
fn derived_fields_follow_their_proxies() {
    for seed in 0..5 {
        let m = compute::from_prices(&walk(252, seed)).unwrap();
        assert!((m.tail_risk - m.var_99.abs() * 100.0).abs() < 1e-12);
        assert!((m.survival_probability - (0.95 + 0.02 * m.sharpe_ratio)).abs() < 1e-12);
        assert_eq!(m.recovery_days, (m.max_drawdown.abs() * 200.0).trunc());
        assert!(m.max_drawdown <= 0.0);
        assert!(m.var_99 <= m.var_95);
        assert!(m.volatility > 0.0);
    }
}

#[test]
fn max_drawdown_tracks_running_peak() {
    let dd = compute::max_drawdown(&[0.1, -0.5, 0.2]);
    assert!((dd + 0.5).abs() < 1e-12);
    assert_eq!(compute::max_drawdown(&[]), 0.0);
}

#[test]
fn percentile_interpolates_linearly() {
    let v = [5.0, 1.0, 4.0, 2.0, 3.0];
    assert_eq!(compute::percentile(&v, 50.0), 3.0);
    assert!((compute::percentile(&v, 5.0) - 1.2).abs() < 1e-12);
    assert_eq!(compute::percentile(&v, 0.0), 1.0);
    assert_eq!(compute::percentile(&v, 100.0), 5.0);
    assert_eq!(compute::percentile(&[], 5.0), 0.0);
}
