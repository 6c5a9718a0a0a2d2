//! Company-level metrics derived from a daily close-price series.

use crate::core::PerformanceMetrics;

/// Trading days per year used for annualisation.
pub const TRADING_DAYS: f64 = 252.0;
/// Annual risk-free rate used by the Sharpe and Sortino ratios.
pub const RISK_FREE_RATE: f64 = 0.02;
/// Minimum number of daily returns required before metrics are produced.
pub const MIN_RETURNS: usize = 30;

const EPSILON: f64 = 1e-6;

/// Computes [`PerformanceMetrics`] from daily closes, oldest first.
///
/// Non-finite prices are skipped. Returns `None` when fewer than [`MIN_RETURNS`]
/// daily returns can be formed.
///
/// Survival probability and recovery days are proxies: `0.95 + 0.02 * sharpe` and
/// `trunc(|max_drawdown| * 200)`.
#[must_use]
pub fn from_prices(closes: &[f64]) -> Option<PerformanceMetrics> {
    let returns = daily_returns(closes);
    if returns.len() < MIN_RETURNS {
        return None;
    }

    let annualized_return = mean(&returns) * TRADING_DAYS;
    let volatility = sample_std(&returns) * TRADING_DAYS.sqrt();
    let sharpe_ratio = (annualized_return - RISK_FREE_RATE) / (volatility + EPSILON);

    let negatives: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
    let downside_dev = sample_std(&negatives) * TRADING_DAYS.sqrt();
    let sortino_ratio = (annualized_return - RISK_FREE_RATE) / (downside_dev + EPSILON);

    let max_drawdown = max_drawdown(&returns);
    let var_95 = percentile(&returns, 5.0);
    let var_99 = percentile(&returns, 1.0);

    Some(PerformanceMetrics {
        annualized_return,
        sharpe_ratio,
        sortino_ratio,
        volatility,
        max_drawdown,
        var_95,
        var_99,
        tail_risk: var_99.abs() * 100.0,
        survival_probability: 0.95 + sharpe_ratio * 0.02,
        recovery_days: (max_drawdown.abs() * 100.0 * 2.0).trunc(),
    })
}

/// Simple returns between consecutive finite, non-zero prices.
#[must_use]
pub fn daily_returns(closes: &[f64]) -> Vec<f64> {
    let finite: Vec<f64> = closes.iter().copied().filter(|p| p.is_finite()).collect();
    finite
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| w[1] / w[0] - 1.0)
        .collect()
}

/// Largest peak-to-trough decline of the compounded return path, as a value `<= 0`.
#[must_use]
pub fn max_drawdown(returns: &[f64]) -> f64 {
    let mut wealth = 1.0;
    let mut peak = f64::MIN;
    let mut worst = 0.0_f64;
    for r in returns {
        wealth *= 1.0 + r;
        peak = peak.max(wealth);
        worst = worst.min((wealth - peak) / peak);
    }
    worst
}

/// Percentile with linear interpolation between closest ranks (`p` in 0..=100).
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

// ddof = 1; fewer than two samples have no spread.
#[allow(clippy::cast_precision_loss)]
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}
