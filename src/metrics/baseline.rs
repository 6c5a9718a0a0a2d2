use crate::core::PerformanceMetrics;

use super::QuartileMetrics;

/// The illustrative per-quartile table used when no aggregates are supplied.
///
/// Values are constants, not derived from any roster. They are ordered so that Q1
/// dominates Q4 on return and risk-adjusted measures, and is dominated on volatility,
/// drawdown depth, VaR depth, tail events and recovery time.
#[must_use]
pub fn baseline() -> QuartileMetrics {
    QuartileMetrics::new(
        PerformanceMetrics {
            annualized_return: 0.125,
            sharpe_ratio: 1.15,
            sortino_ratio: 1.45,
            volatility: 0.14,
            max_drawdown: -0.18,
            var_95: -0.015,
            var_99: -0.025,
            tail_risk: 12.0,
            survival_probability: 0.98,
            recovery_days: 45.0,
        },
        PerformanceMetrics {
            annualized_return: 0.108,
            sharpe_ratio: 0.95,
            sortino_ratio: 1.25,
            volatility: 0.16,
            max_drawdown: -0.22,
            var_95: -0.018,
            var_99: -0.028,
            tail_risk: 18.0,
            survival_probability: 0.96,
            recovery_days: 58.0,
        },
        PerformanceMetrics {
            annualized_return: 0.085,
            sharpe_ratio: 0.72,
            sortino_ratio: 0.95,
            volatility: 0.19,
            max_drawdown: -0.28,
            var_95: -0.022,
            var_99: -0.035,
            tail_risk: 25.0,
            survival_probability: 0.94,
            recovery_days: 72.0,
        },
        PerformanceMetrics {
            annualized_return: 0.062,
            sharpe_ratio: 0.55,
            sortino_ratio: 0.68,
            volatility: 0.23,
            max_drawdown: -0.35,
            var_95: -0.028,
            var_99: -0.045,
            tail_risk: 38.0,
            survival_probability: 0.89,
            recovery_days: 95.0,
        },
    )
}
