use std::collections::BTreeMap;

use serde::Deserialize;

use crate::core::{EsgScore, PerformanceMetrics};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DatasetNode {
    #[serde(default)]
    pub(crate) companies: Vec<CompanyNode>,
    // Keyed by quartile label; keys are remapped strictly.
    pub(crate) quartile_metrics: Option<BTreeMap<String, MetricsNode>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CompanyNode {
    pub(crate) ticker: String,
    pub(crate) name: String,
    pub(crate) sector: String,
    pub(crate) esg: EsgScore,
    pub(crate) quartile: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) metrics: Option<MetricsNode>,
}

/// Same fields as [`PerformanceMetrics`], every one optional (missing means zero).
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct MetricsNode {
    pub(crate) annualized_return: f64,
    pub(crate) sharpe_ratio: f64,
    pub(crate) sortino_ratio: f64,
    pub(crate) volatility: f64,
    pub(crate) max_drawdown: f64,
    #[serde(rename = "var95")]
    pub(crate) var_95: f64,
    #[serde(rename = "var99")]
    pub(crate) var_99: f64,
    pub(crate) tail_risk: f64,
    pub(crate) survival_probability: f64,
    pub(crate) recovery_days: f64,
}

impl From<MetricsNode> for PerformanceMetrics {
    fn from(n: MetricsNode) -> Self {
        PerformanceMetrics {
            annualized_return: n.annualized_return,
            sharpe_ratio: n.sharpe_ratio,
            sortino_ratio: n.sortino_ratio,
            volatility: n.volatility,
            max_drawdown: n.max_drawdown,
            var_95: n.var_95,
            var_99: n.var_99,
            tail_risk: n.tail_risk,
            survival_probability: n.survival_probability,
            recovery_days: n.recovery_days,
        }
    }
}
