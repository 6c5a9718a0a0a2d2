use std::f64::consts::PI;

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::DailyReturn;

/// One date of the per-quartile cumulative chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuartileCurvePoint {
    pub date: NaiveDate,
    #[serde(rename = "Q1")]
    pub q1: f64,
    #[serde(rename = "Q2")]
    pub q2: f64,
    #[serde(rename = "Q3")]
    pub q3: f64,
    #[serde(rename = "Q4")]
    pub q4: f64,
}

/// Fans one walk out into four quartile curves.
///
/// Q3 follows the walk; Q1 and Q2 drift above it by 0.1 % and 0.05 % per step, Q4 below by 0.08 %.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn quartile_curves(base: &[DailyReturn]) -> Vec<QuartileCurvePoint> {
    base.iter()
        .enumerate()
        .map(|(i, d)| {
            let step = i as f64;
            QuartileCurvePoint {
                date: d.date,
                q1: d.value * (1.0 + step * 0.001),
                q2: d.value * (1.0 + step * 0.0005),
                q3: d.value,
                q4: d.value * (1.0 - step * 0.0008),
            }
        })
        .collect()
}

/// One step of the survival chart, in percent of companies still listed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurvivalPoint {
    pub month: u32,
    #[serde(rename = "Q1")]
    pub q1: f64,
    #[serde(rename = "Q2")]
    pub q2: f64,
    #[serde(rename = "Q3")]
    pub q3: f64,
    #[serde(rename = "Q4")]
    pub q4: f64,
}

const SURVIVAL_STEP_MONTHS: u32 = 5;
const SURVIVAL_DECAY: [f64; 4] = [0.2, 0.5, 1.2, 2.5];

/// Stepped survival curves sampled every five months, starting at 100 %.
#[must_use]
pub fn survival_curves(points: u32) -> Vec<SurvivalPoint> {
    (0..points)
        .map(|i| {
            let step = f64::from(i);
            let [d1, d2, d3, d4] = SURVIVAL_DECAY;
            SurvivalPoint {
                month: i * SURVIVAL_STEP_MONTHS,
                q1: 100.0 - step * d1,
                q2: 100.0 - step * d2,
                q3: 100.0 - step * d3,
                q4: 100.0 - step * d4,
            }
        })
        .collect()
}

/// One bucket of the return distribution chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionPoint {
    pub x: f64,
    #[serde(rename = "Q1")]
    pub q1: f64,
    #[serde(rename = "Q4")]
    pub q4: f64,
}

/// Standard normal density for Q1 against a shifted, widened density with a fat left tail for Q4.
///
/// `points` buckets are centred on zero with a spacing of 0.25 standard deviations.
#[must_use]
pub fn return_distribution(points: u32) -> Vec<DistributionPoint> {
    let half = f64::from(points / 2);
    (0..points)
        .map(|i| {
            let x = (f64::from(i) - half) / 4.0;
            let tail = if x < -1.5 { 0.05 } else { 0.0 };
            DistributionPoint {
                x,
                q1: normal_pdf(x),
                q4: normal_pdf(x + 0.3) * 1.1 + tail,
            }
        })
        .collect()
}

fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}
