use rand::Rng;
use serde::{Serialize, Serializer};

use crate::core::{Company, DailyReturn, PerformanceMetrics, Quartile, Sector};
use crate::metrics::QuartileMetrics;
use crate::roster::Universe;
use crate::series::{
    self, DistributionPoint, QuartileCurvePoint, SurvivalPoint, TimeSeriesBuilder,
};

/// Companies listed in the overview search panel.
pub const SEARCH_LIMIT: usize = 10;
/// Points in the returns-view cumulative chart.
pub const RETURNS_SERIES_LEN: usize = 60;
/// Points in the company-view price chart.
pub const COMPANY_SERIES_LEN: usize = 100;
/// Sector reference score used when the company's sector has no peers in the roster.
pub const DEFAULT_SECTOR_AVERAGE: f64 = 65.0;
/// Recovery time that fills a recovery velocity bar.
pub const RECOVERY_SCALE_DAYS: f64 = 120.0;

const SURVIVAL_POINTS: u32 = 12;
const DISTRIBUTION_POINTS: u32 = 40;
const OUTLIER_POINTS: usize = 80;
const HEATMAP_FIRST_YEAR: i32 = 2021;
const HEATMAP_YEARS: i32 = 5;

/* ----------------------- shared pieces ----------------------- */

/// A headline figure card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpi {
    pub label: String,
    pub value: String,
    pub sub: String,
}

impl Kpi {
    fn new(label: impl Into<String>, value: impl Into<String>, sub: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            sub: sub.into(),
        }
    }
}

/// One bar of a per-quartile bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuartileBar {
    pub quartile: Quartile,
    pub value: f64,
}

/// Bars from Q4 up to Q1, the order the charts draw them in.
fn bars_q4_first(metrics: &QuartileMetrics, value: impl Fn(&PerformanceMetrics) -> f64) -> Vec<QuartileBar> {
    metrics
        .iter()
        .rev()
        .map(|(quartile, m)| QuartileBar {
            quartile,
            value: value(m),
        })
        .collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn pct(v: f64) -> f64 {
    round2(v * 100.0)
}

/// The ESG pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Pillar {
    Environmental,
    Social,
    Governance,
}

impl Pillar {
    #[must_use]
    pub const fn letter(self) -> &'static str {
        match self {
            Pillar::Environmental => "E",
            Pillar::Social => "S",
            Pillar::Governance => "G",
        }
    }
}

/* ----------------------- overview ----------------------- */

/// Verdict on one research question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Partial,
    /// The dominant pillar, for the pillar question.
    Pillar(Pillar),
}

impl Answer {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Answer::Yes => "YES",
            Answer::No => "NO",
            Answer::Partial => "PARTIAL",
            Answer::Pillar(p) => p.letter(),
        }
    }
}

impl Serialize for Answer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A research question with its verdict and a 1 to 3 star evidence rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResearchQuestion {
    /// Tab the question links to.
    pub tab: &'static str,
    pub title: &'static str,
    pub answer: Answer,
    pub evidence: u8,
    pub insight: &'static str,
}

/// A row of the overview company list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanySummary {
    pub ticker: String,
    pub name: String,
    pub sector: Sector,
    pub total: f64,
    pub quartile: Quartile,
}

impl From<&Company> for CompanySummary {
    fn from(c: &Company) -> Self {
        Self {
            ticker: c.ticker.clone(),
            name: c.name.clone(),
            sector: c.sector,
            total: c.esg.total,
            quartile: c.quartile,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewView {
    pub kpis: Vec<Kpi>,
    pub research_questions: Vec<ResearchQuestion>,
    pub companies: Vec<CompanySummary>,
    /// Annualised return in percent, Q4 first.
    pub alpha: Vec<QuartileBar>,
    /// Text handed to the narrative service.
    pub narrative_context: String,
}

const NO_ADVANTAGE: &str = "No consistent advantage for ESG leaders in this dimension.";

// Counts adjacent quartile pairs ordered in Q1's favour; `better(a, b)` is true when a beats b.
fn ordering(metrics: &QuartileMetrics, better: impl Fn(&PerformanceMetrics, &PerformanceMetrics) -> bool) -> (bool, u8) {
    let m: Vec<&PerformanceMetrics> = metrics.iter().map(|(_, m)| m).collect();
    let ordered = m.windows(2).filter(|w| better(w[0], w[1])).count();
    let leads = better(m[0], m[3]);
    (leads, u8::try_from(ordered).unwrap_or(3).max(1))
}

fn verdict((leads, evidence): (bool, u8)) -> (Answer, u8) {
    match (leads, evidence) {
        (true, 3) => (Answer::Yes, 3),
        (true, e) => (Answer::Partial, e),
        (false, _) => (Answer::No, 1),
    }
}

fn question(tab: &'static str, title: &'static str, (answer, evidence): (Answer, u8), insight: &'static str) -> ResearchQuestion {
    ResearchQuestion {
        tab,
        title,
        answer,
        evidence,
        insight: if answer == Answer::No { NO_ADVANTAGE } else { insight },
    }
}

/// Verdicts for FQ1..FQ5, derived from the ordering of the quartile aggregates.
///
/// A question is answered `YES` when every adjacent quartile pair is ordered in Q1's favour,
/// `PARTIAL` when Q1 beats Q4 but the chain is broken, and `NO` otherwise.
#[must_use]
pub fn research_questions(metrics: &QuartileMetrics) -> Vec<ResearchQuestion> {
    let returns = verdict(ordering(metrics, |a, b| a.annualized_return > b.annualized_return));
    let risk = verdict(ordering(metrics, |a, b| {
        a.sharpe_ratio > b.sharpe_ratio && a.volatility < b.volatility
    }));
    let var = ordering(metrics, |a, b| a.var_95 > b.var_95);
    let tail = ordering(metrics, |a, b| a.tail_risk < b.tail_risk);
    let downside = match (var.0, tail.0) {
        (true, true) => verdict((true, var.1.min(tail.1))),
        (true, false) | (false, true) => (Answer::Partial, 2),
        (false, false) => (Answer::No, 1),
    };
    let survival = verdict(ordering(metrics, |a, b| {
        a.survival_probability > b.survival_probability
    }));
    let dominant = dominant_pillar();

    vec![
        question("returns", "FQ1: Raw Returns", returns, "High ESG scores show strong return correlation."),
        question("risk", "FQ2: Risk-Adjusted", risk, "Lower volatility and higher Sharpe ratios in Q1."),
        question("downside", "FQ3: Downside Risk", downside, "VaR is reduced, but tail events persist globally."),
        question("survival", "FQ4: Survival", survival, "Lower delisting rates among ESG leaders."),
        question(
            "pillars",
            "FQ5: Strongest Pillar",
            (Answer::Pillar(dominant), 3),
            "Governance shows most consistent risk reduction.",
        ),
    ]
}

/// Builds the overview. `search` filters the company list (empty shows the first entries).
#[must_use]
pub fn overview(universe: &Universe, search: &str) -> OverviewView {
    let metrics = &universe.metrics;
    let spread = metrics[Quartile::Q1].annualized_return - metrics[Quartile::Q4].annualized_return;

    let kpis = vec![
        Kpi::new("Total Companies", universe.len().to_string(), "Company Universe"),
        Kpi::new(
            "Avg ESG Score",
            universe.mean_total().map_or_else(|| "n/a".to_string(), |m| format!("{m:.1}")),
            "Mean total score",
        ),
        Kpi::new("Analysis Period", "5Y", "Feb 2021 - Feb 2026"),
        Kpi::new("Alpha Generated", format!("{:+.1}%", spread * 100.0), "Q1 vs Q4 Annualized Return"),
    ];

    OverviewView {
        kpis,
        research_questions: research_questions(metrics),
        companies: universe
            .search(search, SEARCH_LIMIT)
            .into_iter()
            .map(CompanySummary::from)
            .collect(),
        alpha: bars_q4_first(metrics, |m| pct(m.annualized_return)),
        narrative_context: crate::narrative::summary_context(metrics),
    }
}

/* ----------------------- returns ----------------------- */

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnsView {
    /// Annualised return in percent, Q4 first.
    pub bars: Vec<QuartileBar>,
    pub curves: Vec<QuartileCurvePoint>,
    /// Q1 minus Q4 annualised return, in percentage points.
    pub spread: f64,
}

pub fn returns<R: Rng + ?Sized>(metrics: &QuartileMetrics, rng: &mut R) -> ReturnsView {
    let base = TimeSeriesBuilder::new().len(RETURNS_SERIES_LEN).generate(rng);
    ReturnsView {
        bars: bars_q4_first(metrics, |m| pct(m.annualized_return)),
        curves: series::quartile_curves(&base),
        spread: pct(metrics[Quartile::Q1].annualized_return - metrics[Quartile::Q4].annualized_return),
    }
}

/* ----------------------- risk ----------------------- */

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub ticker: String,
    pub esg: f64,
    pub sharpe: f64,
    pub quartile: Quartile,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskView {
    pub scatter: Vec<ScatterPoint>,
    pub kpis: Vec<Kpi>,
}

/// ESG score against an illustrative Sharpe ratio: `0.8 + (total - 60) / 100` plus uniform
/// jitter of +/- 0.2, floored at 0.2.
pub fn risk<R: Rng + ?Sized>(universe: &Universe, rng: &mut R) -> RiskView {
    let scatter = universe
        .companies
        .iter()
        .map(|c| {
            let bias = (c.esg.total - 60.0) / 100.0;
            let jitter = (rng.random::<f64>() - 0.5) * 0.4;
            ScatterPoint {
                ticker: c.ticker.clone(),
                esg: c.esg.total,
                sharpe: round2((0.8 + bias + jitter).max(0.2)),
                quartile: c.quartile,
            }
        })
        .collect();

    let q1 = &universe.metrics[Quartile::Q1];
    let q4 = &universe.metrics[Quartile::Q4];
    let kpis = vec![
        Kpi::new(
            "Avg Sharpe Ratio (Q1)",
            format!("{:.2}", q1.sharpe_ratio),
            format!("{:+.2} vs Q4", q1.sharpe_ratio - q4.sharpe_ratio),
        ),
        Kpi::new(
            "Avg Volatility (Q1)",
            format!("{:.1}%", q1.volatility * 100.0),
            format!("{:+.1}% vs Q4", (q1.volatility - q4.volatility) * 100.0),
        ),
        Kpi::new(
            "Avg Max Drawdown (Q1)",
            format!("{:.1}%", q1.max_drawdown * 100.0),
            "Lower Fragility",
        ),
        Kpi::new(
            "Avg Sortino (Q1)",
            format!("{:.2}", q1.sortino_ratio),
            format!("{:+.2} vs Q4", q1.sortino_ratio - q4.sortino_ratio),
        ),
    ];

    RiskView { scatter, kpis }
}

/* ----------------------- downside ----------------------- */

/// Resilience tag of a downside table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Resilience {
    Resilient,
    Fragile,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownsideRow {
    pub quartile: Quartile,
    pub var_95: f64,
    pub var_99: f64,
    pub max_drawdown: f64,
    pub tail_risk: f64,
    pub status: Resilience,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownsideView {
    /// Tail-event counts, Q4 first.
    pub tail_events: Vec<QuartileBar>,
    pub distribution: Vec<DistributionPoint>,
    pub table: Vec<DownsideRow>,
}

#[must_use]
pub fn downside(metrics: &QuartileMetrics) -> DownsideView {
    DownsideView {
        tail_events: bars_q4_first(metrics, |m| m.tail_risk),
        distribution: series::return_distribution(DISTRIBUTION_POINTS),
        table: metrics
            .iter()
            .map(|(quartile, m)| DownsideRow {
                quartile,
                var_95: m.var_95,
                var_99: m.var_99,
                max_drawdown: m.max_drawdown,
                tail_risk: m.tail_risk,
                status: if quartile == Quartile::Q1 {
                    Resilience::Resilient
                } else {
                    Resilience::Fragile
                },
            })
            .collect(),
    }
}

/* ----------------------- survival ----------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecoveryBar {
    pub quartile: Quartile,
    pub days: f64,
    /// Bar fill in percent of [`RECOVERY_SCALE_DAYS`], capped at 100.
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivalView {
    pub curves: Vec<SurvivalPoint>,
    pub recovery: Vec<RecoveryBar>,
    pub stats: Vec<Kpi>,
}

#[must_use]
pub fn survival(metrics: &QuartileMetrics) -> SurvivalView {
    let q1 = &metrics[Quartile::Q1];
    let q4 = &metrics[Quartile::Q4];
    SurvivalView {
        curves: series::survival_curves(SURVIVAL_POINTS),
        recovery: metrics
            .iter()
            .map(|(quartile, m)| RecoveryBar {
                quartile,
                days: m.recovery_days,
                width: (m.recovery_days / RECOVERY_SCALE_DAYS * 100.0).clamp(0.0, 100.0),
            })
            .collect(),
        stats: vec![
            Kpi::new("Avg Recovery Time (Q1)", format!("{:.0} Days", q1.recovery_days), "Fastest Rebound"),
            Kpi::new("Avg Recovery Time (Q4)", format!("{:.0} Days", q4.recovery_days), "Slowest Rebound"),
            Kpi::new(
                "Survival Delta",
                format!("{:+.1}%", (q1.survival_probability - q4.survival_probability) * 100.0),
                "Q1 vs Q4",
            ),
        ],
    }
}

/* ----------------------- pillars ----------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PillarImpact {
    pub pillar: Pillar,
    /// Standardised beta of the pillar score on risk.
    pub impact: f64,
}

/// Pillar sensitivities from the research regression, strongest first.
pub const PILLAR_IMPACTS: [PillarImpact; 3] = [
    PillarImpact { pillar: Pillar::Governance, impact: 0.65 },
    PillarImpact { pillar: Pillar::Social, impact: 0.42 },
    PillarImpact { pillar: Pillar::Environmental, impact: 0.28 },
];

fn dominant_pillar() -> Pillar {
    PILLAR_IMPACTS
        .iter()
        .max_by(|a, b| a.impact.total_cmp(&b.impact))
        .map_or(Pillar::Governance, |p| p.pillar)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadarAxis {
    pub subject: &'static str,
    #[serde(rename = "Q1")]
    pub q1: f64,
    #[serde(rename = "Q4")]
    pub q4: f64,
}

const RADAR: [RadarAxis; 5] = [
    RadarAxis { subject: "Returns", q1: 95.0, q4: 40.0 },
    RadarAxis { subject: "Vol Control", q1: 88.0, q4: 35.0 },
    RadarAxis { subject: "Max DD", q1: 92.0, q4: 50.0 },
    RadarAxis { subject: "Sharpe", q1: 85.0, q4: 45.0 },
    RadarAxis { subject: "Survival", q1: 98.0, q4: 70.0 },
];

/// Mean pillar scores of one quartile's members.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PillarMeans {
    pub quartile: Quartile,
    pub count: usize,
    pub environmental: f64,
    pub social: f64,
    pub governance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillarsView {
    pub dominant: Pillar,
    pub impacts: Vec<PillarImpact>,
    pub radar: Vec<RadarAxis>,
    pub pillar_means: Vec<PillarMeans>,
}

/// Mean E/S/G per quartile over the roster; empty quartiles report zeros.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pillar_means(universe: &Universe) -> Vec<PillarMeans> {
    Quartile::ALL
        .into_iter()
        .map(|q| {
            let members: Vec<&Company> = universe.members(q).collect();
            let n = members.len();
            let mean = |f: fn(&Company) -> f64| {
                if n == 0 {
                    0.0
                } else {
                    members.iter().map(|c| f(c)).sum::<f64>() / n as f64
                }
            };
            PillarMeans {
                quartile: q,
                count: n,
                environmental: mean(|c| c.esg.environmental),
                social: mean(|c| c.esg.social),
                governance: mean(|c| c.esg.governance),
            }
        })
        .collect()
}

#[must_use]
pub fn pillars(universe: &Universe) -> PillarsView {
    PillarsView {
        dominant: dominant_pillar(),
        impacts: PILLAR_IMPACTS.to_vec(),
        radar: RADAR.to_vec(),
        pillar_means: pillar_means(universe),
    }
}

/* ----------------------- company ----------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfileAxis {
    pub subject: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyView {
    pub company: Company,
    pub profile: Vec<ProfileAxis>,
    pub series: Vec<DailyReturn>,
}

/// Drill-down for one company: its pillar profile against the sector mean, and a fresh
/// illustrative price series.
pub fn company<R: Rng + ?Sized>(universe: &Universe, company: &Company, rng: &mut R) -> CompanyView {
    let sector_avg = universe
        .sector_mean_total(company.sector)
        .unwrap_or(DEFAULT_SECTOR_AVERAGE);
    CompanyView {
        company: company.clone(),
        profile: vec![
            ProfileAxis { subject: "Environmental", value: company.esg.environmental },
            ProfileAxis { subject: "Social", value: company.esg.social },
            ProfileAxis { subject: "Governance", value: company.esg.governance },
            ProfileAxis { subject: "Sector Avg", value: sector_avg },
        ],
        series: TimeSeriesBuilder::new().len(COMPANY_SERIES_LEN).generate(rng),
    }
}

/* ----------------------- data engineering ----------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompletenessCell {
    pub year: i32,
    pub month: u32,
    /// Share of non-missing observations, in percent.
    pub completeness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationarityRow {
    pub metric: &'static str,
    pub t_stat: f64,
    pub critical: f64,
    pub stationary: bool,
    pub p_value: f64,
}

const STATIONARITY: [StationarityRow; 4] = [
    StationarityRow { metric: "Raw Returns", t_stat: -4.8, critical: -2.8, stationary: true, p_value: 0.001 },
    StationarityRow { metric: "Log Volatility", t_stat: -3.5, critical: -2.8, stationary: true, p_value: 0.012 },
    StationarityRow { metric: "ESG Score (Level)", t_stat: -1.2, critical: -2.8, stationary: false, p_value: 0.45 },
    StationarityRow { metric: "ESG Score (Diff)", t_stat: -5.2, critical: -2.8, stationary: true, p_value: 0.0001 },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutlierPoint {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub anomaly: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataEngineeringView {
    /// Month-major: all years of January, then February, and so on.
    pub completeness: Vec<CompletenessCell>,
    pub stationarity: Vec<StationarityRow>,
    pub outliers: Vec<OutlierPoint>,
}

/// Data-quality panels. The first four months of the first year simulate an imputed gap
/// (65 to 85 % complete); every other cell is 98 to 100 % complete.
pub fn data_engineering<R: Rng + ?Sized>(rng: &mut R) -> DataEngineeringView {
    let mut completeness = Vec::with_capacity(12 * 5);
    for month in 1..=12_u32 {
        for year in HEATMAP_FIRST_YEAR..HEATMAP_FIRST_YEAR + HEATMAP_YEARS {
            let gap = year == HEATMAP_FIRST_YEAR && month <= 4;
            let value = if gap {
                65.0 + rng.random::<f64>() * 20.0
            } else {
                98.0 + rng.random::<f64>() * 2.0
            };
            completeness.push(CompletenessCell {
                year,
                month,
                completeness: value,
            });
        }
    }

    let outliers = (0..OUTLIER_POINTS)
        .map(|id| {
            let anomaly = rng.random::<f64>() > 0.95;
            let x = rng.random::<f64>() * 100.0;
            let y = rng.random::<f64>() * 100.0 + if anomaly { 150.0 } else { 0.0 };
            let z = rng.random::<f64>() * 1000.0;
            OutlierPoint { id, x, y, z, anomaly }
        })
        .collect();

    DataEngineeringView {
        completeness,
        stationarity: STATIONARITY.to_vec(),
        outliers,
    }
}

/* ----------------------- settings ----------------------- */

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub data_source: String,
    pub metrics_strategy: String,
    pub label_policy: String,
    pub narrative_model: String,
    pub narrative_enabled: bool,
    /// VaR confidence levels offered, in percent.
    pub var_confidence_levels: [u8; 3],
}
