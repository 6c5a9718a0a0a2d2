//! Offline pipeline that turns raw close prices and (optional) vendor ESG scores into a
//! [`Dataset`] document the dataset source can load.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::core::{Company, EsgError, EsgScore};
use crate::metrics::{self, compute};
use crate::quartile::classify;
use crate::roster::{Dataset, hashed_profile, hashed_sector};

/// Daily closes per ticker, aligned on a shared date index. Missing closes are `NaN`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    pub dates: Vec<NaiveDate>,
    /// Ticker to close series, each as long as `dates`, oldest first.
    pub columns: BTreeMap<String, Vec<f64>>,
}

impl PriceTable {
    /// Parses a wide price table: a date column followed by one column per ticker.
    ///
    /// ```text
    /// Date,MMM,AOS
    /// 2021-02-04,123.15,54.20
    /// ```
    ///
    /// Rows are sorted by date. Empty or `NaN` cells are missing closes.
    ///
    /// # Errors
    ///
    /// Returns [`EsgError::Data`] for a missing header, an unparsable date or number, or a
    /// row with the wrong number of cells, and [`EsgError::Csv`] for malformed CSV.
    pub fn from_csv_str(text: &str) -> Result<Self, EsgError> {
        let mut rdr = reader(text);
        let headers = header_row(&mut rdr, "prices")?;
        let tickers: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

        let mut rows: Vec<(NaiveDate, Vec<f64>)> = Vec::new();
        for record in rdr.records() {
            let record = record?;
            if record.len() != headers.len() {
                return Err(EsgError::Data(format!(
                    "prices: line {} has {} cells, expected {}",
                    line_of(&record),
                    record.len(),
                    headers.len()
                )));
            }
            let date = parse_date(&record[0])?;
            let closes = record
                .iter()
                .skip(1)
                .map(parse_number)
                .collect::<Result<Vec<_>, _>>()?;
            rows.push((date, closes));
        }
        rows.sort_by_key(|(d, _)| *d);

        let mut columns: BTreeMap<String, Vec<f64>> = tickers
            .iter()
            .map(|t| (t.clone(), Vec::with_capacity(rows.len())))
            .collect();
        let mut dates = Vec::with_capacity(rows.len());
        for (date, closes) in rows {
            dates.push(date);
            for (ticker, close) in tickers.iter().zip(closes) {
                if let Some(col) = columns.get_mut(ticker) {
                    col.push(close);
                }
            }
        }
        Ok(Self { dates, columns })
    }

    /// Reads and parses the price file at `path`.
    ///
    /// # Errors
    ///
    /// [`EsgError::Io`] or see [`PriceTable::from_csv_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EsgError> {
        Self::from_csv_str(&fs::read_to_string(path)?)
    }

    #[must_use]
    pub fn tickers(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.keys().map(String::as_str)
    }
}

fn reader(text: &str) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes())
}

fn header_row(rdr: &mut csv::Reader<&[u8]>, what: &str) -> Result<StringRecord, EsgError> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(EsgError::Data(format!("{what}: missing header row")));
    }
    Ok(headers)
}

fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, csv::Position::line)
}

/// Empty, `NaN` and `NA` cells are missing values.
fn parse_number(cell: &str) -> Result<f64, EsgError> {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") || cell.eq_ignore_ascii_case("na") {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>()
        .map_err(|e| EsgError::Data(format!("bad number {cell:?}: {e}")))
}

fn parse_date(cell: &str) -> Result<NaiveDate, EsgError> {
    // Accept a trailing time component ("2021-02-04 00:00:00").
    let day = cell.split_whitespace().next().unwrap_or(cell);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| EsgError::Data(format!("prices: bad date {cell:?}: {e}")))
}

/// Reduces a vendor ticker such as `"AAPL US"` or `"AAPL US Equity"` to `"AAPL"`.
#[must_use]
pub fn normalize_ticker(raw: &str) -> &str {
    raw.split_whitespace().next().unwrap_or("")
}

/// Parses vendor ESG records keyed by normalised ticker.
///
/// Required columns are `Ticker` and `TOTAL_ESG_SCORE`. `ENV_SCORE`, `SOC_SCORE` and
/// `GOV_SCORE` are 0 when the column is absent or the cell is empty. A missing total is kept
/// as `NaN` so that [`build_dataset`] can substitute a hashed profile. Later rows win on
/// duplicate tickers.
///
/// # Errors
///
/// Returns [`EsgError::Data`] for a missing required column or an unparsable number, and
/// [`EsgError::Csv`] for malformed CSV.
pub fn esg_records_from_csv_str(text: &str) -> Result<BTreeMap<String, EsgScore>, EsgError> {
    let mut rdr = reader(text);
    let headers = header_row(&mut rdr, "esg")?;
    let required = |name: &str| {
        column(&headers, name).ok_or_else(|| EsgError::Data(format!("esg: missing column {name}")))
    };
    let ticker_col = required("Ticker")?;
    let total_col = required("TOTAL_ESG_SCORE")?;
    let env_col = column(&headers, "ENV_SCORE");
    let soc_col = column(&headers, "SOC_SCORE");
    let gov_col = column(&headers, "GOV_SCORE");

    let cell = |record: &StringRecord, col: Option<usize>| -> Result<f64, EsgError> {
        match col.and_then(|c| record.get(c)) {
            Some(v) => parse_number(v),
            None => Ok(f64::NAN),
        }
    };
    let pillar = |record: &StringRecord, col: Option<usize>| -> Result<f64, EsgError> {
        Ok(finite_or_zero(cell(record, col)?))
    };

    let mut out = BTreeMap::new();
    for record in rdr.records() {
        let record = record?;
        let ticker = normalize_ticker(record.get(ticker_col).unwrap_or(""));
        if ticker.is_empty() {
            continue;
        }
        let score = EsgScore {
            total: cell(&record, Some(total_col))?,
            environmental: pillar(&record, env_col)?,
            social: pillar(&record, soc_col)?,
            governance: pillar(&record, gov_col)?,
        };
        out.insert(ticker.to_string(), score);
    }
    Ok(out)
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Reads and parses the ESG file at `path`.
///
/// # Errors
///
/// [`EsgError::Io`] or see [`esg_records_from_csv_str`].
pub fn esg_records_from_path(path: impl AsRef<Path>) -> Result<BTreeMap<String, EsgScore>, EsgError> {
    esg_records_from_csv_str(&fs::read_to_string(path)?)
}

/// Builds a dataset from price history and ESG records.
///
/// Tickers with fewer than [`compute::MIN_RETURNS`] usable returns are skipped. A ticker
/// without an ESG record, or whose record has a non-finite total, gets
/// [`hashed_profile`]; non-finite pillars of a kept record become 0. Quartile aggregates are
/// the per-quartile means of the company metrics.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(prices, esg), fields(tickers = prices.columns.len())))]
#[must_use]
pub fn build_dataset(prices: &PriceTable, esg: &BTreeMap<String, EsgScore>) -> Dataset {
    let mut companies = Vec::with_capacity(prices.columns.len());

    for (ticker, closes) in &prices.columns {
        let Some(metrics) = compute::from_prices(closes) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(ticker = %ticker, "not enough price history, skipping");
            continue;
        };

        let esg_score = match esg.get(ticker) {
            Some(score) if score.total.is_finite() => EsgScore {
                total: score.total,
                environmental: finite_or_zero(score.environmental),
                social: finite_or_zero(score.social),
                governance: finite_or_zero(score.governance),
            },
            _ => hashed_profile(ticker).0,
        };

        companies.push(Company {
            ticker: ticker.clone(),
            name: format!("{ticker} Inc."),
            sector: hashed_sector(ticker),
            esg: esg_score,
            quartile: classify(esg_score.total),
            description: None,
            metrics: Some(metrics),
        });
    }

    let quartile_metrics = metrics::average_by_quartile(&companies);
    Dataset {
        companies,
        quartile_metrics: Some(quartile_metrics),
    }
}

/// Runs the whole pipeline: reads `prices`, the optional `esg` file, and writes the dataset
/// document to `out`.
///
/// An unreadable ESG file is not fatal: every ticker then gets a hashed profile.
///
/// # Errors
///
/// Returns an error if the price file cannot be read or parsed, or `out` cannot be written.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err))]
pub fn run(prices: impl AsRef<Path>, esg: Option<&Path>, out: impl AsRef<Path>) -> Result<Dataset, EsgError> {
    let table = PriceTable::from_path(prices)?;
    let records = match esg.map(esg_records_from_path) {
        Some(Ok(records)) => records,
        Some(Err(_e)) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, "esg records unavailable, using hashed profiles");
            BTreeMap::new()
        }
        None => BTreeMap::new(),
    };

    let dataset = build_dataset(&table, &records);
    if let Some(parent) = out.as_ref().parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    dataset.write_to(out)?;

    #[cfg(feature = "tracing")]
    tracing::info!(companies = dataset.companies.len(), "dataset written");
    Ok(dataset)
}
