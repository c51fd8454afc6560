//! User context from brokerage console CSV exports.
//!
//! Stocks: `Instrument,Qty.,Avg. cost,LTP` with an optional `Sector` column.
//! Funds: `Scheme,Units,Avg. NAV,NAV` with optional `Category` and
//! `Expense ratio` columns. Extra columns such as `Cur. val` or `P&L` are
//! ignored. Profile and goals are left empty for the engine defaults.

use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::context::{Portfolio, UserContext};
use crate::domain::error::WealthError;
use crate::domain::holding::{MutualFundHolding, StockHolding};
use crate::ports::context_port::ContextPort;

#[derive(Debug, Deserialize)]
struct StockRow {
    #[serde(rename = "Instrument")]
    instrument: String,
    #[serde(rename = "Qty.", deserialize_with = "number")]
    quantity: f64,
    #[serde(rename = "Avg. cost", deserialize_with = "number")]
    average_cost: f64,
    #[serde(rename = "LTP", deserialize_with = "number")]
    ltp: f64,
    #[serde(rename = "Sector", default)]
    sector: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FundRow {
    #[serde(rename = "Scheme")]
    scheme: String,
    #[serde(rename = "Units", deserialize_with = "number")]
    units: f64,
    #[serde(rename = "Avg. NAV", deserialize_with = "number")]
    average_nav: f64,
    #[serde(rename = "NAV", deserialize_with = "number")]
    nav: f64,
    #[serde(rename = "Category", default)]
    category: Option<String>,
    #[serde(rename = "Expense ratio", default, deserialize_with = "optional_number")]
    expense_ratio: Option<f64>,
}

fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',' && *c != '₹')
        .collect();
    cleaned.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_number(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid number '{raw}'")))
}

fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_number(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid number '{s}'"))),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub struct CsvHoldingsAdapter {
    stocks_path: Option<PathBuf>,
    funds_path: Option<PathBuf>,
}

impl CsvHoldingsAdapter {
    pub fn new(stocks_path: Option<PathBuf>, funds_path: Option<PathBuf>) -> Self {
        Self {
            stocks_path,
            funds_path,
        }
    }
}

fn import_error(path: &Path, reason: impl Into<String>) -> WealthError {
    WealthError::HoldingsImport {
        file: path.display().to_string(),
        reason: reason.into(),
    }
}

pub fn read_stocks(path: &Path) -> Result<Vec<StockHolding>, WealthError> {
    let content = fs::read_to_string(path)?;
    parse_stocks(&content).map_err(|reason| import_error(path, reason))
}

pub fn read_funds(path: &Path) -> Result<Vec<MutualFundHolding>, WealthError> {
    let content = fs::read_to_string(path)?;
    parse_funds(&content).map_err(|reason| import_error(path, reason))
}

/// Parses a stock holdings export. Errors carry the failing line.
pub fn parse_stocks(content: &str) -> Result<Vec<StockHolding>, String> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let mut stocks = Vec::new();

    for (i, result) in rdr.deserialize::<StockRow>().enumerate() {
        let row = result.map_err(|e| format!("row {}: {}", i + 1, e))?;
        if row.instrument.is_empty() {
            continue;
        }
        let mut stock = StockHolding::new(&row.instrument, row.quantity, row.average_cost, row.ltp);
        stock.sector = non_blank(row.sector);
        stocks.push(stock);
    }
    Ok(stocks)
}

/// Parses a mutual fund holdings export.
pub fn parse_funds(content: &str) -> Result<Vec<MutualFundHolding>, String> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let mut funds = Vec::new();

    for (i, result) in rdr.deserialize::<FundRow>().enumerate() {
        let row = result.map_err(|e| format!("row {}: {}", i + 1, e))?;
        if row.scheme.is_empty() {
            continue;
        }
        let mut fund = MutualFundHolding::new(&row.scheme, row.units, row.average_nav, row.nav);
        fund.category = non_blank(row.category);
        fund.expense_ratio = row.expense_ratio;
        funds.push(fund);
    }
    Ok(funds)
}

impl ContextPort for CsvHoldingsAdapter {
    fn load_context(&self) -> Result<UserContext, WealthError> {
        let stocks = match &self.stocks_path {
            Some(path) => read_stocks(path)?,
            None => Vec::new(),
        };
        let mutual_funds = match &self.funds_path {
            Some(path) => read_funds(path)?,
            None => Vec::new(),
        };
        tracing::debug!(
            stocks = stocks.len(),
            funds = mutual_funds.len(),
            "imported holdings from csv"
        );

        Ok(UserContext {
            portfolio: Portfolio {
                stocks,
                mutual_funds,
                summary: None,
            },
            ..UserContext::default()
        })
    }

    fn describe(&self) -> String {
        let paths: Vec<String> = [&self.stocks_path, &self.funds_path]
            .into_iter()
            .flatten()
            .map(|p| p.display().to_string())
            .collect();
        paths.join(" + ")
    }
}
