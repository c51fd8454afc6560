//! Sector exposure calculator.
//!
//! Aggregates holdings by sector (stocks) or category (funds) and expresses
//! each group as a percentage of a caller-chosen valuation basis: total stock
//! value for sector commentary, total portfolio value for concentration
//! checks.

use serde::Serialize;
use std::collections::BTreeMap;

use super::error::WealthError;
use super::holding::{percent_of, FundCategory, MutualFundHolding, StockHolding};
use super::ranking::by_exposure_desc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorExposure {
    pub sector: String,
    pub value: f64,
    pub percentage: f64,
    pub holdings: Vec<String>,
}

/// Sector exposures ordered by percentage descending, name ascending on ties.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SectorExposureMap {
    pub basis: f64,
    pub sectors: Vec<SectorExposure>,
}

impl SectorExposureMap {
    pub fn get(&self, sector: &str) -> Option<&SectorExposure> {
        self.sectors
            .iter()
            .find(|e| e.sector.eq_ignore_ascii_case(sector))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectorExposure> {
        self.sectors.iter()
    }

    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    pub fn total_percentage(&self) -> f64 {
        self.sectors.iter().map(|e| e.percentage).sum()
    }

    pub fn contains(&self, sector: &str) -> bool {
        self.get(sector).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryExposure {
    pub category: FundCategory,
    pub value: f64,
    pub percentage: f64,
    pub holdings: Vec<String>,
}

/// Exposure of each sector as a share of `basis_value`.
///
/// Fails with `InvalidPortfolioState` when holdings exist but the basis is
/// not a positive finite number. No holdings yields an empty map.
pub fn sector_exposure(
    stocks: &[StockHolding],
    basis_value: f64,
) -> Result<SectorExposureMap, WealthError> {
    if stocks.is_empty() {
        return Ok(SectorExposureMap::default());
    }
    check_basis(basis_value)?;

    let mut grouped: BTreeMap<String, (f64, Vec<String>)> = BTreeMap::new();
    for stock in stocks {
        let entry = grouped.entry(stock.resolved_sector()).or_default();
        entry.0 += stock.current_value();
        entry.1.push(stock.symbol.clone());
    }

    let mut sectors: Vec<SectorExposure> = grouped
        .into_iter()
        .map(|(sector, (value, holdings))| SectorExposure {
            sector,
            value,
            percentage: percent_of(value, basis_value),
            holdings,
        })
        .collect();
    sectors.sort_by(|a, b| {
        by_exposure_desc(a.percentage, b.percentage).then_with(|| a.sector.cmp(&b.sector))
    });

    tracing::debug!(sectors = sectors.len(), basis = basis_value, "computed sector exposure");
    Ok(SectorExposureMap {
        basis: basis_value,
        sectors,
    })
}

/// Sector exposure relative to the combined value of the stocks themselves,
/// so percentages sum to 100.
pub fn equity_sector_exposure(stocks: &[StockHolding]) -> Result<SectorExposureMap, WealthError> {
    let total: f64 = stocks.iter().map(StockHolding::current_value).sum();
    sector_exposure(stocks, total)
}

/// Fund exposure by category as a share of `basis_value`, largest first.
pub fn category_exposure(
    funds: &[MutualFundHolding],
    basis_value: f64,
) -> Result<Vec<CategoryExposure>, WealthError> {
    if funds.is_empty() {
        return Ok(Vec::new());
    }
    check_basis(basis_value)?;

    let mut grouped: BTreeMap<FundCategory, (f64, Vec<String>)> = BTreeMap::new();
    for fund in funds {
        let entry = grouped.entry(fund.fund_category()).or_default();
        entry.0 += fund.current_value();
        entry.1.push(fund.scheme_name.clone());
    }

    let mut categories: Vec<CategoryExposure> = grouped
        .into_iter()
        .map(|(category, (value, holdings))| CategoryExposure {
            category,
            value,
            percentage: percent_of(value, basis_value),
            holdings,
        })
        .collect();
    categories.sort_by(|a, b| by_exposure_desc(a.percentage, b.percentage));
    Ok(categories)
}

fn check_basis(basis_value: f64) -> Result<(), WealthError> {
    if basis_value.is_finite() && basis_value > 0.0 {
        Ok(())
    } else {
        Err(WealthError::InvalidPortfolioState {
            reason: format!("portfolio valuation basis must be positive, got {basis_value}"),
        })
    }
}
