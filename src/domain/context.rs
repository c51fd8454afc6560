//! The user context consumed by both engines.
//!
//! Every field is optional on the wire: absent arrays become empty, absent
//! numbers become zero, and profile gaps are filled from [`ProfileDefaults`].

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::goal::Goal;
use super::holding::{percent_of, MutualFundHolding, StockHolding};

/// Weight applied to mutual-fund allocation when estimating equity exposure.
pub const FUND_EQUITY_WEIGHT: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskTolerance {
    pub fn parse(value: &str) -> Option<RiskTolerance> {
        match value.trim().to_lowercase().as_str() {
            "conservative" | "low" => Some(RiskTolerance::Conservative),
            "moderate" | "medium" | "balanced" => Some(RiskTolerance::Moderate),
            "aggressive" | "high" => Some(RiskTolerance::Aggressive),
            _ => None,
        }
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTolerance::Conservative => write!(f, "conservative"),
            RiskTolerance::Moderate => write!(f, "moderate"),
            RiskTolerance::Aggressive => write!(f, "aggressive"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetAllocation {
    pub stocks_percentage: f64,
    pub mutual_funds_percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioSummary {
    pub total_investment: f64,
    pub total_current_value: f64,
    pub total_gain_loss: f64,
    pub asset_allocation: AssetAllocation,
}

impl PortfolioSummary {
    pub fn derive(stocks: &[StockHolding], funds: &[MutualFundHolding]) -> Self {
        let stock_value: f64 = stocks.iter().map(StockHolding::current_value).sum();
        let fund_value: f64 = funds.iter().map(MutualFundHolding::current_value).sum();
        let total_investment: f64 = stocks
            .iter()
            .map(StockHolding::invested_value)
            .chain(funds.iter().map(MutualFundHolding::invested_value))
            .sum();
        let total_current_value = stock_value + fund_value;

        PortfolioSummary {
            total_investment,
            total_current_value,
            total_gain_loss: total_current_value - total_investment,
            asset_allocation: AssetAllocation {
                stocks_percentage: percent_of(stock_value, total_current_value),
                mutual_funds_percentage: percent_of(fund_value, total_current_value),
            },
        }
    }

    /// Stock allocation plus the equity-weighted share of fund allocation.
    pub fn effective_equity_pct(&self) -> f64 {
        self.asset_allocation.stocks_percentage
            + FUND_EQUITY_WEIGHT * self.asset_allocation.mutual_funds_percentage
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Portfolio {
    pub stocks: Vec<StockHolding>,
    pub mutual_funds: Vec<MutualFundHolding>,
    pub summary: Option<PortfolioSummary>,
}

impl Portfolio {
    /// The supplied summary, or one derived from holdings when the supplied
    /// one is missing or carries no value despite holdings being present.
    pub fn summary(&self) -> PortfolioSummary {
        match self.summary {
            Some(summary) if summary.total_current_value > 0.0 || self.is_empty() => summary,
            _ => PortfolioSummary::derive(&self.stocks, &self.mutual_funds),
        }
    }

    pub fn total_current_value(&self) -> f64 {
        self.summary().total_current_value
    }

    pub fn stock_value(&self) -> f64 {
        self.stocks.iter().map(StockHolding::current_value).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty() && self.mutual_funds.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: Option<String>,
    pub age: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestmentProfile {
    #[serde(deserialize_with = "lenient_risk_tolerance")]
    pub risk_tolerance: Option<RiskTolerance>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialGoals {
    pub goals: Vec<Goal>,
}

/// Fallbacks for profile fields the context leaves out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileDefaults {
    pub age: u32,
    pub risk_tolerance: RiskTolerance,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        ProfileDefaults {
            age: 30,
            risk_tolerance: RiskTolerance::Moderate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserContext {
    pub portfolio: Portfolio,
    pub user_profile: UserProfile,
    pub investment_profile: InvestmentProfile,
    pub financial_goals: FinancialGoals,
}

impl UserContext {
    pub fn age(&self, defaults: &ProfileDefaults) -> u32 {
        self.user_profile
            .age
            .filter(|&age| age > 0)
            .unwrap_or(defaults.age)
    }

    pub fn risk_tolerance(&self, defaults: &ProfileDefaults) -> RiskTolerance {
        self.investment_profile
            .risk_tolerance
            .unwrap_or(defaults.risk_tolerance)
    }

    pub fn goals(&self) -> &[Goal] {
        &self.financial_goals.goals
    }
}

fn lenient_risk_tolerance<'de, D>(deserializer: D) -> Result<Option<RiskTolerance>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(RiskTolerance::parse))
}
