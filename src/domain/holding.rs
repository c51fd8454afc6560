//! Stock and mutual-fund holdings.
//!
//! Holdings arrive from a brokerage snapshot and are immutable within one
//! analysis pass. Values and gain/loss are derived on demand.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::reference::{self, OTHER_SECTOR};

/// A directly held equity position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StockHolding {
    #[serde(alias = "tradingsymbol")]
    pub symbol: String,
    pub exchange: String,
    pub sector: Option<String>,
    pub quantity: f64,
    pub average_price: f64,
    pub last_price: f64,
}

impl StockHolding {
    pub fn new(symbol: &str, quantity: f64, average_price: f64, last_price: f64) -> Self {
        StockHolding {
            symbol: symbol.to_string(),
            exchange: "NSE".to_string(),
            sector: None,
            quantity,
            average_price,
            last_price,
        }
    }

    pub fn with_sector(mut self, sector: &str) -> Self {
        self.sector = Some(sector.to_string());
        self
    }

    pub fn invested_value(&self) -> f64 {
        self.quantity * self.average_price
    }

    pub fn current_value(&self) -> f64 {
        self.quantity * self.last_price
    }

    pub fn gain_loss(&self) -> f64 {
        self.current_value() - self.invested_value()
    }

    pub fn gain_loss_pct(&self) -> f64 {
        percent_of(self.gain_loss(), self.invested_value())
    }

    /// Explicit sector tag, else the symbol table, else `"Other"`.
    pub fn resolved_sector(&self) -> String {
        if let Some(sector) = self
            .sector
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            return sector.to_string();
        }
        reference::reference()
            .sector_for_symbol(&self.symbol)
            .unwrap_or(OTHER_SECTOR)
            .to_string()
    }
}

/// Mutual-fund category, classified by keyword match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundCategory {
    LargeCap,
    MidCap,
    SmallCap,
    FlexiCap,
    Elss,
    Index,
    Hybrid,
    Debt,
    Liquid,
    International,
    Gold,
    Other,
}

impl FundCategory {
    /// First keyword match wins; the table is ordered so that narrower
    /// phrases ("midcap index") resolve before broader ones ("index").
    pub fn classify(text: &str) -> FundCategory {
        let lower = text.to_lowercase();
        reference::FUND_CATEGORY_KEYWORDS
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, category)| *category)
            .unwrap_or(FundCategory::Other)
    }
}

impl fmt::Display for FundCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FundCategory::LargeCap => "Large Cap",
            FundCategory::MidCap => "Mid Cap",
            FundCategory::SmallCap => "Small Cap",
            FundCategory::FlexiCap => "Flexi Cap",
            FundCategory::Elss => "ELSS",
            FundCategory::Index => "Index",
            FundCategory::Hybrid => "Hybrid",
            FundCategory::Debt => "Debt",
            FundCategory::Liquid => "Liquid",
            FundCategory::International => "International",
            FundCategory::Gold => "Gold",
            FundCategory::Other => "Other",
        };
        f.write_str(label)
    }
}

/// A mutual-fund position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MutualFundHolding {
    #[serde(alias = "fund")]
    pub scheme_name: String,
    #[serde(alias = "tradingsymbol")]
    pub scheme_code: String,
    pub category: Option<String>,
    #[serde(alias = "quantity")]
    pub units: f64,
    #[serde(alias = "average_price")]
    pub average_nav: f64,
    #[serde(alias = "last_price")]
    pub nav: f64,
    pub expense_ratio: Option<f64>,
}

impl MutualFundHolding {
    pub fn new(scheme_name: &str, units: f64, average_nav: f64, nav: f64) -> Self {
        MutualFundHolding {
            scheme_name: scheme_name.to_string(),
            scheme_code: String::new(),
            category: None,
            units,
            average_nav,
            nav,
            expense_ratio: None,
        }
    }

    pub fn invested_value(&self) -> f64 {
        self.units * self.average_nav
    }

    pub fn current_value(&self) -> f64 {
        self.units * self.nav
    }

    pub fn gain_loss(&self) -> f64 {
        self.current_value() - self.invested_value()
    }

    pub fn gain_loss_pct(&self) -> f64 {
        percent_of(self.gain_loss(), self.invested_value())
    }

    pub fn fund_category(&self) -> FundCategory {
        let from_category = self
            .category
            .as_deref()
            .map(FundCategory::classify)
            .unwrap_or(FundCategory::Other);
        if from_category != FundCategory::Other {
            return from_category;
        }
        FundCategory::classify(&self.scheme_name)
    }

    /// Scheme names lead with the AMC brand, so only the prefix is matched.
    pub fn fund_house(&self) -> Option<&'static str> {
        let lower = self.scheme_name.trim().to_lowercase();
        reference::FUND_HOUSE_KEYWORDS
            .iter()
            .find(|(keyword, _)| lower.starts_with(keyword))
            .map(|(_, house)| *house)
    }

    /// Identifier used in recommendation ids.
    pub fn key(&self) -> &str {
        if self.scheme_code.is_empty() {
            &self.scheme_name
        } else {
            &self.scheme_code
        }
    }
}

/// `part / whole * 100`, or 0 when `whole` is not positive.
///
/// Multiplies before dividing so exact thresholds (200 of 1000 is 20%) stay
/// exact in floating point.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 && whole.is_finite() {
        part * 100.0 / whole
    } else {
        0.0
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
