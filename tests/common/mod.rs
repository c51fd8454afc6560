#![allow(dead_code)]

use chrono::NaiveDate;
use std::io::Write;
use wealthwise::domain::context::{InvestmentProfile, Portfolio, RiskTolerance, UserContext, UserProfile};
use wealthwise::domain::goal::Goal;
use wealthwise::domain::holding::{MutualFundHolding, StockHolding};
use wealthwise::domain::ranking::Priority;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn as_of() -> NaiveDate {
    date(2025, 1, 15)
}

pub fn write_temp(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    write_temp(content, ".ini")
}

pub fn context(
    stocks: Vec<StockHolding>,
    funds: Vec<MutualFundHolding>,
    age: Option<u32>,
    risk: Option<RiskTolerance>,
) -> UserContext {
    UserContext {
        portfolio: Portfolio {
            stocks,
            mutual_funds: funds,
            summary: None,
        },
        user_profile: UserProfile { name: None, age },
        investment_profile: InvestmentProfile {
            risk_tolerance: risk,
        },
        ..UserContext::default()
    }
}

pub fn goal(id: &str, target: f64, current: f64, target_date: Option<NaiveDate>, priority: Priority) -> Goal {
    Goal {
        id: id.to_string(),
        name: id.to_string(),
        target_amount: target,
        current_amount: current,
        target_date,
        priority,
    }
}

/// Bank-heavy equity book, one large-cap fund and one underperforming debt
/// fund, plus a lagging high-priority goal. Total value 503,000.
pub fn concentrated_context() -> UserContext {
    let mut ctx = context(
        vec![
            StockHolding::new("HDFCBANK", 100.0, 1500.0, 1650.0),
            StockHolding::new("TCS", 20.0, 3200.0, 3500.0),
            StockHolding::new("INFY", 50.0, 1400.0, 1500.0),
        ],
        vec![
            MutualFundHolding::new("Axis Bluechip Fund", 2000.0, 40.0, 50.0),
            MutualFundHolding::new("HDFC Short Term Debt Fund", 3000.0, 30.0, 31.0),
        ],
        Some(35),
        Some(RiskTolerance::Moderate),
    );
    ctx.financial_goals.goals = vec![goal(
        "retirement",
        10_000_000.0,
        500_000.0,
        Some(date(2040, 1, 1)),
        Priority::High,
    )];
    ctx
}

pub const CONTEXT_JSON: &str = r#"{
  "portfolio": {
    "stocks": [
      {"tradingsymbol": "HDFCBANK", "quantity": 100, "average_price": 1500, "last_price": 1650},
      {"tradingsymbol": "TCS", "quantity": 20, "average_price": 3200, "last_price": 3500},
      {"tradingsymbol": "INFY", "quantity": 50, "average_price": 1400, "last_price": 1500}
    ],
    "mutual_funds": [
      {"fund": "Axis Bluechip Fund", "quantity": 2000, "average_price": 40, "last_price": 50},
      {"fund": "HDFC Short Term Debt Fund", "quantity": 3000, "average_price": 30, "last_price": 31}
    ]
  },
  "user_profile": {"name": "Asha", "age": 35},
  "investment_profile": {"risk_tolerance": "moderate"},
  "financial_goals": {
    "goals": [
      {"id": "retirement", "title": "Retirement", "target_amount": 10000000, "current_amount": 500000,
       "target_date": "2040-01-01", "priority": "high"}
    ]
  }
}"#;

pub const STOCKS_CSV: &str = "Instrument,Qty.,Avg. cost,LTP\n\
HDFCBANK,100,1500,1650\n\
TCS,20,3200,3500\n\
INFY,50,1400,1500\n";

pub const FUNDS_CSV: &str = "Scheme,Units,Avg. NAV,NAV\n\
Axis Bluechip Fund,2000,40,50\n\
HDFC Short Term Debt Fund,3000,30,31\n";
