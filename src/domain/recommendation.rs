//! Recommendation engine.
//!
//! Five independent analyzers each return zero or more [`Recommendation`]s.
//! Their output is concatenated, ranked by priority then impact score, and
//! truncated. Every analyzer tolerates empty input and returns an empty list
//! rather than failing.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use super::context::{PortfolioSummary, ProfileDefaults, RiskTolerance, UserContext};
use super::exposure::sector_exposure;
use super::goal::Goal;
use super::holding::{percent_of, round2, MutualFundHolding, StockHolding};
use super::ranking::{by_priority_then_score, Priority};

pub const MAX_RECOMMENDATIONS: usize = 8;

const ALLOCATION_TOLERANCE: f64 = 10.0;
const SECTOR_LIMIT_PCT: f64 = 20.0;
const SECTOR_HIGH_PCT: f64 = 30.0;
const SECTOR_TARGET_PCT: f64 = 18.0;
const STOCK_LIMIT_PCT: f64 = 10.0;
const STOCK_HIGH_PCT: f64 = 15.0;
const STOCK_TARGET_PCT: f64 = 8.0;
const FUND_REVIEW_RETURN_PCT: f64 = 5.0;
const FUND_REVIEW_MIN_INVESTED: f64 = 50_000.0;
const FUND_MAX_EXPENSE_RATIO: f64 = 1.0;
const FUND_SWITCH_IMPACT: f64 = 60.0;
const GOAL_LAGGING_PCT: f64 = 30.0;
const GOAL_NEAR_PCT: f64 = 85.0;
const GOAL_MIN_MONTHS: u32 = 6;
const GOAL_NEAR_IMPACT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    Reduce,
    Add,
    Review,
    Switch,
    GoalBased,
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecommendationType::Reduce => "reduce",
            RecommendationType::Add => "add",
            RecommendationType::Review => "review",
            RecommendationType::Switch => "switch",
            RecommendationType::GoalBased => "goal_based",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    AssetAllocation,
    SectorConcentration,
    StockConcentration,
    FundPerformance,
    GoalProgress,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub category: RecommendationCategory,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// 0–100; grows with the size of the deviation that triggered it.
    pub impact_score: f64,
    pub current_allocation: Option<f64>,
    pub recommended_allocation: Option<f64>,
    pub suggested_amount: Option<f64>,
    pub reasoning: Vec<String>,
}

/// Inputs shared by the analyzers.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationOptions {
    pub as_of: NaiveDate,
    pub max_recommendations: usize,
    pub profile_defaults: ProfileDefaults,
}

impl RecommendationOptions {
    pub fn new(as_of: NaiveDate) -> Self {
        RecommendationOptions {
            as_of,
            max_recommendations: MAX_RECOMMENDATIONS,
            profile_defaults: ProfileDefaults::default(),
        }
    }
}

/// Runs all analyzers and returns the ranked, truncated list.
pub fn generate_recommendations(
    ctx: &UserContext,
    options: &RecommendationOptions,
) -> Vec<Recommendation> {
    let portfolio = &ctx.portfolio;
    let summary = portfolio.summary();
    let total_value = summary.total_current_value;

    let mut all = Vec::new();
    all.extend(analyze_asset_allocation(
        &summary,
        ctx.age(&options.profile_defaults),
        ctx.risk_tolerance(&options.profile_defaults),
    ));
    all.extend(analyze_sector_concentration(&portfolio.stocks, total_value));
    all.extend(analyze_stock_concentration(&portfolio.stocks, total_value));
    all.extend(analyze_fund_performance(&portfolio.mutual_funds));
    all.extend(analyze_goal_progress(ctx.goals(), options.as_of));

    let produced = all.len();
    let ranked = rank_recommendations(all, options.max_recommendations.min(MAX_RECOMMENDATIONS));
    tracing::debug!(produced, kept = ranked.len(), "ranked recommendations");
    ranked
}

/// Sorts by priority then impact score, both descending, and keeps the top
/// `limit`.
pub fn rank_recommendations(mut recs: Vec<Recommendation>, limit: usize) -> Vec<Recommendation> {
    recs.sort_by(|a, b| by_priority_then_score(a.priority, a.impact_score, b.priority, b.impact_score));
    recs.truncate(limit);
    recs
}

/// Equity target by age, shifted for risk tolerance.
pub fn target_equity_pct(age: u32, risk: RiskTolerance) -> f64 {
    let base = (100.0 - age as f64).clamp(40.0, 80.0);
    match risk {
        RiskTolerance::Aggressive => base + 15.0,
        RiskTolerance::Conservative => base - 20.0,
        RiskTolerance::Moderate => base,
    }
}

pub fn analyze_asset_allocation(
    summary: &PortfolioSummary,
    age: u32,
    risk: RiskTolerance,
) -> Vec<Recommendation> {
    // No holdings means no allocation to judge.
    if !(summary.total_current_value > 0.0) {
        return Vec::new();
    }

    let target = target_equity_pct(age, risk);
    let current = summary.effective_equity_pct();
    let difference = (current - target).abs();
    if !(difference > ALLOCATION_TOLERANCE) {
        return Vec::new();
    }

    let increase = current < target;
    let suggested_amount = round2(difference * summary.total_current_value / 100.0);

    let (kind, title, description) = if increase {
        (
            RecommendationType::Add,
            "Increase equity allocation".to_string(),
            format!(
                "Your equity exposure of {:.1}% is below the {:.0}% suggested for your age and risk profile.",
                current, target
            ),
        )
    } else {
        (
            RecommendationType::Reduce,
            "Reduce equity allocation".to_string(),
            format!(
                "Your equity exposure of {:.1}% is above the {:.0}% suggested for your age and risk profile.",
                current, target
            ),
        )
    };

    vec![Recommendation {
        id: "asset-allocation".to_string(),
        kind,
        category: RecommendationCategory::AssetAllocation,
        title,
        description,
        priority: if difference > 20.0 { Priority::High } else { Priority::Medium },
        impact_score: (difference * 4.0).min(100.0),
        current_allocation: Some(round2(current)),
        recommended_allocation: Some(round2(target)),
        suggested_amount: Some(suggested_amount),
        reasoning: vec![
            format!("Age {} with a {} risk tolerance suggests about {:.0}% in equity", age, risk, target),
            format!("Current effective equity exposure is {:.1}%", current),
            format!("Gap of {:.1} percentage points exceeds the {:.0}-point tolerance", difference, ALLOCATION_TOLERANCE),
        ],
    }]
}

pub fn analyze_sector_concentration(stocks: &[StockHolding], total_value: f64) -> Vec<Recommendation> {
    let exposure = match sector_exposure(stocks, total_value) {
        Ok(exposure) => exposure,
        Err(err) => {
            tracing::debug!(error = %err, "skipping sector concentration");
            return Vec::new();
        }
    };

    exposure
        .iter()
        .filter(|e| e.percentage > SECTOR_LIMIT_PCT)
        .map(|e| {
            let excess = e.percentage - SECTOR_TARGET_PCT;
            Recommendation {
                id: format!("sector-{}", slug(&e.sector)),
                kind: RecommendationType::Reduce,
                category: RecommendationCategory::SectorConcentration,
                title: format!("Reduce {} sector exposure", e.sector),
                description: format!(
                    "{:.1}% of your portfolio sits in {}, above the {:.0}% single-sector limit.",
                    e.percentage, e.sector, SECTOR_LIMIT_PCT
                ),
                priority: if e.percentage > SECTOR_HIGH_PCT { Priority::High } else { Priority::Medium },
                impact_score: (e.percentage * 3.0).min(100.0),
                current_allocation: Some(round2(e.percentage)),
                recommended_allocation: Some(SECTOR_TARGET_PCT),
                suggested_amount: Some(round2(excess * total_value / 100.0)),
                reasoning: vec![
                    format!("Holdings in {}: {}", e.sector, e.holdings.join(", ")),
                    "A single sector downturn would hit a large share of the portfolio".to_string(),
                    format!("Trimming to {:.0}% keeps sector risk diversified", SECTOR_TARGET_PCT),
                ],
            }
        })
        .collect()
}

pub fn analyze_stock_concentration(stocks: &[StockHolding], total_value: f64) -> Vec<Recommendation> {
    if !(total_value > 0.0 && total_value.is_finite()) {
        return Vec::new();
    }

    stocks
        .iter()
        .filter_map(|stock| {
            let value = stock.current_value();
            let pct = percent_of(value, total_value);
            if !(pct > STOCK_LIMIT_PCT) {
                return None;
            }
            let trim = (pct - STOCK_TARGET_PCT) * total_value / 100.0;
            Some(Recommendation {
                id: format!("stock-{}", slug(&stock.symbol)),
                kind: RecommendationType::Reduce,
                category: RecommendationCategory::StockConcentration,
                title: format!("Trim position in {}", stock.symbol),
                description: format!(
                    "{} is {:.1}% of your portfolio, above the {:.0}% single-stock limit.",
                    stock.symbol, pct, STOCK_LIMIT_PCT
                ),
                priority: if pct > STOCK_HIGH_PCT { Priority::High } else { Priority::Medium },
                impact_score: (pct * 5.0).min(100.0),
                current_allocation: Some(round2(pct)),
                recommended_allocation: Some(STOCK_TARGET_PCT),
                suggested_amount: Some(round2(trim)),
                reasoning: vec![
                    format!("Position value is ₹{:.0}", value),
                    format!("Selling about ₹{:.0} brings it to {:.0}% of the portfolio", trim, STOCK_TARGET_PCT),
                    format!("Unrealised gain/loss on the position is {:.1}%", stock.gain_loss_pct()),
                ],
            })
        })
        .collect()
}

pub fn analyze_fund_performance(funds: &[MutualFundHolding]) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    for fund in funds {
        let invested = fund.invested_value();
        let return_pct = fund.gain_loss_pct();
        let house = fund.fund_house().map(|h| format!(" ({h})")).unwrap_or_default();

        if return_pct < FUND_REVIEW_RETURN_PCT && invested > FUND_REVIEW_MIN_INVESTED {
            recs.push(Recommendation {
                id: format!("fund-review-{}", slug(fund.key())),
                kind: RecommendationType::Review,
                category: RecommendationCategory::FundPerformance,
                title: format!("Review performance of {}", fund.scheme_name),
                description: format!(
                    "{}{} has returned {:.1}% on ₹{:.0} invested.",
                    fund.scheme_name, house, return_pct, invested
                ),
                priority: if return_pct < 0.0 { Priority::High } else { Priority::Medium },
                impact_score: (return_pct.abs() * 8.0 + 30.0).min(100.0),
                current_allocation: None,
                recommended_allocation: None,
                suggested_amount: None,
                reasoning: vec![
                    format!("Return of {:.1}% is below the {:.0}% review threshold", return_pct, FUND_REVIEW_RETURN_PCT),
                    format!("Category: {}", fund.fund_category()),
                    "Compare against the category benchmark before switching".to_string(),
                ],
            });
        }

        if let Some(ratio) = fund.expense_ratio.filter(|r| *r > FUND_MAX_EXPENSE_RATIO) {
            recs.push(Recommendation {
                id: format!("fund-cost-{}", slug(fund.key())),
                kind: RecommendationType::Switch,
                category: RecommendationCategory::FundPerformance,
                title: format!("Switch {} to a lower-cost option", fund.scheme_name),
                description: format!(
                    "{}{} charges an expense ratio of {:.2}%.",
                    fund.scheme_name, house, ratio
                ),
                priority: Priority::Low,
                impact_score: FUND_SWITCH_IMPACT,
                current_allocation: None,
                recommended_allocation: None,
                suggested_amount: None,
                reasoning: vec![
                    format!("Expense ratio above {:.1}% compounds into a large drag over time", FUND_MAX_EXPENSE_RATIO),
                    "Direct plans and index funds in the same category usually cost less".to_string(),
                ],
            });
        }
    }

    recs
}

pub fn analyze_goal_progress(goals: &[Goal], as_of: NaiveDate) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    for goal in goals.iter().filter(|g| g.target_amount > 0.0) {
        let progress = goal.progress_pct();
        let months = goal.months_remaining(as_of);

        if progress < GOAL_LAGGING_PCT
            && goal.priority == Priority::High
            && months.is_some_and(|m| m > GOAL_MIN_MONTHS)
        {
            let required = goal.required_monthly(as_of).unwrap_or(0.0);
            let suggested = required / 2.0;
            recs.push(Recommendation {
                id: format!("goal-accelerate-{}", slug(goal.key())),
                kind: RecommendationType::GoalBased,
                category: RecommendationCategory::GoalProgress,
                title: format!("Accelerate savings for {}", goal.name),
                description: format!(
                    "{} is {:.1}% funded with {} months to go.",
                    goal.name,
                    progress,
                    months.unwrap_or(0)
                ),
                priority: Priority::High,
                impact_score: (100.0 - progress).clamp(0.0, 100.0),
                current_allocation: None,
                recommended_allocation: None,
                suggested_amount: Some(round2(suggested)),
                reasoning: vec![
                    format!("₹{:.0} still needed to reach ₹{:.0}", goal.remaining_amount(), goal.target_amount),
                    format!("Full funding needs about ₹{:.0} per month", required),
                    format!("Starting with an extra ₹{:.0} per month builds momentum", suggested),
                ],
            });
        } else if (GOAL_NEAR_PCT..100.0).contains(&progress) {
            let remaining = goal.remaining_amount();
            recs.push(Recommendation {
                id: format!("goal-final-{}", slug(goal.key())),
                kind: RecommendationType::GoalBased,
                category: RecommendationCategory::GoalProgress,
                title: format!("Final push for {}", goal.name),
                description: format!("{} is {:.1}% funded.", goal.name, progress),
                priority: Priority::Medium,
                impact_score: GOAL_NEAR_IMPACT,
                current_allocation: None,
                recommended_allocation: None,
                suggested_amount: Some(round2(remaining)),
                reasoning: vec![
                    format!("Only ₹{:.0} left to reach the target", remaining),
                    "Consider moving the corpus to low-volatility funds as the date approaches".to_string(),
                ],
            });
        }
    }

    recs
}

fn slug(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.trim().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}
