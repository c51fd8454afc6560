//! The combined insight report handed to report writers.

use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;

use super::context::{PortfolioSummary, RiskTolerance, UserContext};
use super::error::WealthError;
use super::exposure::{category_exposure, CategoryExposure};
use super::goal::Goal;
use super::holding::round2;
use super::market_analysis::{analyze_market, AnalysisOptions, MarketAnalysis};
use super::rebalance::{rebalance_snapshot, RebalanceSnapshot};
use super::recommendation::{generate_recommendations, Recommendation, RecommendationOptions};
use super::reference::ReferenceData;
use super::settings::EngineSettings;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub progress_pct: f64,
    pub remaining_amount: f64,
    pub months_remaining: Option<u32>,
    pub required_monthly: Option<f64>,
}

impl GoalProgress {
    pub fn from_goal(goal: &Goal, as_of: NaiveDate) -> Self {
        GoalProgress {
            id: goal.id.clone(),
            name: goal.name.clone(),
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            progress_pct: round2(goal.progress_pct()),
            remaining_amount: round2(goal.remaining_amount()),
            months_remaining: goal.months_remaining(as_of),
            required_monthly: goal.required_monthly(as_of).map(round2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationSection {
    pub recommendations: Vec<Recommendation>,
    pub rebalance_data: RebalanceSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightReport {
    pub as_of: NaiveDate,
    pub age: u32,
    pub risk_tolerance: RiskTolerance,
    pub portfolio_summary: PortfolioSummary,
    #[serde(flatten)]
    pub market: MarketAnalysis,
    pub category_exposure: Vec<CategoryExposure>,
    #[serde(flatten)]
    pub advice: RecommendationSection,
    pub goal_progress: Vec<GoalProgress>,
}

pub fn analysis_options(settings: &EngineSettings, as_of: NaiveDate) -> AnalysisOptions {
    AnalysisOptions {
        chart_days: settings.chart_days,
        unknown_sector_policy: settings.unknown_sector_policy,
        profile_defaults: settings.profile_defaults,
        ..AnalysisOptions::new(as_of)
    }
}

pub fn recommendation_section(
    ctx: &UserContext,
    reference: &ReferenceData,
    settings: &EngineSettings,
    as_of: NaiveDate,
) -> RecommendationSection {
    let options = RecommendationOptions {
        as_of,
        max_recommendations: settings.max_recommendations,
        profile_defaults: settings.profile_defaults,
    };
    RecommendationSection {
        recommendations: generate_recommendations(ctx, &options),
        rebalance_data: rebalance_snapshot(
            ctx,
            reference,
            &settings.profile_defaults,
            settings.rebalance_tolerance,
        ),
    }
}

/// Runs every engine over one context.
pub fn build_report<R: Rng + ?Sized>(
    ctx: &UserContext,
    reference: &ReferenceData,
    settings: &EngineSettings,
    as_of: NaiveDate,
    rng: &mut R,
) -> Result<InsightReport, WealthError> {
    let summary = ctx.portfolio.summary();
    let market = analyze_market(ctx, reference, &analysis_options(settings, as_of), rng)?;
    let categories = category_exposure(&ctx.portfolio.mutual_funds, summary.total_current_value)
        .unwrap_or_default();
    let advice = recommendation_section(ctx, reference, settings, as_of);
    let goal_progress = ctx
        .goals()
        .iter()
        .map(|goal| GoalProgress::from_goal(goal, as_of))
        .collect();

    tracing::debug!(
        sectors = market.sectors.len(),
        recommendations = advice.recommendations.len(),
        "built insight report"
    );

    Ok(InsightReport {
        as_of,
        age: ctx.age(&settings.profile_defaults),
        risk_tolerance: ctx.risk_tolerance(&settings.profile_defaults),
        portfolio_summary: summary,
        market,
        category_exposure: categories,
        advice,
        goal_progress,
    })
}
