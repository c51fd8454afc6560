//! Market analysis engine.
//!
//! A stateless transform from a user context to sector commentary, portfolio
//! impact, a sentiment score, personalised news and a synthetic chart. The
//! only non-determinism is the injected RNG.

use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;

use super::context::{ProfileDefaults, UserContext};
use super::error::WealthError;
use super::exposure::{category_exposure, equity_sector_exposure, SectorExposureMap};
use super::holding::{round2, FundCategory};
use super::ranking::by_magnitude_desc;
use super::reference::{NewsTrigger, Outlook, ReferenceData, SectorProfile};
use super::sentiment::{score_sentiment, MarketSentiment, SentimentInputs, SENTIMENT_BASE};
use super::simulation::{simulate_chart, ChartPoint};

pub const MAX_NEWS_ITEMS: usize = 5;
pub const DEFAULT_CHART_DAYS: usize = 30;

/// How sectors missing from the reference table get a performance figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownSectorPolicy {
    /// Fixed 0% move, reproducible.
    #[default]
    Neutral,
    /// Uniform draw from `[-1, 1]` using the injected RNG.
    Random,
}

impl UnknownSectorPolicy {
    pub fn parse(value: &str) -> Option<UnknownSectorPolicy> {
        match value.trim().to_lowercase().as_str() {
            "neutral" | "fixed" => Some(UnknownSectorPolicy::Neutral),
            "random" => Some(UnknownSectorPolicy::Random),
            _ => None,
        }
    }
}

impl std::fmt::Display for UnknownSectorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnknownSectorPolicy::Neutral => write!(f, "neutral"),
            UnknownSectorPolicy::Random => write!(f, "random"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    pub as_of: NaiveDate,
    pub chart_days: usize,
    pub sentiment_base: f64,
    pub unknown_sector_policy: UnknownSectorPolicy,
    pub profile_defaults: ProfileDefaults,
}

impl AnalysisOptions {
    pub fn new(as_of: NaiveDate) -> Self {
        AnalysisOptions {
            as_of,
            chart_days: DEFAULT_CHART_DAYS,
            sentiment_base: SENTIMENT_BASE,
            unknown_sector_policy: UnknownSectorPolicy::default(),
            profile_defaults: ProfileDefaults::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorInsight {
    pub name: String,
    pub exposure: f64,
    pub value: f64,
    pub performance: f64,
    pub outlook: Outlook,
    pub recommendation: String,
    pub reasoning: String,
    /// `exposure × performance / 100`, in percentage points of the equity book.
    pub impact_on_portfolio: f64,
    pub holdings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorImpact {
    pub sector: String,
    pub value: f64,
    pub performance: f64,
    pub impact: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PortfolioImpact {
    pub total_positive: f64,
    pub total_negative: f64,
    pub net: f64,
    pub sectors: Vec<SectorImpact>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    pub source: String,
    pub sentiment: Outlook,
    /// The sector or fund category that made this item relevant.
    pub relevance: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketAnalysis {
    pub sectors: Vec<SectorInsight>,
    pub market_sentiment: MarketSentiment,
    pub portfolio_impact: PortfolioImpact,
    /// Synthetic random-walk series; see `chart_is_synthetic`.
    pub chart_data: Vec<ChartPoint>,
    pub chart_is_synthetic: bool,
    pub news_summary: Vec<NewsItem>,
}

/// Runs every market-analysis step for one user.
pub fn analyze_market<R: Rng + ?Sized>(
    ctx: &UserContext,
    reference: &ReferenceData,
    options: &AnalysisOptions,
    rng: &mut R,
) -> Result<MarketAnalysis, WealthError> {
    let stocks = &ctx.portfolio.stocks;
    let exposure = equity_sector_exposure(stocks).or_else(|err| {
        // Holdings that are all worth zero carry no exposure to describe.
        if stocks.iter().all(|s| s.current_value() == 0.0) {
            Ok(SectorExposureMap::default())
        } else {
            Err(err)
        }
    })?;

    let resolved = resolve_sector_profiles(&exposure, reference, options.unknown_sector_policy, rng);
    let sectors = sector_insights(&exposure, &resolved);
    let portfolio_impact = portfolio_impact(&exposure, &resolved);

    let summary = ctx.portfolio.summary();
    let market_sentiment = score_sentiment(
        &SentimentInputs {
            base: options.sentiment_base,
            effective_equity_pct: summary.effective_equity_pct(),
            risk_tolerance: ctx.risk_tolerance(&options.profile_defaults),
            weighted_sector_performance: weighted_performance(&sectors),
        },
        reference,
    );

    let fund_categories = held_fund_categories(ctx);
    let news_summary = personalized_news(&exposure, &fund_categories, reference);
    let chart = simulate_chart(rng, options.as_of, options.chart_days);

    tracing::debug!(
        sectors = sectors.len(),
        news = news_summary.len(),
        sentiment = market_sentiment.score,
        "market analysis complete"
    );

    Ok(MarketAnalysis {
        sectors,
        market_sentiment,
        portfolio_impact,
        chart_data: chart.points,
        chart_is_synthetic: chart.synthetic,
        news_summary,
    })
}

/// One profile per held sector, in exposure order. Unknown sectors get a
/// neutral record whose performance follows `policy`.
pub fn resolve_sector_profiles<R: Rng + ?Sized>(
    exposure: &SectorExposureMap,
    reference: &ReferenceData,
    policy: UnknownSectorPolicy,
    rng: &mut R,
) -> Vec<SectorProfile> {
    exposure
        .iter()
        .map(|e| match reference.sector_profile(&e.sector) {
            Some(profile) => profile.clone(),
            None => {
                let performance = match policy {
                    UnknownSectorPolicy::Neutral => 0.0,
                    UnknownSectorPolicy::Random => round2(rng.gen_range(-1.0..=1.0)),
                };
                SectorProfile::neutral(performance)
            }
        })
        .collect()
}

/// Commentary per sector, ordered by the user's exposure descending.
pub fn sector_insights(exposure: &SectorExposureMap, profiles: &[SectorProfile]) -> Vec<SectorInsight> {
    exposure
        .iter()
        .zip(profiles)
        .map(|(e, profile)| SectorInsight {
            name: e.sector.clone(),
            exposure: round2(e.percentage),
            value: round2(e.value),
            performance: profile.performance,
            outlook: profile.outlook,
            recommendation: profile.recommendation.clone(),
            reasoning: profile.reasoning.clone(),
            impact_on_portfolio: round2(e.percentage * profile.performance / 100.0),
            holdings: e.holdings.clone(),
        })
        .collect()
}

/// Applies each sector's move to the absolute value held in it and ranks
/// sectors by the size of the resulting gain or loss.
pub fn portfolio_impact(exposure: &SectorExposureMap, profiles: &[SectorProfile]) -> PortfolioImpact {
    let mut sectors: Vec<SectorImpact> = exposure
        .iter()
        .zip(profiles)
        .map(|(e, profile)| SectorImpact {
            sector: e.sector.clone(),
            value: round2(e.value),
            performance: profile.performance,
            impact: e.value * profile.performance / 100.0,
        })
        .collect();

    let total_positive: f64 = sectors.iter().map(|s| s.impact).filter(|i| *i > 0.0).sum();
    let total_negative: f64 = sectors.iter().map(|s| s.impact).filter(|i| *i < 0.0).sum();

    sectors.sort_by(|a, b| by_magnitude_desc(a.impact, b.impact));
    for s in &mut sectors {
        s.impact = round2(s.impact);
    }

    PortfolioImpact {
        total_positive: round2(total_positive),
        total_negative: round2(total_negative),
        net: round2(total_positive + total_negative),
        sectors,
    }
}

/// Headlines relevant to the user's sectors and fund categories. The generic
/// market headline always leads; at most [`MAX_NEWS_ITEMS`] are returned.
pub fn personalized_news(
    exposure: &SectorExposureMap,
    fund_categories: &[FundCategory],
    reference: &ReferenceData,
) -> Vec<NewsItem> {
    let mut items: Vec<NewsItem> = reference
        .news
        .iter()
        .filter_map(|template| {
            let relevance = match template.trigger {
                NewsTrigger::Always => None,
                NewsTrigger::Sector(sector) if exposure.contains(sector) => Some(sector.to_string()),
                NewsTrigger::Fund(category) if fund_categories.contains(&category) => {
                    Some(category.to_string())
                }
                _ => return None,
            };
            Some(NewsItem {
                title: template.title.to_string(),
                summary: template.summary.to_string(),
                source: template.source.to_string(),
                sentiment: template.sentiment,
                relevance,
            })
        })
        .collect();

    // Generic headlines sort ahead of gated ones; order is otherwise stable.
    items.sort_by_key(|item| item.relevance.is_some());
    items.truncate(MAX_NEWS_ITEMS);
    items
}

fn held_fund_categories(ctx: &UserContext) -> Vec<FundCategory> {
    let funds = &ctx.portfolio.mutual_funds;
    let fund_value: f64 = funds.iter().map(|f| f.current_value()).sum();
    match category_exposure(funds, fund_value) {
        Ok(categories) => categories.into_iter().map(|c| c.category).collect(),
        Err(_) => funds.iter().map(|f| f.fund_category()).collect(),
    }
}

fn weighted_performance(sectors: &[SectorInsight]) -> f64 {
    sectors
        .iter()
        .map(|s| s.exposure * s.performance / 100.0)
        .sum()
}
