//! Property tests for the engine invariants.

mod common;

use approx::assert_relative_eq;
use common::*;
use proptest::prelude::*;
use wealthwise::domain::context::{AssetAllocation, PortfolioSummary, RiskTolerance};
use wealthwise::domain::exposure::equity_sector_exposure;
use wealthwise::domain::holding::StockHolding;
use wealthwise::domain::ranking::Priority;
use wealthwise::domain::recommendation::{
    analyze_asset_allocation, generate_recommendations, rank_recommendations, target_equity_pct,
    Recommendation, RecommendationCategory, RecommendationOptions, RecommendationType,
    MAX_RECOMMENDATIONS,
};
use wealthwise::domain::reference::reference;
use wealthwise::domain::sentiment::{score_sentiment, SentimentInputs};

const SYMBOLS: [&str; 8] = ["HDFCBANK", "TCS", "INFY", "SUNPHARMA", "RELIANCE", "ICICIBANK", "ZZZLTD", "ABCXYZ"];

fn risk_strategy() -> impl Strategy<Value = RiskTolerance> {
    prop_oneof![
        Just(RiskTolerance::Conservative),
        Just(RiskTolerance::Moderate),
        Just(RiskTolerance::Aggressive),
    ]
}

fn priority_strategy() -> impl Strategy<Value = Priority> {
    prop_oneof![Just(Priority::High), Just(Priority::Medium), Just(Priority::Low)]
}

fn stocks_strategy() -> impl Strategy<Value = Vec<StockHolding>> {
    prop::collection::vec((0usize..SYMBOLS.len(), 1.0f64..1_000.0, 1.0f64..5_000.0), 1..12).prop_map(
        |rows| {
            rows.into_iter()
                .map(|(i, qty, price)| StockHolding::new(SYMBOLS[i], qty, price, price))
                .collect()
        },
    )
}

fn rec(priority: Priority, impact_score: f64) -> Recommendation {
    Recommendation {
        id: format!("{priority}-{impact_score}"),
        kind: RecommendationType::Review,
        category: RecommendationCategory::FundPerformance,
        title: String::new(),
        description: String::new(),
        priority,
        impact_score,
        current_allocation: None,
        recommended_allocation: None,
        suggested_amount: None,
        reasoning: Vec::new(),
    }
}

proptest! {
    #[test]
    fn sector_percentages_sum_to_100(stocks in stocks_strategy()) {
        let exposure = equity_sector_exposure(&stocks).unwrap();
        assert_relative_eq!(exposure.total_percentage(), 100.0, epsilon = 1e-6);
        for pair in exposure.sectors.windows(2) {
            prop_assert!(pair[0].percentage >= pair[1].percentage);
        }
    }

    #[test]
    fn sentiment_score_is_clamped(
        base in -500.0f64..500.0,
        equity in 0.0f64..100.0,
        performance in -20.0f64..20.0,
        risk in risk_strategy(),
    ) {
        let sentiment = score_sentiment(
            &SentimentInputs {
                base,
                effective_equity_pct: equity,
                risk_tolerance: risk,
                weighted_sector_performance: performance,
            },
            reference(),
        );
        prop_assert!((0.0..=100.0).contains(&sentiment.score));
        prop_assert!(sentiment.factors.len() <= 4);
    }

    #[test]
    fn allocation_advice_iff_gap_exceeds_ten(
        stocks_pct in 0.0f64..100.0,
        age in 18u32..90,
        risk in risk_strategy(),
    ) {
        let summary = PortfolioSummary {
            total_investment: 100_000.0,
            total_current_value: 100_000.0,
            total_gain_loss: 0.0,
            asset_allocation: AssetAllocation {
                stocks_percentage: stocks_pct,
                mutual_funds_percentage: 100.0 - stocks_pct,
            },
        };
        let gap = (summary.effective_equity_pct() - target_equity_pct(age, risk)).abs();
        let recs = analyze_asset_allocation(&summary, age, risk);
        prop_assert_eq!(recs.len() == 1, gap > 10.0);
        if let Some(r) = recs.first() {
            prop_assert_eq!(r.priority == Priority::High, gap > 20.0);
            prop_assert!(r.impact_score <= 100.0);
        }
    }

    #[test]
    fn ranking_is_sorted_and_capped(
        items in prop::collection::vec((priority_strategy(), 0.0f64..100.0), 0..20),
    ) {
        let recs: Vec<Recommendation> = items.into_iter().map(|(p, s)| rec(p, s)).collect();
        let input_len = recs.len();
        let ranked = rank_recommendations(recs, MAX_RECOMMENDATIONS);
        prop_assert_eq!(ranked.len(), input_len.min(MAX_RECOMMENDATIONS));
        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(
                a.priority.rank() > b.priority.rank()
                    || (a.priority == b.priority && a.impact_score >= b.impact_score)
            );
        }
    }

    #[test]
    fn generated_recommendations_never_exceed_cap(stocks in stocks_strategy(), age in 18u32..90) {
        let ctx = context(stocks, Vec::new(), Some(age), None);
        let recs = generate_recommendations(&ctx, &RecommendationOptions::new(as_of()));
        prop_assert!(recs.len() <= MAX_RECOMMENDATIONS);
        prop_assert!(recs.iter().all(|r| (0.0..=100.0).contains(&r.impact_score)));
    }
}
