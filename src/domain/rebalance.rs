//! Rebalance snapshot: current vs. target allocation across broad buckets.
//!
//! Funds are bucketed by category; every stock is treated as large cap. The
//! target comes from the static profile for the user's risk tolerance. The
//! snapshot is reported alongside recommendations but never ranked with them.

use serde::Serialize;
use std::fmt;

use super::context::{ProfileDefaults, RiskTolerance, UserContext};
use super::holding::{percent_of, round2, FundCategory};
use super::reference::ReferenceData;

pub const DEFAULT_REBALANCE_TOLERANCE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetBucket {
    LargeCap,
    MidCap,
    SmallCap,
    Debt,
    International,
    Gold,
}

impl AssetBucket {
    pub const ALL: [AssetBucket; 6] = [
        AssetBucket::LargeCap,
        AssetBucket::MidCap,
        AssetBucket::SmallCap,
        AssetBucket::Debt,
        AssetBucket::International,
        AssetBucket::Gold,
    ];

    /// Diversified equity categories without a cap tilt count as large cap.
    pub fn for_fund(category: FundCategory) -> AssetBucket {
        match category {
            FundCategory::MidCap => AssetBucket::MidCap,
            FundCategory::SmallCap => AssetBucket::SmallCap,
            FundCategory::Debt | FundCategory::Liquid => AssetBucket::Debt,
            FundCategory::International => AssetBucket::International,
            FundCategory::Gold => AssetBucket::Gold,
            FundCategory::LargeCap
            | FundCategory::FlexiCap
            | FundCategory::Elss
            | FundCategory::Index
            | FundCategory::Hybrid
            | FundCategory::Other => AssetBucket::LargeCap,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AssetBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AssetBucket::LargeCap => "Large Cap",
            AssetBucket::MidCap => "Mid Cap",
            AssetBucket::SmallCap => "Small Cap",
            AssetBucket::Debt => "Debt",
            AssetBucket::International => "International",
            AssetBucket::Gold => "Gold",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RebalanceAction {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for RebalanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebalanceAction::Buy => write!(f, "buy"),
            RebalanceAction::Sell => write!(f, "sell"),
            RebalanceAction::Hold => write!(f, "hold"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketAllocation {
    pub bucket: AssetBucket,
    pub current_value: f64,
    pub current_percentage: f64,
    pub target_percentage: f64,
    /// Current minus target, in percentage points.
    pub deviation: f64,
    pub action: RebalanceAction,
    /// Rupees to move to close the gap; 0 for `Hold`.
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RebalanceSnapshot {
    pub risk_tolerance: RiskTolerance,
    pub total_value: f64,
    pub tolerance: f64,
    pub buckets: Vec<BucketAllocation>,
}

impl RebalanceSnapshot {
    pub fn bucket(&self, bucket: AssetBucket) -> Option<&BucketAllocation> {
        self.buckets.iter().find(|b| b.bucket == bucket)
    }

    pub fn needs_rebalancing(&self) -> bool {
        self.buckets.iter().any(|b| b.action != RebalanceAction::Hold)
    }
}

/// Buckets every holding and compares against the risk profile's targets.
///
/// An empty or zero-valued portfolio reports 0% everywhere; targets beyond
/// the tolerance become a `Buy` of amount 0.
pub fn rebalance_snapshot(
    ctx: &UserContext,
    reference: &ReferenceData,
    defaults: &ProfileDefaults,
    tolerance: f64,
) -> RebalanceSnapshot {
    let risk = ctx.risk_tolerance(defaults);
    let portfolio = &ctx.portfolio;

    let mut values = [0.0_f64; 6];
    values[AssetBucket::LargeCap.index()] += portfolio.stock_value();
    for fund in &portfolio.mutual_funds {
        values[AssetBucket::for_fund(fund.fund_category()).index()] += fund.current_value();
    }
    let total_value: f64 = values.iter().sum();

    let buckets = reference
        .target_allocation(risk)
        .iter()
        .map(|&(bucket, target)| {
            let current_value = values[bucket.index()];
            let current_percentage = percent_of(current_value, total_value);
            let deviation = current_percentage - target;
            let action = if deviation > tolerance {
                RebalanceAction::Sell
            } else if deviation < -tolerance {
                RebalanceAction::Buy
            } else {
                RebalanceAction::Hold
            };
            let amount = match action {
                RebalanceAction::Hold => 0.0,
                _ => round2(deviation.abs() * total_value / 100.0),
            };
            BucketAllocation {
                bucket,
                current_value: round2(current_value),
                current_percentage: round2(current_percentage),
                target_percentage: target,
                deviation: round2(deviation),
                action,
                amount,
            }
        })
        .collect();

    RebalanceSnapshot {
        risk_tolerance: risk,
        total_value: round2(total_value),
        tolerance,
        buckets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::InvestmentProfile;
    use crate::domain::holding::{MutualFundHolding, StockHolding};

    fn context(risk: RiskTolerance) -> UserContext {
        let mut ctx = UserContext::default();
        ctx.investment_profile = InvestmentProfile {
            risk_tolerance: Some(risk),
        };
        ctx
    }

    fn snapshot(ctx: &UserContext) -> RebalanceSnapshot {
        rebalance_snapshot(
            ctx,
            &ReferenceData::builtin(),
            &ProfileDefaults::default(),
            DEFAULT_REBALANCE_TOLERANCE,
        )
    }

    #[test]
    fn fund_categories_map_to_buckets() {
        assert_eq!(AssetBucket::for_fund(FundCategory::Elss), AssetBucket::LargeCap);
        assert_eq!(AssetBucket::for_fund(FundCategory::Liquid), AssetBucket::Debt);
        assert_eq!(AssetBucket::for_fund(FundCategory::SmallCap), AssetBucket::SmallCap);
        assert_eq!(AssetBucket::for_fund(FundCategory::Other), AssetBucket::LargeCap);
    }

    #[test]
    fn all_stocks_count_as_large_cap() {
        let mut ctx = context(RiskTolerance::Moderate);
        ctx.portfolio.stocks = vec![
            StockHolding::new("TCS", 1.0, 500.0, 500.0),
            StockHolding::new("ZZZSMALL", 1.0, 500.0, 500.0),
        ];
        let snap = snapshot(&ctx);
        let large = snap.bucket(AssetBucket::LargeCap).unwrap();
        assert_eq!(large.current_percentage, 100.0);
        assert_eq!(large.deviation, 60.0);
        assert_eq!(large.action, RebalanceAction::Sell);
        assert_eq!(large.amount, 600.0);
        assert_eq!(snap.bucket(AssetBucket::Debt).unwrap().action, RebalanceAction::Buy);
        assert_eq!(snap.bucket(AssetBucket::Debt).unwrap().amount, 250.0);
    }

    #[test]
    fn within_tolerance_holds() {
        let mut ctx = context(RiskTolerance::Moderate);
        ctx.portfolio.mutual_funds = vec![
            MutualFundHolding::new("Axis Bluechip Fund", 42.0, 1.0, 1.0),
            MutualFundHolding::new("Kotak Emerging Equity Mid Cap Fund", 13.0, 1.0, 1.0),
            MutualFundHolding::new("Nippon India Small Cap Fund", 10.0, 1.0, 1.0),
            MutualFundHolding::new("HDFC Corporate Bond Fund", 25.0, 1.0, 1.0),
            MutualFundHolding::new("Motilal Oswal Nasdaq 100 International FoF", 5.0, 1.0, 1.0),
            MutualFundHolding::new("SBI Gold Fund", 5.0, 1.0, 1.0),
        ];
        let snap = snapshot(&ctx);
        assert_eq!(snap.total_value, 100.0);
        assert!(!snap.needs_rebalancing());
        for b in &snap.buckets {
            assert_eq!(b.amount, 0.0, "{} should hold", b.bucket);
        }
    }

    #[test]
    fn follows_risk_profile_targets() {
        let snap = snapshot(&context(RiskTolerance::Conservative));
        assert_eq!(snap.risk_tolerance, RiskTolerance::Conservative);
        assert_eq!(snap.bucket(AssetBucket::Debt).unwrap().target_percentage, 45.0);
        let total: f64 = snap.buckets.iter().map(|b| b.target_percentage).sum();
        assert_eq!(total, 100.0);
    }

    #[test]
    fn empty_portfolio_reports_zeroes() {
        let snap = snapshot(&UserContext::default());
        assert_eq!(snap.total_value, 0.0);
        assert_eq!(snap.buckets.len(), 6);
        assert!(snap.buckets.iter().all(|b| b.current_percentage == 0.0 && b.amount == 0.0));
        assert_eq!(snap.risk_tolerance, RiskTolerance::Moderate);
    }

    #[test]
    fn bucket_order_is_stable() {
        let snap = snapshot(&UserContext::default());
        let order: Vec<AssetBucket> = snap.buckets.iter().map(|b| b.bucket).collect();
        assert_eq!(order, AssetBucket::ALL.to_vec());
    }
}
