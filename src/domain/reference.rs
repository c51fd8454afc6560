//! Static reference tables.
//!
//! Sector outlooks, the symbol→sector map, fund keyword classifiers, target
//! allocation profiles and news templates. The tables are built once on first
//! use and shared immutably; engines receive them as `&ReferenceData` so tests
//! can substitute their own.
//!
//! Sector performance figures are editorial placeholders, not live market
//! data.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use super::context::RiskTolerance;
use super::holding::FundCategory;
use super::rebalance::AssetBucket;

pub const OTHER_SECTOR: &str = "Other";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outlook {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for Outlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outlook::Positive => write!(f, "positive"),
            Outlook::Neutral => write!(f, "neutral"),
            Outlook::Negative => write!(f, "negative"),
        }
    }
}

/// One row of the sector table. `performance` is the recent move in percent
/// and is the single source for both commentary and impact figures.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorProfile {
    pub performance: f64,
    pub outlook: Outlook,
    pub recommendation: String,
    pub reasoning: String,
}

impl SectorProfile {
    fn new(performance: f64, outlook: Outlook, recommendation: &str, reasoning: &str) -> Self {
        SectorProfile {
            performance,
            outlook,
            recommendation: recommendation.to_string(),
            reasoning: reasoning.to_string(),
        }
    }

    /// Record used for sectors missing from the table.
    pub fn neutral(performance: f64) -> Self {
        SectorProfile::new(
            performance,
            Outlook::Neutral,
            "Hold",
            "Limited sector coverage; track company-specific developments.",
        )
    }
}

/// What makes a news template relevant to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsTrigger {
    Always,
    Sector(&'static str),
    Fund(FundCategory),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsTemplate {
    pub trigger: NewsTrigger,
    pub title: &'static str,
    pub summary: &'static str,
    pub source: &'static str,
    pub sentiment: Outlook,
}

/// Keyword → category, checked in order.
pub const FUND_CATEGORY_KEYWORDS: &[(&str, FundCategory)] = &[
    ("gold", FundCategory::Gold),
    ("international", FundCategory::International),
    ("global", FundCategory::International),
    ("nasdaq", FundCategory::International),
    ("overseas", FundCategory::International),
    ("s&p 500", FundCategory::International),
    ("us equity", FundCategory::International),
    ("liquid", FundCategory::Liquid),
    ("overnight", FundCategory::Liquid),
    ("money market", FundCategory::Liquid),
    ("debt", FundCategory::Debt),
    ("bond", FundCategory::Debt),
    ("gilt", FundCategory::Debt),
    ("corporate", FundCategory::Debt),
    ("duration", FundCategory::Debt),
    ("credit risk", FundCategory::Debt),
    ("banking & psu", FundCategory::Debt),
    ("income", FundCategory::Debt),
    ("hybrid", FundCategory::Hybrid),
    ("balanced", FundCategory::Hybrid),
    ("arbitrage", FundCategory::Hybrid),
    ("equity savings", FundCategory::Hybrid),
    ("multi asset", FundCategory::Hybrid),
    ("elss", FundCategory::Elss),
    ("tax saver", FundCategory::Elss),
    ("tax saving", FundCategory::Elss),
    ("small cap", FundCategory::SmallCap),
    ("smallcap", FundCategory::SmallCap),
    ("mid cap", FundCategory::MidCap),
    ("midcap", FundCategory::MidCap),
    ("emerging equity", FundCategory::MidCap),
    ("large cap", FundCategory::LargeCap),
    ("largecap", FundCategory::LargeCap),
    ("bluechip", FundCategory::LargeCap),
    ("blue chip", FundCategory::LargeCap),
    ("top 100", FundCategory::LargeCap),
    ("flexi cap", FundCategory::FlexiCap),
    ("flexicap", FundCategory::FlexiCap),
    ("multi cap", FundCategory::FlexiCap),
    ("multicap", FundCategory::FlexiCap),
    ("focused", FundCategory::FlexiCap),
    ("index", FundCategory::Index),
    ("nifty", FundCategory::Index),
    ("sensex", FundCategory::Index),
    ("etf", FundCategory::Index),
];

/// Scheme-name prefix → fund house.
pub const FUND_HOUSE_KEYWORDS: &[(&str, &str)] = &[
    ("parag parikh", "PPFAS Mutual Fund"),
    ("hdfc", "HDFC Mutual Fund"),
    ("icici", "ICICI Prudential Mutual Fund"),
    ("sbi", "SBI Mutual Fund"),
    ("axis", "Axis Mutual Fund"),
    ("kotak", "Kotak Mahindra Mutual Fund"),
    ("nippon", "Nippon India Mutual Fund"),
    ("aditya birla", "Aditya Birla Sun Life Mutual Fund"),
    ("mirae", "Mirae Asset Mutual Fund"),
    ("uti", "UTI Mutual Fund"),
    ("dsp", "DSP Mutual Fund"),
    ("tata", "Tata Mutual Fund"),
    ("motilal oswal", "Motilal Oswal Mutual Fund"),
    ("canara robeco", "Canara Robeco Mutual Fund"),
    ("franklin", "Franklin Templeton Mutual Fund"),
];

const SYMBOL_SECTORS: &[(&str, &str)] = &[
    ("HDFCBANK", "Banking"),
    ("ICICIBANK", "Banking"),
    ("SBIN", "Banking"),
    ("KOTAKBANK", "Banking"),
    ("AXISBANK", "Banking"),
    ("INDUSINDBK", "Banking"),
    ("TCS", "IT"),
    ("INFY", "IT"),
    ("WIPRO", "IT"),
    ("HCLTECH", "IT"),
    ("TECHM", "IT"),
    ("LTIM", "IT"),
    ("SUNPHARMA", "Pharma"),
    ("DRREDDY", "Pharma"),
    ("CIPLA", "Pharma"),
    ("DIVISLAB", "Pharma"),
    ("HINDUNILVR", "FMCG"),
    ("ITC", "FMCG"),
    ("NESTLEIND", "FMCG"),
    ("BRITANNIA", "FMCG"),
    ("MARUTI", "Auto"),
    ("TATAMOTORS", "Auto"),
    ("M&M", "Auto"),
    ("BAJAJ-AUTO", "Auto"),
    ("EICHERMOT", "Auto"),
    ("RELIANCE", "Energy"),
    ("ONGC", "Energy"),
    ("NTPC", "Energy"),
    ("POWERGRID", "Energy"),
    ("BPCL", "Energy"),
    ("TATASTEEL", "Metals"),
    ("HINDALCO", "Metals"),
    ("JSWSTEEL", "Metals"),
    ("BHARTIARTL", "Telecom"),
    ("LT", "Infrastructure"),
    ("ADANIPORTS", "Infrastructure"),
    ("BAJFINANCE", "Financial Services"),
    ("BAJAJFINSV", "Financial Services"),
    ("HDFCLIFE", "Financial Services"),
    ("ASIANPAINT", "Consumer Durables"),
    ("TITAN", "Consumer Durables"),
    ("ULTRACEMCO", "Cement"),
    ("GRASIM", "Cement"),
    ("DLF", "Realty"),
];

const MARKET_FACTORS: &[&str] = &[
    "Domestic institutional inflows remain steady",
    "RBI policy stance keeps liquidity supportive",
    "Global cues mixed on the US rate outlook",
    "Quarterly earnings broadly in line with estimates",
];

const NEWS_TEMPLATES: &[NewsTemplate] = &[
    NewsTemplate {
        trigger: NewsTrigger::Always,
        title: "Nifty 50 consolidates near record highs as breadth stays positive",
        summary: "Benchmarks traded in a narrow range with midcaps outperforming; analysts expect stock-specific moves ahead of earnings.",
        source: "Market Wrap",
        sentiment: Outlook::Neutral,
    },
    NewsTemplate {
        trigger: NewsTrigger::Sector("Banking"),
        title: "RBI holds repo rate; private lenders rally on credit growth outlook",
        summary: "A steady rate stance and healthy loan growth support net interest margins for large private banks.",
        source: "Banking Desk",
        sentiment: Outlook::Positive,
    },
    NewsTemplate {
        trigger: NewsTrigger::Sector("IT"),
        title: "IT services face muted deal ramp-ups amid cautious US client spending",
        summary: "Discretionary tech budgets remain tight; large-cap IT guidance points to a gradual second-half recovery.",
        source: "Tech Desk",
        sentiment: Outlook::Negative,
    },
    NewsTemplate {
        trigger: NewsTrigger::Sector("Pharma"),
        title: "Pharma exporters gain on US generic approvals",
        summary: "A strong approval pipeline and easing price erosion lift outlook for export-focused drug makers.",
        source: "Healthcare Desk",
        sentiment: Outlook::Positive,
    },
    NewsTemplate {
        trigger: NewsTrigger::Sector("Auto"),
        title: "Festive demand lifts passenger vehicle dispatches",
        summary: "Automakers report higher wholesale volumes, with SUVs driving the mix; two-wheeler recovery continues.",
        source: "Auto Desk",
        sentiment: Outlook::Positive,
    },
    NewsTemplate {
        trigger: NewsTrigger::Sector("Energy"),
        title: "Crude volatility weighs on refiners' margins",
        summary: "Swings in Brent prices keep refining and marketing margins under watch; power utilities stay resilient.",
        source: "Commodities Desk",
        sentiment: Outlook::Neutral,
    },
    NewsTemplate {
        trigger: NewsTrigger::Sector("FMCG"),
        title: "Rural consumption shows early signs of revival",
        summary: "Volume growth improves for staples makers as input costs stabilise.",
        source: "Consumer Desk",
        sentiment: Outlook::Neutral,
    },
    NewsTemplate {
        trigger: NewsTrigger::Sector("Metals"),
        title: "Steel prices soften on weak global demand",
        summary: "Cheaper imports and slower construction activity in China pressure domestic steel realisations.",
        source: "Commodities Desk",
        sentiment: Outlook::Negative,
    },
    NewsTemplate {
        trigger: NewsTrigger::Fund(FundCategory::SmallCap),
        title: "Small-cap valuations stretched, fund houses moderate inflows",
        summary: "Several AMCs have paused lump-sum subscriptions in small-cap schemes citing elevated valuations.",
        source: "Mutual Fund Desk",
        sentiment: Outlook::Negative,
    },
    NewsTemplate {
        trigger: NewsTrigger::Fund(FundCategory::Debt),
        title: "Bond yields ease as inflation cools",
        summary: "Falling yields support mark-to-market gains in duration funds; short-term debt remains attractive.",
        source: "Fixed Income Desk",
        sentiment: Outlook::Positive,
    },
    NewsTemplate {
        trigger: NewsTrigger::Fund(FundCategory::Gold),
        title: "Gold holds firm on central bank buying",
        summary: "Sustained purchases by central banks and geopolitical risk keep gold near record levels.",
        source: "Commodities Desk",
        sentiment: Outlook::Positive,
    },
    NewsTemplate {
        trigger: NewsTrigger::Fund(FundCategory::International),
        title: "Overseas fund-of-funds near industry limit on foreign investment",
        summary: "Some international schemes have restricted fresh inflows as the industry-wide overseas cap approaches.",
        source: "Mutual Fund Desk",
        sentiment: Outlook::Neutral,
    },
];

/// Target allocation in percent per bucket. Each profile sums to 100.
const CONSERVATIVE_TARGETS: [(AssetBucket, f64); 6] = [
    (AssetBucket::LargeCap, 30.0),
    (AssetBucket::MidCap, 10.0),
    (AssetBucket::SmallCap, 5.0),
    (AssetBucket::Debt, 45.0),
    (AssetBucket::International, 0.0),
    (AssetBucket::Gold, 10.0),
];

const MODERATE_TARGETS: [(AssetBucket, f64); 6] = [
    (AssetBucket::LargeCap, 40.0),
    (AssetBucket::MidCap, 15.0),
    (AssetBucket::SmallCap, 10.0),
    (AssetBucket::Debt, 25.0),
    (AssetBucket::International, 5.0),
    (AssetBucket::Gold, 5.0),
];

const AGGRESSIVE_TARGETS: [(AssetBucket, f64); 6] = [
    (AssetBucket::LargeCap, 40.0),
    (AssetBucket::MidCap, 20.0),
    (AssetBucket::SmallCap, 20.0),
    (AssetBucket::Debt, 10.0),
    (AssetBucket::International, 5.0),
    (AssetBucket::Gold, 5.0),
];

#[derive(Debug, Clone)]
pub struct ReferenceData {
    sectors: HashMap<String, (String, SectorProfile)>,
    symbol_sectors: HashMap<&'static str, &'static str>,
    pub market_factors: Vec<&'static str>,
    pub news: Vec<NewsTemplate>,
}

static BUILTIN: LazyLock<ReferenceData> = LazyLock::new(ReferenceData::builtin);

/// The process-wide built-in tables.
pub fn reference() -> &'static ReferenceData {
    &BUILTIN
}

impl ReferenceData {
    pub fn builtin() -> Self {
        let mut data = ReferenceData {
            sectors: HashMap::new(),
            symbol_sectors: SYMBOL_SECTORS.iter().copied().collect(),
            market_factors: MARKET_FACTORS.to_vec(),
            news: NEWS_TEMPLATES.to_vec(),
        };

        data.insert_sector(
            "Banking",
            SectorProfile::new(
                1.8,
                Outlook::Positive,
                "Accumulate",
                "Stable asset quality and steady credit growth support earnings.",
            ),
        );
        data.insert_sector(
            "IT",
            SectorProfile::new(
                -1.2,
                Outlook::Negative,
                "Hold",
                "Slow deal conversion and weak discretionary spend in key markets.",
            ),
        );
        data.insert_sector(
            "Pharma",
            SectorProfile::new(
                2.1,
                Outlook::Positive,
                "Accumulate",
                "US generic approvals and domestic formulation growth remain strong.",
            ),
        );
        data.insert_sector(
            "FMCG",
            SectorProfile::new(
                0.4,
                Outlook::Neutral,
                "Hold",
                "Rural recovery is gradual; valuations already price in a rebound.",
            ),
        );
        data.insert_sector(
            "Auto",
            SectorProfile::new(
                1.5,
                Outlook::Positive,
                "Accumulate",
                "Festive demand and premiumisation lift volumes and margins.",
            ),
        );
        data.insert_sector(
            "Energy",
            SectorProfile::new(
                -0.6,
                Outlook::Neutral,
                "Hold",
                "Crude volatility clouds refining margins; utilities remain steady.",
            ),
        );
        data.insert_sector(
            "Metals",
            SectorProfile::new(
                -2.3,
                Outlook::Negative,
                "Reduce",
                "Soft global demand and cheaper imports pressure realisations.",
            ),
        );
        data.insert_sector(
            "Telecom",
            SectorProfile::new(
                0.9,
                Outlook::Positive,
                "Hold",
                "Tariff hikes are improving average revenue per user.",
            ),
        );
        data.insert_sector(
            "Infrastructure",
            SectorProfile::new(
                1.1,
                Outlook::Positive,
                "Accumulate",
                "Government capex keeps order books healthy.",
            ),
        );
        data.insert_sector(
            "Financial Services",
            SectorProfile::new(
                0.7,
                Outlook::Neutral,
                "Hold",
                "Unsecured lending curbs slow growth; insurers see steady premiums.",
            ),
        );
        data.insert_sector(
            "Consumer Durables",
            SectorProfile::new(
                0.2,
                Outlook::Neutral,
                "Hold",
                "Demand is steady but valuations leave little room for upside.",
            ),
        );
        data.insert_sector(
            "Cement",
            SectorProfile::new(
                -0.3,
                Outlook::Neutral,
                "Hold",
                "Capacity additions temper pricing despite infrastructure demand.",
            ),
        );
        data.insert_sector(
            "Realty",
            SectorProfile::new(
                1.9,
                Outlook::Positive,
                "Hold",
                "Housing sales remain strong but the sector is rate sensitive.",
            ),
        );

        data
    }

    /// Adds or replaces a sector row. Lookups are case-insensitive.
    pub fn insert_sector(&mut self, name: &str, profile: SectorProfile) {
        self.sectors
            .insert(name.to_lowercase(), (name.to_string(), profile));
    }

    pub fn sector_profile(&self, name: &str) -> Option<&SectorProfile> {
        self.sectors
            .get(&name.to_lowercase())
            .map(|(_, profile)| profile)
    }

    pub fn sector_for_symbol(&self, symbol: &str) -> Option<&'static str> {
        self.symbol_sectors
            .get(symbol.trim().to_uppercase().as_str())
            .copied()
    }

    pub fn target_allocation(&self, risk: RiskTolerance) -> &'static [(AssetBucket, f64); 6] {
        match risk {
            RiskTolerance::Conservative => &CONSERVATIVE_TARGETS,
            RiskTolerance::Moderate => &MODERATE_TARGETS,
            RiskTolerance::Aggressive => &AGGRESSIVE_TARGETS,
        }
    }
}
