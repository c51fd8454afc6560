//! Portfolio-specific market sentiment score.

use serde::Serialize;
use std::fmt;

use super::context::RiskTolerance;
use super::reference::ReferenceData;

pub const SENTIMENT_BASE: f64 = 65.0;
pub const MAX_FACTORS: usize = 4;

const HIGH_EQUITY_PCT: f64 = 70.0;
const LOW_EQUITY_PCT: f64 = 40.0;
const BULLISH_ABOVE: f64 = 70.0;
const BEARISH_BELOW: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Bullish,
    Neutral,
    Bearish,
}

impl SentimentLabel {
    pub fn classify(score: f64) -> SentimentLabel {
        if score > BULLISH_ABOVE {
            SentimentLabel::Bullish
        } else if score < BEARISH_BELOW {
            SentimentLabel::Bearish
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentLabel::Bullish => write!(f, "bullish"),
            SentimentLabel::Neutral => write!(f, "neutral"),
            SentimentLabel::Bearish => write!(f, "bearish"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSentiment {
    pub score: f64,
    pub label: SentimentLabel,
    pub factors: Vec<String>,
}

/// Inputs the score depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentInputs {
    pub base: f64,
    pub effective_equity_pct: f64,
    pub risk_tolerance: RiskTolerance,
    /// Exposure-weighted performance of the user's sectors, in percent.
    pub weighted_sector_performance: f64,
}

/// Base score plus fixed deltas, clamped to `[0, 100]`.
///
/// Portfolio-specific factors come first; the static market factors fill the
/// list up to [`MAX_FACTORS`].
pub fn score_sentiment(inputs: &SentimentInputs, reference: &ReferenceData) -> MarketSentiment {
    let mut score = inputs.base;
    let mut factors = Vec::new();

    if inputs.effective_equity_pct > HIGH_EQUITY_PCT {
        score += 10.0;
        factors.push("High equity allocation positions the portfolio to ride market momentum".to_string());
    } else if inputs.effective_equity_pct < LOW_EQUITY_PCT {
        score -= 10.0;
        factors.push("Low equity allocation limits participation in the rally".to_string());
    }

    match inputs.risk_tolerance {
        RiskTolerance::Aggressive => {
            score += 5.0;
            factors.push("Aggressive risk profile supports growth-oriented positioning".to_string());
        }
        RiskTolerance::Conservative => {
            score -= 5.0;
            factors.push("Conservative risk profile favours capital preservation".to_string());
        }
        RiskTolerance::Moderate => {}
    }

    if inputs.weighted_sector_performance > 0.0 {
        score += 5.0;
        factors.push("Your sectors are outperforming on a weighted basis".to_string());
    } else if inputs.weighted_sector_performance < 0.0 {
        score -= 5.0;
        factors.push("Your sectors are lagging on a weighted basis".to_string());
    }

    factors.extend(reference.market_factors.iter().map(|f| f.to_string()));
    factors.truncate(MAX_FACTORS);

    let score = if score.is_finite() { score.clamp(0.0, 100.0) } else { 0.0 };

    MarketSentiment {
        score,
        label: SentimentLabel::classify(score),
        factors,
    }
}
