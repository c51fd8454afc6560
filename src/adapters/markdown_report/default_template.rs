//! Built-in Markdown report template.
//!
//! Placeholders are `{{NAME}}` markers resolved by [`super::resolve`]. A custom
//! template may use any subset of them; unknown markers are left untouched.

pub const DEFAULT_TEMPLATE: &str = r#"# Portfolio Insight Report

_As of {{AS_OF}} · {{PROFILE}}_

## Portfolio Summary

{{PORTFOLIO_SUMMARY}}

## Market Sentiment

{{MARKET_SENTIMENT}}

## Sector Outlook

{{SECTOR_TABLE}}

## Portfolio Impact

{{PORTFOLIO_IMPACT}}

## Fund Categories

{{CATEGORY_TABLE}}

## Benchmark Chart

{{CHART}}

## News For You

{{NEWS}}

## Recommendations

{{RECOMMENDATIONS}}

## Rebalancing

{{REBALANCE_TABLE}}

## Goals

{{GOALS}}
"#;

/// Every marker the resolver knows about.
pub const PLACEHOLDERS: &[&str] = &[
    "{{AS_OF}}",
    "{{PROFILE}}",
    "{{PORTFOLIO_SUMMARY}}",
    "{{MARKET_SENTIMENT}}",
    "{{SECTOR_TABLE}}",
    "{{PORTFOLIO_IMPACT}}",
    "{{CATEGORY_TABLE}}",
    "{{CHART}}",
    "{{NEWS}}",
    "{{RECOMMENDATIONS}}",
    "{{REBALANCE_TABLE}}",
    "{{GOALS}}",
];
