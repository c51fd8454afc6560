//! Markdown report generation.
//!
//! Reads a template (the built-in default or a custom file), resolves every
//! `{{PLACEHOLDER}}` marker with a rendered section from `tables` or `chart`,
//! and returns the final document.

pub mod chart;
pub mod default_template;
pub mod tables;

use std::fs;
use std::path::Path;

use crate::domain::error::WealthError;
use crate::domain::market_analysis::MarketAnalysis;
use crate::domain::report::{InsightReport, RecommendationSection};
use crate::ports::report_port::ReportPort;

const MARKET_TEMPLATE: &str = r#"# Market Analysis

## Market Sentiment

{{MARKET_SENTIMENT}}

## Sector Outlook

{{SECTOR_TABLE}}

## Portfolio Impact

{{PORTFOLIO_IMPACT}}

## Benchmark Chart

{{CHART}}

## News For You

{{NEWS}}
"#;

const RECOMMENDATIONS_TEMPLATE: &str = r#"# Recommendations

{{RECOMMENDATIONS}}

## Rebalancing

{{REBALANCE_TABLE}}
"#;

pub struct MarkdownReportAdapter {
    template: String,
}

impl MarkdownReportAdapter {
    pub fn new() -> Self {
        Self {
            template: default_template::DEFAULT_TEMPLATE.to_string(),
        }
    }

    pub fn with_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn from_template_file<P: AsRef<Path>>(path: P) -> Result<Self, WealthError> {
        let template = fs::read_to_string(path.as_ref())?;
        tracing::debug!(template = %path.as_ref().display(), "loaded custom report template");
        Ok(Self::with_template(template))
    }
}

impl Default for MarkdownReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_market(template: &str, market: &MarketAnalysis) -> String {
    template
        .replace(
            "{{MARKET_SENTIMENT}}",
            &tables::render_sentiment(&market.market_sentiment),
        )
        .replace("{{SECTOR_TABLE}}", &tables::render_sector_table(&market.sectors))
        .replace(
            "{{PORTFOLIO_IMPACT}}",
            &tables::render_portfolio_impact(&market.portfolio_impact),
        )
        .replace(
            "{{CHART}}",
            &chart::render_chart(&market.chart_data, market.chart_is_synthetic),
        )
        .replace("{{NEWS}}", &tables::render_news(&market.news_summary))
}

fn resolve_recommendations(template: &str, section: &RecommendationSection) -> String {
    template
        .replace(
            "{{RECOMMENDATIONS}}",
            &tables::render_recommendations(&section.recommendations),
        )
        .replace(
            "{{REBALANCE_TABLE}}",
            &tables::render_rebalance_table(&section.rebalance_data),
        )
}

/// Resolve all `{{PLACEHOLDER}}`s in `template` against `report`.
pub fn resolve(template: &str, report: &InsightReport) -> String {
    let profile = format!(
        "age {}, {} risk tolerance",
        report.age, report.risk_tolerance
    );
    let output = template
        .replace("{{AS_OF}}", &report.as_of.to_string())
        .replace("{{PROFILE}}", &profile)
        .replace(
            "{{PORTFOLIO_SUMMARY}}",
            &tables::render_portfolio_summary(&report.portfolio_summary),
        )
        .replace(
            "{{CATEGORY_TABLE}}",
            &tables::render_category_table(&report.category_exposure),
        )
        .replace("{{GOALS}}", &tables::render_goals(&report.goal_progress));
    let output = resolve_market(&output, &report.market);
    resolve_recommendations(&output, &report.advice)
}

impl ReportPort for MarkdownReportAdapter {
    fn render(&self, report: &InsightReport) -> Result<String, WealthError> {
        Ok(resolve(&self.template, report))
    }

    fn render_market(&self, market: &MarketAnalysis) -> Result<String, WealthError> {
        Ok(resolve_market(MARKET_TEMPLATE, market))
    }

    fn render_recommendations(&self, section: &RecommendationSection) -> Result<String, WealthError> {
        Ok(resolve_recommendations(RECOMMENDATIONS_TEMPLATE, section))
    }
}
