//! JSON report adapter implementing ReportPort.

use serde::Serialize;

use crate::domain::error::WealthError;
use crate::domain::market_analysis::MarketAnalysis;
use crate::domain::report::{InsightReport, RecommendationSection};
use crate::ports::report_port::ReportPort;

pub struct JsonReportAdapter {
    pretty: bool,
}

impl JsonReportAdapter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String, WealthError> {
        let mut out = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        out.push('\n');
        Ok(out)
    }
}

impl ReportPort for JsonReportAdapter {
    fn render(&self, report: &InsightReport) -> Result<String, WealthError> {
        self.to_json(report)
    }

    fn render_market(&self, market: &MarketAnalysis) -> Result<String, WealthError> {
        self.to_json(market)
    }

    fn render_recommendations(&self, section: &RecommendationSection) -> Result<String, WealthError> {
        self.to_json(section)
    }
}
