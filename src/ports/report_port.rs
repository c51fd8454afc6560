//! Report output port trait.

use crate::domain::error::WealthError;
use crate::domain::market_analysis::MarketAnalysis;
use crate::domain::report::{InsightReport, RecommendationSection};

/// Port for rendering reports to text.
pub trait ReportPort {
    fn render(&self, report: &InsightReport) -> Result<String, WealthError>;

    fn render_market(&self, market: &MarketAnalysis) -> Result<String, WealthError>;

    fn render_recommendations(&self, section: &RecommendationSection) -> Result<String, WealthError>;

    /// Renders the full report and writes it to `output_path`.
    fn write(&self, report: &InsightReport, output_path: &str) -> Result<(), WealthError> {
        let rendered = self.render(report)?;
        std::fs::write(output_path, rendered)?;
        Ok(())
    }
}
