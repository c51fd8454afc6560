//! Typed engine settings resolved from configuration.

use std::fmt;

use crate::domain::config_validation::{present, validate_engine_config};
use crate::domain::context::{ProfileDefaults, RiskTolerance};
use crate::domain::error::WealthError;
use crate::domain::market_analysis::{UnknownSectorPolicy, DEFAULT_CHART_DAYS};
use crate::domain::rebalance::DEFAULT_REBALANCE_TOLERANCE;
use crate::domain::recommendation::MAX_RECOMMENDATIONS;
use crate::ports::config_port::ConfigPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<OutputFormat> {
        match value.trim().to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub profile_defaults: ProfileDefaults,
    /// `None` seeds from entropy.
    pub seed: Option<u64>,
    pub unknown_sector_policy: UnknownSectorPolicy,
    pub chart_days: usize,
    pub max_recommendations: usize,
    pub rebalance_tolerance: f64,
    pub output_format: OutputFormat,
    pub pretty: bool,
    pub template_path: Option<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            profile_defaults: ProfileDefaults::default(),
            seed: None,
            unknown_sector_policy: UnknownSectorPolicy::default(),
            chart_days: DEFAULT_CHART_DAYS,
            max_recommendations: MAX_RECOMMENDATIONS,
            rebalance_tolerance: DEFAULT_REBALANCE_TOLERANCE,
            output_format: OutputFormat::default(),
            pretty: true,
            template_path: None,
        }
    }
}

impl EngineSettings {
    /// Validates `config` and builds settings, falling back to defaults for
    /// absent keys.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, WealthError> {
        validate_engine_config(config)?;
        let defaults = EngineSettings::default();

        let risk_tolerance = present(config, "profile", "default_risk_tolerance")?
            .as_deref()
            .and_then(RiskTolerance::parse)
            .unwrap_or(defaults.profile_defaults.risk_tolerance);
        let seed = present(config, "analysis", "seed")?
            .map(|raw| raw.parse::<u64>())
            .transpose()
            .map_err(|_| WealthError::config_invalid("analysis", "seed", "seed must be a non-negative integer"))?;
        let unknown_sector_policy = present(config, "analysis", "unknown_sector_performance")?
            .as_deref()
            .and_then(UnknownSectorPolicy::parse)
            .unwrap_or(defaults.unknown_sector_policy);
        let output_format = present(config, "output", "format")?
            .as_deref()
            .and_then(OutputFormat::parse)
            .unwrap_or(defaults.output_format);

        Ok(EngineSettings {
            profile_defaults: ProfileDefaults {
                age: config.get_int("profile", "default_age", defaults.profile_defaults.age as i64)
                    as u32,
                risk_tolerance,
            },
            seed,
            unknown_sector_policy,
            chart_days: config.get_int("analysis", "chart_days", defaults.chart_days as i64) as usize,
            max_recommendations: config.get_int(
                "recommendations",
                "max_recommendations",
                defaults.max_recommendations as i64,
            ) as usize,
            rebalance_tolerance: config.get_double(
                "recommendations",
                "rebalance_tolerance",
                defaults.rebalance_tolerance,
            ),
            output_format,
            pretty: config.get_bool("output", "pretty", defaults.pretty),
            template_path: present(config, "output", "template")?,
        })
    }
}
