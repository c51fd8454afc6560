//! Configuration validation.
//!
//! Checks every engine setting before a run. Absent keys are fine; keys that
//! are present must parse and sit inside their allowed range.

use crate::domain::context::RiskTolerance;
use crate::domain::error::WealthError;
use crate::domain::market_analysis::UnknownSectorPolicy;
use crate::domain::recommendation::MAX_RECOMMENDATIONS;
use crate::ports::config_port::ConfigPort;

pub const MIN_AGE: i64 = 18;
pub const MAX_AGE: i64 = 100;
pub const MAX_CHART_DAYS: i64 = 365;
pub const MAX_REBALANCE_TOLERANCE: f64 = 50.0;

pub fn validate_engine_config(config: &dyn ConfigPort) -> Result<(), WealthError> {
    validate_default_age(config)?;
    validate_default_risk_tolerance(config)?;
    validate_seed(config)?;
    validate_unknown_sector_performance(config)?;
    validate_chart_days(config)?;
    validate_max_recommendations(config)?;
    validate_rebalance_tolerance(config)?;
    validate_logging(config)?;
    validate_output(config)?;
    Ok(())
}

/// The raw value of a key, `None` when absent. A key written without a value
/// counts as missing.
pub(crate) fn present(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<String>, WealthError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Err(WealthError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
        Some(s) => Ok(Some(s.trim().to_string())),
    }
}

fn parse_int(section: &str, key: &str, raw: &str) -> Result<i64, WealthError> {
    raw.parse::<i64>()
        .map_err(|_| WealthError::config_invalid(section, key, format!("{key} must be an integer")))
}

fn parse_float(section: &str, key: &str, raw: &str) -> Result<f64, WealthError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| WealthError::config_invalid(section, key, format!("{key} must be a number")))
}

fn validate_default_age(config: &dyn ConfigPort) -> Result<(), WealthError> {
    if let Some(raw) = present(config, "profile", "default_age")? {
        let age = parse_int("profile", "default_age", &raw)?;
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(WealthError::config_invalid(
                "profile",
                "default_age",
                format!("default_age must be between {MIN_AGE} and {MAX_AGE}"),
            ));
        }
    }
    Ok(())
}

fn validate_default_risk_tolerance(config: &dyn ConfigPort) -> Result<(), WealthError> {
    if let Some(raw) = present(config, "profile", "default_risk_tolerance")? {
        if RiskTolerance::parse(&raw).is_none() {
            return Err(WealthError::config_invalid(
                "profile",
                "default_risk_tolerance",
                "default_risk_tolerance must be conservative, moderate or aggressive",
            ));
        }
    }
    Ok(())
}

fn validate_seed(config: &dyn ConfigPort) -> Result<(), WealthError> {
    if let Some(raw) = present(config, "analysis", "seed")? {
        raw.parse::<u64>().map_err(|_| {
            WealthError::config_invalid("analysis", "seed", "seed must be a non-negative integer")
        })?;
    }
    Ok(())
}

fn validate_unknown_sector_performance(config: &dyn ConfigPort) -> Result<(), WealthError> {
    if let Some(raw) = present(config, "analysis", "unknown_sector_performance")? {
        if UnknownSectorPolicy::parse(&raw).is_none() {
            return Err(WealthError::config_invalid(
                "analysis",
                "unknown_sector_performance",
                "unknown_sector_performance must be neutral or random",
            ));
        }
    }
    Ok(())
}

fn validate_chart_days(config: &dyn ConfigPort) -> Result<(), WealthError> {
    if let Some(raw) = present(config, "analysis", "chart_days")? {
        let days = parse_int("analysis", "chart_days", &raw)?;
        if !(1..=MAX_CHART_DAYS).contains(&days) {
            return Err(WealthError::config_invalid(
                "analysis",
                "chart_days",
                format!("chart_days must be between 1 and {MAX_CHART_DAYS}"),
            ));
        }
    }
    Ok(())
}

fn validate_max_recommendations(config: &dyn ConfigPort) -> Result<(), WealthError> {
    if let Some(raw) = present(config, "recommendations", "max_recommendations")? {
        let max = parse_int("recommendations", "max_recommendations", &raw)?;
        if !(1..=MAX_RECOMMENDATIONS as i64).contains(&max) {
            return Err(WealthError::config_invalid(
                "recommendations",
                "max_recommendations",
                format!("max_recommendations must be between 1 and {MAX_RECOMMENDATIONS}"),
            ));
        }
    }
    Ok(())
}

fn validate_rebalance_tolerance(config: &dyn ConfigPort) -> Result<(), WealthError> {
    if let Some(raw) = present(config, "recommendations", "rebalance_tolerance")? {
        let tolerance = parse_float("recommendations", "rebalance_tolerance", &raw)?;
        if !(0.0..=MAX_REBALANCE_TOLERANCE).contains(&tolerance) {
            return Err(WealthError::config_invalid(
                "recommendations",
                "rebalance_tolerance",
                format!("rebalance_tolerance must be between 0 and {MAX_REBALANCE_TOLERANCE}"),
            ));
        }
    }
    Ok(())
}

fn validate_logging(config: &dyn ConfigPort) -> Result<(), WealthError> {
    if let Some(raw) = present(config, "logging", "level")? {
        let known = ["trace", "debug", "info", "warn", "error"];
        if !known.contains(&raw.to_lowercase().as_str()) {
            return Err(WealthError::config_invalid(
                "logging",
                "level",
                "level must be one of trace, debug, info, warn, error",
            ));
        }
    }
    if let Some(raw) = present(config, "logging", "format")? {
        if !matches!(raw.to_lowercase().as_str(), "pretty" | "compact") {
            return Err(WealthError::config_invalid(
                "logging",
                "format",
                "format must be pretty or compact",
            ));
        }
    }
    Ok(())
}

fn validate_output(config: &dyn ConfigPort) -> Result<(), WealthError> {
    if let Some(raw) = present(config, "output", "format")? {
        if !matches!(raw.to_lowercase().as_str(), "json" | "markdown" | "md") {
            return Err(WealthError::config_invalid(
                "output",
                "format",
                "format must be json or markdown",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MockConfig {
        values: HashMap<(String, String), String>,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                values: HashMap::new(),
            }
        }

        fn set(mut self, section: &str, key: &str, value: &str) -> Self {
            self.values
                .insert((section.to_string(), key.to_string()), value.to_string());
            self
        }
    }

    impl ConfigPort for MockConfig {
        fn get_string(&self, section: &str, key: &str) -> Option<String> {
            self.values
                .get(&(section.to_string(), key.to_string()))
                .cloned()
        }

        fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
            self.get_string(section, key)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }

        fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
            self.get_string(section, key)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }

        fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
            self.get_string(section, key)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }
    }

    fn invalid_key(result: Result<(), WealthError>) -> String {
        match result {
            Err(WealthError::ConfigInvalid { key, .. }) => key,
            other => panic!("expected ConfigInvalid, got {other:?}"),
        }
    }

    #[test]
    fn empty_config_is_valid() {
        assert!(validate_engine_config(&MockConfig::new()).is_ok());
    }

    #[test]
    fn full_config_is_valid() {
        let config = MockConfig::new()
            .set("profile", "default_age", "45")
            .set("profile", "default_risk_tolerance", "Aggressive")
            .set("analysis", "seed", "42")
            .set("analysis", "unknown_sector_performance", "random")
            .set("analysis", "chart_days", "90")
            .set("recommendations", "max_recommendations", "5")
            .set("recommendations", "rebalance_tolerance", "2.5")
            .set("logging", "level", "debug")
            .set("logging", "format", "pretty")
            .set("output", "format", "markdown");
        assert!(validate_engine_config(&config).is_ok());
    }

    #[test]
    fn age_out_of_range() {
        let young = MockConfig::new().set("profile", "default_age", "17");
        assert_eq!(invalid_key(validate_engine_config(&young)), "default_age");
        let old = MockConfig::new().set("profile", "default_age", "101");
        assert_eq!(invalid_key(validate_engine_config(&old)), "default_age");
        let edge = MockConfig::new().set("profile", "default_age", "18");
        assert!(validate_engine_config(&edge).is_ok());
    }

    #[test]
    fn age_not_a_number() {
        let config = MockConfig::new().set("profile", "default_age", "thirty");
        assert_eq!(invalid_key(validate_engine_config(&config)), "default_age");
    }

    #[test]
    fn unknown_risk_tolerance() {
        let config = MockConfig::new().set("profile", "default_risk_tolerance", "yolo");
        assert_eq!(
            invalid_key(validate_engine_config(&config)),
            "default_risk_tolerance"
        );
    }

    #[test]
    fn negative_seed() {
        let config = MockConfig::new().set("analysis", "seed", "-1");
        assert_eq!(invalid_key(validate_engine_config(&config)), "seed");
    }

    #[test]
    fn unknown_sector_policy() {
        let config = MockConfig::new().set("analysis", "unknown_sector_performance", "guess");
        assert_eq!(
            invalid_key(validate_engine_config(&config)),
            "unknown_sector_performance"
        );
    }

    #[test]
    fn chart_days_bounds() {
        let zero = MockConfig::new().set("analysis", "chart_days", "0");
        assert_eq!(invalid_key(validate_engine_config(&zero)), "chart_days");
        let long = MockConfig::new().set("analysis", "chart_days", "366");
        assert_eq!(invalid_key(validate_engine_config(&long)), "chart_days");
    }

    #[test]
    fn max_recommendations_bounds() {
        let zero = MockConfig::new().set("recommendations", "max_recommendations", "0");
        assert_eq!(
            invalid_key(validate_engine_config(&zero)),
            "max_recommendations"
        );
        let nine = MockConfig::new().set("recommendations", "max_recommendations", "9");
        assert_eq!(
            invalid_key(validate_engine_config(&nine)),
            "max_recommendations"
        );
        let eight = MockConfig::new().set("recommendations", "max_recommendations", "8");
        assert!(validate_engine_config(&eight).is_ok());
    }

    #[test]
    fn rebalance_tolerance_bounds() {
        let negative = MockConfig::new().set("recommendations", "rebalance_tolerance", "-1");
        assert_eq!(
            invalid_key(validate_engine_config(&negative)),
            "rebalance_tolerance"
        );
        let huge = MockConfig::new().set("recommendations", "rebalance_tolerance", "50.5");
        assert_eq!(
            invalid_key(validate_engine_config(&huge)),
            "rebalance_tolerance"
        );
        let nan = MockConfig::new().set("recommendations", "rebalance_tolerance", "NaN");
        assert_eq!(invalid_key(validate_engine_config(&nan)), "rebalance_tolerance");
    }

    #[test]
    fn logging_and_output_enums() {
        let level = MockConfig::new().set("logging", "level", "loud");
        assert_eq!(invalid_key(validate_engine_config(&level)), "level");
        let format = MockConfig::new().set("logging", "format", "xml");
        assert_eq!(invalid_key(validate_engine_config(&format)), "format");
        let output = MockConfig::new().set("output", "format", "pdf");
        assert_eq!(invalid_key(validate_engine_config(&output)), "format");
    }

    #[test]
    fn blank_value_is_missing() {
        let config = MockConfig::new().set("analysis", "chart_days", "  ");
        match validate_engine_config(&config) {
            Err(WealthError::ConfigMissing { section, key }) => {
                assert_eq!(section, "analysis");
                assert_eq!(key, "chart_days");
            }
            other => panic!("expected ConfigMissing, got {other:?}"),
        }
    }
}
