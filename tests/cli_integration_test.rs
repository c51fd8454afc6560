//! CLI integration tests for argument parsing and command orchestration.
//!
//! Tests cover:
//! - Argument parsing rules (context source group, date parsing)
//! - Settings resolution with command-line overrides
//! - Report, market and recommend commands writing real files
//! - Exit codes for config, context and I/O failures
//! - The validate command

mod common;

use clap::Parser;
use common::*;
use std::fs;
use std::process::ExitCode;
use wealthwise::adapters::file_config_adapter::FileConfigAdapter;
use wealthwise::cli::{self, Cli, Command, FormatArg};
use wealthwise::domain::context::RiskTolerance;
use wealthwise::domain::error::WealthError;
use wealthwise::domain::settings::OutputFormat;

fn exit_matches(actual: ExitCode, expected: ExitCode) -> bool {
    format!("{actual:?}") == format!("{expected:?}")
}

fn run_args(args: &[&str]) -> ExitCode {
    cli::run(Cli::parse_from(args))
}

const VALID_INI: &str = r#"
[profile]
default_age = 45
default_risk_tolerance = conservative

[analysis]
seed = 11
unknown_sector_performance = neutral
chart_days = 10

[recommendations]
max_recommendations = 5
rebalance_tolerance = 3.5

[logging]
level = warn
format = compact

[output]
format = markdown
pretty = false
"#;

mod parsing {
    use super::*;

    #[test]
    fn requires_a_context_source() {
        assert!(Cli::try_parse_from(["wealthwise", "report"]).is_err());
    }

    #[test]
    fn context_conflicts_with_csv_inputs() {
        let result = Cli::try_parse_from([
            "wealthwise", "report", "--context", "ctx.json", "--stocks", "stocks.csv",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn stocks_and_funds_together() {
        let cli = Cli::try_parse_from([
            "wealthwise", "recommend", "--stocks", "s.csv", "--funds", "f.csv", "--format", "markdown",
        ])
        .unwrap();
        match cli.command {
            Command::Recommend(args) => {
                assert!(args.context.is_none());
                assert!(args.stocks.is_some() && args.funds.is_some());
                assert_eq!(args.format, Some(FormatArg::Markdown));
            }
            other => panic!("expected Recommend, got {other:?}"),
        }
    }

    #[test]
    fn as_of_parses_iso_date() {
        let cli = Cli::try_parse_from([
            "wealthwise", "market", "--context", "c.json", "--as-of", "2025-01-15",
        ])
        .unwrap();
        match cli.command {
            Command::Market(args) => assert_eq!(args.as_of, Some(as_of())),
            other => panic!("expected Market, got {other:?}"),
        }
    }

    #[test]
    fn bad_as_of_is_rejected() {
        let result = Cli::try_parse_from([
            "wealthwise", "market", "--context", "c.json", "--as-of", "15/01/2025",
        ]);
        assert!(result.is_err());
    }
}

mod settings {
    use super::*;

    fn report_args(extra: &[&str]) -> cli::RunArgs {
        let mut argv = vec!["wealthwise", "report", "--context", "c.json"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Command::Report(args) => args,
            other => panic!("expected Report, got {other:?}"),
        }
    }

    #[test]
    fn config_values_flow_through() {
        let config = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let settings = cli::resolve_settings(&config, &report_args(&[])).unwrap();
        assert_eq!(settings.profile_defaults.age, 45);
        assert_eq!(settings.profile_defaults.risk_tolerance, RiskTolerance::Conservative);
        assert_eq!(settings.seed, Some(11));
        assert_eq!(settings.chart_days, 10);
        assert_eq!(settings.max_recommendations, 5);
        assert_eq!(settings.output_format, OutputFormat::Markdown);
        assert!(!settings.pretty);
    }

    #[test]
    fn command_line_overrides_config() {
        let config = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let args = report_args(&["--seed", "99", "--format", "json"]);
        let settings = cli::resolve_settings(&config, &args).unwrap();
        assert_eq!(settings.seed, Some(99));
        assert_eq!(settings.output_format, OutputFormat::Json);
    }

    #[test]
    fn missing_config_file_is_config_parse_error() {
        let result = cli::load_config(Some(std::path::Path::new("/nonexistent/wealthwise.ini")));
        assert!(matches!(result, Err(WealthError::ConfigParse { .. })));
    }

    #[test]
    fn no_config_means_defaults() {
        let config = cli::load_config(None).unwrap();
        let settings = cli::resolve_settings(&config, &report_args(&[])).unwrap();
        assert_eq!(settings.profile_defaults.age, 30);
        assert_eq!(settings.output_format, OutputFormat::Json);
        assert_eq!(settings.seed, None);
    }
}

mod commands {
    use super::*;

    #[test]
    fn report_writes_json_file() {
        let ctx = write_temp(CONTEXT_JSON, ".json");
        let out = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let code = run_args(&[
            "wealthwise",
            "report",
            "--context",
            ctx.path().to_str().unwrap(),
            "--seed",
            "5",
            "--as-of",
            "2025-01-15",
            "--output",
            out.path().to_str().unwrap(),
        ]);
        assert!(exit_matches(code, ExitCode::SUCCESS));

        let written = fs::read_to_string(out.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["as_of"], "2025-01-15");
        assert_eq!(value["recommendations"].as_array().unwrap().len(), 8);
        assert_eq!(value["chart_data"].as_array().unwrap().len(), 30);
    }

    #[test]
    fn seeded_runs_write_identical_reports() {
        let ctx = write_temp(CONTEXT_JSON, ".json");
        let out_a = tempfile::NamedTempFile::new().unwrap();
        let out_b = tempfile::NamedTempFile::new().unwrap();
        for out in [&out_a, &out_b] {
            let code = run_args(&[
                "wealthwise",
                "report",
                "--context",
                ctx.path().to_str().unwrap(),
                "--seed",
                "21",
                "--as-of",
                "2025-01-15",
                "--output",
                out.path().to_str().unwrap(),
            ]);
            assert!(exit_matches(code, ExitCode::SUCCESS));
        }
        assert_eq!(
            fs::read_to_string(out_a.path()).unwrap(),
            fs::read_to_string(out_b.path()).unwrap()
        );
    }

    #[test]
    fn market_markdown_uses_config_chart_days() {
        let ctx = write_temp(CONTEXT_JSON, ".json");
        let ini = write_temp_ini(VALID_INI);
        let out = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
        let code = run_args(&[
            "wealthwise",
            "market",
            "--context",
            ctx.path().to_str().unwrap(),
            "--config",
            ini.path().to_str().unwrap(),
            "--as-of",
            "2025-01-15",
            "--output",
            out.path().to_str().unwrap(),
        ]);
        assert!(exit_matches(code, ExitCode::SUCCESS));

        let written = fs::read_to_string(out.path()).unwrap();
        assert!(written.contains("Banking"));
        assert!(!written.contains("{{"));
    }

    #[test]
    fn recommend_from_csv_exports() {
        let stocks = write_temp(STOCKS_CSV, ".csv");
        let funds = write_temp(FUNDS_CSV, ".csv");
        let out = tempfile::NamedTempFile::new().unwrap();
        let code = run_args(&[
            "wealthwise",
            "recommend",
            "--stocks",
            stocks.path().to_str().unwrap(),
            "--funds",
            funds.path().to_str().unwrap(),
            "--as-of",
            "2025-01-15",
            "--output",
            out.path().to_str().unwrap(),
        ]);
        assert!(exit_matches(code, ExitCode::SUCCESS));

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.path()).unwrap()).unwrap();
        assert!(value["recommendations"].as_array().unwrap().len() <= 8);
        assert_eq!(value["rebalance_data"]["buckets"].as_array().unwrap().len(), 6);
        assert!(value.get("sectors").is_none());
    }

    #[test]
    fn malformed_context_exits_3() {
        let ctx = write_temp("{ not json", ".json");
        let code = run_args(&["wealthwise", "report", "--context", ctx.path().to_str().unwrap()]);
        assert!(exit_matches(code, ExitCode::from(3)));
    }

    #[test]
    fn missing_context_file_exits_1() {
        let code = run_args(&["wealthwise", "report", "--context", "/nonexistent/context.json"]);
        assert!(exit_matches(code, ExitCode::from(1)));
    }

    #[test]
    fn invalid_config_exits_2() {
        let ctx = write_temp(CONTEXT_JSON, ".json");
        let ini = write_temp_ini("[analysis]\nchart_days = 0\n");
        let code = run_args(&[
            "wealthwise",
            "report",
            "--context",
            ctx.path().to_str().unwrap(),
            "--config",
            ini.path().to_str().unwrap(),
        ]);
        assert!(exit_matches(code, ExitCode::from(2)));
    }
}

mod validate {
    use super::*;

    #[test]
    fn valid_config_passes() {
        let ini = write_temp_ini(VALID_INI);
        let code = run_args(&["wealthwise", "validate", "--config", ini.path().to_str().unwrap()]);
        assert!(exit_matches(code, ExitCode::SUCCESS));
    }

    #[test]
    fn bad_risk_tolerance_fails() {
        let ini = write_temp_ini("[profile]\ndefault_risk_tolerance = reckless\n");
        let code = run_args(&["wealthwise", "validate", "--config", ini.path().to_str().unwrap()]);
        assert!(exit_matches(code, ExitCode::from(2)));
    }

    #[test]
    fn blank_key_is_missing() {
        let ini = write_temp_ini("[recommendations]\nmax_recommendations =\n");
        let code = run_args(&["wealthwise", "validate", "--config", ini.path().to_str().unwrap()]);
        assert!(exit_matches(code, ExitCode::from(2)));
    }
}
