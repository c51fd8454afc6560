//! CLI definition and dispatch.

use chrono::{Local, NaiveDate};
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_holdings_adapter::CsvHoldingsAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_context_adapter::JsonContextAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::markdown_report::MarkdownReportAdapter;
use crate::domain::error::WealthError;
use crate::domain::market_analysis::analyze_market;
use crate::domain::reference::reference;
use crate::domain::report::{analysis_options, build_report, recommendation_section, InsightReport};
use crate::domain::settings::{EngineSettings, OutputFormat};
use crate::logging::{init_logging, LoggingConfig};
use crate::ports::context_port::ContextPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "wealthwise", about = "Portfolio insights and recommendations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Full insight report: market analysis, recommendations, rebalancing, goals
    Report(RunArgs),
    /// Market analysis section only
    Market(RunArgs),
    /// Recommendations and rebalance snapshot only
    Recommend(RunArgs),
    /// Validate a configuration file and print the resolved settings
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("source").required(true).multiple(true).args(["context", "stocks", "funds"])))]
pub struct RunArgs {
    /// User context JSON document
    #[arg(long, conflicts_with_all = ["stocks", "funds"])]
    pub context: Option<PathBuf>,
    /// Stock holdings CSV export
    #[arg(long)]
    pub stocks: Option<PathBuf>,
    /// Mutual fund holdings CSV export
    #[arg(long)]
    pub funds: Option<PathBuf>,
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
    /// Seed for the synthetic chart and unknown-sector draws
    #[arg(long)]
    pub seed: Option<u64>,
    /// Valuation date (YYYY-MM-DD), defaults to today
    #[arg(long, value_parser = parse_date)]
    pub as_of: Option<NaiveDate>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Json,
    Markdown,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Full,
    Market,
    Recommendations,
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Report(args) => run_section(&args, Section::Full),
        Command::Market(args) => run_section(&args, Section::Market),
        Command::Recommend(args) => run_section(&args, Section::Recommendations),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// The named config file, or an empty config when none is given.
pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, WealthError> {
    match path {
        Some(p) => FileConfigAdapter::from_file(p),
        None => Ok(FileConfigAdapter::empty()),
    }
}

/// Config-file settings with command-line overrides applied.
pub fn resolve_settings(
    config: &FileConfigAdapter,
    args: &RunArgs,
) -> Result<EngineSettings, WealthError> {
    let mut settings = EngineSettings::from_config(config)?;
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(format) = args.format {
        settings.output_format = format.into();
    }
    Ok(settings)
}

pub fn context_source(args: &RunArgs) -> Box<dyn ContextPort> {
    match &args.context {
        Some(path) => Box::new(JsonContextAdapter::new(path)),
        None => Box::new(CsvHoldingsAdapter::new(args.stocks.clone(), args.funds.clone())),
    }
}

pub fn report_writer(settings: &EngineSettings) -> Result<Box<dyn ReportPort>, WealthError> {
    Ok(match settings.output_format {
        OutputFormat::Json => Box::new(JsonReportAdapter::new(settings.pretty)),
        OutputFormat::Markdown => match &settings.template_path {
            Some(path) => Box::new(MarkdownReportAdapter::from_template_file(path)?),
            None => Box::new(MarkdownReportAdapter::new()),
        },
    })
}

fn init_cli_logging(config: &FileConfigAdapter) {
    if let Err(e) = init_logging(&LoggingConfig::from_config(config)) {
        eprintln!("warning: logging already initialised ({e})");
    }
}

fn rng_for(settings: &EngineSettings) -> StdRng {
    match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn run_section(args: &RunArgs, section: Section) -> Result<(), WealthError> {
    let config = load_config(args.config.as_deref())?;
    init_cli_logging(&config);
    let settings = resolve_settings(&config, args)?;

    let source = context_source(args);
    tracing::info!(source = %source.describe(), "loading user context");
    let ctx = source.load_context()?;

    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let mut rng = rng_for(&settings);
    let writer = report_writer(&settings)?;
    let data = reference();

    let rendered = match section {
        Section::Full => {
            let report = build_report(&ctx, data, &settings, as_of, &mut rng)?;
            print_console_summary(&report);
            writer.render(&report)?
        }
        Section::Market => {
            let market = analyze_market(&ctx, data, &analysis_options(&settings, as_of), &mut rng)?;
            tracing::info!(
                sectors = market.sectors.len(),
                sentiment = market.market_sentiment.score,
                "market analysis complete"
            );
            writer.render_market(&market)?
        }
        Section::Recommendations => {
            let advice = recommendation_section(&ctx, data, &settings, as_of);
            tracing::info!(
                recommendations = advice.recommendations.len(),
                rebalance = advice.rebalance_data.needs_rebalancing(),
                "recommendations complete"
            );
            writer.render_recommendations(&advice)?
        }
    };

    emit(&rendered, args.output.as_deref())
}

fn emit(rendered: &str, output: Option<&Path>) -> Result<(), WealthError> {
    match output {
        Some(path) => {
            fs::write(path, rendered)?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn print_console_summary(report: &InsightReport) {
    let summary = &report.portfolio_summary;
    eprintln!(
        "Portfolio: {:.2} invested, {:.2} current ({:+.2})",
        summary.total_investment, summary.total_current_value, summary.total_gain_loss
    );
    eprintln!(
        "Sentiment: {:.0}/100 ({})",
        report.market.market_sentiment.score, report.market.market_sentiment.label
    );
    eprintln!(
        "Recommendations: {} | Rebalance needed: {}",
        report.advice.recommendations.len(),
        if report.advice.rebalance_data.needs_rebalancing() { "yes" } else { "no" }
    );
    for rec in report.advice.recommendations.iter().take(3) {
        eprintln!("  [{}] {}", rec.priority, rec.title);
    }
}

fn run_validate(config_path: &Path) -> Result<(), WealthError> {
    let config = FileConfigAdapter::from_file(config_path)?;
    init_cli_logging(&config);
    tracing::info!(config = %config_path.display(), "validating config");

    let settings = EngineSettings::from_config(&config)?;
    let logging = LoggingConfig::from_config(&config);

    println!("[profile]");
    println!("default_age = {}", settings.profile_defaults.age);
    println!("default_risk_tolerance = {}", settings.profile_defaults.risk_tolerance);
    println!("\n[analysis]");
    match settings.seed {
        Some(seed) => println!("seed = {seed}"),
        None => println!("seed = (entropy)"),
    }
    println!("unknown_sector_performance = {}", settings.unknown_sector_policy);
    println!("chart_days = {}", settings.chart_days);
    println!("\n[recommendations]");
    println!("max_recommendations = {}", settings.max_recommendations);
    println!("rebalance_tolerance = {}", settings.rebalance_tolerance);
    println!("\n[logging]");
    println!("level = {}", logging.level);
    println!("format = {}", logging.format);
    println!("\n[output]");
    println!("format = {}", settings.output_format);
    println!("pretty = {}", settings.pretty);
    if let Some(template) = &settings.template_path {
        println!("template = {template}");
    }

    eprintln!("Configuration is valid");
    Ok(())
}
