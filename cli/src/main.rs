//! RiskGate CLI
//!
//! Command-line interface for the RiskGate scoring engine.
//!
//! # Usage
//!
//! ```bash
//! riskgate score --signal new-device --failed-attempts 5
//! riskgate score --file attempt.json --format json
//! riskgate score --telemetry login.json --baseline alice.yaml
//! riskgate simulate --ip-type tor --geo-velocity impossible --explain
//! riskgate rules
//! riskgate report --events events.json --analyze 3
//! ```

use clap::{Args, Parser, Subcommand};
use riskgate_engine::Signal;
use riskgate_signals::scenario::{
    ClickRate, DeviceStatus, FieldOrder, FormSpeed, GeoVelocity, IpType, Misclicks, MouseIdle,
    MousePattern, MouseSpeed, TimeContext, TypingErrorRate,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "riskgate")]
#[command(author = "RiskGate")]
#[command(version)]
#[command(about = "RiskGate Command Line Interface", long_about = None)]
struct Cli {
    /// API key for the report summarizer
    #[arg(long, env = "RISKGATE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Summarizer model
    #[arg(long, env = "RISKGATE_MODEL")]
    model: Option<String>,

    /// Output format (defaults to the config file, then table)
    #[arg(long, short)]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one attempt
    Score(ScoreArgs),
    /// Run a what-if scenario through the engine
    Simulate(SimulateArgs),
    /// Print the rule table
    Rules,
    /// Summarize recorded events
    Report {
        /// JSON array of security events
        #[arg(long)]
        events: PathBuf,
        /// Also analyze the N riskiest sessions
        #[arg(long, default_value_t = 0)]
        analyze: usize,
    },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Args)]
struct ScoreArgs {
    /// RiskInput as JSON or YAML
    #[arg(long, short, conflicts_with = "telemetry")]
    file: Option<PathBuf>,

    /// Raw login telemetry as JSON or YAML
    #[arg(long)]
    telemetry: Option<PathBuf>,

    /// User baseline for --telemetry
    #[arg(long, requires = "telemetry")]
    baseline: Option<PathBuf>,

    /// Signal to raise (repeatable), e.g. new-device
    #[arg(long = "signal", short = 's')]
    signals: Vec<Signal>,

    /// Consecutive failed attempts
    #[arg(long)]
    failed_attempts: Option<u32>,
}

#[derive(Args)]
struct SimulateArgs {
    #[arg(long, default_value_t)]
    ip_type: IpType,
    #[arg(long, default_value_t)]
    geo_velocity: GeoVelocity,
    #[arg(long, default_value_t)]
    device_status: DeviceStatus,
    #[arg(long, default_value_t)]
    time_context: TimeContext,
    #[arg(long, default_value_t)]
    mouse_speed: MouseSpeed,
    #[arg(long, default_value_t)]
    mouse_pattern: MousePattern,
    #[arg(long, default_value_t)]
    mouse_idle: MouseIdle,
    #[arg(long, default_value_t)]
    click_rate: ClickRate,
    #[arg(long)]
    rage_clicks: bool,
    #[arg(long, default_value_t)]
    misclicks: Misclicks,
    #[arg(long, default_value_t)]
    typing_error_rate: TypingErrorRate,
    #[arg(long)]
    sensitive_paste: bool,
    #[arg(long, default_value_t)]
    form_speed: FormSpeed,
    #[arg(long, default_value_t)]
    field_order: FieldOrder,

    /// Attach a short explanation of the verdict
    #[arg(long)]
    explain: bool,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let profile = cli.profile.as_deref();
    let config = match config::Config::load(profile) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring config file: {}", e);
            config::Config::default()
        }
    };
    let format = cli
        .format
        .or_else(|| config.default_format())
        .unwrap_or(output::OutputFormat::Table);
    let api_key = cli.api_key.or(config.api_key.clone());
    let model = cli.model.or(config.model.clone());

    let result = match cli.command {
        Commands::Score(args) => commands::score::handle(args, format),
        Commands::Simulate(args) => commands::simulate::handle(args, format),
        Commands::Rules => commands::rules::handle(format),
        Commands::Report { events, analyze } => {
            commands::report::handle(&events, analyze, api_key, model, format).await
        }
        Commands::Config { action } => commands::config::handle(action, profile),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
