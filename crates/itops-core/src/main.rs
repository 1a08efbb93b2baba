//! itops CLI
//!
//! Command-line interface for the IT operations dashboard.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use console::style;
use tracing::info;

use itops::alerting::AlertAggregator;
use itops::api::HttpServer;
use itops::clock::{Clock, FixedClock, SystemClock};
use itops::config::SourceKind;
use itops::gateway;
use itops::models::{Alert, DashboardSummary, Module, ModuleSummary, Severity, Snapshot};
use itops::Config;

/// itops - IT operations dashboard
#[derive(Parser)]
#[command(name = "itops")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "ITOPS_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (for commands that support it)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Evaluate as of this day (YYYY-MM-DD) instead of today
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    /// Read collections from this directory of JSON files
    #[arg(long, global = true, conflicts_with = "backend_url")]
    source_dir: Option<PathBuf>,

    /// Read collections from this backend
    #[arg(long, global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard API server
    Serve {
        /// Host to bind to
        #[arg(long, env = "ITOPS_HOST")]
        host: Option<String>,

        /// HTTP API port
        #[arg(long, env = "ITOPS_PORT")]
        port: Option<u16>,
    },

    /// Show per-module statistics
    Summary,

    /// Show the alert feed
    Alerts {
        /// Only show critical alerts
        #[arg(long)]
        critical_only: bool,
    },

    /// Show statistics and alerts from one snapshot
    Dashboard,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        generate_completions(shell);
        return ExitCode::SUCCESS;
    }

    // Load configuration
    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    apply_overrides(&mut config, &cli);

    init_logging(&config, cli.verbose);

    let clock: Arc<dyn Clock> = match cli.date {
        Some(date) => Arc::new(FixedClock(date)),
        None => Arc::new(SystemClock),
    };

    // Execute command
    let result = match cli.command {
        Commands::Serve { host, port } => run_serve(config, clock, host, port).await,
        Commands::Summary => run_summary(&config, clock.as_ref(), cli.format).await,
        Commands::Alerts { critical_only } => {
            run_alerts(&config, clock.as_ref(), critical_only, cli.format).await
        }
        Commands::Dashboard => run_dashboard(&config, clock.as_ref(), cli.format).await,
        Commands::Completions { .. } => Ok(()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", style("Error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(dir) = &cli.source_dir {
        config.source.kind = SourceKind::File;
        config.source.dir.clone_from(dir);
    }
    if let Some(url) = &cli.backend_url {
        config.source.kind = SourceKind::Http;
        config.source.base_url.clone_from(url);
    }
}

fn init_logging(config: &Config, verbose: bool) {
    let level = if verbose { "debug" } else { config.logging.level.as_str() };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.logging.format.eq_ignore_ascii_case("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn load_snapshot(config: &Config) -> anyhow::Result<Snapshot> {
    let source = gateway::from_config(&config.source)?;
    let snapshot = source.fetch_snapshot().await?;
    if snapshot.rejected > 0 {
        eprintln!(
            "{} {} record(s) could not be read and were skipped",
            style("warning:").yellow().bold(),
            snapshot.rejected
        );
    }
    Ok(snapshot)
}

async fn run_serve(
    mut config: Config,
    clock: Arc<dyn Clock>,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let source = gateway::from_config(&config.source)?;
    let addr = config.bind_addr();
    info!(source = %source.describe(), "Starting itops API");

    println!("{} itops API starting...", style("▶").green());
    println!("   HTTP API: http://{addr}");
    println!("   Source:   {}", source.describe());
    println!();
    println!("Press Ctrl+C to stop");

    HttpServer::new(source, clock, AlertAggregator::new(config.alerting))
        .serve(&addr)
        .await?;

    println!("\nShutting down...");
    Ok(())
}

async fn run_summary(config: &Config, clock: &dyn Clock, format: OutputFormat) -> anyhow::Result<()> {
    let snapshot = load_snapshot(config).await?;
    let summary = AlertAggregator::new(config.alerting).build_summary(&snapshot, clock.today());

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Table => print_summary_table(&summary),
        OutputFormat::Text => print_summary(&summary),
    }
    Ok(())
}

async fn run_alerts(
    config: &Config,
    clock: &dyn Clock,
    critical_only: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let snapshot = load_snapshot(config).await?;
    let mut alerts = AlertAggregator::new(config.alerting).build_alerts(&snapshot, clock.today());
    if critical_only {
        alerts.retain(|a| a.severity == Severity::Critical);
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&alerts)?),
        OutputFormat::Table => print_alert_table(&alerts),
        OutputFormat::Text => print_alerts(&alerts),
    }
    Ok(())
}

async fn run_dashboard(config: &Config, clock: &dyn Clock, format: OutputFormat) -> anyhow::Result<()> {
    let snapshot = load_snapshot(config).await?;
    let today = clock.today();
    let dashboard = AlertAggregator::new(config.alerting).build_dashboard(&snapshot, today);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dashboard)?),
        OutputFormat::Table => {
            print_summary_table(&dashboard.summary);
            println!();
            print_alert_table(&dashboard.alerts);
        }
        OutputFormat::Text => {
            println!("{}", style(format!("Dashboard em {}", today.format("%d/%m/%Y"))).bold());
            println!();
            print_summary(&dashboard.summary);
            println!();
            print_alerts(&dashboard.alerts);
        }
    }
    Ok(())
}

// ============================================================================
// Rendering
// ============================================================================

fn join_counts(counts: &std::collections::BTreeMap<String, usize>) -> String {
    counts
        .iter()
        .map(|(name, count)| format!("{name}: {count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_module(module: Module, summary: &ModuleSummary) {
    println!("{} {}", style(module.label()).bold(), style(summary.total).cyan());
    println!("   {}", join_counts(&summary.by_status));
    if summary.highlights.values().any(|&n| n > 0) {
        println!("   {}", style(join_counts(&summary.highlights)).yellow());
    }
}

fn print_summary(summary: &DashboardSummary) {
    for module in Module::ALL {
        print_module(module, summary.module(module));
    }
}

fn print_summary_table(summary: &DashboardSummary) {
    println!("{:<16} {:>6}  {:<48} {}", "MÓDULO", "TOTAL", "POR STATUS", "DESTAQUES");
    for module in Module::ALL {
        let m = summary.module(module);
        println!(
            "{:<16} {:>6}  {:<48} {}",
            module.label(),
            m.total,
            join_counts(&m.by_status),
            join_counts(&m.highlights)
        );
    }
}

fn severity_badge(severity: Severity) -> String {
    match severity {
        Severity::Critical => style("CRÍTICO").red().bold().to_string(),
        Severity::Warning => style("AVISO").yellow().bold().to_string(),
    }
}

fn print_alerts(alerts: &[Alert]) {
    if alerts.is_empty() {
        println!("{} Nenhum alerta", style("✔").green());
        return;
    }

    println!("{}", style(format!("{} alerta(s)", alerts.len())).bold());
    for alert in alerts {
        println!(
            "  [{}] {}: {}",
            severity_badge(alert.severity),
            style(alert.module.label()).dim(),
            alert.message
        );
    }
}

fn print_alert_table(alerts: &[Alert]) {
    println!("{:<8} {:<16} {}", "TIPO", "MÓDULO", "MENSAGEM");
    for alert in alerts {
        let kind = match alert.severity {
            Severity::Critical => "critico",
            Severity::Warning => "aviso",
        };
        println!("{:<8} {:<16} {}", kind, alert.module.label(), alert.message);
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "itops", &mut io::stdout());
}
