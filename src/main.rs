use analytics::{IndicatorEngine, summary_rows};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::{Config, DEFAULT_CONFIG_FILE};
use core_types::{FinancialInputs, IndicatorSet, Sector};
use reporter::{PlottersChartRenderer, ReportFormatter};
use std::net::SocketAddr;
use std::path::PathBuf;

/// The main entry point for the VAIC dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load VAIC_* overrides from a .env file if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config(Some(&cli.config))
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    let _log_guard = configuration::init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Compute(args) => handle_compute(args),
        Commands::Report(args) => handle_report(args, &config),
        Commands::Serve(args) => handle_serve(args, config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Intellectual capital (VAIC) and profitability indicators.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. A missing file means defaults.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the indicators and print them.
    Compute(ComputeArgs),
    /// Calculate the indicators and write the PDF report.
    Report(ReportArgs),
    /// Start the web dashboard.
    Serve(ServeArgs),
}

/// The four financial figures and the sector.
#[derive(Args)]
struct InputArgs {
    /// Total revenue (IT).
    #[arg(long)]
    it: f64,

    /// Cost of sales (CV).
    #[arg(long)]
    cv: f64,

    /// Human capital cost (HC).
    #[arg(long)]
    hc: f64,

    /// Capital employed (CE).
    #[arg(long)]
    ce: f64,

    /// Sector whose regression coefficients produce ROA and ROE.
    #[arg(long, value_enum, default_value_t)]
    sector: Sector,
}

impl InputArgs {
    fn calculate(&self) -> anyhow::Result<IndicatorSet> {
        let inputs = FinancialInputs::new(self.it, self.cv, self.hc, self.ce)?;
        Ok(IndicatorEngine::new().calculate(&inputs, self.sector))
    }
}

#[derive(Args)]
struct ComputeArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Print the full indicator set as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ReportArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Directory the PDF is written into.
    #[arg(long, default_value = ".")]
    output: PathBuf,
}

#[derive(Args)]
struct ServeArgs {
    /// Listen address, overriding `[server]` in the configuration.
    #[arg(long)]
    addr: Option<SocketAddr>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_compute(args: ComputeArgs) -> anyhow::Result<()> {
    let indicators = args.inputs.calculate()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&indicators)?);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Indicator", "Value"]);
    for row in summary_rows(&indicators) {
        let value = if row.currency {
            format!("${}", row.value)
        } else {
            row.value
        };
        table.add_row(vec![row.label.to_string(), value]);
    }

    println!("Sector: {}", args.inputs.sector.label());
    println!("{table}");
    Ok(())
}

fn handle_report(args: ReportArgs, config: &Config) -> anyhow::Result<()> {
    let indicators = args.inputs.calculate()?;
    let formatter = ReportFormatter::new(
        config.report.clone(),
        PlottersChartRenderer::new(config.charts.clone()),
    );
    let report = formatter.render(
        &indicators,
        args.inputs.sector,
        chrono::Local::now().naive_local(),
    )?;

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let path = args.output.join(&report.file_name);
    std::fs::write(&path, &report.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    for warning in &report.warnings {
        eprintln!("{warning}");
    }
    println!("Report written to {}", path.display());
    Ok(())
}

async fn handle_serve(args: ServeArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(addr) = args.addr {
        config.server.host = addr.ip();
        config.server.port = addr.port();
    }
    tracing::info!("Starting the VAIC dashboard.");
    web_server::run_server(config).await
}
