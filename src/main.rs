use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use u_lead_queue::report::{self, ReportFormat};
use u_lead_queue::{LeadQueueConfig, Session};

#[derive(Parser, Debug)]
#[command(name = "u-lead-queue")]
#[command(about = "Ranks sales consultants into Fila 1 / Fila 2 lead queues", long_about = None)]
#[command(version)]
struct Cli {
    /// Workbook with the weekly, monthly and roster sheets
    workbook: PathBuf,

    /// TOML configuration file
    #[arg(short, long, env = "LEAD_QUEUE_CONFIG")]
    config: Option<PathBuf>,

    /// Output directory (overrides the configuration)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ReportFormat,

    /// Fixed seed for the no-sales shuffle (reproducible output)
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the base-table export
    #[arg(long)]
    no_base_table: bool,

    /// Also echo the loaded input sheets as CSV
    #[arg(long)]
    include_inputs: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => LeadQueueConfig::from_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => LeadQueueConfig::default(),
    };
    if let Some(dir) = cli.output_dir {
        config.output.directory = dir;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.no_base_table {
        config.output.include_base_table = false;
    }
    if cli.include_inputs {
        config.output.include_input_tables = true;
    }

    let session = Session::new();
    session
        .load_workbook(&cli.workbook, &config.sheets)
        .with_context(|| format!("failed to load {}", cli.workbook.display()))?;

    let output = match session.rank(&config) {
        Ok(output) => output,
        Err(err) if err.is_engine_error() => {
            error!(%err, "ranking stopped; no queue was produced");
            return Err(err).context("ranking stopped on incomplete input data");
        }
        Err(err) => return Err(err).context("input tables do not match the expected layout"),
    };
    for unit in &output.report.units {
        info!(
            unit = %unit.unit,
            fila_1 = unit.fila_1.len(),
            fila_2 = unit.fila_2.len(),
            "unit ranked"
        );
    }

    let mut written = report::write_report(&output, &config.output, cli.format)?;
    if config.output.include_input_tables {
        written.extend(report::write_inputs(&session.snapshot(), &config.output)?);
    }
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
