//! SAR-Sweep main entry point
//!
//! This is the command-line interface for the SAR-Sweep batch search runner.

use clap::Parser;
use sar_sweep::catalog::CatalogClient;
use sar_sweep::config::load_config_with_hash;
use sar_sweep::output::{generate_markdown_report, print_summary};
use sar_sweep::runner::BatchRunner;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// SAR-Sweep: a batch search runner for SAR satellite catalogs
///
/// SAR-Sweep runs a list of named region/time-window search tasks against a
/// STAC catalog, isolating failures per task, and writes a markdown report
/// of the results.
#[derive(Parser, Debug)]
#[command(name = "sar-sweep")]
#[command(version = "1.0.0")]
#[command(about = "A batch search runner for SAR satellite catalogs", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be searched without searching
    #[arg(long)]
    dry_run: bool,

    /// Skip writing the markdown report
    #[arg(long, conflicts_with = "dry_run")]
    no_report: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_run(config, cli.no_report).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sar_sweep=info,warn"),
            1 => EnvFilter::new("sar_sweep=debug,info"),
            2 => EnvFilter::new("sar_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the planned tasks
fn handle_dry_run(config: &sar_sweep::Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== SAR-Sweep Dry Run ===\n");

    println!("Catalog:");
    println!("  API URL: {}", config.catalog.api_url);
    println!("  Collection: {}", config.catalog.collection);
    println!("  Orbit state: {}", config.catalog.orbit_state);
    println!("  Instrument mode: {}", config.catalog.instrument_mode);
    match &config.catalog.sign_url {
        Some(url) => println!("  Signing endpoint: {}", url),
        None => println!("  Signing endpoint: (none, assets stay unsigned)"),
    }
    if let Some(limit) = config.catalog.limit {
        println!("  Item limit: {}", limit);
    }

    println!("\nRunner:");
    println!("  Compute stats: {}", config.runner.compute_stats);
    println!("  Compute change: {}", config.runner.compute_change);
    println!("  Show progress: {}", config.runner.show_progress);

    println!("\nOutput:");
    println!("  Report: {}", config.output.report_path);

    let tasks = config.processing_tasks()?;
    println!("\nTasks ({}):", tasks.len());
    for task in &tasks {
        println!("  - {}", task);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would search {} tasks", tasks.len());

    Ok(())
}

/// Handles the main batch run
async fn handle_run(
    config: sar_sweep::Config,
    no_report: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = config.processing_tasks()?;
    tracing::info!("Running batch of {} tasks", tasks.len());

    let options = config.batch_options();
    let report_path = config.output.report_path.clone();

    let client = CatalogClient::new(config.catalog)?;
    let runner = BatchRunner::new(client);

    let results = runner.process_tasks(&tasks, &options).await;

    print_summary(&results);

    if !no_report {
        generate_markdown_report(&results, std::path::Path::new(&report_path))?;
        println!("\n✓ Report written to: {}", report_path);
    }

    Ok(())
}
