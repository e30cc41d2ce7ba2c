//! Riftcrawl main entry point
//!
//! This is the command-line interface for the Riftcrawl match harvester.

use clap::Parser;
use riftcrawl::config::{load_config_with_hash, CrawlConfig};
use riftcrawl::harvester::{HarvestSettings, Harvester};
use riftcrawl::output::print_summary;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Riftcrawl: bulk esports match telemetry harvester
///
/// Riftcrawl builds lolesports schedule links from a small configuration,
/// follows them to the match-history stats links, and saves the merged game
/// and timeline JSON of every match it finds.
#[derive(Parser, Debug)]
#[command(name = "riftcrawl")]
#[command(version)]
#[command(about = "Bulk esports match telemetry harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Directory the match JSON files are appended to
    #[arg(long, value_name = "DIR", default_value = "./games")]
    out: PathBuf,

    /// Schedule links per discovery batch
    #[arg(long, value_name = "N", requires = "workers")]
    batch_size: Option<usize>,

    /// Concurrent discovery workers
    #[arg(long, value_name = "N", requires = "batch_size")]
    workers: Option<usize>,

    /// Wait after each page load, in milliseconds
    #[arg(long, value_name = "MS")]
    settle_ms: Option<u64>,

    /// Print the generated schedule links without crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let mut settings = HarvestSettings {
        batch_size: cli.batch_size,
        worker_count: cli.workers,
        ..HarvestSettings::default()
    };
    if let Some(ms) = cli.settle_ms {
        settings.settle_delay = Duration::from_millis(ms);
    }

    let mut harvester = Harvester::with_settings(config, settings);

    if cli.dry_run {
        handle_dry_run(&mut harvester)?;
    } else {
        handle_harvest(&mut harvester, cli.out).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("riftcrawl=info,warn"),
            1 => EnvFilter::new("riftcrawl=debug,info"),
            2 => EnvFilter::new("riftcrawl=trace,debug"),
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

/// Handles the --dry-run mode: shows the schedule pages that would be crawled
fn handle_dry_run(harvester: &mut Harvester) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Riftcrawl Dry Run ===\n");
    print_config(harvester.config());

    let links = harvester.make_links()?.to_vec();
    println!("\nSchedule links ({}):", links.len());
    for link in &links {
        println!("  {}", link);
    }

    if !harvester.advisories().is_empty() {
        println!("\nAdvisories:");
        for advisory in harvester.advisories() {
            println!("  - {}", advisory);
        }
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

fn print_config(config: &CrawlConfig) {
    println!("Configuration:");
    println!("  Region: {}", config.region);
    println!("  Split:  {}", config.split);
    println!("  Week:   {}", config.week);
    if let Some(year) = config.year {
        println!("  Year:   {}", year);
    }
    if let Some(base) = &config.base_url {
        println!("  Base:   {}", base);
    }
}

/// Handles the main harvest: discovery, download and summary
async fn handle_harvest(
    harvester: &mut Harvester,
    out: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    match harvester.run_all(&out).await {
        Ok(summary) => {
            print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
