//! Kernel-Profiler main entry point
//!
//! Command-line interface for scraping public kernel score progressions for
//! a Kaggle competition into a markdown report.

use clap::Parser;
use kernel_profiler::browser::{driver_binary_exists, DRIVER_BINARY_PATH};
use kernel_profiler::config::{load_config, validate, Config};
use kernel_profiler::pipeline;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Kernel-Profiler: score progression reports for competition kernels
///
/// Scrapes the best-score-sorted listing of public kernels for a competition,
/// walks each kernel's revision history, fetches the public leaderboard score
/// of every revision, and writes one markdown report summarizing them all.
#[derive(Parser, Debug)]
#[command(name = "kernel-profiler")]
#[command(version = "1.0.0")]
#[command(about = "Scrape kernel score progressions for a competition", long_about = None)]
struct Cli {
    /// Competition tag (e.g. titanic)
    #[arg(short, long, value_name = "TAG")]
    comp: String,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// WebDriver endpoint to connect to (overrides config)
    #[arg(long, value_name = "URL")]
    webdriver_url: Option<String>,

    /// Report output path (overrides config)
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

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

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Advisory only: the WebDriver endpoint may be backed by a driver binary
    // living anywhere, so a missing local one is just worth a warning.
    if !driver_binary_exists() {
        tracing::warn!(
            "ChromeDriver not found at {}. Download one here: https://chromedriver.chromium.org",
            DRIVER_BINARY_PATH
        );
    }

    // Load configuration (defaults unless a file is given), apply CLI overrides
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    if let Some(webdriver_url) = cli.webdriver_url {
        config.scraper.webdriver_url = webdriver_url;
    }
    if let Some(output) = cli.output {
        config.output.report_path = output;
    }

    // Re-validate after overrides
    validate(&config)?;

    tracing::info!(
        "Profiling competition `{}` via {}",
        cli.comp,
        config.scraper.webdriver_url
    );

    match pipeline::run(config, &cli.comp).await {
        Ok(()) => {
            tracing::info!("Run completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("kernel_profiler=info,warn"),
            1 => EnvFilter::new("kernel_profiler=debug,info"),
            2 => EnvFilter::new("kernel_profiler=trace,debug"),
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
