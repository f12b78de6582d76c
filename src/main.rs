use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use exo_scraper::apis::ExoplanetEuCatalog;
use exo_scraper::config::Config;
use exo_scraper::logging;
use exo_scraper::pipeline::{Pipeline, RunOptions};
use exo_scraper::report::default_report_path;

#[derive(Parser)]
#[command(name = "exo_scraper")]
#[command(about = "Filters the exoplanet.eu catalog for habitable-zone candidates")]
#[command(version = "0.1.0")]
struct Cli {
    /// Report file (default: logs/log_<date>.txt)
    #[arg(long)]
    output: Option<PathBuf>,

    /// TOML file overriding the default thresholds
    #[arg(long)]
    config: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let output = cli
        .output
        .unwrap_or_else(|| default_report_path(chrono::Local::now().date_naive()));

    let catalog = ExoplanetEuCatalog::new(config.catalog.url.clone());
    let options = RunOptions { verbose: !cli.quiet };

    let (report, summary) = match Pipeline::run(&catalog, &config.thresholds, options).await {
        Ok(result) => result,
        Err(e) => {
            error!("Pipeline failed: {}", e);
            return Err(e.into());
        }
    };

    report.write_to(&output)?;
    info!(
        candidates = summary.candidates,
        reserves = summary.reserves,
        "Report saved to {}",
        output.display()
    );
    println!("\n{}", output.display());

    Ok(())
}
