mod input;

use std::path::PathBuf;

use clap::Parser;
use mapscrape_core::{AppConfig, ExportFormat};
use mapscrape_scraper::{
    run_batch, BatchSummary, FileExporter, PageDriver, SearchSession, SessionSettings,
    WebDriverSession,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mapscrape")]
#[command(about = "Scrape Google Maps business listings into one file per search")]
struct Cli {
    /// Search query; repeat for several. Falls back to the input file.
    #[arg(short = 's', long = "search")]
    search: Vec<String>,

    /// Maximum listings to extract per query.
    #[arg(
        short = 't',
        long = "total",
        default_value_t = 1_000_000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    total: u64,

    /// File with one query per line, read when no --search is given.
    #[arg(long)]
    input_file: Option<PathBuf>,

    /// Directory the exports are written to.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Export format: csv or json.
    #[arg(long)]
    format: Option<ExportFormat>,

    /// Show the browser window instead of running headless.
    #[arg(long)]
    headed: bool,
}

impl Cli {
    /// Flags win over environment configuration.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(path) = &self.input_file {
            config.input_file.clone_from(path);
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        if let Some(format) = self.format {
            config.export_format = format;
        }
        if self.headed {
            config.headless = false;
        }
    }

    fn target(&self) -> usize {
        usize::try_from(self.total).unwrap_or(usize::MAX)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = mapscrape_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    cli.apply(&mut config);
    let queries = input::resolve_queries(&cli.search, &config.input_file)?;
    tracing::info!(queries = queries.len(), target = cli.total, "starting batch");

    let summary = scrape(&config, &queries, cli.target()).await?;
    println!("{summary}");
    Ok(())
}

/// Runs the batch in one browser session and closes it on every exit path.
async fn scrape(
    config: &AppConfig,
    queries: &[String],
    target: usize,
) -> anyhow::Result<BatchSummary> {
    let driver = WebDriverSession::connect(&config.webdriver_url, config.headless).await?;
    let settings = SessionSettings::from_app_config(config);
    let mut exporter = FileExporter::new(&config.output_dir, config.export_format);

    let result = {
        let session = SearchSession::new(&driver, &settings);
        tokio::select! {
            outcome = run_batch(&session, &config.maps_url, queries, target, &mut exporter) => {
                outcome.map_err(anyhow::Error::from)
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::warn!("interrupted, closing browser session");
                Err(anyhow::anyhow!("interrupted"))
            }
        }
    };

    if let Err(error) = driver.close().await {
        tracing::warn!(error = %error, "failed to close browser session");
    }
    result
}
