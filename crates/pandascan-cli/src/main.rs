use clap::Parser;
use tracing_subscriber::EnvFilter;

use pandascan_core::ScrapeRequest;

#[derive(Debug, Parser)]
#[command(name = "pandascan")]
#[command(about = "Scrape restaurant listings from a delivery aggregator")]
struct Cli {
    /// Search query, e.g. "biryani"
    query: String,

    /// Display-only location label echoed in the response
    #[arg(long)]
    location: Option<String>,

    /// Maximum number of records to return (clamped to 1-50)
    #[arg(long)]
    max: Option<usize>,

    /// Delivery-fee cap; records with a higher fee are dropped
    #[arg(long = "fee-cap")]
    fee_cap: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Argument parsing goes first so `--help` and usage errors work even
    // when the environment holds a malformed PANDASCAN_* variable.
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = pandascan_core::load_app_config_from_env()?;

    // Logs go to stderr so stdout stays clean JSON for piping.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .with_writer(std::io::stderr)
        .init();

    let request = ScrapeRequest {
        query: cli.query,
        location: cli
            .location
            .unwrap_or_else(|| config.default_location.clone()),
        max: cli.max.unwrap_or(config.max_results),
        fee_cap: cli.fee_cap.unwrap_or(config.fee_cap),
    };

    match pandascan_scraper::scrape(request, &config).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(err) => {
            let payload = serde_json::json!({
                "kind": err.kind(),
                "message": err.to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
            std::process::exit(1);
        }
    }
}
