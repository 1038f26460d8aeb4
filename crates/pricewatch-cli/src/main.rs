mod check;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricewatch-cli")]
#[command(about = "Pricewatch command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape a product page once and print what would be recorded.
    Check {
        /// Product page URL.
        #[arg(long)]
        url: String,
        /// Skip the headless-browser fallback even if enabled in config.
        #[arg(long)]
        no_browser: bool,
        /// Alert target price to evaluate against the scraped price.
        #[arg(long)]
        target: Option<String>,
    },
    /// Run the price normalizer over a raw text fragment.
    ParsePrice {
        /// Raw price text, e.g. "was $199.99 now $149.99".
        text: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pricewatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check {
            url,
            no_browser,
            target,
        } => check::run_check(config, &url, no_browser, target.as_deref()).await,
        Commands::ParsePrice { text } => {
            match pricewatch_scraper::parse_price_text(&text) {
                Some(price) => println!("{price}"),
                None => println!("no usable price found"),
            }
            Ok(())
        }
    }
}
