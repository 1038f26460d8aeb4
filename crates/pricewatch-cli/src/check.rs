//! One-off scrape command.
//!
//! Runs the full acquisition pipeline against an in-memory store so a page
//! can be checked from the shell without any backing infrastructure. Prints
//! what a scheduled check would have recorded.

use pricewatch_core::memory::{MemoryStore, NullBroadcaster};
use pricewatch_core::{AppConfig, CheckStatus, PriceAlert, Product, ProductStore, ScrapeOutcome};
use pricewatch_scraper::{BrowserFetcher, ScrapePipeline, StaticFetcher};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Scrape `url` once and print the outcome.
///
/// When `target` is given, a price alert at that target is evaluated against
/// the scraped price, exactly as the pipeline would for a stored alert.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed, the target
/// price does not parse as a decimal, or the store rejects the check.
pub(crate) async fn run_check(
    config: AppConfig,
    url: &str,
    no_browser: bool,
    target: Option<&str>,
) -> anyhow::Result<()> {
    tracing::info!(url, browser = !no_browser && config.browser_enabled, "running one-off check");

    let store = MemoryStore::new();
    let product = Product {
        id: Uuid::new_v4(),
        url: url.to_owned(),
        name: None,
        image_url: None,
        current_price: None,
        last_checked_at: None,
        check_status: CheckStatus::Pending,
    };
    let product_id = product.id;
    store.insert_product(product);

    if let Some(raw) = target {
        let target_price: Decimal = raw
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid --target '{raw}': {e}"))?;
        store.insert_alert(PriceAlert {
            id: Uuid::new_v4(),
            product_id,
            owner_id: Uuid::new_v4(),
            target_price,
            active: true,
            last_notified_at: None,
        });
    }

    let static_fetcher = StaticFetcher::new(
        config.static_timeout_secs,
        config.static_max_redirects,
    )
    .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

    let browser_fetcher = (config.browser_enabled && !no_browser)
        .then(|| BrowserFetcher::new(config.browser_nav_timeout_secs, config.browser_settle_ms));

    let pipeline = ScrapePipeline::new(
        config,
        store,
        NullBroadcaster,
        static_fetcher,
        browser_fetcher,
    );

    let outcome = pipeline.check_product(product_id).await?;
    match outcome {
        ScrapeOutcome::Success {
            price,
            strategy,
            name,
            image_url,
        } => {
            println!("price: {price} (via {strategy:?} fetch)");
            if let Some(name) = name {
                println!("name: {name}");
            }
            if let Some(image_url) = image_url {
                println!("image: {image_url}");
            }
        }
        ScrapeOutcome::Failed { reason } => {
            println!("check failed: {reason}");
        }
    }

    let alerts = pipeline.store().active_alerts(product_id).await?;
    for alert in alerts {
        match alert.last_notified_at {
            Some(at) => println!(
                "alert at {} triggered ({})",
                alert.target_price,
                at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            None => println!("alert at {} not triggered", alert.target_price),
        }
    }

    Ok(())
}
