//! End-to-end scrape of one product.
//!
//! Composes the rate limiter, fetch chain, site adapters, and the core
//! policies into a single `check_product` operation. Designed to be invoked
//! once per product by an external job scheduler; many invocations may run
//! concurrently against one pipeline value.

use std::time::Duration;

use chrono::Utc;
use pricewatch_core::{
    due_alerts, should_record, AppConfig, ChangePolicy, CheckStatus, FetchStrategy, PricePoint,
    Product, ProductPatch, ProductSnapshot, ProductStore, ScrapeOutcome, StoreError,
    UpdateBroadcaster,
};
use rust_decimal::Decimal;
use scraper::Html;
use uuid::Uuid;

use crate::adapters::SiteAdapter;
use crate::domain::extract_domain;
use crate::error::ScraperError;
use crate::fetch::PageFetcher;
use crate::rate_limit::DomainRateLimiter;

/// Everything one fetch stage produced: the price plus whatever name/image
/// the adapter found in the same document.
struct StageHit {
    price: Decimal,
    strategy: FetchStrategy,
    name: Option<String>,
    image_url: Option<String>,
}

/// The scrape orchestrator.
///
/// `Static` runs first; `Browser` only runs when the static stage yielded no
/// usable price and a browser fetcher is configured. The store and
/// broadcaster are the external collaborators from the core crate.
pub struct ScrapePipeline<S, B, Fs, Fb> {
    config: AppConfig,
    rate_limiter: DomainRateLimiter,
    store: S,
    broadcaster: B,
    static_fetcher: Fs,
    browser_fetcher: Option<Fb>,
}

impl<S, B, Fs, Fb> ScrapePipeline<S, B, Fs, Fb>
where
    S: ProductStore,
    B: UpdateBroadcaster,
    Fs: PageFetcher,
    Fb: PageFetcher,
{
    pub fn new(
        config: AppConfig,
        store: S,
        broadcaster: B,
        static_fetcher: Fs,
        browser_fetcher: Option<Fb>,
    ) -> Self {
        let rate_limiter =
            DomainRateLimiter::new(Duration::from_secs(config.rate_limit_interval_secs));
        Self {
            config,
            rate_limiter,
            store,
            broadcaster,
            static_fetcher,
            browser_fetcher,
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs one full check of the product: rate limit, fetch chain, adapter
    /// extraction, change detection, alert evaluation, broadcast.
    ///
    /// Fetch and parse failures are expected outcomes and produce
    /// [`ScrapeOutcome::Failed`] with the product marked `error`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the product vanished between enqueue and
    /// execution or a persistence write fails — the classes of error the
    /// external job scheduler is expected to retry.
    pub async fn check_product(&self, product_id: Uuid) -> Result<ScrapeOutcome, StoreError> {
        let product = self.store.product(product_id).await?;

        let domain = match extract_domain(&product.url, self.config.reject_private_hosts) {
            Ok(domain) => domain,
            Err(error) => {
                tracing::warn!(%product_id, url = %product.url, %error, "rejecting product URL");
                return self.record_failure(product_id, error.to_string()).await;
            }
        };

        self.rate_limiter.acquire(&domain).await;

        let adapter = SiteAdapter::for_host(&domain);

        let mut hit = self
            .try_stage(&self.static_fetcher, &adapter, &product.url)
            .await;

        if hit.is_err() {
            if let Some(browser) = &self.browser_fetcher {
                // Brief cooldown before the heavyweight stage; back-to-back
                // requests right after a failure look like a probe.
                tokio::time::sleep(Duration::from_millis(self.config.fetch_cooldown_ms)).await;
                hit = self.try_stage(browser, &adapter, &product.url).await;
            }
        }

        match hit {
            Ok(hit) => self.record_success(&product, hit).await,
            Err(error) => {
                self.record_failure(product_id, error.to_string())
                    .await
            }
        }
    }

    /// One fetch-and-extract stage. Fetch errors pass through; a document
    /// that yields no price degrades to [`ScraperError::NoPrice`]. Either
    /// way the failure is logged here and the caller decides whether a
    /// further stage gets a try.
    async fn try_stage<F: PageFetcher>(
        &self,
        fetcher: &F,
        adapter: &SiteAdapter,
        url: &str,
    ) -> Result<StageHit, ScraperError> {
        let strategy = fetcher.strategy();
        let markup = match fetcher.fetch(url).await {
            Ok(markup) => markup,
            Err(error) => {
                tracing::warn!(%strategy, url, %error, "fetch stage failed");
                return Err(error);
            }
        };

        let doc = Html::parse_document(&markup);
        let Some(price) = adapter.extract_price(&doc) else {
            tracing::debug!(%strategy, url, "document fetched but no price located");
            return Err(ScraperError::NoPrice {
                url: url.to_owned(),
            });
        };

        Ok(StageHit {
            price,
            strategy,
            name: adapter.extract_name(&doc),
            image_url: adapter.extract_image(&doc),
        })
    }

    async fn record_success(
        &self,
        product: &Product,
        hit: StageHit,
    ) -> Result<ScrapeOutcome, StoreError> {
        let now = Utc::now();

        // Never replace a known name or image with emptiness: patch fields
        // stay None unless the adapter actually found something.
        let patch = ProductPatch {
            current_price: Some(hit.price),
            check_status: Some(CheckStatus::Success),
            last_checked_at: Some(now),
            name: hit.name.clone(),
            image_url: hit.image_url.clone(),
        };
        let updated = self.store.apply_patch(product.id, patch).await?;

        let change_policy = ChangePolicy {
            min_delta: self.config.change_min_delta,
            heartbeat_hours: self.config.change_heartbeat_hours,
        };
        let last_point = self.store.latest_price_point(product.id).await?;
        if should_record(&change_policy, hit.price, last_point.as_ref(), now) {
            self.store
                .append_price_point(PricePoint {
                    product_id: product.id,
                    price: hit.price,
                    recorded_at: now,
                    source: hit.strategy,
                })
                .await?;
        }

        let alerts = self.store.active_alerts(product.id).await?;
        for alert in due_alerts(self.config.renotify, &alerts, hit.price) {
            tracing::info!(
                alert_id = %alert.id,
                owner_id = %alert.owner_id,
                product_id = %product.id,
                price = %hit.price,
                "price alert triggered"
            );
            self.store.mark_alert_notified(alert.id, now).await?;
            if let Err(error) = self
                .broadcaster
                .alert_triggered(alert, &updated, hit.price)
                .await
            {
                tracing::error!(alert_id = %alert.id, %error, "failed to emit price-drop event");
            }
        }

        self.broadcast(ProductSnapshot {
            product: updated,
            alert: alerts.into_iter().next(),
        })
        .await;

        tracing::info!(
            product_id = %product.id,
            price = %hit.price,
            strategy = %hit.strategy,
            "price check succeeded"
        );

        Ok(ScrapeOutcome::Success {
            price: hit.price,
            strategy: hit.strategy,
            name: hit.name,
            image_url: hit.image_url,
        })
    }

    async fn record_failure(
        &self,
        product_id: Uuid,
        reason: String,
    ) -> Result<ScrapeOutcome, StoreError> {
        let patch = ProductPatch {
            check_status: Some(CheckStatus::Error),
            last_checked_at: Some(Utc::now()),
            ..ProductPatch::default()
        };
        let updated = self.store.apply_patch(product_id, patch).await?;

        // Same payload shape as the success path: the subscriber view pairs
        // the product with its first alert regardless of outcome.
        let alert = self
            .store
            .active_alerts(product_id)
            .await?
            .into_iter()
            .next();
        self.broadcast(ProductSnapshot {
            product: updated,
            alert,
        })
        .await;

        tracing::warn!(%product_id, reason, "price check failed");
        Ok(ScrapeOutcome::Failed { reason })
    }

    /// Emission failures are logged and swallowed; a dead live-update
    /// transport must never fail the scrape itself.
    async fn broadcast(&self, snapshot: ProductSnapshot) {
        let product_id = snapshot.product.id;
        if let Err(error) = self.broadcaster.publish(&snapshot).await {
            tracing::error!(%product_id, %error, "failed to broadcast product update");
        }
    }
}

#[cfg(test)]
#[path = "orchestrate_test.rs"]
mod tests;
