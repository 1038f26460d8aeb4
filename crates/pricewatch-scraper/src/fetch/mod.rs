//! Page acquisition strategies.
//!
//! Two [`PageFetcher`] implementations: [`StaticFetcher`] issues one cheap
//! HTTP GET, [`BrowserFetcher`] renders the page in headless Chrome. The
//! orchestrator chains them — static first, browser only when the static
//! stage produced no usable price. Neither fetcher retries internally;
//! retry-with-backoff belongs to the external job scheduler.

mod browser;
mod static_http;

use pricewatch_core::FetchStrategy;

use crate::error::ScraperError;

pub use browser::BrowserFetcher;
pub use static_http::StaticFetcher;

/// Browser user-agents rotated across requests. A fixed small pool of
/// realistic desktop strings; a per-request random pick keeps successive
/// requests from looking like the same client.
pub(crate) const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
];

pub(crate) fn random_user_agent() -> &'static str {
    use rand::seq::IndexedRandom;
    USER_AGENTS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// One way of turning a URL into page markup.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Label recorded on history points produced from this fetcher's markup.
    fn strategy(&self) -> FetchStrategy;

    /// Fetches the page and returns its full markup.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] on any transport, status, or rendering
    /// failure. The orchestrator treats this as a strategy failure, not a
    /// pipeline failure.
    async fn fetch(&self, url: &str) -> Result<String, ScraperError>;
}
