//! Headless-browser fetch — the expensive fallback stage.
//!
//! Launches an isolated headless Chrome per fetch, navigates with a bounded
//! timeout, best-effort dismisses known cookie/consent overlays, waits a
//! short settle interval, and captures the rendered markup. Every failure in
//! here is converted to [`ScraperError::Browser`]; nothing from the
//! automation layer propagates past the fetch chain.

use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use pricewatch_core::FetchStrategy;

use super::{random_user_agent, PageFetcher};
use crate::error::ScraperError;

/// Known cookie/consent overlay buttons, tried in order. Each attempt is
/// independently fallible; a missed dismiss must not abort the scrape.
const DISMISS_RULES: &[&str] = &[
    "#onetrust-reject-all-handler",
    "#onetrust-accept-btn-handler",
    "#sp-cc-rejectall-link",
    "[aria-label*=\"Close\"]",
    ".modal-close",
];

const DISMISS_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(2);
const POST_CLICK_PAUSE: Duration = Duration::from_millis(500);

pub struct BrowserFetcher {
    nav_timeout: Duration,
    settle: Duration,
}

impl BrowserFetcher {
    #[must_use]
    pub fn new(nav_timeout_secs: u64, settle_ms: u64) -> Self {
        Self {
            nav_timeout: Duration::from_secs(nav_timeout_secs),
            settle: Duration::from_millis(settle_ms),
        }
    }

    async fn render(&self, url: &str) -> Result<String, ScraperError> {
        let config = BrowserConfig::builder()
            .window_size(1920, 1080)
            .arg("--disable-blink-features=AutomationControlled")
            .build()
            .map_err(|reason| ScraperError::Browser {
                url: url.to_owned(),
                reason,
            })?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| browser_err(url, &e))?;

        // The handler stream must be polled for the CDP connection to make
        // progress; event-level errors are not fetch failures.
        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(error) = event {
                    tracing::trace!(%error, "browser event error");
                }
            }
        });

        let result = self.capture(&browser, url).await;

        browser.close().await.ok();
        browser.wait().await.ok();
        events.abort();

        result
    }

    async fn capture(&self, browser: &Browser, url: &str) -> Result<String, ScraperError> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| browser_err(url, &e))?;
        page.set_user_agent(random_user_agent())
            .await
            .map_err(|e| browser_err(url, &e))?;

        match tokio::time::timeout(self.nav_timeout, page.goto(url)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(browser_err(url, &e)),
            Err(_) => {
                return Err(ScraperError::Browser {
                    url: url.to_owned(),
                    reason: format!("navigation timed out after {:?}", self.nav_timeout),
                })
            }
        }

        dismiss_popups(&page).await;

        // Let late scripts (price widgets, lazy images) finish rendering.
        tokio::time::sleep(self.settle).await;

        page.content().await.map_err(|e| browser_err(url, &e))
    }
}

impl PageFetcher for BrowserFetcher {
    fn strategy(&self) -> FetchStrategy {
        FetchStrategy::Browser
    }

    async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        self.render(url).await
    }
}

async fn dismiss_popups(page: &Page) {
    for rule in DISMISS_RULES {
        let attempt = tokio::time::timeout(DISMISS_ATTEMPT_TIMEOUT, async {
            if let Ok(element) = page.find_element(*rule).await {
                match element.click().await {
                    Ok(_) => tokio::time::sleep(POST_CLICK_PAUSE).await,
                    Err(error) => tracing::trace!(rule = %rule, %error, "dismiss click failed"),
                }
            }
        })
        .await;

        if attempt.is_err() {
            tracing::trace!(rule = %rule, "dismiss attempt timed out");
        }
    }
}

fn browser_err(url: &str, error: &dyn std::fmt::Display) -> ScraperError {
    ScraperError::Browser {
        url: url.to_owned(),
        reason: error.to_string(),
    }
}
