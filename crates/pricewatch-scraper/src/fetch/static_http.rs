//! Lightweight static HTTP fetch — the cheap first stage.

use std::time::Duration;

use pricewatch_core::FetchStrategy;
use reqwest::{redirect, Client};

use super::{random_user_agent, PageFetcher};
use crate::error::ScraperError;

/// Single-GET fetcher with realistic browser headers. Succeeds only on a
/// 2xx response; anything else is a strategy failure for the orchestrator
/// to fall through on.
pub struct StaticFetcher {
    client: Client,
}

impl StaticFetcher {
    /// Builds the fetcher with the given timeout and redirect budget.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, max_redirects: usize) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .redirect(redirect::Policy::limited(max_redirects))
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for StaticFetcher {
    fn strategy(&self) -> FetchStrategy {
        FetchStrategy::Static
    }

    async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, random_user_agent())
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header("DNT", "1")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/item/1"))
            .and(header_exists("user-agent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><span class='price'>$9.99</span></html>"),
            )
            .mount(&server)
            .await;

        let fetcher = StaticFetcher::new(5, 3).unwrap();
        let body = fetcher.fetch(&format!("{}/item/1", server.uri())).await.unwrap();
        assert!(body.contains("$9.99"));
    }

    #[tokio::test]
    async fn non_success_status_is_a_strategy_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let fetcher = StaticFetcher::new(5, 3).unwrap();
        let err = fetcher.fetch(&server.uri()).await.unwrap_err();
        assert!(
            matches!(err, ScraperError::UnexpectedStatus { status: 403, .. }),
            "expected UnexpectedStatus, got: {err:?}"
        );
    }

    #[tokio::test]
    async fn server_error_is_a_strategy_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let fetcher = StaticFetcher::new(5, 3).unwrap();
        let err = fetcher.fetch(&server.uri()).await.unwrap_err();
        assert!(matches!(
            err,
            ScraperError::UnexpectedStatus { status: 503, .. }
        ));
    }

    #[tokio::test]
    async fn follows_redirects_within_budget() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/moved"))
            .respond_with(
                ResponseTemplate::new(301)
                    .insert_header("location", format!("{}/final", server.uri()).as_str()),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/final"))
            .respond_with(ResponseTemplate::new(200).set_body_string("landed"))
            .mount(&server)
            .await;

        let fetcher = StaticFetcher::new(5, 3).unwrap();
        let body = fetcher.fetch(&format!("{}/moved", server.uri())).await.unwrap();
        assert_eq!(body, "landed");
    }
}
