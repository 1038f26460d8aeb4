//! Price-acquisition pipeline.
//!
//! Given a product URL, obtain a current numeric price from a hostile,
//! JavaScript-dependent retailer page: rate-limit per hostname, try a cheap
//! static HTTP fetch, fall back to a headless-browser render, run the
//! hostname's site adapter over the markup, then apply the change-detection
//! and alert policies. Failure on any single attempt is an expected outcome,
//! not a bug; the external job scheduler retries whole invocations.

pub mod adapters;
mod domain;
pub mod error;
pub mod fetch;
mod normalize;
mod orchestrate;
pub mod rate_limit;

pub use adapters::{Site, SiteAdapter};
pub use domain::extract_domain;
pub use error::ScraperError;
pub use fetch::{BrowserFetcher, PageFetcher, StaticFetcher};
pub use normalize::parse_price_text;
pub use orchestrate::ScrapePipeline;
pub use rate_limit::DomainRateLimiter;
