use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    /// Unparseable URL, unsupported scheme, or a refused host. Fatal for the
    /// product; retrying cannot help.
    #[error("invalid product URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// Any failure inside the headless-browser stage, from launch to markup
    /// capture. The stage converts every underlying error into this variant
    /// so nothing from the automation layer escapes the fetch chain.
    #[error("browser rendering failed for {url}: {reason}")]
    Browser { url: String, reason: String },

    /// Document fetched but no adapter rule located a price. An expected
    /// outcome on hostile markup, not an exception.
    #[error("no price located at {url}")]
    NoPrice { url: String },
}
