use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome classification of a product's most recent check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pending,
    Success,
    Blocked,
    Error,
}

impl CheckStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CheckStatus::Pending => "pending",
            CheckStatus::Success => "success",
            CheckStatus::Blocked => "blocked",
            CheckStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which acquisition strategy produced a price. Recorded on every
/// [`PricePoint`] so history shows whether a page needed full rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStrategy {
    Static,
    Browser,
}

impl FetchStrategy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FetchStrategy::Static => "static",
            FetchStrategy::Browser => "browser",
        }
    }
}

impl std::fmt::Display for FetchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked retail product.
///
/// Owned by the persistence collaborator; the pipeline reads it and proposes
/// updates through [`crate::store::ProductPatch`]. `url` is immutable and
/// globally unique; `current_price`, when present, is non-negative — both
/// invariants are enforced where products are created, upstream of this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub url: String,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub current_price: Option<Decimal>,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub check_status: CheckStatus,
}

impl Product {
    /// A product never checked, or last checked longer than `window` ago,
    /// is due for another pass. The trigger collaborator uses this to decide
    /// what to enqueue.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>, window: Duration) -> bool {
        match self.last_checked_at {
            None => true,
            Some(at) => now.signed_duration_since(at) > window,
        }
    }
}

/// One append-only price observation. Created only when the change detector
/// approves; never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    pub product_id: Uuid,
    pub price: Decimal,
    pub recorded_at: DateTime<Utc>,
    pub source: FetchStrategy,
}

/// A user's standing request to be told when a product's price reaches a
/// target. At most one alert per (owner, product) pair — enforced upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceAlert {
    pub id: Uuid,
    pub product_id: Uuid,
    pub owner_id: Uuid,
    pub target_price: Decimal,
    pub active: bool,
    pub last_notified_at: Option<DateTime<Utc>>,
}

impl PriceAlert {
    /// True when `price` has reached or beaten the target.
    #[must_use]
    pub fn is_triggered_by(&self, price: Decimal) -> bool {
        self.target_price >= price
    }
}

/// Result of a single orchestration run. Transient — handed back to the job
/// collaborator, never persisted as-is.
#[derive(Debug, Clone)]
pub enum ScrapeOutcome {
    Success {
        price: Decimal,
        strategy: FetchStrategy,
        name: Option<String>,
        image_url: Option<String>,
    },
    Failed {
        reason: String,
    },
}

impl ScrapeOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ScrapeOutcome::Success { .. })
    }
}

/// Payload for the "product updated" broadcast: the refreshed product plus
/// the first matching alert, if any.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSnapshot {
    pub product: Product,
    pub alert: Option<PriceAlert>,
}
