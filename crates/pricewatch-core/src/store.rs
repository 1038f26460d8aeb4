//! Collaborator contracts: persistence and live-update fan-out.
//!
//! The pipeline never touches a database or a websocket directly. It talks to
//! a [`ProductStore`] for reads and proposed writes, and to an
//! [`UpdateBroadcaster`] for "product updated" events. Production deployments
//! implement these against their own storage and transport;
//! [`crate::memory::MemoryStore`] is the in-process reference implementation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::types::{CheckStatus, PriceAlert, PricePoint, Product, ProductSnapshot};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The product vanished between enqueue and execution. The orchestrator
    /// re-raises this so the job collaborator's retry policy can see it.
    #[error("product {product_id} not found")]
    NotFound { product_id: Uuid },

    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },
}

#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("broadcast failed: {reason}")]
    Transport { reason: String },
}

/// Field-level update proposed by one scrape. `None` means "leave as is";
/// the pipeline never clears a known name or image by omitting it here.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub current_price: Option<Decimal>,
    pub check_status: Option<CheckStatus>,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub image_url: Option<String>,
}

/// Persistence collaborator. Each method is an independent, idempotent
/// operation — no transaction spans pipeline stages.
#[allow(async_fn_in_trait)]
pub trait ProductStore {
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no product has this id.
    async fn product(&self, id: Uuid) -> Result<Product, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no product has this id.
    async fn apply_patch(&self, id: Uuid, patch: ProductPatch) -> Result<Product, StoreError>;

    /// Most recent history point for the product, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    async fn latest_price_point(
        &self,
        product_id: Uuid,
    ) -> Result<Option<PricePoint>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the append fails.
    async fn append_price_point(&self, point: PricePoint) -> Result<(), StoreError>;

    /// All active alerts on the product.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    async fn active_alerts(&self, product_id: Uuid) -> Result<Vec<PriceAlert>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the stamp cannot be written.
    async fn mark_alert_notified(
        &self,
        alert_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}

/// Live-update collaborator. Emission failures are reported so the caller can
/// log them, but the orchestrator never lets them fail a scrape.
#[allow(async_fn_in_trait)]
pub trait UpdateBroadcaster {
    /// # Errors
    ///
    /// Returns [`BroadcastError`] when the payload could not be handed to the
    /// transport.
    async fn publish(&self, snapshot: &ProductSnapshot) -> Result<(), BroadcastError>;

    /// Emits a "price dropped" event for one triggered alert, for a mailer
    /// or push collaborator to compose from.
    ///
    /// # Errors
    ///
    /// Returns [`BroadcastError`] when the payload could not be handed to the
    /// transport.
    async fn alert_triggered(
        &self,
        alert: &PriceAlert,
        product: &Product,
        price: Decimal,
    ) -> Result<(), BroadcastError>;
}
