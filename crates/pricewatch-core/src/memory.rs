//! In-memory reference implementations of the collaborator traits.
//!
//! Backs the CLI's one-off checks and the pipeline's tests. Not intended for
//! production use: state lives in a process-local map and disappears on exit.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::store::{BroadcastError, ProductPatch, ProductStore, StoreError, UpdateBroadcaster};
use crate::types::{PriceAlert, PricePoint, Product, ProductSnapshot};

#[derive(Debug, Default)]
struct Inner {
    products: HashMap<Uuid, Product>,
    history: HashMap<Uuid, Vec<PricePoint>>,
    alerts: HashMap<Uuid, Vec<PriceAlert>>,
}

/// Process-local [`ProductStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a product, replacing any existing entry with the same id.
    pub fn insert_product(&self, product: Product) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.products.insert(product.id, product);
        }
    }

    /// Registers an alert under its product.
    pub fn insert_alert(&self, alert: PriceAlert) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.alerts.entry(alert.product_id).or_default().push(alert);
        }
    }

    /// Removes a product, simulating it vanishing between enqueue and run.
    pub fn remove_product(&self, id: Uuid) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.products.remove(&id);
        }
    }

    /// Full history for a product, oldest first.
    #[must_use]
    pub fn history(&self, product_id: Uuid) -> Vec<PricePoint> {
        self.inner
            .lock()
            .map(|inner| inner.history.get(&product_id).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StoreError> {
        self.inner.lock().map_err(|e| StoreError::Unavailable {
            reason: format!("lock poisoned: {e}"),
        })
    }
}

impl ProductStore for MemoryStore {
    async fn product(&self, id: Uuid) -> Result<Product, StoreError> {
        let inner = self.lock()?;
        inner
            .products
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { product_id: id })
    }

    async fn apply_patch(&self, id: Uuid, patch: ProductPatch) -> Result<Product, StoreError> {
        let mut inner = self.lock()?;
        let product = inner
            .products
            .get_mut(&id)
            .ok_or(StoreError::NotFound { product_id: id })?;

        if let Some(price) = patch.current_price {
            product.current_price = Some(price);
        }
        if let Some(status) = patch.check_status {
            product.check_status = status;
        }
        if let Some(at) = patch.last_checked_at {
            product.last_checked_at = Some(at);
        }
        if let Some(name) = patch.name {
            product.name = Some(name);
        }
        if let Some(image_url) = patch.image_url {
            product.image_url = Some(image_url);
        }

        Ok(product.clone())
    }

    async fn latest_price_point(
        &self,
        product_id: Uuid,
    ) -> Result<Option<PricePoint>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .history
            .get(&product_id)
            .and_then(|points| points.last().cloned()))
    }

    async fn append_price_point(&self, point: PricePoint) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.history.entry(point.product_id).or_default().push(point);
        Ok(())
    }

    async fn active_alerts(&self, product_id: Uuid) -> Result<Vec<PriceAlert>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .alerts
            .get(&product_id)
            .map(|alerts| alerts.iter().filter(|a| a.active).cloned().collect())
            .unwrap_or_default())
    }

    async fn mark_alert_notified(
        &self,
        alert_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        for alerts in inner.alerts.values_mut() {
            if let Some(alert) = alerts.iter_mut().find(|a| a.id == alert_id) {
                alert.last_notified_at = Some(at);
                return Ok(());
            }
        }
        Ok(())
    }
}

/// Broadcaster that drops every payload. Stands in where no live-update
/// transport is wired up.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBroadcaster;

impl UpdateBroadcaster for NullBroadcaster {
    async fn publish(&self, _snapshot: &ProductSnapshot) -> Result<(), BroadcastError> {
        Ok(())
    }

    async fn alert_triggered(
        &self,
        _alert: &PriceAlert,
        _product: &Product,
        _price: rust_decimal::Decimal,
    ) -> Result<(), BroadcastError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CheckStatus, FetchStrategy};

    fn product() -> Product {
        Product {
            id: Uuid::new_v4(),
            url: "https://shop.example.com/item/1".to_owned(),
            name: None,
            image_url: None,
            current_price: None,
            last_checked_at: None,
            check_status: CheckStatus::Pending,
        }
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let store = MemoryStore::new();
        let err = store.product(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn patch_updates_only_provided_fields() {
        let store = MemoryStore::new();
        let mut p = product();
        p.name = Some("Widget".to_owned());
        let id = p.id;
        store.insert_product(p);

        let patched = store
            .apply_patch(
                id,
                ProductPatch {
                    check_status: Some(CheckStatus::Error),
                    last_checked_at: Some(Utc::now()),
                    ..ProductPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(patched.check_status, CheckStatus::Error);
        assert_eq!(patched.name.as_deref(), Some("Widget"));
        assert!(patched.current_price.is_none());
    }

    #[tokio::test]
    async fn history_appends_and_returns_latest() {
        let store = MemoryStore::new();
        let product_id = Uuid::new_v4();
        for (price, minutes) in [("10.00", 30), ("12.00", 10)] {
            store
                .append_price_point(PricePoint {
                    product_id,
                    price: price.parse().unwrap(),
                    recorded_at: Utc::now() - chrono::Duration::minutes(minutes),
                    source: FetchStrategy::Static,
                })
                .await
                .unwrap();
        }

        let latest = store.latest_price_point(product_id).await.unwrap().unwrap();
        assert_eq!(latest.price, "12.00".parse().unwrap());
        assert_eq!(store.history(product_id).len(), 2);
    }

    #[tokio::test]
    async fn active_alerts_filters_inactive() {
        let store = MemoryStore::new();
        let product_id = Uuid::new_v4();
        for active in [true, false] {
            store.insert_alert(PriceAlert {
                id: Uuid::new_v4(),
                product_id,
                owner_id: Uuid::new_v4(),
                target_price: "50".parse().unwrap(),
                active,
                last_notified_at: None,
            });
        }

        let alerts = store.active_alerts(product_id).await.unwrap();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].active);
    }

    #[tokio::test]
    async fn mark_alert_notified_stamps_timestamp() {
        let store = MemoryStore::new();
        let product_id = Uuid::new_v4();
        let alert_id = Uuid::new_v4();
        store.insert_alert(PriceAlert {
            id: alert_id,
            product_id,
            owner_id: Uuid::new_v4(),
            target_price: "50".parse().unwrap(),
            active: true,
            last_notified_at: None,
        });

        store.mark_alert_notified(alert_id, Utc::now()).await.unwrap();
        let alerts = store.active_alerts(product_id).await.unwrap();
        assert!(alerts[0].last_notified_at.is_some());
    }
}
