//! Per-hostname request spacing.
//!
//! Advisory self-throttling to avoid tripping target-site defenses: at least
//! a fixed interval between requests to the same hostname. Distinct
//! hostnames are fully independent — there is no global cap.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::Mutex as AsyncMutex;
use tokio::time::Instant;

/// Shared last-request ledger, keyed by hostname.
///
/// Each hostname gets its own async mutex held across the wait, so two
/// concurrent acquirers for the same host serialize through the full
/// read-wait-write sequence instead of both reading a stale timestamp and
/// slipping through early. Acquirers for different hosts never contend
/// beyond the brief outer map lock.
#[derive(Debug)]
pub struct DomainRateLimiter {
    interval: Duration,
    slots: Mutex<HashMap<String, Arc<AsyncMutex<Option<Instant>>>>>,
}

impl DomainRateLimiter {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Blocks until at least the configured interval has elapsed since the
    /// last request to `domain`, then records the current time as that
    /// domain's last-request timestamp.
    pub async fn acquire(&self, domain: &str) {
        let slot = {
            let mut slots = self
                .slots
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(domain.to_owned()).or_default())
        };

        let mut last = slot.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.interval {
                let wait = self.interval - elapsed;
                tracing::debug!(domain, ?wait, "rate limiting");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }
}
