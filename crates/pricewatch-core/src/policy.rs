//! Derived-decision policies: change detection and alert evaluation.
//!
//! Both are pure functions over domain values so they can be tested without a
//! store or a fetcher. The orchestrator applies them after a successful price
//! extraction and delegates the resulting writes to the store.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::types::{PriceAlert, PricePoint};

/// Thresholds for recording a new history point.
#[derive(Debug, Clone, Copy)]
pub struct ChangePolicy {
    /// Minimum relative difference from the last recorded price, as a
    /// fraction (0.01 = 1%).
    pub min_delta: Decimal,
    /// Record a heartbeat point once this much time has passed since the
    /// last one, even if the price is unchanged. Bounds history growth from
    /// below as well as above.
    pub heartbeat_hours: i64,
}

impl Default for ChangePolicy {
    fn default() -> Self {
        Self {
            min_delta: Decimal::new(1, 2),
            heartbeat_hours: 24,
        }
    }
}

/// Whether a triggered-and-notified alert may fire again on later drops.
///
/// Observed variants of the alert model disagree on this, so it is a
/// configuration knob rather than a hard-coded rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenotifyPolicy {
    /// Once `last_notified_at` is set the alert never fires again.
    Once,
    /// The alert fires on every qualifying observation.
    EveryTrigger,
}

/// Decides whether a freshly observed price is worth a new history point.
///
/// True when there is no prior point, the relative delta from the prior
/// price exceeds `policy.min_delta`, or the prior point is older than the
/// heartbeat interval.
#[must_use]
pub fn should_record(
    policy: &ChangePolicy,
    new_price: Decimal,
    last: Option<&PricePoint>,
    now: DateTime<Utc>,
) -> bool {
    let Some(last) = last else {
        return true;
    };

    if last.price.is_zero() {
        // A zero prior price would make the relative delta undefined; any
        // positive observation after one is a change worth keeping.
        return true;
    }

    let delta = (new_price - last.price).abs() / last.price;
    if delta > policy.min_delta {
        return true;
    }

    now.signed_duration_since(last.recorded_at) > Duration::hours(policy.heartbeat_hours)
}

/// Selects the alerts that should fire for `new_price`.
///
/// An alert qualifies when it is active and its target has been reached or
/// beaten. Under [`RenotifyPolicy::Once`], alerts that were ever notified are
/// excluded. Stamping `last_notified_at` on the returned alerts is the
/// caller's responsibility.
#[must_use]
pub fn due_alerts<'a>(
    policy: RenotifyPolicy,
    alerts: &'a [PriceAlert],
    new_price: Decimal,
) -> Vec<&'a PriceAlert> {
    alerts
        .iter()
        .filter(|alert| alert.active && alert.is_triggered_by(new_price))
        .filter(|alert| match policy {
            RenotifyPolicy::Once => alert.last_notified_at.is_none(),
            RenotifyPolicy::EveryTrigger => true,
        })
        .collect()
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod tests;
