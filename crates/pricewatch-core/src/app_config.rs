use rust_decimal::Decimal;

use crate::policy::RenotifyPolicy;

/// Runtime configuration for the acquisition pipeline.
///
/// Loaded from `PRICEWATCH_*` environment variables by
/// [`crate::load_app_config`]; every field has a default so a bare
/// environment is valid.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Timeout for the lightweight static HTTP fetch.
    pub static_timeout_secs: u64,
    /// Redirect budget for the static fetch.
    pub static_max_redirects: usize,
    /// Whether the browser-rendered fallback is attempted at all. Off in
    /// environments without a Chrome binary.
    pub browser_enabled: bool,
    /// Navigation timeout for the browser fetch (DOM-content level, not
    /// network idle — retailer pages rarely go idle).
    pub browser_nav_timeout_secs: u64,
    /// Settle wait after navigation and popup dismissal, before capturing
    /// the rendered markup.
    pub browser_settle_ms: u64,
    /// Pause between a failed static stage and the browser stage.
    pub fetch_cooldown_ms: u64,
    /// Minimum spacing between requests to the same hostname.
    pub rate_limit_interval_secs: u64,
    /// Minimum relative price delta (fraction) for a new history point.
    pub change_min_delta: Decimal,
    /// Heartbeat interval for recording unchanged prices.
    pub change_heartbeat_hours: i64,
    /// Whether a notified alert may fire again on later drops.
    pub renotify: RenotifyPolicy,
    /// Refuse to scrape localhost and private-network hosts.
    pub reject_private_hosts: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            static_timeout_secs: 10,
            static_max_redirects: 3,
            browser_enabled: true,
            browser_nav_timeout_secs: 20,
            browser_settle_ms: 2000,
            fetch_cooldown_ms: 2000,
            rate_limit_interval_secs: 5,
            change_min_delta: Decimal::new(1, 2),
            change_heartbeat_hours: 24,
            renotify: RenotifyPolicy::Once,
            reject_private_hosts: true,
        }
    }
}
