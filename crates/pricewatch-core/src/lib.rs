//! Domain types, policies, and collaborator contracts for pricewatch.
//!
//! The acquisition pipeline itself lives in `pricewatch-scraper`; this crate
//! holds everything the pipeline shares with its collaborators: the product
//! and alert model, the change-detection and alert-evaluation policies,
//! application configuration, and the [`ProductStore`]/[`UpdateBroadcaster`]
//! traits that abstract persistence and live-update fan-out.

mod app_config;
mod config;
pub mod history;
pub mod memory;
pub mod policy;
pub mod store;
mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use policy::{due_alerts, should_record, ChangePolicy, RenotifyPolicy};
pub use store::{BroadcastError, ProductPatch, ProductStore, StoreError, UpdateBroadcaster};
pub use types::{
    CheckStatus, FetchStrategy, PriceAlert, PricePoint, Product, ProductSnapshot, ScrapeOutcome,
};
