//! `Loadboard` - freight load board service
//!
//! This library provides the core functionality for browsing and filtering
//! truck freight loads, watching and booking them, and keeping the driver's
//! local context (availability, saved searches, history) across sessions.

use std::sync::LazyLock;
use std::time::Duration;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

pub mod api;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod profile;
pub mod recommend;
pub mod search;
pub mod storage;
pub mod web;

// Re-export core types for public API
pub use booking::BookingConfirmation;
pub use catalog::LoadSource;
pub use config::LoadBoardConfig;
pub use error::LoadBoardError;
pub use models::{EquipmentType, Load, LoadStatus, SearchFilters};
pub use profile::{Availability, BookedLoad, HistoryEntry, SavedSearch};
pub use recommend::RecommendClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, LoadBoardError>;

/// Shared HTTP client for external services, with transient-error retries
pub static API_CLIENT: LazyLock<ClientWithMiddleware> = LazyLock::new(|| {
    let cfg = &config::get().recommend;
    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(cfg.max_retries);
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(u64::from(cfg.timeout_seconds)))
        .build()
        .expect("HTTP client accepts the configured timeout");
    ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build()
});
