//! HTTP readers for external data services.
//!
//! Thin clients over the spot/historical/statistics price API, the FX
//! rate API and the shipment tracking API. Response parsing is kept in
//! free functions over `serde_json::Value` so the decoding rules are
//! testable without a live endpoint.
//!
//! All clients share the same policy: one GET per operation, a bounded
//! request timeout, non-2xx or malformed bodies reported as
//! [`oracle_types::FeedError::ApiError`], timeouts as
//! [`oracle_types::FeedError::Timeout`]. Nothing is retried.

pub mod fx;
pub mod price;
pub mod tracking;

pub use fx::{FxApi, FxRates};
pub use price::{MarketStatistics, PriceApi};
pub use tracking::{ShipmentStatus, TrackingApi};

use oracle_types::FeedError;
use std::time::Duration;

/// Builds the shared reqwest client with the configured timeout.
pub(crate) fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, FeedError> {
	reqwest::Client::builder()
		.timeout(Duration::from_secs(timeout_secs))
		.user_agent("oracle-feed-tools/0.1")
		.build()
		.map_err(|e| FeedError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Maps a transport-level reqwest error into the toolkit taxonomy.
pub(crate) fn map_transport_error(context: &str, err: reqwest::Error) -> FeedError {
	if err.is_timeout() {
		FeedError::Timeout(format!("{} timed out", context))
	} else {
		FeedError::ApiError(format!("{} failed: {}", context, err))
	}
}
