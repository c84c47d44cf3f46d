//! Sequential batch resolution.
//!
//! Pairs are resolved one at a time with a fixed delay between
//! iterations to respect upstream rate limits. A per-pair failure is
//! captured, never propagated: the batch always returns a result, even
//! when every pair failed.

use crate::resolver::PriceResolver;
use oracle_types::{
	BatchPriceError, BatchPriceResult, LedgerClient, Result, TradingPair,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default delay between consecutive pair resolutions.
pub const DEFAULT_INTER_CALL_DELAY: Duration = Duration::from_millis(200);

/// Resolves lists of pairs through a [`PriceResolver`].
pub struct BatchResolver {
	resolver: Arc<PriceResolver>,
	delay: Duration,
}

impl BatchResolver {
	pub fn new(resolver: Arc<PriceResolver>) -> Self {
		Self {
			resolver,
			delay: DEFAULT_INTER_CALL_DELAY,
		}
	}

	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = delay;
		self
	}

	/// Resolves every `(base, quote)` request, partitioning successes
	/// from failures. The delay runs between iterations only, not after
	/// the last one.
	pub async fn resolve_many(
		&self,
		requests: &[(String, String)],
		client: Option<&dyn LedgerClient>,
	) -> BatchPriceResult {
		let total_requested = requests.len();
		let mut results = Vec::new();
		let mut errors = Vec::new();

		for (index, (base, quote)) in requests.iter().enumerate() {
			if index > 0 {
				tokio::time::sleep(self.delay).await;
			}

			match self.resolve_one(base, quote, client).await {
				Ok(result) => results.push(result),
				Err((pair, error)) => {
					warn!("Batch item {} failed: {}", pair, error);
					errors.push(BatchPriceError {
						pair,
						error: error.to_string(),
					});
				}
			}
		}

		debug!(
			"Batch complete: {}/{} resolved",
			results.len(),
			total_requested
		);

		BatchPriceResult {
			success_count: results.len(),
			error_count: errors.len(),
			total_requested,
			results,
			errors,
			transparency: None,
		}
	}

	async fn resolve_one(
		&self,
		base: &str,
		quote: &str,
		client: Option<&dyn LedgerClient>,
	) -> std::result::Result<oracle_types::PriceResult, (TradingPair, oracle_types::FeedError)> {
		// Validate before any network call; a malformed request still
		// needs a pair-shaped key in the error list.
		let pair = match TradingPair::new(base, quote) {
			Ok(pair) => pair,
			Err(message) => {
				let placeholder = TradingPair {
					base: base.trim().to_ascii_uppercase(),
					quote: quote.trim().to_ascii_uppercase(),
				};
				return Err((
					placeholder,
					oracle_types::FeedError::InvalidArgument(message),
				));
			}
		};

		self.resolve(&pair, client).await.map_err(|e| (pair, e))
	}

	async fn resolve(
		&self,
		pair: &TradingPair,
		client: Option<&dyn LedgerClient>,
	) -> Result<oracle_types::PriceResult> {
		self.resolver.resolve(pair, client).await
	}
}
