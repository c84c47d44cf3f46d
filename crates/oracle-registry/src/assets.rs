//! Supported assets and their external API identifiers.

use oracle_types::{FeedError, Result, TradingPair};

/// The seven base assets the toolkit can price.
pub const SUPPORTED_ASSETS: [&str; 7] = ["HBAR", "BTC", "ETH", "LINK", "USDC", "USDT", "DAI"];

/// Quote currencies accepted for any pair.
pub const SUPPORTED_QUOTES: [&str; 2] = ["USD", "EUR"];

/// Maps a canonical asset symbol to its external price-API identifier.
pub fn api_asset_id(base: &str) -> Option<&'static str> {
	match base {
		"HBAR" => Some("hedera-hashgraph"),
		"BTC" => Some("bitcoin"),
		"ETH" => Some("ethereum"),
		"LINK" => Some("chainlink"),
		"USDC" => Some("usd-coin"),
		"USDT" => Some("tether"),
		"DAI" => Some("dai"),
		_ => None,
	}
}

/// Validates that a canonicalized pair is within the supported universe.
///
/// Fails before any network access is attempted.
pub fn validate_pair(pair: &TradingPair) -> Result<()> {
	if !SUPPORTED_ASSETS.contains(&pair.base.as_str()) {
		return Err(FeedError::InvalidArgument(format!(
			"Unsupported base asset '{}'; supported: {}",
			pair.base,
			SUPPORTED_ASSETS.join(", ")
		)));
	}
	if !SUPPORTED_QUOTES.contains(&pair.quote.as_str()) {
		return Err(FeedError::InvalidArgument(format!(
			"Unsupported quote currency '{}'; supported: {}",
			pair.quote,
			SUPPORTED_QUOTES.join(", ")
		)));
	}
	Ok(())
}
