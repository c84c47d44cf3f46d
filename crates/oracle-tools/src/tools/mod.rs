//! The seven tool implementations.
//!
//! Each tool owns its parameter schema and maps validated parameters
//! onto the readers and orchestrators in the lower crates. Parameter
//! extraction here assumes nothing: even though the registry validates
//! against the schema first, every accessor re-checks presence so a
//! tool invoked directly still fails with a typed error.

pub mod check_proof_of_reserve;
pub mod fetch_enterprise_metric;
pub mod get_ccip_message_status;
pub mod get_crypto_price;
pub mod get_historical_price;
pub mod get_multiple_prices;
pub mod get_price_statistics;

use oracle_types::{FeedError, Result};
use serde_json::Value;

pub(crate) fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str> {
	params
		.get(name)
		.and_then(Value::as_str)
		.ok_or_else(|| FeedError::InvalidArgument(format!("Missing string parameter: {}", name)))
}

/// Validator for 20-byte hex address parameters, attached to schemas so
/// malformed addresses are rejected before dispatch.
pub(crate) fn hex_address_validator(value: &Value) -> std::result::Result<(), String> {
	let text = value.as_str().unwrap_or_default();
	let stripped = text.trim().strip_prefix("0x").unwrap_or(text.trim());
	if stripped.len() == 40 && stripped.chars().all(|c| c.is_ascii_hexdigit()) {
		Ok(())
	} else {
		Err("Must be a 20-byte hex contract address".to_string())
	}
}

/// Validator for 32-byte hex message-id parameters.
pub(crate) fn hex_bytes32_validator(value: &Value) -> std::result::Result<(), String> {
	let text = value.as_str().unwrap_or_default();
	let stripped = text.trim().strip_prefix("0x").unwrap_or(text.trim());
	if stripped.len() == 64 && stripped.chars().all(|c| c.is_ascii_hexdigit()) {
		Ok(())
	} else {
		Err("Must be a 32-byte hex message id".to_string())
	}
}
