//! Address and message-id parsing.

use alloy::primitives::{Address, B256};
use oracle_types::{FeedError, Result};
use std::str::FromStr;

/// Parses a 20-byte hex contract address.
///
/// Rejects the zero address: registry placeholders use it to mark feeds
/// that are not yet deployed.
pub fn parse_contract_address(input: &str) -> Result<Address> {
	let address = Address::from_str(input.trim())
		.map_err(|_| FeedError::InvalidArgument(format!("Malformed contract address: {}", input)))?;
	if address == Address::ZERO {
		return Err(FeedError::InvalidArgument(
			"Contract address is a placeholder (zero address)".to_string(),
		));
	}
	Ok(address)
}

/// Parses a 32-byte hex cross-chain message id.
pub fn parse_message_id(input: &str) -> Result<B256> {
	B256::from_str(input.trim())
		.map_err(|_| FeedError::InvalidArgument(format!("Malformed message id: {}", input)))
}
