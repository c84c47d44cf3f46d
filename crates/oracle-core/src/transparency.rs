//! Transparency envelope construction.
//!
//! Pure helpers; they never fail. Fields not applicable to the current
//! call are omitted rather than null-filled, keeping the envelope
//! truthful about what is known.

use chrono::Utc;
use oracle_types::{
	Address, EnvelopeNetwork, NetworkId, TransparencyEnvelope,
};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

/// Block-explorer link for a contract on a network.
pub fn explorer_contract_url(network: NetworkId, contract: Address) -> String {
	format!("https://hashscan.io/{}/contract/{}", network, contract)
}

/// Envelope for a result obtained from an on-chain contract read.
pub fn contract_envelope(
	network: NetworkId,
	operation_type: &str,
	contract: Address,
	gas_used: Option<u64>,
	hbar_fee: Option<Decimal>,
	details: Option<Map<String, Value>>,
) -> TransparencyEnvelope {
	TransparencyEnvelope {
		operation_type: operation_type.to_string(),
		network: network.into(),
		timestamp: Utc::now(),
		contract_address: Some(contract.to_string()),
		transaction_id: None,
		hbar_fee,
		gas_used,
		verification_url: Some(explorer_contract_url(network, contract)),
		details,
	}
}

/// Envelope for an aggregate result spanning multiple underlying reads.
///
/// Carries no contract or endpoint reference of its own; the per-item
/// results embed their own envelopes.
pub fn summary_envelope(
	network: EnvelopeNetwork,
	operation_type: &str,
	details: Option<Map<String, Value>>,
) -> TransparencyEnvelope {
	TransparencyEnvelope {
		operation_type: operation_type.to_string(),
		network,
		timestamp: Utc::now(),
		contract_address: None,
		transaction_id: None,
		hbar_fee: None,
		gas_used: None,
		verification_url: None,
		details,
	}
}

/// Envelope for a result obtained from an external HTTP API.
pub fn api_envelope(
	operation_type: &str,
	endpoint: &str,
	details: Option<Map<String, Value>>,
) -> TransparencyEnvelope {
	TransparencyEnvelope {
		operation_type: operation_type.to_string(),
		network: EnvelopeNetwork::ExternalApi,
		timestamp: Utc::now(),
		contract_address: None,
		transaction_id: None,
		hbar_fee: None,
		gas_used: None,
		verification_url: Some(endpoint.to_string()),
		details,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_contract_envelope_fields() {
		let contract = Address::repeat_byte(0x42);
		let envelope = contract_envelope(
			NetworkId::Mainnet,
			"price_feed_read",
			contract,
			Some(30_000),
			None,
			None,
		);
		assert_eq!(envelope.network, EnvelopeNetwork::Mainnet);
		assert_eq!(envelope.gas_used, Some(30_000));
		assert!(envelope.hbar_fee.is_none());
		assert!(envelope
			.verification_url
			.unwrap()
			.starts_with("https://hashscan.io/mainnet/contract/0x"));
	}

	#[test]
	fn test_api_envelope_has_no_contract_fields() {
		let envelope = api_envelope("price_api_read", "https://api.example.com", None);
		assert_eq!(envelope.network, EnvelopeNetwork::ExternalApi);
		assert!(envelope.contract_address.is_none());
		assert_eq!(
			envelope.verification_url.as_deref(),
			Some("https://api.example.com")
		);
	}
}
