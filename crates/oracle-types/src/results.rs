//! Tool result payloads and the transparency envelope.
//!
//! Every tool produces one variant of [`OperationResult`]; each variant
//! embeds an optional [`TransparencyEnvelope`] describing how and where
//! the data was obtained. Fields the current call knows nothing about are
//! omitted from serialization rather than null-filled.

use crate::common::{Address, BlockNumber, NetworkId, Timestamp, TradingPair};
use crate::oracles::{
	CcipMessageRecord, FallbackReason, PriceSource, ReserveStatus,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provenance of a result: one of the two ledger networks, or an external
/// HTTP API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeNetwork {
	Testnet,
	Mainnet,
	ExternalApi,
}

impl From<NetworkId> for EnvelopeNetwork {
	fn from(id: NetworkId) -> Self {
		match id {
			NetworkId::Testnet => EnvelopeNetwork::Testnet,
			NetworkId::Mainnet => EnvelopeNetwork::Mainnet,
		}
	}
}

/// Provenance record attached to every tool result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransparencyEnvelope {
	#[serde(rename = "type")]
	pub operation_type: String,
	pub network: EnvelopeNetwork,
	pub timestamp: DateTime<Utc>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub contract_address: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub transaction_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub hbar_fee: Option<Decimal>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub gas_used: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub verification_url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Map<String, Value>>,
}

/// A resolved price with its provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceResult {
	pub pair: TradingPair,
	pub price: Decimal,
	pub source: PriceSource,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub round_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub decimals: Option<u8>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<Timestamp>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fallback_reason: Option<FallbackReason>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub transparency: Option<TransparencyEnvelope>,
}

/// A price looked up for a specific calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPriceResult {
	pub pair: TradingPair,
	pub date: String,
	pub price: Decimal,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub transparency: Option<TransparencyEnvelope>,
}

/// Per-pair failure inside a batch resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPriceError {
	pub pair: TradingPair,
	pub error: String,
}

/// Outcome of a batch resolution. The batch itself never fails; per-pair
/// failures are partitioned into `errors`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPriceResult {
	pub results: Vec<PriceResult>,
	pub errors: Vec<BatchPriceError>,
	pub total_requested: usize,
	pub success_count: usize,
	pub error_count: usize,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub transparency: Option<TransparencyEnvelope>,
}

/// Market statistics for an asset. All fields beyond the current price are
/// optional; `None` means the upstream payload omitted the value, never an
/// interpolation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceStatisticsResult {
	pub pair: TradingPair,
	pub current_price: Decimal,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub change_24h_pct: Option<Decimal>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub change_7d_pct: Option<Decimal>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub change_30d_pct: Option<Decimal>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub volume_24h: Option<Decimal>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub market_cap: Option<Decimal>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub high_24h: Option<Decimal>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub low_24h: Option<Decimal>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub transparency: Option<TransparencyEnvelope>,
}

/// Proof-of-reserve attestation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveResult {
	pub feed_address: Address,
	pub asset_description: String,
	pub reserves: Decimal,
	pub reserves_raw: i128,
	pub decimals: u8,
	pub round_id: String,
	pub updated_at: Timestamp,
	pub status: ReserveStatus,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub transparency: Option<TransparencyEnvelope>,
}

/// Cross-chain message status result, including the scanned block range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CcipStatusResult {
	#[serde(flatten)]
	pub record: CcipMessageRecord,
	pub from_block: BlockNumber,
	pub to_block: BlockNumber,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub transparency: Option<TransparencyEnvelope>,
}

/// Enterprise metric result (FX rates or shipment tracking).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricResult {
	pub metric_type: String,
	pub id: String,
	pub data: Map<String, Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub transparency: Option<TransparencyEnvelope>,
}

/// Tagged union of every tool's result payload.
///
/// Serializes as the tool's flat JSON object (the tag is the tool's own
/// method name at the invocation surface, so no wrapper is needed here).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OperationResult {
	Price(PriceResult),
	HistoricalPrice(HistoricalPriceResult),
	MultiplePrices(BatchPriceResult),
	PriceStatistics(PriceStatisticsResult),
	ProofOfReserve(ReserveResult),
	CcipMessageStatus(CcipStatusResult),
	EnterpriseMetric(MetricResult),
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::oracles::CcipMessageStatus;

	#[test]
	fn test_envelope_omits_unknown_fields() {
		let envelope = TransparencyEnvelope {
			operation_type: "price_feed_read".to_string(),
			network: EnvelopeNetwork::Testnet,
			timestamp: Utc::now(),
			contract_address: Some("0x5974...".to_string()),
			transaction_id: None,
			hbar_fee: None,
			gas_used: Some(48_231),
			verification_url: None,
			details: None,
		};
		let json = serde_json::to_value(&envelope).unwrap();
		assert_eq!(json["type"], "price_feed_read");
		assert_eq!(json["network"], "testnet");
		assert!(json.get("transaction_id").is_none());
		assert!(json.get("hbar_fee").is_none());
		assert_eq!(json["gas_used"], 48_231);
	}

	#[test]
	fn test_ccip_result_flattens_record() {
		let result = CcipStatusResult {
			record: CcipMessageRecord {
				message_id: Default::default(),
				router_address: Default::default(),
				status: CcipMessageStatus::Unknown,
				status_code: -1,
				send_event: None,
				execute_event: None,
			},
			from_block: 100,
			to_block: 1100,
			transparency: None,
		};
		let json = serde_json::to_value(&result).unwrap();
		assert_eq!(json["status"], "unknown");
		assert_eq!(json["status_code"], -1);
		assert_eq!(json["from_block"], 100);
	}
}
