//! Decoded oracle data: price rounds, reserve attestations and
//! cross-chain message status snapshots.

use crate::common::{Address, BlockNumber, Bytes32, Timestamp};
use crate::errors::{FeedError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Highest price the sanity bound accepts after decimal scaling.
pub const MAX_SANE_PRICE: i64 = 1_000_000;

/// Largest feed exponent the toolkit accepts.
pub const MAX_FEED_DECIMALS: u8 = 18;

/// Where a resolved price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
	ContractFeed,
	ExternalApi,
}

/// Why the orchestrator took the HTTP path instead of a contract feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
	NoClient,
	NoFeedForPair,
	ContractCallFailed,
}

/// The decoded result of one contract price read.
///
/// `raw_answer` and `decimals` are kept exact; the scaled price is only
/// computed (and rounded) at the output boundary via [`OracleReading::price`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleReading {
	pub raw_answer: i128,
	pub decimals: u8,
	pub round_id: String,
	pub started_at: Timestamp,
	pub updated_at: Timestamp,
}

impl OracleReading {
	/// Computes the human-readable price `raw_answer / 10^decimals`,
	/// rounded to 6 decimal places.
	///
	/// Enforces the sanity bounds from the feed contract interface:
	/// `raw_answer > 0`, `decimals <= 18`, and the scaled price in
	/// `(0, 10^6]`. A violation is [`FeedError::InvalidOracleData`], never
	/// a valid-but-strange price.
	pub fn price(&self) -> Result<Decimal> {
		if self.raw_answer <= 0 {
			return Err(FeedError::InvalidOracleData(format!(
				"Non-positive answer {} from round {}",
				self.raw_answer, self.round_id
			)));
		}
		if self.decimals > MAX_FEED_DECIMALS {
			return Err(FeedError::InvalidOracleData(format!(
				"Feed decimals {} out of range [0, {}]",
				self.decimals, MAX_FEED_DECIMALS
			)));
		}
		let price = Decimal::try_from_i128_with_scale(self.raw_answer, self.decimals as u32)
			.map_err(|e| FeedError::InvalidOracleData(format!("Unscalable answer: {}", e)))?;
		if price <= Decimal::ZERO || price > Decimal::from(MAX_SANE_PRICE) {
			return Err(FeedError::InvalidOracleData(format!(
				"Price {} outside sanity bound (0, {}]",
				price, MAX_SANE_PRICE
			)));
		}
		Ok(price.round_dp(6))
	}
}

/// Whether a proof-of-reserve feed currently reports backing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReserveStatus {
	Confirmed,
	Depleted,
}

/// Decoded proof-of-reserve attestation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttestationReading {
	pub feed_address: Address,
	pub asset_description: String,
	pub reserves_value: Decimal,
	pub reserves_raw: i128,
	pub decimals: u8,
	pub round_id: String,
	pub started_at: Timestamp,
	pub updated_at: Timestamp,
	pub status: ReserveStatus,
}

/// Observable lifecycle of a cross-chain message.
///
/// The reader only takes a snapshot from whatever events fall inside the
/// scanned block range; it does not track transitions over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CcipMessageStatus {
	Unknown,
	Sent,
	InProgress,
	Executed,
	Failed,
}

impl CcipMessageStatus {
	/// Numeric code reported alongside the symbolic status.
	pub fn status_code(&self) -> i32 {
		match self {
			CcipMessageStatus::Unknown => -1,
			CcipMessageStatus::Sent => 0,
			CcipMessageStatus::InProgress => 1,
			CcipMessageStatus::Executed => 2,
			CcipMessageStatus::Failed => 3,
		}
	}
}

/// Send-side event observed for a cross-chain message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CcipSendEvent {
	pub tx_hash: Bytes32,
	pub block_number: BlockNumber,
	pub source_chain_selector: u64,
	pub sender: Address,
}

/// Execute-side event observed for a cross-chain message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CcipExecuteEvent {
	pub tx_hash: Bytes32,
	pub block_number: BlockNumber,
	pub receiver: Address,
}

/// Snapshot of a cross-chain message derived from one event-log scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CcipMessageRecord {
	pub message_id: Bytes32,
	pub router_address: Address,
	pub status: CcipMessageStatus,
	pub status_code: i32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub send_event: Option<CcipSendEvent>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub execute_event: Option<CcipExecuteEvent>,
}
