//! Contract price reader.
//!
//! Issues two read-only calls against an aggregator feed (latest round
//! data, then decimals), decodes the ABI-encoded results and validates
//! them against the sanity bounds in [`oracle_types::OracleReading`].

use crate::abi::AggregatorV3Interface;
use alloy::sol_types::SolCall;
use oracle_types::{Address, FeedError, LedgerClient, OracleReading, Result};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Gas ceiling for the round-data call.
const ROUND_DATA_GAS: u64 = 120_000;
/// Gas ceiling for the decimals call.
const DECIMALS_GAS: u64 = 60_000;

/// Fee/gas metadata accumulated across the reads of one operation, when
/// the transport surfaces any.
#[derive(Debug, Clone, Default)]
pub struct ReadCharges {
	pub gas_used: Option<u64>,
	pub fee_hbar: Option<Decimal>,
}

impl ReadCharges {
	pub(crate) fn absorb(&mut self, gas_used: Option<u64>, fee_hbar: Option<Decimal>) {
		if let Some(gas) = gas_used {
			*self.gas_used.get_or_insert(0) += gas;
		}
		if let Some(fee) = fee_hbar {
			*self.fee_hbar.get_or_insert(Decimal::ZERO) += fee;
		}
	}
}

/// A validated oracle reading plus the charges incurred obtaining it.
#[derive(Debug, Clone)]
pub struct FeedRead {
	pub reading: OracleReading,
	pub charges: ReadCharges,
}

/// Reads Chainlink-compatible price feeds through a [`LedgerClient`].
pub struct FeedReader;

impl FeedReader {
	/// Fetches and validates the latest round of a price feed.
	///
	/// Fails with [`FeedError::ContractCallFailed`] on RPC/revert/timeout
	/// and [`FeedError::InvalidOracleData`] when the decoded values are
	/// outside the sanity bounds. Callers decide whether to fall back.
	pub async fn latest_price(client: &dyn LedgerClient, feed: Address) -> Result<FeedRead> {
		let mut charges = ReadCharges::default();

		let round_call = AggregatorV3Interface::latestRoundDataCall {};
		let round_out = client
			.call_contract(feed, round_call.abi_encode(), ROUND_DATA_GAS)
			.await?;
		charges.absorb(round_out.gas_used, round_out.fee_hbar);

		let round = AggregatorV3Interface::latestRoundDataCall::abi_decode_returns(&round_out.data)
			.map_err(|e| {
				warn!("Malformed round data from feed {}: {}", feed, e);
				FeedError::ContractCallFailed(format!(
					"Malformed latestRoundData response from {}: {}",
					feed, e
				))
			})?;

		let decimals_call = AggregatorV3Interface::decimalsCall {};
		let decimals_out = client
			.call_contract(feed, decimals_call.abi_encode(), DECIMALS_GAS)
			.await?;
		charges.absorb(decimals_out.gas_used, decimals_out.fee_hbar);

		let decimals = AggregatorV3Interface::decimalsCall::abi_decode_returns(&decimals_out.data)
			.map_err(|e| {
				FeedError::ContractCallFailed(format!(
					"Malformed decimals response from {}: {}",
					feed, e
				))
			})?;

		let raw_answer = i128::try_from(round.answer).map_err(|_| {
			FeedError::InvalidOracleData(format!(
				"Answer {} from feed {} does not fit in 128 bits",
				round.answer, feed
			))
		})?;

		let reading = OracleReading {
			raw_answer,
			decimals,
			round_id: round.roundId.to_string(),
			started_at: u64::try_from(round.startedAt).unwrap_or(0),
			updated_at: u64::try_from(round.updatedAt).unwrap_or(0),
		};

		// Bounds check up front so an out-of-range answer surfaces as
		// InvalidOracleData here, not later at the output boundary.
		let price = reading.price()?;
		debug!(
			"Feed {} round {} decoded: price {} ({} decimals)",
			feed, reading.round_id, price, reading.decimals
		);

		Ok(FeedRead { reading, charges })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::{Address as EvmAddress, I256, U256};
	use alloy::sol_types::SolValue;
	use async_trait::async_trait;
	use oracle_types::{AccountId, ContractCallOutput, NetworkId};

	/// Ledger client stub returning canned ABI responses per selector.
	struct CannedClient {
		round_data: Vec<u8>,
		decimals: Vec<u8>,
	}

	impl CannedClient {
		fn new(answer: i128, decimals: u8) -> Self {
			let round = (
				U256::from(42u64),
				I256::try_from(answer).unwrap(),
				U256::from(1_726_000_000u64),
				U256::from(1_726_000_060u64),
				U256::from(42u64),
			);
			Self {
				round_data: round.abi_encode(),
				decimals: (decimals as u16,).abi_encode(),
			}
		}
	}

	#[async_trait]
	impl LedgerClient for CannedClient {
		fn network(&self) -> Option<NetworkId> {
			Some(NetworkId::Testnet)
		}

		fn operator_account(&self) -> Option<AccountId> {
			None
		}

		async fn call_contract(
			&self,
			_address: EvmAddress,
			calldata: Vec<u8>,
			_gas_limit: u64,
		) -> oracle_types::Result<ContractCallOutput> {
			let data = if calldata
				== (crate::abi::AggregatorV3Interface::latestRoundDataCall {}).abi_encode()
			{
				self.round_data.clone()
			} else {
				self.decimals.clone()
			};
			Ok(ContractCallOutput {
				data,
				gas_used: Some(21_000),
				fee_hbar: None,
			})
		}
	}

	#[tokio::test]
	async fn test_latest_price_happy_path() {
		let client = CannedClient::new(6_324_512_345_678, 8);
		let feed = EvmAddress::repeat_byte(0x11);

		let read = FeedReader::latest_price(&client, feed).await.unwrap();
		assert_eq!(read.reading.decimals, 8);
		assert_eq!(read.reading.price().unwrap().to_string(), "63245.123457");
		// Two reads, charges accumulated across both
		assert_eq!(read.charges.gas_used, Some(42_000));
	}

	#[tokio::test]
	async fn test_zero_answer_rejected() {
		let client = CannedClient::new(0, 8);
		let feed = EvmAddress::repeat_byte(0x11);

		let err = FeedReader::latest_price(&client, feed).await.unwrap_err();
		assert!(matches!(err, FeedError::InvalidOracleData(_)));
	}

	#[tokio::test]
	async fn test_oversized_decimals_rejected() {
		let client = CannedClient::new(100, 19);
		let feed = EvmAddress::repeat_byte(0x11);

		let err = FeedReader::latest_price(&client, feed).await.unwrap_err();
		assert!(matches!(err, FeedError::InvalidOracleData(_)));
	}
}
