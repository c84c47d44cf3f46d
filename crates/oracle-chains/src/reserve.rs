//! Proof-of-reserve attestation reader.
//!
//! Same read pattern as the price feed reader, plus the feed's
//! `description` string. There is no HTTP equivalent for reserve data, so
//! every failure here is terminal for the calling tool.

use crate::abi::AggregatorV3Interface;
use crate::feed::ReadCharges;
use alloy::sol_types::SolCall;
use oracle_types::{
	Address, AttestationReading, FeedError, LedgerClient, Result, ReserveStatus,
};
use rust_decimal::Decimal;
use tracing::debug;

const ROUND_DATA_GAS: u64 = 120_000;
const DECIMALS_GAS: u64 = 60_000;
const DESCRIPTION_GAS: u64 = 60_000;

/// Largest feed exponent accepted, mirroring the price reader.
const MAX_DECIMALS: u8 = 18;

/// Reads proof-of-reserve feeds.
pub struct ReserveReader;

impl ReserveReader {
	/// Fetches the current reserve attestation from a feed.
	///
	/// Unlike price reads, a zero answer is a valid observation: it means
	/// the attested reserves are depleted, and the reading is returned
	/// with [`ReserveStatus::Depleted`]. Negative answers and out-of-range
	/// decimals are still [`FeedError::InvalidOracleData`].
	pub async fn check(
		client: &dyn LedgerClient,
		feed: Address,
	) -> Result<(AttestationReading, ReadCharges)> {
		let mut charges = ReadCharges::default();

		let round_out = client
			.call_contract(
				feed,
				AggregatorV3Interface::latestRoundDataCall {}.abi_encode(),
				ROUND_DATA_GAS,
			)
			.await?;
		charges.absorb(round_out.gas_used, round_out.fee_hbar);

		let round = AggregatorV3Interface::latestRoundDataCall::abi_decode_returns(&round_out.data)
			.map_err(|e| {
				FeedError::ContractCallFailed(format!(
					"Malformed latestRoundData response from {}: {}",
					feed, e
				))
			})?;

		let decimals_out = client
			.call_contract(
				feed,
				AggregatorV3Interface::decimalsCall {}.abi_encode(),
				DECIMALS_GAS,
			)
			.await?;
		charges.absorb(decimals_out.gas_used, decimals_out.fee_hbar);

		let decimals = AggregatorV3Interface::decimalsCall::abi_decode_returns(&decimals_out.data)
			.map_err(|e| {
				FeedError::ContractCallFailed(format!(
					"Malformed decimals response from {}: {}",
					feed, e
				))
			})?;

		let description_out = client
			.call_contract(
				feed,
				AggregatorV3Interface::descriptionCall {}.abi_encode(),
				DESCRIPTION_GAS,
			)
			.await?;
		charges.absorb(description_out.gas_used, description_out.fee_hbar);

		let asset_description =
			AggregatorV3Interface::descriptionCall::abi_decode_returns(&description_out.data)
				.map_err(|e| {
					FeedError::ContractCallFailed(format!(
						"Malformed description response from {}: {}",
						feed, e
					))
				})?;

		let reserves_raw = i128::try_from(round.answer).map_err(|_| {
			FeedError::InvalidOracleData(format!(
				"Reserve answer {} from feed {} does not fit in 128 bits",
				round.answer, feed
			))
		})?;

		if reserves_raw < 0 {
			return Err(FeedError::InvalidOracleData(format!(
				"Negative reserves {} reported by feed {}",
				reserves_raw, feed
			)));
		}
		if decimals > MAX_DECIMALS {
			return Err(FeedError::InvalidOracleData(format!(
				"Feed decimals {} out of range [0, {}]",
				decimals, MAX_DECIMALS
			)));
		}

		let reserves_value = Decimal::try_from_i128_with_scale(reserves_raw, decimals as u32)
			.map_err(|e| FeedError::InvalidOracleData(format!("Unscalable reserves: {}", e)))?
			.round_dp(6);

		let status = if reserves_value > Decimal::ZERO {
			ReserveStatus::Confirmed
		} else {
			ReserveStatus::Depleted
		};

		debug!(
			"Reserve feed {} ({}): {} ({:?})",
			feed, asset_description, reserves_value, status
		);

		Ok((
			AttestationReading {
				feed_address: feed,
				asset_description,
				reserves_value,
				reserves_raw,
				decimals,
				round_id: round.roundId.to_string(),
				started_at: u64::try_from(round.startedAt).unwrap_or(0),
				updated_at: u64::try_from(round.updatedAt).unwrap_or(0),
				status,
			},
			charges,
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::{Address as EvmAddress, I256, U256};
	use alloy::sol_types::SolValue;
	use async_trait::async_trait;
	use oracle_types::{AccountId, ContractCallOutput, NetworkId};

	struct CannedReserveClient {
		answer: i128,
		decimals: u8,
		description: String,
	}

	#[async_trait]
	impl LedgerClient for CannedReserveClient {
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
			let round_selector =
				AggregatorV3Interface::latestRoundDataCall {}.abi_encode();
			let decimals_selector = AggregatorV3Interface::decimalsCall {}.abi_encode();

			let data = if calldata == round_selector {
				(
					U256::from(7u64),
					I256::try_from(self.answer).unwrap(),
					U256::from(1_726_000_000u64),
					U256::from(1_726_000_060u64),
					U256::from(7u64),
				)
					.abi_encode()
			} else if calldata == decimals_selector {
				(self.decimals as u16,).abi_encode()
			} else {
				self.description.clone().abi_encode()
			};

			Ok(ContractCallOutput {
				data,
				gas_used: None,
				fee_hbar: None,
			})
		}
	}

	#[tokio::test]
	async fn test_confirmed_reserves_round_to_six_decimals() {
		let client = CannedReserveClient {
			// 21000.456789 with 6 feed decimals
			answer: 21_000_456_789,
			decimals: 6,
			description: "BTC.b PoR".to_string(),
		};
		let (reading, _) = ReserveReader::check(&client, EvmAddress::repeat_byte(0x22))
			.await
			.unwrap();
		assert_eq!(reading.status, ReserveStatus::Confirmed);
		assert_eq!(reading.reserves_value.to_string(), "21000.456789");
		assert_eq!(reading.asset_description, "BTC.b PoR");
	}

	#[tokio::test]
	async fn test_zero_reserves_are_depleted_not_an_error() {
		let client = CannedReserveClient {
			answer: 0,
			decimals: 8,
			description: "ETH PoR".to_string(),
		};
		let (reading, _) = ReserveReader::check(&client, EvmAddress::repeat_byte(0x22))
			.await
			.unwrap();
		assert_eq!(reading.status, ReserveStatus::Depleted);
		assert_eq!(reading.reserves_value, Decimal::ZERO);
	}

	#[tokio::test]
	async fn test_negative_reserves_are_invalid() {
		let client = CannedReserveClient {
			answer: -5,
			decimals: 8,
			description: "bad".to_string(),
		};
		let err = ReserveReader::check(&client, EvmAddress::repeat_byte(0x22))
			.await
			.unwrap_err();
		assert!(matches!(err, FeedError::InvalidOracleData(_)));
	}
}
