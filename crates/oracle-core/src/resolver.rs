//! The price resolution orchestrator.

use crate::transparency::{api_envelope, contract_envelope};
use async_trait::async_trait;
use oracle_chains::{FeedRead, FeedReader};
use oracle_http::PriceApi;
use oracle_registry::{api_asset_id, feed_address, resolve_network, validate_pair};
use oracle_types::{
	FallbackReason, FeedError, LedgerClient, NetworkId, PriceResult, PriceSource, Result,
	TradingPair,
};
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Seam over the external spot-price API so the orchestrator can be
/// exercised without a live endpoint.
#[async_trait]
pub trait SpotPriceSource: Send + Sync {
	/// Endpoint identifier recorded in transparency envelopes.
	fn endpoint(&self) -> String;

	async fn spot_price(&self, asset_id: &str, quote: &str) -> Result<Decimal>;
}

#[async_trait]
impl SpotPriceSource for PriceApi {
	fn endpoint(&self) -> String {
		PriceApi::endpoint(self).to_string()
	}

	async fn spot_price(&self, asset_id: &str, quote: &str) -> Result<Decimal> {
		PriceApi::spot_price(self, asset_id, quote).await
	}
}

/// Resolves a trading pair to a price through the contract feed when
/// possible, the external API otherwise.
pub struct PriceResolver {
	spot_source: Arc<dyn SpotPriceSource>,
}

impl PriceResolver {
	pub fn new(spot_source: Arc<dyn SpotPriceSource>) -> Self {
		Self { spot_source }
	}

	/// The decision procedure:
	///
	/// 1. Validate the pair against the supported universe; violations
	///    fail immediately, no network access.
	/// 2. Resolve the network from the optional client (absent means
	///    testnet).
	/// 3. With a client and a registered feed, attempt the contract
	///    read. Fallback-eligible failures (RPC, timeout, out-of-bounds
	///    oracle data) are logged and swallowed, and the call falls
	///    through to the API; any other error propagates.
	/// 4. Attempt the spot-price API. Failure here is terminal:
	///    [`FeedError::AllSourcesUnavailable`] carrying the HTTP error.
	pub async fn resolve(
		&self,
		pair: &TradingPair,
		client: Option<&dyn LedgerClient>,
	) -> Result<PriceResult> {
		validate_pair(pair)?;
		let profile = resolve_network(client);

		let mut fallback_reason = FallbackReason::NoClient;
		if let Some(client) = client {
			match feed_address(profile.id, pair) {
				Some(feed) => match FeedReader::latest_price(client, feed).await {
					Ok(read) => {
						return self.contract_result(pair, profile.id, feed, read);
					}
					Err(e) if e.is_fallback_eligible() => {
						// Deliberate swallow: the contract path is
						// best-effort and its error never surfaces.
						warn!(
							"Contract read for {} on {} failed ({}); falling back to API",
							pair, profile.id, e
						);
						fallback_reason = FallbackReason::ContractCallFailed;
					}
					Err(e) => return Err(e),
				},
				None => {
					debug!("No feed registered for {} on {}", pair, profile.id);
					fallback_reason = FallbackReason::NoFeedForPair;
				}
			}
		}

		self.api_result(pair, fallback_reason).await
	}

	fn contract_result(
		&self,
		pair: &TradingPair,
		network: NetworkId,
		feed: oracle_types::Address,
		read: FeedRead,
	) -> Result<PriceResult> {
		let price = read.reading.price()?;

		let mut details = Map::new();
		details.insert("round_id".to_string(), json!(read.reading.round_id));
		details.insert("pair".to_string(), json!(pair.to_string()));

		Ok(PriceResult {
			pair: pair.clone(),
			price,
			source: PriceSource::ContractFeed,
			round_id: Some(read.reading.round_id.clone()),
			decimals: Some(read.reading.decimals),
			updated_at: Some(read.reading.updated_at),
			fallback_reason: None,
			transparency: Some(contract_envelope(
				network,
				"price_feed_read",
				feed,
				read.charges.gas_used,
				read.charges.fee_hbar,
				Some(details),
			)),
		})
	}

	async fn api_result(
		&self,
		pair: &TradingPair,
		fallback_reason: FallbackReason,
	) -> Result<PriceResult> {
		let asset_id = api_asset_id(&pair.base)
			.ok_or_else(|| FeedError::UnsupportedAsset(pair.base.clone()))?;

		let price = self
			.spot_source
			.spot_price(asset_id, &pair.quote)
			.await
			.map_err(|e| {
				// Terminal: only the HTTP failure is reported, the
				// earlier contract error (if any) was already logged.
				FeedError::AllSourcesUnavailable(e.to_string())
			})?;

		let mut details = Map::new();
		details.insert("pair".to_string(), json!(pair.to_string()));
		details.insert(
			"fallback_reason".to_string(),
			serde_json::to_value(fallback_reason).unwrap_or(Value::Null),
		);

		Ok(PriceResult {
			pair: pair.clone(),
			price,
			source: PriceSource::ExternalApi,
			round_id: None,
			decimals: None,
			updated_at: None,
			fallback_reason: Some(fallback_reason),
			transparency: Some(api_envelope(
				"price_api_read",
				&self.spot_source.endpoint(),
				Some(details),
			)),
		})
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use alloy::primitives::{I256, U256};
	use alloy::sol_types::{SolCall, SolValue};
	use oracle_chains::abi::AggregatorV3Interface;
	use oracle_types::{AccountId, Address, ContractCallOutput};
	use std::collections::HashMap;
	use std::sync::atomic::{AtomicUsize, Ordering};

	/// Spot source backed by a fixed table; records how often it is hit.
	pub(crate) struct TableSpotSource {
		pub prices: HashMap<(String, String), Decimal>,
		pub calls: AtomicUsize,
	}

	impl TableSpotSource {
		pub fn with(entries: &[(&str, &str, &str)]) -> Self {
			let prices = entries
				.iter()
				.map(|(id, quote, price)| {
					(
						(id.to_string(), quote.to_string()),
						price.parse().unwrap(),
					)
				})
				.collect();
			Self {
				prices,
				calls: AtomicUsize::new(0),
			}
		}

		pub fn empty() -> Self {
			Self::with(&[])
		}
	}

	#[async_trait]
	impl SpotPriceSource for TableSpotSource {
		fn endpoint(&self) -> String {
			"https://prices.test/api/v3".to_string()
		}

		async fn spot_price(&self, asset_id: &str, quote: &str) -> Result<Decimal> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			self.prices
				.get(&(asset_id.to_string(), quote.to_ascii_lowercase()))
				.copied()
				.ok_or_else(|| FeedError::ApiError(format!("No quote for {}", asset_id)))
		}
	}

	/// Ledger client whose contract reads either answer from a canned
	/// round or fail; counts every read attempt.
	pub(crate) struct ScriptedClient {
		pub network: NetworkId,
		pub round: Option<(i128, u8)>,
		pub calls: AtomicUsize,
	}

	impl ScriptedClient {
		pub fn answering(network: NetworkId, answer: i128, decimals: u8) -> Self {
			Self {
				network,
				round: Some((answer, decimals)),
				calls: AtomicUsize::new(0),
			}
		}

		pub fn failing(network: NetworkId) -> Self {
			Self {
				network,
				round: None,
				calls: AtomicUsize::new(0),
			}
		}
	}

	#[async_trait]
	impl LedgerClient for ScriptedClient {
		fn network(&self) -> Option<NetworkId> {
			Some(self.network)
		}

		fn operator_account(&self) -> Option<AccountId> {
			Some(AccountId {
				shard: 0,
				realm: 0,
				num: 4_521_987,
			})
		}

		async fn call_contract(
			&self,
			_address: Address,
			calldata: Vec<u8>,
			_gas_limit: u64,
		) -> Result<ContractCallOutput> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			let (answer, decimals) = self.round.ok_or_else(|| {
				FeedError::ContractCallFailed("Scripted RPC failure".to_string())
			})?;

			let data = if calldata
				== (AggregatorV3Interface::latestRoundDataCall {}).abi_encode()
			{
				(
					U256::from(9u64),
					I256::try_from(answer).unwrap(),
					U256::from(1_726_000_000u64),
					U256::from(1_726_000_060u64),
					U256::from(9u64),
				)
					.abi_encode()
			} else {
				(decimals as u16,).abi_encode()
			};

			Ok(ContractCallOutput {
				data,
				gas_used: None,
				fee_hbar: None,
			})
		}
	}

	fn pair(base: &str, quote: &str) -> TradingPair {
		TradingPair::new(base, quote).unwrap()
	}

	#[tokio::test]
	async fn test_contract_feed_preferred_when_available() {
		let client = ScriptedClient::answering(NetworkId::Testnet, 6_324_512_345_678, 8);
		let source = TableSpotSource::with(&[("bitcoin", "usd", "63000")]);
		let resolver = PriceResolver::new(Arc::new(source));

		let result = resolver
			.resolve(&pair("BTC", "USD"), Some(&client))
			.await
			.unwrap();
		assert_eq!(result.source, PriceSource::ContractFeed);
		assert_eq!(result.price.to_string(), "63245.123457");
		assert!(result.fallback_reason.is_none());
		assert_eq!(result.transparency.as_ref().unwrap().gas_used, None);
		// Both feed reads went through the client
		assert_eq!(client.calls.load(Ordering::SeqCst), 2);
	}

	#[tokio::test]
	async fn test_no_client_uses_api_without_contract_attempt() {
		let source = TableSpotSource::with(&[("hedera-hashgraph", "usd", "0.0715")]);
		let resolver = PriceResolver::new(Arc::new(source));

		let result = resolver.resolve(&pair("hbar", "usd"), None).await.unwrap();
		assert_eq!(result.source, PriceSource::ExternalApi);
		assert_eq!(result.fallback_reason, Some(FallbackReason::NoClient));
	}

	#[tokio::test]
	async fn test_unregistered_feed_never_touches_the_chain() {
		// LINK/USD has no testnet feed
		let client = ScriptedClient::answering(NetworkId::Testnet, 1_425_000_000, 8);
		let source = TableSpotSource::with(&[("chainlink", "usd", "14.25")]);
		let resolver = PriceResolver::new(Arc::new(source));

		let result = resolver
			.resolve(&pair("LINK", "USD"), Some(&client))
			.await
			.unwrap();
		assert_eq!(result.source, PriceSource::ExternalApi);
		assert_eq!(result.fallback_reason, Some(FallbackReason::NoFeedForPair));
		assert_eq!(client.calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn test_contract_failure_falls_back_and_error_is_swallowed() {
		let client = ScriptedClient::failing(NetworkId::Mainnet);
		let source = TableSpotSource::with(&[("ethereum", "usd", "3120.5")]);
		let resolver = PriceResolver::new(Arc::new(source));

		let result = resolver
			.resolve(&pair("ETH", "USD"), Some(&client))
			.await
			.unwrap();
		assert_eq!(result.source, PriceSource::ExternalApi);
		assert_eq!(
			result.fallback_reason,
			Some(FallbackReason::ContractCallFailed)
		);
		assert_eq!(result.price.to_string(), "3120.5");
	}

	/// Client whose reads fail with an error the orchestrator must not
	/// recover from.
	struct MisconfiguredClient;

	#[async_trait]
	impl LedgerClient for MisconfiguredClient {
		fn network(&self) -> Option<NetworkId> {
			Some(NetworkId::Testnet)
		}

		fn operator_account(&self) -> Option<AccountId> {
			None
		}

		async fn call_contract(
			&self,
			_address: Address,
			_calldata: Vec<u8>,
			_gas_limit: u64,
		) -> Result<ContractCallOutput> {
			Err(FeedError::Config("Operator key not initialized".to_string()))
		}
	}

	#[tokio::test]
	async fn test_ineligible_contract_error_propagates_without_fallback() {
		let source = Arc::new(TableSpotSource::with(&[("bitcoin", "usd", "63000")]));
		let resolver = PriceResolver::new(source.clone());

		let err = resolver
			.resolve(&pair("BTC", "USD"), Some(&MisconfiguredClient))
			.await
			.unwrap_err();
		assert!(matches!(err, FeedError::Config(_)));
		assert_eq!(source.calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn test_invalid_oracle_data_triggers_fallback() {
		// answer = 0 decodes fine but fails the sanity bounds
		let client = ScriptedClient::answering(NetworkId::Testnet, 0, 8);
		let source = TableSpotSource::with(&[("bitcoin", "usd", "63000")]);
		let resolver = PriceResolver::new(Arc::new(source));

		let result = resolver
			.resolve(&pair("BTC", "USD"), Some(&client))
			.await
			.unwrap();
		assert_eq!(result.source, PriceSource::ExternalApi);
	}

	#[tokio::test]
	async fn test_both_paths_exhausted_reports_http_error_only() {
		let client = ScriptedClient::failing(NetworkId::Testnet);
		let resolver = PriceResolver::new(Arc::new(TableSpotSource::empty()));

		let err = resolver
			.resolve(&pair("BTC", "USD"), Some(&client))
			.await
			.unwrap_err();
		match err {
			FeedError::AllSourcesUnavailable(msg) => {
				assert!(msg.contains("No quote"));
				assert!(!msg.contains("Scripted RPC failure"));
			}
			other => panic!("expected AllSourcesUnavailable, got {}", other),
		}
	}

	#[tokio::test]
	async fn test_invalid_pair_fails_before_any_network_access() {
		let client = ScriptedClient::answering(NetworkId::Testnet, 100, 2);
		let source = TableSpotSource::empty();
		let resolver = PriceResolver::new(Arc::new(source));

		let err = resolver
			.resolve(&pair("DOGE", "USD"), Some(&client))
			.await
			.unwrap_err();
		assert!(matches!(err, FeedError::InvalidArgument(_)));
		assert_eq!(client.calls.load(Ordering::SeqCst), 0);
	}
}
