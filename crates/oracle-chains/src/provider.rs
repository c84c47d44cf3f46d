//! Alloy-backed ledger client.
//!
//! Wraps an HTTP JSON-RPC provider for one of the two networks and
//! implements the read-only contract-call capability the rest of the
//! toolkit consumes. Every call carries a bounded wait; expiry is a
//! terminal failure, never a retry.

use alloy::network::TransactionBuilder;
use alloy::providers::{Provider, RootProvider};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use oracle_types::{
	AccountId, Address, ContractCallOutput, FeedError, LedgerClient, NetworkId, NetworkProfile,
	Result,
};
use std::time::Duration;
use tracing::debug;

/// Read-only JSON-RPC client for a single network.
pub struct RpcLedgerClient {
	provider: RootProvider,
	network: NetworkId,
	operator: Option<AccountId>,
	call_timeout: Duration,
}

impl RpcLedgerClient {
	/// Creates a client for the given network profile.
	pub fn new(profile: &NetworkProfile) -> Result<Self> {
		let url = profile
			.rpc_endpoint
			.parse()
			.map_err(|e| FeedError::Config(format!("Invalid RPC URL: {}", e)))?;

		Ok(Self {
			provider: RootProvider::new_http(url),
			network: profile.id,
			operator: None,
			call_timeout: Duration::from_secs(12),
		})
	}

	/// Attaches an operator account for provenance reporting.
	pub fn with_operator(mut self, operator: AccountId) -> Self {
		self.operator = Some(operator);
		self
	}

	/// Overrides the bounded wait around each contract call.
	pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
		self.call_timeout = timeout;
		self
	}

	/// Current block number on this network.
	pub async fn latest_block(&self) -> Result<u64> {
		let fut = async { self.provider.get_block_number().await };
		tokio::time::timeout(self.call_timeout, fut)
			.await
			.map_err(|_| {
				FeedError::Timeout(format!(
					"Block number query on {} exceeded {:?}",
					self.network, self.call_timeout
				))
			})?
			.map_err(|e| FeedError::ContractCallFailed(format!("Failed to get block number: {}", e)))
	}

	/// The underlying Alloy provider, for log scans.
	pub fn provider(&self) -> &RootProvider {
		&self.provider
	}

	pub fn call_timeout(&self) -> Duration {
		self.call_timeout
	}
}

#[async_trait]
impl LedgerClient for RpcLedgerClient {
	fn network(&self) -> Option<NetworkId> {
		Some(self.network)
	}

	fn operator_account(&self) -> Option<AccountId> {
		self.operator
	}

	async fn call_contract(
		&self,
		address: Address,
		calldata: Vec<u8>,
		gas_limit: u64,
	) -> Result<ContractCallOutput> {
		debug!(
			"eth_call to {} on {} ({} byte calldata)",
			address,
			self.network,
			calldata.len()
		);

		let tx = TransactionRequest::default()
			.with_to(address)
			.with_input(calldata)
			.with_gas_limit(gas_limit);

		let fut = async { self.provider.call(tx).await };
		let bytes = tokio::time::timeout(self.call_timeout, fut)
			.await
			.map_err(|_| {
				FeedError::Timeout(format!(
					"Contract call to {} exceeded {:?}",
					address, self.call_timeout
				))
			})?
			.map_err(|e| {
				FeedError::ContractCallFailed(format!("eth_call to {} failed: {}", address, e))
			})?;

		// The relay does not report fees or gas for free read-only
		// queries; leave those fields unknown rather than zero-filled.
		Ok(ContractCallOutput {
			data: bytes.to_vec(),
			gas_used: None,
			fee_hbar: None,
		})
	}
}
