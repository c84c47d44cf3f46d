//! Ledger client trait.
//!
//! The toolkit consumes the underlying ledger through this narrow seam:
//! structured network identity plus the capability to execute a read-only
//! contract call. Transaction submission, transfers and key management are
//! deliberately outside it.

use crate::common::{AccountId, Address, NetworkId};
use crate::errors::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Outcome of a read-only contract call.
#[derive(Debug, Clone)]
pub struct ContractCallOutput {
	/// Raw ABI-encoded return data.
	pub data: Vec<u8>,
	/// Gas consumed, when the transport surfaces it.
	pub gas_used: Option<u64>,
	/// Query fee in HBAR, when the transport surfaces it. Read-only calls
	/// are typically free.
	pub fee_hbar: Option<Decimal>,
}

/// Read-only handle onto a ledger network.
///
/// Implementations report the network they were constructed for via
/// [`LedgerClient::network`]; detection is structured client state, never
/// string matching on a serialized representation.
#[async_trait]
pub trait LedgerClient: Send + Sync {
	/// The network this client is connected to, when known.
	fn network(&self) -> Option<NetworkId>;

	/// The operator account, when configured. Used for provenance only.
	fn operator_account(&self) -> Option<AccountId>;

	/// Executes a read-only contract call and returns the raw return data.
	async fn call_contract(
		&self,
		address: Address,
		calldata: Vec<u8>,
		gas_limit: u64,
	) -> Result<ContractCallOutput>;
}
