//! Network resolution from an optional ledger client.

use oracle_types::{LedgerClient, NetworkId, NetworkProfile};
use tracing::debug;

/// Hashio JSON-RPC relay, testnet.
const TESTNET_RPC: &str = "https://testnet.hashio.io/api";
/// Hashio JSON-RPC relay, mainnet.
const MAINNET_RPC: &str = "https://mainnet.hashio.io/api";

const TESTNET_CHAIN_ID: u64 = 296;
const MAINNET_CHAIN_ID: u64 = 295;

/// Returns the fixed profile for a network.
pub fn network_profile(id: NetworkId) -> NetworkProfile {
	match id {
		NetworkId::Testnet => NetworkProfile {
			id: NetworkId::Testnet,
			rpc_endpoint: TESTNET_RPC.to_string(),
			chain_id: TESTNET_CHAIN_ID,
		},
		NetworkId::Mainnet => NetworkProfile {
			id: NetworkId::Mainnet,
			rpc_endpoint: MAINNET_RPC.to_string(),
			chain_id: MAINNET_CHAIN_ID,
		},
	}
}

/// Determines the active network from an optional client handle.
///
/// Detection trusts the client's structured network state only. When no
/// client is supplied, or the client does not report a network, testnet is
/// assumed.
pub fn resolve_network(client: Option<&dyn LedgerClient>) -> NetworkProfile {
	let id = client
		.and_then(|c| c.network())
		.unwrap_or(NetworkId::Testnet);
	debug!("Resolved network: {}", id);
	network_profile(id)
}
