//! Common value types used throughout the oracle toolkit.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Re-export commonly used ethereum primitives
pub use alloy::primitives::{Address, B256 as Bytes32, U256};

/// Block number
pub type BlockNumber = u64;

/// Timestamp (Unix seconds)
pub type Timestamp = u64;

/// The two ledger networks the toolkit knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
	Testnet,
	Mainnet,
}

impl fmt::Display for NetworkId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NetworkId::Testnet => write!(f, "testnet"),
			NetworkId::Mainnet => write!(f, "mainnet"),
		}
	}
}

/// Connection profile for a network: JSON-RPC endpoint plus EVM chain id.
///
/// Exactly two instances exist, one per [`NetworkId`]; they are resolved
/// per call and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkProfile {
	pub id: NetworkId,
	pub rpc_endpoint: String,
	pub chain_id: u64,
}

/// Ledger account identifier in `shard.realm.num` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId {
	pub shard: u64,
	pub realm: u64,
	pub num: u64,
}

impl fmt::Display for AccountId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
	}
}

impl FromStr for AccountId {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		let mut parts = s.split('.');
		let (shard, realm, num) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
			(Some(a), Some(b), Some(c), None) => (a, b, c),
			_ => return Err(format!("Malformed account id: {}", s)),
		};
		let parse = |p: &str| {
			p.parse::<u64>()
				.map_err(|_| format!("Malformed account id: {}", s))
		};
		Ok(AccountId {
			shard: parse(shard)?,
			realm: parse(realm)?,
			num: parse(num)?,
		})
	}
}

/// A `(base asset, quote currency)` tuple identifying what price to fetch.
///
/// Symbols are canonicalized to upper case on construction, so
/// `("btc", "usd")` and `("BTC", "USD")` compare equal and resolve
/// identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradingPair {
	pub base: String,
	pub quote: String,
}

impl TradingPair {
	/// Builds a canonicalized pair. Fails when either symbol is empty or
	/// contains non-alphanumeric characters.
	pub fn new(base: &str, quote: &str) -> std::result::Result<Self, String> {
		let base = base.trim();
		let quote = quote.trim();
		if base.is_empty() || quote.is_empty() {
			return Err("Base and quote symbols must be non-empty".to_string());
		}
		if !base.chars().all(|c| c.is_ascii_alphanumeric())
			|| !quote.chars().all(|c| c.is_ascii_alphanumeric())
		{
			return Err(format!("Malformed trading pair: {}/{}", base, quote));
		}
		Ok(Self {
			base: base.to_ascii_uppercase(),
			quote: quote.to_ascii_uppercase(),
		})
	}
}

impl fmt::Display for TradingPair {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.base, self.quote)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_pair_canonicalization() {
		let lower = TradingPair::new("btc", "usd").unwrap();
		let upper = TradingPair::new("BTC", "USD").unwrap();
		assert_eq!(lower, upper);
		assert_eq!(lower.to_string(), "BTC/USD");
	}

	#[test]
	fn test_pair_rejects_empty_and_junk() {
		assert!(TradingPair::new("", "usd").is_err());
		assert!(TradingPair::new("btc", "  ").is_err());
		assert!(TradingPair::new("btc/usd", "usd").is_err());
	}

	#[test]
	fn test_account_id_round_trip() {
		let id: AccountId = "0.0.4521987".parse().unwrap();
		assert_eq!(id.num, 4521987);
		assert_eq!(id.to_string(), "0.0.4521987");
		assert!("0.0".parse::<AccountId>().is_err());
		assert!("0.0.x".parse::<AccountId>().is_err());
	}
}
