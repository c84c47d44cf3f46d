//! On-chain readers for the oracle toolkit.
//!
//! This crate talks to the ledger's EVM JSON-RPC relay through the Alloy
//! library. It provides:
//!
//! - `provider`: an Alloy-backed [`oracle_types::LedgerClient`]
//!   implementation issuing read-only `eth_call`s with a bounded wait
//! - `feed`: the price-feed reader (latest round data + decimals)
//! - `reserve`: the proof-of-reserve attestation reader
//! - `ccip`: the cross-chain message status reader (event-log scan)
//!
//! All readers are read-only; nothing in this crate signs or submits
//! transactions.

pub mod abi;
pub mod ccip;
pub mod feed;
pub mod provider;
pub mod reserve;

pub use ccip::CcipStatusReader;
pub use feed::{FeedRead, FeedReader, ReadCharges};
pub use provider::RpcLedgerClient;
pub use reserve::ReserveReader;
