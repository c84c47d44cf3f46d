//! Price resolution core.
//!
//! Ties the feed registry, the contract reader and the HTTP reader
//! together into the two-tier resolution procedure: try the on-chain
//! feed when a client and a registered feed exist, otherwise (or on any
//! contract-path failure) fall back to the external price API. The
//! fallback decision is visible in the types: the contract path yields a
//! `Result` the orchestrator matches on, nothing is recovered through
//! unwinding.

pub mod batch;
pub mod resolver;
pub mod transparency;

pub use batch::BatchResolver;
pub use resolver::{PriceResolver, SpotPriceSource};
