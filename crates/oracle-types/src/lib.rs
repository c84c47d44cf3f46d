//! Shared types for the ledger oracle toolkit.
//!
//! This crate defines the domain types used by every other crate in the
//! workspace: trading pairs, network profiles, decoded oracle readings,
//! the transparency envelope attached to every tool result, the central
//! error taxonomy, and the `LedgerClient` trait that abstracts read-only
//! access to the underlying ledger.
//!
//! Everything here is a call-scoped value object. The only process-wide
//! state in the workspace is the compiled-in feed registry, which lives
//! in `oracle-registry`.

pub mod common;
pub mod errors;
pub mod ledger;
pub mod oracles;
pub mod results;
pub mod validation;

pub use common::*;
pub use errors::{FeedError, Result};
pub use ledger::*;
pub use oracles::*;
pub use results::*;
