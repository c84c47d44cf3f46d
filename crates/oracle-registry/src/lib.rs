//! Network resolution and the compiled-in feed/asset registries.
//!
//! The two registries (one per network) are immutable process-wide
//! constants expressed as `match` tables; there is no runtime mutation
//! path. Coverage is partial and deliberately asymmetric between the
//! networks: absence of an entry is a valid state meaning "no on-chain
//! feed, use the HTTP fallback".

pub mod assets;
pub mod feeds;
pub mod network;
pub mod validate;

pub use assets::{api_asset_id, validate_pair, SUPPORTED_ASSETS, SUPPORTED_QUOTES};
pub use feeds::feed_address;
pub use network::{network_profile, resolve_network};
pub use validate::{parse_contract_address, parse_message_id};
