//! Proof-of-reserve attestation check.
//!
//! No HTTP fallback exists for reserve data, so every failure on the
//! contract path surfaces to the caller as-is.

use crate::tools::{hex_address_validator, str_param};
use crate::{CallContext, Services, Tool};
use async_trait::async_trait;
use oracle_chains::ReserveReader;
use oracle_core::transparency::contract_envelope;
use oracle_registry::parse_contract_address;
use oracle_types::validation::{Field, FieldType, Schema};
use oracle_types::{LedgerClient, OperationResult, ReserveResult, Result};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::debug;

pub struct CheckProofOfReserve {
	services: Arc<Services>,
}

impl CheckProofOfReserve {
	pub(crate) fn new(services: Arc<Services>) -> Self {
		Self { services }
	}
}

#[async_trait]
impl Tool for CheckProofOfReserve {
	fn name(&self) -> &'static str {
		"check_proof_of_reserve"
	}

	fn description(&self) -> &'static str {
		"Reads a proof-of-reserve feed and reports whether the attested reserves are confirmed or depleted"
	}

	fn schema(&self) -> Schema {
		Schema::new(
			vec![Field::new("feed_address", FieldType::String)
				.with_validator(hex_address_validator)],
			vec![],
		)
	}

	async fn execute(
		&self,
		client: Option<Arc<dyn LedgerClient>>,
		ctx: &CallContext,
		params: &Value,
	) -> Result<OperationResult> {
		let feed = parse_contract_address(str_param(params, "feed_address")?)?;
		let profile = self.services.network_profile(client.as_deref());

		let rpc_fallback;
		let ledger: &dyn LedgerClient = match client.as_deref() {
			Some(c) => c,
			None => {
				rpc_fallback = self.services.rpc_client(&profile)?;
				&rpc_fallback
			}
		};

		debug!(request = %ctx.request_id, %feed, network = %profile.id, "Checking reserve feed");
		let (reading, charges) = ReserveReader::check(ledger, feed).await?;

		let mut details = Map::new();
		details.insert("round_id".to_string(), json!(reading.round_id));
		details.insert("status".to_string(), json!(reading.status));

		Ok(OperationResult::ProofOfReserve(ReserveResult {
			feed_address: reading.feed_address,
			asset_description: reading.asset_description,
			reserves: reading.reserves_value,
			reserves_raw: reading.reserves_raw,
			decimals: reading.decimals,
			round_id: reading.round_id,
			updated_at: reading.updated_at,
			status: reading.status,
			transparency: Some(contract_envelope(
				profile.id,
				"proof_of_reserve_read",
				feed,
				charges.gas_used,
				charges.fee_hbar,
				Some(details),
			)),
		}))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tools::testkit::services_with_prices;
	use oracle_types::FeedError;
	use serde_json::json;

	#[tokio::test]
	async fn test_malformed_address_is_invalid_argument() {
		let tool = CheckProofOfReserve::new(services_with_prices(&[]));
		let err = tool
			.execute(
				None,
				&CallContext::new(),
				&json!({ "feed_address": "0x1234" }),
			)
			.await
			.unwrap_err();
		assert!(matches!(err, FeedError::InvalidArgument(_)));
	}

	#[tokio::test]
	async fn test_zero_address_is_rejected_as_placeholder() {
		let tool = CheckProofOfReserve::new(services_with_prices(&[]));
		let err = tool
			.execute(
				None,
				&CallContext::new(),
				&json!({ "feed_address": "0x0000000000000000000000000000000000000000" }),
			)
			.await
			.unwrap_err();
		assert!(matches!(err, FeedError::InvalidArgument(_)));
		assert!(err.to_string().contains("placeholder"));
	}

	#[test]
	fn test_schema_rejects_short_hex() {
		let tool = CheckProofOfReserve::new(services_with_prices(&[]));
		assert!(tool
			.schema()
			.validate(&json!({ "feed_address": "0xabcd" }))
			.is_err());
	}
}
