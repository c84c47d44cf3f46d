//! Cross-chain message status lookup.

use crate::tools::{hex_address_validator, hex_bytes32_validator, str_param};
use crate::{CallContext, Services, Tool};
use async_trait::async_trait;
use oracle_chains::CcipStatusReader;
use oracle_core::transparency::contract_envelope;
use oracle_registry::{parse_contract_address, parse_message_id};
use oracle_types::validation::{Field, FieldType, Schema};
use oracle_types::{CcipStatusResult, LedgerClient, OperationResult, Result};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::debug;

pub struct GetCcipMessageStatus {
	services: Arc<Services>,
}

impl GetCcipMessageStatus {
	pub(crate) fn new(services: Arc<Services>) -> Self {
		Self { services }
	}
}

#[async_trait]
impl Tool for GetCcipMessageStatus {
	fn name(&self) -> &'static str {
		"get_ccip_message_status"
	}

	fn description(&self) -> &'static str {
		"Derives the status of a cross-chain message by scanning router event logs over a bounded block range"
	}

	fn schema(&self) -> Schema {
		Schema::new(
			vec![
				Field::new("router_address", FieldType::String)
					.with_validator(hex_address_validator),
				Field::new("message_id", FieldType::String)
					.with_validator(hex_bytes32_validator),
			],
			vec![Field::new(
				"from_block",
				FieldType::Integer {
					min: Some(0),
					max: None,
				},
			)],
		)
	}

	async fn execute(
		&self,
		client: Option<Arc<dyn LedgerClient>>,
		ctx: &CallContext,
		params: &Value,
	) -> Result<OperationResult> {
		let router = parse_contract_address(str_param(params, "router_address")?)?;
		let message_id = parse_message_id(str_param(params, "message_id")?)?;
		let from_block = params.get("from_block").and_then(Value::as_u64);

		// The log scan needs the raw JSON-RPC provider, so the reader
		// always runs over its own client; a caller-supplied ledger
		// client only informs network resolution.
		let profile = self.services.network_profile(client.as_deref());
		let reader = CcipStatusReader::new(self.services.rpc_client(&profile)?)
			.with_scan_window(self.services.config.contract.ccip_scan_window);

		debug!(
			request = %ctx.request_id, %router, %message_id, network = %profile.id,
			"Scanning for cross-chain message"
		);
		let scan = reader.message_status(router, message_id, from_block).await?;

		let mut details = Map::new();
		details.insert("from_block".to_string(), json!(scan.from_block));
		details.insert("to_block".to_string(), json!(scan.to_block));
		details.insert("status".to_string(), json!(scan.record.status));

		Ok(OperationResult::CcipMessageStatus(CcipStatusResult {
			record: scan.record,
			from_block: scan.from_block,
			to_block: scan.to_block,
			transparency: Some(contract_envelope(
				profile.id,
				"ccip_message_status_scan",
				router,
				None,
				None,
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
	async fn test_malformed_message_id_is_invalid_argument() {
		let tool = GetCcipMessageStatus::new(services_with_prices(&[]));
		let err = tool
			.execute(
				None,
				&CallContext::new(),
				&json!({
					"router_address": "0x59bc155eb6c6c415fe43255af66ecf0523c92b4a",
					"message_id": "0xabcd"
				}),
			)
			.await
			.unwrap_err();
		assert!(matches!(err, FeedError::InvalidArgument(_)));
	}

	#[test]
	fn test_schema_checks_both_hex_params() {
		let tool = GetCcipMessageStatus::new(services_with_prices(&[]));
		let schema = tool.schema();
		let good_id = format!("0x{}", "ab".repeat(32));
		assert!(schema
			.validate(&json!({
				"router_address": "0x59bc155eb6c6c415fe43255af66ecf0523c92b4a",
				"message_id": good_id,
				"from_block": 100
			}))
			.is_ok());
		assert!(schema
			.validate(&json!({
				"router_address": "not-hex",
				"message_id": good_id
			}))
			.is_err());
		assert!(schema
			.validate(&json!({
				"router_address": "0x59bc155eb6c6c415fe43255af66ecf0523c92b4a",
				"message_id": good_id,
				"from_block": -5
			}))
			.is_err());
	}
}
