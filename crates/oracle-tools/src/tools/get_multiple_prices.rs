//! Batch price resolution for a list of pairs.

use crate::{CallContext, Services, Tool};
use async_trait::async_trait;
use oracle_core::transparency::summary_envelope;
use oracle_types::validation::{Field, FieldType, Schema};
use oracle_types::{
	EnvelopeNetwork, FeedError, LedgerClient, OperationResult, Result,
};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::debug;

pub struct GetMultiplePrices {
	services: Arc<Services>,
}

impl GetMultiplePrices {
	pub(crate) fn new(services: Arc<Services>) -> Self {
		Self { services }
	}
}

#[async_trait]
impl Tool for GetMultiplePrices {
	fn name(&self) -> &'static str {
		"get_multiple_prices"
	}

	fn description(&self) -> &'static str {
		"Current prices for a list of pairs, resolved sequentially; per-pair failures are reported, never raised"
	}

	fn schema(&self) -> Schema {
		Schema::new(
			vec![Field::new(
				"pairs",
				FieldType::Array(Box::new(FieldType::Object(Schema::new(
					vec![
						Field::new("base", FieldType::String),
						Field::new("quote", FieldType::String),
					],
					vec![],
				)))),
			)],
			vec![],
		)
	}

	async fn execute(
		&self,
		client: Option<Arc<dyn LedgerClient>>,
		ctx: &CallContext,
		params: &Value,
	) -> Result<OperationResult> {
		let items = params
			.get("pairs")
			.and_then(Value::as_array)
			.ok_or_else(|| {
				FeedError::InvalidArgument("Missing array parameter: pairs".to_string())
			})?;

		let requests: Vec<(String, String)> = items
			.iter()
			.map(|item| {
				let base = item.get("base").and_then(Value::as_str).unwrap_or_default();
				let quote = item.get("quote").and_then(Value::as_str).unwrap_or_default();
				(base.to_string(), quote.to_string())
			})
			.collect();

		debug!(request = %ctx.request_id, count = requests.len(), "Resolving price batch");
		let mut outcome = self
			.services
			.batch
			.resolve_many(&requests, client.as_deref())
			.await;

		let network = match &client {
			Some(c) => self
				.services
				.network_profile(Some(c.as_ref()))
				.id
				.into(),
			None => EnvelopeNetwork::ExternalApi,
		};

		let mut details = Map::new();
		details.insert("total_requested".to_string(), json!(outcome.total_requested));
		details.insert("success_count".to_string(), json!(outcome.success_count));
		details.insert("error_count".to_string(), json!(outcome.error_count));
		outcome.transparency = Some(summary_envelope(network, "multiple_prices", Some(details)));

		Ok(OperationResult::MultiplePrices(outcome))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tools::testkit::services_with_prices;
	use serde_json::json;

	#[tokio::test]
	async fn test_partitions_successes_from_failures() {
		let tool = GetMultiplePrices::new(services_with_prices(&[
			("bitcoin", "usd", "63000"),
			("ethereum", "usd", "3100"),
		]));

		let result = tool
			.execute(
				None,
				&CallContext::new(),
				&json!({ "pairs": [
					{ "base": "BTC", "quote": "USD" },
					{ "base": "DOGE", "quote": "USD" },
					{ "base": "ETH", "quote": "USD" }
				] }),
			)
			.await
			.unwrap();

		match result {
			OperationResult::MultiplePrices(batch) => {
				assert_eq!(batch.total_requested, 3);
				assert_eq!(batch.success_count, 2);
				assert_eq!(batch.error_count, 1);
				let envelope = batch.transparency.unwrap();
				assert_eq!(envelope.network, EnvelopeNetwork::ExternalApi);
				assert_eq!(envelope.details.unwrap()["success_count"], 2);
			}
			other => panic!("unexpected variant: {:?}", other),
		}
	}

	#[tokio::test]
	async fn test_empty_list_is_an_empty_batch() {
		let tool = GetMultiplePrices::new(services_with_prices(&[]));
		let result = tool
			.execute(None, &CallContext::new(), &json!({ "pairs": [] }))
			.await
			.unwrap();
		match result {
			OperationResult::MultiplePrices(batch) => {
				assert_eq!(batch.total_requested, 0);
				assert_eq!(batch.success_count, 0);
			}
			other => panic!("unexpected variant: {:?}", other),
		}
	}
}
