//! Price of a crypto asset on a past calendar date.
//!
//! Always served by the external API; there is no on-chain source for
//! historical rounds at arbitrary dates.

use crate::tools::str_param;
use crate::{CallContext, Services, Tool};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use oracle_core::transparency::api_envelope;
use oracle_registry::{api_asset_id, validate_pair};
use oracle_types::validation::{Field, FieldType, Schema};
use oracle_types::{
	FeedError, HistoricalPriceResult, LedgerClient, OperationResult, Result, TradingPair,
};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::debug;

const DATE_FORMAT: &str = "%d-%m-%Y";

pub struct GetHistoricalPrice {
	services: Arc<Services>,
}

impl GetHistoricalPrice {
	pub(crate) fn new(services: Arc<Services>) -> Self {
		Self { services }
	}
}

#[async_trait]
impl Tool for GetHistoricalPrice {
	fn name(&self) -> &'static str {
		"get_historical_price"
	}

	fn description(&self) -> &'static str {
		"Price of a crypto asset on a specific past date (DD-MM-YYYY)"
	}

	fn schema(&self) -> Schema {
		Schema::new(
			vec![
				Field::new("base", FieldType::String),
				Field::new("quote", FieldType::String),
				Field::new("timestamp", FieldType::String).with_validator(|v| {
					let text = v.as_str().unwrap_or_default();
					NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
						.map(|_| ())
						.map_err(|_| "Expected a DD-MM-YYYY date".to_string())
				}),
			],
			vec![],
		)
	}

	async fn execute(
		&self,
		_client: Option<Arc<dyn LedgerClient>>,
		ctx: &CallContext,
		params: &Value,
	) -> Result<OperationResult> {
		let pair = TradingPair::new(str_param(params, "base")?, str_param(params, "quote")?)
			.map_err(FeedError::InvalidArgument)?;
		validate_pair(&pair)?;

		let raw_date = str_param(params, "timestamp")?.trim();
		let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|_| {
			FeedError::InvalidArgument(format!(
				"Malformed date '{}', expected DD-MM-YYYY",
				raw_date
			))
		})?;
		if date > Utc::now().date_naive() {
			return Err(FeedError::InvalidArgument(format!(
				"Date {} is in the future",
				raw_date
			)));
		}

		let asset_id =
			api_asset_id(&pair.base).ok_or_else(|| FeedError::UnsupportedAsset(pair.base.clone()))?;

		debug!(request = %ctx.request_id, %pair, date = %raw_date, "Fetching historical price");
		let price = self
			.services
			.price_api
			.historical_price(asset_id, &pair.quote, date)
			.await?;

		let mut details = Map::new();
		details.insert("pair".to_string(), json!(pair.to_string()));
		details.insert("date".to_string(), json!(date.format(DATE_FORMAT).to_string()));

		Ok(OperationResult::HistoricalPrice(HistoricalPriceResult {
			pair,
			date: date.format(DATE_FORMAT).to_string(),
			price,
			transparency: Some(api_envelope(
				"historical_price_api_read",
				self.services.price_api.endpoint(),
				Some(details),
			)),
		}))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tools::testkit::services_with_prices;
	use serde_json::json;

	#[tokio::test]
	async fn test_malformed_date_is_invalid_argument() {
		let tool = GetHistoricalPrice::new(services_with_prices(&[]));
		let err = tool
			.execute(
				None,
				&CallContext::new(),
				&json!({ "base": "BTC", "quote": "USD", "timestamp": "2024-01-15" }),
			)
			.await
			.unwrap_err();
		assert!(matches!(err, FeedError::InvalidArgument(_)));
		assert!(err.to_string().contains("DD-MM-YYYY"));
	}

	#[tokio::test]
	async fn test_future_date_is_rejected() {
		let tool = GetHistoricalPrice::new(services_with_prices(&[]));
		let future = (Utc::now().date_naive() + chrono::Days::new(30))
			.format(DATE_FORMAT)
			.to_string();
		let err = tool
			.execute(
				None,
				&CallContext::new(),
				&json!({ "base": "BTC", "quote": "USD", "timestamp": future }),
			)
			.await
			.unwrap_err();
		assert!(matches!(err, FeedError::InvalidArgument(_)));
		assert!(err.to_string().contains("future"));
	}

	#[tokio::test]
	async fn test_unsupported_pair_fails_before_any_request() {
		let tool = GetHistoricalPrice::new(services_with_prices(&[]));
		let err = tool
			.execute(
				None,
				&CallContext::new(),
				&json!({ "base": "BTC", "quote": "GBP", "timestamp": "15-01-2024" }),
			)
			.await
			.unwrap_err();
		assert!(matches!(err, FeedError::InvalidArgument(_)));
	}

	#[test]
	fn test_schema_validates_date_format() {
		let tool = GetHistoricalPrice::new(services_with_prices(&[]));
		let schema = tool.schema();
		assert!(schema
			.validate(&json!({ "base": "BTC", "quote": "USD", "timestamp": "15-01-2024" }))
			.is_ok());
		assert!(schema
			.validate(&json!({ "base": "BTC", "quote": "USD", "timestamp": "January 15" }))
			.is_err());
	}
}
