//! Market statistics for a crypto asset.
//!
//! Served by the external statistics endpoint only; feeds publish no
//! volume or range data.

use crate::tools::str_param;
use crate::{CallContext, Services, Tool};
use async_trait::async_trait;
use oracle_core::transparency::api_envelope;
use oracle_registry::{api_asset_id, validate_pair};
use oracle_types::validation::{Field, FieldType, Schema};
use oracle_types::{
	FeedError, LedgerClient, OperationResult, PriceStatisticsResult, Result, TradingPair,
};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::debug;

const DEFAULT_DAYS: i64 = 7;
const MAX_DAYS: i64 = 365;

pub struct GetPriceStatistics {
	services: Arc<Services>,
}

impl GetPriceStatistics {
	pub(crate) fn new(services: Arc<Services>) -> Self {
		Self { services }
	}
}

#[async_trait]
impl Tool for GetPriceStatistics {
	fn name(&self) -> &'static str {
		"get_price_statistics"
	}

	fn description(&self) -> &'static str {
		"Current market statistics for a crypto asset: price, percentage changes, volume, market cap, 24h range"
	}

	fn schema(&self) -> Schema {
		Schema::new(
			vec![
				Field::new("base", FieldType::String),
				Field::new("quote", FieldType::String),
			],
			vec![Field::new(
				"days",
				FieldType::Integer {
					min: Some(1),
					max: Some(MAX_DAYS),
				},
			)],
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

		let days = params
			.get("days")
			.and_then(Value::as_i64)
			.unwrap_or(DEFAULT_DAYS);
		if !(1..=MAX_DAYS).contains(&days) {
			return Err(FeedError::InvalidArgument(format!(
				"days must lie in [1, {}], got {}",
				MAX_DAYS, days
			)));
		}

		let asset_id =
			api_asset_id(&pair.base).ok_or_else(|| FeedError::UnsupportedAsset(pair.base.clone()))?;

		debug!(request = %ctx.request_id, %pair, days, "Fetching price statistics");
		let stats = self
			.services
			.price_api
			.statistics(asset_id, &pair.quote)
			.await?;

		let mut details = Map::new();
		details.insert("pair".to_string(), json!(pair.to_string()));
		details.insert("days".to_string(), json!(days));

		Ok(OperationResult::PriceStatistics(PriceStatisticsResult {
			pair,
			current_price: stats.current_price,
			change_24h_pct: stats.change_24h_pct,
			change_7d_pct: stats.change_7d_pct,
			change_30d_pct: stats.change_30d_pct,
			volume_24h: stats.volume_24h,
			market_cap: stats.market_cap,
			high_24h: stats.high_24h,
			low_24h: stats.low_24h,
			transparency: Some(api_envelope(
				"price_statistics_api_read",
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
	async fn test_days_out_of_range_is_invalid_argument() {
		let tool = GetPriceStatistics::new(services_with_prices(&[]));
		let err = tool
			.execute(
				None,
				&CallContext::new(),
				&json!({ "base": "BTC", "quote": "USD", "days": 0 }),
			)
			.await
			.unwrap_err();
		assert!(matches!(err, FeedError::InvalidArgument(_)));
	}

	#[tokio::test]
	async fn test_unsupported_asset_fails_before_any_request() {
		let tool = GetPriceStatistics::new(services_with_prices(&[]));
		let err = tool
			.execute(
				None,
				&CallContext::new(),
				&json!({ "base": "SHIB", "quote": "USD" }),
			)
			.await
			.unwrap_err();
		assert!(matches!(err, FeedError::InvalidArgument(_)));
	}

	#[test]
	fn test_schema_bounds_days() {
		let tool = GetPriceStatistics::new(services_with_prices(&[]));
		let schema = tool.schema();
		assert!(schema
			.validate(&json!({ "base": "BTC", "quote": "USD" }))
			.is_ok());
		assert!(schema
			.validate(&json!({ "base": "BTC", "quote": "USD", "days": 366 }))
			.is_err());
	}
}
