//! Spot, historical and statistics price readers.

use crate::{build_http_client, map_transport_error};
use chrono::NaiveDate;
use oracle_config::ApiConfig;
use oracle_types::{FeedError, Result};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

/// Market statistics for one asset, as far as the upstream reported them.
#[derive(Debug, Clone)]
pub struct MarketStatistics {
	pub current_price: Decimal,
	pub change_24h_pct: Option<Decimal>,
	pub change_7d_pct: Option<Decimal>,
	pub change_30d_pct: Option<Decimal>,
	pub volume_24h: Option<Decimal>,
	pub market_cap: Option<Decimal>,
	pub high_24h: Option<Decimal>,
	pub low_24h: Option<Decimal>,
}

/// Client for the CoinGecko-compatible price API.
pub struct PriceApi {
	http: reqwest::Client,
	base_url: String,
}

impl PriceApi {
	pub fn new(config: &ApiConfig) -> Result<Self> {
		Ok(Self {
			http: build_http_client(config.timeout_secs)?,
			base_url: config.price_base_url.trim_end_matches('/').to_string(),
		})
	}

	/// The endpoint a result's transparency envelope should reference.
	pub fn endpoint(&self) -> &str {
		&self.base_url
	}

	/// Fetches the current spot price of an asset in a quote currency.
	pub async fn spot_price(&self, asset_id: &str, quote: &str) -> Result<Decimal> {
		let quote = quote.to_ascii_lowercase();
		let url = format!(
			"{}/simple/price?ids={}&vs_currencies={}",
			self.base_url, asset_id, quote
		);
		debug!("Fetching spot price: {}", url);

		let body = self.get_json(&url, "Spot price request").await?;
		parse_spot_price(&body, asset_id, &quote)
	}

	/// Fetches the price of an asset on a specific calendar date.
	pub async fn historical_price(
		&self,
		asset_id: &str,
		quote: &str,
		date: NaiveDate,
	) -> Result<Decimal> {
		let quote = quote.to_ascii_lowercase();
		let url = format!(
			"{}/coins/{}/history?date={}",
			self.base_url,
			asset_id,
			date.format("%d-%m-%Y")
		);
		debug!("Fetching historical price: {}", url);

		let body = self.get_json(&url, "Historical price request").await?;
		parse_historical_price(&body, &quote)
	}

	/// Fetches current market statistics for an asset.
	pub async fn statistics(&self, asset_id: &str, quote: &str) -> Result<MarketStatistics> {
		let quote = quote.to_ascii_lowercase();
		let url = format!(
			"{}/coins/{}?market_data=true&localization=false&tickers=false&community_data=false&developer_data=false",
			self.base_url, asset_id
		);
		debug!("Fetching statistics: {}", url);

		let body = self.get_json(&url, "Statistics request").await?;
		parse_statistics(&body, &quote)
	}

	async fn get_json(&self, url: &str, context: &str) -> Result<Value> {
		let response = self
			.http
			.get(url)
			.send()
			.await
			.map_err(|e| map_transport_error(context, e))?;

		let status = response.status();
		if !status.is_success() {
			return Err(FeedError::ApiError(format!(
				"{} returned HTTP {}",
				context,
				status.as_u16()
			)));
		}

		response
			.json::<Value>()
			.await
			.map_err(|e| map_transport_error(context, e))
	}
}

/// Extracts `{asset_id: {quote: price}}`; a missing or non-positive value
/// is an API error, never a silent default.
fn parse_spot_price(body: &Value, asset_id: &str, quote: &str) -> Result<Decimal> {
	let price = body
		.get(asset_id)
		.and_then(|v| v.get(quote))
		.and_then(decimal_from)
		.ok_or_else(|| {
			FeedError::ApiError(format!(
				"Spot price response missing {}.{}",
				asset_id, quote
			))
		})?;

	if price <= Decimal::ZERO {
		return Err(FeedError::ApiError(format!(
			"Spot price for {} is non-positive: {}",
			asset_id, price
		)));
	}
	Ok(price.round_dp(6))
}

/// Extracts `market_data.current_price.{quote}` from a history payload.
fn parse_historical_price(body: &Value, quote: &str) -> Result<Decimal> {
	let price = body
		.pointer(&format!("/market_data/current_price/{}", quote))
		.and_then(decimal_from)
		.ok_or_else(|| {
			FeedError::ApiError(format!(
				"Historical response missing market_data.current_price.{}",
				quote
			))
		})?;

	if price <= Decimal::ZERO {
		return Err(FeedError::ApiError(format!(
			"Historical price is non-positive: {}",
			price
		)));
	}
	Ok(price.round_dp(6))
}

/// Extracts statistics fields; everything beyond the current price is
/// optional and left `None` when the upstream omits it.
fn parse_statistics(body: &Value, quote: &str) -> Result<MarketStatistics> {
	let market = body.get("market_data").ok_or_else(|| {
		FeedError::ApiError("Statistics response missing market_data".to_string())
	})?;

	let current_price = market
		.pointer(&format!("/current_price/{}", quote))
		.and_then(decimal_from)
		.filter(|p| *p > Decimal::ZERO)
		.ok_or_else(|| {
			FeedError::ApiError(format!(
				"Statistics response missing current_price.{}",
				quote
			))
		})?;

	let quoted = |field: &str| {
		market
			.pointer(&format!("/{}/{}", field, quote))
			.and_then(decimal_from)
	};
	let plain = |field: &str| market.get(field).and_then(decimal_from);

	Ok(MarketStatistics {
		current_price: current_price.round_dp(6),
		change_24h_pct: plain("price_change_percentage_24h"),
		change_7d_pct: plain("price_change_percentage_7d"),
		change_30d_pct: plain("price_change_percentage_30d"),
		volume_24h: quoted("total_volume"),
		market_cap: quoted("market_cap"),
		high_24h: quoted("high_24h"),
		low_24h: quoted("low_24h"),
	})
}

/// Lenient numeric extraction: upstream mixes floats and integers.
fn decimal_from(value: &Value) -> Option<Decimal> {
	match value {
		Value::Number(_) => serde_json::from_value(value.clone()).ok(),
		_ => None,
	}
}
