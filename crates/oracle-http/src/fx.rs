//! Foreign-exchange rate reader.

use crate::{build_http_client, map_transport_error};
use oracle_config::ApiConfig;
use oracle_types::{FeedError, Result};
use serde_json::{Map, Value};
use tracing::debug;

/// FX rates for one base currency.
#[derive(Debug, Clone)]
pub struct FxRates {
	pub base: String,
	pub last_update: Option<String>,
	pub rates: Map<String, Value>,
}

/// Client for the FX rate API (`GET /latest/{BASE}`).
pub struct FxApi {
	http: reqwest::Client,
	base_url: String,
}

impl FxApi {
	pub fn new(config: &ApiConfig) -> Result<Self> {
		Ok(Self {
			http: build_http_client(config.timeout_secs)?,
			base_url: config.fx_base_url.trim_end_matches('/').to_string(),
		})
	}

	pub fn endpoint(&self) -> &str {
		&self.base_url
	}

	/// Fetches the latest rates for a base currency (e.g. `USD`).
	pub async fn latest(&self, base: &str) -> Result<FxRates> {
		let base = base.trim().to_ascii_uppercase();
		if base.len() != 3 || !base.chars().all(|c| c.is_ascii_alphabetic()) {
			return Err(FeedError::InvalidArgument(format!(
				"Malformed currency code: {}",
				base
			)));
		}

		let url = format!("{}/latest/{}", self.base_url, base);
		debug!("Fetching FX rates: {}", url);

		let response = self
			.http
			.get(&url)
			.send()
			.await
			.map_err(|e| map_transport_error("FX request", e))?;

		let status = response.status();
		if !status.is_success() {
			return Err(FeedError::ApiError(format!(
				"FX request returned HTTP {}",
				status.as_u16()
			)));
		}

		let body: Value = response
			.json()
			.await
			.map_err(|e| map_transport_error("FX request", e))?;

		parse_fx_rates(&body, &base)
	}
}

fn parse_fx_rates(body: &Value, base: &str) -> Result<FxRates> {
	let rates = body
		.get("rates")
		.and_then(Value::as_object)
		.ok_or_else(|| FeedError::ApiError("FX response missing rates table".to_string()))?;

	if rates.is_empty() {
		return Err(FeedError::ApiError("FX response has empty rates table".to_string()));
	}

	Ok(FxRates {
		base: base.to_string(),
		last_update: body
			.get("time_last_update_utc")
			.and_then(Value::as_str)
			.map(str::to_string),
		rates: rates.clone(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_parse_fx_rates() {
		let body = json!({
			"result": "success",
			"time_last_update_utc": "Fri, 29 Aug 2026 00:00:01 +0000",
			"rates": { "USD": 1, "EUR": 0.9012, "JPY": 146.33 }
		});
		let rates = parse_fx_rates(&body, "USD").unwrap();
		assert_eq!(rates.base, "USD");
		assert_eq!(rates.rates.len(), 3);
		assert!(rates.last_update.unwrap().contains("2026"));
	}

	#[test]
	fn test_missing_rates_table_is_api_error() {
		let err = parse_fx_rates(&json!({ "result": "error" }), "USD").unwrap_err();
		assert!(matches!(err, FeedError::ApiError(_)));
	}
}
