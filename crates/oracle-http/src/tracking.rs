//! Shipment tracking reader.
//!
//! The upstream tracking service is treated as opaque; only the handful
//! of fields the tool reports are extracted, everything else is ignored.

use crate::{build_http_client, map_transport_error};
use oracle_config::ApiConfig;
use oracle_types::{FeedError, Result};
use serde_json::Value;
use tracing::debug;

/// Status snapshot for one shipment.
#[derive(Debug, Clone)]
pub struct ShipmentStatus {
	pub tracking_number: String,
	pub status: String,
	pub carrier: Option<String>,
	pub estimated_delivery: Option<String>,
	pub last_event: Option<String>,
}

/// Client for the shipment tracking API.
pub struct TrackingApi {
	http: reqwest::Client,
	base_url: String,
}

impl TrackingApi {
	pub fn new(config: &ApiConfig) -> Result<Self> {
		Ok(Self {
			http: build_http_client(config.timeout_secs)?,
			base_url: config.tracking_base_url.trim_end_matches('/').to_string(),
		})
	}

	pub fn endpoint(&self) -> &str {
		&self.base_url
	}

	/// Looks up the current status of a shipment by tracking number.
	pub async fn track(&self, tracking_number: &str) -> Result<ShipmentStatus> {
		let tracking_number = tracking_number.trim();
		if tracking_number.is_empty()
			|| !tracking_number
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || c == '-')
		{
			return Err(FeedError::InvalidArgument(format!(
				"Malformed tracking number: {}",
				tracking_number
			)));
		}

		let url = format!("{}/track/{}", self.base_url, tracking_number);
		debug!("Fetching shipment status: {}", url);

		let response = self
			.http
			.get(&url)
			.send()
			.await
			.map_err(|e| map_transport_error("Tracking request", e))?;

		let status = response.status();
		if !status.is_success() {
			return Err(FeedError::ApiError(format!(
				"Tracking request returned HTTP {}",
				status.as_u16()
			)));
		}

		let body: Value = response
			.json()
			.await
			.map_err(|e| map_transport_error("Tracking request", e))?;

		parse_shipment(&body, tracking_number)
	}
}

fn parse_shipment(body: &Value, tracking_number: &str) -> Result<ShipmentStatus> {
	let status = body
		.get("status")
		.and_then(Value::as_str)
		.ok_or_else(|| FeedError::ApiError("Tracking response missing status".to_string()))?;

	let string_at = |keys: &[&str]| {
		keys.iter()
			.find_map(|k| body.get(*k).and_then(Value::as_str))
			.map(str::to_string)
	};

	Ok(ShipmentStatus {
		tracking_number: tracking_number.to_string(),
		status: status.to_string(),
		carrier: string_at(&["carrier", "courier"]),
		estimated_delivery: string_at(&["estimated_delivery", "eta"]),
		last_event: string_at(&["last_event", "latest_event"]),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_parse_shipment() {
		let body = json!({
			"status": "in_transit",
			"courier": "dhl",
			"eta": "2026-09-02",
			"extraneous": { "ignored": true }
		});
		let shipment = parse_shipment(&body, "JD014600003RU").unwrap();
		assert_eq!(shipment.status, "in_transit");
		assert_eq!(shipment.carrier.as_deref(), Some("dhl"));
		assert_eq!(shipment.estimated_delivery.as_deref(), Some("2026-09-02"));
		assert!(shipment.last_event.is_none());
	}

	#[test]
	fn test_missing_status_is_api_error() {
		let err = parse_shipment(&json!({}), "X").unwrap_err();
		assert!(matches!(err, FeedError::ApiError(_)));
	}
}
