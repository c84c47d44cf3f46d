//! Enterprise metric lookup: FX rates or shipment tracking.

use crate::tools::str_param;
use crate::{CallContext, Services, Tool};
use async_trait::async_trait;
use oracle_core::transparency::api_envelope;
use oracle_types::validation::{Field, FieldType, Schema};
use oracle_types::{FeedError, LedgerClient, MetricResult, OperationResult, Result};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::debug;

pub struct FetchEnterpriseMetric {
	services: Arc<Services>,
}

impl FetchEnterpriseMetric {
	pub(crate) fn new(services: Arc<Services>) -> Self {
		Self { services }
	}
}

#[async_trait]
impl Tool for FetchEnterpriseMetric {
	fn name(&self) -> &'static str {
		"fetch_enterprise_metric"
	}

	fn description(&self) -> &'static str {
		"Fetches an enterprise data point: FX rates for a currency, or the status of a shipment"
	}

	fn schema(&self) -> Schema {
		Schema::new(
			vec![
				Field::new("type", FieldType::String),
				Field::new("id", FieldType::String),
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
		let metric_type = str_param(params, "type")?;
		let id = str_param(params, "id")?;

		debug!(request = %ctx.request_id, metric_type, id, "Fetching enterprise metric");
		let (data, endpoint) = match metric_type {
			"fx" => {
				let rates = self.services.fx_api.latest(id).await?;
				let mut data = Map::new();
				data.insert("base".to_string(), json!(rates.base));
				if let Some(last_update) = rates.last_update {
					data.insert("last_update".to_string(), json!(last_update));
				}
				data.insert("rates".to_string(), Value::Object(rates.rates));
				(data, self.services.fx_api.endpoint().to_string())
			}
			"shipment" => {
				let shipment = self.services.tracking_api.track(id).await?;
				let mut data = Map::new();
				data.insert(
					"tracking_number".to_string(),
					json!(shipment.tracking_number),
				);
				data.insert("status".to_string(), json!(shipment.status));
				if let Some(carrier) = shipment.carrier {
					data.insert("carrier".to_string(), json!(carrier));
				}
				if let Some(eta) = shipment.estimated_delivery {
					data.insert("estimated_delivery".to_string(), json!(eta));
				}
				if let Some(event) = shipment.last_event {
					data.insert("last_event".to_string(), json!(event));
				}
				(data, self.services.tracking_api.endpoint().to_string())
			}
			other => {
				return Err(FeedError::UnsupportedMetricType(other.to_string()));
			}
		};

		let mut details = Map::new();
		details.insert("metric_type".to_string(), json!(metric_type));
		details.insert("id".to_string(), json!(id));

		Ok(OperationResult::EnterpriseMetric(MetricResult {
			metric_type: metric_type.to_string(),
			id: id.to_string(),
			data,
			transparency: Some(api_envelope(
				"enterprise_metric_fetch",
				&endpoint,
				Some(details),
			)),
		}))
	}
}
