//! Current price of a crypto asset.

use crate::tools::str_param;
use crate::{CallContext, Services, Tool};
use async_trait::async_trait;
use oracle_types::validation::{Field, FieldType, Schema};
use oracle_types::{FeedError, LedgerClient, OperationResult, Result, TradingPair};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub struct GetCryptoPrice {
	services: Arc<Services>,
}

impl GetCryptoPrice {
	pub(crate) fn new(services: Arc<Services>) -> Self {
		Self { services }
	}
}

#[async_trait]
impl Tool for GetCryptoPrice {
	fn name(&self) -> &'static str {
		"get_crypto_price"
	}

	fn description(&self) -> &'static str {
		"Current price of a crypto asset, read from the on-chain feed when one exists, the external price API otherwise"
	}

	fn schema(&self) -> Schema {
		Schema::new(
			vec![
				Field::new("base", FieldType::String),
				Field::new("quote", FieldType::String),
			],
			vec![],
		)
	}

	async fn execute(
		&self,
		client: Option<Arc<dyn LedgerClient>>,
		ctx: &CallContext,
		params: &Value,
	) -> Result<OperationResult> {
		let pair = TradingPair::new(str_param(params, "base")?, str_param(params, "quote")?)
			.map_err(FeedError::InvalidArgument)?;

		debug!(request = %ctx.request_id, %pair, "Resolving crypto price");
		let result = self
			.services
			.resolver
			.resolve(&pair, client.as_deref())
			.await?;
		Ok(OperationResult::Price(result))
	}
}
