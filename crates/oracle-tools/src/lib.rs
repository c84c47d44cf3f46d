//! The tool surface consumed by the host agent framework.
//!
//! Each tool is identified by a stable method name, declares a JSON
//! parameter schema, and executes against an optional ledger client.
//! The [`ToolRegistry`] validates parameters before dispatch, so invalid
//! calls fail fast without touching the network.
//!
//! Wiring lives in [`FeedToolkit`]: it builds the HTTP clients and the
//! resolution core from a [`oracle_config::ResolverConfig`] and registers
//! the seven tools.

pub mod tools;

use async_trait::async_trait;
use oracle_chains::RpcLedgerClient;
use oracle_config::ResolverConfig;
use oracle_core::{BatchResolver, PriceResolver};
use oracle_http::{FxApi, PriceApi, TrackingApi};
use oracle_registry::resolve_network;
use oracle_types::validation::Schema;
use oracle_types::{
	FeedError, LedgerClient, NetworkProfile, OperationResult, Result,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Opaque per-invocation context passed through from the host framework.
#[derive(Debug, Clone)]
pub struct CallContext {
	pub request_id: String,
	pub caller: Option<String>,
}

impl CallContext {
	pub fn new() -> Self {
		let request_id = format!(
			"call_{}",
			std::time::SystemTime::now()
				.duration_since(std::time::UNIX_EPOCH)
				.unwrap_or_default()
				.as_nanos()
		);
		Self {
			request_id,
			caller: None,
		}
	}

	pub fn with_caller(mut self, caller: impl Into<String>) -> Self {
		self.caller = Some(caller.into());
		self
	}
}

impl Default for CallContext {
	fn default() -> Self {
		Self::new()
	}
}

/// A callable tool.
#[async_trait]
pub trait Tool: Send + Sync {
	/// Stable method name the host framework invokes the tool by.
	fn name(&self) -> &'static str;

	/// One-line human description surfaced to the agent.
	fn description(&self) -> &'static str;

	/// Parameter schema; the registry validates against it before
	/// [`Tool::execute`] runs.
	fn schema(&self) -> Schema;

	async fn execute(
		&self,
		client: Option<Arc<dyn LedgerClient>>,
		ctx: &CallContext,
		params: &serde_json::Value,
	) -> Result<OperationResult>;
}

/// Name-keyed registry of tools with pre-dispatch validation.
pub struct ToolRegistry {
	tools: HashMap<&'static str, Arc<dyn Tool>>,
}

impl ToolRegistry {
	pub fn new() -> Self {
		Self {
			tools: HashMap::new(),
		}
	}

	/// Registers a tool under its own name. A duplicate name is a
	/// configuration error.
	pub fn register(mut self, tool: Arc<dyn Tool>) -> Result<Self> {
		let name = tool.name();
		if self.tools.contains_key(name) {
			return Err(FeedError::Config(format!(
				"Tool '{}' already registered",
				name
			)));
		}
		debug!("Registering tool {}", name);
		self.tools.insert(name, tool);
		Ok(self)
	}

	pub fn has_tool(&self, name: &str) -> bool {
		self.tools.contains_key(name)
	}

	/// All registered method names, unordered.
	pub fn names(&self) -> Vec<&'static str> {
		self.tools.keys().copied().collect()
	}

	/// Validates parameters and dispatches to the named tool.
	#[instrument(skip_all, fields(tool = name, request = %ctx.request_id))]
	pub async fn execute(
		&self,
		name: &str,
		client: Option<Arc<dyn LedgerClient>>,
		ctx: &CallContext,
		params: &serde_json::Value,
	) -> Result<OperationResult> {
		let tool = self
			.tools
			.get(name)
			.ok_or_else(|| FeedError::InvalidArgument(format!("Unknown tool: {}", name)))?;

		tool.schema()
			.validate(params)
			.map_err(|e| FeedError::InvalidArgument(e.to_string()))?;

		debug!("Parameters validated, executing");
		// This is the outermost boundary the host sees; strip RPC and
		// transport detail from infrastructure failures. Validation
		// errors pass through verbatim.
		tool.execute(client, ctx, params)
			.await
			.map_err(FeedError::sanitized)
	}
}

impl Default for ToolRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Shared collaborators handed to every tool.
pub(crate) struct Services {
	pub config: ResolverConfig,
	pub resolver: Arc<PriceResolver>,
	pub batch: Arc<BatchResolver>,
	pub price_api: Arc<PriceApi>,
	pub fx_api: Arc<FxApi>,
	pub tracking_api: Arc<TrackingApi>,
}

impl Services {
	/// Resolves the active network and applies any configured RPC
	/// endpoint override.
	pub fn network_profile(&self, client: Option<&dyn LedgerClient>) -> NetworkProfile {
		let mut profile = resolve_network(client);
		if let Some(url) = self.config.rpc_override(profile.id) {
			profile.rpc_endpoint = url.to_string();
		}
		profile
	}

	/// Builds a read-only RPC client for tools invoked without a
	/// caller-supplied ledger client.
	pub fn rpc_client(&self, profile: &NetworkProfile) -> Result<RpcLedgerClient> {
		Ok(RpcLedgerClient::new(profile)?.with_call_timeout(Duration::from_secs(
			self.config.contract.call_timeout_secs,
		)))
	}
}

/// Builds the seven-tool registry from a configuration.
pub struct FeedToolkit;

impl FeedToolkit {
	pub fn build(config: ResolverConfig) -> Result<ToolRegistry> {
		let price_api = Arc::new(PriceApi::new(&config.api)?);
		let fx_api = Arc::new(FxApi::new(&config.api)?);
		let tracking_api = Arc::new(TrackingApi::new(&config.api)?);

		let resolver = Arc::new(PriceResolver::new(price_api.clone()));
		let batch = Arc::new(
			BatchResolver::new(resolver.clone())
				.with_delay(Duration::from_millis(config.batch.delay_ms)),
		);

		let services = Arc::new(Services {
			config,
			resolver,
			batch,
			price_api,
			fx_api,
			tracking_api,
		});

		let registry = ToolRegistry::new()
			.register(Arc::new(tools::get_crypto_price::GetCryptoPrice::new(
				services.clone(),
			)))?
			.register(Arc::new(
				tools::get_historical_price::GetHistoricalPrice::new(services.clone()),
			))?
			.register(Arc::new(
				tools::get_multiple_prices::GetMultiplePrices::new(services.clone()),
			))?
			.register(Arc::new(
				tools::get_price_statistics::GetPriceStatistics::new(services.clone()),
			))?
			.register(Arc::new(
				tools::check_proof_of_reserve::CheckProofOfReserve::new(services.clone()),
			))?
			.register(Arc::new(
				tools::get_ccip_message_status::GetCcipMessageStatus::new(services.clone()),
			))?
			.register(Arc::new(
				tools::fetch_enterprise_metric::FetchEnterpriseMetric::new(services.clone()),
			))?;

		info!("Feed toolkit ready with {} tools", registry.names().len());
		Ok(registry)
	}
}
