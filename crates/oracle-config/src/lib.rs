//! Configuration for the oracle toolkit.
//!
//! Sensible defaults compile in; a TOML file can override RPC endpoints,
//! API base URLs, timeouts and the batch delay. File contents support
//! `${VAR}` environment substitution, and a handful of `ORACLE_`-prefixed
//! environment variables override the file.

use oracle_types::NetworkId;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

/// Per-network connection overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
	pub rpc_url: String,
	pub chain_id: u64,
}

impl Default for NetworkConfig {
	fn default() -> Self {
		Self {
			rpc_url: String::new(),
			chain_id: 0,
		}
	}
}

/// External HTTP API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
	/// CoinGecko-compatible price API base URL.
	pub price_base_url: String,
	/// FX rate API base URL.
	pub fx_base_url: String,
	/// Shipment tracking API base URL.
	pub tracking_base_url: String,
	/// Request timeout in seconds for all HTTP readers.
	pub timeout_secs: u64,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			price_base_url: "https://api.coingecko.com/api/v3".to_string(),
			fx_base_url: "https://open.er-api.com/v6".to_string(),
			tracking_base_url: "https://api.ship24.com/public/v1".to_string(),
			timeout_secs: 10,
		}
	}
}

/// Batch resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
	/// Delay inserted between consecutive pair resolutions, in milliseconds.
	pub delay_ms: u64,
}

impl Default for BatchConfig {
	fn default() -> Self {
		Self { delay_ms: 200 }
	}
}

/// On-chain read settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
	/// Bounded wait around a contract read, in seconds.
	pub call_timeout_secs: u64,
	/// Gas ceiling for read-only calls.
	pub call_gas_limit: u64,
	/// Default block window for cross-chain message scans.
	pub ccip_scan_window: u64,
}

impl Default for ContractConfig {
	fn default() -> Self {
		Self {
			call_timeout_secs: 12,
			call_gas_limit: 120_000,
			ccip_scan_window: 1_000,
		}
	}
}

/// Top-level toolkit configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
	pub testnet: NetworkConfig,
	pub mainnet: NetworkConfig,
	pub api: ApiConfig,
	pub batch: BatchConfig,
	pub contract: ContractConfig,
}

impl ResolverConfig {
	/// RPC endpoint override for a network, when the config provides one.
	pub fn rpc_override(&self, network: NetworkId) -> Option<&str> {
		let cfg = match network {
			NetworkId::Testnet => &self.testnet,
			NetworkId::Mainnet => &self.mainnet,
		};
		if cfg.rpc_url.is_empty() {
			None
		} else {
			Some(cfg.rpc_url.as_str())
		}
	}
}

/// Configuration loader with environment variable substitution.
#[derive(Default)]
pub struct ConfigLoader {
	file_path: Option<String>,
	env_prefix: String,
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "ORACLE_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_string_lossy().to_string());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	/// Loads configuration: file (when given) plus env overrides, validated.
	pub fn load(&self) -> Result<ResolverConfig, ConfigError> {
		let mut config = if let Some(file_path) = &self.file_path {
			self.load_from_file(file_path)?
		} else {
			debug!("No configuration file specified, using defaults");
			ResolverConfig::default()
		};

		self.apply_env_overrides(&mut config)?;
		self.validate_config(&config)?;

		Ok(config)
	}

	fn load_from_file(&self, file_path: &str) -> Result<ResolverConfig, ConfigError> {
		info!("Loading configuration from {}", file_path);
		let content = std::fs::read_to_string(file_path)?;

		// Substitute environment variables
		let substituted_content = self.substitute_env_vars(&content)?;

		// Parse TOML
		let config: ResolverConfig = toml::from_str(&substituted_content)
			.map_err(|e| ConfigError::ParseError(e.to_string()))?;

		Ok(config)
	}

	fn substitute_env_vars(&self, content: &str) -> Result<String, ConfigError> {
		let mut result = content.to_string();

		// Find and replace ${VAR_NAME} patterns
		let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

		for cap in re.captures_iter(content) {
			let full_match = &cap[0];
			let var_name = &cap[1];

			let env_value = env::var(var_name)
				.map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;

			result = result.replace(full_match, &env_value);
		}

		Ok(result)
	}

	fn apply_env_overrides(&self, config: &mut ResolverConfig) -> Result<(), ConfigError> {
		if let Ok(url) = env::var(format!("{}TESTNET_RPC_URL", self.env_prefix)) {
			debug!("Overriding testnet RPC URL from environment");
			config.testnet.rpc_url = url;
		}

		if let Ok(url) = env::var(format!("{}MAINNET_RPC_URL", self.env_prefix)) {
			debug!("Overriding mainnet RPC URL from environment");
			config.mainnet.rpc_url = url;
		}

		if let Ok(url) = env::var(format!("{}PRICE_API_URL", self.env_prefix)) {
			config.api.price_base_url = url;
		}

		if let Ok(timeout) = env::var(format!("{}API_TIMEOUT_SECS", self.env_prefix)) {
			config.api.timeout_secs = timeout.parse().map_err(|e| {
				ConfigError::ValidationError(format!("Invalid API timeout: {}", e))
			})?;
		}

		Ok(())
	}

	fn validate_config(&self, config: &ResolverConfig) -> Result<(), ConfigError> {
		for (name, url) in [
			("testnet.rpc_url", &config.testnet.rpc_url),
			("mainnet.rpc_url", &config.mainnet.rpc_url),
		] {
			if !url.is_empty() && !url.starts_with("http://") && !url.starts_with("https://") {
				return Err(ConfigError::ValidationError(format!(
					"{} must start with http:// or https://",
					name
				)));
			}
		}

		for (name, url) in [
			("api.price_base_url", &config.api.price_base_url),
			("api.fx_base_url", &config.api.fx_base_url),
			("api.tracking_base_url", &config.api.tracking_base_url),
		] {
			if !url.starts_with("http://") && !url.starts_with("https://") {
				return Err(ConfigError::ValidationError(format!(
					"{} must start with http:// or https://",
					name
				)));
			}
		}

		if config.api.timeout_secs == 0 {
			return Err(ConfigError::ValidationError(
				"api.timeout_secs must be positive".to_string(),
			));
		}

		if config.contract.call_timeout_secs == 0 {
			return Err(ConfigError::ValidationError(
				"contract.call_timeout_secs must be positive".to_string(),
			));
		}

		Ok(())
	}
}
