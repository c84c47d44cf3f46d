//! Error taxonomy for the oracle toolkit.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeedError>;

/// Every failure mode a tool invocation can surface.
///
/// The price resolution orchestrator recovers locally from
/// [`FeedError::ContractCallFailed`] and [`FeedError::InvalidOracleData`]
/// by falling back to the HTTP path; all other variants propagate to the
/// caller unchanged.
#[derive(Error, Debug)]
pub enum FeedError {
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),

	#[error("Contract call failed: {0}")]
	ContractCallFailed(String),

	#[error("Invalid oracle data: {0}")]
	InvalidOracleData(String),

	#[error("API error: {0}")]
	ApiError(String),

	#[error("Timed out: {0}")]
	Timeout(String),

	#[error("All price sources unavailable: {0}")]
	AllSourcesUnavailable(String),

	#[error("Unsupported asset: {0}")]
	UnsupportedAsset(String),

	#[error("Unsupported metric type: {0}")]
	UnsupportedMetricType(String),

	#[error("Configuration error: {0}")]
	Config(String),

	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

impl FeedError {
	/// Whether the price orchestrator may recover from this error by
	/// falling back to the HTTP path.
	pub fn is_fallback_eligible(&self) -> bool {
		matches!(
			self,
			FeedError::ContractCallFailed(_)
				| FeedError::InvalidOracleData(_)
				| FeedError::Timeout(_)
		)
	}

	/// Rewraps the error with its user-safe message, preserving the
	/// variant so callers can still match on the kind.
	///
	/// Applied at the outermost invocation boundary; inner layers keep
	/// the full detail for logging.
	pub fn sanitized(self) -> FeedError {
		let message = self.user_message();
		match self {
			FeedError::ContractCallFailed(_) => FeedError::ContractCallFailed(message),
			FeedError::Timeout(_) => FeedError::Timeout(message),
			FeedError::InvalidOracleData(_) => FeedError::InvalidOracleData(message),
			FeedError::ApiError(_) => FeedError::ApiError(message),
			other => other,
		}
	}

	/// Message safe to show verbatim to an end user.
	///
	/// Validation errors carry no internal detail and pass through;
	/// infrastructure errors are collapsed to a generic message so RPC
	/// internals never leak.
	pub fn user_message(&self) -> String {
		match self {
			FeedError::InvalidArgument(_)
			| FeedError::UnsupportedAsset(_)
			| FeedError::UnsupportedMetricType(_) => self.to_string(),
			FeedError::ContractCallFailed(_) | FeedError::Timeout(_) => {
				"The on-chain read could not be completed".to_string()
			}
			FeedError::InvalidOracleData(_) => {
				"The oracle returned data that failed validation".to_string()
			}
			FeedError::ApiError(_) => "The upstream data service is unavailable".to_string(),
			other => other.to_string(),
		}
	}
}
