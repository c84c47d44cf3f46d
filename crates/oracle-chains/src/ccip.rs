//! Cross-chain message status reader.
//!
//! Derives a snapshot of a message's lifecycle by scanning router event
//! logs over a bounded block range. The scan is a single pass; callers
//! wanting to search further back re-invoke with an earlier `from_block`.

use crate::abi::{execution_state, CcipMessageExecuted, CcipMessageSent};
use crate::provider::RpcLedgerClient;
use alloy::providers::Provider;
use alloy::rpc::types::{Filter, Log};
use alloy::sol_types::SolEvent;
use oracle_types::{
	Address, BlockNumber, Bytes32, CcipExecuteEvent, CcipMessageRecord, CcipMessageStatus,
	CcipSendEvent, FeedError, Result,
};
use tracing::{debug, warn};

/// Default number of blocks scanned back from the head when the caller
/// does not pin a starting block.
pub const DEFAULT_SCAN_WINDOW: u64 = 1_000;

/// Outcome of one scan: the derived record plus the range inspected.
#[derive(Debug, Clone)]
pub struct CcipScan {
	pub record: CcipMessageRecord,
	pub from_block: BlockNumber,
	pub to_block: BlockNumber,
}

/// Scans router logs for cross-chain message events.
pub struct CcipStatusReader {
	client: RpcLedgerClient,
	scan_window: u64,
}

impl CcipStatusReader {
	pub fn new(client: RpcLedgerClient) -> Self {
		Self {
			client,
			scan_window: DEFAULT_SCAN_WINDOW,
		}
	}

	pub fn with_scan_window(mut self, window: u64) -> Self {
		self.scan_window = window;
		self
	}

	/// Derives the status of a message from the events visible in
	/// `[from_block or latest - window, latest]`.
	///
	/// An execute event wins over a send event regardless of log order;
	/// with neither in range the status is `Unknown` (`status_code = -1`).
	pub async fn message_status(
		&self,
		router: Address,
		message_id: Bytes32,
		from_block: Option<BlockNumber>,
	) -> Result<CcipScan> {
		let latest = self.client.latest_block().await?;
		let from = from_block.unwrap_or_else(|| latest.saturating_sub(self.scan_window));
		if from > latest {
			return Err(FeedError::InvalidArgument(format!(
				"from_block {} is beyond the chain head {}",
				from, latest
			)));
		}

		debug!(
			"Scanning router {} for message {} over blocks [{}, {}]",
			router, message_id, from, latest
		);

		let sent_logs = self
			.get_logs(router, CcipMessageSent::SIGNATURE_HASH, message_id, from, latest)
			.await?;
		let executed_logs = self
			.get_logs(
				router,
				CcipMessageExecuted::SIGNATURE_HASH,
				message_id,
				from,
				latest,
			)
			.await?;

		let send_event = sent_logs.iter().find_map(|log| {
			match CcipMessageSent::decode_log_data(&log.inner.data) {
				Ok(ev) => Some(CcipSendEvent {
					tx_hash: log.transaction_hash.unwrap_or_default(),
					block_number: log.block_number.unwrap_or_default(),
					source_chain_selector: ev.sourceChainSelector,
					sender: ev.sender,
				}),
				Err(e) => {
					warn!("Undecodable send event on router {}: {}", router, e);
					None
				}
			}
		});

		let mut execute_state = None;
		let execute_event = executed_logs.iter().find_map(|log| {
			match CcipMessageExecuted::decode_log_data(&log.inner.data) {
				Ok(ev) => {
					execute_state = Some(ev.state);
					Some(CcipExecuteEvent {
						tx_hash: log.transaction_hash.unwrap_or_default(),
						block_number: log.block_number.unwrap_or_default(),
						receiver: ev.receiver,
					})
				}
				Err(e) => {
					warn!("Undecodable execute event on router {}: {}", router, e);
					None
				}
			}
		});

		let status = derive_status(execute_state, send_event.is_some());

		Ok(CcipScan {
			record: CcipMessageRecord {
				message_id,
				router_address: router,
				status,
				status_code: status.status_code(),
				send_event,
				execute_event,
			},
			from_block: from,
			to_block: latest,
		})
	}

	async fn get_logs(
		&self,
		router: Address,
		signature: Bytes32,
		message_id: Bytes32,
		from: BlockNumber,
		to: BlockNumber,
	) -> Result<Vec<Log>> {
		let filter = Filter::new()
			.address(router)
			.event_signature(signature)
			.topic1(message_id)
			.from_block(from)
			.to_block(to);

		let fut = async { self.client.provider().get_logs(&filter).await };
		tokio::time::timeout(self.client.call_timeout(), fut)
			.await
			.map_err(|_| {
				FeedError::Timeout(format!(
					"Log scan on router {} exceeded {:?}",
					router,
					self.client.call_timeout()
				))
			})?
			.map_err(|e| {
				FeedError::ContractCallFailed(format!("eth_getLogs on {} failed: {}", router, e))
			})
	}
}

/// Precedence rules for the snapshot: an execute event decides the
/// terminal state, a lone send event means in flight, nothing in range
/// means unknown.
fn derive_status(execute_state: Option<u8>, has_send: bool) -> CcipMessageStatus {
	match (execute_state, has_send) {
		(Some(execution_state::SUCCESS), _) => CcipMessageStatus::Executed,
		(Some(execution_state::FAILURE), _) => CcipMessageStatus::Failed,
		(Some(_), _) => CcipMessageStatus::InProgress,
		(None, true) => CcipMessageStatus::Sent,
		(None, false) => CcipMessageStatus::Unknown,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_executed_wins_over_sent() {
		assert_eq!(
			derive_status(Some(execution_state::SUCCESS), true),
			CcipMessageStatus::Executed
		);
	}

	#[test]
	fn test_sent_only() {
		assert_eq!(derive_status(None, true), CcipMessageStatus::Sent);
	}

	#[test]
	fn test_neither_is_unknown() {
		let status = derive_status(None, false);
		assert_eq!(status, CcipMessageStatus::Unknown);
		assert_eq!(status.status_code(), -1);
	}

	#[test]
	fn test_failure_state() {
		assert_eq!(
			derive_status(Some(execution_state::FAILURE), false),
			CcipMessageStatus::Failed
		);
	}
}
