//! ABI definitions for the contracts the readers touch.

use alloy::sol;

sol! {
	/// Chainlink-compatible aggregator interface. Price feeds and
	/// proof-of-reserve feeds both expose it; reserve feeds additionally
	/// carry a meaningful `description`.
	interface AggregatorV3Interface {
		function latestRoundData()
			external
			view
			returns (
				uint80 roundId,
				int256 answer,
				uint256 startedAt,
				uint256 updatedAt,
				uint80 answeredInRound
			);

		function decimals() external view returns (uint8);

		function description() external view returns (string);
	}
}

sol! {
	/// Emitted by the router when a cross-chain message is accepted for
	/// sending.
	event CcipMessageSent(bytes32 indexed messageId, uint64 sourceChainSelector, address sender);

	/// Emitted by the router once a cross-chain message has been executed
	/// on the destination. `state` is 1 while in flight, 2 on success,
	/// 3 on failure.
	event CcipMessageExecuted(bytes32 indexed messageId, uint8 state, address receiver);
}

/// Execution state reported by [`CcipMessageExecuted`].
pub mod execution_state {
	pub const IN_PROGRESS: u8 = 1;
	pub const SUCCESS: u8 = 2;
	pub const FAILURE: u8 = 3;
}
