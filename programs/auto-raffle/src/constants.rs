pub const RAFFLE_SEED: &[u8] = b"raffle";
pub const TREASURY_SEED: &[u8] = b"treasury";

/// Random words requested per draw. One word picks one winner.
pub const NUM_WORDS: u32 = 1;

/// Slot confirmations the coordinator waits before answering a request.
pub const REQUEST_CONFIRMATIONS: u16 = 3;

// Bounds accepted by the coordinator for the fulfillment callback budget
pub const MIN_CALLBACK_GAS_LIMIT: u32 = 10_000;
pub const MAX_CALLBACK_GAS_LIMIT: u32 = 1_000_000;

/// Upper bound on entries held by one raffle account.
pub const MAX_PLAYERS: usize = 200;

// Return data is capped at 1024 bytes and the echoed check data shares it
// with the `upkeep_needed` flag and a 4 byte length prefix
pub const MAX_CHECK_DATA_LEN: usize = 1024 - 1 - 4;
