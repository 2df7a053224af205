// Centralized Lottery Constants

// Deployment Defaults
// ===================

/// Entrance fee used on local validators (0.1 SOL).
pub const DEFAULT_ENTRANCE_FEE_LAMPORTS: u64 = 100_000_000;

/// Entrance fee used on public test clusters (0.001 SOL).
pub const TESTNET_ENTRANCE_FEE_LAMPORTS: u64 = 1_000_000;

/// Seconds that must pass between two draws.
pub const DEFAULT_INTERVAL_SECONDS: i64 = 30;

/// Compute budget granted to the oracle for the fulfillment callback.
pub const DEFAULT_CALLBACK_COMPUTE_LIMIT: u32 = 500_000;

/// Confirmations the oracle waits for before answering a request.
pub const DEFAULT_REQUEST_CONFIRMATIONS: u16 = 3;

/// One random word is enough to pick a single winner.
pub const DEFAULT_NUM_WORDS: u32 = 1;

/// Upper bound on random words per request. Keeps the callback payload small.
pub const MAX_NUM_WORDS: u32 = 8;

// Account Sizing
// ==============

/// Capacity of the participant registry. Must match `#[max_len]` on `Lottery::players`.
pub const MAX_PLAYERS: usize = 100;

/// Initial version for account structures.
pub const INITIAL_VERSION: u16 = 1;

/// First nonce handed to the randomness coordinator.
pub const INITIAL_REQUEST_NONCE: u64 = 1;
