//! Application-wide constants and magic numbers
//!
//! Folder names, cadence defaults, synthetic venue codes and the log event
//! taxonomy live here so the pipeline and its tests agree on them.

use std::time::Duration;

/// Queue layout constants
pub mod queue {
    pub const PENDING_DIR: &str = "pending";
    pub const DONE_DIR: &str = "done";
    pub const FAILED_DIR: &str = "failed";

    /// Only files with this suffix are picked up from `pending`
    pub const INTENT_FILE_SUFFIX: &str = ".json";

    /// Suffix used by producers while a file is still being written
    pub const TEMP_FILE_SUFFIX: &str = ".tmp";

    pub const DEFAULT_ROOT: &str = "./queue";
}

/// Poll cadence constants
pub mod polling {
    use super::*;

    pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;

    /// Lower bound for the poll interval; smaller values are clamped up
    pub const MIN_POLL_INTERVAL_SECS: u64 = 1;

    pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(MIN_POLL_INTERVAL_SECS);
}

/// Venue constants
pub mod venue {
    /// Code reported when the venue could not be reached at all
    pub const TRANSPORT_ERROR_CODE: i64 = -1;

    /// Code reported when an intent with an unknown side reaches dispatch
    pub const UNSUPPORTED_SIDE_CODE: i64 = -2;

    /// Code reported when the venue answered with something we cannot read
    pub const PROTOCOL_ERROR_CODE: i64 = -3;

    /// Wire value meaning "no stop loss" / "no take profit"
    pub const NO_LEVEL: f64 = 0.0;

    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    pub const DEFAULT_MARKET_ORDER_TYPE: &str = "MARKET";
}

/// Idempotency ledger constants
pub mod ledger {
    /// One day of executed intent ids
    pub const DEFAULT_RETENTION_SECS: u64 = 86_400;
}

/// Logging event names for structured logging
pub mod events {
    pub const IGNORED: &str = "ignored";
    pub const INVALID_QUANTITY: &str = "invalid_quantity";
    pub const INVALID_SIDE: &str = "invalid_side";
    pub const EXECUTED: &str = "executed";
    pub const FAILED: &str = "failed";
    pub const DECODE_ERROR: &str = "decode_error";
    pub const MOVE_ERROR: &str = "move_error";
    pub const READ_ERROR: &str = "read_error";
    pub const DUPLICATE_SUPPRESSED: &str = "duplicate_suppressed";
    pub const CYCLE_SKIPPED: &str = "cycle_skipped";
}
