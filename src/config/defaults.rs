//! System-wide default constants.
//!
//! Centralises the knobs that would otherwise be scattered magic numbers.
//! Grouped by subsystem.

// ============================================================================
// Transport
// ============================================================================

/// Middleware gRPC endpoint (`host:port`).
pub const DEFAULT_ENDPOINT: &str = "localhost:50051";

/// Maximum outbound message size (bytes). 4 MiB.
pub const MAX_MESSAGE_BYTES: usize = 4 * 1024 * 1024;

// ============================================================================
// Delivery
// ============================================================================

/// Same-connection send attempts before reconnecting.
pub const SEND_RETRIES: u32 = 3;

/// Reconnect cycles before a publish call is declared failed.
pub const RECONNECT_RETRIES: u32 = 3;

/// Fixed wait before each retry or reconnect attempt (seconds).
pub const RETRY_DELAY_SECS: u64 = 2;

// ============================================================================
// Publisher
// ============================================================================

/// Indicator sentinel used until the caller sets one.
pub const DEFAULT_INDICATOR: &str = "default";

/// Element identifier attached to published batches.
pub const DEFAULT_ELEMENT_ID: i64 = 1234;

/// Seconds between periodic reading publishes.
pub const PUBLISH_INTERVAL_SECS: u64 = 10;
