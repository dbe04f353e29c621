//! Publishing pipeline — validation, request assembly, resilient delivery
//!
//! ## Architecture
//!
//! - **engine**: two-tier retry/reconnect loop driving one request to a
//!   terminal outcome
//! - **publisher**: the façade external callers use
//! - **status**: terminal outcome codes, one per publish call

pub mod engine;
pub mod publisher;
pub mod status;

pub use engine::{DeliveryOutcome, RetryPolicy};
pub use publisher::Publisher;
pub use status::PublishStatus;
