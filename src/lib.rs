//! Obswire: Resilient Batch Publishing
//!
//! Publishes batches of application records to a remote observation
//! middleware over gRPC, tolerating transient unavailability through
//! bounded retry and channel-reconnection logic.
//!
//! ## Architecture
//!
//! - **Record Classifier**: validates a batch, decides plain vs file, derives
//!   the transmitted action, serializes records to wire form
//! - **Transport Handle**: lazy gRPC channel + stub that can be rebuilt in
//!   place
//! - **Delivery Engine**: two-tier retry/reconnect loop, one terminal
//!   outcome per run
//! - **Publisher**: the façade external callers use; carries the mutable
//!   indicator tag

pub mod config;
pub mod proto;
pub mod publish;
pub mod record;
pub mod sources;
pub mod transport;

// Re-export the publishing surface
pub use publish::{DeliveryOutcome, Publisher, PublishStatus, RetryPolicy};
pub use record::{
    classify_and_format, Action, BatchKind, FormattedBatch, Record, UnknownAction,
    ValidationError,
};
pub use transport::{ObserveTransport, ObserverChannel, TransportError};
