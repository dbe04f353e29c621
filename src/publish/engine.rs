//! Delivery engine — bounded retry and reconnect loops
//!
//! Drives one assembled request to a terminal outcome. Two tiers:
//! same-connection retries absorb a middleware that is momentarily
//! unavailable (restarting, overloaded), reconnect cycles rebuild the
//! channel for faults a resend alone cannot fix. Any failure other than
//! UNAVAILABLE on the live connection is treated as non-recoverable and
//! aborts the run at once.
//!
//! Each engine run starts fresh; no retry state carries across publish
//! calls. At most one send is in flight at a time.

use crate::config::defaults;
use crate::proto::ObservationRequest;
use crate::transport::ObserveTransport;
use std::time::Duration;
use tokio::time::sleep;
use tonic::Code;
use tracing::{error, info, warn};

/// Bounds and pacing for one delivery run.
///
/// The delay is a fixed wait applied before each retry and reconnect
/// attempt, not an exponential backoff. Zero bounds are legal and skip the
/// corresponding tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Send attempts on the current connection.
    pub retries: u32,
    /// Reconnect cycles after in-connection retries are exhausted.
    pub reconnect_retries: u32,
    /// Fixed wait before each retry or reconnect attempt.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: defaults::SEND_RETRIES,
            reconnect_retries: defaults::RECONNECT_RETRIES,
            delay: Duration::from_secs(defaults::RETRY_DELAY_SECS),
        }
    }
}

/// Terminal result of one delivery run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Middleware replied; carries its status string verbatim.
    Delivered(String),
    /// Non-transient fault on the live connection.
    Internal,
    /// Both retry tiers exhausted without a success.
    Exhausted,
}

/// Drive one request to a terminal outcome.
///
/// The request itself is immutable across attempts; only the transport's
/// connection state changes between them.
pub async fn deliver<T: ObserveTransport>(
    transport: &mut T,
    request: &ObservationRequest,
    policy: &RetryPolicy,
) -> DeliveryOutcome {
    for attempt in 1..=policy.retries {
        match transport.send(request.clone()).await {
            Ok(reply) => return DeliveryOutcome::Delivered(reply.status),
            Err(status) if status.code() == Code::Unavailable => {
                warn!(
                    attempt,
                    max = policy.retries,
                    delay_secs = policy.delay.as_secs(),
                    "Middleware unavailable, retrying"
                );
                sleep(policy.delay).await;
            }
            Err(status) => {
                error!(
                    code = ?status.code(),
                    message = status.message(),
                    "Non-recoverable transport fault"
                );
                return DeliveryOutcome::Internal;
            }
        }
    }

    if policy.retries > 0 {
        warn!(
            retries = policy.retries,
            "Send attempts exhausted, reestablishing connection"
        );
    }

    for cycle in 1..=policy.reconnect_retries {
        info!(
            cycle,
            max = policy.reconnect_retries,
            "Rebuilding middleware channel"
        );
        transport.rebuild();
        sleep(policy.delay).await;

        match transport.send(request.clone()).await {
            Ok(reply) => return DeliveryOutcome::Delivered(reply.status),
            Err(status) => {
                warn!(
                    cycle,
                    code = ?status.code(),
                    message = status.message(),
                    "Reconnect attempt failed"
                );
                sleep(policy.delay).await;
            }
        }
    }

    error!(
        cycles = policy.reconnect_retries,
        "Failed to reconnect, giving up"
    );
    DeliveryOutcome::Exhausted
}
