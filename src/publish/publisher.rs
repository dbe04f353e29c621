//! Publishing façade
//!
//! Owns the middleware transport, the mutable indicator tag, and the default
//! retry policy, and composes validation, request assembly, and delivery
//! into the one call external callers use.
//!
//! A `Publisher` instance assumes one publish call at a time; the `&mut
//! self` receivers make overlapping calls on the same instance
//! unrepresentable. Callers that need concurrency use one instance per
//! caller — the indicator is per-instance state, never global.

use crate::config::{defaults, ObswireConfig};
use crate::proto::ObservationRequest;
use crate::publish::engine::{self, DeliveryOutcome, RetryPolicy};
use crate::publish::status::PublishStatus;
use crate::record::{classify_and_format, Record};
use crate::transport::{ObserveTransport, ObserverChannel, TransportError};
use tracing::{debug, error, info};

/// Batch publisher for the observation middleware.
pub struct Publisher<T: ObserveTransport = ObserverChannel> {
    transport: T,
    indicator: String,
    policy: RetryPolicy,
}

impl Publisher<ObserverChannel> {
    /// Create a publisher for the configured middleware endpoint.
    ///
    /// The underlying channel is lazy, so an unreachable middleware
    /// surfaces on the first publish, not here.
    pub fn connect(config: &ObswireConfig) -> Result<Self, TransportError> {
        let transport = ObserverChannel::connect(
            &config.middleware.endpoint,
            config.middleware.max_message_bytes,
        )?;
        Ok(Self {
            transport,
            indicator: config.publish.indicator.clone(),
            policy: config.delivery.policy(),
        })
    }
}

impl<T: ObserveTransport> Publisher<T> {
    /// Build a publisher over an existing transport, with the default
    /// indicator sentinel and retry policy.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            indicator: defaults::DEFAULT_INDICATOR.to_string(),
            policy: RetryPolicy::default(),
        }
    }

    /// Replace the indicator attached to subsequent requests.
    ///
    /// Last write wins; the active value is read at publish time.
    pub fn set_indicator(&mut self, indicator: impl Into<String>) {
        self.indicator = indicator.into();
    }

    /// The currently active indicator.
    pub fn indicator(&self) -> &str {
        &self.indicator
    }

    /// Publish one batch with the configured retry policy.
    ///
    /// Always resolves to a terminal status; never panics or propagates a
    /// transport fault.
    pub async fn batch(
        &mut self,
        element_id: i64,
        records: &[Record],
        action: &str,
    ) -> PublishStatus {
        let policy = self.policy.clone();
        self.batch_with_policy(element_id, records, action, &policy)
            .await
    }

    /// Publish one batch, overriding the retry policy for this call.
    pub async fn batch_with_policy(
        &mut self,
        element_id: i64,
        records: &[Record],
        action: &str,
        policy: &RetryPolicy,
    ) -> PublishStatus {
        // Checked before validation or any network activity.
        if self.indicator.is_empty() {
            error!("No indicator set, refusing to publish");
            return PublishStatus::NoIndicator;
        }

        let batch = match classify_and_format(records, action) {
            Ok(batch) => batch,
            Err(e) => {
                error!(error = %e, "Batch validation failed");
                return PublishStatus::from(e);
            }
        };

        let request = ObservationRequest {
            data: batch.data,
            indicator: self.indicator.clone(),
            element_id,
            action: batch.action.clone(),
        };

        debug!(
            element_id,
            records = request.data.len(),
            action = %batch.action,
            kind = ?batch.kind,
            "Publishing batch"
        );

        match engine::deliver(&mut self.transport, &request, policy).await {
            DeliveryOutcome::Delivered(status) => {
                let status = status.to_uppercase();
                info!(element_id, status = %status, "Batch delivered");
                PublishStatus::Delivered(status)
            }
            DeliveryOutcome::Internal => PublishStatus::Internal,
            DeliveryOutcome::Exhausted => PublishStatus::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::ObservationReply;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::time::Duration;
    use tonic::Code;

    /// Transport that records every request and plays back scripted results.
    struct RecordingTransport {
        script: VecDeque<Result<&'static str, Code>>,
        requests: Vec<ObservationRequest>,
        rebuilds: u32,
    }

    impl RecordingTransport {
        fn new(script: impl IntoIterator<Item = Result<&'static str, Code>>) -> Self {
            Self {
                script: script.into_iter().collect(),
                requests: Vec::new(),
                rebuilds: 0,
            }
        }
    }

    #[async_trait]
    impl ObserveTransport for RecordingTransport {
        async fn send(
            &mut self,
            request: ObservationRequest,
        ) -> Result<ObservationReply, tonic::Status> {
            self.requests.push(request);
            match self.script.pop_front().expect("script exhausted") {
                Ok(status) => Ok(ObservationReply {
                    status: status.to_string(),
                }),
                Err(code) => Err(tonic::Status::new(code, "scripted failure")),
            }
        }

        fn rebuild(&mut self) {
            self.rebuilds += 1;
        }
    }

    fn plain_record(value: f64) -> Record {
        json!({ "timestamp": 1700000000u64, "value": value })
            .as_object()
            .unwrap()
            .clone()
    }

    fn file_record() -> Record {
        json!({ "base64": "aGVsbG8=", "filename": "report.pdf" })
            .as_object()
            .unwrap()
            .clone()
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            retries: 1,
            reconnect_retries: 1,
            delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn test_empty_indicator_fails_before_any_send() {
        let mut publisher = Publisher::with_transport(RecordingTransport::new([]));
        publisher.set_indicator("");

        let status = publisher.batch(1, &[plain_record(1.0)], "process").await;

        assert_eq!(status, PublishStatus::NoIndicator);
        assert_eq!(status.as_code(), "NO_INDICATOR_ERROR");
        assert!(publisher.transport.requests.is_empty());
    }

    #[tokio::test]
    async fn test_validation_failure_skips_transport() {
        let mut publisher = Publisher::with_transport(RecordingTransport::new([]));

        let status = publisher.batch(1, &[], "process").await;
        assert_eq!(status, PublishStatus::NoData);
        assert!(publisher.transport.requests.is_empty());

        let mixed = [file_record(), plain_record(1.0)];
        let status = publisher.batch(1, &mixed, "process").await;
        assert_eq!(status, PublishStatus::Base64Inconsistent);
        assert!(publisher.transport.requests.is_empty());
    }

    #[tokio::test]
    async fn test_success_status_is_uppercased() {
        let mut publisher = Publisher::with_transport(RecordingTransport::new([Ok("success")]));

        let status = publisher.batch(1, &[plain_record(1.0)], "process").await;

        assert_eq!(status, PublishStatus::Delivered("SUCCESS".to_string()));
    }

    #[tokio::test]
    async fn test_request_carries_current_indicator_and_effective_action() {
        let mut publisher = Publisher::with_transport(RecordingTransport::new([Ok("SUCCESS")]));
        publisher.set_indicator("ignored");
        publisher.set_indicator("pressure_sensors");

        let status = publisher.batch(7, &[file_record()], "store").await;
        assert!(status.is_delivered());

        let request = &publisher.transport.requests[0];
        assert_eq!(request.indicator, "pressure_sensors");
        assert_eq!(request.element_id, 7);
        assert_eq!(request.action, "store_files");
        assert_eq!(request.data.len(), 1);
    }

    #[tokio::test]
    async fn test_non_transient_fault_maps_to_internal() {
        let mut publisher =
            Publisher::with_transport(RecordingTransport::new([Err(Code::PermissionDenied)]));

        let status = publisher
            .batch_with_policy(1, &[plain_record(1.0)], "process", &fast_policy())
            .await;

        assert_eq!(status, PublishStatus::Internal);
        assert_eq!(publisher.transport.requests.len(), 1);
    }

    #[tokio::test]
    async fn test_exhaustion_maps_to_failed() {
        let mut publisher = Publisher::with_transport(RecordingTransport::new([
            Err(Code::Unavailable),
            Err(Code::Unavailable),
        ]));

        let status = publisher
            .batch_with_policy(1, &[plain_record(1.0)], "process", &fast_policy())
            .await;

        assert_eq!(status, PublishStatus::Failed);
        assert_eq!(status.as_code(), "FAILED");
        assert_eq!(publisher.transport.rebuilds, 1);
    }
}
