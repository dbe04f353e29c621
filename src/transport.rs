//! Middleware transport handle
//!
//! Owns the gRPC channel to the observation middleware and the stub bound to
//! it. The channel is lazy: construction never dials, so an unreachable
//! endpoint only surfaces on the first send. `rebuild` swaps in a freshly
//! constructed channel/stub pair against the same endpoint, discarding any
//! broken connection state.

use crate::proto::observer::v1::data_observer_client::DataObserverClient;
use crate::proto::{ObservationReply, ObservationRequest};
use async_trait::async_trait;
use tonic::transport::{Channel, Endpoint};

/// Transport construction errors.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid middleware endpoint '{addr}': {source}")]
    InvalidEndpoint {
        addr: String,
        #[source]
        source: tonic::transport::Error,
    },
}

/// Sending seam between the delivery engine and the wire.
///
/// The engine only needs two capabilities: issue one unary call with the
/// current connection, and replace the connection with a fresh one. Tests
/// substitute a scripted implementation.
#[async_trait]
pub trait ObserveTransport: Send {
    /// Issue one ObserveData call over the current connection.
    async fn send(
        &mut self,
        request: ObservationRequest,
    ) -> Result<ObservationReply, tonic::Status>;

    /// Discard connection state and build a new channel to the same endpoint.
    fn rebuild(&mut self);
}

/// gRPC channel and stub bound to a fixed middleware endpoint.
///
/// The endpoint uses a plaintext `http://` channel. Outbound messages are
/// capped at `max_message_bytes`.
pub struct ObserverChannel {
    endpoint: Endpoint,
    client: DataObserverClient<Channel>,
    max_message_bytes: usize,
}

impl ObserverChannel {
    /// Create a handle for `addr` (`host:port` form).
    ///
    /// Connection establishment is deferred to the first send, so an
    /// unreachable endpoint is not an error here — only a malformed
    /// address is.
    pub fn connect(addr: &str, max_message_bytes: usize) -> Result<Self, TransportError> {
        let endpoint =
            Endpoint::from_shared(format!("http://{addr}")).map_err(|source| {
                TransportError::InvalidEndpoint {
                    addr: addr.to_string(),
                    source,
                }
            })?;
        let client = Self::build_client(&endpoint, max_message_bytes);
        Ok(Self {
            endpoint,
            client,
            max_message_bytes,
        })
    }

    fn build_client(
        endpoint: &Endpoint,
        max_message_bytes: usize,
    ) -> DataObserverClient<Channel> {
        DataObserverClient::new(endpoint.connect_lazy())
            .max_encoding_message_size(max_message_bytes)
    }
}

#[async_trait]
impl ObserveTransport for ObserverChannel {
    async fn send(
        &mut self,
        request: ObservationRequest,
    ) -> Result<ObservationReply, tonic::Status> {
        let reply = self.client.observe_data(request).await?;
        Ok(reply.into_inner())
    }

    fn rebuild(&mut self) {
        // Whole-value replacement: no window where a half-built client is
        // observable through the handle.
        self.client = Self::build_client(&self.endpoint, self.max_message_bytes);
    }
}
