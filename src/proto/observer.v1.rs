// @generated
// Generated from: proto/observer/v1/observer.proto
// Manual check-in for offline builds.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ObservationRequest {
    /// Serialized record payloads, one JSON document per record.
    #[prost(string, repeated, tag = "1")]
    pub data: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, tag = "2")]
    pub indicator: ::prost::alloc::string::String,
    #[prost(int64, tag = "3")]
    pub element_id: i64,
    #[prost(string, tag = "4")]
    pub action: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ObservationReply {
    #[prost(string, tag = "1")]
    pub status: ::prost::alloc::string::String,
}

pub mod data_observer_client {
    #![allow(clippy::derive_partial_eq_without_eq)]
    use tonic::codegen::*;

    #[derive(Debug, Clone)]
    pub struct DataObserverClient<T> {
        inner: tonic::client::Grpc<T>,
    }

    impl DataObserverClient<tonic::transport::Channel> {
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }

    impl<T> DataObserverClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as Body>::Error: Into<StdError> + Send,
        <T::ResponseBody as Body>::Data: Into<Bytes> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }

        /// Limits the maximum size of a decoded message.
        ///
        /// Default: `4MB`
        #[must_use]
        pub fn max_decoding_message_size(mut self, limit: usize) -> Self {
            self.inner = self.inner.max_decoding_message_size(limit);
            self
        }

        /// Limits the maximum size of an encoded message.
        ///
        /// Default: `usize::MAX`
        #[must_use]
        pub fn max_encoding_message_size(mut self, limit: usize) -> Self {
            self.inner = self.inner.max_encoding_message_size(limit);
            self
        }

        pub async fn observe_data(
            &mut self,
            request: impl tonic::IntoRequest<super::ObservationRequest>,
        ) -> Result<tonic::Response<super::ObservationReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = tonic::codegen::http::uri::PathAndQuery::from_static(
                "/observer.v1.DataObserver/ObserveData",
            );
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
}

pub mod data_observer_server {
    #![allow(clippy::derive_partial_eq_without_eq)]
    use tonic::codegen::*;

    #[tonic::async_trait]
    pub trait DataObserver: Send + Sync + 'static {
        async fn observe_data(
            &self,
            request: tonic::Request<super::ObservationRequest>,
        ) -> Result<tonic::Response<super::ObservationReply>, tonic::Status>;
    }

    #[derive(Debug)]
    pub struct DataObserverServer<T: DataObserver> {
        inner: Arc<T>,
    }

    impl<T: DataObserver> DataObserverServer<T> {
        pub fn new(inner: T) -> Self {
            Self {
                inner: Arc::new(inner),
            }
        }

        pub fn from_arc(inner: Arc<T>) -> Self {
            Self { inner }
        }
    }

    impl<T: DataObserver> Clone for DataObserverServer<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }

    impl<T: DataObserver> Service<http::Request<tonic::body::BoxBody>> for DataObserverServer<T> {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = std::convert::Infallible;
        type Future = BoxFuture<Self::Response, Self::Error>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: http::Request<tonic::body::BoxBody>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/observer.v1.DataObserver/ObserveData" => {
                    struct ObserveDataSvc<T: DataObserver>(pub Arc<T>);
                    impl<T: DataObserver> tonic::server::UnaryService<super::ObservationRequest>
                        for ObserveDataSvc<T>
                    {
                        type Response = super::ObservationReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ObservationRequest>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            Box::pin(async move { inner.observe_data(request).await })
                        }
                    }
                    Box::pin(async move {
                        let method = ObserveDataSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec);
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    })
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::empty_body())
                        .unwrap())
                }),
            }
        }
    }

    impl<T: DataObserver> tonic::server::NamedService for DataObserverServer<T> {
        const NAME: &'static str = "observer.v1.DataObserver";
    }
}
