//! # Reflection Service
//!
//! [`RegistryReflection`] serves a [`DescriptorRegistry`] over the `ServerReflectionInfo`
//! bidirectional stream of both protocol versions:
//!
//! * [`v1`]: `grpc.reflection.v1.ServerReflection`
//! * [`v1alpha`]: `grpc.reflection.v1alpha.ServerReflection`, still used by older clients.
//!
//! Every inbound request gets exactly one response, in order. A query that matches nothing is
//! answered with an empty response of the matching kind, never with an RPC error, and a request
//! that carries no query is answered with an `INVALID_ARGUMENT` error response.
//!
//! ## Example
//!
//! ```rust,no_run
//! use reflekt_core::reflection::server::RegistryReflection;
//! use reflekt_core::registry::DescriptorRegistry;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(DescriptorRegistry::from_path("descriptor.bin")?);
//! let reflection = RegistryReflection::new(registry);
//!
//! tonic::transport::Server::builder()
//!     .add_service(reflection.v1_server())
//!     .add_service(reflection.v1alpha_server())
//!     .serve("[::1]:50051".parse()?)
//!     .await?;
//! # Ok(())
//! # }
//! ```
pub mod v1;
pub mod v1alpha;

use super::query::{ReflectionQuery, ReflectionReply};
use crate::registry::DescriptorRegistry;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Status, Streaming};

const RESPONSE_BUFFER: usize = 16;

/// A reflection service backed by a shared, immutable [`DescriptorRegistry`].
#[derive(Debug, Clone)]
pub struct RegistryReflection {
    registry: Arc<DescriptorRegistry>,
}

impl RegistryReflection {
    pub fn new(registry: Arc<DescriptorRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &DescriptorRegistry {
        &self.registry
    }

    /// Wraps a clone of this service into a `grpc.reflection.v1` tonic server.
    pub fn v1_server(&self) -> tonic_reflection::server::v1::ServerReflectionServer<Self> {
        tonic_reflection::server::v1::ServerReflectionServer::new(self.clone())
    }

    /// Wraps a clone of this service into a `grpc.reflection.v1alpha` tonic server.
    pub fn v1alpha_server(
        &self,
    ) -> tonic_reflection::server::v1alpha::ServerReflectionServer<Self> {
        tonic_reflection::server::v1alpha::ServerReflectionServer::new(self.clone())
    }
}

/// The version specific request/response envelope of the reflection protocol.
pub(crate) trait Envelope: Sized + Send + 'static {
    type Response: Send + 'static;

    /// Extracts the query carried by the request, if any.
    fn query(&self) -> Option<ReflectionQuery>;

    /// Builds the response to this request from the registry reply.
    fn respond(self, reply: ReflectionReply) -> Self::Response;

    /// Builds an error response to this request.
    fn reject(self, code: tonic::Code, message: String) -> Self::Response;
}

/// Answers every request of `requests` on a dedicated task and returns the response stream.
///
/// The task stops when the client closes its side of the stream, when the response stream is
/// dropped or when the inbound stream fails; in the last case the failure is forwarded.
pub(crate) fn respond_to<E: Envelope>(
    registry: Arc<DescriptorRegistry>,
    mut requests: Streaming<E>,
) -> ReceiverStream<Result<E::Response, Status>> {
    let (tx, rx) = mpsc::channel(RESPONSE_BUFFER);

    tokio::spawn(async move {
        loop {
            let request = match requests.message().await {
                Ok(Some(request)) => request,
                Ok(None) => break,
                Err(status) => {
                    tracing::warn!(%status, "Reflection request stream failed");
                    let _ = tx.send(Err(status)).await;
                    break;
                }
            };

            let response = match request.query() {
                Some(query) => {
                    tracing::debug!(kind = query.kind(), "Answering reflection query");
                    let reply = registry.answer(&query);
                    request.respond(reply)
                }
                None => request.reject(
                    tonic::Code::InvalidArgument,
                    "Reflection request does not carry any query".to_string(),
                ),
            };

            if tx.send(Ok(response)).await.is_err() {
                break;
            }
        }

        tracing::trace!("Reflection stream closed");
    });

    ReceiverStream::new(rx)
}
