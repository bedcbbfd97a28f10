//! `grpc.reflection.v1` envelope mapping.
use super::{Envelope, RegistryReflection, respond_to};
use crate::reflection::query::{ReflectionQuery, ReflectionReply};
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status, Streaming};
use tonic_reflection::pb::v1::{
    ErrorResponse, ExtensionNumberResponse, FileDescriptorResponse, ListServiceResponse,
    ServerReflectionRequest, ServerReflectionResponse, ServiceResponse,
    server_reflection_request::MessageRequest, server_reflection_response::MessageResponse,
};

pub use tonic_reflection::server::v1::{ServerReflection, ServerReflectionServer};

type ResponseStream = ReceiverStream<Result<ServerReflectionResponse, Status>>;

#[tonic::async_trait]
impl ServerReflection for RegistryReflection {
    type ServerReflectionInfoStream = ResponseStream;

    async fn server_reflection_info(
        &self,
        request: Request<Streaming<ServerReflectionRequest>>,
    ) -> Result<Response<ResponseStream>, Status> {
        let responses = respond_to(self.registry.clone(), request.into_inner());
        Ok(Response::new(responses))
    }
}

impl Envelope for ServerReflectionRequest {
    type Response = ServerReflectionResponse;

    fn query(&self) -> Option<ReflectionQuery> {
        let query = match self.message_request.as_ref()? {
            MessageRequest::FileByFilename(filename) => {
                ReflectionQuery::FileByFilename(filename.clone())
            }
            MessageRequest::FileContainingSymbol(symbol) => {
                ReflectionQuery::FileContainingSymbol(symbol.clone())
            }
            MessageRequest::FileContainingExtension(extension) => {
                ReflectionQuery::FileContainingExtension {
                    containing_type: extension.containing_type.clone(),
                    extension_number: extension.extension_number,
                }
            }
            MessageRequest::AllExtensionNumbersOfType(containing_type) => {
                ReflectionQuery::AllExtensionNumbersOfType(containing_type.clone())
            }
            MessageRequest::ListServices(_) => ReflectionQuery::ListServices,
        };

        Some(query)
    }

    fn respond(self, reply: ReflectionReply) -> ServerReflectionResponse {
        let message_response = match reply {
            ReflectionReply::FileDescriptors(files) => {
                MessageResponse::FileDescriptorResponse(FileDescriptorResponse {
                    file_descriptor_proto: files,
                })
            }
            ReflectionReply::NotFound => {
                MessageResponse::FileDescriptorResponse(FileDescriptorResponse::default())
            }
            ReflectionReply::ExtensionNumbers {
                base_type_name,
                extension_numbers,
            } => MessageResponse::AllExtensionNumbersResponse(ExtensionNumberResponse {
                base_type_name,
                extension_number: extension_numbers,
            }),
            ReflectionReply::Services(names) => {
                MessageResponse::ListServicesResponse(ListServiceResponse {
                    service: names
                        .into_iter()
                        .map(|name| ServiceResponse { name })
                        .collect(),
                })
            }
        };

        envelope(self, message_response)
    }

    fn reject(self, code: tonic::Code, message: String) -> ServerReflectionResponse {
        let error = ErrorResponse {
            error_code: code as i32,
            error_message: message,
        };

        envelope(self, MessageResponse::ErrorResponse(error))
    }
}

fn envelope(
    request: ServerReflectionRequest,
    message_response: MessageResponse,
) -> ServerReflectionResponse {
    ServerReflectionResponse {
        valid_host: request.host.clone(),
        original_request: Some(request),
        message_response: Some(message_response),
    }
}
