#![deny(missing_docs)]

//! # Resource Exporter
//!
//! Ties binding, invocation and view selection together for one resource and
//! routes every failure through an [`ExceptionResolver`].

use crate::error::AppError;
use crate::rest::operation::RestResource;
use crate::rest::request::RestRequest;
use crate::rest::resolver::RequestBindingResolver;
use crate::rest::view::{select_view, View};
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// A transport-neutral error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// HTTP status code.
    pub status: u16,
    /// Human-readable message.
    pub message: String,
    /// Supported methods, reported as the `Allow` header of a 405.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allow: Vec<String>,
}

/// Turns errors raised while handling a request into responses.
pub trait ExceptionResolver: Send + Sync {
    /// Builds the response for `error`.
    fn resolve_exception(&self, error: &AppError) -> ErrorResponse;
}

/// Default exception resolver: status from [`AppError::status_code`], `Allow` for 405s.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestExceptionHandler;

impl ExceptionResolver for RestExceptionHandler {
    fn resolve_exception(&self, error: &AppError) -> ErrorResponse {
        let allow = match error {
            AppError::MethodNotAllowed(methods) => methods.clone(),
            _ => Vec::new(),
        };
        ErrorResponse {
            status: error.status_code(),
            message: error.to_string(),
            allow,
        }
    }
}

/// Outcome of handling one request.
#[derive(Debug, Clone, PartialEq)]
pub enum RestResponse {
    /// The operation succeeded and produced a view.
    View(View),
    /// The request failed.
    Error(ErrorResponse),
}

impl RestResponse {
    /// The HTTP status of the response.
    pub fn status(&self) -> u16 {
        match self {
            RestResponse::View(_) => 200,
            RestResponse::Error(error) => error.status,
        }
    }
}

/// Exposes a single REST resource.
///
/// Holds only immutable configuration, so one exporter may serve concurrent
/// requests.
#[derive(Clone)]
pub struct RestResourceExporter {
    resource: RestResource,
    resolver: RequestBindingResolver,
    exception_resolver: Arc<dyn ExceptionResolver>,
    namespaces: IndexMap<String, String>,
}

impl RestResourceExporter {
    /// Creates an exporter using [`RestExceptionHandler`] and no namespace prefixes.
    pub fn new(resource: RestResource, resolver: RequestBindingResolver) -> Self {
        Self {
            resource,
            resolver,
            exception_resolver: Arc::new(RestExceptionHandler),
            namespaces: IndexMap::new(),
        }
    }

    /// Replaces the exception resolver.
    pub fn with_exception_resolver(mut self, exception_resolver: Arc<dyn ExceptionResolver>) -> Self {
        self.exception_resolver = exception_resolver;
        self
    }

    /// Sets the namespace to prefix map handed to result views.
    pub fn with_namespaces(mut self, namespaces: IndexMap<String, String>) -> Self {
        self.namespaces = namespaces;
        self
    }

    /// The exported resource.
    pub fn resource(&self) -> &RestResource {
        &self.resource
    }

    /// Handles one request.
    pub fn handle(&self, request: &RestRequest) -> RestResponse {
        match self.resolver.dispatch(&self.resource, request) {
            Ok((operation, result)) => {
                RestResponse::View(select_view(operation, result, &self.namespaces))
            }
            Err(error) => {
                debug!(error = %error, noun = %self.resource.noun(), "request failed");
                RestResponse::Error(self.exception_resolver.resolve_exception(&error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SimpleType, TypeRegistry, XmlType};
    use crate::rest::coerce::XmlUnmarshaller;
    use crate::rest::operation::{handler, OperationResult, RestOperation};
    use crate::rest::verb::VerbType;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn resolver() -> RequestBindingResolver {
        RequestBindingResolver::new(Arc::new(XmlUnmarshaller::new(Arc::new(
            TypeRegistry::new(),
        ))))
    }

    fn read_only() -> RestResourceExporter {
        let resource = RestResource::new("colors", "/colors/{}").unwrap().with_operation(
            RestOperation::new(
                VerbType::Read,
                handler(|params| {
                    Ok(OperationResult::Value(json!({
                        "id": params.proper_noun,
                        "shade": params.adjectives.get("shade").cloned().flatten(),
                    })))
                }),
            )
            .with_proper_noun(XmlType::Simple(SimpleType::String), true)
            .with_adjective(
                "shade",
                crate::rest::operation::ParamType::Scalar(XmlType::Simple(SimpleType::String)),
                true,
            ),
        );
        RestResourceExporter::new(resource, resolver())
    }

    #[test]
    fn test_get_on_read_only_resource() {
        let response = read_only().handle(&RestRequest::new("GET", "/colors/red?shade=dark"));
        assert_eq!(response.status(), 200);
        match response {
            RestResponse::View(View::Result { result, .. }) => {
                assert_eq!(result, json!({ "id": "red", "shade": "dark" }))
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_delete_on_read_only_resource() {
        let response = read_only().handle(&RestRequest::new("DELETE", "/colors/red"));
        assert_eq!(
            response,
            RestResponse::Error(ErrorResponse {
                status: 405,
                message: "Method Not Allowed (supported: GET)".into(),
                allow: vec!["GET".into()],
            })
        );
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let response = read_only().handle(&RestRequest::new("GET", "/shapes/1"));
        assert_eq!(response.status(), 404);
    }

    #[test]
    fn test_override_header_is_honoured() {
        let resource = RestResource::new("colors", "/colors").unwrap().with_operation(
            RestOperation::new(
                VerbType::Create,
                handler(|_| Ok(OperationResult::Value(json!("created")))),
            )
            .wrapping_payload(),
        );
        let exporter = RestResourceExporter::new(resource, resolver());
        let request =
            RestRequest::new("POST", "/colors").with_header("X-HTTP-Method-Override", "PUT");
        match exporter.handle(&request) {
            RestResponse::View(View::Payload { payload, .. }) => assert_eq!(payload, json!("created")),
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_handler_errors_reach_exception_resolver() {
        struct Teapot;
        impl ExceptionResolver for Teapot {
            fn resolve_exception(&self, error: &AppError) -> ErrorResponse {
                ErrorResponse {
                    status: 418,
                    message: error.to_string(),
                    allow: Vec::new(),
                }
            }
        }

        let resource = RestResource::new("colors", "/colors").unwrap().with_operation(
            RestOperation::new(
                VerbType::Read,
                handler(|_| Err(AppError::General("boom".into()))),
            ),
        );
        let exporter =
            RestResourceExporter::new(resource, resolver()).with_exception_resolver(Arc::new(Teapot));
        let response = exporter.handle(&RestRequest::new("GET", "/colors"));
        assert_eq!(response.status(), 418);

        let default = RestExceptionHandler.resolve_exception(&AppError::General("boom".into()));
        assert_eq!(default.status, 500);
        let _: Value = serde_json::to_value(&default).unwrap();
    }
}
