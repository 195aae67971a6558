//! # REST Binding
//!
//! Request-to-parameter binding for REST resources: verb mapping, URI template
//! matching, typed coercion, invocation and view selection.

pub mod coerce;
pub mod descriptor;
pub mod exporter;
pub mod media;
pub mod operation;
pub mod request;
pub mod resolver;
pub mod template;
pub mod verb;
pub mod view;

pub use coerce::{coerce_scalar, coerce_text, coerce_values, Unmarshaller, XmlUnmarshaller};
pub use descriptor::{
    resources_from_json_str, resources_from_yaml_str, OperationDescriptor, ResourceDescriptor,
};
pub use exporter::{
    ErrorResponse, ExceptionResolver, RestExceptionHandler, RestResourceExporter, RestResponse,
};
pub use media::{preferred_media_type, MediaTypeDescriptor, DEFAULT_MEDIA_TYPE};
pub use operation::{
    handler, Adjective, Attachment, NounValue, OperationHandler, OperationResult, ParamType,
    ProperNoun, ResolvedParameters, RestOperation, RestResource,
};
pub use request::{RestRequest, METHOD_OVERRIDE_HEADER};
pub use resolver::RequestBindingResolver;
pub use template::{PathValues, UriTemplate};
pub use verb::VerbType;
pub use view::{select_view, View};
