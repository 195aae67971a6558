#![deny(missing_docs)]

//! # WSDoc Core
//!
//! Core library for the web-service documentation generator: the JAXB type
//! metadata model, the example document builder and REST request binding.

/// Shared error types.
pub mod error;

/// Type metadata (types, registry, facets, SOAP methods).
pub mod model;

/// Example document synthesis (XML and JSON).
pub mod example;

/// REST request binding, invocation and view selection.
pub mod rest;

/// SOAP request document helpers.
pub mod soap;

/// Generator configuration.
pub mod config;

pub use config::{ExampleFormat, GeneratorConfig};
pub use error::{AppError, AppResult};
pub use example::{ContainerKind, ExampleBuilder, ExampleSlot, XmlDocument, XmlElement};
pub use model::{FacetFilter, QName, TypeDefinition, TypeRegistry, XmlType};
pub use rest::{
    RequestBindingResolver, RestRequest, RestResource, RestResourceExporter, RestResponse,
    VerbType, View,
};
pub use soap::request_document_qname;
