#![deny(missing_docs)]

//! # Metadata Model
//!
//! - **qname**: namespace-qualified XML names.
//! - **types**: complex type definitions, attributes and elements.
//! - **registry**: the arena holding the type graph.
//! - **facets**: the facet include/exclude predicate.
//! - **soap**: JAX-WS web method descriptions.

pub mod facets;
pub mod qname;
pub mod registry;
pub mod soap;
pub mod types;

pub use facets::FacetFilter;
pub use qname::QName;
pub use registry::TypeRegistry;
pub use soap::{ParameterStyle, RequestWrapper, SoapBindingStyle, SoapUse, WebMethod, WebParam};
pub use types::{
    AnyElement, Annotated, Attribute, DocumentationExample, Element, ElementDeclaration,
    ElementWrapper, SimpleContent, SimpleType, TypeDefinition, XmlType,
};
