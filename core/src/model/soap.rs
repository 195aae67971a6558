//! # SOAP Endpoint Metadata
//!
//! JAX-WS web method descriptions used by the request-document helpers in
//! [`crate::soap`].

use serde::{Deserialize, Serialize};

/// `@SOAPBinding(style = ...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoapBindingStyle {
    /// Document style.
    #[default]
    Document,
    /// RPC style.
    Rpc,
}

/// `@SOAPBinding(use = ...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoapUse {
    /// Literal encoding.
    #[default]
    Literal,
    /// SOAP encoding.
    Encoded,
}

/// `@SOAPBinding(parameterStyle = ...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterStyle {
    /// Parameters wrapped in a request element.
    #[default]
    Wrapped,
    /// A single bare parameter is the request document.
    Bare,
}

/// The request wrapper element of a wrapped web method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestWrapper {
    /// Wrapper element name.
    pub element_name: String,
    /// Wrapper element namespace.
    #[serde(default)]
    pub element_namespace: Option<String>,
}

/// A web method parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebParam {
    /// Element name of the parameter.
    pub element_name: String,
    /// Whether the parameter travels in a SOAP header.
    #[serde(default)]
    pub header: bool,
}

/// A JAX-WS web method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebMethod {
    /// Operation name.
    pub name: String,
    /// Target namespace of the declaring endpoint interface.
    #[serde(default)]
    pub target_namespace: Option<String>,
    /// Binding style.
    #[serde(default)]
    pub style: SoapBindingStyle,
    /// Binding use.
    #[serde(default, rename = "use")]
    pub soap_use: SoapUse,
    /// Parameter style.
    #[serde(default)]
    pub parameter_style: ParameterStyle,
    /// Request wrapper, for wrapped methods.
    #[serde(default)]
    pub request_wrapper: Option<RequestWrapper>,
    /// Parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<WebParam>,
}
