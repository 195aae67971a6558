//! # SOAP Request Documents
//!
//! Determines the qualified name of the document element a client sends for
//! a document/literal web method.

use crate::error::{AppError, AppResult};
use crate::model::{ParameterStyle, QName, SoapBindingStyle, SoapUse, WebMethod};

/// The request document element of `method`.
///
/// The request wrapper wins; a bare method uses its first non-header
/// parameter in the endpoint namespace. Returns `None` when neither applies.
/// Methods that are not document/literal have no request document and fail.
pub fn request_document_qname(method: &WebMethod) -> AppResult<Option<QName>> {
    if method.style != SoapBindingStyle::Document || method.soap_use != SoapUse::Literal {
        return Err(AppError::General(format!(
            "No request document qname available for a {:?}/{:?} web method '{}'",
            method.style, method.soap_use, method.name
        )));
    }

    if let Some(wrapper) = &method.request_wrapper {
        return Ok(Some(QName::new(
            wrapper.element_namespace.as_deref(),
            wrapper.element_name.as_str(),
        )));
    }

    if method.parameter_style == ParameterStyle::Bare {
        return Ok(method
            .parameters
            .iter()
            .find(|param| !param.header)
            .map(|param| {
                QName::new(
                    method.target_namespace.as_deref(),
                    param.element_name.as_str(),
                )
            }));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RequestWrapper, WebParam};

    fn method() -> WebMethod {
        WebMethod {
            name: "placeOrder".into(),
            target_namespace: Some("urn:shop".into()),
            parameters: vec![
                WebParam {
                    element_name: "auth".into(),
                    header: true,
                },
                WebParam {
                    element_name: "order".into(),
                    header: false,
                },
            ],
            ..WebMethod::default()
        }
    }

    #[test]
    fn test_wrapper_wins() {
        let mut wrapped = method();
        wrapped.parameter_style = ParameterStyle::Bare;
        wrapped.request_wrapper = Some(RequestWrapper {
            element_name: "placeOrderRequest".into(),
            element_namespace: Some("urn:shop:msg".into()),
        });
        let qname = request_document_qname(&wrapped).unwrap().unwrap();
        assert_eq!(qname.to_string(), "{urn:shop:msg}placeOrderRequest");
    }

    #[test]
    fn test_bare_uses_first_body_parameter() {
        let mut bare = method();
        bare.parameter_style = ParameterStyle::Bare;
        let qname = request_document_qname(&bare).unwrap().unwrap();
        assert_eq!(qname, QName::new(Some("urn:shop"), "order"));
    }

    #[test]
    fn test_wrapped_without_wrapper_has_none() {
        assert_eq!(request_document_qname(&method()).unwrap(), None);
    }

    #[test]
    fn test_rpc_is_rejected() {
        let mut rpc = method();
        rpc.style = SoapBindingStyle::Rpc;
        assert!(request_document_qname(&rpc).is_err());

        let mut encoded = method();
        encoded.soap_use = SoapUse::Encoded;
        assert!(request_document_qname(&encoded).is_err());
    }
}
