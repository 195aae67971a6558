//! # Response Views
//!
//! Picks how an operation result is written back: attachments pass through
//! untouched, payload-wrapping operations get the payload view, everything else
//! goes to the structured result view with the namespace prefix map.
//!
//! Structured bodies follow the content type: JSON media types get JSON,
//! anything else is written as an XML document.

use crate::error::AppResult;
use crate::example::{XmlDocument, XmlElement};
use crate::model::QName;
use crate::rest::media::preferred_media_type;
use crate::rest::operation::{Attachment, OperationResult, RestOperation};
use indexmap::IndexMap;
use serde_json::{json, Value};

/// The selected response view.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Binary passthrough of an attachment.
    DataHandler(Attachment),
    /// Payload-wrapping view.
    Payload {
        /// Response content type.
        content_type: String,
        /// The wrapped payload.
        payload: Value,
    },
    /// Default structured view.
    Result {
        /// Response content type.
        content_type: String,
        /// The operation result.
        result: Value,
        /// Namespace to prefix mapping used when writing the result.
        namespaces: IndexMap<String, String>,
    },
}

impl View {
    /// The response content type.
    pub fn content_type(&self) -> &str {
        match self {
            View::DataHandler(attachment) => &attachment.content_type,
            View::Payload { content_type, .. } | View::Result { content_type, .. } => content_type,
        }
    }

    /// The response body bytes, in the syntax of [`content_type`](Self::content_type).
    pub fn body(&self) -> AppResult<Vec<u8>> {
        let body = match self {
            View::DataHandler(attachment) => attachment.bytes.clone(),
            View::Payload {
                content_type,
                payload,
            } if is_json(content_type) => serde_json::to_vec_pretty(&json!({ "payload": payload }))?,
            View::Payload { payload, .. } => XmlDocument::new(value_element("payload", payload))
                .to_xml_string()?
                .into_bytes(),
            View::Result {
                content_type,
                result,
                ..
            } if is_json(content_type) => serde_json::to_vec_pretty(result)?,
            View::Result {
                result, namespaces, ..
            } => XmlDocument::new(value_element("result", result))
                .to_xml_string_with_prefixes(namespaces)?
                .into_bytes(),
        };
        Ok(body)
    }
}

fn is_json(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase();
    essence.ends_with("/json") || essence.ends_with("+json")
}

/// An element named `name` holding `value`: object members become child
/// elements, array items repeat the member element, scalars become text.
fn value_element(name: &str, value: &Value) -> XmlElement {
    let element = XmlElement::new(QName::local(name));
    match value {
        Value::Null => element,
        Value::String(text) => element.with_text(text.as_str()),
        Value::Bool(_) | Value::Number(_) => element.with_text(value.to_string()),
        Value::Array(items) => element.with_children(items.iter().map(|item| value_element("item", item))),
        Value::Object(members) => element.with_children(
            members
                .iter()
                .flat_map(|(key, member)| member_elements(key, member)),
        ),
    }
}

fn member_elements(key: &str, value: &Value) -> Vec<XmlElement> {
    match value {
        Value::Array(items) => items.iter().map(|item| value_element(key, item)).collect(),
        _ => vec![value_element(key, value)],
    }
}

/// Selects the view for `result` of `operation`.
pub fn select_view(
    operation: &RestOperation,
    result: OperationResult,
    namespaces: &IndexMap<String, String>,
) -> View {
    let content_type = preferred_media_type(&operation.produces).to_owned();
    match result {
        OperationResult::Attachment(attachment) => View::DataHandler(attachment),
        OperationResult::Value(payload) if operation.wraps_payload => View::Payload {
            content_type,
            payload,
        },
        OperationResult::Value(result) => View::Result {
            content_type,
            result,
            namespaces: namespaces.clone(),
        },
    }
}
