#![deny(missing_docs)]

//! # REST Operations and Resources
//!
//! Statically declared operation signatures: the proper noun, context
//! parameters, adjectives and noun value, plus the handler the resolved values
//! are dispatched to.

use crate::error::{AppError, AppResult};
use crate::model::XmlType;
use crate::rest::media::MediaTypeDescriptor;
use crate::rest::template::{PathValues, UriTemplate};
use crate::rest::verb::VerbType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// The static shape of a query parameter, written `{ scalar: <type> }` or
/// `{ sequence: <type> }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ParamTypeRepr", into = "ParamTypeRepr")]
pub enum ParamType {
    /// A single value; only the first raw value is used.
    Scalar(XmlType),
    /// An ordered sequence; every raw value is coerced.
    Sequence(XmlType),
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParamTypeRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scalar: Option<XmlType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sequence: Option<XmlType>,
}

impl TryFrom<ParamTypeRepr> for ParamType {
    type Error = AppError;

    fn try_from(repr: ParamTypeRepr) -> Result<Self, Self::Error> {
        match (repr.scalar, repr.sequence) {
            (Some(ty), None) => Ok(ParamType::Scalar(ty)),
            (None, Some(ty)) => Ok(ParamType::Sequence(ty)),
            _ => Err(AppError::General(
                "A parameter needs exactly one of 'scalar' or 'sequence'".into(),
            )),
        }
    }
}

impl From<ParamType> for ParamTypeRepr {
    fn from(param: ParamType) -> Self {
        match param {
            ParamType::Scalar(ty) => ParamTypeRepr {
                scalar: Some(ty),
                sequence: None,
            },
            ParamType::Sequence(ty) => ParamTypeRepr {
                scalar: None,
                sequence: Some(ty),
            },
        }
    }
}

impl ParamType {
    /// The element type.
    pub fn component_type(&self) -> &XmlType {
        match self {
            ParamType::Scalar(ty) | ParamType::Sequence(ty) => ty,
        }
    }
}

/// Declared proper noun (resource id) slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProperNoun {
    /// Target type.
    #[serde(rename = "type")]
    pub ty: XmlType,
    /// Whether the request may omit it.
    #[serde(default)]
    pub optional: bool,
}

/// Declared adjective (query parameter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjective {
    /// Target shape.
    #[serde(rename = "type")]
    pub ty: ParamType,
    /// Whether the request may omit it.
    #[serde(default)]
    pub optional: bool,
}

/// Declared noun value (request body).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounValue {
    /// Target type.
    #[serde(rename = "type")]
    pub ty: XmlType,
    /// Whether an unreadable body is tolerated.
    #[serde(default)]
    pub optional: bool,
}

/// Values resolved from a request, ready for invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedParameters {
    /// The proper noun value.
    pub proper_noun: Option<Value>,
    /// Context parameter values by name.
    pub context: IndexMap<String, Value>,
    /// Adjective values by name; `None` for absent optional adjectives.
    pub adjectives: IndexMap<String, Option<Value>>,
    /// The noun value.
    pub noun: Option<Value>,
}

/// A binary attachment returned by an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Content type of the data.
    pub content_type: String,
    /// Suggested file name.
    pub name: Option<String>,
    /// Raw bytes.
    pub bytes: Vec<u8>,
}

/// What an operation returned.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult {
    /// A structured value (`Value::Null` for no result).
    Value(Value),
    /// Raw binary data, passed through untouched.
    Attachment(Attachment),
}

/// The invocation target of an operation.
pub trait OperationHandler: Send + Sync {
    /// Invokes the operation with resolved parameters.
    fn invoke(&self, params: &ResolvedParameters) -> AppResult<OperationResult>;
}

struct FnHandler<F>(F);

impl<F> OperationHandler for FnHandler<F>
where
    F: Fn(&ResolvedParameters) -> AppResult<OperationResult> + Send + Sync,
{
    fn invoke(&self, params: &ResolvedParameters) -> AppResult<OperationResult> {
        (self.0)(params)
    }
}

/// Wraps a closure as a shared operation handler.
pub fn handler<F>(f: F) -> Arc<dyn OperationHandler>
where
    F: Fn(&ResolvedParameters) -> AppResult<OperationResult> + Send + Sync + 'static,
{
    Arc::new(FnHandler(f))
}

/// A REST operation signature bound to its handler.
#[derive(Clone)]
pub struct RestOperation {
    /// The verb this operation serves.
    pub verb: VerbType,
    /// Proper noun declaration.
    pub proper_noun: Option<ProperNoun>,
    /// Context parameter types by name.
    pub context_parameters: IndexMap<String, XmlType>,
    /// Adjective declarations by name.
    pub adjectives: IndexMap<String, Adjective>,
    /// Noun value declaration.
    pub noun_value: Option<NounValue>,
    /// Whether the result is wrapped in a payload envelope.
    pub wraps_payload: bool,
    /// Produced media types.
    pub produces: Vec<MediaTypeDescriptor>,
    handler: Arc<dyn OperationHandler>,
}

// Manual Debug: the handler is an opaque trait object.
impl fmt::Debug for RestOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestOperation")
            .field("verb", &self.verb)
            .field("proper_noun", &self.proper_noun)
            .field("context_parameters", &self.context_parameters)
            .field("adjectives", &self.adjectives)
            .field("noun_value", &self.noun_value)
            .field("wraps_payload", &self.wraps_payload)
            .field("produces", &self.produces)
            .finish_non_exhaustive()
    }
}

impl RestOperation {
    /// An operation with no parameters.
    pub fn new(verb: VerbType, handler: Arc<dyn OperationHandler>) -> Self {
        Self {
            verb,
            proper_noun: None,
            context_parameters: IndexMap::new(),
            adjectives: IndexMap::new(),
            noun_value: None,
            wraps_payload: false,
            produces: Vec::new(),
            handler,
        }
    }

    /// Declares the proper noun.
    pub fn with_proper_noun(mut self, ty: XmlType, optional: bool) -> Self {
        self.proper_noun = Some(ProperNoun { ty, optional });
        self
    }

    /// Declares a context parameter.
    pub fn with_context_parameter(mut self, name: impl Into<String>, ty: XmlType) -> Self {
        self.context_parameters.insert(name.into(), ty);
        self
    }

    /// Declares an adjective.
    pub fn with_adjective(mut self, name: impl Into<String>, ty: ParamType, optional: bool) -> Self {
        self.adjectives.insert(name.into(), Adjective { ty, optional });
        self
    }

    /// Declares the noun value.
    pub fn with_noun_value(mut self, ty: XmlType, optional: bool) -> Self {
        self.noun_value = Some(NounValue { ty, optional });
        self
    }

    /// Marks the result as payload-wrapped.
    pub fn wrapping_payload(mut self) -> Self {
        self.wraps_payload = true;
        self
    }

    /// Declares a produced media type.
    pub fn producing(mut self, media_type: MediaTypeDescriptor) -> Self {
        self.produces.push(media_type);
        self
    }

    /// Invokes the handler.
    pub fn invoke(&self, params: &ResolvedParameters) -> AppResult<OperationResult> {
        self.handler.invoke(params)
    }
}

/// A REST resource: a noun addressed by a URI template, with one operation per verb.
#[derive(Debug, Clone)]
pub struct RestResource {
    noun: String,
    template: UriTemplate,
    operations: BTreeMap<VerbType, RestOperation>,
}

impl RestResource {
    /// Creates a resource without operations.
    pub fn new(noun: impl Into<String>, template: &str) -> AppResult<Self> {
        Ok(Self {
            noun: noun.into(),
            template: UriTemplate::parse(template)?,
            operations: BTreeMap::new(),
        })
    }

    /// Adds an operation, replacing any operation registered for the same verb.
    pub fn with_operation(mut self, operation: RestOperation) -> Self {
        self.operations.insert(operation.verb, operation);
        self
    }

    /// The resource noun.
    pub fn noun(&self) -> &str {
        &self.noun
    }

    /// The URI template.
    pub fn template(&self) -> &UriTemplate {
        &self.template
    }

    /// Supported verbs, in verb order.
    pub fn supported_verbs(&self) -> impl Iterator<Item = VerbType> + '_ {
        self.operations.keys().copied()
    }

    /// HTTP methods of the supported verbs.
    pub fn supported_methods(&self) -> Vec<String> {
        self.supported_verbs()
            .map(|verb| verb.http_method().to_owned())
            .collect()
    }

    /// The operation registered for `verb`.
    pub fn operation(&self, verb: VerbType) -> Option<&RestOperation> {
        self.operations.get(&verb)
    }

    /// Splits a request path into context parameter and proper noun values.
    pub fn path_values(&self, request_context: &str) -> AppResult<PathValues> {
        self.template
            .match_path(request_context)
            .ok_or_else(|| AppError::NotFound(request_context.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SimpleType;

    fn noop() -> Arc<dyn OperationHandler> {
        handler(|_| Ok(OperationResult::Value(Value::Null)))
    }

    #[test]
    fn test_supported_methods_in_verb_order() {
        let resource = RestResource::new("order", "/orders/{}")
            .unwrap()
            .with_operation(RestOperation::new(VerbType::Delete, noop()))
            .with_operation(RestOperation::new(VerbType::Read, noop()))
            .with_operation(RestOperation::new(VerbType::Create, noop()));
        assert_eq!(resource.supported_methods(), vec!["PUT", "GET", "DELETE"]);
        assert!(resource.operation(VerbType::Update).is_none());
    }

    #[test]
    fn test_path_values_not_found() {
        let resource = RestResource::new("order", "/orders/{}").unwrap();
        assert!(matches!(
            resource.path_values("/nope"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_param_type_component() {
        let ty = ParamType::Sequence(XmlType::Simple(SimpleType::Int));
        assert_eq!(ty.component_type(), &XmlType::Simple(SimpleType::Int));
    }

    #[test]
    fn test_adjective_yaml() {
        let adjective: Adjective =
            serde_yaml::from_str("type: { sequence: { simple: long } }\noptional: true").unwrap();
        assert_eq!(
            adjective.ty,
            ParamType::Sequence(XmlType::Simple(SimpleType::Long))
        );
        assert!(adjective.optional);

        let scalar: ParamType =
            serde_json::from_str(r#"{"scalar":{"complex":"com.example.Color"}}"#).unwrap();
        assert_eq!(scalar, ParamType::Scalar(XmlType::Complex("com.example.Color".into())));
        assert!(serde_yaml::from_str::<ParamType>("{ simple: int }").is_err());
    }

    #[test]
    fn test_closure_handler_invocation() {
        let op = RestOperation::new(
            VerbType::Read,
            handler(|params| Ok(OperationResult::Value(Value::from(params.adjectives.len())))),
        );
        let mut params = ResolvedParameters::default();
        params.adjectives.insert("a".into(), None);
        assert_eq!(op.invoke(&params).unwrap(), OperationResult::Value(Value::from(1)));
    }
}
