//! # Resource Descriptors
//!
//! Serializable REST resource declarations, read from a YAML or JSON document
//! with a top-level `resources` list and turned into [`RestResource`]s.

use crate::error::AppResult;
use crate::model::XmlType;
use crate::rest::media::MediaTypeDescriptor;
use crate::rest::operation::{Adjective, NounValue, OperationHandler, ProperNoun, RestOperation, RestResource};
use crate::rest::verb::VerbType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Declared signature of one operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDescriptor {
    /// Served verb.
    pub verb: VerbType,
    /// Proper noun declaration.
    #[serde(default)]
    pub proper_noun: Option<ProperNoun>,
    /// Context parameter types by name.
    #[serde(default)]
    pub context: IndexMap<String, XmlType>,
    /// Adjective declarations by name.
    #[serde(default)]
    pub adjectives: IndexMap<String, Adjective>,
    /// Noun value declaration.
    #[serde(default)]
    pub noun: Option<NounValue>,
    /// Whether the result is payload-wrapped.
    #[serde(default)]
    pub wraps_payload: bool,
    /// Produced media types.
    #[serde(default)]
    pub produces: Vec<MediaTypeDescriptor>,
}

/// Declared REST resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    /// Resource noun.
    pub noun: String,
    /// URI template.
    pub template: String,
    /// Operations, one per verb.
    #[serde(default)]
    pub operations: Vec<OperationDescriptor>,
}

#[derive(Debug, Default, Deserialize)]
struct ResourceDocument {
    #[serde(default)]
    resources: Vec<ResourceDescriptor>,
}

impl ResourceDescriptor {
    /// Builds the resource, binding every operation to `handler`.
    pub fn into_resource(&self, handler: Arc<dyn OperationHandler>) -> AppResult<RestResource> {
        let resource = RestResource::new(self.noun.clone(), &self.template)?;
        Ok(self.operations.iter().fold(resource, |resource, declared| {
            let mut operation = RestOperation::new(declared.verb, handler.clone());
            operation.proper_noun = declared.proper_noun.clone();
            operation.context_parameters = declared.context.clone();
            operation.adjectives = declared.adjectives.clone();
            operation.noun_value = declared.noun.clone();
            operation.wraps_payload = declared.wraps_payload;
            operation.produces = declared.produces.clone();
            resource.with_operation(operation)
        }))
    }
}

/// Parses a YAML resource document.
pub fn resources_from_yaml_str(yaml: &str) -> AppResult<Vec<ResourceDescriptor>> {
    let doc: ResourceDocument = serde_yaml::from_str(yaml)?;
    Ok(doc.resources)
}

/// Parses a JSON resource document.
pub fn resources_from_json_str(json: &str) -> AppResult<Vec<ResourceDescriptor>> {
    let doc: ResourceDocument = serde_json::from_str(json)?;
    Ok(doc.resources)
}
