#![deny(missing_docs)]

//! # Type Registry
//!
//! Stores the complex type definitions produced by an upstream introspection
//! pass, keyed by qualified name. Documents are YAML or JSON with a top-level
//! `types` list.

use crate::error::{AppError, AppResult};
use crate::model::types::{TypeDefinition, XmlType};
use indexmap::IndexMap;
use serde::Deserialize;

/// Shape of a metadata document.
#[derive(Debug, Default, Deserialize)]
struct TypeDocument {
    #[serde(default)]
    types: Vec<TypeDefinition>,
}

/// Arena of type definitions, addressed by qualified name.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: IndexMap<String, TypeDefinition>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a YAML metadata document into a new registry.
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        let mut registry = Self::new();
        registry.register_yaml(yaml)?;
        registry.check_references()?;
        Ok(registry)
    }

    /// Parses a JSON metadata document into a new registry.
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let mut registry = Self::new();
        registry.register_json(json)?;
        registry.check_references()?;
        Ok(registry)
    }

    /// Adds every type of a YAML document.
    pub fn register_yaml(&mut self, yaml: &str) -> AppResult<()> {
        let doc: TypeDocument = serde_yaml::from_str(yaml)?;
        doc.types.into_iter().try_for_each(|ty| self.insert(ty))
    }

    /// Adds every type of a JSON document.
    pub fn register_json(&mut self, json: &str) -> AppResult<()> {
        let doc: TypeDocument = serde_json::from_str(json)?;
        doc.types.into_iter().try_for_each(|ty| self.insert(ty))
    }

    /// Adds a single definition. Duplicate qualified names are rejected.
    pub fn insert(&mut self, ty: TypeDefinition) -> AppResult<()> {
        ty.validate()?;
        if self.types.contains_key(&ty.qualified_name) {
            return Err(AppError::General(format!(
                "Duplicate type definition '{}'",
                ty.qualified_name
            )));
        }
        self.types.insert(ty.qualified_name.clone(), ty);
        Ok(())
    }

    /// Verifies that every complex reference resolves to a registered type.
    pub fn check_references(&self) -> AppResult<()> {
        for ty in self.types.values() {
            if let Some(missing) = ty
                .referenced_types()
                .into_iter()
                .find(|name| !self.types.contains_key(*name))
            {
                return Err(AppError::General(format!(
                    "Type '{}' references unknown type '{}'",
                    ty.qualified_name, missing
                )));
            }
        }
        Ok(())
    }

    /// Looks up a definition by qualified name.
    pub fn get(&self, qualified_name: &str) -> Option<&TypeDefinition> {
        self.types.get(qualified_name)
    }

    /// Looks up a definition by qualified name or simple name.
    pub fn find(&self, name: &str) -> Option<&TypeDefinition> {
        self.get(name)
            .or_else(|| self.types.values().find(|ty| ty.simple_name() == name))
    }

    /// Resolves the complex type behind `xml_type`, or `None` for scalars.
    pub fn complex_type(&self, xml_type: &XmlType) -> AppResult<Option<&TypeDefinition>> {
        match xml_type {
            XmlType::Simple(_) => Ok(None),
            XmlType::Complex(name) => self
                .get(name)
                .map(Some)
                .ok_or_else(|| AppError::General(format!("Unknown complex type '{}'", name))),
        }
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered types in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values()
    }
}
