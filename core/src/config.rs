#![deny(missing_docs)]

//! # Generator Configuration
//!
//! Facet filtering, namespace prefixes and the default example format, read
//! from a YAML or JSON file.

use crate::error::{AppError, AppResult};
use crate::model::FacetFilter;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Output format of generated examples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExampleFormat {
    /// XML instance document.
    #[default]
    Xml,
    /// JSON value.
    Json,
}

impl fmt::Display for ExampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExampleFormat::Xml => "xml",
            ExampleFormat::Json => "json",
        })
    }
}

impl FromStr for ExampleFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xml" => Ok(ExampleFormat::Xml),
            "json" => Ok(ExampleFormat::Json),
            other => Err(AppError::General(format!("Unknown example format '{}'", other))),
        }
    }
}

/// Settings shared by the generator commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Facet include/exclude sets.
    pub facets: FacetFilter,
    /// Namespace URI to prefix mapping.
    pub namespace_prefixes: IndexMap<String, String>,
    /// Default example format.
    pub example_format: ExampleFormat,
}

impl GeneratorConfig {
    /// Parses a YAML configuration.
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a JSON configuration.
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a configuration file; `.json` files are JSON, anything else YAML.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }
}
