#![deny(missing_docs)]

//! # Example Documents
//!
//! - **node**: the immutable XML tree and its writer/reader.
//! - **context**: per-call recursion guard and example value resolution.
//! - **xml**: the XML example builder.
//! - **json**: the JSON rendition of the same walk.

pub mod context;
pub mod json;
pub mod node;
pub mod xml;

pub use context::{ExampleSlot, PLACEHOLDER};
pub use node::{XmlAttribute, XmlDocument, XmlElement, XmlNode};
pub use xml::{root_element_name, ExampleBuilder};

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Container semantics wrapped around an example root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// Java array.
    Array,
    /// `java.util.Collection`.
    Collection,
    /// `java.util.List`.
    List,
    /// `java.util.Map`.
    Map,
}

impl ContainerKind {
    /// The synthetic wrapper element name.
    pub fn element_name(self) -> &'static str {
        match self {
            ContainerKind::Array => "array",
            ContainerKind::Collection => "collection",
            ContainerKind::List => "list",
            ContainerKind::Map => "map",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

impl FromStr for ContainerKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "array" => Ok(ContainerKind::Array),
            "collection" => Ok(ContainerKind::Collection),
            "list" => Ok(ContainerKind::List),
            "map" => Ok(ContainerKind::Map),
            other => Err(AppError::General(format!("Unknown container kind '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_parsing() {
        assert_eq!("List".parse::<ContainerKind>().unwrap(), ContainerKind::List);
        assert_eq!(ContainerKind::Map.to_string(), "map");
        assert!("set".parse::<ContainerKind>().is_err());
    }
}
