//! # Media Types
//!
//! Media types an operation declares it can produce, with their
//! quality-of-source factor.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Content type used when an operation declares nothing.
pub const DEFAULT_MEDIA_TYPE: &str = "application/xml";

fn default_quality() -> f32 {
    1.0
}

/// A produced media type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaTypeDescriptor {
    /// The media type, e.g. `application/json`.
    pub media_type: String,
    /// Quality-of-source factor (`qs`).
    #[serde(default = "default_quality", rename = "qs")]
    pub quality_of_source: f32,
    /// Syntax label (`xml`, `json`, ...), when known.
    #[serde(default)]
    pub syntax: Option<String>,
    /// Media type parameters.
    #[serde(default)]
    pub params: IndexMap<String, String>,
}

impl MediaTypeDescriptor {
    /// A media type with `qs = 1.0`.
    pub fn new(media_type: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            quality_of_source: default_quality(),
            syntax: None,
            params: IndexMap::new(),
        }
    }

    /// Sets the quality-of-source factor.
    pub fn with_quality(mut self, qs: f32) -> Self {
        self.quality_of_source = qs;
        self
    }
}

/// The preferred media type: highest `qs`, earliest declaration on ties.
pub fn preferred_media_type(produces: &[MediaTypeDescriptor]) -> &str {
    produces
        .iter()
        .fold(None::<&MediaTypeDescriptor>, |best, candidate| match best {
            Some(current) if current.quality_of_source >= candidate.quality_of_source => {
                Some(current)
            }
            _ => Some(candidate),
        })
        .map(|m| m.media_type.as_str())
        .unwrap_or(DEFAULT_MEDIA_TYPE)
}
