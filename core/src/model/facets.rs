//! # Facet Filter
//!
//! Include/exclude predicate over facet tags attached to model items.

use crate::model::types::Annotated;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Decides whether a tagged model item shows up in generated output.
///
/// An item is rejected if it carries an excluded facet. When includes are
/// configured, an item carrying facets must carry at least one included facet;
/// untagged items are always accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetFilter {
    /// Facets that must be present on tagged items.
    pub includes: BTreeSet<String>,
    /// Facets that hide an item.
    pub excludes: BTreeSet<String>,
}

impl FacetFilter {
    /// A filter accepting everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an included facet.
    pub fn include(mut self, facet: impl Into<String>) -> Self {
        self.includes.insert(facet.into());
        self
    }

    /// Adds an excluded facet.
    pub fn exclude(mut self, facet: impl Into<String>) -> Self {
        self.excludes.insert(facet.into());
        self
    }

    /// Tests a set of facet tags.
    pub fn accept_facets(&self, facets: &[String]) -> bool {
        if facets.iter().any(|f| self.excludes.contains(f)) {
            return false;
        }
        if self.includes.is_empty() || facets.is_empty() {
            return true;
        }
        facets.iter().any(|f| self.includes.contains(f))
    }

    /// Tests a model item.
    pub fn accept(&self, item: &impl Annotated) -> bool {
        self.accept_facets(item.facets())
    }
}
