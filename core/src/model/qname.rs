#![deny(missing_docs)]

//! # Qualified Names
//!
//! XML names with an optional namespace. The textual form is Clark notation
//! (`{urn:example}person`), or the bare local name when there is no namespace.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A namespace-qualified XML name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QName {
    /// The namespace URI. `None` means "no namespace".
    pub namespace: Option<String>,
    /// The local part.
    pub local: String,
}

impl QName {
    /// Creates a name in the given namespace. An empty namespace is treated as absent.
    pub fn new(namespace: Option<&str>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_owned),
            local: local.into(),
        }
    }

    /// Creates a name with no namespace.
    pub fn local(local: impl Into<String>) -> Self {
        Self::new(None, local)
    }

    /// The namespace as a string slice.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

impl FromStr for QName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (namespace, local) = match s.strip_prefix('{') {
            Some(rest) => {
                let (ns, local) = rest.split_once('}').ok_or_else(|| {
                    AppError::General(format!("Unterminated namespace in QName '{}'", s))
                })?;
                (Some(ns), local)
            }
            None => (None, s),
        };
        if local.is_empty() {
            return Err(AppError::General(format!(
                "QName '{}' has an empty local part",
                s
            )));
        }
        Ok(QName::new(namespace, local))
    }
}

impl TryFrom<String> for QName {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QName> for String {
    fn from(value: QName) -> Self {
        value.to_string()
    }
}
