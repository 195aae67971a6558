//! # REST Verbs
//!
//! CRUD verbs and their fixed HTTP method mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The operation verbs a REST resource can support.
///
/// Ordering follows declaration order, which is also the order supported
/// methods are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerbType {
    /// Create a resource (`PUT`).
    Create,
    /// Read a resource (`GET`).
    Read,
    /// Update a resource (`POST`).
    Update,
    /// Delete a resource (`DELETE`).
    Delete,
}

impl VerbType {
    /// The HTTP method bound to this verb.
    pub fn http_method(self) -> &'static str {
        match self {
            VerbType::Create => "PUT",
            VerbType::Read => "GET",
            VerbType::Update => "POST",
            VerbType::Delete => "DELETE",
        }
    }

    /// The verb bound to an upper-case HTTP method name.
    pub fn from_http_method(method: &str) -> Option<Self> {
        match method {
            "PUT" => Some(VerbType::Create),
            "GET" => Some(VerbType::Read),
            "POST" => Some(VerbType::Update),
            "DELETE" => Some(VerbType::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for VerbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VerbType::Create => "create",
            VerbType::Read => "read",
            VerbType::Update => "update",
            VerbType::Delete => "delete",
        };
        f.write_str(name)
    }
}
