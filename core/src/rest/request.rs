//! # Inbound Requests
//!
//! The data-extraction contract the binding resolver needs from a transport:
//! method, headers, path, query multimap and body.

use url::form_urlencoded;

/// Header that overrides the transport method.
pub const METHOD_OVERRIDE_HEADER: &str = "X-HTTP-Method-Override";

/// An inbound request as seen by the binding resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestRequest {
    /// Transport method name.
    pub method: String,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Application context path stripped before template matching.
    pub context_path: String,
    /// Request path, including the context path.
    pub path: String,
    /// Decoded query parameters in order of appearance.
    pub query: Vec<(String, String)>,
    /// Raw request body.
    pub body: Vec<u8>,
}

impl RestRequest {
    /// Creates a request from a method and a raw request URI (`/path?query`).
    pub fn new(method: impl Into<String>, uri: &str) -> Self {
        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path, query),
            None => (uri, ""),
        };
        Self {
            method: method.into(),
            path: path.to_owned(),
            query: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
            ..Self::default()
        }
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the context path.
    pub fn with_context_path(mut self, context_path: impl Into<String>) -> Self {
        self.context_path = context_path.into();
        self
    }

    /// The first header value with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Every query value for `name`, in order.
    pub fn parameter_values(&self, name: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// The upper-cased method: the override header unless blank, else the transport method.
    pub fn effective_method(&self) -> String {
        match self.header(METHOD_OVERRIDE_HEADER) {
            Some(method) if !method.trim().is_empty() => method.trim().to_uppercase(),
            _ => self.method.to_uppercase(),
        }
    }

    /// The path relative to the context path.
    ///
    /// The context path only matches on a segment boundary; a path outside it
    /// is returned unchanged.
    pub fn request_context(&self) -> &str {
        let context = self.context_path.trim_end_matches('/');
        match self.path.strip_prefix(context) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => &self.path,
        }
    }
}
