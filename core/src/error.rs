//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! The REST binding errors (`MethodNotAllowed`, `NotFound`, `MissingParameter`,
//! `Unmarshal`) carry enough information for an exception resolver to build a
//! transport response; `Generation` covers example-document failures.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Wrapper for JSON (de)serialization errors.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// Wrapper for YAML (de)serialization errors.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// The request verb is unknown or not supported by the resource.
    /// Carries the HTTP methods the resource does support.
    #[from(ignore)]
    #[display("Method Not Allowed (supported: {})", _0.join(", "))]
    MethodNotAllowed(Vec<String>),

    /// The request path does not address any resource instance.
    #[from(ignore)]
    #[display("Not Found: {_0}")]
    NotFound(String),

    /// A required proper noun, context parameter or adjective is absent.
    #[from(ignore)]
    #[display("Missing Parameter: {_0}")]
    MissingParameter(String),

    /// A body or typed slot could not be unmarshalled into its declared type.
    #[from(ignore)]
    #[display("Unmarshal Error: {_0}")]
    Unmarshal(String),

    /// Building or serializing an example document failed.
    #[from(ignore)]
    #[display("Generation Error: {_0}")]
    Generation(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

impl AppError {
    /// The HTTP status an exception resolver should report for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::MethodNotAllowed(_) => 405,
            AppError::NotFound(_) => 404,
            AppError::MissingParameter(_) | AppError::Unmarshal(_) => 400,
            _ => 500,
        }
    }
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert_eq!(app_err.status_code(), 500);
    }

    #[test]
    fn test_string_conversion() {
        // Strings never become binding errors implicitly
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_method_not_allowed_display() {
        let err = AppError::MethodNotAllowed(vec!["GET".into(), "POST".into()]);
        assert_eq!(err.to_string(), "Method Not Allowed (supported: GET, POST)");
        assert_eq!(err.status_code(), 405);
    }

    #[test]
    fn test_binding_status_codes() {
        assert_eq!(AppError::NotFound("/x".into()).status_code(), 404);
        assert_eq!(AppError::MissingParameter("id".into()).status_code(), 400);
        assert_eq!(AppError::Unmarshal("bad".into()).status_code(), 400);
        assert_eq!(AppError::Generation("bad".into()).status_code(), 500);
    }
}
