//! # Metadata Loading
//!
//! Reads type metadata from a single YAML/JSON file or from every such file
//! below a directory.

use crate::error::{CliError, CliResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;
use wsdoc_core::TypeRegistry;

fn is_metadata_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext, "yaml" | "yml" | "json"))
}

/// Metadata files at `path`, sorted for a stable registration order.
pub fn metadata_files(path: &Path) -> CliResult<Vec<PathBuf>> {
    if !path.exists() {
        return Err(CliError::General(format!(
            "Metadata path not found: {:?}",
            path
        )));
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_metadata_file(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    Ok(files)
}

/// Loads every metadata file at `path` into one registry and checks its references.
pub fn load_registry(path: &Path) -> CliResult<TypeRegistry> {
    let mut registry = TypeRegistry::new();
    for file in metadata_files(path)? {
        debug!(file = %file.display(), "loading type metadata");
        let content = fs::read_to_string(&file)?;
        match file.extension().and_then(|ext| ext.to_str()) {
            Some("json") => registry.register_json(&content)?,
            _ => registry.register_yaml(&content)?,
        }
    }
    registry.check_references()?;
    Ok(registry)
}
