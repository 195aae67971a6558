#![deny(missing_docs)]

//! # Request QName Command
//!
//! Prints the request document element of JAX-WS web methods.

use crate::error::{CliError, CliResult};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::warn;
use wsdoc_core::model::WebMethod;
use wsdoc_core::request_document_qname;

/// Arguments for the request-qname command.
#[derive(clap::Args, Debug, Clone)]
pub struct QnameArgs {
    /// Web method file (YAML or JSON with a `methods` list).
    #[clap(long)]
    pub methods: PathBuf,

    /// Only report this method.
    #[clap(long)]
    pub method: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct MethodDocument {
    #[serde(default)]
    methods: Vec<WebMethod>,
}

/// Computes `name -> qname` lines. Methods without a request document print `-`.
pub fn report(args: &QnameArgs) -> CliResult<Vec<String>> {
    let content = fs::read_to_string(&args.methods)?;
    let document: MethodDocument = match args.methods.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        _ => serde_yaml::from_str(&content)
            .map_err(|e| CliError::General(format!("Invalid method document: {}", e)))?,
    };

    if let Some(name) = &args.method {
        let method = document
            .methods
            .iter()
            .find(|m| &m.name == name)
            .ok_or_else(|| CliError::General(format!("Unknown web method '{}'", name)))?;
        return Ok(vec![line(method, request_document_qname(method)?)]);
    }

    let mut lines = Vec::with_capacity(document.methods.len());
    for method in &document.methods {
        match request_document_qname(method) {
            Ok(qname) => lines.push(line(method, qname)),
            Err(e) => warn!(method = %method.name, error = %e, "skipping web method"),
        }
    }
    Ok(lines)
}

fn line(method: &WebMethod, qname: Option<wsdoc_core::QName>) -> String {
    match qname {
        Some(qname) => format!("{} -> {}", method.name, qname),
        None => format!("{} -> -", method.name),
    }
}

/// Executes the request-qname command.
pub fn execute(args: &QnameArgs) -> CliResult<()> {
    for line in report(args)? {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const METHODS: &str = r#"
methods:
  - name: placeOrder
    targetNamespace: urn:shop
    parameterStyle: bare
    parameters:
      - { elementName: credentials, header: true }
      - { elementName: order }
  - name: cancel
    requestWrapper: { elementName: cancelRequest, elementNamespace: "urn:shop:msg" }
  - name: ping
  - name: legacy
    style: rpc
"#;

    fn method_args(method: Option<&str>) -> (tempfile::TempDir, QnameArgs) {
        let dir = tempdir().unwrap();
        let methods = dir.path().join("methods.yaml");
        fs::write(&methods, METHODS).unwrap();
        let args = QnameArgs {
            methods,
            method: method.map(String::from),
        };
        (dir, args)
    }

    #[test]
    fn test_report_all() {
        let (_dir, args) = method_args(None);
        assert_eq!(
            report(&args).unwrap(),
            vec![
                "placeOrder -> {urn:shop}order",
                "cancel -> {urn:shop:msg}cancelRequest",
                "ping -> -",
            ]
        );
    }

    #[test]
    fn test_single_method() {
        let (_dir, args) = method_args(Some("legacy"));
        assert!(report(&args).is_err());

        let (_dir, args) = method_args(Some("cancel"));
        assert_eq!(report(&args).unwrap(), vec!["cancel -> {urn:shop:msg}cancelRequest"]);
        execute(&args).unwrap();
    }
}
