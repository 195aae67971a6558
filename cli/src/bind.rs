#![deny(missing_docs)]

//! # Bind Command
//!
//! Dry-runs request binding against declared REST resources: the request is
//! resolved exactly as a live exporter would, and the resolved parameters are
//! echoed back through the selected view.

use crate::error::{CliError, CliResult};
use crate::loader::load_registry;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use wsdoc_core::rest::{
    resources_from_json_str, resources_from_yaml_str, OperationHandler, OperationResult,
    ResolvedParameters, ResourceDescriptor, XmlUnmarshaller,
};
use wsdoc_core::{
    AppResult, GeneratorConfig, RequestBindingResolver, RestRequest, RestResourceExporter,
    RestResponse,
};

/// Arguments for the bind command.
#[derive(clap::Args, Debug, Clone)]
pub struct BindArgs {
    /// Resource descriptor file (YAML or JSON with a `resources` list).
    #[clap(long)]
    pub resources: PathBuf,

    /// Type metadata file or directory.
    #[clap(long, env = "WSDOC_TYPES")]
    pub types: PathBuf,

    /// Resource noun. Defaults to the first resource whose template matches.
    #[clap(long)]
    pub noun: Option<String>,

    /// Transport method.
    #[clap(long, default_value = "GET")]
    pub method: String,

    /// Request URI (path and query).
    pub uri: String,

    /// Request header as `Name: value`. Repeatable.
    #[clap(long = "header", short = 'H')]
    pub headers: Vec<String>,

    /// File holding the request body.
    #[clap(long)]
    pub body: Option<PathBuf>,

    /// Application context path stripped before matching.
    #[clap(long, default_value = "")]
    pub context_path: String,
}

/// Handler that returns the resolved parameters as its result.
struct EchoHandler;

impl OperationHandler for EchoHandler {
    fn invoke(&self, params: &ResolvedParameters) -> AppResult<OperationResult> {
        Ok(OperationResult::Value(serde_json::to_value(params)?))
    }
}

fn load_descriptors(args: &BindArgs) -> CliResult<Vec<ResourceDescriptor>> {
    let content = fs::read_to_string(&args.resources)?;
    let descriptors = match args.resources.extension().and_then(|ext| ext.to_str()) {
        Some("json") => resources_from_json_str(&content)?,
        _ => resources_from_yaml_str(&content)?,
    };
    Ok(descriptors)
}

fn build_request(args: &BindArgs) -> CliResult<RestRequest> {
    let mut request = RestRequest::new(args.method.as_str(), &args.uri)
        .with_context_path(args.context_path.as_str());
    for header in &args.headers {
        let (name, value) = header.split_once(':').ok_or_else(|| {
            CliError::General(format!("Header '{}' is not of the form 'Name: value'", header))
        })?;
        request = request.with_header(name.trim(), value.trim());
    }
    if let Some(body) = &args.body {
        request = request.with_body(fs::read(body)?);
    }
    Ok(request)
}

/// Resolves the request and returns the exporter's response.
pub fn run(args: &BindArgs, config: &GeneratorConfig) -> CliResult<RestResponse> {
    let registry = Arc::new(load_registry(&args.types)?);
    let request = build_request(args)?;
    let handler: Arc<dyn OperationHandler> = Arc::new(EchoHandler);

    let mut resources = Vec::new();
    for descriptor in load_descriptors(args)? {
        resources.push(descriptor.into_resource(handler.clone())?);
    }
    let resource = match &args.noun {
        Some(noun) => resources.into_iter().find(|r| r.noun() == noun.as_str()),
        None => {
            let path = request.request_context().to_owned();
            let position = resources
                .iter()
                .position(|r| r.template().match_path(&path).is_some())
                .unwrap_or(0);
            resources.into_iter().nth(position)
        }
    }
    .ok_or_else(|| CliError::General("No matching resource declared".into()))?;

    let resolver = RequestBindingResolver::new(Arc::new(XmlUnmarshaller::new(registry)));
    let exporter = RestResourceExporter::new(resource, resolver)
        .with_namespaces(config.namespace_prefixes.clone());
    Ok(exporter.handle(&request))
}

/// Executes the bind command.
pub fn execute(args: &BindArgs, config: &GeneratorConfig) -> CliResult<()> {
    match run(args, config)? {
        RestResponse::View(view) => {
            println!("200 {}", view.content_type());
            println!("{}", String::from_utf8_lossy(&view.body()?));
        }
        RestResponse::Error(error) => {
            println!("{} {}", error.status, error.message);
            if !error.allow.is_empty() {
                println!("Allow: {}", error.allow.join(", "));
            }
            let details: Value = serde_json::to_value(&error)?;
            println!("{}", serde_json::to_string_pretty(&details)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use wsdoc_core::View;

    const TYPES: &str = r#"
types:
  - qualifiedName: com.example.Ticket
    attributes:
      - name: priority
        type: { simple: int }
"#;

    const RESOURCES: &str = r#"
resources:
  - noun: ticket
    template: /queues/{queue}/tickets/{}
    operations:
      - verb: read
        properNoun: { type: { simple: long } }
        context:
          queue: { simple: string }
        adjectives:
          tag:
            type: { sequence: { simple: string } }
            optional: true
      - verb: update
        properNoun: { type: { simple: long } }
        context:
          queue: { simple: string }
        noun: { type: { complex: com.example.Ticket } }
"#;

    fn args(dir: &std::path::Path, method: &str, uri: &str) -> BindArgs {
        let types = dir.join("types.yaml");
        let resources = dir.join("resources.yaml");
        fs::write(&types, TYPES).unwrap();
        fs::write(&resources, RESOURCES).unwrap();
        BindArgs {
            resources,
            types,
            noun: None,
            method: method.into(),
            uri: uri.into(),
            headers: Vec::new(),
            body: None,
            context_path: String::new(),
        }
    }

    #[test]
    fn test_bind_read() {
        let dir = tempdir().unwrap();
        let response = run(
            &args(dir.path(), "GET", "/queues/ops/tickets/5?tag=a&tag=b"),
            &GeneratorConfig::default(),
        )
        .unwrap();
        match response {
            RestResponse::View(View::Result { result, .. }) => {
                assert_eq!(result["properNoun"], serde_json::json!(5));
                assert_eq!(result["context"]["queue"], serde_json::json!("ops"));
                assert_eq!(result["adjectives"]["tag"], serde_json::json!(["a", "b"]));
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_bind_update_with_body_and_override() {
        let dir = tempdir().unwrap();
        let body = dir.path().join("body.xml");
        fs::write(&body, r#"<ticket priority="2"/>"#).unwrap();
        let mut args = args(dir.path(), "GET", "/queues/ops/tickets/5");
        args.headers = vec!["X-HTTP-Method-Override: POST".into()];
        args.body = Some(body);
        match run(&args, &GeneratorConfig::default()).unwrap() {
            RestResponse::View(View::Result { result, .. }) => {
                assert_eq!(result["noun"], serde_json::json!({ "priority": 2 }));
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_bind_delete_not_allowed() {
        let dir = tempdir().unwrap();
        let response = run(
            &args(dir.path(), "DELETE", "/queues/ops/tickets/5"),
            &GeneratorConfig::default(),
        )
        .unwrap();
        assert_eq!(response.status(), 405);
        execute(
            &args(dir.path(), "DELETE", "/queues/ops/tickets/5"),
            &GeneratorConfig::default(),
        )
        .unwrap();
    }

    #[test]
    fn test_malformed_header() {
        let dir = tempdir().unwrap();
        let mut args = args(dir.path(), "GET", "/queues/ops/tickets/5");
        args.headers = vec!["no-colon".into()];
        assert!(run(&args, &GeneratorConfig::default()).is_err());
    }
}
