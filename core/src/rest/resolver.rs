#![deny(missing_docs)]

//! # Request Binding
//!
//! Maps an inbound request onto the declared signature of a resource
//! operation: verb selection, path decomposition, then proper noun, context
//! parameters, adjectives and noun value, each coerced to its declared type.

use crate::error::{AppError, AppResult};
use crate::rest::coerce::{coerce_text, coerce_values, Unmarshaller};
use crate::rest::operation::{OperationResult, ResolvedParameters, RestOperation, RestResource};
use crate::rest::request::RestRequest;
use crate::rest::verb::VerbType;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Resolves request data into typed operation parameters.
#[derive(Clone)]
pub struct RequestBindingResolver {
    unmarshaller: Arc<dyn Unmarshaller>,
}

impl RequestBindingResolver {
    /// Creates a resolver that coerces non-textual values through `unmarshaller`.
    pub fn new(unmarshaller: Arc<dyn Unmarshaller>) -> Self {
        Self { unmarshaller }
    }

    /// Picks the verb for `request`.
    ///
    /// Fails with [`AppError::MethodNotAllowed`] when the method maps to no
    /// verb or the resource does not support it.
    pub fn resolve_verb(&self, resource: &RestResource, request: &RestRequest) -> AppResult<VerbType> {
        let method = request.effective_method();
        VerbType::from_http_method(&method)
            .filter(|verb| resource.operation(*verb).is_some())
            .ok_or_else(|| {
                debug!(method = %method, noun = %resource.noun(), "unsupported method");
                AppError::MethodNotAllowed(resource.supported_methods())
            })
    }

    /// Resolves every declared parameter of `operation` from `request`.
    pub fn resolve(
        &self,
        resource: &RestResource,
        operation: &RestOperation,
        request: &RestRequest,
    ) -> AppResult<ResolvedParameters> {
        let unmarshaller = self.unmarshaller.as_ref();
        let request_context = request.request_context();
        let path = resource.path_values(request_context).inspect_err(|_| {
            debug!(
                path = %request_context,
                template = %resource.template().as_str(),
                "path does not match resource template"
            );
        })?;

        let mut params = ResolvedParameters::default();

        if let Some(declared) = &operation.proper_noun {
            match &path.proper_noun {
                Some(raw) => params.proper_noun = Some(coerce_text(raw, &declared.ty, unmarshaller)?),
                None if declared.optional => {}
                None => return Err(AppError::MissingParameter(resource.noun().to_owned())),
            }
        }

        for (name, ty) in &operation.context_parameters {
            let raw = path
                .context
                .get(name)
                .ok_or_else(|| AppError::MissingParameter(name.clone()))?;
            params
                .context
                .insert(name.clone(), coerce_text(raw, ty, unmarshaller)?);
        }

        for (name, adjective) in &operation.adjectives {
            let raw = request.parameter_values(name);
            let value = coerce_values(&raw, &adjective.ty, unmarshaller)?;
            if value.is_none() && !adjective.optional {
                return Err(AppError::MissingParameter(name.clone()));
            }
            params.adjectives.insert(name.clone(), value);
        }

        if let Some(declared) = &operation.noun_value {
            match unmarshaller.unmarshal_document(&request.body, &declared.ty) {
                Ok(value) => params.noun = Some(value),
                Err(e) if declared.optional => {
                    warn!(error = %e, noun = %resource.noun(), "ignoring unreadable optional noun value");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(params)
    }

    /// Resolves the verb and parameters of `request` and invokes the matching operation.
    pub fn dispatch<'r>(
        &self,
        resource: &'r RestResource,
        request: &RestRequest,
    ) -> AppResult<(&'r RestOperation, OperationResult)> {
        let verb = self.resolve_verb(resource, request)?;
        let operation = resource
            .operation(verb)
            .ok_or_else(|| AppError::MethodNotAllowed(resource.supported_methods()))?;
        let params = self.resolve(resource, operation, request)?;
        info!(
            noun = %resource.noun(),
            verb = %verb,
            adjectives = params.adjectives.len(),
            "dispatching operation"
        );
        let result = operation.invoke(&params)?;
        Ok((operation, result))
    }
}
