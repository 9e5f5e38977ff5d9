//! Target model resolution against the provider catalog.

use crate::services::providers::ModelDescriptor;
use thiserror::Error;

/// Generation method a resolved model must support.
pub const CONTENT_GENERATION_METHOD: &str = "generateContent";

/// Error type for model resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Target model '{0}' not found in available models")]
    ModelNotFound(String),

    #[error("Target model '{model}' does not support {method}")]
    CapabilityUnsupported { model: String, method: String },
}

/// Pick the catalog entry matching the desired model name.
///
/// Name variants are tried in order, first match wins: the name as given,
/// the name under the `models/` namespace, then the bare last path segment.
/// The matched entry must support `required_method`.
pub fn resolve_model<'a>(
    desired_name: &str,
    catalog: &'a [ModelDescriptor],
    required_method: &str,
) -> Result<&'a ModelDescriptor, ResolveError> {
    let namespaced = format!("models/{}", desired_name);
    let bare = desired_name.rsplit('/').next().unwrap_or(desired_name);

    let matched = catalog
        .iter()
        .find(|m| m.name == desired_name)
        .or_else(|| catalog.iter().find(|m| m.name == namespaced))
        .or_else(|| catalog.iter().find(|m| m.name == bare))
        .ok_or_else(|| ResolveError::ModelNotFound(desired_name.to_string()))?;

    if !matched
        .supported_generation_methods
        .iter()
        .any(|m| m == required_method)
    {
        return Err(ResolveError::CapabilityUnsupported {
            model: matched.name.clone(),
            method: required_method.to_string(),
        });
    }

    Ok(matched)
}
