//! Manifest reader (vertex_indices.json)
//!
//! Only the `expressions` key is recognized; every other key in the file is
//! ignored. An empty or falsy document is a fatal configuration error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::error::ManifestError;

/// Ordered list of expression variant names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub expressions: Vec<String>,
}

impl Manifest {
    /// Parse manifest JSON
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    /// Build a manifest from an already-parsed JSON document
    pub fn from_value(mut value: Value) -> Result<Self, ManifestError> {
        if is_falsy(&value) {
            return Err(ManifestError::Empty);
        }

        let expressions = value
            .get_mut("expressions")
            .map(Value::take)
            .ok_or(ManifestError::MissingExpressions)?;

        let expressions: Vec<String> = serde_json::from_value(expressions)
            .map_err(|e| ManifestError::InvalidExpressions(e.to_string()))?;

        Ok(Self { expressions })
    }
}

/// Load and parse a manifest file
pub fn read_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    if !path.exists() {
        tracing::error!("Cannot find config file: {}", path.display());
        return Err(ManifestError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let manifest = Manifest::parse(&content).inspect_err(|e| {
        tracing::error!("Bad config file {}: {}", path.display(), e);
    })?;

    tracing::debug!(
        "Loaded config with {} expressions: {:?}",
        manifest.expressions.len(),
        manifest.expressions
    );
    Ok(manifest)
}

/// JSON truthiness: `{}`, `[]`, `""`, `0`, `false` and `null` are all empty
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
