//! Shared utilities for command handlers

use crate::error::{Error, Result};
use bundlekit_schemas::{bundle_descriptor_schema, ObjectShape, SchemaDefinition};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Read a JSON or YAML document, chosen by file extension
pub fn load_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "Read document");

    if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
            reason: e.to_string(),
        })
    } else {
        serde_json::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
            reason: e.to_string(),
        })
    }
}

/// Compiled schema to validate against: a definition file, or the built-in descriptor schema
pub fn load_schema(definition: Option<&Path>) -> Result<Arc<ObjectShape>> {
    match definition {
        Some(path) => {
            debug!(path = %path.display(), "Compiling schema definition");
            Ok(SchemaDefinition::from_path(path)?.compile()?)
        }
        None => Ok(bundle_descriptor_schema()),
    }
}

/// Display name of a compiled schema
pub fn schema_name(shape: &ObjectShape) -> &str {
    shape.name().unwrap_or("<anonymous>")
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_and_yaml_documents() {
        let json = temp_file(".json", r#"{"name": "demo"}"#);
        assert_eq!(load_document(json.path()).unwrap()["name"], "demo");

        let yaml = temp_file(".yaml", "name: demo\nversion: 0.0.1\n");
        assert_eq!(load_document(yaml.path()).unwrap()["version"], "0.0.1");
    }

    #[test]
    fn test_load_document_errors() {
        let broken = temp_file(".json", "{ not json");
        assert!(matches!(load_document(broken.path()), Err(Error::InvalidFormat { .. })));

        let missing = Path::new("does/not/exist.json");
        assert!(matches!(load_document(missing), Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_builtin_schema() {
        let schema = load_schema(None).unwrap();
        assert_eq!(schema_name(&schema), "bundle");
    }
}
