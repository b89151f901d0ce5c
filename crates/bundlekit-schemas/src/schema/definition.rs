//! Schema definitions authored as data
//!
//! A [`SchemaDefinition`] is the serialized form of a constraint schema:
//! named object and union shapes that refer to each other by name. It is
//! compiled into the shared in-memory model by
//! [`SchemaResolver`](crate::schema::resolver::SchemaResolver).
//!
//! ```yaml
//! root: bundle
//! definitions:
//!   bundle:
//!     kind: object
//!     fields:
//!       - { name: name, required: true, type: string }
//!       - { name: plugins, required: true, array: true, children: { ref: plugin } }
//!   plugin:
//!     kind: union
//!     alternatives:
//!       - kind: object
//!         fields: [ { name: id, required: true, type: string } ]
//! ```
//!
//! Copyright (c) 2025 Bundlekit Team
//! Licensed under the Apache-2.0 license

use crate::schema::error::{SchemaError, SchemaResult};
use crate::schema::model::ScalarKind;
use crate::schema::rules::{FieldRule, ObjectRule};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Supported file formats for schema definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> SchemaResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(SchemaError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// A complete schema: named shapes plus the name of the root shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    /// Name of the root definition; must be an object shape
    pub root: String,
    #[serde(default)]
    pub definitions: BTreeMap<String, ShapeDefinition>,
}

impl SchemaDefinition {
    /// Read a definition from a `.json`, `.yaml` or `.yml` file
    pub fn from_path<P: AsRef<Path>>(path: P) -> SchemaResult<Self> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, format, path)
    }

    /// Parse definition text in a known format; `path` is only used for errors
    pub fn parse(content: &str, format: Format, path: &Path) -> SchemaResult<Self> {
        match format {
            Format::Json => serde_json::from_str(content).map_err(|source| SchemaError::Json {
                path: path.to_path_buf(),
                source,
            }),
            Format::Yaml => serde_yaml::from_str(content).map_err(|source| SchemaError::Yaml {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// A named shape: one object or a union of alternatives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ShapeDefinition {
    Object(ObjectDefinition),
    Union(UnionDefinition),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectDefinition {
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<ObjectRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnionDefinition {
    #[serde(default)]
    pub alternatives: Vec<ChildDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<ObjectRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ScalarKind>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub array: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<ChildDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<FieldRule>,
}

/// Where a nested shape comes from: a named definition or written inline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChildDefinition {
    Ref {
        #[serde(rename = "ref")]
        reference: String,
    },
    Inline(Box<ShapeDefinition>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const YAML: &str = r#"
root: bundle
definitions:
  bundle:
    kind: object
    fields:
      - name: name
        required: true
        type: string
        validators:
          - pattern: "[a-z]+"
            message: lowercase only
      - name: plugins
        array: true
        children: { ref: plugin }
  plugin:
    kind: union
    alternatives:
      - kind: object
        fields:
          - { name: id, required: true, type: string }
    rules:
      - dependsOn: { field: extra, when: { key: id, equals: special } }
"#;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(Path::new("a.yml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.JSON")).unwrap(), Format::Json);
        assert!(Format::from_path(Path::new("a.toml")).is_err());
        assert!(Format::from_path(Path::new("schema")).is_err());
    }

    #[test]
    fn test_parse_yaml_definition() {
        let definition = SchemaDefinition::parse(YAML, Format::Yaml, &PathBuf::from("s.yaml")).unwrap();
        assert_eq!(definition.root, "bundle");
        assert_eq!(definition.definitions.len(), 2);

        let ShapeDefinition::Object(bundle) = &definition.definitions["bundle"] else {
            panic!("bundle should be an object");
        };
        assert_eq!(bundle.fields[0].name, "name");
        assert_eq!(bundle.fields[0].kind, Some(ScalarKind::String));
        assert_eq!(bundle.fields[0].validators.len(), 1);
        assert!(bundle.fields[1].array);
        assert!(!bundle.fields[1].required);
        assert_eq!(
            bundle.fields[1].children,
            Some(ChildDefinition::Ref {
                reference: "plugin".to_string()
            })
        );

        let ShapeDefinition::Union(plugin) = &definition.definitions["plugin"] else {
            panic!("plugin should be a union");
        };
        assert!(matches!(plugin.alternatives[0], ChildDefinition::Inline(_)));
        assert_eq!(plugin.rules.len(), 1);
    }

    #[test]
    fn test_invalid_regex_fails_to_load() {
        let json = r#"{
            "root": "r",
            "definitions": {
                "r": { "kind": "object", "fields": [
                    { "name": "a", "validators": [ { "pattern": "(", "message": "m" } ] }
                ] }
            }
        }"#;
        let result = SchemaDefinition::parse(json, Format::Json, Path::new("s.json"));
        assert!(matches!(result, Err(SchemaError::Json { .. })));
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.yaml");
        std::fs::write(&path, YAML).unwrap();
        let definition = SchemaDefinition::from_path(&path).unwrap();
        assert_eq!(definition.root, "bundle");

        let missing = SchemaDefinition::from_path(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(SchemaError::Io { .. })));
    }
}
