//! Error types for schema construction and resolution
//!
//! These are fatal: they describe a malformed schema, never a malformed
//! document, and are kept apart from [`crate::ValidationErrors`].
//!
//! Copyright (c) 2025 Bundlekit Team
//! Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Everything that can make a schema unusable
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A union declared without any alternative
    #[error("Union '{name}' has no alternatives")]
    EmptyUnion { name: String },

    /// The same field declared twice in one object shape
    #[error("Field '{field}' is declared more than once")]
    DuplicateField { field: String },

    /// A pattern validator whose regex does not compile
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    /// A validator definition that is not one of the known formats
    #[error("Invalid validator definition: {reason}")]
    InvalidValidator { reason: String },

    /// A field declaring both a scalar type and nested children
    #[error("Field '{field}' declares both a scalar type and children")]
    ConflictingField { field: String },

    /// A `ref` naming a definition that does not exist
    #[error("Unknown definition '{reference}' referenced from '{from}'")]
    UnknownReference { reference: String, from: String },

    /// Definitions that refer to each other in a loop
    #[error("Circular reference detected: {chain}")]
    CircularReference { chain: String },

    /// The root definition must be a single object shape
    #[error("Root definition '{name}' must be an object shape")]
    RootNotObject { name: String },

    /// File I/O errors
    #[error("Failed to read schema file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON schema file '{path}': {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML schema file '{path}': {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },
}

impl SchemaError {
    /// Create an empty-union error
    pub fn empty_union<S: Into<String>>(name: S) -> Self {
        Self::EmptyUnion { name: name.into() }
    }

    /// Create a circular reference error from the chain of definition names
    pub fn circular_reference(chain: &[String]) -> Self {
        Self::CircularReference {
            chain: chain.join(" -> "),
        }
    }

    /// Get the file path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. }
            | Self::Json { path, .. }
            | Self::Yaml { path, .. }
            | Self::UnsupportedFormat { path } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_reference_chain() {
        let chain = vec!["mfe".to_string(), "nav".to_string(), "mfe".to_string()];
        let error = SchemaError::circular_reference(&chain);
        assert_eq!(error.to_string(), "Circular reference detected: mfe -> nav -> mfe");
        assert!(error.path().is_none());
    }

    #[test]
    fn test_path_on_file_errors() {
        let error = SchemaError::UnsupportedFormat {
            path: PathBuf::from("schema.txt"),
        };
        assert_eq!(error.path(), Some(&PathBuf::from("schema.txt")));
    }
}
