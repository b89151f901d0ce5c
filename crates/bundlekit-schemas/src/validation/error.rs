//! Validation error types for constraint-schema validation
//!
//! Copyright (c) 2025 Bundlekit Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// One step of a path from the document root
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Named object field
    Field(String),
    /// Array element index
    Index(usize),
}

/// Location of a value inside a document, from the root
///
/// Rendered as `$` for the root and dot/bracket notation below it,
/// e.g. `$.microfrontends[2].titles`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The document root
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of a named field below this one
    pub fn child<S: Into<String>>(&self, field: S) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Field(field.into()));
        Self(segments)
    }

    /// Path of an array element below this one
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Name of the innermost field, if the path ends in one
    pub fn field_name(&self) -> Option<&str> {
        match self.0.last() {
            Some(PathSegment::Field(name)) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(|s| PathSegment::Field(s.into())).collect())
    }
}

/// Category of a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    MissingRequiredField,
    TypeMismatch,
    PatternMismatch,
    EnumMismatch,
    MapShapeMismatch,
    /// No union alternative matched; the errors that follow belong to the closest one
    UnionNoMatch,
    DependencyViolation,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingRequiredField => "MissingRequiredField",
            ErrorKind::TypeMismatch => "TypeMismatch",
            ErrorKind::PatternMismatch => "PatternMismatch",
            ErrorKind::EnumMismatch => "EnumMismatch",
            ErrorKind::MapShapeMismatch => "MapShapeMismatch",
            ErrorKind::UnionNoMatch => "UnionNoMatch",
            ErrorKind::DependencyViolation => "DependencyViolation",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single path-qualified validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationError {
    /// Where in the document the failure occurred
    pub path: FieldPath,
    /// Human-readable error message
    pub message: String,
    /// Failure category
    pub kind: ErrorKind,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl ValidationError {
    /// Create a new validation error
    pub fn new<M: Into<String>>(path: FieldPath, kind: ErrorKind, message: M) -> Self {
        Self {
            path,
            message: message.into(),
            kind,
        }
    }

    /// A required field is absent
    pub fn missing_field(path: FieldPath) -> Self {
        let message = format!(
            "Required field {} is missing",
            path.field_name().unwrap_or("<value>")
        );
        Self::new(path, ErrorKind::MissingRequiredField, message)
    }

    /// A value has the wrong JSON type
    pub fn type_mismatch(path: FieldPath, expected: &str, actual: &Value) -> Self {
        Self::new(
            path,
            ErrorKind::TypeMismatch,
            format!("Expected {}, found {}", expected, json_type_name(actual)),
        )
    }

    /// A value does not fully match a pattern; the message is the rule's own
    pub fn pattern_mismatch<M: Into<String>>(path: FieldPath, message: M) -> Self {
        Self::new(path, ErrorKind::PatternMismatch, message)
    }

    /// A value is not one of a fixed set of literals
    pub fn enum_mismatch(path: FieldPath, allowed: &[Value], actual: &Value) -> Self {
        let allowed = allowed.iter().map(display_literal).collect::<Vec<_>>().join(", ");
        Self::new(
            path,
            ErrorKind::EnumMismatch,
            format!(
                "Value {} is not one of the allowed values: {}",
                quote_literal(actual),
                allowed
            ),
        )
    }

    pub fn map_shape_mismatch<M: Into<String>>(path: FieldPath, message: M) -> Self {
        Self::new(path, ErrorKind::MapShapeMismatch, message)
    }

    /// Header emitted before the errors of the closest union alternative
    pub fn union_no_match(path: FieldPath, alternatives: usize, closest: usize) -> Self {
        Self::new(
            path,
            ErrorKind::UnionNoMatch,
            format!(
                "Value matches none of the {} accepted shapes; showing errors for the closest one (shape {})",
                alternatives,
                closest + 1
            ),
        )
    }

    pub fn dependency_violation<M: Into<String>>(path: FieldPath, message: M) -> Self {
        Self::new(path, ErrorKind::DependencyViolation, message)
    }
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// Every validation failure found in one pass, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationErrors {
    /// List of validation errors
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s) occurred:", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl ValidationErrors {
    /// Create a new validation errors collection
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Errors of one kind, in order
    pub fn of_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }

    /// Errors located exactly at `path`
    pub fn at<'a>(&'a self, path: &'a FieldPath) -> impl Iterator<Item = &'a ValidationError> + 'a {
        self.errors.iter().filter(move |e| &e.path == path)
    }

    /// Convert to result - Ok if no errors, Err if any errors exist
    pub fn into_result(self) -> ValidationResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self { errors: vec![error] }
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// JSON type name of a value, as used in type-mismatch messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Literal as listed in an allowed-values message: strings bare, others as JSON
pub(crate) fn display_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Literal as quoted inside a message: strings in double quotes, others as JSON
pub(crate) fn quote_literal(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_rendering() {
        let path = FieldPath::root()
            .child("microfrontends")
            .index(2)
            .child("titles");
        assert_eq!(path.to_string(), "$.microfrontends[2].titles");
        assert_eq!(FieldPath::root().to_string(), "$");
        assert_eq!(path.field_name(), Some("titles"));
        assert_eq!(FieldPath::root().child("env").index(0).field_name(), None);
    }

    #[test]
    fn test_path_serializes_as_segments() {
        let path = FieldPath::root().child("env").index(3);
        assert_eq!(serde_json::to_value(&path).unwrap(), json!(["env", 3]));
    }

    #[test]
    fn test_missing_field_message() {
        let error = ValidationError::missing_field(FieldPath::root().child("healthCheckPath"));
        assert_eq!(error.kind, ErrorKind::MissingRequiredField);
        assert_eq!(error.message, "Required field healthCheckPath is missing");
        assert_eq!(error.to_string(), "$.healthCheckPath: Required field healthCheckPath is missing");
    }

    #[test]
    fn test_enum_mismatch_message() {
        let allowed = vec![json!("node"), json!("spring-boot")];
        let error = ValidationError::enum_mismatch(FieldPath::root().child("stack"), &allowed, &json!("go"));
        assert_eq!(
            error.message,
            "Value \"go\" is not one of the allowed values: node, spring-boot"
        );
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());
        let errors = ValidationErrors::from(ValidationError::missing_field(FieldPath::root().child("name")));
        let result = errors.into_result();
        assert_eq!(result.unwrap_err().len(), 1);
    }
}
