//! Validation engine for constraint schemas
//!
//! [`validate`] walks a document against a root [`ObjectShape`] and returns
//! every error found, in document order: fields in declaration order,
//! array elements in index order. Failures are data; the engine itself
//! cannot fail.
//!
//! Copyright (c) 2025 Bundlekit Team
//! Licensed under the Apache-2.0 license

pub mod array;
pub mod base;
pub mod dependency;
pub mod error;
pub mod rules;
pub mod structural;
pub mod union;

pub use base::{ConstraintValidator, SchemaValidator, ValidationContext};
pub use error::{
    json_type_name, ErrorKind, FieldPath, PathSegment, ValidationError, ValidationErrors,
    ValidationResult,
};
pub use union::{resolve as resolve_union, Resolution};

use crate::schema::model::ObjectShape;
use serde_json::Value;
use tracing::debug;

/// Validate `document` against `root`, collecting every error
pub fn validate(document: &Value, root: &ObjectShape) -> ValidationErrors {
    validate_at(document, root, &ValidationContext::root())
}

pub(crate) fn validate_at(
    document: &Value,
    root: &ObjectShape,
    context: &ValidationContext,
) -> ValidationErrors {
    debug!(
        schema = root.name().unwrap_or("<anonymous>"),
        path = %context.path,
        "Validating document"
    );
    let mut errors = ValidationErrors::new();
    structural::validate_object(document, root, context, &mut errors);
    debug!(errors = errors.len(), "Validation finished");
    errors
}

/// Validator for bundle descriptors using the built-in schema
pub fn create_bundle_descriptor_validator() -> ConstraintValidator {
    ConstraintValidator::new(crate::descriptor::bundle_descriptor_schema())
}
