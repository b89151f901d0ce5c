//! Base validation trait and context
//!
//! Copyright (c) 2025 Bundlekit Team
//! Licensed under the Apache-2.0 license

use crate::schema::model::ObjectShape;
use crate::validation::error::{FieldPath, ValidationErrors, ValidationResult};
use serde_json::Value;
use std::sync::Arc;

/// Validation context carrying the current document location
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    /// Current path from the document root
    pub path: FieldPath,
}

impl ValidationContext {
    /// Context positioned at the document root
    pub fn root() -> Self {
        Self {
            path: FieldPath::root(),
        }
    }

    /// Create a child context for a named field
    pub fn child<S: Into<String>>(&self, field: S) -> Self {
        Self {
            path: self.path.child(field),
        }
    }

    /// Create a child context for array index
    pub fn child_index(&self, index: usize) -> Self {
        Self {
            path: self.path.index(index),
        }
    }
}

/// Base trait for schema validators
pub trait SchemaValidator {
    /// The type being validated
    type Input: ?Sized;

    /// Collect every error below `context`
    fn validate_with_context(
        &self,
        input: &Self::Input,
        context: &ValidationContext,
    ) -> ValidationErrors;

    /// Collect all validation errors (non-failing)
    fn collect_errors(&self, input: &Self::Input) -> ValidationErrors {
        self.validate_with_context(input, &ValidationContext::root())
    }

    /// Validate a complete document; `Err` carries every error found
    fn validate(&self, input: &Self::Input) -> ValidationResult<()> {
        self.collect_errors(input).into_result()
    }
}

/// Validates JSON documents against one root object shape
///
/// Cheap to clone; the schema is shared.
#[derive(Debug, Clone)]
pub struct ConstraintValidator {
    root: Arc<ObjectShape>,
}

impl ConstraintValidator {
    pub fn new(root: Arc<ObjectShape>) -> Self {
        Self { root }
    }

    pub fn schema(&self) -> &Arc<ObjectShape> {
        &self.root
    }
}

impl SchemaValidator for ConstraintValidator {
    type Input = Value;

    fn validate_with_context(&self, input: &Value, context: &ValidationContext) -> ValidationErrors {
        crate::validation::validate_at(input, &self.root, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::model::ConstraintNode;
    use serde_json::json;

    #[test]
    fn test_context_paths() {
        let ctx = ValidationContext::root().child("env").child_index(1).child("name");
        assert_eq!(ctx.path.to_string(), "$.env[1].name");
    }

    #[test]
    fn test_constraint_validator() {
        let shape = ObjectShape::builder("item")
            .field("id", ConstraintNode::required().string())
            .build()
            .unwrap();
        let validator = ConstraintValidator::new(shape);

        assert!(validator.validate(&json!({ "id": "a" })).is_ok());
        let errors = validator.validate(&json!({})).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].path.to_string(), "$.id");
    }
}
