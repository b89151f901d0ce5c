//! Element-wise validation of array fields
//!
//! Copyright (c) 2025 Bundlekit Team
//! Licensed under the Apache-2.0 license

use crate::schema::model::ConstraintNode;
use crate::validation::base::ValidationContext;
use crate::validation::error::{ValidationError, ValidationErrors};
use crate::validation::structural::validate_value;
use serde_json::Value;

/// Validate an array field; `value` is `None` when the field is absent
///
/// Each element is checked independently against the node's type,
/// validators and children, with its index appended to the path.
/// Returns the number of errors contributed by nested unions.
pub(crate) fn validate_array(
    value: Option<&Value>,
    node: &ConstraintNode,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) -> usize {
    match value {
        None if node.required => {
            errors.add(ValidationError::missing_field(context.path.clone()));
            0
        }
        None => 0,
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| validate_value(item, node, &context.child_index(index), errors))
            .sum(),
        Some(other) => {
            errors.add(ValidationError::type_mismatch(
                context.path.clone(),
                "array",
                other,
            ));
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_element_errors_keep_their_index() {
        let node = ConstraintNode::required().string().array();
        let ctx = ValidationContext::root().child("roles");
        let mut errors = ValidationErrors::new();

        validate_array(Some(&json!([1, "ok", true])), &node, &ctx, &mut errors);

        let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
        assert_eq!(paths, vec!["$.roles[0]", "$.roles[2]"]);
    }

    #[test]
    fn test_presence_rules() {
        let ctx = ValidationContext::root().child("paths");
        let mut errors = ValidationErrors::new();

        validate_array(Some(&json!([])), &ConstraintNode::required().string().array(), &ctx, &mut errors);
        validate_array(None, &ConstraintNode::optional().string().array(), &ctx, &mut errors);
        assert!(errors.is_empty());

        validate_array(None, &ConstraintNode::required().string().array(), &ctx, &mut errors);
        validate_array(Some(&json!("a")), &ConstraintNode::optional().string().array(), &ctx, &mut errors);
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ErrorKind::MissingRequiredField, ErrorKind::TypeMismatch]);
        assert_eq!(errors.errors[1].message, "Expected array, found string");
    }
}
