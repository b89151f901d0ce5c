//! Structural validation of one object against one object shape
//!
//! The walkers return how many of the errors they added came from nested
//! union resolutions, so an enclosing union can rank its alternatives on
//! their own structural errors alone.
//!
//! Copyright (c) 2025 Bundlekit Team
//! Licensed under the Apache-2.0 license

use crate::schema::model::{Children, ConstraintNode, FieldSpec, ObjectShape};
use crate::validation::array::validate_array;
use crate::validation::base::ValidationContext;
use crate::validation::dependency::apply_rules;
use crate::validation::error::{ValidationError, ValidationErrors};
use crate::validation::union::resolve;
use serde_json::{Map, Value};

/// Validate `value` as an instance of `shape`
pub(crate) fn validate_object(
    value: &Value,
    shape: &ObjectShape,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) -> usize {
    match value.as_object() {
        Some(object) => validate_fields(object, shape, context, errors),
        None => {
            errors.add(ValidationError::type_mismatch(
                context.path.clone(),
                "object",
                value,
            ));
            0
        }
    }
}

/// Declared fields in order, then the shape's own rules
pub(crate) fn validate_fields(
    object: &Map<String, Value>,
    shape: &ObjectShape,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) -> usize {
    let start = errors.len();
    let nested = shape
        .fields()
        .iter()
        .map(|field| validate_field(object, field, context, errors))
        .sum();
    apply_rules(object, shape.rules(), context, errors, start);
    nested
}

fn validate_field(
    object: &Map<String, Value>,
    field: &FieldSpec,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) -> usize {
    let context = context.child(field.name.as_str());
    let value = object.get(&field.name).filter(|v| !v.is_null());

    if field.node.is_array {
        return validate_array(value, &field.node, &context, errors);
    }

    match value {
        Some(value) => validate_value(value, &field.node, &context, errors),
        None if field.node.required => {
            errors.add(ValidationError::missing_field(context.path.clone()));
            0
        }
        None => 0,
    }
}

/// Validate one present, non-array value: type, then validators, then children
pub(crate) fn validate_value(
    value: &Value,
    node: &ConstraintNode,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) -> usize {
    if let Some(kind) = node.kind {
        if !kind.matches(value) {
            errors.add(ValidationError::type_mismatch(
                context.path.clone(),
                kind.as_str(),
                value,
            ));
            return 0;
        }
    }

    for rule in &node.validators {
        if let Some(error) = rule.check(value, context) {
            errors.add(error);
        }
    }

    match &node.children {
        Some(Children::Object(shape)) => validate_object(value, shape, context, errors),
        Some(Children::Union(union)) => {
            let resolution = resolve(value, union, context);
            // A non-object is a type mismatch of this field, not a nested failure
            let nested = if value.is_object() { resolution.errors.len() } else { 0 };
            errors.errors.extend(resolution.errors);
            nested
        }
        None => 0,
    }
}
