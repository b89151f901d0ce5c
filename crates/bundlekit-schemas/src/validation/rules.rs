//! Field validators: pure predicates over a single value
//!
//! Copyright (c) 2025 Bundlekit Team
//! Licensed under the Apache-2.0 license

use crate::schema::rules::FieldRule;
use crate::validation::base::ValidationContext;
use crate::validation::error::{json_type_name, ValidationError};
use serde_json::Value;

impl FieldRule {
    /// Check one value, returning the failure if any
    pub fn check(&self, value: &Value, context: &ValidationContext) -> Option<ValidationError> {
        match self {
            FieldRule::Pattern(pattern) => match value.as_str() {
                Some(s) if pattern.is_match(s) => None,
                Some(_) => Some(ValidationError::pattern_mismatch(
                    context.path.clone(),
                    pattern.message(),
                )),
                None => Some(ValidationError::type_mismatch(
                    context.path.clone(),
                    "string",
                    value,
                )),
            },
            FieldRule::OneOf(allowed) => {
                if allowed.contains(value) {
                    None
                } else {
                    Some(ValidationError::enum_mismatch(
                        context.path.clone(),
                        allowed,
                        value,
                    ))
                }
            }
            FieldRule::MapOfStrings => check_map_of_strings(value, context),
        }
    }
}

fn check_map_of_strings(value: &Value, context: &ValidationContext) -> Option<ValidationError> {
    let Some(map) = value.as_object() else {
        return Some(ValidationError::map_shape_mismatch(
            context.path.clone(),
            format!(
                "Expected an object mapping keys to strings, found {}",
                json_type_name(value)
            ),
        ));
    };

    map.iter().find(|(_, v)| !v.is_string()).map(|(key, v)| {
        ValidationError::map_shape_mismatch(
            context.path.clone(),
            format!(
                "Value of key \"{}\" must be a string, found {}",
                key,
                json_type_name(v)
            ),
        )
    })
}
