//! Cross-field dependency rules
//!
//! Rules look only at the direct siblings of the object they are attached
//! to. A field holding `null` counts as absent.
//!
//! Copyright (c) 2025 Bundlekit Team
//! Licensed under the Apache-2.0 license

use crate::schema::rules::{FieldCondition, ObjectRule};
use crate::validation::base::ValidationContext;
use crate::validation::error::{ErrorKind, ValidationError, ValidationErrors};
use serde_json::{Map, Value};

fn is_present(object: &Map<String, Value>, key: &str) -> bool {
    object.get(key).is_some_and(|v| !v.is_null())
}

impl FieldCondition {
    /// Whether the condition holds for `object`
    pub fn holds(&self, object: &Map<String, Value>) -> bool {
        match &self.equals {
            Some(expected) => object.get(&self.key) == Some(expected),
            None => is_present(object, &self.key),
        }
    }
}

impl ObjectRule {
    /// Check the rule against one object; the error is located at the
    /// constrained field
    pub fn check(
        &self,
        object: &Map<String, Value>,
        context: &ValidationContext,
    ) -> Option<ValidationError> {
        match self {
            ObjectRule::MutualDependency { field, when } => {
                match (is_present(object, field), when.holds(object)) {
                    (false, true) => Some(ValidationError::new(
                        context.path.child(field.as_str()),
                        ErrorKind::MissingRequiredField,
                        format!("Field {} is required when {}", field, when),
                    )),
                    (true, false) => Some(only_allowed_when(field, when, context)),
                    _ => None,
                }
            }
            ObjectRule::DependsOn { field, when } => {
                if is_present(object, field) && !when.holds(object) {
                    Some(only_allowed_when(field, when, context))
                } else {
                    None
                }
            }
        }
    }
}

fn only_allowed_when(
    field: &str,
    when: &FieldCondition,
    context: &ValidationContext,
) -> ValidationError {
    ValidationError::dependency_violation(
        context.path.child(field),
        format!("Field {} is only allowed when {}", field, when),
    )
}

/// Run `rules` against `object`, appending to `errors`
///
/// A rule error is dropped when an error of the same kind is already
/// recorded at the same path since `start`.
pub(crate) fn apply_rules(
    object: &Map<String, Value>,
    rules: &[ObjectRule],
    context: &ValidationContext,
    errors: &mut ValidationErrors,
    start: usize,
) {
    for rule in rules {
        if let Some(error) = rule.check(object, context) {
            let duplicate = errors.errors[start..]
                .iter()
                .any(|e| e.path == error.path && e.kind == error.kind);
            if !duplicate {
                errors.add(error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(rule: &ObjectRule, value: Value) -> Option<ValidationError> {
        let object = value.as_object().cloned().unwrap_or_default();
        rule.check(&object, &ValidationContext::root())
    }

    #[test]
    fn test_mutual_dependency_is_biconditional() {
        let rule = ObjectRule::mutual_dependency("bundle", FieldCondition::equals("type", "external"));

        assert!(check(&rule, json!({ "type": "internal" })).is_none());
        assert!(check(&rule, json!({ "type": "external", "bundle": "r/o/b" })).is_none());

        let missing = check(&rule, json!({ "type": "external" })).unwrap();
        assert_eq!(missing.kind, ErrorKind::MissingRequiredField);
        assert_eq!(missing.path.to_string(), "$.bundle");
        assert_eq!(missing.message, "Field bundle is required when type is \"external\"");

        let violation = check(&rule, json!({ "type": "internal", "bundle": "r/o/b" })).unwrap();
        assert_eq!(violation.kind, ErrorKind::DependencyViolation);
        assert_eq!(
            violation.message,
            "Field bundle is only allowed when type is \"external\""
        );
    }

    #[test]
    fn test_depends_on_is_one_directional() {
        let rule = ObjectRule::depends_on("contextParams", FieldCondition::equals("type", "widget"));

        assert!(check(&rule, json!({ "type": "widget-config" })).is_none());
        assert!(check(&rule, json!({ "type": "widget" })).is_none());
        assert!(check(&rule, json!({ "type": "widget", "contextParams": [] })).is_none());

        let violation = check(&rule, json!({ "type": "widget-config", "contextParams": [] })).unwrap();
        assert_eq!(violation.kind, ErrorKind::DependencyViolation);
        assert_eq!(violation.path.to_string(), "$.contextParams");
    }

    #[test]
    fn test_presence_condition_and_null() {
        let rule = ObjectRule::mutual_dependency("paths", FieldCondition::present("slot"));
        assert!(check(&rule, json!({ "slot": null, "paths": null })).is_none());
        assert!(check(&rule, json!({ "slot": "content" })).is_some());
        let error = check(&rule, json!({ "paths": [] })).unwrap();
        assert_eq!(error.message, "Field paths is only allowed when slot is present");
    }

    #[test]
    fn test_apply_rules_skips_duplicates() {
        let rule = ObjectRule::mutual_dependency("bundle", FieldCondition::equals("type", "external"));
        let object = json!({ "type": "external" }).as_object().cloned().unwrap();
        let ctx = ValidationContext::root();

        let mut errors = ValidationErrors::from(ValidationError::missing_field(ctx.path.child("bundle")));
        apply_rules(&object, &[rule], &ctx, &mut errors, 0);
        assert_eq!(errors.len(), 1);
    }
}
