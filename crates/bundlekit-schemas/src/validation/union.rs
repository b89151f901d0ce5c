//! Union resolution: pick the alternative a value conforms to
//!
//! Alternatives are tried in declaration order and the first one with no
//! structural errors of its own wins. Errors raised inside a nested union
//! belong to that union and do not count against the enclosing
//! alternative. When none matches, the alternative with the fewest own
//! errors is reported, earliest first on ties, behind a `UnionNoMatch`
//! header. The union's own rules then run against the raw object whichever
//! alternative was chosen.
//!
//! Copyright (c) 2025 Bundlekit Team
//! Licensed under the Apache-2.0 license

use crate::schema::model::UnionShape;
use crate::validation::base::ValidationContext;
use crate::validation::dependency::apply_rules;
use crate::validation::error::{ValidationError, ValidationErrors};
use crate::validation::structural::validate_fields;
use serde_json::Value;
use tracing::trace;

/// Outcome of resolving one value against a union
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Index of the matching alternative, if any
    pub selected: Option<usize>,
    /// Every error for this value, including union rule failures and the
    /// errors of nested unions inside the selected alternative
    pub errors: ValidationErrors,
}

impl Resolution {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Resolve `value` against the alternatives of `union`
pub fn resolve(value: &Value, union: &UnionShape, context: &ValidationContext) -> Resolution {
    let Some(object) = value.as_object() else {
        return Resolution {
            selected: None,
            errors: ValidationError::type_mismatch(context.path.clone(), "object", value).into(),
        };
    };

    let mut errors = ValidationErrors::new();
    let mut selected = None;
    let mut closest: Option<(usize, usize, ValidationErrors)> = None;

    for (index, alternative) in union.alternatives().iter().enumerate() {
        let mut trial = ValidationErrors::new();
        let nested = validate_fields(object, alternative, context, &mut trial);
        let own = trial.len() - nested;
        trace!(
            path = %context.path,
            union = union.name().unwrap_or("<anonymous>"),
            alternative = index,
            own,
            nested,
            "Tried union alternative"
        );

        if own == 0 {
            selected = Some(index);
            errors.errors.extend(trial);
            break;
        }
        if closest.as_ref().map_or(true, |(_, best, _)| own < *best) {
            closest = Some((index, own, trial));
        }
    }

    if selected.is_none() {
        if let Some((index, _, trial)) = closest {
            trace!(path = %context.path, closest = index, "No union alternative matched");
            errors.add(ValidationError::union_no_match(
                context.path.clone(),
                union.alternatives().len(),
                index,
            ));
            errors.errors.extend(trial);
        }
    }

    apply_rules(object, union.rules(), context, &mut errors, 0);
    Resolution { selected, errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::model::{ConstraintNode, ObjectShape};
    use crate::schema::rules::{FieldCondition, FieldRule, ObjectRule};
    use crate::validation::error::ErrorKind;
    use serde_json::json;
    use std::sync::Arc;

    fn literal(name: &str) -> Arc<ObjectShape> {
        ObjectShape::builder(name)
            .field("type", ConstraintNode::required().string().rule(FieldRule::one_of([name])))
            .field("value", ConstraintNode::required().string())
            .build()
            .unwrap()
    }

    fn secret() -> Arc<ObjectShape> {
        ObjectShape::builder("secret")
            .field("type", ConstraintNode::required().string().rule(FieldRule::one_of(["secret"])))
            .field("ref", ConstraintNode::required().string())
            .field("key", ConstraintNode::required().string())
            .build()
            .unwrap()
    }

    #[test]
    fn test_first_full_match_wins() {
        let loose = ObjectShape::builder("loose")
            .field("value", ConstraintNode::required().string())
            .build()
            .unwrap();
        let union = UnionShape::builder("u")
            .alternative(loose)
            .alternative(literal("literal"))
            .build()
            .unwrap();

        let resolution = resolve(&json!({ "type": "literal", "value": "x" }), &union, &ValidationContext::root());
        assert_eq!(resolution.selected, Some(0));
        assert!(resolution.is_valid());
    }

    #[test]
    fn test_closest_alternative_reported() {
        let union = UnionShape::builder("env")
            .alternative(literal("literal"))
            .alternative(secret())
            .build()
            .unwrap();

        // one error against secret, two against literal
        let value = json!({ "type": "secret", "ref": "db" });
        let resolution = resolve(&value, &union, &ValidationContext::root());
        assert_eq!(resolution.selected, None);

        let kinds: Vec<_> = resolution.errors.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ErrorKind::UnionNoMatch, ErrorKind::MissingRequiredField]);
        assert_eq!(
            resolution.errors.errors[0].message,
            "Value matches none of the 2 accepted shapes; showing errors for the closest one (shape 2)"
        );
        assert_eq!(resolution.errors.errors[1].path.to_string(), "$.key");
    }

    #[test]
    fn test_ties_go_to_declaration_order() {
        let union = UnionShape::builder("u")
            .alternative(literal("a"))
            .alternative(literal("b"))
            .build()
            .unwrap();

        let resolution = resolve(&json!({ "type": "c", "value": "x" }), &union, &ValidationContext::root());
        assert_eq!(resolution.errors.len(), 2);
        assert!(resolution.errors.errors[0].message.ends_with("(shape 1)"));
        assert!(resolution.errors.errors[1].message.contains("allowed values: a"));
    }

    #[test]
    fn test_union_rules_check_raw_value() {
        let plain = ObjectShape::builder("plain")
            .field("type", ConstraintNode::required().string())
            .build()
            .unwrap();
        let union = UnionShape::builder("u")
            .alternative(plain)
            .rule(ObjectRule::depends_on("extra", FieldCondition::equals("type", "rich")))
            .build()
            .unwrap();

        let resolution = resolve(&json!({ "type": "plain", "extra": 1 }), &union, &ValidationContext::root());
        assert_eq!(resolution.selected, Some(0));
        assert_eq!(resolution.errors.len(), 1);
        assert_eq!(resolution.errors.errors[0].kind, ErrorKind::DependencyViolation);
    }

    #[test]
    fn test_nested_union_errors_do_not_count_against_alternative() {
        let claim = UnionShape::builder("claim")
            .alternative(
                ObjectShape::builder("any")
                    .field("type", ConstraintNode::required().string())
                    .build()
                    .unwrap(),
            )
            .rule(ObjectRule::mutual_dependency("bundle", FieldCondition::equals("type", "external")))
            .build()
            .unwrap();
        let widget = ObjectShape::builder("widget")
            .field("kind", ConstraintNode::required().string().rule(FieldRule::one_of(["widget"])))
            .field("claims", ConstraintNode::optional().array().union(claim))
            .build()
            .unwrap();
        let union = UnionShape::builder("frontend")
            .alternative(widget)
            .alternative(literal("app"))
            .build()
            .unwrap();

        let value = json!({ "kind": "widget", "claims": [ { "type": "external" } ] });
        let resolution = resolve(&value, &union, &ValidationContext::root());
        assert_eq!(resolution.selected, Some(0));
        assert_eq!(resolution.errors.len(), 1);
        assert_eq!(resolution.errors.errors[0].kind, ErrorKind::MissingRequiredField);
        assert_eq!(resolution.errors.errors[0].path.to_string(), "$.claims[0].bundle");
    }

    #[test]
    fn test_non_object_value() {
        let union = UnionShape::builder("u").alternative(secret()).build().unwrap();
        let resolution = resolve(&json!("text"), &union, &ValidationContext::root());
        assert_eq!(resolution.errors.len(), 1);
        assert_eq!(resolution.errors.errors[0].message, "Expected object, found string");
    }
}
