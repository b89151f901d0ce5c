//! Property-based tests for the validation engine
//!
//! These tests verify that the engine's guarantees hold across a wide
//! range of generated documents.

use proptest::prelude::*;
use serde_json::{json, Map, Value};
use bundlekit_schemas::{
    bundle_descriptor_schema, validate, ConstraintNode, ErrorKind, FieldCondition, ObjectRule,
    ObjectShape,
};
use std::sync::Arc;

/// Strategy for generating random JSON values with controlled complexity
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,50}".prop_map(Value::String),
    ];

    leaf.prop_recursive(
        3,  // max depth
        10, // max size
        5,  // items per collection
        |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                proptest::collection::hash_map("[a-zA-Z_][a-zA-Z0-9_]{0,20}", inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

/// Strategy for generating valid microservice entries
fn microservice_strategy() -> impl Strategy<Value = Value> {
    (
        "[a-z][a-z0-9_-]{0,15}",
        prop_oneof![Just("node"), Just("spring-boot")],
        "/[a-z]{1,10}",
        proptest::option::of(prop_oneof![Just("none"), Just("postgresql"), Just("mysql"), Just("embedded")]),
    )
        .prop_map(|(name, stack, health, dbms)| {
            let mut svc = json!({ "name": name, "stack": stack, "healthCheckPath": health });
            if let Some(dbms) = dbms {
                svc["dbms"] = json!(dbms);
            }
            svc
        })
}

fn descriptor_with(microservices: Vec<Value>) -> Value {
    json!({
        "name": "bundle",
        "version": "1.0.0",
        "type": "bundle",
        "microservices": microservices,
        "microfrontends": []
    })
}

fn list_schema() -> Arc<ObjectShape> {
    ObjectShape::builder("list")
        .field("items", ConstraintNode::required().string().array())
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_validation_never_panics(document in json_value_strategy()) {
        let _ = validate(&document, &bundle_descriptor_schema());
    }

    #[test]
    fn prop_validation_is_deterministic(document in json_value_strategy()) {
        let schema = bundle_descriptor_schema();
        prop_assert_eq!(validate(&document, &schema), validate(&document, &schema));
    }

    #[test]
    fn prop_valid_microservices_pass(services in proptest::collection::vec(microservice_strategy(), 0..6)) {
        let errors = validate(&descriptor_with(services), &bundle_descriptor_schema());
        prop_assert!(errors.is_empty(), "{}", errors);
    }

    #[test]
    fn prop_missing_required_field_reported_once(
        services in proptest::collection::vec(microservice_strategy(), 1..6),
        victim in any::<prop::sample::Index>(),
        field in prop_oneof![Just("name"), Just("stack"), Just("healthCheckPath")],
    ) {
        let mut services = services;
        let index = victim.index(services.len());
        services[index].as_object_mut().unwrap().remove(field);

        let errors = validate(&descriptor_with(services), &bundle_descriptor_schema());
        prop_assert_eq!(errors.len(), 1);
        prop_assert_eq!(errors.errors[0].kind, ErrorKind::MissingRequiredField);
        prop_assert_eq!(
            errors.errors[0].path.to_string(),
            format!("$.microservices[{}].{}", index, field)
        );
    }

    #[test]
    fn prop_array_errors_only_at_bad_indices(items in proptest::collection::vec(
        prop_oneof![
            "[a-z]{0,8}".prop_map(Value::String),
            any::<i64>().prop_map(|n| Value::Number(n.into())),
        ],
        0..12,
    )) {
        let expected: Vec<String> = items
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_string())
            .map(|(i, _)| format!("$.items[{}]", i))
            .collect();

        let errors = validate(&json!({ "items": items }), &list_schema());
        let actual: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_mutual_dependency_matches_biconditional(
        has_field in any::<bool>(),
        condition in any::<bool>(),
        extra in proptest::collection::hash_map("[a-z]{1,6}", "[a-z]{0,6}", 0..4),
    ) {
        let shape = ObjectShape::builder("claim")
            .rule(ObjectRule::mutual_dependency("bundle", FieldCondition::equals("type", "external")))
            .build()
            .unwrap();

        let mut object: Map<String, Value> = extra
            .into_iter()
            .filter(|(k, _)| k != "bundle" && k != "type")
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        object.insert("type".into(), json!(if condition { "external" } else { "internal" }));
        if has_field {
            object.insert("bundle".into(), json!("r/o/b"));
        }

        let errors = validate(&Value::Object(object), &shape);
        let kinds: Vec<ErrorKind> = errors.iter().map(|e| e.kind).collect();
        match (has_field, condition) {
            (true, true) | (false, false) => prop_assert!(kinds.is_empty()),
            (false, true) => prop_assert_eq!(kinds, vec![ErrorKind::MissingRequiredField]),
            (true, false) => prop_assert_eq!(kinds, vec![ErrorKind::DependencyViolation]),
        }
    }

    #[test]
    fn prop_depends_on_never_requires(
        has_field in any::<bool>(),
        condition in any::<bool>(),
    ) {
        let shape = ObjectShape::builder("mfe")
            .rule(ObjectRule::depends_on("contextParams", FieldCondition::equals("type", "widget")))
            .build()
            .unwrap();

        let mut document = json!({ "type": if condition { "widget" } else { "widget-config" } });
        if has_field {
            document["contextParams"] = json!(["pageCode"]);
        }

        let errors = validate(&document, &shape);
        if has_field && !condition {
            prop_assert_eq!(errors.len(), 1);
            prop_assert_eq!(errors.errors[0].kind, ErrorKind::DependencyViolation);
        } else {
            prop_assert!(errors.is_empty());
        }
    }
}
