//! Validation demonstration example
//!
//! Copyright (c) 2025 Bundlekit Team
//! Licensed under the Apache-2.0 license

use bundlekit_schemas::{
    create_bundle_descriptor_validator, BundleDescriptor, ConstraintNode, FieldCondition,
    ObjectRule, ObjectShape, SchemaValidator,
};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Bundlekit Validation Demo ===\n");

    demo_descriptor_validation()?;

    println!();

    demo_custom_schema()?;

    Ok(())
}

fn demo_descriptor_validation() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Bundle Descriptor Validation Demo ---");

    let validator = create_bundle_descriptor_validator();

    let valid = json!({
        "name": "demo-bundle",
        "version": "0.0.1",
        "type": "bundle",
        "microservices": [
            { "name": "svc1", "stack": "node", "healthCheckPath": "/health" }
        ],
        "microfrontends": [
            {
                "name": "mfe1",
                "stack": "react",
                "titles": { "en": "Demo" },
                "group": "free",
                "customElement": "demo-mfe",
                "type": "widget"
            }
        ]
    });

    println!("✅ Validating valid descriptor:");
    match validator.validate(&valid) {
        Ok(()) => println!("   Valid!"),
        Err(e) => println!("   Error: {}", e),
    }

    let descriptor = BundleDescriptor::from_value(&valid)?;
    println!(
        "   Parsed {} microservice(s), {} micro-frontend(s)",
        descriptor.microservices.len(),
        descriptor.microfrontends.len()
    );

    let invalid = json!({
        "name": "demo bundle",
        "version": "0.0.1",
        "type": "bundle",
        "microservices": [ { "name": "svc1", "stack": "node" } ],
        "microfrontends": [
            {
                "name": "mfe1",
                "stack": "react",
                "titles": { "en": "Demo" },
                "group": "free",
                "customElement": "demo-mfe",
                "type": "app-builder",
                "slot": "content"
            }
        ]
    });

    println!("\n❌ Validating invalid descriptor:");
    match validator.validate(&invalid) {
        Ok(()) => println!("   Unexpectedly valid!"),
        Err(errors) => {
            for error in &errors {
                println!("   [{}] {}", error.kind, error);
            }
        }
    }

    Ok(())
}

fn demo_custom_schema() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Custom Schema Demo ---");

    let shape = ObjectShape::builder("release")
        .field("channel", ConstraintNode::required().string())
        .field("approver", ConstraintNode::optional().string())
        .rule(ObjectRule::mutual_dependency(
            "approver",
            FieldCondition::equals("channel", "stable"),
        ))
        .build()?;
    let validator = bundlekit_schemas::ConstraintValidator::new(shape);

    for document in [
        json!({ "channel": "stable", "approver": "ops" }),
        json!({ "channel": "stable" }),
        json!({ "channel": "nightly", "approver": "ops" }),
    ] {
        let errors = validator.collect_errors(&document);
        println!("   {} -> {} error(s)", document, errors.len());
        for error in &errors {
            println!("      {}", error);
        }
    }

    Ok(())
}
