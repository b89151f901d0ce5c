//! Bundlekit Schemas - constraint schemas and the validation engine
//!
//! This crate validates hierarchical, polymorphic configuration documents
//! against declarative constraint schemas, and ships the schema for
//! application bundle descriptors (microservices plus micro-frontends).
//!
//! ## Features
//!
//! - **Constraint Schemas**: required/optional scalar fields, typed arrays,
//!   nested objects and unions of alternative shapes
//! - **Field Validators**: full-match patterns with custom messages, literal
//!   sets, maps of strings
//! - **Cross-Field Rules**: mutual dependency and one-directional
//!   dependency between sibling fields
//! - **Union Resolution**: first alternative without structural errors of
//!   its own wins; otherwise the closest alternative's errors are reported
//! - **Schemas as Data**: JSON/YAML schema definitions compiled into the
//!   same shared model
//! - **Typed Descriptors**: valid bundle descriptors parse into tagged Rust
//!   types
//!
//! ## Quick Start
//!
//! ```rust
//! use bundlekit_schemas::{create_bundle_descriptor_validator, SchemaValidator};
//! use serde_json::json;
//!
//! let validator = create_bundle_descriptor_validator();
//!
//! let descriptor = json!({
//!     "name": "my-bundle",
//!     "version": "0.0.1",
//!     "type": "bundle",
//!     "microservices": [
//!         { "name": "svc1", "stack": "node", "healthCheckPath": "/health" }
//!     ],
//!     "microfrontends": []
//! });
//!
//! match validator.validate(&descriptor) {
//!     Ok(()) => println!("Valid descriptor!"),
//!     Err(errors) => println!("{}", errors),
//! }
//! ```
//!
//! Every error carries a path from the document root, a message and a
//! [`ErrorKind`]. Malformed schemas are reported separately as
//! [`SchemaError`] and never show up among document errors.
//!
//! Copyright (c) 2025 Bundlekit Team
//! Licensed under the Apache-2.0 license

pub mod descriptor;
pub mod schema;
pub mod validation;

// Re-export commonly used types for convenience
pub use descriptor::{
    build_bundle_descriptor_schema, bundle_descriptor_schema, BundleDescriptor, DescriptorError,
    BUNDLE_DESCRIPTOR_FILE_NAME,
};
pub use schema::{
    Children, ConstraintNode, FieldCondition, FieldRule, ObjectRule, ObjectShape, ScalarKind,
    SchemaDefinition, SchemaError, SchemaResolver, SchemaResult, UnionShape,
};
pub use validation::{
    create_bundle_descriptor_validator, resolve_union, validate, ConstraintValidator, ErrorKind,
    FieldPath, PathSegment, Resolution, SchemaValidator, ValidationContext, ValidationError,
    ValidationErrors, ValidationResult,
};
