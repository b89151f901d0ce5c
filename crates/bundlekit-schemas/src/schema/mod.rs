//! Constraint schemas: the in-memory model, its rules, and definitions as data
//!
//! Copyright (c) 2025 Bundlekit Team
//! Licensed under the Apache-2.0 license

pub mod definition;
pub mod error;
pub mod model;
pub mod resolver;
pub mod rules;

pub use definition::{
    ChildDefinition, FieldDefinition, Format, ObjectDefinition, SchemaDefinition,
    ShapeDefinition, UnionDefinition,
};
pub use error::{SchemaError, SchemaResult};
pub use model::{
    Children, ConstraintNode, FieldSpec, ObjectShape, ObjectShapeBuilder, ScalarKind, UnionShape,
    UnionShapeBuilder,
};
pub use resolver::SchemaResolver;
pub use rules::{FieldCondition, FieldRule, ObjectRule, PatternRule};
