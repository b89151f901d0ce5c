//! Constraint schema model
//!
//! A schema is an immutable tree of [`ObjectShape`]s and [`UnionShape`]s
//! whose fields are described by [`ConstraintNode`]s. Shapes are held in
//! `Arc`s so one definition can be shared by many fields and by many
//! concurrent validations.
//!
//! Copyright (c) 2025 Bundlekit Team
//! Licensed under the Apache-2.0 license

use crate::schema::error::{SchemaError, SchemaResult};
use crate::schema::rules::{FieldRule, ObjectRule};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Scalar type a field value must have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    String,
    Number,
    Integer,
    Boolean,
}

impl ScalarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Number => "number",
            ScalarKind::Integer => "integer",
            ScalarKind::Boolean => "boolean",
        }
    }

    /// Whether `value` has this kind
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ScalarKind::String => value.is_string(),
            ScalarKind::Number => value.is_number(),
            ScalarKind::Integer => value.is_i64() || value.is_u64(),
            ScalarKind::Boolean => value.is_boolean(),
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nested schema of a non-scalar field
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Children {
    Object(Arc<ObjectShape>),
    Union(Arc<UnionShape>),
}

/// Describes one field of an object shape
///
/// A node with `children` is never scalar. With `is_array` set, the
/// scalar kind, validators and children apply to each element rather
/// than to the field itself.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConstraintNode {
    pub required: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ScalarKind>,
    #[serde(rename = "array", skip_serializing_if = "std::ops::Not::not")]
    pub is_array: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Children>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<FieldRule>,
}

impl ConstraintNode {
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn optional() -> Self {
        Self::default()
    }

    pub fn string(self) -> Self {
        self.of_kind(ScalarKind::String)
    }

    pub fn of_kind(mut self, kind: ScalarKind) -> Self {
        self.kind = Some(kind);
        self.children = None;
        self
    }

    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub fn object(mut self, shape: Arc<ObjectShape>) -> Self {
        self.children = Some(Children::Object(shape));
        self.kind = None;
        self
    }

    pub fn union(mut self, shape: Arc<UnionShape>) -> Self {
        self.children = Some(Children::Union(shape));
        self.kind = None;
        self
    }

    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.validators.push(rule);
        self
    }
}

/// A declared field: its name and constraints
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(flatten)]
    pub node: ConstraintNode,
}

/// One concrete shape of an entity
///
/// Fields are kept in declaration order, which is also the order errors
/// are reported in.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectShape {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    fields: Vec<FieldSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    rules: Vec<ObjectRule>,
}

impl ObjectShape {
    /// Start building a named shape
    pub fn builder<S: Into<String>>(name: S) -> ObjectShapeBuilder {
        ObjectShapeBuilder {
            name: Some(name.into()),
            fields: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Start building a shape without a name
    pub fn anonymous() -> ObjectShapeBuilder {
        ObjectShapeBuilder {
            name: None,
            fields: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&ConstraintNode> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.node)
    }

    pub fn rules(&self) -> &[ObjectRule] {
        &self.rules
    }
}

pub struct ObjectShapeBuilder {
    name: Option<String>,
    fields: Vec<FieldSpec>,
    rules: Vec<ObjectRule>,
}

impl ObjectShapeBuilder {
    pub fn field<S: Into<String>>(mut self, name: S, node: ConstraintNode) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            node,
        });
        self
    }

    pub fn rule(mut self, rule: ObjectRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Finish the shape, rejecting duplicate field names
    pub fn build(self) -> SchemaResult<Arc<ObjectShape>> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    field: field.name.clone(),
                });
            }
        }
        Ok(Arc::new(ObjectShape {
            name: self.name,
            fields: self.fields,
            rules: self.rules,
        }))
    }
}

/// Ordered alternatives for one entity plus rules that apply to all of them
#[derive(Debug, Clone, Serialize)]
pub struct UnionShape {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    alternatives: Vec<Arc<ObjectShape>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    rules: Vec<ObjectRule>,
}

impl UnionShape {
    pub fn builder<S: Into<String>>(name: S) -> UnionShapeBuilder {
        UnionShapeBuilder {
            name: Some(name.into()),
            alternatives: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn anonymous() -> UnionShapeBuilder {
        UnionShapeBuilder {
            name: None,
            alternatives: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Alternatives in declaration order; never empty
    pub fn alternatives(&self) -> &[Arc<ObjectShape>] {
        &self.alternatives
    }

    pub fn rules(&self) -> &[ObjectRule] {
        &self.rules
    }
}

pub struct UnionShapeBuilder {
    name: Option<String>,
    alternatives: Vec<Arc<ObjectShape>>,
    rules: Vec<ObjectRule>,
}

impl UnionShapeBuilder {
    pub fn alternative(mut self, shape: Arc<ObjectShape>) -> Self {
        self.alternatives.push(shape);
        self
    }

    pub fn rule(mut self, rule: ObjectRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Finish the union; a union needs at least one alternative
    pub fn build(self) -> SchemaResult<Arc<UnionShape>> {
        if self.alternatives.is_empty() {
            return Err(SchemaError::empty_union(
                self.name.unwrap_or_else(|| "<anonymous>".to_string()),
            ));
        }
        Ok(Arc::new(UnionShape {
            name: self.name,
            alternatives: self.alternatives,
            rules: self.rules,
        }))
    }
}
