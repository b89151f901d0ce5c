//! Compilation of schema definitions into the shared schema model
//!
//! This module handles:
//! - resolution of `ref` children against named definitions
//! - circular reference detection
//! - reuse of a definition compiled once for every place that refers to it
//!
//! Copyright (c) 2025 Bundlekit Team
//! Licensed under the Apache-2.0 license

use crate::schema::definition::{
    ChildDefinition, FieldDefinition, ObjectDefinition, SchemaDefinition, ShapeDefinition,
    UnionDefinition,
};
use crate::schema::error::{SchemaError, SchemaResult};
use crate::schema::model::{Children, ConstraintNode, ObjectShape, UnionShape};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Compiles one [`SchemaDefinition`] into an immutable schema tree
#[derive(Debug)]
pub struct SchemaResolver<'a> {
    definition: &'a SchemaDefinition,
    /// Definitions currently being compiled, outermost first
    resolution_stack: Vec<String>,
    compiled: HashMap<String, Children>,
}

impl<'a> SchemaResolver<'a> {
    pub fn new(definition: &'a SchemaDefinition) -> Self {
        Self {
            definition,
            resolution_stack: Vec::new(),
            compiled: HashMap::new(),
        }
    }

    /// Compile the root definition and everything reachable from it
    pub fn resolve(mut self) -> SchemaResult<Arc<ObjectShape>> {
        let root = self.definition.root.clone();
        let compiled = self.resolve_named(&root, "<root>")?;
        debug!(
            root = %root,
            definitions = self.compiled.len(),
            "Compiled schema definition"
        );
        match compiled {
            Children::Object(shape) => Ok(shape),
            Children::Union(_) => Err(SchemaError::RootNotObject { name: root }),
        }
    }

    fn resolve_named(&mut self, name: &str, from: &str) -> SchemaResult<Children> {
        if let Some(done) = self.compiled.get(name) {
            return Ok(done.clone());
        }

        let definition = self.definition.definitions.get(name).ok_or_else(|| {
            SchemaError::UnknownReference {
                reference: name.to_string(),
                from: from.to_string(),
            }
        })?;

        self.push(name)?;
        let compiled = self.resolve_shape(definition, Some(name));
        self.resolution_stack.pop();

        let compiled = compiled?;
        self.compiled.insert(name.to_string(), compiled.clone());
        Ok(compiled)
    }

    fn push(&mut self, name: &str) -> SchemaResult<()> {
        if self.resolution_stack.iter().any(|n| n == name) {
            let mut chain = self.resolution_stack.clone();
            chain.push(name.to_string());
            return Err(SchemaError::circular_reference(&chain));
        }
        self.resolution_stack.push(name.to_string());
        Ok(())
    }

    fn resolve_shape(
        &mut self,
        definition: &ShapeDefinition,
        name: Option<&str>,
    ) -> SchemaResult<Children> {
        match definition {
            ShapeDefinition::Object(object) => {
                Ok(Children::Object(self.resolve_object(object, name)?))
            }
            ShapeDefinition::Union(union) => Ok(Children::Union(self.resolve_union(union, name)?)),
        }
    }

    fn resolve_object(
        &mut self,
        definition: &ObjectDefinition,
        name: Option<&str>,
    ) -> SchemaResult<Arc<ObjectShape>> {
        let mut builder = match name {
            Some(name) => ObjectShape::builder(name),
            None => ObjectShape::anonymous(),
        };
        for field in &definition.fields {
            let node = self.resolve_field(field)?;
            builder = builder.field(field.name.clone(), node);
        }
        for rule in &definition.rules {
            builder = builder.rule(rule.clone());
        }
        builder.build()
    }

    fn resolve_union(
        &mut self,
        definition: &UnionDefinition,
        name: Option<&str>,
    ) -> SchemaResult<Arc<UnionShape>> {
        let mut builder = match name {
            Some(name) => UnionShape::builder(name),
            None => UnionShape::anonymous(),
        };
        for alternative in &definition.alternatives {
            match self.resolve_child(alternative)? {
                Children::Object(shape) => builder = builder.alternative(shape),
                // Nested unions are flattened in order, rules included
                Children::Union(inner) => {
                    for shape in inner.alternatives() {
                        builder = builder.alternative(shape.clone());
                    }
                    for rule in inner.rules() {
                        builder = builder.rule(rule.clone());
                    }
                }
            }
        }
        for rule in &definition.rules {
            builder = builder.rule(rule.clone());
        }
        builder.build()
    }

    fn resolve_field(&mut self, field: &FieldDefinition) -> SchemaResult<ConstraintNode> {
        if field.kind.is_some() && field.children.is_some() {
            return Err(SchemaError::ConflictingField {
                field: field.name.clone(),
            });
        }

        let mut node = if field.required {
            ConstraintNode::required()
        } else {
            ConstraintNode::optional()
        };
        if let Some(kind) = field.kind {
            node = node.of_kind(kind);
        }
        if field.array {
            node = node.array();
        }
        if let Some(child) = &field.children {
            node = match self.resolve_child(child)? {
                Children::Object(shape) => node.object(shape),
                Children::Union(shape) => node.union(shape),
            };
        }
        for rule in &field.validators {
            node = node.rule(rule.clone());
        }
        Ok(node)
    }

    fn resolve_child(&mut self, child: &ChildDefinition) -> SchemaResult<Children> {
        match child {
            ChildDefinition::Ref { reference } => {
                let from = self
                    .resolution_stack
                    .last()
                    .cloned()
                    .unwrap_or_else(|| "<root>".to_string());
                self.resolve_named(reference, &from)
            }
            ChildDefinition::Inline(shape) => self.resolve_shape(shape, None),
        }
    }
}

impl SchemaDefinition {
    /// Compile this definition into a shared schema tree
    pub fn compile(&self) -> SchemaResult<Arc<ObjectShape>> {
        SchemaResolver::new(self).resolve()
    }
}
