//! Declarative field and object rules
//!
//! Rules are plain data so a schema stays serializable and inspectable.
//! Their evaluation lives in [`crate::validation`].
//!
//! Copyright (c) 2025 Bundlekit Team
//! Licensed under the Apache-2.0 license

use crate::schema::error::{SchemaError, SchemaResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A predicate over a single field value
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ValidatorDefinition", into = "ValidatorDefinition")]
pub enum FieldRule {
    /// The string value must fully match a pattern
    Pattern(PatternRule),
    /// The value must equal one of a fixed set of literals
    OneOf(Vec<Value>),
    /// The value must be an object whose every value is a string
    MapOfStrings,
}

impl FieldRule {
    /// Full-match pattern rule reporting `message` on mismatch
    pub fn pattern<P, M>(pattern: P, message: M) -> SchemaResult<Self>
    where
        P: Into<String>,
        M: Into<String>,
    {
        Ok(Self::Pattern(PatternRule::new(pattern, message)?))
    }

    /// Membership rule over any JSON literals
    pub fn one_of<I, V>(allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::OneOf(allowed.into_iter().map(Into::into).collect())
    }

    pub fn map_of_strings() -> Self {
        Self::MapOfStrings
    }
}

impl PartialEq for FieldRule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Pattern(a), Self::Pattern(b)) => a == b,
            (Self::OneOf(a), Self::OneOf(b)) => a == b,
            (Self::MapOfStrings, Self::MapOfStrings) => true,
            _ => false,
        }
    }
}

/// Compiled full-match pattern with its user-facing message
#[derive(Clone)]
pub struct PatternRule {
    source: String,
    regex: Regex,
    message: String,
}

impl PatternRule {
    pub fn new<P, M>(pattern: P, message: M) -> SchemaResult<Self>
    where
        P: Into<String>,
        M: Into<String>,
    {
        let source = pattern.into();
        let regex = Regex::new(&format!("^(?:{})$", source)).map_err(|e| {
            SchemaError::InvalidPattern {
                pattern: source.clone(),
                source: e,
            }
        })?;
        Ok(Self {
            source,
            regex,
            message: message.into(),
        })
    }

    /// The pattern as authored
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for PatternRule {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.message == other.message
    }
}

impl fmt::Debug for PatternRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternRule")
            .field("source", &self.source)
            .field("message", &self.message)
            .finish()
    }
}

/// Serialized form of a [`FieldRule`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ValidatorDefinition {
    Named(NamedValidator),
    Pattern {
        pattern: String,
        message: String,
    },
    OneOf {
        #[serde(rename = "oneOf")]
        one_of: Vec<Value>,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum NamedValidator {
    MapOfStrings,
}

impl TryFrom<ValidatorDefinition> for FieldRule {
    type Error = SchemaError;

    fn try_from(definition: ValidatorDefinition) -> Result<Self, Self::Error> {
        match definition {
            ValidatorDefinition::Named(NamedValidator::MapOfStrings) => Ok(Self::MapOfStrings),
            ValidatorDefinition::Pattern { pattern, message } => Self::pattern(pattern, message),
            ValidatorDefinition::OneOf { one_of } if one_of.is_empty() => {
                Err(SchemaError::InvalidValidator {
                    reason: "oneOf requires at least one allowed value".to_string(),
                })
            }
            ValidatorDefinition::OneOf { one_of } => Ok(Self::OneOf(one_of)),
        }
    }
}

impl From<FieldRule> for ValidatorDefinition {
    fn from(rule: FieldRule) -> Self {
        match rule {
            FieldRule::Pattern(p) => Self::Pattern {
                pattern: p.source,
                message: p.message,
            },
            FieldRule::OneOf(one_of) => Self::OneOf { one_of },
            FieldRule::MapOfStrings => Self::Named(NamedValidator::MapOfStrings),
        }
    }
}

/// Condition on a sibling field: present, or present with an exact value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCondition {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<Value>,
}

impl FieldCondition {
    /// Holds when `key` is present and not null
    pub fn present<K: Into<String>>(key: K) -> Self {
        Self {
            key: key.into(),
            equals: None,
        }
    }

    /// Holds when `key` equals `value`
    pub fn equals<K: Into<String>, V: Into<Value>>(key: K, value: V) -> Self {
        Self {
            key: key.into(),
            equals: Some(value.into()),
        }
    }
}

impl fmt::Display for FieldCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.equals {
            Some(value) => write!(
                f,
                "{} is {}",
                self.key,
                crate::validation::error::quote_literal(value)
            ),
            None => write!(f, "{} is present", self.key),
        }
    }
}

/// Cross-field rule over the direct siblings of one object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectRule {
    /// `field` is present exactly when `when` holds
    MutualDependency { field: String, when: FieldCondition },
    /// `field` may only be present when `when` holds
    DependsOn { field: String, when: FieldCondition },
}

impl ObjectRule {
    pub fn mutual_dependency<F: Into<String>>(field: F, when: FieldCondition) -> Self {
        Self::MutualDependency {
            field: field.into(),
            when,
        }
    }

    pub fn depends_on<F: Into<String>>(field: F, when: FieldCondition) -> Self {
        Self::DependsOn {
            field: field.into(),
            when,
        }
    }

    /// The field the rule constrains
    pub fn field(&self) -> &str {
        match self {
            Self::MutualDependency { field, .. } | Self::DependsOn { field, .. } => field,
        }
    }
}
