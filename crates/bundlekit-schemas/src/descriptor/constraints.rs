//! Constraint tables for the bundle descriptor
//!
//! Fields that a union rule gates on a discriminant (`slot`, `paths`,
//! `contextParams`, `configMfe`) are declared as optional on every
//! alternative. Their values are then checked whichever alternative
//! matches first, and the union rules decide whether they may appear.
//!
//! API claims are the exception: only the external shape declares
//! `bundle`, and the internal shape accepts nothing but `type: internal`.
//!
//! Copyright (c) 2025 Bundlekit Team
//! Licensed under the Apache-2.0 license

use crate::descriptor::model::{
    ApiType, AppBuilderSlot, Dbms, DescriptorType, LiteralEnum, MicroFrontendStack,
    MicroFrontendType, MicroserviceStack, SecurityLevel, WidgetContextParam,
};
use crate::schema::error::SchemaResult;
use crate::schema::model::{ConstraintNode, ObjectShape, ObjectShapeBuilder, UnionShape};
use crate::schema::rules::{FieldCondition, FieldRule, ObjectRule};
use std::sync::{Arc, OnceLock};

/// Default descriptor file name inside a bundle project
pub const BUNDLE_DESCRIPTOR_FILE_NAME: &str = "entando.json";

pub const ALLOWED_NAME_PATTERN: &str = "^[A-Za-z0-9_-]+$";
pub const INVALID_NAME_MESSAGE: &str =
    "Only alphanumeric characters, underscore and dash are allowed";

/// `<registry>[:port]/<organization>/<repository>`
pub const ALLOWED_BUNDLE_WITH_REGISTRY_PATTERN: &str =
    "^[A-Za-z0-9_.-]+(:[0-9]+)?(?:/[A-Za-z0-9_-]+){2}$";
pub const INVALID_BUNDLE_MESSAGE: &str = "Valid format is <registry>/<organization>/<repository>";

/// `<organization>/<repository>`
pub const ALLOWED_BUNDLE_WITHOUT_REGISTRY_PATTERN: &str = "^[A-Za-z0-9_-]+/[A-Za-z0-9_-]+$";

static BUNDLE_DESCRIPTOR_SCHEMA: OnceLock<Arc<ObjectShape>> = OnceLock::new();

/// The bundle descriptor schema, built once per process
pub fn bundle_descriptor_schema() -> Arc<ObjectShape> {
    BUNDLE_DESCRIPTOR_SCHEMA
        .get_or_init(|| {
            build_bundle_descriptor_schema()
                .expect("built-in bundle descriptor schema must be well-formed")
        })
        .clone()
}

fn values<E: LiteralEnum>() -> FieldRule {
    FieldRule::one_of(E::literals())
}

fn string() -> ConstraintNode {
    ConstraintNode::optional().string()
}

fn required_string() -> ConstraintNode {
    ConstraintNode::required().string()
}

/// Build the bundle descriptor schema from scratch
pub fn build_bundle_descriptor_schema() -> SchemaResult<Arc<ObjectShape>> {
    let tables = Tables::new()?;

    let global = ObjectShape::builder("global")
        .field("nav", ConstraintNode::required().array().object(tables.nav.clone()))
        .build()?;

    ObjectShape::builder("bundle")
        .field("name", required_string().rule(tables.name_rule.clone()))
        .field("description", string())
        .field("version", required_string())
        .field("type", required_string().rule(values::<DescriptorType>()))
        .field(
            "microservices",
            ConstraintNode::required().array().object(tables.microservice()?),
        )
        .field(
            "microfrontends",
            ConstraintNode::required().array().union(tables.microfrontend()?),
        )
        .field("svc", string().array())
        .field("global", ConstraintNode::optional().object(global))
        .build()
}

/// Shapes and rules shared between several entities
struct Tables {
    name_rule: FieldRule,
    bundle_rule: FieldRule,
    nav: Arc<ObjectShape>,
    commands: Arc<ObjectShape>,
}

impl Tables {
    fn new() -> SchemaResult<Self> {
        let nav = ObjectShape::builder("nav")
            .field(
                "label",
                ConstraintNode::required().rule(FieldRule::map_of_strings()),
            )
            .field("target", required_string())
            .field("url", required_string())
            .build()?;

        let commands = ObjectShape::builder("commands")
            .field("build", string())
            .build()?;

        Ok(Self {
            name_rule: FieldRule::pattern(ALLOWED_NAME_PATTERN, INVALID_NAME_MESSAGE)?,
            bundle_rule: FieldRule::pattern(
                ALLOWED_BUNDLE_WITH_REGISTRY_PATTERN,
                INVALID_BUNDLE_MESSAGE,
            )?,
            nav,
            commands,
        })
    }

    fn environment_variable(&self) -> SchemaResult<Arc<UnionShape>> {
        let literal = ObjectShape::builder("environmentVariable.literal")
            .field("name", required_string())
            .field("value", required_string())
            .build()?;

        let secret_key_ref = ObjectShape::builder("secretKeyRef")
            .field("name", required_string())
            .field("key", required_string())
            .build()?;
        let value_from = ObjectShape::builder("valueFrom")
            .field("secretKeyRef", ConstraintNode::required().object(secret_key_ref))
            .build()?;
        let secret = ObjectShape::builder("environmentVariable.secret")
            .field("name", required_string())
            .field("valueFrom", ConstraintNode::required().object(value_from))
            .build()?;

        UnionShape::builder("environmentVariable")
            .alternative(literal)
            .alternative(secret)
            .build()
    }

    fn microservice(&self) -> SchemaResult<Arc<ObjectShape>> {
        let permission = ObjectShape::builder("permission")
            .field("clientId", required_string())
            .field("role", required_string())
            .build()?;

        ObjectShape::builder("microservice")
            .field("name", required_string().rule(self.name_rule.clone()))
            .field("stack", required_string().rule(values::<MicroserviceStack>()))
            .field("deploymentBaseName", string())
            .field("dbms", string().rule(values::<Dbms>()))
            .field("ingressPath", string())
            .field("healthCheckPath", required_string())
            .field("roles", string().array())
            .field("securityLevel", string().rule(values::<SecurityLevel>()))
            .field("permissions", ConstraintNode::optional().array().object(permission))
            .field(
                "env",
                ConstraintNode::optional()
                    .array()
                    .union(self.environment_variable()?),
            )
            .field("commands", ConstraintNode::optional().object(self.commands.clone()))
            .build()
    }

    /// External first: it lists every claim type and is the one reported
    /// on ties. Its `bundle` stays optional so a missing bundle surfaces
    /// once, through the union rule.
    fn api_claim(&self) -> SchemaResult<Arc<UnionShape>> {
        let base = |name: &str, kind: FieldRule| {
            ObjectShape::builder(name)
                .field("name", required_string())
                .field("type", required_string().rule(kind))
                .field("serviceName", required_string())
        };

        let external = base("apiClaim.external", values::<ApiType>())
            .field("bundle", string().rule(self.bundle_rule.clone()))
            .build()?;
        let internal = base(
            "apiClaim.internal",
            FieldRule::one_of([ApiType::Internal.as_str()]),
        )
        .build()?;

        UnionShape::builder("apiClaim")
            .alternative(external)
            .alternative(internal)
            .rule(ObjectRule::mutual_dependency(
                "bundle",
                FieldCondition::equals("type", ApiType::External.as_str()),
            ))
            .build()
    }

    /// Fields shared by every micro-frontend alternative
    fn microfrontend_base(
        &self,
        name: &str,
        api_claims: &Arc<UnionShape>,
    ) -> ObjectShapeBuilder {
        ObjectShape::builder(name)
            .field("name", required_string().rule(self.name_rule.clone()))
            .field("stack", required_string().rule(values::<MicroFrontendStack>()))
            .field(
                "titles",
                ConstraintNode::required().rule(FieldRule::map_of_strings()),
            )
            .field("publicFolder", string())
            .field("group", required_string())
            .field(
                "apiClaims",
                ConstraintNode::optional().array().union(api_claims.clone()),
            )
            .field("nav", ConstraintNode::optional().array().object(self.nav.clone()))
            .field("commands", ConstraintNode::optional().object(self.commands.clone()))
            .field("customElement", required_string())
            .field("type", required_string().rule(values::<MicroFrontendType>()))
    }

    fn microfrontend(&self) -> SchemaResult<Arc<UnionShape>> {
        let api_claims = self.api_claim()?;
        let context_params = || string().array().rule(values::<WidgetContextParam>());
        let slot = |node: ConstraintNode| node.string().rule(values::<AppBuilderSlot>());
        let paths = |node: ConstraintNode| node.string().array();

        let widget = self
            .microfrontend_base("microfrontend.widget", &api_claims)
            .field("contextParams", context_params())
            .field("configMfe", string())
            .field("slot", slot(ConstraintNode::optional()))
            .field("paths", paths(ConstraintNode::optional()))
            .build()?;

        let widget_config = self
            .microfrontend_base("microfrontend.widgetConfig", &api_claims)
            .field("contextParams", context_params())
            .field("configMfe", string())
            .field("slot", slot(ConstraintNode::optional()))
            .field("paths", paths(ConstraintNode::optional()))
            .build()?;

        let app_builder = self
            .microfrontend_base("microfrontend.appBuilder", &api_claims)
            .field("contextParams", context_params())
            .field("configMfe", string())
            .field("slot", slot(ConstraintNode::required()))
            .field("paths", paths(ConstraintNode::optional()))
            .build()?;

        let app_builder_content = self
            .microfrontend_base("microfrontend.appBuilderContent", &api_claims)
            .field("contextParams", context_params())
            .field("configMfe", string())
            .field("slot", slot(ConstraintNode::required()))
            .field("paths", paths(ConstraintNode::required()))
            .build()?;

        let widget_only = || FieldCondition::equals("type", MicroFrontendType::Widget.as_str());

        UnionShape::builder("microfrontend")
            .alternative(widget)
            .alternative(widget_config)
            .alternative(app_builder)
            .alternative(app_builder_content)
            .rule(ObjectRule::depends_on("contextParams", widget_only()))
            .rule(ObjectRule::depends_on("configMfe", widget_only()))
            .rule(ObjectRule::mutual_dependency(
                "slot",
                FieldCondition::equals("type", MicroFrontendType::AppBuilder.as_str()),
            ))
            .rule(ObjectRule::mutual_dependency(
                "paths",
                FieldCondition::equals("slot", AppBuilderSlot::Content.as_str()),
            ))
            .build()
    }
}
