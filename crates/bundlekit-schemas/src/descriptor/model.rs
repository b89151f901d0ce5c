//! Typed bundle descriptor model
//!
//! Valid descriptors deserialize into tagged variants: micro-frontends by
//! `type`, app-builder placements by `slot`, API claims by `type`.
//! Unknown fields are ignored on input, like the validator does.
//!
//! Copyright (c) 2025 Bundlekit Team
//! Licensed under the Apache-2.0 license

use crate::descriptor::constraints::bundle_descriptor_schema;
use crate::validation::{validate, ValidationErrors};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// An enumeration whose variants are fixed string literals in documents
pub trait LiteralEnum: Sized + Copy + 'static {
    /// Every variant in declaration order
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn literals() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.as_str()).collect()
    }
}

macro_rules! literal_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $literal:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $literal)]
                $variant,
            )+
        }

        impl LiteralEnum for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $literal,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

literal_enum! {
    /// Technology stack of a microservice
    MicroserviceStack { Node => "node", SpringBoot => "spring-boot" }
}

literal_enum! {
    /// Technology stack of a micro-frontend
    MicroFrontendStack { React => "react", Angular => "angular" }
}

literal_enum! {
    Dbms { None => "none", PostgreSql => "postgresql", MySql => "mysql", Embedded => "embedded" }
}

literal_enum! {
    SecurityLevel { Strict => "strict", Lenient => "lenient" }
}

literal_enum! {
    MicroFrontendType { AppBuilder => "app-builder", Widget => "widget", WidgetConfig => "widget-config" }
}

literal_enum! {
    /// Where an app-builder micro-frontend is mounted
    AppBuilderSlot { PrimaryHeader => "primary-header", PrimaryMenu => "primary-menu", Content => "content" }
}

literal_enum! {
    /// Page context a widget can ask for
    WidgetContextParam { PageCode => "pageCode", LangCode => "langCode", ApplicationBaseUrl => "applicationBaseUrl" }
}

literal_enum! {
    ApiType { Internal => "internal", External => "external" }
}

literal_enum! {
    DescriptorType { Bundle => "bundle" }
}

/// Failure to turn a JSON value into a [`BundleDescriptor`]
#[derive(Error, Debug)]
pub enum DescriptorError {
    /// The value breaks the descriptor constraints
    #[error("Invalid bundle descriptor: {0}")]
    Invalid(ValidationErrors),

    /// The value passed validation but does not fit the typed model
    #[error("Failed to deserialize bundle descriptor: {0}")]
    Deserialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub version: String,
    #[serde(rename = "type")]
    pub descriptor_type: DescriptorType,
    pub microservices: Vec<Microservice>,
    pub microfrontends: Vec<MicroFrontend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svc: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<GlobalSettings>,
}

impl BundleDescriptor {
    /// Validate `value` against the built-in schema, then deserialize it
    ///
    /// Every validation error is returned, not just the first.
    pub fn from_value(value: &Value) -> Result<Self, DescriptorError> {
        let errors = validate(value, &bundle_descriptor_schema());
        if !errors.is_empty() {
            return Err(DescriptorError::Invalid(errors));
        }
        Ok(Self::deserialize(value)?)
    }

    pub fn microservice(&self, name: &str) -> Option<&Microservice> {
        self.microservices.iter().find(|m| m.name == name)
    }

    pub fn microfrontend(&self, name: &str) -> Option<&MicroFrontend> {
        self.microfrontends.iter().find(|m| m.common().name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    pub nav: Vec<Nav>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Microservice {
    pub name: String,
    pub stack: MicroserviceStack,
    pub health_check_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_base_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbms: Option<Dbms>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Permission>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_level: Option<SecurityLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvironmentVariable>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Commands>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub client_id: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Commands {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
}

/// An environment variable: a literal value or a reference to a secret
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvironmentVariable {
    Literal {
        name: String,
        value: String,
    },
    Secret {
        name: String,
        #[serde(rename = "valueFrom")]
        value_from: ValueFrom,
    },
}

impl EnvironmentVariable {
    pub fn name(&self) -> &str {
        match self {
            Self::Literal { name, .. } | Self::Secret { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueFrom {
    pub secret_key_ref: SecretKeyRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretKeyRef {
    pub name: String,
    pub key: String,
}

/// An API a micro-frontend consumes, from this bundle or another one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ApiClaim {
    Internal {
        name: String,
        #[serde(rename = "serviceName")]
        service_name: String,
    },
    External {
        name: String,
        #[serde(rename = "serviceName")]
        service_name: String,
        /// `<registry>/<organization>/<repository>` of the providing bundle
        bundle: String,
    },
}

impl ApiClaim {
    pub fn api_type(&self) -> ApiType {
        match self {
            Self::Internal { .. } => ApiType::Internal,
            Self::External { .. } => ApiType::External,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Internal { name, .. } | Self::External { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nav {
    pub label: BTreeMap<String, String>,
    pub target: String,
    pub url: String,
}

/// Fields every micro-frontend variant carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroFrontendCommon {
    pub name: String,
    pub stack: MicroFrontendStack,
    pub titles: BTreeMap<String, String>,
    pub group: String,
    pub custom_element: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_claims: Option<Vec<ApiClaim>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav: Option<Vec<Nav>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Commands>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MicroFrontend {
    #[serde(rename = "widget")]
    Widget(WidgetMicroFrontend),
    #[serde(rename = "widget-config")]
    WidgetConfig(WidgetConfigMicroFrontend),
    #[serde(rename = "app-builder")]
    AppBuilder(AppBuilderMicroFrontend),
}

impl MicroFrontend {
    pub fn mfe_type(&self) -> MicroFrontendType {
        match self {
            Self::Widget(_) => MicroFrontendType::Widget,
            Self::WidgetConfig(_) => MicroFrontendType::WidgetConfig,
            Self::AppBuilder(_) => MicroFrontendType::AppBuilder,
        }
    }

    pub fn common(&self) -> &MicroFrontendCommon {
        match self {
            Self::Widget(mfe) => &mfe.common,
            Self::WidgetConfig(mfe) => &mfe.common,
            Self::AppBuilder(mfe) => &mfe.common,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetMicroFrontend {
    #[serde(flatten)]
    pub common: MicroFrontendCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_params: Option<Vec<WidgetContextParam>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_mfe: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfigMicroFrontend {
    #[serde(flatten)]
    pub common: MicroFrontendCommon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppBuilderMicroFrontend {
    #[serde(flatten)]
    pub common: MicroFrontendCommon,
    #[serde(flatten)]
    pub placement: AppBuilderPlacement,
}

/// App-builder slot; only the content slot carries route paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "slot")]
pub enum AppBuilderPlacement {
    #[serde(rename = "primary-header")]
    PrimaryHeader,
    #[serde(rename = "primary-menu")]
    PrimaryMenu,
    #[serde(rename = "content")]
    Content { paths: Vec<String> },
}

impl AppBuilderPlacement {
    pub fn slot(&self) -> AppBuilderSlot {
        match self {
            Self::PrimaryHeader => AppBuilderSlot::PrimaryHeader,
            Self::PrimaryMenu => AppBuilderSlot::PrimaryMenu,
            Self::Content { .. } => AppBuilderSlot::Content,
        }
    }
}
