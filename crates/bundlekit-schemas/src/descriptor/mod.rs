//! Bundle descriptor: constraint tables and the typed model
//!
//! Copyright (c) 2025 Bundlekit Team
//! Licensed under the Apache-2.0 license

pub mod constraints;
pub mod model;

pub use constraints::{
    build_bundle_descriptor_schema, bundle_descriptor_schema, ALLOWED_BUNDLE_WITHOUT_REGISTRY_PATTERN,
    ALLOWED_BUNDLE_WITH_REGISTRY_PATTERN, ALLOWED_NAME_PATTERN, BUNDLE_DESCRIPTOR_FILE_NAME,
    INVALID_BUNDLE_MESSAGE, INVALID_NAME_MESSAGE,
};
pub use model::{
    ApiClaim, ApiType, AppBuilderMicroFrontend, AppBuilderPlacement, AppBuilderSlot,
    BundleDescriptor, Commands, Dbms, DescriptorError, DescriptorType, EnvironmentVariable,
    GlobalSettings, LiteralEnum, MicroFrontend, MicroFrontendCommon, MicroFrontendStack,
    MicroFrontendType, Microservice, MicroserviceStack, Nav, Permission, SecretKeyRef,
    SecurityLevel, ValueFrom, WidgetConfigMicroFrontend, WidgetContextParam, WidgetMicroFrontend,
};
