mod config;
mod data_source;
mod diagnostics;
mod implementation;
mod manifest;
mod metadata;
mod openapi;
mod provider;
mod schema;
mod validators;

pub use config::{to_manifest_value, validate_config};
pub use data_source::{
    DataSource, MetadataRequest, MetadataResponse, ReadRequest, ReadResponse, SchemaResponse,
};
pub use diagnostics::{AttributePath, Diagnostic, Diagnostics, PathStep, Severity};
pub use implementation::validate_implementation;
pub use manifest::{ManifestDataSource, ManifestSource};
pub use metadata::metadata_attribute;
pub use openapi::{attribute_from_schema, attributes_from_schema};
pub use provider::{K8sProvider, RenderError, DEFAULT_PROVIDER_TYPE_NAME, PROVIDER_NAME_ENV};
pub use schema::{Attribute, AttributeKind, ElementType, Schema};
pub use validators::{name_validators, namespace_validators, Validator};
