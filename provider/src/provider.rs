use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use log::{debug, info, warn};
use serde_json::Value;
use thiserror::Error;

use manifest_defs::{FlowCollector, FlowMetric, ManifestError};

use crate::{
    validate_config, validate_implementation, Diagnostics, ManifestDataSource, ManifestSource,
    MetadataRequest, ReadRequest, Schema,
};

pub const DEFAULT_PROVIDER_TYPE_NAME: &str = "k8s";
pub const PROVIDER_NAME_ENV: &str = "K8S_PROVIDER_NAME";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("{0}")]
    Diagnostics(Diagnostics),
}

/// The provider: a registry of manifest data sources under a type name prefix.
pub struct K8sProvider {
    type_name: String,
    data_sources: Vec<Box<dyn ManifestSource>>,
}

impl K8sProvider {
    pub fn new(type_name: &str) -> Self {
        K8sProvider {
            type_name: type_name.to_string(),
            data_sources: vec![
                Box::new(ManifestDataSource::<FlowCollector>::new()),
                Box::new(ManifestDataSource::<FlowMetric>::new()),
            ],
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    fn metadata_request(&self) -> MetadataRequest {
        MetadataRequest {
            provider_type_name: self.type_name.clone(),
        }
    }

    pub fn data_source_names(&self) -> Vec<String> {
        let req = self.metadata_request();
        let mut names: Vec<String> = self
            .data_sources
            .iter()
            .map(|ds| ds.metadata(&req).type_name)
            .collect();
        names.sort();
        names
    }

    /// Finds a data source by its full type name, or by kind (case insensitive).
    pub fn data_source(&self, name: &str) -> Option<&dyn ManifestSource> {
        let req = self.metadata_request();
        self.data_sources
            .iter()
            .find(|ds| ds.metadata(&req).type_name == name || ds.kind().eq_ignore_ascii_case(name))
            .map(|ds| &**ds)
    }

    pub fn crds(&self) -> Vec<CustomResourceDefinition> {
        self.data_sources.iter().map(|ds| ds.crd()).collect()
    }

    /// The schema of a data source, with implementation errors surfaced as a
    /// render error.
    pub fn schema(&self, name: &str) -> Result<Schema, RenderError> {
        let data_source = self.find(name)?;
        let response = data_source.schema();
        let mut diagnostics = response.diagnostics;
        diagnostics.extend(validate_implementation(&response.schema));
        if diagnostics.has_error() {
            return Err(RenderError::Diagnostics(diagnostics));
        }
        Ok(response.schema)
    }

    /// Validates a configuration and renders the manifest YAML for it.
    pub fn render(&self, name: &str, config: &Value) -> Result<String, RenderError> {
        let schema = self.schema(name)?;
        let data_source = self.find(name)?;

        let diagnostics = validate_config(&schema, config);
        if diagnostics.has_error() {
            info!(
                "Configuration for {} has {} error(s)",
                name,
                diagnostics.errors().count()
            );
            return Err(RenderError::Diagnostics(diagnostics));
        }
        log_warnings(&diagnostics);

        let response = data_source.read(&ReadRequest {
            config: config.clone(),
        });
        log_warnings(&response.diagnostics);

        let yaml = response
            .state
            .as_ref()
            .and_then(|state| state.get("yaml"))
            .and_then(Value::as_str)
            .map(str::to_string);
        match yaml {
            Some(yaml) if !response.diagnostics.has_error() => {
                debug!("Rendered {} ({} bytes)", name, yaml.len());
                Ok(yaml)
            }
            _ => Err(RenderError::Diagnostics(response.diagnostics)),
        }
    }

    fn find(&self, name: &str) -> Result<&dyn ManifestSource, RenderError> {
        self.data_source(name)
            .ok_or_else(|| ManifestError::UnknownDataSource(name.to_string()).into())
    }
}

impl Default for K8sProvider {
    fn default() -> Self {
        K8sProvider::new(DEFAULT_PROVIDER_TYPE_NAME)
    }
}

fn log_warnings(diagnostics: &Diagnostics) {
    for warning in diagnostics.warnings() {
        warn!("{}", warning);
    }
}
