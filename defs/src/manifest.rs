use serde::{Deserialize, Serialize};

use crate::{ManifestError, ManifestKind, ManifestMetadata};

/// A rendered Kubernetes object as it appears in the `yaml` attribute.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest<S> {
    pub api_version: String,
    pub kind: String,
    pub metadata: ManifestMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<S>,
}

impl<S: Serialize> Manifest<S> {
    pub fn to_yaml(&self) -> Result<String, ManifestError> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(yaml.trim_start_matches("---\n").to_string())
    }
}

/// The data model of one manifest data source: the user configuration plus the
/// computed `yaml` output.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ManifestData<S> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaml: Option<String>,
    pub metadata: ManifestMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<S>,
}

impl<S> ManifestData<S> {
    pub fn new(metadata: ManifestMetadata, spec: Option<S>) -> Self {
        ManifestData {
            yaml: None,
            metadata,
            spec,
        }
    }
}

impl<S: Clone> ManifestData<S> {
    /// Stamps the fixed `apiVersion` and `kind` of `K` onto the configuration.
    pub fn to_manifest<K: ManifestKind<Spec = S>>(&self) -> Manifest<S> {
        Manifest {
            api_version: K::manifest_api_version(),
            kind: K::manifest_kind(),
            metadata: self.metadata.clone(),
            spec: self.spec.clone(),
        }
    }
}

impl<S: Clone + Serialize> ManifestData<S> {
    /// Renders the manifest and stores it in `yaml`.
    pub fn render<K: ManifestKind<Spec = S>>(&mut self) -> Result<&str, ManifestError> {
        let yaml = self.to_manifest::<K>().to_yaml()?;
        Ok(self.yaml.insert(yaml).as_str())
    }
}
