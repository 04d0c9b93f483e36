use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The subset of Kubernetes object metadata a manifest may carry.
///
/// `namespace` is only meaningful for namespaced kinds; cluster scoped data
/// sources never offer it, so it is absent from their output.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ManifestMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl ManifestMetadata {
    pub fn named(name: &str) -> Self {
        ManifestMetadata {
            name: name.to_string(),
            ..Default::default()
        }
    }
}
