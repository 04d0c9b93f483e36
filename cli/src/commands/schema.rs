use anyhow::Result;
use terraform_provider_k8s::K8sProvider;

/// The attribute tree of a data source as YAML.
pub fn schema(provider: &K8sProvider, data_source: &str) -> Result<String> {
    let schema = provider.schema(data_source)?;
    let yaml = serde_yaml::to_string(&schema)?;
    Ok(yaml.trim_start_matches("---\n").to_string())
}
