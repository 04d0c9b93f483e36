use anyhow::Result;
use terraform_provider_k8s::K8sProvider;

/// All registered CRDs as a multi-document YAML stream.
pub fn crdgen(provider: &K8sProvider) -> Result<String> {
    let mut out = String::new();
    for crd in provider.crds() {
        out.push_str(&serde_yaml::to_string(&crd)?);
    }
    Ok(out)
}
