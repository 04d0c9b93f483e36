use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde_json::Value;
use terraform_provider_k8s::K8sProvider;

/// Reads a configuration file. `.json` files are parsed as JSON, anything
/// else as YAML.
pub fn load_config(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {} as JSON", path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {} as YAML", path.display()))?
    };

    debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Renders the manifest for a configuration file. Diagnostics are returned
/// as a `RenderError` for the caller to print.
pub fn render(provider: &K8sProvider, data_source: &str, path: &Path) -> Result<String> {
    let config = load_config(path)?;
    Ok(provider.render(data_source, &config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use terraform_provider_k8s::RenderError;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::Builder;

    fn config_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_render_yaml_config() {
        let file = config_file(
            ".yaml",
            r#"
metadata:
  name: my-flow
spec:
  deployment_model: DIRECT
  processor:
    port: 2055
"#,
        );
        let yaml = render(&K8sProvider::default(), "FlowCollector", file.path()).unwrap();
        assert_eq!(
            yaml,
            "apiVersion: flows.netobserv.io/v1beta1\nkind: FlowCollector\nmetadata:\n  name: my-flow\nspec:\n  processor:\n    port: 2055\n  deploymentModel: DIRECT\n"
        );
    }

    #[test]
    fn test_render_json_config() {
        let file = config_file(".json", r#"{ "metadata": { "name": "my-flow" } }"#);
        let yaml = render(&K8sProvider::default(), "FlowCollector", file.path()).unwrap();
        assert!(yaml.contains("name: my-flow"));
    }

    #[test]
    fn test_render_reports_diagnostics() {
        let file = config_file(
            ".yaml",
            "metadata:\n  name: my-flow\nspec:\n  processor:\n    port: 65536\n",
        );
        let err = render(&K8sProvider::default(), "FlowCollector", file.path()).unwrap_err();
        let Some(RenderError::Diagnostics(diagnostics)) = err.downcast_ref::<RenderError>() else {
            panic!("expected diagnostics, got {}", err);
        };
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/flow.yaml")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read configuration file"));
    }
}
