use jsonschema::{Draft, JSONSchema};
use log::{debug, warn};

/// Validates a rendered YAML manifest against an OpenAPI v3 schema such as the
/// `openAPIV3Schema` of a CRD version.
pub fn validate_manifest(
    manifest_yaml: &str,
    schema: &serde_json::Value,
) -> Result<(), Vec<String>> {
    let manifest: serde_yaml::Value = serde_yaml::from_str(manifest_yaml)
        .map_err(|e| vec![format!("Could not parse manifest yaml: {}", e)])?;
    validate_schema(manifest, schema)
}

pub fn validate_schema(
    input_manifest: serde_yaml::Value,
    schema: &serde_json::Value,
) -> Result<(), Vec<String>> {
    let compiled_schema = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema)
        .map_err(|e| vec![format!("Invalid JSON Schema: {}", e)])?;

    let manifest_json_value = serde_json::to_value(&input_manifest)
        .map_err(|e| vec![format!("Could not convert manifest to json: {}", e)])?;

    let result = compiled_schema.validate(&manifest_json_value);

    match result {
        Ok(_) => {
            debug!("Schema validation succeeded");
            Ok(())
        }
        Err(errors) => {
            let errors: Vec<String> = errors
                .map(|error| format!("{} (at {})", error, error.instance_path))
                .collect();
            for error in &errors {
                warn!("Schema validation error: {}", error);
            }
            Err(errors)
        }
    }
}
