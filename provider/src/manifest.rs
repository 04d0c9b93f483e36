use std::collections::BTreeMap;
use std::marker::PhantomData;

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::{
    CustomResourceDefinition, JSONSchemaProps,
};
use log::{debug, warn};
use serde_json::Value;

use manifest_defs::{ManifestData, ManifestError, ManifestKind};

use crate::openapi::attribute_from_schema;
use crate::{
    metadata_attribute, to_manifest_value, Attribute, DataSource, Diagnostics, MetadataRequest,
    MetadataResponse, ReadRequest, ReadResponse, Schema, SchemaResponse,
};

/// A data source that also knows the custom resource it renders.
pub trait ManifestSource: DataSource {
    fn kind(&self) -> String;

    fn crd(&self) -> CustomResourceDefinition;

    fn openapi_schema(&self) -> Option<JSONSchemaProps>;
}

/// Renders manifests of the custom resource `K`.
pub struct ManifestDataSource<K> {
    _kind: PhantomData<fn() -> K>,
}

impl<K: ManifestKind> ManifestDataSource<K> {
    pub fn new() -> Self {
        ManifestDataSource { _kind: PhantomData }
    }

    /// The schema is `yaml`, `metadata` and a `spec` generated from the CRD.
    pub fn build_schema() -> Result<Schema, ManifestError> {
        let openapi = K::openapi_schema().ok_or_else(|| ManifestError::Schema {
            path: K::manifest_api_version(),
            message: "the CRD has no openAPIV3Schema for its version".to_string(),
        })?;

        let mut attributes = BTreeMap::new();
        attributes.insert(
            "yaml".to_string(),
            Attribute::string("yaml")
                .computed()
                .with_description("The generated manifest in YAML format."),
        );
        attributes.insert("metadata".to_string(), metadata_attribute(K::is_namespaced()));

        if let Some(spec) = openapi.properties.as_ref().and_then(|p| p.get("spec")) {
            // `spec` stays optional so a manifest with metadata alone renders.
            let spec = attribute_from_schema("spec", spec, false, "spec")?;
            attributes.insert("spec".to_string(), spec);
        }

        Ok(Schema {
            description: K::DESCRIPTION.to_string(),
            attributes,
        })
    }

    /// Decodes a configuration keyed by attribute name into the data model.
    pub fn decode(schema: &Schema, config: &Value) -> Result<ManifestData<K::Spec>, ManifestError> {
        if !config.is_object() {
            return Err(ManifestError::InvalidConfiguration(
                "the configuration must be an object".to_string(),
            ));
        }
        let manifest_value = to_manifest_value(&schema.attributes, config);
        Ok(serde_json::from_value(manifest_value)?)
    }
}

impl<K: ManifestKind> Default for ManifestDataSource<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ManifestKind> DataSource for ManifestDataSource<K> {
    fn metadata(&self, req: &MetadataRequest) -> MetadataResponse {
        MetadataResponse {
            type_name: K::data_source_type_name(&req.provider_type_name),
        }
    }

    fn schema(&self) -> SchemaResponse {
        let mut diagnostics = Diagnostics::new();
        let schema = match Self::build_schema() {
            Ok(schema) => schema,
            Err(e) => {
                diagnostics.add_error("Unable to build schema", &e.to_string());
                Schema::default()
            }
        };
        SchemaResponse {
            schema,
            diagnostics,
        }
    }

    fn read(&self, req: &ReadRequest) -> ReadResponse {
        let mut diagnostics = Diagnostics::new();

        let schema = match Self::build_schema() {
            Ok(schema) => schema,
            Err(e) => {
                diagnostics.add_error("Unable to build schema", &e.to_string());
                return ReadResponse::failed(diagnostics);
            }
        };

        let mut data = match Self::decode(&schema, &req.config) {
            Ok(data) => data,
            Err(e) => {
                diagnostics.add_error("Unable to decode configuration", &e.to_string());
                return ReadResponse::failed(diagnostics);
            }
        };

        debug!(
            "Rendering {} manifest for {}",
            K::manifest_kind(),
            data.metadata.name
        );

        let yaml = match data.render::<K>() {
            Ok(yaml) => yaml.to_string(),
            Err(e) => {
                warn!("Failed to render {} manifest: {}", K::manifest_kind(), e);
                diagnostics.add_error(
                    "Unable to marshal YAML",
                    &format!(
                        "An unexpected error occurred while marshalling the {} manifest. Please report this issue to the provider developers.\n\nMarshal Error: {}",
                        K::manifest_kind(),
                        e
                    ),
                );
                return ReadResponse::failed(diagnostics);
            }
        };

        // decode() only accepts objects.
        let mut state = req.config.clone();
        if let Value::Object(object) = &mut state {
            object.insert("yaml".to_string(), Value::String(yaml));
        }

        ReadResponse {
            state: Some(state),
            diagnostics,
        }
    }
}

impl<K: ManifestKind> ManifestSource for ManifestDataSource<K> {
    fn kind(&self) -> String {
        K::manifest_kind()
    }

    fn crd(&self) -> CustomResourceDefinition {
        K::crd()
    }

    fn openapi_schema(&self) -> Option<JSONSchemaProps> {
        K::openapi_schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{validate_implementation, AttributeKind, Validator};
    use manifest_defs::{FlowCollector, FlowMetric};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_flow_collector_schema() {
        let response = ManifestDataSource::<FlowCollector>::new().schema();
        assert!(response.diagnostics.is_empty(), "{}", response.diagnostics);

        let schema = response.schema;
        let implementation = validate_implementation(&schema);
        assert!(implementation.is_empty(), "{}", implementation);

        assert!(schema.attributes["yaml"].is_read_only());
        assert!(schema.attributes["metadata"].required);
        assert!(schema.attributes["spec"].optional);
        assert!(schema.attribute("metadata.namespace").is_none());

        let port = schema.attribute("spec.processor.port").unwrap();
        assert_eq!(port.kind, AttributeKind::Int64);
        assert_eq!(port.field, "port");
        assert_eq!(
            port.validators,
            vec![Validator::Int64Between { min: 1025, max: 65535 }]
        );

        let model = schema.attribute("spec.deployment_model").unwrap();
        assert_eq!(model.field, "deploymentModel");
        assert_eq!(
            model.validators,
            vec![Validator::StringOneOf {
                values: vec!["DIRECT".to_string(), "KAFKA".to_string()],
            }]
        );

        let tenant = schema.attribute("spec.loki.tenant_id").unwrap();
        assert_eq!(tenant.field, "tenantID");

        let exporters = schema.attribute("spec.exporters").unwrap();
        assert!(matches!(exporters.kind, AttributeKind::ListNested(_)));
        assert!(schema.attribute("spec.exporters.type").unwrap().required);

        let env = schema.attribute("spec.agent.ebpf.debug.env").unwrap();
        assert_eq!(env.kind, AttributeKind::Map(crate::ElementType::String));
    }

    #[test]
    fn test_flow_metric_schema() {
        let response = ManifestDataSource::<FlowMetric>::new().schema();
        assert!(response.diagnostics.is_empty(), "{}", response.diagnostics);
        assert!(validate_implementation(&response.schema).is_empty());
        assert!(response.schema.attribute("metadata.namespace").unwrap().required);
        assert!(response.schema.attribute("spec.type").unwrap().required);
    }

    #[test]
    fn test_metadata_type_name() {
        let response = ManifestDataSource::<FlowCollector>::new().metadata(&MetadataRequest {
            provider_type_name: "k8s".to_string(),
        });
        assert_eq!(
            response.type_name,
            "k8s_flows_netobserv_io_flow_collector_v1beta1_manifest"
        );
    }

    #[test]
    fn test_read_sets_yaml() {
        let config = json!({ "metadata": { "name": "my-flow" } });
        let response = ManifestDataSource::<FlowCollector>::new().read(&ReadRequest {
            config: config.clone(),
        });
        assert!(response.diagnostics.is_empty(), "{}", response.diagnostics);

        let state = response.state.unwrap();
        assert_eq!(state["metadata"], config["metadata"]);
        assert_eq!(
            state["yaml"],
            "apiVersion: flows.netobserv.io/v1beta1\nkind: FlowCollector\nmetadata:\n  name: my-flow\n"
        );
    }

    #[test]
    fn test_read_reports_decode_failure() {
        let response = ManifestDataSource::<FlowCollector>::new().read(&ReadRequest {
            config: json!({ "spec": { "namespace": "netobserv" } }),
        });
        assert!(response.state.is_none());
        assert_eq!(response.diagnostics.len(), 1);
        assert_eq!(
            response.diagnostics.iter().next().unwrap().summary,
            "Unable to decode configuration"
        );
    }

    #[test]
    fn test_read_rejects_non_object_configuration() {
        let response = ManifestDataSource::<FlowMetric>::new().read(&ReadRequest {
            config: json!(["metadata"]),
        });
        assert!(response.state.is_none());
        let diagnostic = response.diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.summary, "Unable to decode configuration");
        assert_eq!(
            diagnostic.detail,
            "Invalid configuration: the configuration must be an object"
        );
    }

    #[test]
    fn test_decode_namespaced_kind() {
        let schema = ManifestDataSource::<FlowMetric>::build_schema().unwrap();
        let data = ManifestDataSource::<FlowMetric>::decode(
            &schema,
            &json!({
                "metadata": { "name": "egress", "namespace": "netobserv" },
                "spec": { "type": "Counter", "metric_name": "egress_bytes_total" }
            }),
        )
        .unwrap();
        assert_eq!(data.metadata.namespace.as_deref(), Some("netobserv"));
        assert_eq!(
            data.spec.unwrap().metric_name.as_deref(),
            Some("egress_bytes_total")
        );
    }
}
