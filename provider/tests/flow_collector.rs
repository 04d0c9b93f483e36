use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use manifest_defs::{
    AgentType, DeploymentModel, ExporterType, FlowCollector, FlowCollectorSpec, Manifest,
    ManifestKind,
};
use manifest_utils::validate_manifest;
use terraform_provider_k8s::{
    validate_config, validate_implementation, DataSource, K8sProvider, ManifestDataSource,
    ReadRequest, RenderError,
};

const DATA_SOURCE: &str = "k8s_flows_netobserv_io_flow_collector_v1beta1_manifest";

fn render(config: Value) -> Result<String, RenderError> {
    K8sProvider::default().render(DATA_SOURCE, &config)
}

fn full_config() -> Value {
    json!({
        "metadata": {
            "name": "cluster",
            "labels": { "app.kubernetes.io/part-of": "netobserv" },
            "annotations": { "netobserv.io/owner": "platform-team" }
        },
        "spec": {
            "namespace": "netobserv",
            "deployment_model": "KAFKA",
            "agent": {
                "type": "EBPF",
                "ebpf": {
                    "sampling": 50,
                    "cache_active_timeout": "5s",
                    "interfaces": ["eth0", "br-ex"],
                    "features": ["PacketDrop", "FlowRTT"],
                    "debug": { "env": { "GOGC": "400" } }
                }
            },
            "processor": {
                "port": 2055,
                "log_level": "info",
                "metrics": { "server": { "port": 9102 } }
            },
            "kafka": {
                "address": "kafka-cluster-kafka-bootstrap.netobserv",
                "topic": "network-flows",
                "sasl": {
                    "type": "SCRAM-SHA512",
                    "client_id_reference": { "type": "secret", "name": "kafka-creds", "file": "id" }
                }
            },
            "loki": {
                "enable": true,
                "url": "http://loki:3100/",
                "tenant_id": "netobserv",
                "static_labels": { "app": "netobserv-flowcollector" }
            },
            "exporters": [
                {
                    "type": "IPFIX",
                    "ipfix": { "target_host": "ipfix-collector.ipfix.svc", "target_port": 4739, "transport": "UDP" }
                }
            ]
        }
    })
}

#[test]
fn test_schema_is_valid() {
    let response = ManifestDataSource::<FlowCollector>::new().schema();
    assert!(response.diagnostics.is_empty(), "{}", response.diagnostics);

    let implementation = validate_implementation(&response.schema);
    assert!(implementation.is_empty(), "{}", implementation);
}

#[test]
fn test_my_flow_without_namespace() {
    let yaml = render(json!({ "metadata": { "name": "my-flow" } })).unwrap();

    assert!(yaml.contains("apiVersion: flows.netobserv.io/v1beta1"));
    assert!(yaml.contains("kind: FlowCollector"));
    assert!(yaml.contains("name: my-flow"));
    assert!(!yaml.contains("namespace"));
    assert!(!yaml.contains("spec"));
}

#[test]
fn test_full_config_round_trip() {
    let config = full_config();
    let diagnostics = validate_config(
        &ManifestDataSource::<FlowCollector>::build_schema().unwrap(),
        &config,
    );
    assert!(diagnostics.is_empty(), "{}", diagnostics);

    let yaml = render(config).unwrap();
    let manifest: Manifest<FlowCollectorSpec> = serde_yaml::from_str(&yaml).unwrap();

    assert_eq!(manifest.api_version, "flows.netobserv.io/v1beta1");
    assert_eq!(manifest.kind, "FlowCollector");
    assert_eq!(manifest.metadata.name, "cluster");
    assert_eq!(manifest.metadata.namespace, None);
    assert_eq!(
        manifest.metadata.labels.get("app.kubernetes.io/part-of").map(String::as_str),
        Some("netobserv")
    );

    let spec = manifest.spec.clone().unwrap();
    assert_eq!(spec.deployment_model, Some(DeploymentModel::Kafka));
    let agent = spec.agent.unwrap();
    assert_eq!(agent.type_, Some(AgentType::Ebpf));
    let ebpf = agent.ebpf.unwrap();
    assert_eq!(ebpf.sampling, Some(50));
    assert_eq!(ebpf.interfaces, Some(vec!["eth0".to_string(), "br-ex".to_string()]));
    assert_eq!(spec.processor.unwrap().port, Some(2055));
    assert_eq!(spec.loki.unwrap().tenant_id.as_deref(), Some("netobserv"));
    let exporters = spec.exporters.unwrap();
    assert_eq!(exporters.len(), 1);
    assert_eq!(exporters[0].type_, ExporterType::Ipfix);
    assert_eq!(exporters[0].ipfix.as_ref().unwrap().target_port, 4739);

    let again = manifest.to_yaml().unwrap();
    assert_eq!(again, yaml);
}

#[test]
fn test_rendered_keys_use_manifest_names() {
    let yaml = render(full_config()).unwrap();

    assert!(yaml.contains("deploymentModel: KAFKA"));
    assert!(yaml.contains("tenantID: netobserv"));
    assert!(yaml.contains("clientIDReference:"));
    assert!(yaml.contains("targetPort: 4739"));
    assert!(yaml.contains("type: SCRAM-SHA512"));
    assert!(!yaml.contains("tenant_id"));
    assert!(!yaml.contains("deployment_model"));
}

#[test]
fn test_rendered_manifest_matches_crd_schema() {
    let yaml = render(full_config()).unwrap();
    let openapi = serde_json::to_value(FlowCollector::openapi_schema().unwrap()).unwrap();

    if let Err(errors) = validate_manifest(&yaml, &openapi) {
        panic!("manifest does not match the CRD schema: {:?}", errors);
    }
}

#[test]
fn test_port_bounds() {
    let config = |port: i64| {
        json!({ "metadata": { "name": "my-flow" }, "spec": { "processor": { "port": port } } })
    };

    assert!(render(config(65535)).unwrap().contains("port: 65535"));

    let Err(RenderError::Diagnostics(diagnostics)) = render(config(65536)) else {
        panic!("port 65536 must be rejected");
    };
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.iter().next().unwrap().detail,
        "Attribute spec.processor.port value must be between 1025 and 65535, got: 65536"
    );
}

#[test]
fn test_sampling_zero_is_accepted() {
    let yaml = render(json!({
        "metadata": { "name": "my-flow" },
        "spec": { "agent": { "ebpf": { "sampling": 0 } } }
    }))
    .unwrap();
    assert!(yaml.contains("sampling: 0"));
}

#[test]
fn test_invalid_enum_and_timeout() {
    let Err(RenderError::Diagnostics(diagnostics)) = render(json!({
        "metadata": { "name": "my-flow" },
        "spec": {
            "deployment_model": "DIRECTLY",
            "agent": { "ebpf": { "cache_active_timeout": "five seconds" } }
        }
    })) else {
        panic!("invalid values must be rejected");
    };
    let summaries: Vec<&str> = diagnostics.iter().map(|d| d.summary.as_str()).collect();
    assert_eq!(
        summaries,
        vec!["Invalid Attribute Value Match", "Invalid Attribute Value Match"]
    );
}

#[test]
fn test_invalid_metadata_name() {
    let Err(RenderError::Diagnostics(diagnostics)) =
        render(json!({ "metadata": { "name": "My_Flow" } }))
    else {
        panic!("invalid names must be rejected");
    };
    assert!(diagnostics.has_error());
}

#[test]
fn test_missing_metadata() {
    let Err(RenderError::Diagnostics(diagnostics)) = render(json!({ "spec": {} })) else {
        panic!("metadata is required");
    };
    assert_eq!(
        diagnostics.iter().next().unwrap().detail,
        "The argument \"metadata\" is required, but no definition was found."
    );
}

#[test]
fn test_read_state_keeps_configuration() {
    let config = full_config();
    let response = ManifestDataSource::<FlowCollector>::new().read(&ReadRequest {
        config: config.clone(),
    });
    assert!(response.diagnostics.is_empty(), "{}", response.diagnostics);

    let state = response.state.unwrap();
    assert_eq!(state["spec"], config["spec"]);
    assert!(state["yaml"].as_str().unwrap().starts_with("apiVersion: "));
}
