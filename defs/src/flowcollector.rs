use std::collections::BTreeMap;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ManifestKind;

/// FlowCollectorSpec defines the desired state of the network flows collection pipeline.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[kube(
    group = "flows.netobserv.io",
    version = "v1beta1",
    kind = "FlowCollector",
    plural = "flowcollectors",
    doc = "FlowCollector is the schema for the network flows collection API, which pilots and configures the underlying deployments."
)]
#[serde(rename_all = "camelCase")]
pub struct FlowCollectorSpec {
    /// Namespace where NetObserv pods are deployed. Defaults to netobserv.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Agent configuration for flows extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<FlowCollectorAgent>,

    /// Settings of the flowlogs-pipeline component, which collects and enriches the flows and produces metrics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processor: Option<FlowCollectorFlp>,

    /// Settings related to the Loki client, used as a flow store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loki: Option<FlowCollectorLoki>,

    /// Settings related to the OpenShift Console plugin, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console_plugin: Option<FlowCollectorConsolePlugin>,

    /// Deployment model to use: DIRECT sends flows straight to the processor, KAFKA goes through a Kafka pipeline first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_model: Option<DeploymentModel>,

    /// Kafka configuration, used when deploymentModel is KAFKA.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kafka: Option<FlowCollectorKafka>,

    /// Additional optional exporters for custom consumption or storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exporters: Option<Vec<FlowCollectorExporter>>,
}

impl ManifestKind for FlowCollector {
    type Spec = FlowCollectorSpec;
    const DESCRIPTION: &'static str =
        "FlowCollector is the schema for the network flows collection API, which pilots and configures the underlying deployments.";
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum DeploymentModel {
    #[serde(rename = "DIRECT")]
    Direct,
    #[serde(rename = "KAFKA")]
    Kafka,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum AgentType {
    #[serde(rename = "EBPF")]
    Ebpf,
    #[serde(rename = "IPFIX")]
    Ipfix,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum ImagePullPolicy {
    IfNotPresent,
    Always,
    Never,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

/// Agent configuration for flows extraction.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlowCollectorAgent {
    /// Selects the flows tracing agent: EBPF (recommended) or IPFIX (legacy, OVN-Kubernetes only).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<AgentType>,

    /// Settings of the IPFIX-based flow reporter, used when type is IPFIX.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipfix: Option<FlowCollectorIpfix>,

    /// Settings of the eBPF-based flow reporter, used when type is EBPF.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ebpf: Option<FlowCollectorEbpf>,
}

/// Settings of the IPFIX-based flow reporter.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlowCollectorIpfix {
    /// Max period during which the reporter aggregates flows before sending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(regex(pattern = r"^\d+(ns|ms|s|m)?$"))]
    pub cache_active_timeout: Option<String>,

    /// Max number of flows in an aggregate; when reached, the reporter sends the flows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub cache_max_flows: Option<i64>,

    /// Sampling rate on the reporter. 100 means one flow on 100 is sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 2))]
    pub sampling: Option<i64>,

    /// Forces sampling of all packets, bypassing the minimal sampling rate. Not recommended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_sample_all: Option<bool>,

    /// Cluster Network Operator configuration, when used by the IPFIX agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_network_operator: Option<ClusterNetworkOperatorConfig>,

    /// OVN-Kubernetes configuration, when used by the IPFIX agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ovn_kubernetes: Option<OvnKubernetesConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterNetworkOperatorConfig {
    /// Namespace where the config map is going to be deployed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OvnKubernetesConfig {
    /// Namespace where OVN-Kubernetes pods are deployed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Name of the OVN-Kubernetes daemon set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daemon_set_name: Option<String>,

    /// Name of the container to configure for IPFIX.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum AgentFeature {
    PacketDrop,
    #[serde(rename = "DNSTracking")]
    DnsTracking,
    #[serde(rename = "FlowRTT")]
    FlowRtt,
}

/// Settings of the eBPF-based flow reporter.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlowCollectorEbpf {
    /// Kubernetes pull policy for the image defined above.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<ImagePullPolicy>,

    /// Compute resources required by this container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// Sampling rate of the flow reporter. 100 means one flow on 100 is sent. 0 or 1 means all flows are sampled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub sampling: Option<i64>,

    /// Max period during which the reporter aggregates flows before sending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(regex(pattern = r"^\d+(ns|ms|s|m)?$"))]
    pub cache_active_timeout: Option<String>,

    /// Max number of flows in an aggregate; when reached, the reporter sends the flows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub cache_max_flows: Option<i64>,

    /// Interface names from where flows are collected. If empty, the agent fetches all the interfaces in the system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interfaces: Option<Vec<String>>,

    /// Interface names that are excluded from flow tracing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_interfaces: Option<Vec<String>>,

    /// Log level for the NetObserv eBPF Agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,

    /// Privileged mode for the eBPF Agent container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privileged: Option<bool>,

    /// Limits the maximum size of a request in bytes before being sent to a partition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub kafka_batch_size: Option<i64>,

    /// Internal development options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugConfig>,

    /// Additional features to enable in the eBPF agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<AgentFeature>>,
}

/// Compute resource requirements, as quantities keyed by resource name.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequirements {
    /// Maximum amount of compute resources allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<BTreeMap<String, String>>,

    /// Minimum amount of compute resources required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests: Option<BTreeMap<String, String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DebugConfig {
    /// Environment variables passed to the component, for advanced tuning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,
}

/// Kafka configuration, such as the address and topic, to send enriched flows to.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlowCollectorKafka {
    /// Address of the Kafka server.
    pub address: String,

    /// Kafka topic to use. It must exist; NetObserv does not create it.
    pub topic: String,

    /// TLS client configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<ClientTls>,

    /// SASL authentication configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sasl: Option<SaslConfig>,
}

/// TLS client configuration.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientTls {
    /// Enable TLS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,

    /// Skip client-side verification of the server certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure_skip_verify: Option<bool>,

    /// Reference to the certificate authority file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<CertificateReference>,

    /// Reference to the user certificate file, for mTLS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_cert: Option<CertificateReference>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MountableType {
    Configmap,
    Secret,
}

/// A certificate stored in a config map or a secret.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateReference {
    /// Type of the certificate reference: configmap or secret.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<MountableType>,

    /// Name of the config map or secret containing certificates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Namespace of the config map or secret. If omitted, the same namespace as NetObserv is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Path to the certificate file name within the config map or secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_file: Option<String>,

    /// Path to the private key file name within the config map or secret. Omit when the key is not necessary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_key: Option<String>,
}

/// A file stored in a config map or a secret.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileReference {
    /// Type of the file reference: configmap or secret.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<MountableType>,

    /// Name of the config map or secret containing the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Namespace of the config map or secret containing the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// File name within the config map or secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum SaslType {
    #[serde(rename = "DISABLED")]
    Disabled,
    #[serde(rename = "PLAIN")]
    Plain,
    #[serde(rename = "SCRAM-SHA512")]
    ScramSha512,
}

/// SASL authentication configuration.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaslConfig {
    /// Type of SASL authentication to use, or DISABLED if SASL is not used.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<SaslType>,

    /// Reference to the secret or config map containing the client ID.
    #[serde(
        rename = "clientIDReference",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub client_id_reference: Option<FileReference>,

    /// Reference to the secret or config map containing the client secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret_reference: Option<FileReference>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogTypes {
    Flows,
    Conversations,
    EndedConversations,
    All,
}

/// Settings of the flowlogs-pipeline component.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlowCollectorFlp {
    /// Port of the flow collector (host port). By convention, some values are forbidden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1025, max = 65535))]
    pub port: Option<i64>,

    /// Collector HTTP port in the flow collector pod that serves the health check API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 65535))]
    pub health_port: Option<i64>,

    /// Internal port for the Go pprof profiler listening on localhost. 0 disables it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 65535))]
    pub profile_port: Option<i64>,

    /// Kubernetes pull policy for the image defined above.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<ImagePullPolicy>,

    /// Compute resources required by this container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// Log level of the processor runtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,

    /// Enable or disable the liveness and readiness probes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_kube_probes: Option<bool>,

    /// Drop fields that are known to be unused by OVS, to save storage space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_unused_fields: Option<bool>,

    /// Number of replicas (pods) to start for flowlogs-pipeline-transformer, which consumes Kafka messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub kafka_consumer_replicas: Option<i64>,

    /// Horizontal pod autoscaler for flowlogs-pipeline-transformer, which consumes Kafka messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kafka_consumer_autoscaler: Option<FlowCollectorHpa>,

    /// Capacity of the internal buffer used in the Kafka consumer client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kafka_consumer_queue_capacity: Option<i64>,

    /// Maximum batch size, in bytes, that the Kafka consumer accepts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kafka_consumer_batch_size: Option<i64>,

    /// Record types to generate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_types: Option<LogTypes>,

    /// Time to wait between "tick" events of a conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_heartbeat_interval: Option<String>,

    /// Time to wait after a network flow is received, to consider the conversation ended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_end_timeout: Option<String>,

    /// Time to wait from a detected FIN flag to end a conversation. Only relevant for TCP flows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_terminating_timeout: Option<String>,

    /// Name of the cluster, used in multi-cluster deployments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,

    /// Enable the multi-cluster feature, which adds a clusterName label to flows data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_cluster_deployment: Option<bool>,

    /// Add availability zone information to flows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_zone: Option<bool>,

    /// Processor Prometheus metrics configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<FlowCollectorFlpMetrics>,

    /// Internal development options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugConfig>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum FlpAlert {
    NetObservNoFlows,
    NetObservLokiError,
}

/// Processor Prometheus metrics configuration.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlowCollectorFlpMetrics {
    /// Prometheus scraper endpoint configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<MetricsServerConfig>,

    /// List of tags to specify which metrics to ignore.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_tags: Option<Vec<String>>,

    /// List of alerts that should be disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_alerts: Option<Vec<FlpAlert>>,
}

/// Metrics server endpoint configuration for the Prometheus scraper.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsServerConfig {
    /// Prometheus HTTP port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 65535))]
    pub port: Option<i64>,

    /// TLS configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<ServerTls>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerTlsType {
    Disabled,
    Provided,
    Auto,
}

/// TLS configuration of a server endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerTls {
    /// Select the type of TLS configuration: DISABLED, PROVIDED or AUTO.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<ServerTlsType>,

    /// TLS configuration when type is PROVIDED.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provided: Option<CertificateReference>,

    /// Skip client-side verification of the provided certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure_skip_verify: Option<bool>,

    /// Reference to the CA file when type is PROVIDED.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provided_ca_file: Option<FileReference>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HpaStatus {
    Disabled,
    Enabled,
}

/// Horizontal pod autoscaler settings.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlowCollectorHpa {
    /// DISABLED does not deploy a horizontal pod autoscaler, ENABLED deploys one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<HpaStatus>,

    /// Lower limit for the number of replicas to which the autoscaler can scale down.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub min_replicas: Option<i64>,

    /// Upper limit for the number of pods that can be set by the autoscaler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub max_replicas: Option<i64>,

    /// Specifications used to calculate the desired replica count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<HpaMetric>>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum MetricSourceType {
    Resource,
    Pods,
    Object,
    External,
    ContainerResource,
}

/// One metric of a horizontal pod autoscaler.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HpaMetric {
    /// Type of metric source.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<MetricSourceType>,

    /// Resource metric known to Kubernetes, such as cpu or memory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceMetricSource>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetricSource {
    /// Name of the resource in question.
    pub name: String,

    /// Target value for the given metric.
    pub target: MetricTarget,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum MetricTargetType {
    Utilization,
    Value,
    AverageValue,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricTarget {
    /// Whether the metric type is Utilization, Value, or AverageValue.
    #[serde(rename = "type")]
    pub type_: MetricTargetType,

    /// Target value of the resource metric as a percentage of the requested value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_utilization: Option<i64>,

    /// Target value of the average of the metric across all relevant pods, as a quantity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_value: Option<String>,

    /// Target value of the metric, as a quantity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Default for MetricTarget {
    fn default() -> Self {
        MetricTarget {
            type_: MetricTargetType::Utilization,
            average_utilization: None,
            average_value: None,
            value: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LokiAuthToken {
    Disabled,
    Host,
    Forward,
}

/// Settings related to the Loki client.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlowCollectorLoki {
    /// Set to true to store flows in Loki.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,

    /// Address of an existing Loki service to push the flows to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Address of the Loki query frontend, when it differs from url.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub querier_url: Option<String>,

    /// Address of the Loki ready, metrics and config endpoints, when it differs from querierUrl.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_url: Option<String>,

    /// Loki X-Scope-OrgID that identifies the tenant for each request.
    #[serde(rename = "tenantID", default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// Authentication token mode: DISABLED, HOST or FORWARD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<LokiAuthToken>,

    /// Maximum time to wait before sending a batch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_wait: Option<String>,

    /// Maximum batch size, in bytes, to accumulate before sending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub batch_size: Option<i64>,

    /// Maximum time connection or request limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// Initial backoff time for client connection between retries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_backoff: Option<String>,

    /// Maximum backoff time for client connection between retries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_backoff: Option<String>,

    /// Maximum number of retries for client connections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub max_retries: Option<i64>,

    /// Map of common labels to set on each flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_labels: Option<BTreeMap<String, String>>,

    /// TLS client configuration for Loki URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<ClientTls>,

    /// TLS client configuration for Loki status URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_tls: Option<ClientTls>,
}

/// Settings related to the console plugin.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlowCollectorConsolePlugin {
    /// Enable the console plugin deployment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,

    /// Automatically register the provided console plugin with the OpenShift Console operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub register: Option<bool>,

    /// Number of replicas (pods) to start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub replicas: Option<i64>,

    /// Port of the plugin service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 65535))]
    pub port: Option<i64>,

    /// Kubernetes pull policy for the image defined above.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<ImagePullPolicy>,

    /// Compute resources required by this container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// Log level for the console plugin backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,

    /// Horizontal pod autoscaler configuration for the plugin deployment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscaler: Option<FlowCollectorHpa>,

    /// Port naming configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_naming: Option<ConsolePluginPortConfig>,

    /// Quick filters configuration for the console plugin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_filters: Option<Vec<QuickFilter>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsolePluginPortConfig {
    /// Enable the console plugin port-to-service name translation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,

    /// Additional port name to use in the console, for example 3100: loki.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_names: Option<BTreeMap<String, String>>,
}

/// A preset filter shown in the console plugin.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuickFilter {
    /// Name of the filter, displayed in the console.
    pub name: String,

    /// Set of keys and values to be set when this filter is selected.
    pub filter: BTreeMap<String, String>,

    /// Whether this filter should be active by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExporterType {
    Kafka,
    Ipfix,
}

/// An additional exporter to send enriched flows to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlowCollectorExporter {
    /// Type of exporter: KAFKA or IPFIX.
    #[serde(rename = "type")]
    pub type_: ExporterType,

    /// Kafka configuration, such as the address and topic, to send enriched flows to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kafka: Option<FlowCollectorKafka>,

    /// IPFIX configuration, such as the IP address and port to send enriched IPFIX flows to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipfix: Option<FlowCollectorIpfixReceiver>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IpfixTransport {
    Tcp,
    Udp,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlowCollectorIpfixReceiver {
    /// Address of the IPFIX external receiver.
    pub target_host: String,

    /// Port for the IPFIX external receiver.
    #[schemars(range(min = 1, max = 65535))]
    pub target_port: i64,

    /// Transport protocol used for IPFIX connections. Defaults to TCP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<IpfixTransport>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_value(SaslType::ScramSha512).unwrap(), "SCRAM-SHA512");
        assert_eq!(serde_json::to_value(LogTypes::EndedConversations).unwrap(), "ENDED_CONVERSATIONS");
        assert_eq!(serde_json::to_value(AgentFeature::DnsTracking).unwrap(), "DNSTracking");
        assert_eq!(serde_json::to_value(MountableType::Configmap).unwrap(), "configmap");
        assert_eq!(serde_json::to_value(ImagePullPolicy::IfNotPresent).unwrap(), "IfNotPresent");
    }

    #[test]
    fn test_field_wire_names() {
        let loki = FlowCollectorLoki {
            tenant_id: Some("netobserv".to_string()),
            querier_url: Some("http://loki-query:3100/".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&loki).unwrap(),
            serde_json::json!({
                "tenantID": "netobserv",
                "querierUrl": "http://loki-query:3100/",
            })
        );

        let sasl = SaslConfig {
            client_id_reference: Some(FileReference::default()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&sasl).unwrap(),
            serde_json::json!({ "clientIDReference": {} })
        );
    }

    #[test]
    fn test_spec_deserializes_from_manifest() {
        let spec: FlowCollectorSpec = serde_yaml::from_str(
            r#"
namespace: netobserv
deploymentModel: DIRECT
agent:
  type: EBPF
  ebpf:
    sampling: 50
    features:
      - PacketDrop
      - FlowRTT
processor:
  port: 2055
  logTypes: FLOWS
exporters:
  - type: IPFIX
    ipfix:
      targetHost: collector.example.com
      targetPort: 4739
"#,
        )
        .unwrap();

        assert_eq!(spec.deployment_model, Some(DeploymentModel::Direct));
        let ebpf = spec.agent.unwrap().ebpf.unwrap();
        assert_eq!(ebpf.sampling, Some(50));
        assert_eq!(
            ebpf.features,
            Some(vec![AgentFeature::PacketDrop, AgentFeature::FlowRtt])
        );
        let exporters = spec.exporters.unwrap();
        assert_eq!(exporters[0].type_, ExporterType::Ipfix);
        assert_eq!(exporters[0].ipfix.as_ref().unwrap().target_port, 4739);
    }
}
