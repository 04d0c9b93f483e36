mod errors;
mod flowcollector;
mod flowmetric;
mod kind;
mod manifest;
mod metadata;

pub use errors::ManifestError;
pub use flowcollector::{
    AgentFeature, AgentType, CertificateReference, ClientTls, ClusterNetworkOperatorConfig,
    ConsolePluginPortConfig, DebugConfig, DeploymentModel, ExporterType, FileReference,
    FlowCollector, FlowCollectorAgent, FlowCollectorConsolePlugin, FlowCollectorEbpf,
    FlowCollectorExporter, FlowCollectorFlp, FlowCollectorFlpMetrics, FlowCollectorHpa,
    FlowCollectorIpfix, FlowCollectorIpfixReceiver, FlowCollectorKafka, FlowCollectorLoki,
    FlowCollectorSpec, FlpAlert, HpaMetric, HpaStatus, ImagePullPolicy, IpfixTransport, LogLevel,
    LogTypes, LokiAuthToken, MetricSourceType, MetricTarget, MetricTargetType,
    MetricsServerConfig, MountableType, OvnKubernetesConfig, QuickFilter, ResourceMetricSource,
    ResourceRequirements, SaslConfig, SaslType, ServerTls, ServerTlsType,
};
pub use flowmetric::{
    FlowDirection, FlowMetric, FlowMetricSpec, FlowMetricType, MatchType, MetricFilter,
};
pub use kind::ManifestKind;
pub use manifest::{Manifest, ManifestData};
pub use metadata::ManifestMetadata;
