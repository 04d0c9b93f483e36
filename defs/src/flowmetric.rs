use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ManifestKind;

/// FlowMetricSpec defines a custom metric generated from flow logs.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[kube(
    group = "flows.netobserv.io",
    version = "v1alpha1",
    kind = "FlowMetric",
    plural = "flowmetrics",
    namespaced,
    doc = "FlowMetric is the API allowing to create custom metrics from the collected flow logs."
)]
#[serde(rename_all = "camelCase")]
pub struct FlowMetricSpec {
    /// Name of the metric in Prometheus. It is automatically prefixed with netobserv_.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(regex(pattern = r"^[a-zA-Z_][a-zA-Z0-9:_]*$"))]
    pub metric_name: Option<String>,

    /// Metric type: Counter or Histogram.
    #[serde(rename = "type")]
    pub type_: FlowMetricType,

    /// Flow field that must be used as a value for this metric. Must be numeric. Counts flows when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_field: Option<String>,

    /// Filters to apply on flows; only flows matching all filters are counted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<MetricFilter>>,

    /// List of fields that should be used as Prometheus labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,

    /// Filter flows by direction: Any, Egress or Ingress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<FlowDirection>,

    /// Buckets of a Histogram metric, as decimal strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buckets: Option<Vec<String>>,

    /// Number by which the metric value is divided, for unit conversion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divider: Option<String>,

    /// Count duplicated flows, which are flows seen on several interfaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_duplicates: Option<bool>,
}

impl ManifestKind for FlowMetric {
    type Spec = FlowMetricSpec;
    const DESCRIPTION: &'static str =
        "FlowMetric is the API allowing to create custom metrics from the collected flow logs.";
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum FlowMetricType {
    Counter,
    Histogram,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum FlowDirection {
    Any,
    Egress,
    Ingress,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum MatchType {
    Equal,
    NotEqual,
    Presence,
    Absence,
    MatchRegex,
    NotMatchRegex,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricFilter {
    /// Name of the field to filter on.
    #[schemars(length(min = 1))]
    pub field: String,

    /// Value to filter on. Ignored for Presence and Absence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Type of matching to apply. Defaults to Equal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<MatchType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_spec_wire_format() {
        let spec = FlowMetricSpec {
            metric_name: Some("cluster_egress_bytes_total".to_string()),
            type_: FlowMetricType::Counter,
            value_field: Some("Bytes".to_string()),
            filters: Some(vec![MetricFilter {
                field: "FlowDirection".to_string(),
                value: Some("1|2".to_string()),
                match_type: Some(MatchType::MatchRegex),
            }]),
            labels: None,
            direction: None,
            buckets: None,
            divider: None,
            include_duplicates: None,
        };
        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            serde_json::json!({
                "metricName": "cluster_egress_bytes_total",
                "type": "Counter",
                "valueField": "Bytes",
                "filters": [
                    { "field": "FlowDirection", "value": "1|2", "matchType": "MatchRegex" }
                ]
            })
        );
    }
}
