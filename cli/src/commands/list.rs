use terraform_provider_k8s::K8sProvider;

/// One line per data source: type name and the kind it renders.
pub fn list(provider: &K8sProvider) -> String {
    let mut out = format!("{:<60} {:<20}\n", "Data source", "Kind");
    for name in provider.data_source_names() {
        let kind = provider
            .data_source(&name)
            .map(|ds| ds.kind())
            .unwrap_or_default();
        out.push_str(&format!("{:<60} {:<20}\n", name, kind));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list() {
        let out = list(&K8sProvider::new("netobserv"));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("netobserv_flows_netobserv_io_flow_collector_v1beta1_manifest"));
        assert!(lines[1].trim_end().ends_with("FlowCollector"));
        assert!(lines[2].trim_end().ends_with("FlowMetric"));
    }
}
