use std::collections::BTreeMap;

use crate::{name_validators, namespace_validators, Attribute, ElementType, Validator};

/// The `metadata` attribute shared by every manifest data source. Only
/// namespaced kinds get a `namespace` attribute.
pub fn metadata_attribute(namespaced: bool) -> Attribute {
    let mut attributes = BTreeMap::new();

    attributes.insert(
        "name".to_string(),
        Attribute::string("name")
            .required()
            .with_description("Unique name for this object. Must be a valid DNS subdomain name.")
            .with_validators(name_validators()),
    );

    if namespaced {
        attributes.insert(
            "namespace".to_string(),
            Attribute::string("namespace")
                .required()
                .with_description("Namespace of this object. Must be a valid DNS label.")
                .with_validators(namespace_validators()),
        );
    }

    attributes.insert(
        "labels".to_string(),
        Attribute::map(ElementType::String, "labels")
            .optional()
            .with_description(
                "Keys and values that can be used to organize and categorize objects.",
            )
            .with_validators(vec![Validator::LabelMap]),
    );

    attributes.insert(
        "annotations".to_string(),
        Attribute::map(ElementType::String, "annotations")
            .optional()
            .with_description(
                "Keys and values that can be used by external tooling to store and retrieve arbitrary metadata about this object.",
            )
            .with_validators(vec![Validator::AnnotationMap]),
    );

    Attribute::single_nested(attributes, "metadata")
        .required()
        .with_description("Data that helps uniquely identify this object.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cluster_scoped_metadata() {
        let metadata = metadata_attribute(false);
        let attributes = metadata.kind.nested_attributes().unwrap();
        assert_eq!(
            attributes.keys().cloned().collect::<Vec<_>>(),
            vec!["annotations", "labels", "name"]
        );
        assert!(metadata.required);
        assert!(attributes["name"].required);
    }

    #[test]
    fn test_namespaced_metadata() {
        let metadata = metadata_attribute(true);
        let attributes = metadata.kind.nested_attributes().unwrap();
        assert!(attributes["namespace"].required);
        assert_eq!(attributes["namespace"].validators, namespace_validators());
    }
}
