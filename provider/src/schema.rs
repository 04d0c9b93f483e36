use std::collections::BTreeMap;

use serde::Serialize;

use crate::Validator;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    String,
    Int64,
    Float64,
    Bool,
}

impl ElementType {
    pub fn type_name(&self) -> &'static str {
        match self {
            ElementType::String => "string",
            ElementType::Int64 => "int64",
            ElementType::Float64 => "float64",
            ElementType::Bool => "bool",
        }
    }

    pub fn matches(&self, value: &serde_json::Value) -> bool {
        match self {
            ElementType::String => value.is_string(),
            ElementType::Int64 => value.as_i64().is_some(),
            ElementType::Float64 => value.is_number(),
            ElementType::Bool => value.is_boolean(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    String,
    Int64,
    Float64,
    Bool,
    List(ElementType),
    Map(ElementType),
    SingleNested(BTreeMap<String, Attribute>),
    ListNested(BTreeMap<String, Attribute>),
}

impl AttributeKind {
    pub fn type_name(&self) -> String {
        match self {
            AttributeKind::String => "string".to_string(),
            AttributeKind::Int64 => "int64".to_string(),
            AttributeKind::Float64 => "float64".to_string(),
            AttributeKind::Bool => "bool".to_string(),
            AttributeKind::List(element) => format!("list({})", element.type_name()),
            AttributeKind::Map(element) => format!("map({})", element.type_name()),
            AttributeKind::SingleNested(_) => "object".to_string(),
            AttributeKind::ListNested(_) => "list(object)".to_string(),
        }
    }

    pub fn nested_attributes(&self) -> Option<&BTreeMap<String, Attribute>> {
        match self {
            AttributeKind::SingleNested(attributes) | AttributeKind::ListNested(attributes) => {
                Some(attributes)
            }
            _ => None,
        }
    }
}

/// One attribute of a data source schema.
///
/// `field` is the key the value is written under in the rendered manifest,
/// while the attribute name (the key in the parent map) is what users write
/// in their configuration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub kind: AttributeKind,
    pub field: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub computed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

impl Attribute {
    pub fn new(kind: AttributeKind, field: &str) -> Self {
        Attribute {
            kind,
            field: field.to_string(),
            description: String::new(),
            required: false,
            optional: false,
            computed: false,
            validators: vec![],
        }
    }

    pub fn string(field: &str) -> Self {
        Attribute::new(AttributeKind::String, field)
    }

    pub fn map(element: ElementType, field: &str) -> Self {
        Attribute::new(AttributeKind::Map(element), field)
    }

    pub fn single_nested(attributes: BTreeMap<String, Attribute>, field: &str) -> Self {
        Attribute::new(AttributeKind::SingleNested(attributes), field)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self.optional = false;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self.required = false;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_validators(mut self, validators: Vec<Validator>) -> Self {
        self.validators = validators;
        self
    }

    /// Computed attributes that users cannot set.
    pub fn is_read_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Schema {
    pub description: String,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    /// Looks up an attribute by its dotted name, e.g. `spec.processor.port`.
    /// List nested attributes are traversed without an index.
    pub fn attribute(&self, dotted: &str) -> Option<&Attribute> {
        let mut parts = dotted.split('.');
        let mut current = self.attributes.get(parts.next()?)?;
        for part in parts {
            current = current.kind.nested_attributes()?.get(part)?;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn schema() -> Schema {
        let mut processor = BTreeMap::new();
        processor.insert(
            "port".to_string(),
            Attribute::new(AttributeKind::Int64, "port").optional(),
        );
        let mut spec = BTreeMap::new();
        spec.insert(
            "processor".to_string(),
            Attribute::single_nested(processor, "processor").optional(),
        );
        let mut attributes = BTreeMap::new();
        attributes.insert(
            "spec".to_string(),
            Attribute::single_nested(spec, "spec").optional(),
        );
        attributes.insert("yaml".to_string(), Attribute::string("yaml").computed());
        Schema {
            description: "test".to_string(),
            attributes,
        }
    }

    #[test]
    fn test_attribute_lookup() {
        let schema = schema();
        let port = schema.attribute("spec.processor.port").unwrap();
        assert_eq!(port.kind, AttributeKind::Int64);
        assert!(schema.attribute("spec.processor.missing").is_none());
        assert!(schema.attribute("yaml.nested").is_none());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(AttributeKind::List(ElementType::String).type_name(), "list(string)");
        assert_eq!(AttributeKind::Map(ElementType::Int64).type_name(), "map(int64)");
        assert_eq!(AttributeKind::ListNested(BTreeMap::new()).type_name(), "list(object)");
    }

    #[test]
    fn test_read_only() {
        assert!(Attribute::string("yaml").computed().is_read_only());
        assert!(!Attribute::string("yaml").optional().computed().is_read_only());
    }
}
