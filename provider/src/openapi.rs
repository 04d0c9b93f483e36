use std::collections::BTreeMap;

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::{
    JSONSchemaProps, JSONSchemaPropsOrArray, JSONSchemaPropsOrBool,
};
use log::trace;

use manifest_defs::ManifestError;
use manifest_utils::to_snake_case;

use crate::{Attribute, AttributeKind, ElementType, Validator};

/// Converts the properties of an OpenAPI v3 object schema into attributes.
///
/// Attribute names are the snake_case form of the property names; the
/// property names themselves are kept as the manifest `field`.
pub fn attributes_from_schema(
    schema: &JSONSchemaProps,
    path: &str,
) -> Result<BTreeMap<String, Attribute>, ManifestError> {
    let required = schema.required.clone().unwrap_or_default();
    let mut attributes = BTreeMap::new();

    for (field, property) in schema.properties.iter().flatten() {
        let name = to_snake_case(field);
        let property_path = format!("{}.{}", path, field);
        let attribute =
            attribute_from_schema(field, property, required.contains(field), &property_path)?;
        if attributes.insert(name.clone(), attribute).is_some() {
            return Err(ManifestError::Schema {
                path: property_path,
                message: format!("more than one property maps to the attribute name '{}'", name),
            });
        }
    }

    Ok(attributes)
}

pub fn attribute_from_schema(
    field: &str,
    schema: &JSONSchemaProps,
    required: bool,
    path: &str,
) -> Result<Attribute, ManifestError> {
    trace!("Converting schema property {}", path);
    let (kind, validators) = kind_of(schema, path)?;
    let attribute = Attribute::new(kind, field)
        .with_description(schema.description.as_deref().unwrap_or_default())
        .with_validators(validators);

    Ok(if required {
        attribute.required()
    } else {
        attribute.optional()
    })
}

fn kind_of(
    schema: &JSONSchemaProps,
    path: &str,
) -> Result<(AttributeKind, Vec<Validator>), ManifestError> {
    if schema.x_kubernetes_int_or_string == Some(true) {
        return Ok((AttributeKind::String, vec![]));
    }

    match schema.type_.as_deref() {
        Some("string") => Ok((AttributeKind::String, string_validators(schema))),
        Some("integer") => Ok((AttributeKind::Int64, integer_validators(schema))),
        Some("number") => Ok((AttributeKind::Float64, vec![])),
        Some("boolean") => Ok((AttributeKind::Bool, vec![])),
        Some("array") => {
            let items = match &schema.items {
                Some(JSONSchemaPropsOrArray::Schema(items)) => items,
                _ => return Err(unsupported(path, "arrays must declare a single items schema")),
            };
            if has_properties(items) {
                let attributes = attributes_from_schema(items, &format!("{}[]", path))?;
                Ok((AttributeKind::ListNested(attributes), vec![]))
            } else {
                let (element, element_validators) = element_of(items, path)?;
                Ok((AttributeKind::List(element), each(element_validators)))
            }
        }
        Some("object") => {
            if has_properties(schema) {
                let attributes = attributes_from_schema(schema, path)?;
                return Ok((AttributeKind::SingleNested(attributes), vec![]));
            }
            match &schema.additional_properties {
                Some(JSONSchemaPropsOrBool::Schema(values)) => {
                    let (element, element_validators) = element_of(values, path)?;
                    Ok((AttributeKind::Map(element), each(element_validators)))
                }
                _ => Ok((AttributeKind::Map(ElementType::String), vec![])),
            }
        }
        Some(other) => Err(unsupported(path, &format!("unsupported type '{}'", other))),
        None => Err(unsupported(path, "property has no type")),
    }
}

fn element_of(
    schema: &JSONSchemaProps,
    path: &str,
) -> Result<(ElementType, Vec<Validator>), ManifestError> {
    let (kind, validators) = kind_of(schema, path)?;
    let element = match kind {
        AttributeKind::String => ElementType::String,
        AttributeKind::Int64 => ElementType::Int64,
        AttributeKind::Float64 => ElementType::Float64,
        AttributeKind::Bool => ElementType::Bool,
        other => {
            return Err(unsupported(
                path,
                &format!("collections of {} are not supported", other.type_name()),
            ))
        }
    };
    Ok((element, validators))
}

fn has_properties(schema: &JSONSchemaProps) -> bool {
    schema.type_.as_deref() == Some("object")
        && schema.properties.as_ref().is_some_and(|p| !p.is_empty())
}

fn each(validators: Vec<Validator>) -> Vec<Validator> {
    if validators.is_empty() {
        vec![]
    } else {
        vec![Validator::Each { validators }]
    }
}

fn string_validators(schema: &JSONSchemaProps) -> Vec<Validator> {
    let mut validators = vec![];

    if schema.min_length.is_some() || schema.max_length.is_some() {
        validators.push(Validator::StringLength {
            min: schema.min_length.map(|v| v.max(0) as usize),
            max: schema.max_length.map(|v| v.max(0) as usize),
        });
    }

    if let Some(pattern) = &schema.pattern {
        validators.push(Validator::StringRegex {
            pattern: pattern.clone(),
            message: None,
        });
    }

    if let Some(values) = &schema.enum_ {
        // Nullable enums may list null among their values.
        let values: Vec<String> = values
            .iter()
            .filter_map(|v| v.0.as_str().map(|s| s.to_string()))
            .collect();
        if !values.is_empty() {
            validators.push(Validator::StringOneOf { values });
        }
    }

    validators
}

fn integer_validators(schema: &JSONSchemaProps) -> Vec<Validator> {
    let exclusive_min = schema.exclusive_minimum == Some(true);
    let exclusive_max = schema.exclusive_maximum == Some(true);
    let min = schema
        .minimum
        .map(|v| (v as i64).saturating_add(i64::from(exclusive_min)));
    let max = schema
        .maximum
        .map(|v| (v as i64).saturating_sub(i64::from(exclusive_max)));

    match (min, max) {
        (Some(min), Some(max)) => vec![Validator::Int64Between { min, max }],
        (Some(min), None) => vec![Validator::Int64AtLeast { min }],
        (None, Some(max)) => vec![Validator::Int64AtMost { max }],
        (None, None) => vec![],
    }
}

fn unsupported(path: &str, message: &str) -> ManifestError {
    ManifestError::Schema {
        path: path.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn props(value: serde_json::Value) -> JSONSchemaProps {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_scalar_properties() {
        let schema = props(serde_json::json!({
            "type": "object",
            "required": ["targetHost"],
            "properties": {
                "targetHost": { "type": "string", "description": "Address of the receiver." },
                "targetPort": { "type": "integer", "minimum": 1, "maximum": 65535 },
                "enable": { "type": "boolean" },
                "ratio": { "type": "number" },
                "quantity": { "x-kubernetes-int-or-string": true }
            }
        }));
        let attributes = attributes_from_schema(&schema, "spec").unwrap();

        let host = &attributes["target_host"];
        assert_eq!(host.field, "targetHost");
        assert!(host.required);
        assert_eq!(host.description, "Address of the receiver.");

        let port = &attributes["target_port"];
        assert_eq!(port.kind, AttributeKind::Int64);
        assert!(port.optional);
        assert_eq!(
            port.validators,
            vec![Validator::Int64Between { min: 1, max: 65535 }]
        );

        assert_eq!(attributes["enable"].kind, AttributeKind::Bool);
        assert_eq!(attributes["ratio"].kind, AttributeKind::Float64);
        assert_eq!(attributes["quantity"].kind, AttributeKind::String);
    }

    #[test]
    fn test_string_constraints() {
        let schema = props(serde_json::json!({
            "type": "string",
            "minLength": 1,
            "pattern": "^\\d+(ns|ms|s|m)?$",
            "enum": ["DIRECT", "KAFKA", null],
            "nullable": true
        }));
        let attribute = attribute_from_schema("deploymentModel", &schema, false, "spec").unwrap();
        assert_eq!(
            attribute.validators,
            vec![
                Validator::StringLength { min: Some(1), max: None },
                Validator::StringRegex {
                    pattern: "^\\d+(ns|ms|s|m)?$".to_string(),
                    message: None,
                },
                Validator::StringOneOf {
                    values: vec!["DIRECT".to_string(), "KAFKA".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_collections() {
        let schema = props(serde_json::json!({
            "type": "object",
            "properties": {
                "features": {
                    "type": "array",
                    "items": { "type": "string", "enum": ["PacketDrop", "FlowRTT"] }
                },
                "env": {
                    "type": "object",
                    "additionalProperties": { "type": "string" }
                },
                "exporters": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["type"],
                        "properties": { "type": { "type": "string" } }
                    }
                }
            }
        }));
        let attributes = attributes_from_schema(&schema, "spec").unwrap();

        let features = &attributes["features"];
        assert_eq!(features.kind, AttributeKind::List(ElementType::String));
        assert_eq!(
            features.validators,
            vec![Validator::Each {
                validators: vec![Validator::StringOneOf {
                    values: vec!["PacketDrop".to_string(), "FlowRTT".to_string()],
                }],
            }]
        );

        assert_eq!(attributes["env"].kind, AttributeKind::Map(ElementType::String));

        let exporters = attributes["exporters"].kind.nested_attributes().unwrap();
        assert!(matches!(attributes["exporters"].kind, AttributeKind::ListNested(_)));
        assert!(exporters["type"].required);
    }

    #[test]
    fn test_exclusive_bounds() {
        let schema = props(serde_json::json!({
            "type": "integer",
            "minimum": 0,
            "exclusiveMinimum": true
        }));
        let attribute = attribute_from_schema("sampling", &schema, false, "spec").unwrap();
        assert_eq!(attribute.validators, vec![Validator::Int64AtLeast { min: 1 }]);
    }

    #[test]
    fn test_exclusive_bounds_at_integer_limits() {
        let schema = props(serde_json::json!({
            "type": "integer",
            "minimum": i64::MAX,
            "exclusiveMinimum": true,
            "maximum": i64::MIN,
            "exclusiveMaximum": true
        }));
        let attribute = attribute_from_schema("bound", &schema, false, "spec").unwrap();
        assert_eq!(
            attribute.validators,
            vec![Validator::Int64Between {
                min: i64::MAX,
                max: i64::MIN
            }]
        );
    }

    #[test]
    fn test_unsupported_nested_collections() {
        let schema = props(serde_json::json!({
            "type": "array",
            "items": { "type": "array", "items": { "type": "string" } }
        }));
        let err = attribute_from_schema("matrix", &schema, false, "spec.matrix").unwrap_err();
        assert!(matches!(err, ManifestError::Schema { .. }));
    }

    #[test]
    fn test_missing_type() {
        let schema = props(serde_json::json!({ "description": "untyped" }));
        assert!(attribute_from_schema("untyped", &schema, false, "spec.untyped").is_err());
    }
}
