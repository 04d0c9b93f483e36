use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::{Attribute, AttributeKind, AttributePath, Diagnostics, ElementType, Schema};

/// Checks a configuration against a schema the way the host framework does
/// before a read: unknown and missing arguments, read-only attributes, value
/// types, then the declared validators.
pub fn validate_config(schema: &Schema, config: &Value) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    validate_object(&schema.attributes, config, &AttributePath::root(), &mut diagnostics);
    diagnostics
}

fn validate_object(
    attributes: &BTreeMap<String, Attribute>,
    value: &Value,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) {
    let Some(object) = value.as_object() else {
        let detail = if path.is_root() {
            "The configuration must be an object.".to_string()
        } else {
            format!("Inappropriate value for attribute \"{}\": object required.", path)
        };
        diagnostics.add_attribute_error(path, "Incorrect attribute value type", &detail);
        return;
    };

    for key in object.keys() {
        if !attributes.contains_key(key) {
            diagnostics.add_attribute_error(
                &path.at_name(key),
                "Unsupported argument",
                &format!("An argument named \"{}\" is not expected here.", key),
            );
        }
    }

    for (name, attribute) in attributes {
        let value = object.get(name).unwrap_or(&Value::Null);
        validate_attribute(attribute, value, &path.at_name(name), diagnostics);
    }
}

fn validate_attribute(
    attribute: &Attribute,
    value: &Value,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) {
    if value.is_null() {
        if attribute.required {
            diagnostics.add_attribute_error(
                path,
                "Missing required argument",
                &format!(
                    "The argument \"{}\" is required, but no definition was found.",
                    path
                ),
            );
        }
        return;
    }

    if attribute.is_read_only() {
        diagnostics.add_attribute_error(
            path,
            "Invalid Configuration for Read-Only Attribute",
            &format!(
                "Cannot set value for attribute \"{}\" as the provider has marked it as read-only. Remove the configuration line setting the value.",
                path
            ),
        );
        return;
    }

    if !check_type(&attribute.kind, value, path, diagnostics) {
        return;
    }

    for validator in &attribute.validators {
        validator.validate(path, value, diagnostics);
    }
}

/// Returns false when the value has the wrong shape; nested objects are
/// validated recursively as part of the check.
fn check_type(
    kind: &AttributeKind,
    value: &Value,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) -> bool {
    match kind {
        AttributeKind::String => expect_type(value.is_string(), kind, path, diagnostics),
        AttributeKind::Int64 => expect_type(value.as_i64().is_some(), kind, path, diagnostics),
        AttributeKind::Float64 => expect_type(value.is_number(), kind, path, diagnostics),
        AttributeKind::Bool => expect_type(value.is_boolean(), kind, path, diagnostics),
        AttributeKind::List(element) => {
            let Some(items) = value.as_array() else {
                return expect_type(false, kind, path, diagnostics);
            };
            let mut ok = true;
            for (index, item) in items.iter().enumerate() {
                ok &= check_element(*element, item, &path.at_index(index), diagnostics);
            }
            ok
        }
        AttributeKind::Map(element) => {
            let Some(entries) = value.as_object() else {
                return expect_type(false, kind, path, diagnostics);
            };
            let mut ok = true;
            for (key, item) in entries {
                ok &= check_element(*element, item, &path.at_key(key), diagnostics);
            }
            ok
        }
        AttributeKind::SingleNested(attributes) => {
            if !value.is_object() {
                return expect_type(false, kind, path, diagnostics);
            }
            validate_object(attributes, value, path, diagnostics);
            true
        }
        AttributeKind::ListNested(attributes) => {
            let Some(items) = value.as_array() else {
                return expect_type(false, kind, path, diagnostics);
            };
            for (index, item) in items.iter().enumerate() {
                validate_object(attributes, item, &path.at_index(index), diagnostics);
            }
            true
        }
    }
}

fn check_element(
    element: ElementType,
    value: &Value,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) -> bool {
    if element.matches(value) {
        return true;
    }
    diagnostics.add_attribute_error(
        path,
        "Incorrect attribute value type",
        &format!(
            "Inappropriate value for element \"{}\": {} required.",
            path,
            element.type_name()
        ),
    );
    false
}

fn expect_type(
    ok: bool,
    kind: &AttributeKind,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) -> bool {
    if !ok {
        diagnostics.add_attribute_error(
            path,
            "Incorrect attribute value type",
            &format!(
                "Inappropriate value for attribute \"{}\": {} required.",
                path,
                kind.type_name()
            ),
        );
    }
    ok
}

/// Rewrites a configuration keyed by attribute names into the manifest shape,
/// keyed by each attribute's `field`. Null and unknown values are dropped.
pub fn to_manifest_value(attributes: &BTreeMap<String, Attribute>, config: &Value) -> Value {
    let mut manifest = Map::new();

    if let Some(object) = config.as_object() {
        for (name, attribute) in attributes {
            match object.get(name) {
                Some(value) if !value.is_null() => {
                    manifest.insert(attribute.field.clone(), convert(attribute, value));
                }
                _ => {}
            }
        }
    }

    Value::Object(manifest)
}

fn convert(attribute: &Attribute, value: &Value) -> Value {
    match &attribute.kind {
        AttributeKind::SingleNested(attributes) => to_manifest_value(attributes, value),
        AttributeKind::ListNested(attributes) => Value::Array(
            value
                .as_array()
                .map(|items| {
                    items
                        .iter()
                        .map(|item| to_manifest_value(attributes, item))
                        .collect()
                })
                .unwrap_or_default(),
        ),
        _ => value.clone(),
    }
}
