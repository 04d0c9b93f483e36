use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Attribute, AttributeKind, AttributePath, Diagnostics, Schema, Validator};

static ATTRIBUTE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z_][a-z0-9_]*$").unwrap());

/// Root attribute names Terraform reserves for meta-arguments.
const RESERVED_ROOT_NAMES: [&str; 7] = [
    "connection",
    "count",
    "depends_on",
    "for_each",
    "lifecycle",
    "provider",
    "provisioner",
];

/// Structural self-consistency checks a host framework runs on a schema
/// before accepting it.
pub fn validate_implementation(schema: &Schema) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    if schema.attributes.is_empty() {
        diagnostics.add_error(
            "Invalid Schema Implementation",
            "A data source schema must declare at least one attribute.",
        );
    }

    for name in schema.attributes.keys() {
        if RESERVED_ROOT_NAMES.contains(&name.as_str()) {
            diagnostics.add_attribute_error(
                &AttributePath::root().at_name(name),
                "Reserved Root Attribute/Block Name",
                &format!(
                    "Schema Using Reserved Field Name: \"{}\" is a reserved root name and cannot be used as an attribute.",
                    name
                ),
            );
        }
    }

    validate_attributes(&schema.attributes, &AttributePath::root(), &mut diagnostics);
    diagnostics
}

fn validate_attributes(
    attributes: &BTreeMap<String, Attribute>,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) {
    let mut fields = HashSet::new();

    for (name, attribute) in attributes {
        let attribute_path = path.at_name(name);

        if !ATTRIBUTE_NAME.is_match(name) {
            diagnostics.add_attribute_error(
                &attribute_path,
                "Invalid Attribute/Block Name",
                &format!(
                    "Names must only contain lowercase alphanumeric characters (a-z, 0-9) and underscores (_), and must not start with a number, got: {}",
                    name
                ),
            );
        }

        if attribute.field.is_empty() {
            diagnostics.add_attribute_error(
                &attribute_path,
                "Invalid Attribute Implementation",
                "Attributes must declare the manifest field they are rendered to.",
            );
        } else if !fields.insert(attribute.field.as_str()) {
            diagnostics.add_attribute_error(
                &attribute_path,
                "Invalid Attribute Implementation",
                &format!(
                    "More than one attribute renders to the manifest field \"{}\".",
                    attribute.field
                ),
            );
        }

        validate_configurability(attribute, &attribute_path, diagnostics);

        for validator in &attribute.validators {
            validate_validator(validator, &attribute.kind, &attribute_path, diagnostics);
        }

        if let Some(nested) = attribute.kind.nested_attributes() {
            if nested.is_empty() {
                diagnostics.add_attribute_error(
                    &attribute_path,
                    "Invalid Attribute Implementation",
                    "Nested attributes must declare at least one child attribute.",
                );
            }
            validate_attributes(nested, &attribute_path, diagnostics);
        }
    }
}

fn validate_configurability(
    attribute: &Attribute,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) {
    if attribute.required && (attribute.optional || attribute.computed) {
        diagnostics.add_attribute_error(
            path,
            "Invalid Attribute Implementation",
            "Attributes cannot be Required and also Optional or Computed.",
        );
    }

    if !attribute.required && !attribute.optional && !attribute.computed {
        diagnostics.add_attribute_error(
            path,
            "Invalid Attribute Implementation",
            "Attributes must be Required, Optional, or Computed.",
        );
    }
}

fn validate_validator(
    validator: &Validator,
    kind: &AttributeKind,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) {
    if !validator.applies_to(kind) {
        diagnostics.add_attribute_error(
            path,
            "Invalid Validator",
            &format!(
                "Validator \"{}\" cannot be applied to an attribute of type {}.",
                validator.description(),
                kind.type_name()
            ),
        );
        return;
    }

    match validator {
        Validator::StringRegex { pattern, .. } => {
            if let Err(e) = Regex::new(pattern) {
                diagnostics.add_attribute_error(
                    path,
                    "Invalid Validator",
                    &format!("Pattern '{}' does not compile: {}", pattern, e),
                );
            }
        }
        Validator::StringLength {
            min: Some(min),
            max: Some(max),
        } if min > max => diagnostics.add_attribute_error(
            path,
            "Invalid Validator",
            &format!("String length bounds are inverted: {} > {}", min, max),
        ),
        Validator::Int64Between { min, max } if min > max => diagnostics.add_attribute_error(
            path,
            "Invalid Validator",
            &format!("Integer bounds are inverted: {} > {}", min, max),
        ),
        Validator::StringOneOf { values } if values.is_empty() => diagnostics.add_attribute_error(
            path,
            "Invalid Validator",
            "One-of validators must list at least one value.",
        ),
        Validator::Each { validators } => {
            for inner in validators {
                if let Validator::StringRegex { pattern, .. } = inner {
                    if let Err(e) = Regex::new(pattern) {
                        diagnostics.add_attribute_error(
                            path,
                            "Invalid Validator",
                            &format!("Pattern '{}' does not compile: {}", pattern, e),
                        );
                    }
                }
            }
        }
        _ => {}
    }
}
