use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use manifest_utils::{
    is_label_value, is_qualified_name, DNS1123_LABEL_MAX_LENGTH, DNS1123_LABEL_PATTERN,
    DNS1123_SUBDOMAIN_MAX_LENGTH, DNS1123_SUBDOMAIN_PATTERN,
};

use crate::{AttributeKind, AttributePath, Diagnostics, ElementType};

/// Declarative value constraints attached to an attribute.
///
/// Validators only look at values of the type they apply to; type mismatches
/// are reported by the configuration check before validators run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "validator", rename_all = "snake_case")]
pub enum Validator {
    StringLength {
        min: Option<usize>,
        max: Option<usize>,
    },
    StringRegex {
        pattern: String,
        message: Option<String>,
    },
    StringOneOf {
        values: Vec<String>,
    },
    Int64Between {
        min: i64,
        max: i64,
    },
    Int64AtLeast {
        min: i64,
    },
    Int64AtMost {
        max: i64,
    },
    /// Applies the inner validators to every list element or map value.
    Each {
        validators: Vec<Validator>,
    },
    LabelMap,
    AnnotationMap,
}

/// Compiled `StringRegex` patterns, keyed by pattern.
static REGEX_CACHE: Lazy<Mutex<HashMap<String, Regex>>> = Lazy::new(|| Mutex::new(HashMap::new()));

fn cached_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut cache = REGEX_CACHE.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(re) = cache.get(pattern) {
        return Ok(re.clone());
    }
    let re = Regex::new(pattern)?;
    cache.insert(pattern.to_string(), re.clone());
    Ok(re)
}

const INVALID_VALUE: &str = "Invalid Attribute Value";
const INVALID_VALUE_MATCH: &str = "Invalid Attribute Value Match";
const INVALID_VALUE_LENGTH: &str = "Invalid Attribute Value Length";

impl Validator {
    pub fn description(&self) -> String {
        match self {
            Validator::StringLength { min: Some(min), max: Some(max) } => {
                format!("string length must be between {} and {}", min, max)
            }
            Validator::StringLength { min: Some(min), max: None } => {
                format!("string length must be at least {}", min)
            }
            Validator::StringLength { min: None, max: Some(max) } => {
                format!("string length must be at most {}", max)
            }
            Validator::StringLength { min: None, max: None } => "string length is unbounded".to_string(),
            Validator::StringRegex { pattern, message } => match message {
                Some(message) => message.clone(),
                None => format!("value must match regular expression '{}'", pattern),
            },
            Validator::StringOneOf { values } => {
                let quoted: Vec<String> = values.iter().map(|v| format!("\"{}\"", v)).collect();
                format!("value must be one of: [{}]", quoted.join(" "))
            }
            Validator::Int64Between { min, max } => {
                format!("value must be between {} and {}", min, max)
            }
            Validator::Int64AtLeast { min } => format!("value must be at least {}", min),
            Validator::Int64AtMost { max } => format!("value must be at most {}", max),
            Validator::Each { validators } => {
                let inner: Vec<String> = validators.iter().map(|v| v.description()).collect();
                format!("each element: {}", inner.join(", "))
            }
            Validator::LabelMap => {
                "keys must be qualified names and values valid label values".to_string()
            }
            Validator::AnnotationMap => "keys must be qualified names".to_string(),
        }
    }

    /// Whether this validator can be attached to an attribute of `kind`.
    pub fn applies_to(&self, kind: &AttributeKind) -> bool {
        match self {
            Validator::StringLength { .. }
            | Validator::StringRegex { .. }
            | Validator::StringOneOf { .. } => matches!(kind, AttributeKind::String),
            Validator::Int64Between { .. }
            | Validator::Int64AtLeast { .. }
            | Validator::Int64AtMost { .. } => matches!(kind, AttributeKind::Int64),
            Validator::Each { validators } => match kind {
                AttributeKind::List(element) | AttributeKind::Map(element) => {
                    let element_kind = element_kind(*element);
                    validators.iter().all(|v| v.applies_to(&element_kind))
                }
                _ => false,
            },
            Validator::LabelMap | Validator::AnnotationMap => {
                matches!(kind, AttributeKind::Map(ElementType::String))
            }
        }
    }

    pub fn validate(&self, path: &AttributePath, value: &Value, diagnostics: &mut Diagnostics) {
        match self {
            Validator::StringLength { min, max } => {
                let Some(s) = value.as_str() else { return };
                let length = s.chars().count();
                let too_short = min.is_some_and(|min| length < min);
                let too_long = max.is_some_and(|max| length > max);
                if too_short || too_long {
                    diagnostics.add_attribute_error(
                        path,
                        INVALID_VALUE_LENGTH,
                        &format!("Attribute {} {}, got: {}", path, self.description(), length),
                    );
                }
            }
            Validator::StringRegex { pattern, .. } => {
                let Some(s) = value.as_str() else { return };
                match cached_regex(pattern) {
                    Ok(re) if re.is_match(s) => {}
                    Ok(_) => diagnostics.add_attribute_error(
                        path,
                        INVALID_VALUE_MATCH,
                        &format!("Attribute {} {}, got: {}", path, self.description(), s),
                    ),
                    Err(e) => diagnostics.add_attribute_error(
                        path,
                        "Invalid Validator",
                        &format!("Pattern '{}' does not compile: {}", pattern, e),
                    ),
                }
            }
            Validator::StringOneOf { values } => {
                let Some(s) = value.as_str() else { return };
                if !values.iter().any(|v| v == s) {
                    diagnostics.add_attribute_error(
                        path,
                        INVALID_VALUE_MATCH,
                        &format!("Attribute {} {}, got: \"{}\"", path, self.description(), s),
                    );
                }
            }
            Validator::Int64Between { min, max } => {
                check_int64(self, path, value, diagnostics, |v| v >= *min && v <= *max)
            }
            Validator::Int64AtLeast { min } => {
                check_int64(self, path, value, diagnostics, |v| v >= *min)
            }
            Validator::Int64AtMost { max } => {
                check_int64(self, path, value, diagnostics, |v| v <= *max)
            }
            Validator::Each { validators } => match value {
                Value::Array(items) => {
                    for (index, item) in items.iter().enumerate() {
                        let item_path = path.at_index(index);
                        for validator in validators {
                            validator.validate(&item_path, item, diagnostics);
                        }
                    }
                }
                Value::Object(entries) => {
                    for (key, item) in entries {
                        let item_path = path.at_key(key);
                        for validator in validators {
                            validator.validate(&item_path, item, diagnostics);
                        }
                    }
                }
                _ => {}
            },
            Validator::LabelMap => {
                let Some(entries) = value.as_object() else { return };
                for (key, label_value) in entries {
                    if !is_qualified_name(key) {
                        diagnostics.add_attribute_error(
                            &path.at_key(key),
                            INVALID_VALUE,
                            &format!("Attribute {} label key '{}' must be a qualified name: an optional DNS subdomain prefix and '/', followed by at most 63 alphanumeric characters, '-', '_' or '.'", path, key),
                        );
                    }
                    if let Some(label_value) = label_value.as_str() {
                        if !is_label_value(label_value) {
                            diagnostics.add_attribute_error(
                                &path.at_key(key),
                                INVALID_VALUE,
                                &format!("Attribute {} label value '{}' must be empty or at most 63 alphanumeric characters, '-', '_' or '.', starting and ending with an alphanumeric character", path, label_value),
                            );
                        }
                    }
                }
            }
            Validator::AnnotationMap => {
                let Some(entries) = value.as_object() else { return };
                for key in entries.keys() {
                    if !is_qualified_name(key) {
                        diagnostics.add_attribute_error(
                            &path.at_key(key),
                            INVALID_VALUE,
                            &format!("Attribute {} annotation key '{}' must be a qualified name: an optional DNS subdomain prefix and '/', followed by at most 63 alphanumeric characters, '-', '_' or '.'", path, key),
                        );
                    }
                }
            }
        }
    }
}

fn check_int64(
    validator: &Validator,
    path: &AttributePath,
    value: &Value,
    diagnostics: &mut Diagnostics,
    accept: impl Fn(i64) -> bool,
) {
    let Some(v) = value.as_i64() else { return };
    if !accept(v) {
        diagnostics.add_attribute_error(
            path,
            INVALID_VALUE,
            &format!("Attribute {} {}, got: {}", path, validator.description(), v),
        );
    }
}

fn element_kind(element: ElementType) -> AttributeKind {
    match element {
        ElementType::String => AttributeKind::String,
        ElementType::Int64 => AttributeKind::Int64,
        ElementType::Float64 => AttributeKind::Float64,
        ElementType::Bool => AttributeKind::Bool,
    }
}

/// Object names: a DNS subdomain of at most 253 characters.
pub fn name_validators() -> Vec<Validator> {
    vec![
        Validator::StringLength {
            min: Some(1),
            max: Some(DNS1123_SUBDOMAIN_MAX_LENGTH),
        },
        Validator::StringRegex {
            pattern: DNS1123_SUBDOMAIN_PATTERN.to_string(),
            message: Some("value must be a valid DNS subdomain name".to_string()),
        },
    ]
}

/// Namespaces: a DNS label of at most 63 characters.
pub fn namespace_validators() -> Vec<Validator> {
    vec![
        Validator::StringLength {
            min: Some(1),
            max: Some(DNS1123_LABEL_MAX_LENGTH),
        },
        Validator::StringRegex {
            pattern: DNS1123_LABEL_PATTERN.to_string(),
            message: Some("value must be a valid DNS label".to_string()),
        },
    ]
}
