use once_cell::sync::Lazy;
use regex::Regex;

pub const DNS1123_LABEL_MAX_LENGTH: usize = 63;
pub const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;
pub const QUALIFIED_NAME_MAX_LENGTH: usize = 63;
pub const LABEL_VALUE_MAX_LENGTH: usize = 63;

pub const DNS1123_LABEL_PATTERN: &str = r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$";
pub const DNS1123_SUBDOMAIN_PATTERN: &str =
    r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$";

static DNS1123_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(DNS1123_LABEL_PATTERN).unwrap());

static DNS1123_SUBDOMAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(DNS1123_SUBDOMAIN_PATTERN).unwrap());

static QUALIFIED_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$").unwrap());

static LABEL_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9])?$").unwrap());

/// RFC 1123 label, as used for namespaces.
pub fn is_dns1123_label(value: &str) -> bool {
    value.len() <= DNS1123_LABEL_MAX_LENGTH && DNS1123_LABEL.is_match(value)
}

/// RFC 1123 subdomain, as used for most object names.
pub fn is_dns1123_subdomain(value: &str) -> bool {
    value.len() <= DNS1123_SUBDOMAIN_MAX_LENGTH && DNS1123_SUBDOMAIN.is_match(value)
}

/// Label and annotation keys: an optional DNS subdomain prefix followed by `/` and a name.
pub fn is_qualified_name(value: &str) -> bool {
    let (prefix, name) = match value.split_once('/') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, value),
    };

    if let Some(prefix) = prefix {
        if prefix.is_empty() || !is_dns1123_subdomain(prefix) {
            return false;
        }
    }

    !name.is_empty() && name.len() <= QUALIFIED_NAME_MAX_LENGTH && QUALIFIED_NAME.is_match(name)
}

pub fn is_label_value(value: &str) -> bool {
    value.len() <= LABEL_VALUE_MAX_LENGTH && LABEL_VALUE.is_match(value)
}
