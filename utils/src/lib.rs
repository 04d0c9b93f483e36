mod k8s_names;
mod logging;
mod schema_validation;
mod string_utils;

pub use k8s_names::{
    is_dns1123_label, is_dns1123_subdomain, is_label_value, is_qualified_name,
    DNS1123_LABEL_MAX_LENGTH, DNS1123_LABEL_PATTERN, DNS1123_SUBDOMAIN_MAX_LENGTH,
    DNS1123_SUBDOMAIN_PATTERN, LABEL_VALUE_MAX_LENGTH, QUALIFIED_NAME_MAX_LENGTH,
};
pub use logging::{log_level_from_env, setup_logging};
pub use schema_validation::{validate_manifest, validate_schema};
pub use string_utils::to_snake_case;
