use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Unable to marshal YAML: {0}")]
    Serialization(#[from] serde_yaml::Error),

    #[error("Unable to decode configuration: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("The CRD schema cannot be expressed at {path}: {message}")]
    Schema { path: String, message: String },

    #[error("Unknown data source: {0}")]
    UnknownDataSource(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
