use serde_json::Value;

use crate::{Diagnostics, Schema};

pub struct MetadataRequest {
    pub provider_type_name: String,
}

pub struct MetadataResponse {
    pub type_name: String,
}

pub struct SchemaResponse {
    pub schema: Schema,
    pub diagnostics: Diagnostics,
}

pub struct ReadRequest {
    /// Configuration keyed by attribute name, already validated against the schema.
    pub config: Value,
}

pub struct ReadResponse {
    /// The configuration with computed attributes filled in; `None` when the read failed.
    pub state: Option<Value>,
    pub diagnostics: Diagnostics,
}

impl ReadResponse {
    pub fn failed(diagnostics: Diagnostics) -> Self {
        ReadResponse {
            state: None,
            diagnostics,
        }
    }
}

/// The lifecycle contract a host framework drives for a read-only data source.
pub trait DataSource: Send + Sync {
    fn metadata(&self, req: &MetadataRequest) -> MetadataResponse;

    fn schema(&self) -> SchemaResponse;

    fn read(&self, req: &ReadRequest) -> ReadResponse;
}
