//! Source helper specification

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Self-description of a source helper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelperSpec {
    /// Connector type identifier, e.g. `mysql-cdc`
    pub connector_type: String,

    /// Protocol served by the helper
    pub protocol: String,

    /// Semantic version
    pub version: String,

    /// Human-readable description
    pub description: Option<String>,

    /// JSON Schema of the source properties
    pub config_schema: Option<serde_json::Value>,
}

impl HelperSpec {
    /// Create a new helper spec
    pub fn new(
        connector_type: impl Into<String>,
        protocol: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            connector_type: connector_type.into(),
            protocol: protocol.into(),
            version: version.into(),
            description: None,
            config_schema: None,
        }
    }

    /// Set description
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Set config schema from a type implementing JsonSchema
    pub fn config_schema_from<T: JsonSchema>(mut self) -> Self {
        let schema = schemars::schema_for!(T);
        self.config_schema = serde_json::to_value(schema).ok();
        self
    }

    /// Names of the top-level properties declared by the config schema
    pub fn property_names(&self) -> Vec<&str> {
        self.config_schema
            .as_ref()
            .and_then(|schema| schema.get("properties"))
            .and_then(|props| props.as_object())
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
