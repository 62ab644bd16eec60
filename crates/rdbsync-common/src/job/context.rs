//! Job context metadata
//!
//! A [`ContextMeta`] is the per-job bundle handed to source helpers. It is
//! owned by whoever submits the job; helpers and the dispatch proxy only read
//! it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Loosely typed pipeline properties (source or destination side)
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineProperties(BTreeMap<String, Value>);

impl PipelineProperties {
    /// Key holding the protocol name
    pub const PROTOCOL: &'static str = "protocol";

    /// Create empty properties
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property (builder style)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a property
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw property value
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String property value; `None` when absent or not a string
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Configured protocol, as written by the user
    pub fn protocol(&self) -> Option<&str> {
        self.get(Self::PROTOCOL)
    }

    /// Whether a property is present
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no properties
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Map the properties onto a typed configuration
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_yaml::Error> {
        let mapping: Mapping = self
            .0
            .iter()
            .map(|(k, v)| (Value::String(k.clone()), v.clone()))
            .collect();
        serde_yaml::from_value(Value::Mapping(mapping))
    }
}

impl fmt::Debug for PipelineProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.0 {
            if key.to_lowercase().contains("password") {
                map.entry(key, &"[REDACTED]");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for PipelineProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Metadata of one pipeline job
#[derive(Debug, Clone, Default)]
pub struct ContextMeta {
    job_id: String,
    pipeline_source_properties: PipelineProperties,
    pipeline_dist_properties: PipelineProperties,
}

impl ContextMeta {
    /// Create metadata for a job
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            ..Default::default()
        }
    }

    /// Set the source properties
    pub fn with_source_properties(mut self, properties: PipelineProperties) -> Self {
        self.pipeline_source_properties = properties;
        self
    }

    /// Set the destination properties
    pub fn with_dist_properties(mut self, properties: PipelineProperties) -> Self {
        self.pipeline_dist_properties = properties;
        self
    }

    /// Job identifier
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Source-side properties
    pub fn pipeline_source_properties(&self) -> &PipelineProperties {
        &self.pipeline_source_properties
    }

    /// Destination-side properties
    pub fn pipeline_dist_properties(&self) -> &PipelineProperties {
        &self.pipeline_dist_properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Endpoint {
        host: String,
        #[serde(default)]
        port: Option<u16>,
    }

    #[test]
    fn test_protocol_read_as_given() {
        let props = PipelineProperties::new().with("protocol", "MySQL");
        assert_eq!(props.protocol(), Some("MySQL"));
    }

    #[test]
    fn test_non_string_protocol_is_absent() {
        let props = PipelineProperties::new().with("protocol", 42);
        assert_eq!(props.protocol(), None);
        assert!(props.contains("protocol"));
    }

    #[test]
    fn test_parse_typed() {
        let props: PipelineProperties = [("protocol", Value::from("mysql")), ("host", "db1".into())]
            .into_iter()
            .collect();
        let endpoint: Endpoint = props.parse().unwrap();
        assert_eq!(endpoint.host, "db1");
        assert_eq!(endpoint.port, None);
    }

    #[test]
    fn test_parse_with_number() {
        let props = PipelineProperties::new()
            .with("host", "db1")
            .with("port", 3307);
        let endpoint: Endpoint = props.parse().unwrap();
        assert_eq!(endpoint.port, Some(3307));
    }

    #[test]
    fn test_parse_type_mismatch() {
        let props = PipelineProperties::new().with("host", "db1").with("port", "x");
        assert!(props.parse::<Endpoint>().is_err());
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let props = PipelineProperties::new()
            .with("username", "root")
            .with("password", "hunter2");
        let debug = format!("{:?}", props);
        assert!(debug.contains("root"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_context_meta_accessors() {
        let meta = ContextMeta::new("orders")
            .with_source_properties(PipelineProperties::new().with("protocol", "mysql"))
            .with_dist_properties(PipelineProperties::new().with("protocol", "postgres"));

        assert_eq!(meta.job_id(), "orders");
        assert_eq!(meta.pipeline_source_properties().protocol(), Some("mysql"));
        assert_eq!(meta.pipeline_dist_properties().protocol(), Some("postgres"));
    }
}
