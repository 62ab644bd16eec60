//! Stream source handle returned by source helpers
//!
//! A [`StreamSource`] fully describes the change stream a job will read. It is
//! handed to the stream engine, which owns its execution.

use crate::rule::Protocol;
use crate::types::SensitiveString;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where the change stream starts reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StartupMode {
    /// Snapshot the captured tables, then follow the change log
    #[default]
    Initial,
    /// Replay the change log from the oldest retained position
    EarliestOffset,
    /// Follow the change log from its current end
    LatestOffset,
}

impl StartupMode {
    /// Name used in connector options
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::EarliestOffset => "earliest-offset",
            Self::LatestOffset => "latest-offset",
        }
    }
}

/// Record format emitted by the source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeEventFormat {
    /// Debezium change-event envelope
    #[default]
    DebeziumJson,
}

/// Resolved connection settings of the captured database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConnection {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: SensitiveString,
}

/// Description of a change stream, ready for the stream engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSource {
    /// Unique source identifier within the job
    pub source_id: String,
    /// Connector type, e.g. `mysql-cdc`
    pub connector_type: String,
    /// Protocol of the captured database
    pub protocol: Protocol,
    pub connection: SourceConnection,
    /// Captured tables (`database.table`, wildcards allowed)
    pub tables: Vec<String>,
    pub startup_mode: StartupMode,
    pub event_format: ChangeEventFormat,
    /// Connector-specific options
    pub options: BTreeMap<String, String>,
}

impl StreamSource {
    /// Start describing a source
    pub fn new(
        source_id: impl Into<String>,
        connector_type: impl Into<String>,
        protocol: Protocol,
        connection: SourceConnection,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            connector_type: connector_type.into(),
            protocol,
            connection,
            tables: Vec::new(),
            startup_mode: StartupMode::default(),
            event_format: ChangeEventFormat::default(),
            options: BTreeMap::new(),
        }
    }

    /// Set captured tables
    pub fn with_tables(mut self, tables: Vec<String>) -> Self {
        self.tables = tables;
        self
    }

    /// Set startup mode
    pub fn with_startup_mode(mut self, mode: StartupMode) -> Self {
        self.startup_mode = mode;
        self
    }

    /// Add a connector option
    pub fn with_option(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.options.insert(key.into(), value.to_string());
        self
    }

    /// Connector option value
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection() -> SourceConnection {
        SourceConnection {
            host: "localhost".to_string(),
            port: 3306,
            database: "shop".to_string(),
            username: "root".to_string(),
            password: SensitiveString::new("hunter2"),
        }
    }

    #[test]
    fn test_builder() {
        let source = StreamSource::new(
            "job-mysql",
            "mysql-cdc",
            Protocol::new("mysql"),
            connection(),
        )
        .with_tables(vec!["shop.orders".to_string()])
            .with_startup_mode(StartupMode::LatestOffset)
            .with_option("parallelism", 4);

        assert_eq!(source.tables, vec!["shop.orders"]);
        assert_eq!(source.startup_mode, StartupMode::LatestOffset);
        assert_eq!(source.option("parallelism"), Some("4"));
        assert_eq!(source.option("missing"), None);
        assert_eq!(source.event_format, ChangeEventFormat::DebeziumJson);
    }

    #[test]
    fn test_debug_hides_password() {
        let source = StreamSource::new(
            "job-mysql",
            "mysql-cdc",
            Protocol::new("mysql"),
            connection(),
        );
        let debug = format!("{:?}", source);
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_startup_mode_names() {
        let mode: StartupMode = serde_json::from_str("\"earliest-offset\"").unwrap();
        assert_eq!(mode, StartupMode::EarliestOffset);
        assert_eq!(mode.as_str(), "earliest-offset");
        assert_eq!(StartupMode::default().as_str(), "initial");
    }
}
