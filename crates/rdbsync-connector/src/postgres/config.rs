//! PostgreSQL source and destination properties

use super::options::PostgresOptions;
use super::rule::Postgres;
use rdbsync_common::config::{
    resolve, ConnectionDefaults, JdbcPipelineDistProperties, PipelineDistProperties,
};
use rdbsync_common::job::StartupMode;
use rdbsync_common::{ConnectorError, ConnectorResult, SensitiveString};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Replication slot names are limited to lowercase letters, digits and `_`
static SLOT_NAME_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[a-z0-9_]{1,63}$").expect("slot name pattern is valid")
});

/// Destination properties of a PostgreSQL sink
///
/// Unset connection fields fall back to `localhost:5432` as
/// `postgres`/`postgres`. There is no exactly-once group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PostgresPipelineDistProperties {
    #[serde(flatten)]
    #[validate(nested)]
    pub jdbc: JdbcPipelineDistProperties,

    /// Target schema (default: public)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub schema: Option<String>,
}

impl PostgresPipelineDistProperties {
    /// Effective target schema
    pub fn schema(&self) -> &str {
        resolve(self.schema.as_deref(), PostgresOptions::DEFAULT_SCHEMA)
    }
}

impl PipelineDistProperties for PostgresPipelineDistProperties {
    type Rdb = Postgres;

    const DEFAULTS: ConnectionDefaults = PostgresOptions::CONNECTION_DEFAULTS;
    const JDBC_SCHEME: &'static str = PostgresOptions::JDBC_SCHEME;

    fn jdbc(&self) -> &JdbcPipelineDistProperties {
        &self.jdbc
    }

    fn jdbc_mut(&mut self) -> &mut JdbcPipelineDistProperties {
        &mut self.jdbc
    }
}

/// Logical decoding output plugin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DecodingPlugin {
    #[default]
    Pgoutput,
    Decoderbufs,
}

impl DecodingPlugin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pgoutput => "pgoutput",
            Self::Decoderbufs => "decoderbufs",
        }
    }
}

/// Source properties of a PostgreSQL logical replication reader
#[derive(Debug, Clone, Serialize, Deserialize, Validate, JsonSchema)]
pub struct PostgresPipelineSourceProperties {
    /// PostgreSQL host (default: localhost)
    #[serde(default = "default_host")]
    #[validate(length(min = 1))]
    pub host: String,

    /// PostgreSQL port (default: 5432)
    #[serde(default = "default_port")]
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,

    /// Database to capture
    #[validate(length(min = 1))]
    pub database: String,

    /// Username (default: postgres)
    #[serde(default = "default_username")]
    #[validate(length(min = 1))]
    pub username: String,

    /// Password (redacted in logs)
    #[serde(default = "default_password")]
    pub password: SensitiveString,

    /// Captured schema (default: public)
    #[serde(default = "default_schema")]
    #[validate(length(min = 1))]
    pub schema: String,

    /// Replication slot name (default: rdb_sync)
    #[serde(default = "default_slot_name")]
    #[validate(length(min = 1, max = 63))]
    pub slot_name: String,

    #[serde(default)]
    pub decoding_plugin: DecodingPlugin,

    /// `initial` or `latest-offset`
    #[serde(default)]
    pub startup_mode: StartupMode,

    /// Tables to capture (default: every table of `schema`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<String>>,
}

fn default_host() -> String {
    PostgresOptions::DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    PostgresOptions::DEFAULT_PORT
}

fn default_username() -> String {
    PostgresOptions::DEFAULT_USERNAME.to_string()
}

fn default_password() -> SensitiveString {
    SensitiveString::new(PostgresOptions::DEFAULT_PASSWORD)
}

fn default_schema() -> String {
    PostgresOptions::DEFAULT_SCHEMA.to_string()
}

fn default_slot_name() -> String {
    PostgresOptions::DEFAULT_SLOT_NAME.to_string()
}

impl PostgresPipelineSourceProperties {
    /// Captured tables, `schema.*` when none are listed
    pub fn tables(&self) -> Vec<String> {
        match &self.tables {
            Some(tables) if !tables.is_empty() => tables.clone(),
            _ => vec![format!("{}.*", self.schema)],
        }
    }

    /// Check constraints the derive cannot express
    pub fn check(&self) -> ConnectorResult<()> {
        if !SLOT_NAME_REGEX.is_match(&self.slot_name) {
            return Err(ConnectorError::config(format!(
                "invalid slot_name '{}': use lowercase letters, digits and '_'",
                self.slot_name
            )));
        }
        if self.startup_mode == StartupMode::EarliestOffset {
            return Err(ConnectorError::config(
                "startup_mode 'earliest-offset' is not supported for postgres",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdbsync_common::PipelineProperties;

    fn source(yaml: &str) -> PostgresPipelineSourceProperties {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_dist_defaults() {
        let props = PostgresPipelineDistProperties::default();
        assert_eq!(props.protocol().as_str(), "postgres");
        assert_eq!(props.host(), "localhost");
        assert_eq!(props.port(), 5432);
        assert_eq!(props.username(), "postgres");
        assert_eq!(props.password().expose_secret(), "postgres");
        assert_eq!(props.schema(), "public");
    }

    #[test]
    fn test_dist_explicit_values() {
        let raw = PipelineProperties::new()
            .with("protocol", "postgres")
            .with("host", "pg.internal")
            .with("database", "analytics")
            .with("username", "writer")
            .with("schema", "staging");
        let props = PostgresPipelineDistProperties::parse(&raw).unwrap();
        assert_eq!(
            props.connection_url(),
            "jdbc:postgresql://pg.internal:5432/analytics"
        );
        assert_eq!(props.username(), "writer");
        assert_eq!(props.schema(), "staging");
    }

    #[test]
    fn test_dist_ignores_exactly_once_keys() {
        let raw = PipelineProperties::new()
            .with("semantic", "exactly-once")
            .with("tx_max_commit_attempts", 5);
        assert!(PostgresPipelineDistProperties::parse(&raw).is_ok());
    }

    #[test]
    fn test_source_defaults() {
        let props = source("database: analytics\n");
        assert!(props.validate().is_ok());
        assert!(props.check().is_ok());
        assert_eq!(props.port, 5432);
        assert_eq!(props.username, "postgres");
        assert_eq!(props.schema, "public");
        assert_eq!(props.slot_name, "rdb_sync");
        assert_eq!(props.decoding_plugin, DecodingPlugin::Pgoutput);
        assert_eq!(props.tables(), vec!["public.*"]);
    }

    #[test]
    fn test_slot_name_must_be_identifier() {
        let props = source("database: analytics\nslot_name: My-Slot\n");
        assert!(matches!(props.check(), Err(ConnectorError::Config(_))));

        let props = source("database: analytics\nslot_name: slot_2\n");
        assert!(props.check().is_ok());
    }

    #[test]
    fn test_earliest_offset_rejected() {
        let props = source("database: analytics\nstartup_mode: earliest-offset\n");
        assert!(props.check().is_err());

        let props = source("database: analytics\nstartup_mode: latest-offset\n");
        assert!(props.check().is_ok());
    }

    #[test]
    fn test_decoding_plugin_names() {
        let props = source("database: analytics\ndecoding_plugin: decoderbufs\n");
        assert_eq!(props.decoding_plugin.as_str(), "decoderbufs");
        assert!(serde_yaml::from_str::<PostgresPipelineSourceProperties>(
            "database: analytics\ndecoding_plugin: wal2json\n"
        )
        .is_err());
    }
}
