//! MySQL source and destination properties

use super::options::MysqlOptions;
use super::rule::Mysql;
use rdbsync_common::config::{
    resolve, ConnectionDefaults, ExactlyOnceOptions, JdbcExactlyOnceProperties,
    JdbcPipelineDistProperties, PipelineDistProperties, Semantic,
};
use rdbsync_common::job::StartupMode;
use rdbsync_common::{ConnectorError, ConnectorResult, SensitiveString};
use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject, StringValidation};
use schemars::JsonSchema;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Destination properties of a MySQL sink
///
/// Unset connection fields fall back to `localhost:3306` as `root`/`root`.
/// The exactly-once group only takes effect with `semantic: exactly-once`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MysqlPipelineDistProperties {
    #[serde(flatten)]
    #[validate(nested)]
    pub jdbc: JdbcPipelineDistProperties,

    #[serde(flatten)]
    #[validate(nested)]
    pub exactly_once: JdbcExactlyOnceProperties,

    /// Delivery guarantee (default: at-least-once)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic: Option<Semantic>,
}

impl MysqlPipelineDistProperties {
    /// Effective delivery guarantee
    pub fn semantic(&self) -> Semantic {
        resolve(self.semantic, Semantic::default())
    }

    pub fn set_semantic(&mut self, semantic: Option<Semantic>) {
        self.semantic = semantic;
    }

    pub fn tx_max_commit_attempts(&self) -> u32 {
        self.exactly_once.tx_max_commit_attempts()
    }

    pub fn set_tx_max_commit_attempts(&mut self, attempts: Option<u32>) {
        self.exactly_once.set_tx_max_commit_attempts(attempts);
    }

    pub fn tx_timeout_seconds(&self) -> Option<u32> {
        self.exactly_once.tx_timeout_seconds()
    }

    pub fn set_tx_timeout_seconds(&mut self, seconds: Option<u32>) {
        self.exactly_once.set_tx_timeout_seconds(seconds);
    }

    /// Transaction settings, present only for exactly-once delivery
    pub fn exactly_once_options(&self) -> Option<ExactlyOnceOptions> {
        self.semantic()
            .is_exactly_once()
            .then(|| self.exactly_once.options())
    }
}

impl PipelineDistProperties for MysqlPipelineDistProperties {
    type Rdb = Mysql;

    const DEFAULTS: ConnectionDefaults = MysqlOptions::CONNECTION_DEFAULTS;
    const JDBC_SCHEME: &'static str = MysqlOptions::JDBC_SCHEME;

    fn jdbc(&self) -> &JdbcPipelineDistProperties {
        &self.jdbc
    }

    fn jdbc_mut(&mut self) -> &mut JdbcPipelineDistProperties {
        &mut self.jdbc
    }
}

/// Inclusive range of replication server ids, one per parallel reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerIdRange {
    start: u32,
    end: u32,
}

impl ServerIdRange {
    pub fn new(start: u32, end: u32) -> Result<Self, String> {
        if start == 0 {
            return Err("server id must be positive".to_string());
        }
        if start > end {
            return Err(format!("server id range {}-{} is reversed", start, end));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of ids in the range, never zero
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }
}

impl fmt::Display for ServerIdRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl FromStr for ServerIdRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|e| format!("invalid server id '{}': {}", part.trim(), e))
        };
        match s.split_once('-') {
            Some((start, end)) => Self::new(parse(start)?, parse(end)?),
            None => {
                let id = parse(s)?;
                Self::new(id, id)
            }
        }
    }
}

impl Serialize for ServerIdRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ServerIdRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RangeVisitor;

        impl Visitor<'_> for RangeVisitor {
            type Value = ServerIdRange;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a server id or a range like \"5400-5404\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ServerIdRange, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ServerIdRange, E> {
                let id = u32::try_from(v).map_err(E::custom)?;
                ServerIdRange::new(id, id).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ServerIdRange, E> {
                let id = u32::try_from(v).map_err(E::custom)?;
                ServerIdRange::new(id, id).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(RangeVisitor)
    }
}

impl JsonSchema for ServerIdRange {
    fn schema_name() -> String {
        "ServerIdRange".to_string()
    }

    fn json_schema(_gen: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            string: Some(Box::new(StringValidation {
                pattern: Some(r"^\d+(-\d+)?$".to_string()),
                ..Default::default()
            })),
            ..Default::default()
        }
        .into()
    }
}

/// Source properties of a MySQL binlog reader
#[derive(Debug, Clone, Serialize, Deserialize, Validate, JsonSchema)]
pub struct MysqlPipelineSourceProperties {
    /// MySQL host (default: localhost)
    #[serde(default = "default_host")]
    #[validate(length(min = 1))]
    pub host: String,

    /// MySQL port (default: 3306)
    #[serde(default = "default_port")]
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,

    /// Database to capture
    #[validate(length(min = 1))]
    pub database: String,

    /// Username (default: root)
    #[serde(default = "default_username")]
    #[validate(length(min = 1))]
    pub username: String,

    /// Password (redacted in logs)
    #[serde(default = "default_password")]
    pub password: SensitiveString,

    /// Replication server ids, e.g. `5400-5404`; must cover `parallelism`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<ServerIdRange>,

    #[serde(default)]
    pub startup_mode: StartupMode,

    /// Parallel snapshot readers (default: 1)
    #[serde(default = "default_parallelism")]
    #[validate(range(min = 1, max = 256))]
    pub parallelism: u32,

    /// Rows per incremental snapshot chunk (default: 8096)
    #[serde(default = "default_split_size")]
    #[validate(range(min = 1))]
    pub split_size: u32,

    /// Tables to capture (default: every table of `database`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<String>>,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_connect_timeout")]
    #[validate(range(min = 1, max = 300))]
    pub connect_timeout_seconds: u32,
}

fn default_host() -> String {
    MysqlOptions::DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    MysqlOptions::DEFAULT_PORT
}

fn default_username() -> String {
    MysqlOptions::DEFAULT_USERNAME.to_string()
}

fn default_password() -> SensitiveString {
    SensitiveString::new(MysqlOptions::DEFAULT_PASSWORD)
}

fn default_parallelism() -> u32 {
    MysqlOptions::DEFAULT_PARALLELISM
}

fn default_split_size() -> u32 {
    MysqlOptions::DEFAULT_SPLIT_SIZE
}

fn default_connect_timeout() -> u32 {
    MysqlOptions::DEFAULT_CONNECT_TIMEOUT_SECONDS
}

impl MysqlPipelineSourceProperties {
    /// Captured tables, `database.*` when none are listed
    pub fn tables(&self) -> Vec<String> {
        match &self.tables {
            Some(tables) if !tables.is_empty() => tables.clone(),
            _ => vec![format!("{}.*", self.database)],
        }
    }

    /// Check constraints spanning several fields
    pub fn check(&self) -> ConnectorResult<()> {
        if let Some(range) = self.server_id {
            if range.len() < self.parallelism {
                return Err(ConnectorError::config(format!(
                    "server_id range {} has {} ids but parallelism is {}",
                    range,
                    range.len(),
                    self.parallelism
                )));
            }
        }
        Ok(())
    }
}
