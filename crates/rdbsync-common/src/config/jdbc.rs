//! Generic JDBC destination settings
//!
//! Connector-specific destination properties embed
//! [`JdbcPipelineDistProperties`] and implement [`PipelineDistProperties`],
//! which supplies the protocol identity and fills unset connection fields from
//! the connector's [`ConnectionDefaults`].
//!
//! ```rust,ignore
//! #[derive(Debug, Default, Deserialize, Validate)]
//! pub struct MysqlPipelineDistProperties {
//!     #[serde(flatten)]
//!     jdbc: JdbcPipelineDistProperties,
//! }
//!
//! impl PipelineDistProperties for MysqlPipelineDistProperties {
//!     type Rdb = Mysql;
//!     const DEFAULTS: ConnectionDefaults = ConnectionDefaults { /* ... */ };
//!     const JDBC_SCHEME: &'static str = "mysql";
//!     /* jdbc(), jdbc_mut() */
//! }
//! ```

use crate::error::ConnectorResult;
use crate::job::context::PipelineProperties;
use crate::rule::{Protocol, Rdb};
use crate::types::SensitiveString;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Connection settings shared by all JDBC destinations; all optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, JsonSchema)]
pub struct JdbcPipelineDistProperties {
    /// Database host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub host: Option<String>,

    /// Database port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub port: Option<u16>,

    /// Database name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub database: Option<String>,

    /// Login user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub username: Option<String>,

    /// Login password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<SensitiveString>,
}

/// Per-connector fallbacks for unset connection fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionDefaults {
    pub host: &'static str,
    pub port: u16,
    pub username: &'static str,
    pub password: &'static str,
}

/// Effective value of a field: the explicit one if set, else the default
pub fn resolve<T>(explicit: Option<T>, default: T) -> T {
    explicit.unwrap_or(default)
}

/// Destination properties of one connector
pub trait PipelineDistProperties: DeserializeOwned + Validate {
    /// Database variant the destination writes to
    type Rdb: Rdb;

    /// Fallbacks for unset connection fields
    const DEFAULTS: ConnectionDefaults;

    /// Sub-protocol in JDBC URLs, e.g. `mysql` in `jdbc:mysql://`
    const JDBC_SCHEME: &'static str;

    /// Embedded JDBC settings
    fn jdbc(&self) -> &JdbcPipelineDistProperties;

    /// Embedded JDBC settings, mutable
    fn jdbc_mut(&mut self) -> &mut JdbcPipelineDistProperties;

    /// Protocol of the destination, regardless of field values
    fn protocol(&self) -> Protocol {
        Protocol::of::<Self::Rdb>()
    }

    fn host(&self) -> &str {
        resolve(self.jdbc().host.as_deref(), Self::DEFAULTS.host)
    }

    fn port(&self) -> u16 {
        resolve(self.jdbc().port, Self::DEFAULTS.port)
    }

    fn database(&self) -> Option<&str> {
        self.jdbc().database.as_deref()
    }

    fn username(&self) -> &str {
        resolve(self.jdbc().username.as_deref(), Self::DEFAULTS.username)
    }

    fn password(&self) -> SensitiveString {
        resolve(
            self.jdbc().password.clone(),
            SensitiveString::new(Self::DEFAULTS.password),
        )
    }

    /// JDBC URL of the destination, without credentials
    fn connection_url(&self) -> String {
        format!(
            "jdbc:{}://{}:{}/{}",
            Self::JDBC_SCHEME,
            self.host(),
            self.port(),
            self.database().unwrap_or_default()
        )
    }

    /// Map and validate loosely typed destination properties
    fn parse(properties: &PipelineProperties) -> ConnectorResult<Self>
    where
        Self: Sized,
    {
        let parsed: Self = properties.parse()?;
        parsed.validate()?;
        Ok(parsed)
    }
}
