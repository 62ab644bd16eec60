//! Error types for rdbsync-common
//!
//! Two tiers, matching where a failure is observed:
//! - [`ConnectorError`] is returned through the source-building contract, by
//!   concrete helpers and by the dispatch proxy alike.
//! - [`ConnectError`] is returned by the runtime while assembling the
//!   connector catalog.

use thiserror::Error;

/// Result type alias for runtime operations (catalog construction)
pub type Result<T> = std::result::Result<T, ConnectError>;

/// Result type alias for the source-building contract
pub type ConnectorResult<T> = std::result::Result<T, ConnectorError>;

/// Errors raised while building the connector catalog
#[derive(Error, Debug)]
pub enum ConnectError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Two helpers declared the same protocol under a fail-fast policy
    #[error("Protocol '{protocol}' is declared by both {first} and {second}")]
    DuplicateProtocol {
        protocol: String,
        first: String,
        second: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Job file could not be parsed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Connector error (from individual helpers)
    #[error(transparent)]
    Connector(#[from] ConnectorError),
}

/// Errors that can occur through the source-building contract
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// No helper is registered for the requested source protocol
    #[error("unsupported source protocol: {0}")]
    UnsupportedSourceProtocol(String),

    /// Configuration is inconsistent or incomplete
    #[error("configuration error: {0}")]
    Config(String),

    /// Properties failed declarative validation
    #[error("validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// A helper could not be constructed
    #[error("instantiation error: {0}")]
    Instantiation(String),

    /// Properties could not be mapped onto the typed configuration
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConnectorError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an instantiation error
    pub fn instantiation(msg: impl Into<String>) -> Self {
        Self::Instantiation(msg.into())
    }

    /// Create an unsupported-protocol error carrying the protocol as given
    pub fn unsupported_protocol(protocol: impl Into<String>) -> Self {
        Self::UnsupportedSourceProtocol(protocol.into())
    }

    /// Whether this error reports an unknown source protocol
    pub fn is_unsupported_protocol(&self) -> bool {
        matches!(self, Self::UnsupportedSourceProtocol(_))
    }

    /// The offending protocol, if this is an unsupported-protocol error
    pub fn unsupported_protocol_name(&self) -> Option<&str> {
        match self {
            Self::UnsupportedSourceProtocol(protocol) => Some(protocol),
            _ => None,
        }
    }
}

impl ConnectError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a duplicate-protocol error
    pub fn duplicate(
        protocol: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::DuplicateProtocol {
            protocol: protocol.into(),
            first: first.into(),
            second: second.into(),
        }
    }
}
