//! # rdbsync-common
//!
//! Connector registry and dispatch for the rdbsync CDC pipeline.
//!
//! Relational database connectors implement [`ContextSourceHelper`] and
//! register themselves with [`register_source_helper!`]. At startup the
//! runtime builds a [`SourceHelperCatalog`] keyed by protocol and wraps it in a
//! [`ContextSourceHelperProxy`], which the pipeline core calls for every job:
//!
//! ```rust,ignore
//! use rdbsync_common::prelude::*;
//!
//! let proxy = ContextSourceHelperProxy::new()?;
//! let meta = JobConfig::from_file("job.yaml")?.into_context();
//! let source = proxy.get_source(&meta)?;
//! ```
//!
//! A job whose `protocol` has no registered connector fails with
//! [`ConnectorError::UnsupportedSourceProtocol`].

pub mod config;
pub mod error;
pub mod job;
pub mod rule;
pub mod types;

pub use config::{
    ConnectionDefaults, ExactlyOnceOptions, JdbcExactlyOnceProperties, JdbcPipelineDistProperties,
    JobConfig, PipelineDistProperties, Semantic,
};
pub use error::{ConnectError, ConnectorError, ConnectorResult, Result};
pub use job::{
    AnySourceHelper, CatalogBuilder, ContextMeta, ContextSourceHelper, ContextSourceHelperProxy,
    DuplicatePolicy, HelperSpec, PipelineProperties, SourceHelperCatalog, StreamSource,
};
pub use rule::{AnyRdb, Protocol, Rdb};
pub use types::SensitiveString;

#[doc(hidden)]
pub use inventory;

/// Prelude for connector implementations
pub mod prelude {
    pub use crate::config::{
        ConnectionDefaults, JdbcExactlyOnceProperties, JdbcPipelineDistProperties, JobConfig,
        PipelineDistProperties, Semantic,
    };
    pub use crate::error::{ConnectError, ConnectorError, ConnectorResult};
    pub use crate::job::{
        AnySourceHelper, ContextMeta, ContextSourceHelper, ContextSourceHelperProxy, HelperSpec,
        PipelineProperties, SourceConnection, SourceHelperCatalog, StartupMode, StreamSource,
    };
    pub use crate::register_source_helper;
    pub use crate::rule::{Protocol, Rdb};
    pub use crate::types::SensitiveString;
}
