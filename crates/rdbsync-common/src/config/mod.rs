//! Layered connector configuration
//!
//! Destination properties are composed rather than inherited: a connector's
//! type embeds [`JdbcPipelineDistProperties`] (and, where supported,
//! [`JdbcExactlyOnceProperties`]) and implements [`PipelineDistProperties`]
//! to supply its identity and defaults.

pub mod exactly_once;
pub mod jdbc;
pub mod job;
pub mod semantic;

pub use exactly_once::{
    ExactlyOnceOptions, JdbcExactlyOnceProperties, DEFAULT_TX_MAX_COMMIT_ATTEMPTS,
};
pub use jdbc::{resolve, ConnectionDefaults, JdbcPipelineDistProperties, PipelineDistProperties};
pub use job::JobConfig;
pub use semantic::Semantic;
