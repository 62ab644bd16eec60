//! PostgreSQL connector
//!
//! Source side: logical replication configured by
//! [`PostgresPipelineSourceProperties`]. Destination side:
//! [`PostgresPipelineDistProperties`], without an exactly-once group.

mod config;
mod helper;
mod options;
mod rule;

pub use config::{DecodingPlugin, PostgresPipelineDistProperties, PostgresPipelineSourceProperties};
pub use helper::PostgresContextSourceHelper;
pub use options::PostgresOptions;
pub use rule::Postgres;
