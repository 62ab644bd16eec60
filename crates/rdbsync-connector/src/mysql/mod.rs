//! MySQL connector
//!
//! Source side: binlog capture configured by [`MysqlPipelineSourceProperties`].
//! Destination side: [`MysqlPipelineDistProperties`], the only destination
//! with an exactly-once transaction group.

mod config;
mod helper;
mod options;
mod rule;

pub use config::{MysqlPipelineDistProperties, MysqlPipelineSourceProperties, ServerIdRange};
pub use helper::MysqlContextSourceHelper;
pub use options::MysqlOptions;
pub use rule::Mysql;
