//! MySQL source helper

use super::config::MysqlPipelineSourceProperties;
use super::options::MysqlOptions;
use super::rule::Mysql;
use rdbsync_common::prelude::*;
use tracing::debug;

/// Builds MySQL binlog sources
#[derive(Debug, Default)]
pub struct MysqlContextSourceHelper;

impl ContextSourceHelper for MysqlContextSourceHelper {
    type Rdb = Mysql;
    type Properties = MysqlPipelineSourceProperties;

    fn create() -> ConnectorResult<Self> {
        Ok(Self)
    }

    fn spec() -> HelperSpec {
        HelperSpec::new(
            MysqlOptions::CONNECTOR_TYPE,
            Protocol::of::<Mysql>().as_str(),
            env!("CARGO_PKG_VERSION"),
        )
        .description("MySQL CDC source using binlog replication")
        .config_schema_from::<MysqlPipelineSourceProperties>()
    }

    fn build_source(
        &self,
        properties: &MysqlPipelineSourceProperties,
        meta: &ContextMeta,
    ) -> ConnectorResult<StreamSource> {
        properties.check()?;

        let connection = SourceConnection {
            host: properties.host.clone(),
            port: properties.port,
            database: properties.database.clone(),
            username: properties.username.clone(),
            password: properties.password.clone(),
        };

        let mut source = StreamSource::new(
            meta.job_id(),
            MysqlOptions::CONNECTOR_TYPE,
            Protocol::of::<Mysql>(),
            connection,
        )
        .with_tables(properties.tables())
        .with_startup_mode(properties.startup_mode)
        .with_option(MysqlOptions::OPTION_SPLIT_SIZE, properties.split_size)
        .with_option(MysqlOptions::OPTION_PARALLELISM, properties.parallelism)
        .with_option(
            MysqlOptions::OPTION_CONNECT_TIMEOUT,
            format!("{}s", properties.connect_timeout_seconds),
        );
        if let Some(server_id) = properties.server_id {
            source = source.with_option(MysqlOptions::OPTION_SERVER_ID, server_id);
        }

        debug!(
            job_id = meta.job_id(),
            host = %properties.host,
            port = properties.port,
            database = %properties.database,
            "Built MySQL source"
        );
        Ok(source)
    }
}

rdbsync_common::register_source_helper!(MysqlContextSourceHelper);
