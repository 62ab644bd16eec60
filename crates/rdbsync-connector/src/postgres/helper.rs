//! PostgreSQL source helper

use super::config::PostgresPipelineSourceProperties;
use super::options::PostgresOptions;
use super::rule::Postgres;
use rdbsync_common::prelude::*;
use tracing::debug;

/// Builds PostgreSQL logical replication sources
#[derive(Debug, Default)]
pub struct PostgresContextSourceHelper;

impl ContextSourceHelper for PostgresContextSourceHelper {
    type Rdb = Postgres;
    type Properties = PostgresPipelineSourceProperties;

    fn create() -> ConnectorResult<Self> {
        Ok(Self)
    }

    fn spec() -> HelperSpec {
        HelperSpec::new(
            PostgresOptions::CONNECTOR_TYPE,
            Protocol::of::<Postgres>().as_str(),
            env!("CARGO_PKG_VERSION"),
        )
        .description("PostgreSQL CDC source using logical replication")
        .config_schema_from::<PostgresPipelineSourceProperties>()
    }

    fn build_source(
        &self,
        properties: &PostgresPipelineSourceProperties,
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

        let source = StreamSource::new(
            meta.job_id(),
            PostgresOptions::CONNECTOR_TYPE,
            Protocol::of::<Postgres>(),
            connection,
        )
        .with_tables(properties.tables())
        .with_startup_mode(properties.startup_mode)
        .with_option(PostgresOptions::OPTION_SLOT_NAME, &properties.slot_name)
        .with_option(
            PostgresOptions::OPTION_DECODING_PLUGIN,
            properties.decoding_plugin.as_str(),
        )
        .with_option(PostgresOptions::OPTION_SCHEMA, &properties.schema);

        debug!(
            job_id = meta.job_id(),
            host = %properties.host,
            slot = %properties.slot_name,
            "Built PostgreSQL source"
        );
        Ok(source)
    }
}

rdbsync_common::register_source_helper!(PostgresContextSourceHelper);

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(props: PipelineProperties) -> ContextMeta {
        ContextMeta::new("analytics-sync")
            .with_source_properties(props.with("protocol", "postgres"))
    }

    #[test]
    fn test_build_source() {
        let props = PipelineProperties::new()
            .with("host", "pg.internal")
            .with("database", "analytics")
            .with("schema", "sales")
            .with("slot_name", "sales_slot");
        let source =
            AnySourceHelper::get_source(&PostgresContextSourceHelper, &meta(props)).unwrap();

        assert_eq!(source.connector_type, "postgres-cdc");
        assert_eq!(source.protocol.as_str(), "postgres");
        assert_eq!(source.connection.host, "pg.internal");
        assert_eq!(source.connection.port, 5432);
        assert_eq!(source.tables, vec!["sales.*"]);
        assert_eq!(source.option("slot.name"), Some("sales_slot"));
        assert_eq!(source.option("decoding.plugin.name"), Some("pgoutput"));
        assert_eq!(source.option("schema"), Some("sales"));
    }

    #[test]
    fn test_invalid_slot_name_fails() {
        let props = PipelineProperties::new()
            .with("database", "analytics")
            .with("slot_name", "Bad Slot");
        let err =
            AnySourceHelper::get_source(&PostgresContextSourceHelper, &meta(props)).unwrap_err();
        assert!(matches!(err, ConnectorError::Config(_)));
    }

    #[test]
    fn test_spec() {
        let spec = <PostgresContextSourceHelper as ContextSourceHelper>::spec();
        assert_eq!(spec.connector_type, "postgres-cdc");
        assert_eq!(spec.protocol, "postgres");
        assert!(spec.property_names().contains(&"slot_name"));
    }
}
