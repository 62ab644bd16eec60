//! PostgreSQL connector constants

use rdbsync_common::ConnectionDefaults;

/// Defaults and option keys of the PostgreSQL connector
pub struct PostgresOptions;

impl PostgresOptions {
    pub const DEFAULT_HOST: &'static str = "localhost";
    pub const DEFAULT_PORT: u16 = 5432;
    pub const DEFAULT_USERNAME: &'static str = "postgres";
    pub const DEFAULT_PASSWORD: &'static str = "postgres";
    pub const DEFAULT_SCHEMA: &'static str = "public";
    pub const DEFAULT_SLOT_NAME: &'static str = "rdb_sync";

    pub const CONNECTOR_TYPE: &'static str = "postgres-cdc";
    pub const JDBC_SCHEME: &'static str = "postgresql";

    pub const OPTION_SLOT_NAME: &'static str = "slot.name";
    pub const OPTION_DECODING_PLUGIN: &'static str = "decoding.plugin.name";
    pub const OPTION_SCHEMA: &'static str = "schema";

    pub const CONNECTION_DEFAULTS: ConnectionDefaults = ConnectionDefaults {
        host: Self::DEFAULT_HOST,
        port: Self::DEFAULT_PORT,
        username: Self::DEFAULT_USERNAME,
        password: Self::DEFAULT_PASSWORD,
    };
}
