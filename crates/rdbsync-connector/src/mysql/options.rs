//! MySQL connector constants

use rdbsync_common::ConnectionDefaults;

/// Defaults and option keys of the MySQL connector
pub struct MysqlOptions;

impl MysqlOptions {
    pub const DEFAULT_HOST: &'static str = "localhost";
    pub const DEFAULT_PORT: u16 = 3306;
    pub const DEFAULT_USERNAME: &'static str = "root";
    pub const DEFAULT_PASSWORD: &'static str = "root";

    /// Rows per incremental snapshot chunk
    pub const DEFAULT_SPLIT_SIZE: u32 = 8096;
    pub const DEFAULT_PARALLELISM: u32 = 1;
    pub const DEFAULT_CONNECT_TIMEOUT_SECONDS: u32 = 30;

    pub const CONNECTOR_TYPE: &'static str = "mysql-cdc";
    pub const JDBC_SCHEME: &'static str = "mysql";

    pub const OPTION_SERVER_ID: &'static str = "server-id";
    pub const OPTION_SPLIT_SIZE: &'static str = "scan.incremental.snapshot.chunk.size";
    pub const OPTION_PARALLELISM: &'static str = "parallelism";
    pub const OPTION_CONNECT_TIMEOUT: &'static str = "connect.timeout";

    /// Connection fallbacks shared by source and destination
    pub const CONNECTION_DEFAULTS: ConnectionDefaults = ConnectionDefaults {
        host: Self::DEFAULT_HOST,
        port: Self::DEFAULT_PORT,
        username: Self::DEFAULT_USERNAME,
        password: Self::DEFAULT_PASSWORD,
    };
}
