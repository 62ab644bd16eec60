//! End-to-end dispatch over the linked connectors

use rdbsync_common::job::StartupMode;
use rdbsync_common::prelude::*;
use rdbsync_connector::mysql::MysqlPipelineDistProperties;
use rdbsync_connector::postgres::PostgresPipelineDistProperties;
use serial_test::serial;

fn meta(source: &[(&str, &str)]) -> ContextMeta {
    ContextMeta::new("job-1").with_source_properties(source.iter().copied().collect())
}

#[test]
fn test_both_connectors_are_discovered() {
    assert_eq!(
        rdbsync_connector::available_protocols(),
        vec!["mysql".to_string(), "postgres".to_string()]
    );

    let proxy = ContextSourceHelperProxy::new().unwrap();
    assert!(proxy.catalog().contains("mysql"));
    assert!(proxy.catalog().contains("postgres"));
    assert!(proxy.catalog().skipped().is_empty());
}

#[test]
fn test_routes_mysql() {
    let proxy = rdbsync_connector::source_helper_proxy().unwrap();
    let source = proxy
        .get_source(&meta(&[("protocol", "mysql"), ("database", "shop")]))
        .unwrap();
    assert_eq!(source.connector_type, "mysql-cdc");
    assert_eq!(source.connection.port, 3306);
}

#[test]
fn test_routes_postgres_ignoring_case() {
    let proxy = rdbsync_connector::source_helper_proxy().unwrap();
    let source = proxy
        .get_source(&meta(&[("protocol", "PostgreS"), ("database", "analytics")]))
        .unwrap();
    assert_eq!(source.connector_type, "postgres-cdc");
    assert_eq!(source.connection.port, 5432);
}

#[test]
fn test_unregistered_protocol_is_unsupported() {
    let proxy = rdbsync_connector::source_helper_proxy().unwrap();
    let err = proxy
        .get_source(&meta(&[("protocol", "oracle"), ("database", "x")]))
        .unwrap_err();
    assert_eq!(err.to_string(), "unsupported source protocol: oracle");
}

#[test]
fn test_helper_errors_pass_through() {
    let proxy = rdbsync_connector::source_helper_proxy().unwrap();
    let err = proxy
        .get_source(&meta(&[
            ("protocol", "postgres"),
            ("database", "analytics"),
            ("startup_mode", "earliest-offset"),
        ]))
        .unwrap_err();
    assert!(matches!(err, ConnectorError::Config(_)));
}

#[test]
fn test_specs_cover_both_connectors() {
    let proxy = rdbsync_connector::source_helper_proxy().unwrap();
    let types: Vec<_> = proxy
        .catalog()
        .specs()
        .into_iter()
        .map(|spec| spec.connector_type)
        .collect();
    assert_eq!(types, vec!["mysql-cdc", "postgres-cdc"]);
}

#[test]
#[serial]
fn test_job_file_to_source_and_dist() {
    std::env::set_var("RDBSYNC_IT_MYSQL_HOST", "mysql.internal");
    let job = JobConfig::from_yaml(
        r#"
job_id: orders-sync
source:
  protocol: MySQL
  host: ${RDBSYNC_IT_MYSQL_HOST}
  database: shop
  server_id: "5400-5401"
  parallelism: 2
  startup_mode: latest-offset
dist:
  protocol: mysql
  host: ${RDBSYNC_IT_SINK_HOST:-warehouse.internal}
  database: dw
  semantic: exactly-once
  tx_max_commit_attempts: 5
"#,
    )
    .unwrap();
    std::env::remove_var("RDBSYNC_IT_MYSQL_HOST");

    let meta = job.into_context();
    let source = rdbsync_connector::source_helper_proxy()
        .unwrap()
        .get_source(&meta)
        .unwrap();
    assert_eq!(source.source_id, "orders-sync");
    assert_eq!(source.connection.host, "mysql.internal");
    assert_eq!(source.option("server-id"), Some("5400-5401"));
    assert_eq!(source.startup_mode, StartupMode::LatestOffset);

    let dist = MysqlPipelineDistProperties::parse(meta.pipeline_dist_properties()).unwrap();
    assert_eq!(dist.connection_url(), "jdbc:mysql://warehouse.internal:3306/dw");
    let options = dist.exactly_once_options().unwrap();
    assert_eq!(options.max_commit_attempts, 5);
    assert_eq!(options.timeout, None);
}

#[test]
fn test_postgres_dist_from_job() {
    let job = JobConfig::from_yaml(
        r#"
job_id: analytics
source:
  protocol: postgres
  database: app
dist:
  protocol: postgres
  schema: staging
"#,
    )
    .unwrap();
    let meta = job.into_context();
    let dist = PostgresPipelineDistProperties::parse(meta.pipeline_dist_properties()).unwrap();
    assert_eq!(dist.protocol().as_str(), "postgres");
    assert_eq!(dist.schema(), "staging");
    assert_eq!(dist.username(), "postgres");
}

#[test]
fn test_source_debug_hides_password() {
    let proxy = rdbsync_connector::source_helper_proxy().unwrap();
    let source = proxy
        .get_source(&meta(&[
            ("protocol", "mysql"),
            ("database", "shop"),
            ("password", "hunter2"),
        ]))
        .unwrap();
    assert_eq!(source.connection.password.expose_secret(), "hunter2");
    assert!(!format!("{:?}", source).contains("hunter2"));
}

#[test]
fn test_unquoted_numeric_passwords() {
    let job = JobConfig::from_yaml(
        r#"
job_id: orders-sync
source:
  protocol: mysql
  database: shop
  password: 123456
dist:
  protocol: mysql
  database: dw
  password: 654321
"#,
    )
    .unwrap();
    let meta = job.into_context();

    let source = rdbsync_connector::source_helper_proxy()
        .unwrap()
        .get_source(&meta)
        .unwrap();
    assert_eq!(source.connection.password.expose_secret(), "123456");

    let dist = MysqlPipelineDistProperties::parse(meta.pipeline_dist_properties()).unwrap();
    assert_eq!(dist.password().expose_secret(), "654321");
}
