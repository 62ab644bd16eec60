use rdbsync_common::Rdb;

/// PostgreSQL
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Rdb for Postgres {
    const NAME: &'static str = "Postgres";
}
