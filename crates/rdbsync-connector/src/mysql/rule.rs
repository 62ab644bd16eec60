use rdbsync_common::Rdb;

/// MySQL and MySQL-compatible databases
#[derive(Debug, Clone, Copy, Default)]
pub struct Mysql;

impl Rdb for Mysql {
    const NAME: &'static str = "Mysql";
}
