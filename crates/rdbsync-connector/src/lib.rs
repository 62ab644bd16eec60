//! # rdbsync-connector
//!
//! Relational database CDC connectors for rdbsync. Each connector registers
//! its source helper at link time, so linking this crate is enough for
//! [`ContextSourceHelperProxy::new`] to route `mysql` and `postgres` jobs.
//!
//! | Protocol   | Connector type | Feature    |
//! |------------|----------------|------------|
//! | `mysql`    | `mysql-cdc`    | `mysql`    |
//! | `postgres` | `postgres-cdc` | `postgres` |

#[cfg(feature = "mysql")]
pub mod mysql;

#[cfg(feature = "postgres")]
pub mod postgres;

use rdbsync_common::job::{Discovery, InventoryDiscovery};
use rdbsync_common::{ContextSourceHelperProxy, Result};

/// Module scope under which this crate's helpers are registered
pub const SCOPE: &str = module_path!();

/// Protocols served by the connectors compiled into this crate, sorted
pub fn available_protocols() -> Vec<String> {
    let mut protocols: Vec<String> = InventoryDiscovery
        .scan(SCOPE)
        .iter()
        .filter_map(|candidate| rdbsync_common::job::CapabilityExtractor::extract(candidate).ok())
        .map(String::from)
        .collect();
    protocols.sort();
    protocols.dedup();
    protocols
}

/// Dispatch proxy over this crate's connectors only
pub fn source_helper_proxy() -> Result<ContextSourceHelperProxy> {
    ContextSourceHelperProxy::discover(&InventoryDiscovery, SCOPE)
}
