//! Relational database variants and protocol keys
//!
//! Every connector names the database family it serves through a zero-sized
//! marker implementing [`Rdb`]. The marker's simple name, lowercased, is the
//! connector's [`Protocol`].

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Marker for a relational database variant.
///
/// ```rust
/// use rdbsync_common::rule::{Protocol, Rdb};
///
/// pub struct Mysql;
///
/// impl Rdb for Mysql {
///     const NAME: &'static str = "Mysql";
/// }
///
/// assert_eq!(Protocol::of::<Mysql>().as_str(), "mysql");
/// ```
pub trait Rdb: Send + Sync + 'static {
    /// Simple name of the variant, e.g. `Mysql`
    const NAME: &'static str;
}

/// The unparameterized variant.
///
/// Declares no name, so a helper bound to it cannot be assigned a protocol
/// and is left out of the catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyRdb;

impl Rdb for AnyRdb {
    const NAME: &'static str = "";
}

/// Canonical (lowercase) protocol identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Protocol(String);

impl Protocol {
    /// Canonicalize a protocol name
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().to_lowercase())
    }

    /// Protocol served by the given variant
    pub fn of<R: Rdb>() -> Self {
        Self::new(R::NAME)
    }

    /// Canonical form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `name` denotes this protocol, ignoring case
    pub fn matches(&self, name: &str) -> bool {
        self.0 == name.to_lowercase()
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Protocol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Protocol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Protocol {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<Protocol> for String {
    fn from(protocol: Protocol) -> Self {
        protocol.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Postgres;

    impl Rdb for Postgres {
        const NAME: &'static str = "Postgres";
    }

    #[test]
    fn test_protocol_is_lowercased() {
        assert_eq!(Protocol::new("MySQL").as_str(), "mysql");
        assert_eq!(Protocol::from("POSTGRES"), Protocol::new("postgres"));
    }

    #[test]
    fn test_protocol_of_variant() {
        assert_eq!(Protocol::of::<Postgres>().to_string(), "postgres");
        assert_eq!(Protocol::of::<AnyRdb>().as_str(), "");
    }

    #[test]
    fn test_protocol_matches_any_case() {
        let protocol = Protocol::new("mysql");
        assert!(protocol.matches("MySQL"));
        assert!(protocol.matches("mysql"));
        assert!(!protocol.matches("mariadb"));
    }

    #[test]
    fn test_protocol_deserialize_canonicalizes() {
        let protocol: Protocol = serde_json::from_str("\"PostgreSQL\"").unwrap();
        assert_eq!(protocol.as_str(), "postgresql");
    }

    #[test]
    fn test_protocol_borrow_lookup() {
        let mut map = std::collections::HashMap::new();
        map.insert(Protocol::new("MySQL"), 1);
        assert_eq!(map.get("mysql"), Some(&1));
    }
}
