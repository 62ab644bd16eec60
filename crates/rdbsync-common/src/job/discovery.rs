//! Source helper discovery
//!
//! Connectors announce themselves with [`register_source_helper!`], which
//! submits a [`SourceHelperCandidate`] to a link-time collection. A
//! [`Discovery`] hands candidates to the catalog; the
//! [`CapabilityExtractor`] turns each candidate's declared database variant
//! into a protocol key.
//!
//! ```rust,ignore
//! pub struct MysqlContextSourceHelper;
//!
//! impl ContextSourceHelper for MysqlContextSourceHelper { /* ... */ }
//!
//! rdbsync_common::register_source_helper!(MysqlContextSourceHelper);
//! ```

use super::helper::{AnySourceHelper, ContextSourceHelper};
use crate::error::ConnectorResult;
use crate::rule::{Protocol, Rdb};
use thiserror::Error;

/// A discoverable source helper implementation
#[derive(Clone, Copy)]
pub struct SourceHelperCandidate {
    /// Implementation type name, for diagnostics
    pub type_name: &'static str,
    /// Module path the candidate was registered from
    pub scope: &'static str,
    /// Simple name of the declared database variant
    pub declared_rdb: fn() -> Option<&'static str>,
    /// No-argument constructor
    pub factory: fn() -> ConnectorResult<Box<dyn AnySourceHelper>>,
}

impl SourceHelperCandidate {
    /// Candidate for a typed helper
    pub const fn of<T: ContextSourceHelper>(type_name: &'static str, scope: &'static str) -> Self {
        Self {
            type_name,
            scope,
            declared_rdb: declared_rdb::<T>,
            factory: instantiate::<T>,
        }
    }

    /// Whether the candidate was registered inside `scope`
    pub fn in_scope(&self, scope: &str) -> bool {
        scope.is_empty()
            || self.scope == scope
            || self
                .scope
                .strip_prefix(scope)
                .is_some_and(|rest| rest.starts_with("::"))
    }
}

impl std::fmt::Debug for SourceHelperCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceHelperCandidate")
            .field("type_name", &self.type_name)
            .field("scope", &self.scope)
            .field("declared_rdb", &(self.declared_rdb)())
            .finish()
    }
}

fn declared_rdb<T: ContextSourceHelper>() -> Option<&'static str> {
    Some(<T::Rdb as Rdb>::NAME)
}

fn instantiate<T: ContextSourceHelper>() -> ConnectorResult<Box<dyn AnySourceHelper>> {
    Ok(Box::new(T::create()?))
}

inventory::collect!(SourceHelperCandidate);

/// Register a source helper for link-time discovery
#[macro_export]
macro_rules! register_source_helper {
    ($helper:ty) => {
        $crate::inventory::submit! {
            $crate::job::discovery::SourceHelperCandidate::of::<$helper>(
                stringify!($helper),
                module_path!(),
            )
        }
    };
}

/// Supplies source helper candidates
pub trait Discovery: Send + Sync {
    /// Candidates registered within `scope`; an empty scope matches all
    fn scan(&self, scope: &str) -> Vec<SourceHelperCandidate>;
}

/// Discovery over every helper registered with [`register_source_helper!`]
/// in the linked binary
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryDiscovery;

impl Discovery for InventoryDiscovery {
    fn scan(&self, scope: &str) -> Vec<SourceHelperCandidate> {
        inventory::iter::<SourceHelperCandidate>
            .into_iter()
            .filter(|candidate| candidate.in_scope(scope))
            .copied()
            .collect()
    }
}

/// Discovery over an explicit candidate list
#[derive(Debug, Clone, Default)]
pub struct StaticDiscovery {
    candidates: Vec<SourceHelperCandidate>,
}

impl StaticDiscovery {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate
    pub fn with(mut self, candidate: SourceHelperCandidate) -> Self {
        self.candidates.push(candidate);
        self
    }
}

impl Discovery for StaticDiscovery {
    fn scan(&self, scope: &str) -> Vec<SourceHelperCandidate> {
        self.candidates
            .iter()
            .filter(|candidate| candidate.in_scope(scope))
            .copied()
            .collect()
    }
}

/// Why a candidate's protocol could not be determined
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// The candidate is not bound to a concrete database variant
    #[error("{0} does not declare a database variant")]
    Undeclared(String),

    /// The declared variant name cannot serve as a protocol key
    #[error("{type_name} declares an invalid database variant name '{name}'")]
    InvalidName { type_name: String, name: String },
}

/// Derives protocol keys from declared database variants
#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilityExtractor;

impl CapabilityExtractor {
    /// Protocol key of a candidate
    pub fn extract(candidate: &SourceHelperCandidate) -> Result<Protocol, ExtractionError> {
        let name = (candidate.declared_rdb)()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ExtractionError::Undeclared(candidate.type_name.to_string()))?;

        if !is_identifier(name) {
            return Err(ExtractionError::InvalidName {
                type_name: candidate.type_name.to_string(),
                name: name.to_string(),
            });
        }

        Ok(Protocol::new(name))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
