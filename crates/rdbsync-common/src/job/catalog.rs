//! Source helper catalog
//!
//! The catalog maps protocol keys to source helpers. It is built once, from
//! discovery and/or explicit registrations, and is read-only afterwards, so
//! it can be shared behind an `Arc` and read from any number of threads.
//!
//! Building is best-effort: a candidate whose protocol cannot be extracted,
//! or whose constructor fails, is logged and recorded in
//! [`SourceHelperCatalog::skipped`] while every other candidate is still
//! registered.
//!
//! # Example
//!
//! ```rust,ignore
//! use rdbsync_common::job::catalog::SourceHelperCatalog;
//! use rdbsync_common::job::discovery::InventoryDiscovery;
//!
//! let catalog = SourceHelperCatalog::builder()
//!     .discover(&InventoryDiscovery, "rdbsync_connector")
//!     .build()?;
//! assert!(catalog.contains("MySQL"));
//! ```

use super::discovery::{CapabilityExtractor, Discovery, ExtractionError, SourceHelperCandidate};
use super::helper::{AnySourceHelper, ContextSourceHelper, CONTRACT_TYPE_NAME};
use super::spec::HelperSpec;
use crate::error::{ConnectError, ConnectorResult, Result};
use crate::rule::Protocol;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What happens when two helpers declare the same protocol
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// The later registration replaces the earlier one (logged)
    #[default]
    LastWins,
    /// Building the catalog fails
    FailFast,
}

/// Why a candidate is missing from the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Its protocol could not be determined
    Extraction(ExtractionError),
    /// Its constructor failed
    Instantiation(String),
    /// A later helper took over its protocol
    Duplicate(Protocol),
}

/// A candidate left out of the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCandidate {
    pub type_name: &'static str,
    pub reason: SkipReason,
}

type HelperFactory = Box<dyn FnOnce() -> ConnectorResult<Box<dyn AnySourceHelper>>>;

struct PendingHelper {
    type_name: &'static str,
    protocol: std::result::Result<Protocol, ExtractionError>,
    factory: HelperFactory,
}

struct RegisteredHelper {
    type_name: &'static str,
    helper: Arc<dyn AnySourceHelper>,
}

/// Accumulates registrations and builds a [`SourceHelperCatalog`]
#[derive(Default)]
pub struct CatalogBuilder {
    policy: DuplicatePolicy,
    pending: Vec<PendingHelper>,
}

impl CatalogBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duplicate-protocol policy
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Add every candidate `discovery` reports within `scope`
    pub fn discover(self, discovery: &dyn Discovery, scope: &str) -> Self {
        discovery
            .scan(scope)
            .into_iter()
            .fold(self, |builder, candidate| builder.candidate(candidate))
    }

    /// Add a single candidate
    pub fn candidate(mut self, candidate: SourceHelperCandidate) -> Self {
        if candidate.type_name == CONTRACT_TYPE_NAME {
            debug!(scope = candidate.scope, "Ignoring the contract type itself");
            return self;
        }
        self.pending.push(PendingHelper {
            type_name: candidate.type_name,
            protocol: CapabilityExtractor::extract(&candidate),
            factory: Box::new(candidate.factory),
        });
        self
    }

    /// Register a typed helper
    ///
    /// The helper is recorded under its bare type name and defining module,
    /// the same names `register_source_helper!` records.
    pub fn register_helper<T: ContextSourceHelper>(self) -> Self {
        let (scope, type_name) = split_type_name(std::any::type_name::<T>());
        self.candidate(SourceHelperCandidate::of::<T>(type_name, scope))
    }

    /// Register a helper factory under an explicit protocol
    pub fn register<F>(mut self, protocol: impl Into<Protocol>, factory: F) -> Self
    where
        F: FnOnce() -> ConnectorResult<Box<dyn AnySourceHelper>> + 'static,
    {
        self.pending.push(PendingHelper {
            type_name: std::any::type_name::<F>(),
            protocol: Ok(protocol.into()),
            factory: Box::new(factory),
        });
        self
    }

    /// Instantiate all registrations in order
    pub fn build(self) -> Result<SourceHelperCatalog> {
        let mut helpers: HashMap<Protocol, RegisteredHelper> = HashMap::new();
        let mut skipped = Vec::new();

        for pending in self.pending {
            let protocol = match pending.protocol {
                Ok(protocol) => protocol,
                Err(e) => {
                    warn!(helper = pending.type_name, error = %e, "Skipping source helper");
                    skipped.push(SkippedCandidate {
                        type_name: pending.type_name,
                        reason: SkipReason::Extraction(e),
                    });
                    continue;
                }
            };

            let helper: Arc<dyn AnySourceHelper> = match (pending.factory)() {
                Ok(helper) => Arc::from(helper),
                Err(e) => {
                    warn!(
                        helper = pending.type_name,
                        %protocol,
                        error = %e,
                        "Create source helper instance failed"
                    );
                    skipped.push(SkippedCandidate {
                        type_name: pending.type_name,
                        reason: SkipReason::Instantiation(e.to_string()),
                    });
                    continue;
                }
            };

            if let Some(previous) = helpers.get(&protocol) {
                if self.policy == DuplicatePolicy::FailFast {
                    return Err(ConnectError::duplicate(
                        protocol.as_str(),
                        previous.type_name,
                        pending.type_name,
                    ));
                }
                warn!(
                    %protocol,
                    previous = previous.type_name,
                    helper = pending.type_name,
                    "Duplicate source protocol, replacing previous helper"
                );
                skipped.push(SkippedCandidate {
                    type_name: previous.type_name,
                    reason: SkipReason::Duplicate(protocol.clone()),
                });
            }

            debug!(%protocol, helper = pending.type_name, "Registered source helper");
            helpers.insert(
                protocol,
                RegisteredHelper {
                    type_name: pending.type_name,
                    helper,
                },
            );
        }

        info!(
            helpers = helpers.len(),
            skipped = skipped.len(),
            "Source helper catalog built"
        );

        Ok(SourceHelperCatalog { helpers, skipped })
    }
}

/// Split `a::b::Helper<x::Y>` into `a::b` and `Helper<x::Y>`
fn split_type_name(full: &'static str) -> (&'static str, &'static str) {
    let path_end = full.find('<').unwrap_or(full.len());
    match full[..path_end].rfind("::") {
        Some(i) => (&full[..i], &full[i + 2..]),
        None => ("", full),
    }
}

/// Immutable mapping from protocol to source helper
pub struct SourceHelperCatalog {
    helpers: HashMap<Protocol, RegisteredHelper>,
    skipped: Vec<SkippedCandidate>,
}

impl SourceHelperCatalog {
    /// Create a builder
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Build from every candidate `discovery` reports within `scope`
    pub fn discover(discovery: &dyn Discovery, scope: &str) -> Result<Self> {
        CatalogBuilder::new().discover(discovery, scope).build()
    }

    /// Helper for a protocol, ignoring case
    pub fn get(&self, protocol: &str) -> Option<&Arc<dyn AnySourceHelper>> {
        self.helpers
            .get(protocol.to_lowercase().as_str())
            .map(|entry| &entry.helper)
    }

    /// Implementation type registered for a protocol, ignoring case
    pub fn type_name(&self, protocol: &str) -> Option<&'static str> {
        self.helpers
            .get(protocol.to_lowercase().as_str())
            .map(|entry| entry.type_name)
    }

    /// Check if a protocol is registered
    pub fn contains(&self, protocol: &str) -> bool {
        self.helpers.contains_key(protocol.to_lowercase().as_str())
    }

    /// Registered protocols, sorted
    pub fn protocols(&self) -> Vec<&Protocol> {
        let mut protocols: Vec<_> = self.helpers.keys().collect();
        protocols.sort();
        protocols
    }

    /// Specifications of all registered helpers, sorted by protocol
    pub fn specs(&self) -> Vec<HelperSpec> {
        self.protocols()
            .into_iter()
            .filter_map(|protocol| self.helpers.get(protocol))
            .map(|entry| entry.helper.spec())
            .collect()
    }

    /// Candidates left out while building
    pub fn skipped(&self) -> &[SkippedCandidate] {
        &self.skipped
    }

    /// Number of registered helpers
    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }
}

impl std::fmt::Debug for SourceHelperCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceHelperCatalog")
            .field("protocols", &self.protocols())
            .field("skipped", &self.skipped)
            .finish()
    }
}
