//! Protocol dispatch proxy
//!
//! The pipeline core holds a single [`ContextSourceHelperProxy`] and calls it
//! like any other source helper. The proxy reads the `protocol` property of the
//! job's source properties and forwards to the helper registered for it.

use super::catalog::SourceHelperCatalog;
use super::context::ContextMeta;
use super::discovery::{Discovery, InventoryDiscovery};
use super::helper::AnySourceHelper;
use super::source::StreamSource;
use super::spec::HelperSpec;
use crate::error::{ConnectorError, ConnectorResult, Result};
use std::sync::Arc;
use tracing::debug;

/// Source helper that dispatches on the `protocol` source property
#[derive(Debug, Clone)]
pub struct ContextSourceHelperProxy {
    catalog: Arc<SourceHelperCatalog>,
}

impl ContextSourceHelperProxy {
    /// Proxy over every helper registered in the linked binary
    pub fn new() -> Result<Self> {
        Self::discover(&InventoryDiscovery, "")
    }

    /// Proxy over the helpers `discovery` reports within `scope`
    pub fn discover(discovery: &dyn Discovery, scope: &str) -> Result<Self> {
        let catalog = SourceHelperCatalog::discover(discovery, scope)?;
        Ok(Self::with_catalog(Arc::new(catalog)))
    }

    /// Proxy over a prebuilt catalog
    pub fn with_catalog(catalog: Arc<SourceHelperCatalog>) -> Self {
        Self { catalog }
    }

    /// The catalog this proxy dispatches over
    pub fn catalog(&self) -> &Arc<SourceHelperCatalog> {
        &self.catalog
    }

    fn resolve(&self, protocol: &str) -> ConnectorResult<&Arc<dyn AnySourceHelper>> {
        self.catalog
            .get(protocol)
            .ok_or_else(|| ConnectorError::unsupported_protocol(protocol))
    }
}

impl AnySourceHelper for ContextSourceHelperProxy {
    fn spec(&self) -> HelperSpec {
        HelperSpec::new("proxy", "*", env!("CARGO_PKG_VERSION"))
            .description("Dispatches to the source helper registered for the job's protocol")
    }

    fn get_source(&self, meta: &ContextMeta) -> ConnectorResult<StreamSource> {
        let protocol = meta.pipeline_source_properties().protocol().unwrap_or_default();
        debug!(job_id = meta.job_id(), protocol, "Dispatching source helper");
        self.resolve(protocol)?.get_source(meta)
    }
}
