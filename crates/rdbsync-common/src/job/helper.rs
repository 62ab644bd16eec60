//! Source-building contract
//!
//! Connectors implement the typed [`ContextSourceHelper`]. The pipeline core
//! only sees the type-erased [`AnySourceHelper`], which every typed helper
//! gets through a blanket implementation and which the dispatch proxy
//! implements directly.

use super::context::ContextMeta;
use super::source::StreamSource;
use super::spec::HelperSpec;
use crate::error::ConnectorResult;
use crate::rule::Rdb;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use validator::Validate;

/// Name under which discovery reports the contract itself
pub const CONTRACT_TYPE_NAME: &str = "ContextSourceHelper";

/// Typed source helper for one relational database variant
pub trait ContextSourceHelper: Send + Sync + 'static {
    /// Database variant served by this helper
    type Rdb: Rdb;

    /// Source properties understood by this helper
    type Properties: DeserializeOwned + Validate + JsonSchema;

    /// No-argument constructor used by the catalog
    fn create() -> ConnectorResult<Self>
    where
        Self: Sized;

    /// Helper specification
    fn spec() -> HelperSpec
    where
        Self: Sized;

    /// Build the stream source from validated properties
    fn build_source(
        &self,
        properties: &Self::Properties,
        meta: &ContextMeta,
    ) -> ConnectorResult<StreamSource>;
}

/// Type-erased source helper used for runtime dispatch
pub trait AnySourceHelper: Send + Sync {
    /// Helper specification
    fn spec(&self) -> HelperSpec;

    /// Build the stream source for a job
    fn get_source(&self, meta: &ContextMeta) -> ConnectorResult<StreamSource>;
}

impl<T: ContextSourceHelper> AnySourceHelper for T {
    fn spec(&self) -> HelperSpec {
        <T as ContextSourceHelper>::spec()
    }

    fn get_source(&self, meta: &ContextMeta) -> ConnectorResult<StreamSource> {
        let properties: T::Properties = meta.pipeline_source_properties().parse()?;
        properties.validate()?;
        self.build_source(&properties, meta)
    }
}
