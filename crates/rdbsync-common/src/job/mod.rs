//! Source helper contract, catalog and dispatch
//!
//! - [`helper`] - the typed and type-erased source-building contracts
//! - [`discovery`] - link-time registration and capability extraction
//! - [`catalog`] - the immutable protocol-to-helper mapping
//! - [`proxy`] - the dispatch proxy used by the pipeline core

pub mod catalog;
pub mod context;
pub mod discovery;
pub mod helper;
pub mod proxy;
pub mod source;
pub mod spec;

pub use catalog::{
    CatalogBuilder, DuplicatePolicy, SkipReason, SkippedCandidate, SourceHelperCatalog,
};
pub use context::{ContextMeta, PipelineProperties};
pub use discovery::{
    CapabilityExtractor, Discovery, ExtractionError, InventoryDiscovery, SourceHelperCandidate,
    StaticDiscovery,
};
pub use helper::{AnySourceHelper, ContextSourceHelper, CONTRACT_TYPE_NAME};
pub use proxy::ContextSourceHelperProxy;
pub use source::{ChangeEventFormat, SourceConnection, StartupMode, StreamSource};
pub use spec::HelperSpec;
