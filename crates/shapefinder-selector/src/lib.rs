//! # shapefinder-selector: Paginated Selection over Catalog Providers
//!
//! This crate connects the pure filter engine in `shapefinder-core` to the
//! two provider listings it needs: the full catalog and the per-location
//! offerings.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       shapefinder-selector                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        Selector                                 │   │
//! │  │   filter() / filter_verbose() / filter_with_output()            │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────┐ ┌─────────────▼───────────────────┐   │
//! │  │ resolver                    │ │ aggregator                      │   │
//! │  │ location → LocationIndex    │ │ catalog pages → CandidateSet    │   │
//! │  └──────────────┬──────────────┘ └─────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────────────────────▼───────────────────┐   │
//! │  │ provider traits: AvailabilityProvider, CatalogProvider          │   │
//! │  │ snapshot: JSON-backed implementation of both                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Supporting: config (TOML + env), outputs (formatters), error          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`selector`] - `Selector` entry points
//! - [`aggregator`] - Catalog paging and candidate pruning
//! - [`resolver`] - Location resolution into a `LocationIndex`
//! - [`provider`] - Provider traits and page types
//! - [`snapshot`] - JSON snapshot provider
//! - [`outputs`] - Output formatters
//! - [`config`] - Selector configuration
//! - [`error`] - Selector error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shapefinder_selector::{Selector, SelectorConfig, SnapshotProvider};
//! use shapefinder_core::{FilterSpecification, IntRange};
//!
//! let config = SelectorConfig::load_or_default(None);
//! let provider = SnapshotProvider::load("catalog.json".as_ref())?;
//! let selector = Selector::new(provider, &config);
//!
//! let spec = FilterSpecification {
//!     vcpus_range: Some(IntRange::between(2, 4)),
//!     ..Default::default()
//! };
//! for name in selector.filter(&spec).await? {
//!     println!("{name}");
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregator;
pub mod config;
pub mod error;
pub mod outputs;
pub mod provider;
pub mod resolver;
pub mod selector;
pub mod snapshot;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports
// =============================================================================

pub use aggregator::{collect_candidates, CandidateAggregator};
pub use config::{CatalogSettings, ClientSettings, OutputSettings, PagingSettings, SelectorConfig};
pub use error::{ProviderError, ProviderResult, SelectorError, SelectorResult};
pub use outputs::{
    simple_output, table_output, table_wide_output, verbose_output, OutputFn, OutputFormat,
};
pub use provider::{
    AvailabilityProvider, CatalogProvider, InstanceTypeOffering, OfferingPage,
    OfferingPageRequest, ShapePage, ShapePageRequest,
};
pub use resolver::resolve_location;
pub use selector::Selector;
pub use snapshot::{CatalogSnapshot, SnapshotProvider};
