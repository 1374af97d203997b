//! # shapefinder-core: Pure Filter Engine for shapefinder
//!
//! This crate answers "does this catalog record satisfy these constraints?"
//! with pure functions and zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      shapefinder Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (shapefinder)                       │   │
//! │  │      flags ──► FilterSpecification ──► Selector ──► stdout     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  shapefinder-selector                           │   │
//! │  │   providers, paging, location resolver, aggregator, outputs    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ shapefinder-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌───────────┐ ┌──────────────────┐ │   │
//! │  │   │  types   │ │ filters  │ │ dispatch  │ │ location         │ │   │
//! │  │   │ShapeInfo │ │ FilterSp.│ │ FILTER_   │ │ classify, index  │ │   │
//! │  │   │          │ │ IntRange │ │ TABLE     │ │                  │ │   │
//! │  │   └──────────┘ └──────────┘ └───────────┘ └──────────────────┘ │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌───────────┐                      │   │
//! │  │   │attributes│ │comparat. │ │candidates │ finalize             │   │
//! │  │   └──────────┘ └──────────┘ └───────────┘                      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog record model (`ShapeInfo`)
//! - [`filters`] - `FilterSpecification` and range bounds
//! - [`attributes`] - Derived attributes (GPU totals, ratio, bandwidth, ...)
//! - [`comparators`] - Leaf predicates
//! - [`dispatch`] - Filter descriptor table and per-record evaluation
//! - [`location`] - Location classification and membership
//! - [`candidates`] - The per-selection candidate set
//! - [`finalize`] - Sort and truncate
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shapefinder_core::{evaluate, DerivedAttributes, FilterSpecification, IntRange, ShapeInfo};
//!
//! let mut shape = ShapeInfo::new("m5.large");
//! shape.vcpu_info.default_vcpus = Some(2);
//!
//! let spec = FilterSpecification {
//!     vcpus_range: Some(IntRange::between(2, 4)),
//!     ..Default::default()
//! };
//!
//! let verdict = evaluate(&spec, &shape, &DerivedAttributes::derive(&shape)).unwrap();
//! assert!(verdict.is_supported());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod attributes;
pub mod candidates;
pub mod comparators;
pub mod dispatch;
pub mod error;
pub mod filters;
pub mod finalize;
pub mod location;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use attributes::DerivedAttributes;
pub use candidates::CandidateSet;
pub use dispatch::{evaluate, Verdict, FILTER_TABLE};
pub use error::{CoreError, CoreResult};
pub use filters::{FilterSpecification, FloatRange, IntRange};
pub use finalize::{finalize, sort_by_name, truncate_results};
pub use location::{classify_location, is_supported_in_location, LocationIndex, LocationType};
pub use types::ShapeInfo;
