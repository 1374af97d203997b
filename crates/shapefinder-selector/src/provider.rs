//! # Provider Interfaces
//!
//! The two paginated listings the selector consumes.
//!
//! ## Paging Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cooperative Paging                              │
//! │                                                                         │
//! │  Selector                              Provider                         │
//! │     │  request { next_token: None }       │                             │
//! │     │ ──────────────────────────────────► │                             │
//! │     │  page { items, next_token: "a" }    │                             │
//! │     │ ◄────────────────────────────────── │                             │
//! │     │  (consume page → Continue / Break)  │                             │
//! │     │  request { next_token: "a" }        │                             │
//! │     │ ──────────────────────────────────► │                             │
//! │     │  page { items, next_token: None }   │  ← last page                │
//! │     │ ◄────────────────────────────────── │                             │
//! │                                                                         │
//! │  Break after a page ⇒ no further request is issued.                    │
//! │  Requests are strictly sequential; nothing is fetched ahead.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every request carries the selector's user-agent tag so a network-backed
//! provider can attach it to outgoing calls.

use std::future::Future;

use serde::{Deserialize, Serialize};
use shapefinder_core::{LocationType, ShapeInfo};

use crate::error::ProviderResult;

/// Call name used when a catalog page fails.
pub const DESCRIBE_SHAPES: &str = "DescribeInstanceTypes";

/// Call name used when an availability page fails.
pub const DESCRIBE_OFFERINGS: &str = "DescribeInstanceTypeOfferings";

// =============================================================================
// Catalog Paging
// =============================================================================

/// One request for a page of the full catalog. No server-side filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapePageRequest {
    pub next_token: Option<String>,
    pub max_results: usize,
    pub user_agent: String,
}

#[derive(Debug, Clone, Default)]
pub struct ShapePage {
    pub shapes: Vec<ShapeInfo>,
    /// `None` on the last page.
    pub next_token: Option<String>,
}

/// Paginated listing of every catalog record.
pub trait CatalogProvider {
    fn describe_shapes(
        &self,
        request: ShapePageRequest,
    ) -> impl Future<Output = ProviderResult<ShapePage>> + Send;
}

// =============================================================================
// Availability Paging
// =============================================================================

/// One request for a page of offerings in a single location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferingPageRequest {
    pub location_type: LocationType,
    pub location: String,
    pub next_token: Option<String>,
    pub max_results: usize,
    pub user_agent: String,
}

/// "This instance type is offered in this location."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceTypeOffering {
    pub instance_type: String,
    pub location_type: LocationType,
    pub location: String,
}

#[derive(Debug, Clone, Default)]
pub struct OfferingPage {
    pub offerings: Vec<InstanceTypeOffering>,
    pub next_token: Option<String>,
}

/// Paginated listing of offerings, filtered server-side by location.
pub trait AvailabilityProvider {
    fn describe_offerings(
        &self,
        request: OfferingPageRequest,
    ) -> impl Future<Output = ProviderResult<OfferingPage>> + Send;
}
