//! # Candidate Aggregator
//!
//! Streams the catalog page by page and prunes the candidate set in place.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Candidate Aggregator                               │
//! │                                                                         │
//! │  CatalogProvider ──page──► process_page ──► Continue ──► next page     │
//! │                                 │                                       │
//! │                                 │ per record                            │
//! │                                 ▼                                       │
//! │            ┌────────────────────────────────────────────┐              │
//! │            │ already decided?  ──yes──► ignore (warn)   │              │
//! │            │ derive attributes                          │              │
//! │            │ location member?  ─┐                       │              │
//! │            │ evaluate filters  ─┼─► admit / reject      │              │
//! │            │ dispatch error    ───► Break(CoreError)    │              │
//! │            └────────────────────────────────────────────┘              │
//! │                                                                         │
//! │  Break ⇒ no further page is requested; the selection fails.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Filters are evaluated even for records outside the requested location so
//! that a dispatch inconsistency surfaces regardless of where the caller looks.

use std::ops::ControlFlow;

use shapefinder_core::dispatch::{evaluate_with, FilterDescriptor};
use shapefinder_core::{
    is_supported_in_location, CandidateSet, CoreError, DerivedAttributes, FilterSpecification,
    LocationIndex, ShapeInfo, Verdict, FILTER_TABLE,
};
use tracing::{debug, warn};

use crate::config::PagingSettings;
use crate::error::{SelectorError, SelectorResult};
use crate::provider::{CatalogProvider, ShapePageRequest, DESCRIBE_SHAPES};

// =============================================================================
// Aggregator
// =============================================================================

/// Per-selection state: the specification, the optional location index and
/// the candidates decided so far.
pub struct CandidateAggregator<'a> {
    table: &'a [FilterDescriptor],
    spec: &'a FilterSpecification,
    location_index: Option<&'a LocationIndex>,
    candidates: CandidateSet,
}

impl<'a> CandidateAggregator<'a> {
    pub fn new(spec: &'a FilterSpecification, location_index: Option<&'a LocationIndex>) -> Self {
        Self::with_table(FILTER_TABLE, spec, location_index)
    }

    /// Aggregator evaluating an explicit descriptor table.
    pub fn with_table(
        table: &'a [FilterDescriptor],
        spec: &'a FilterSpecification,
        location_index: Option<&'a LocationIndex>,
    ) -> Self {
        CandidateAggregator {
            table,
            spec,
            location_index,
            candidates: CandidateSet::new(),
        }
    }

    /// Consumes one catalog page. `Break` carries the first dispatch error.
    pub fn process_page(&mut self, shapes: Vec<ShapeInfo>) -> ControlFlow<CoreError> {
        for shape in shapes {
            if self.candidates.is_decided(&shape.instance_type) {
                warn!(
                    instance_type = %shape.instance_type,
                    "Ignoring duplicate catalog entry"
                );
                continue;
            }

            let derived = DerivedAttributes::derive(&shape);
            let in_location = is_supported_in_location(self.location_index, &shape.instance_type);
            let verdict = match evaluate_with(self.table, self.spec, &shape, &derived) {
                Ok(verdict) => verdict,
                Err(e) => return ControlFlow::Break(e),
            };

            match (in_location, verdict) {
                (true, Verdict::Supported) => self.candidates.admit(shape),
                (false, _) => {
                    debug!(instance_type = %shape.instance_type, "Not offered in location");
                    self.candidates.reject(&shape.instance_type);
                }
                (true, Verdict::Rejected { filter }) => {
                    debug!(instance_type = %shape.instance_type, filter, "Rejected by filter");
                    self.candidates.reject(&shape.instance_type);
                }
            }
        }
        ControlFlow::Continue(())
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn into_candidates(self) -> CandidateSet {
        self.candidates
    }
}

// =============================================================================
// Paging Driver
// =============================================================================

/// Sweeps the whole catalog through a [`CandidateAggregator`].
///
/// Pages are requested strictly one after another. A dispatch error stops
/// paging immediately and fails the selection.
pub async fn collect_candidates<P: CatalogProvider>(
    provider: &P,
    spec: &FilterSpecification,
    location_index: Option<&LocationIndex>,
    paging: &PagingSettings,
    user_agent: &str,
) -> SelectorResult<CandidateSet> {
    let aggregator = CandidateAggregator::new(spec, location_index);
    sweep(provider, aggregator, paging, user_agent).await
}

async fn sweep<P: CatalogProvider>(
    provider: &P,
    mut aggregator: CandidateAggregator<'_>,
    paging: &PagingSettings,
    user_agent: &str,
) -> SelectorResult<CandidateSet> {
    let mut next_token = None;
    let mut pages = 0usize;

    loop {
        let page = provider
            .describe_shapes(ShapePageRequest {
                next_token,
                max_results: paging.shape_page_size,
                user_agent: user_agent.to_string(),
            })
            .await
            .map_err(|source| SelectorError::upstream(DESCRIBE_SHAPES, source))?;
        pages += 1;
        debug!(page = pages, records = page.shapes.len(), "Processing catalog page");

        if let ControlFlow::Break(e) = aggregator.process_page(page.shapes) {
            return Err(e.into());
        }

        match page.next_token {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }

    let candidates = aggregator.into_candidates();
    debug!(
        pages,
        admitted = candidates.len(),
        rejected = candidates.rejected_count(),
        "Catalog sweep finished"
    );
    Ok(candidates)
}
