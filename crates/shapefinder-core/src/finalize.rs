//! # Result Finalizer
//!
//! Imposes a deterministic order on the survivors and applies the
//! optional result limit.

use crate::candidates::CandidateSet;
use crate::types::ShapeInfo;

/// Sorts ascending by instance type name (byte-wise lexicographic).
///
/// Names are unique keys, so the order is total.
pub fn sort_by_name(mut shapes: Vec<ShapeInfo>) -> Vec<ShapeInfo> {
    shapes.sort_unstable_by(|a, b| a.instance_type.cmp(&b.instance_type));
    shapes
}

/// Keeps the first `max_results` entries; `None` keeps everything.
pub fn truncate_results<T>(max_results: Option<usize>, mut items: Vec<T>) -> Vec<T> {
    if let Some(max) = max_results {
        items.truncate(max);
    }
    items
}

/// Sort, then truncate.
pub fn finalize(candidates: CandidateSet, max_results: Option<usize>) -> Vec<ShapeInfo> {
    truncate_results(max_results, sort_by_name(candidates.into_records()))
}
