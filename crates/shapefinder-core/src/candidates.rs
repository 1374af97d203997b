//! # Candidate Set
//!
//! The mutable, per-selection set of records not yet excluded.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  page 1 ──► admit / reject ──┐                                          │
//! │  page 2 ──► admit / reject ──┼──► CandidateSet ──► finalize ──► Vec     │
//! │  page N ──► admit / reject ──┘    (name → record)   sort + truncate     │
//! │                                                                         │
//! │  The FIRST occurrence of a name decides. A name seen again on a later  │
//! │  page is ignored, so a rejected name is never re-inserted.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{HashMap, HashSet};

use crate::types::ShapeInfo;

/// Name-keyed candidates plus the names already decided against.
#[derive(Debug, Default)]
pub struct CandidateSet {
    candidates: HashMap<String, ShapeInfo>,
    rejected: HashSet<String>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a name has been admitted or rejected.
    pub fn is_decided(&self, instance_type: &str) -> bool {
        self.candidates.contains_key(instance_type) || self.rejected.contains(instance_type)
    }

    /// Keeps a record. Takes ownership; the page it came from is consumed.
    pub fn admit(&mut self, shape: ShapeInfo) {
        self.rejected.remove(&shape.instance_type);
        self.candidates.insert(shape.instance_type.clone(), shape);
    }

    /// Drops a candidate if present and remembers the name. Idempotent.
    pub fn reject(&mut self, instance_type: &str) {
        self.candidates.remove(instance_type);
        self.rejected.insert(instance_type.to_string());
    }

    pub fn contains(&self, instance_type: &str) -> bool {
        self.candidates.contains_key(instance_type)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Number of names decided against so far.
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    /// Releases the surviving records in no particular order.
    pub fn into_records(self) -> Vec<ShapeInfo> {
        self.candidates.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admit_and_reject() {
        let mut set = CandidateSet::new();
        set.admit(ShapeInfo::new("m5.large"));
        set.admit(ShapeInfo::new("t3.micro"));
        assert_eq!(set.len(), 2);

        set.reject("m5.large");
        assert!(!set.contains("m5.large"));
        assert!(set.is_decided("m5.large"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.rejected_count(), 1);
    }

    #[test]
    fn test_reject_is_idempotent_for_unknown_names() {
        let mut set = CandidateSet::new();
        set.reject("never-seen");
        set.reject("never-seen");
        assert!(set.is_empty());
        assert_eq!(set.rejected_count(), 1);
    }

    #[test]
    fn test_never_holds_two_records_for_one_name() {
        let mut set = CandidateSet::new();
        set.admit(ShapeInfo::new("m5.large"));
        let mut newer = ShapeInfo::new("m5.large");
        newer.hypervisor = Some("nitro".to_string());
        set.admit(newer);
        assert_eq!(set.len(), 1);
        assert_eq!(set.into_records()[0].hypervisor.as_deref(), Some("nitro"));
    }
}
