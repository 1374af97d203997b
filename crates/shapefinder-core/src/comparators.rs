//! # Comparators
//!
//! Leaf predicates used by filter dispatch. An absent attribute never
//! satisfies a present filter.

use crate::filters::{FloatRange, IntRange};

/// Set membership, case-sensitive.
pub fn contains_text(set: &[String], wanted: &str) -> bool {
    set.iter().any(|value| value == wanted)
}

pub fn text_equals(attribute: Option<&str>, wanted: &str) -> bool {
    attribute == Some(wanted)
}

pub fn flag_equals(attribute: Option<bool>, wanted: bool) -> bool {
    attribute == Some(wanted)
}

/// Inclusive on both sides; a missing bound does not constrain.
pub fn int_in_range(attribute: Option<i64>, range: &IntRange) -> bool {
    let Some(value) = attribute else {
        return false;
    };
    range.min.map_or(true, |min| value >= min) && range.max.map_or(true, |max| value <= max)
}

/// Inclusive on both sides; a missing bound does not constrain.
pub fn float_in_range(attribute: Option<f64>, range: &FloatRange) -> bool {
    let Some(value) = attribute else {
        return false;
    };
    range.min.map_or(true, |min| value >= min) && range.max.map_or(true, |max| value <= max)
}
