//! # Filter Specification
//!
//! The declarative, all-optional description of what a caller wants.
//!
//! ## Filter Value Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Filter Value Shapes                                │
//! │                                                                         │
//! │  Text        cpu_architecture = "arm64"     exact / set membership     │
//! │  Flag        burstable = true               boolean equality           │
//! │  IntRange    vcpus_range = [2, 8]           inclusive integer bounds   │
//! │  FloatRange  vcpus_to_memory_ratio = [0.25,] inclusive float bounds    │
//! │                                                                         │
//! │  None on ANY field means "do not filter on this attribute".            │
//! │  Present fields are AND-ed together.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Range Bounds
// =============================================================================

/// Inclusive integer bounds; a missing side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl IntRange {
    /// Both bounds set.
    pub const fn between(min: i64, max: i64) -> Self {
        IntRange {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Exactly one value: `[value, value]`.
    pub const fn exactly(value: i64) -> Self {
        IntRange::between(value, value)
    }

    pub const fn at_least(min: i64) -> Self {
        IntRange {
            min: Some(min),
            max: None,
        }
    }

    pub const fn at_most(max: i64) -> Self {
        IntRange {
            min: None,
            max: Some(max),
        }
    }
}

/// Inclusive float bounds; a missing side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl FloatRange {
    pub const fn between(min: f64, max: f64) -> Self {
        FloatRange {
            min: Some(min),
            max: Some(max),
        }
    }

    pub const fn exactly(value: f64) -> Self {
        FloatRange::between(value, value)
    }

    pub const fn at_least(min: f64) -> Self {
        FloatRange {
            min: Some(min),
            max: None,
        }
    }

    pub const fn at_most(max: f64) -> Self {
        FloatRange {
            min: None,
            max: Some(max),
        }
    }
}

// =============================================================================
// Filter Specification
// =============================================================================

/// A set of independently optional filters plus location and result limit.
///
/// Immutable for the duration of one selection; build it with struct update
/// syntax over `FilterSpecification::default()`.
///
/// ## Example
/// ```rust
/// use shapefinder_core::filters::{FilterSpecification, IntRange};
///
/// let spec = FilterSpecification {
///     vcpus_range: Some(IntRange::at_least(4)),
///     bare_metal: Some(true),
///     max_results: Some(10),
///     ..Default::default()
/// };
/// assert!(spec.location().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpecification {
    /// Must be contained in the supported architectures set.
    pub cpu_architecture: Option<String>,

    /// Must be contained in the supported usage classes set.
    pub usage_class: Option<String>,

    /// Must be contained in the supported root device types set.
    pub root_device_type: Option<String>,

    pub hibernation_supported: Option<bool>,

    pub vcpus_range: Option<IntRange>,

    /// Memory in MiB.
    pub memory_range: Option<IntRange>,

    /// Total accelerator memory in MiB.
    pub gpu_memory_range: Option<IntRange>,

    pub gpus_range: Option<IntRange>,

    /// Must be contained in the placement group strategies set.
    pub placement_group_strategy: Option<String>,

    /// Compared for equality with the scalar hypervisor name.
    pub hypervisor: Option<String>,

    pub bare_metal: Option<bool>,

    pub burstable: Option<bool>,

    pub fpga: Option<bool>,

    pub ena_support: Option<bool>,

    /// vCPUs per GiB of memory.
    pub vcpus_to_memory_ratio: Option<FloatRange>,

    pub current_generation: Option<bool>,

    pub network_interfaces: Option<IntRange>,

    /// Bandwidth in Gigabit.
    pub network_performance: Option<IntRange>,

    /// Zone-id or zone-name. Wins over `region` when both are set.
    pub availability_zone: Option<String>,

    pub region: Option<String>,

    /// Truncate the sorted result to this many entries.
    pub max_results: Option<usize>,
}

impl FilterSpecification {
    /// The location restriction, if any.
    ///
    /// The availability zone takes precedence over the region. An empty
    /// string is treated the same as no restriction.
    pub fn location(&self) -> Option<&str> {
        self.availability_zone
            .as_deref()
            .or(self.region.as_deref())
            .filter(|location| !location.is_empty())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
