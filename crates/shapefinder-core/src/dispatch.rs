//! # Filter Dispatch
//!
//! Decides whether one record satisfies every present filter.
//!
//! ## How a Filter Is Evaluated
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Two-Level Dispatch                                │
//! │                                                                         │
//! │  FILTER_TABLE (built once, static)                                     │
//! │  ┌────────────────────┬─────────────────────┬──────────────────────┐   │
//! │  │ name               │ value(spec)         │ attribute(record)    │   │
//! │  ├────────────────────┼─────────────────────┼──────────────────────┤   │
//! │  │ cpuArchitecture    │ Text                │ TextSet              │   │
//! │  │ hypervisor         │ Text                │ Text                 │   │
//! │  │ burstable          │ Flag                │ Flag                 │   │
//! │  │ vcpusRange         │ IntRange            │ Int                  │   │
//! │  │ vcpusToMemoryRatio │ FloatRange          │ Float                │   │
//! │  │ ...                │                     │                      │   │
//! │  └────────────────────┴─────────────────────┴──────────────────────┘   │
//! │                                                                         │
//! │  value(spec) == None  ──► skip (vacuously true)                        │
//! │  match (value, attribute)                                              │
//! │    (Text, TextSet)        ──► set contains value                       │
//! │    (Text, Text)           ──► equality                                 │
//! │    (Flag, Flag)           ──► equality                                 │
//! │    (IntRange, Int)        ──► inclusive bounds                         │
//! │    (FloatRange, Float)    ──► inclusive bounds                         │
//! │    anything else          ──► UnsupportedFilterType                    │
//! │                                                                         │
//! │  First failing filter rejects the record (AND composition).           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::attributes::DerivedAttributes;
use crate::comparators::{contains_text, flag_equals, float_in_range, int_in_range, text_equals};
use crate::error::{CoreError, CoreResult};
use crate::filters::{FilterSpecification, FloatRange, IntRange};
use crate::types::ShapeInfo;

// =============================================================================
// Value Shapes
// =============================================================================

/// The shape of a present filter value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterValue<'a> {
    Text(&'a str),
    Flag(bool),
    IntRange(&'a IntRange),
    FloatRange(&'a FloatRange),
}

impl FilterValue<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            FilterValue::Text(_) => "text",
            FilterValue::Flag(_) => "boolean",
            FilterValue::IntRange(_) => "integer range",
            FilterValue::FloatRange(_) => "float range",
        }
    }
}

/// The shape of a record attribute, possibly unreported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeValue<'a> {
    Text(Option<&'a str>),
    TextSet(&'a [String]),
    Flag(Option<bool>),
    Int(Option<i64>),
    Float(Option<f64>),
}

impl AttributeValue<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeValue::Text(_) => "text",
            AttributeValue::TextSet(_) => "text set",
            AttributeValue::Flag(_) => "boolean",
            AttributeValue::Int(_) => "integer",
            AttributeValue::Float(_) => "float",
        }
    }
}

// =============================================================================
// Filter Descriptors
// =============================================================================

/// Reads one filter's value out of the specification.
pub type ValueAccessor = for<'s> fn(&'s FilterSpecification) -> Option<FilterValue<'s>>;

/// Reads the matching attribute out of a record and its derived values.
pub type AttributeAccessor = for<'r> fn(&'r ShapeInfo, &DerivedAttributes) -> AttributeValue<'r>;

/// One named filter: where its value lives and what it is compared against.
#[derive(Clone, Copy)]
pub struct FilterDescriptor {
    pub name: &'static str,
    pub value: ValueAccessor,
    pub attribute: AttributeAccessor,
}

impl std::fmt::Debug for FilterDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterDescriptor").field("name", &self.name).finish()
    }
}

/// Every filter the specification can carry, in evaluation order.
pub static FILTER_TABLE: &[FilterDescriptor] = &[
    FilterDescriptor {
        name: "cpuArchitecture",
        value: |spec| spec.cpu_architecture.as_deref().map(FilterValue::Text),
        attribute: |shape, _| AttributeValue::TextSet(&shape.processor_info.supported_architectures),
    },
    FilterDescriptor {
        name: "usageClass",
        value: |spec| spec.usage_class.as_deref().map(FilterValue::Text),
        attribute: |shape, _| AttributeValue::TextSet(&shape.supported_usage_classes),
    },
    FilterDescriptor {
        name: "rootDeviceType",
        value: |spec| spec.root_device_type.as_deref().map(FilterValue::Text),
        attribute: |shape, _| AttributeValue::TextSet(&shape.supported_root_device_types),
    },
    FilterDescriptor {
        name: "hibernationSupported",
        value: |spec| spec.hibernation_supported.map(FilterValue::Flag),
        attribute: |shape, _| AttributeValue::Flag(shape.hibernation_supported),
    },
    FilterDescriptor {
        name: "vcpusRange",
        value: |spec| spec.vcpus_range.as_ref().map(FilterValue::IntRange),
        attribute: |shape, _| AttributeValue::Int(shape.default_vcpus()),
    },
    FilterDescriptor {
        name: "memoryRange",
        value: |spec| spec.memory_range.as_ref().map(FilterValue::IntRange),
        attribute: |shape, _| AttributeValue::Int(shape.memory_mib()),
    },
    FilterDescriptor {
        name: "gpuMemoryRange",
        value: |spec| spec.gpu_memory_range.as_ref().map(FilterValue::IntRange),
        attribute: |_, derived| AttributeValue::Int(Some(derived.total_gpu_memory_mib)),
    },
    FilterDescriptor {
        name: "gpusRange",
        value: |spec| spec.gpus_range.as_ref().map(FilterValue::IntRange),
        attribute: |_, derived| AttributeValue::Int(Some(derived.total_gpus)),
    },
    FilterDescriptor {
        name: "placementGroupStrategy",
        value: |spec| spec.placement_group_strategy.as_deref().map(FilterValue::Text),
        attribute: |shape, _| AttributeValue::TextSet(&shape.placement_group_info.supported_strategies),
    },
    FilterDescriptor {
        name: "hypervisor",
        value: |spec| spec.hypervisor.as_deref().map(FilterValue::Text),
        attribute: |shape, _| AttributeValue::Text(shape.hypervisor.as_deref()),
    },
    FilterDescriptor {
        name: "baremetal",
        value: |spec| spec.bare_metal.map(FilterValue::Flag),
        attribute: |shape, _| AttributeValue::Flag(shape.bare_metal),
    },
    FilterDescriptor {
        name: "burstable",
        value: |spec| spec.burstable.map(FilterValue::Flag),
        attribute: |shape, _| AttributeValue::Flag(shape.burstable_performance_supported),
    },
    FilterDescriptor {
        name: "fpga",
        value: |spec| spec.fpga.map(FilterValue::Flag),
        attribute: |_, derived| AttributeValue::Flag(Some(derived.has_fpga)),
    },
    FilterDescriptor {
        name: "enaSupport",
        value: |spec| spec.ena_support.map(FilterValue::Flag),
        attribute: |_, derived| AttributeValue::Flag(derived.ena_support),
    },
    FilterDescriptor {
        name: "vcpusToMemoryRatio",
        value: |spec| spec.vcpus_to_memory_ratio.as_ref().map(FilterValue::FloatRange),
        attribute: |_, derived| AttributeValue::Float(derived.vcpus_to_memory_ratio),
    },
    FilterDescriptor {
        name: "currentGeneration",
        value: |spec| spec.current_generation.map(FilterValue::Flag),
        attribute: |shape, _| AttributeValue::Flag(shape.current_generation),
    },
    FilterDescriptor {
        name: "networkInterfaces",
        value: |spec| spec.network_interfaces.as_ref().map(FilterValue::IntRange),
        attribute: |shape, _| AttributeValue::Int(shape.network_info.maximum_network_interfaces),
    },
    FilterDescriptor {
        name: "networkPerformance",
        value: |spec| spec.network_performance.as_ref().map(FilterValue::IntRange),
        attribute: |_, derived| AttributeValue::Int(derived.network_bandwidth_gbps),
    },
];

// =============================================================================
// Evaluation
// =============================================================================

/// Outcome of evaluating one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Supported,
    /// Rejected by the named filter (the first one that failed).
    Rejected { filter: &'static str },
}

impl Verdict {
    #[inline]
    pub fn is_supported(&self) -> bool {
        matches!(self, Verdict::Supported)
    }
}

/// Evaluates every filter in [`FILTER_TABLE`] against one record.
pub fn evaluate(
    spec: &FilterSpecification,
    shape: &ShapeInfo,
    derived: &DerivedAttributes,
) -> CoreResult<Verdict> {
    evaluate_with(FILTER_TABLE, spec, shape, derived)
}

/// Evaluates an explicit descriptor list against one record.
pub fn evaluate_with(
    table: &[FilterDescriptor],
    spec: &FilterSpecification,
    shape: &ShapeInfo,
    derived: &DerivedAttributes,
) -> CoreResult<Verdict> {
    for descriptor in table {
        let Some(value) = (descriptor.value)(spec) else {
            continue;
        };
        let attribute = (descriptor.attribute)(shape, derived);
        if !compare(descriptor.name, value, attribute, &shape.instance_type)? {
            return Ok(Verdict::Rejected {
                filter: descriptor.name,
            });
        }
    }
    Ok(Verdict::Supported)
}

fn compare(
    filter: &str,
    value: FilterValue<'_>,
    attribute: AttributeValue<'_>,
    instance_type: &str,
) -> CoreResult<bool> {
    match (value, attribute) {
        (FilterValue::Text(wanted), AttributeValue::TextSet(set)) => Ok(contains_text(set, wanted)),
        (FilterValue::Text(wanted), AttributeValue::Text(actual)) => Ok(text_equals(actual, wanted)),
        (FilterValue::Flag(wanted), AttributeValue::Flag(actual)) => Ok(flag_equals(actual, wanted)),
        (FilterValue::IntRange(range), AttributeValue::Int(actual)) => Ok(int_in_range(actual, range)),
        (FilterValue::FloatRange(range), AttributeValue::Float(actual)) => {
            Ok(float_in_range(actual, range))
        }
        (value, attribute) => Err(CoreError::UnsupportedFilterType {
            filter: filter.to_string(),
            value_kind: value.kind(),
            attribute_kind: attribute.kind(),
            instance_type: instance_type.to_string(),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
