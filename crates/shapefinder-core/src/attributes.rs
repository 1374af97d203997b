//! # Derived Attributes
//!
//! Values computed from a record's raw nested fields before filters run.
//!
//! ## Derivations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GpuInfo ──────────────┬──► total_gpu_memory_mib  (0 without GpuInfo)  │
//! │                        └──► total_gpus            (0 without GpuInfo)  │
//! │  FpgaInfo present? ────────► has_fpga                                   │
//! │  NetworkInfo.EnaSupport ───► ena_support  "unsupported" → false        │
//! │                                           anything else → true         │
//! │  DefaultVCpus / GiB ───────► vcpus_to_memory_ratio (3 decimals)        │
//! │  "Up to 10 Gigabit" ───────► network_bandwidth_gbps = 10               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is a pure function of one record.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{GpuInfo, ShapeInfo};

/// Decimal places kept on the vCPU-to-memory ratio.
pub const RATIO_PRECISION: i32 = 3;

/// Marker the provider uses for shapes without ENA.
const ENA_UNSUPPORTED: &str = "unsupported";

static BANDWIDTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+) Gigabit").expect("bandwidth pattern is valid"));

// =============================================================================
// Derived Attributes
// =============================================================================

/// Attributes computed from one record, once, before dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DerivedAttributes {
    pub total_gpu_memory_mib: i64,
    pub total_gpus: i64,
    pub has_fpga: bool,
    pub ena_support: Option<bool>,
    pub vcpus_to_memory_ratio: Option<f64>,
    pub network_bandwidth_gbps: Option<i64>,
}

impl DerivedAttributes {
    pub fn derive(shape: &ShapeInfo) -> Self {
        DerivedAttributes {
            total_gpu_memory_mib: total_gpu_memory(shape.gpu_info.as_ref()),
            total_gpus: total_gpus(shape.gpu_info.as_ref()),
            has_fpga: shape.fpga_info.is_some(),
            ena_support: ena_support(shape.network_info.ena_support.as_deref()),
            vcpus_to_memory_ratio: vcpus_to_memory_ratio(shape.default_vcpus(), shape.memory_mib()),
            network_bandwidth_gbps: network_bandwidth(
                shape.network_info.network_performance.as_deref(),
            ),
        }
    }
}

// =============================================================================
// Derivation Functions
// =============================================================================

/// Total accelerator memory in MiB.
///
/// Prefers the provider-reported total; otherwise sums `count × memory`
/// over the devices. Zero when there is no GPU block.
///
/// Provider values are untrusted, so the arithmetic saturates at `i64::MAX`.
pub fn total_gpu_memory(gpu_info: Option<&GpuInfo>) -> i64 {
    let Some(info) = gpu_info else {
        return 0;
    };
    info.total_gpu_memory_in_mib.unwrap_or_else(|| {
        info.gpus
            .iter()
            .map(|gpu| {
                gpu.count
                    .unwrap_or(0)
                    .saturating_mul(gpu.memory_info.size_in_mib.unwrap_or(0))
            })
            .fold(0, i64::saturating_add)
    })
}

/// Total accelerator count. Zero when there is no GPU block.
pub fn total_gpus(gpu_info: Option<&GpuInfo>) -> i64 {
    gpu_info
        .map(|info| {
            info.gpus
                .iter()
                .filter_map(|gpu| gpu.count)
                .fold(0, i64::saturating_add)
        })
        .unwrap_or(0)
}

/// Maps the tri-state ENA marker onto a boolean.
pub fn ena_support(marker: Option<&str>) -> Option<bool> {
    marker.map(|value| value != ENA_UNSUPPORTED)
}

/// vCPUs per GiB of memory, rounded to [`RATIO_PRECISION`] decimals.
///
/// Absent when either input is absent or memory is zero.
pub fn vcpus_to_memory_ratio(vcpus: Option<i64>, memory_mib: Option<i64>) -> Option<f64> {
    let vcpus = vcpus?;
    let memory_mib = memory_mib.filter(|mib| *mib > 0)?;
    let memory_gib = memory_mib as f64 / 1024.0;
    Some(round_to(vcpus as f64 / memory_gib, RATIO_PRECISION))
}

/// Parses the Gigabit figure out of a network performance description.
///
/// `"Up to 10 Gigabit"` → 10, `"25 Gigabit"` → 25, `"Moderate"` → None.
pub fn network_bandwidth(performance: Option<&str>) -> Option<i64> {
    let captures = BANDWIDTH_PATTERN.captures(performance?)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// =============================================================================
// Unit Tests
// =============================================================================
