//! # Catalog Types
//!
//! The catalog record model, mirroring the provider's instance-type payload.
//!
//! ## Record Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          ShapeInfo                                      │
//! │                                                                         │
//! │  InstanceType ("m5.large")          ── unique key in the catalog        │
//! │  ProcessorInfo.SupportedArchitectures  ── set   ["x86_64", "arm64"]     │
//! │  SupportedUsageClasses                 ── set   ["on-demand", "spot"]   │
//! │  SupportedRootDeviceTypes              ── set   ["ebs"]                 │
//! │  VCpuInfo.DefaultVCpus                 ── int                           │
//! │  MemoryInfo.SizeInMiB                  ── int                           │
//! │  GpuInfo / FpgaInfo                    ── nested, often absent          │
//! │  PlacementGroupInfo.SupportedStrategies── set                           │
//! │  NetworkInfo { EnaSupport, MaximumNetworkInterfaces,                    │
//! │                NetworkPerformance ("Up to 10 Gigabit") }                │
//! │  Hypervisor, BareMetal, BurstablePerformanceSupported,                  │
//! │  HibernationSupported, CurrentGeneration                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every field other than the name may be missing from a provider payload,
//! so scalars are `Option` and sets default to empty.

use serde::{Deserialize, Serialize};

// =============================================================================
// Shape Info
// =============================================================================

/// One compute shape with its full provider-reported attribute set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShapeInfo {
    /// Unique catalog name, e.g. `m5.large`.
    pub instance_type: String,

    pub processor_info: ProcessorInfo,

    pub supported_usage_classes: Vec<String>,

    pub supported_root_device_types: Vec<String>,

    pub hibernation_supported: Option<bool>,

    #[serde(rename = "VCpuInfo")]
    pub vcpu_info: VCpuInfo,

    pub memory_info: MemoryInfo,

    pub gpu_info: Option<GpuInfo>,

    pub fpga_info: Option<FpgaInfo>,

    pub placement_group_info: PlacementGroupInfo,

    pub hypervisor: Option<String>,

    pub bare_metal: Option<bool>,

    pub burstable_performance_supported: Option<bool>,

    pub network_info: NetworkInfo,

    pub current_generation: Option<bool>,
}

impl ShapeInfo {
    /// Creates a record carrying only its name.
    pub fn new(instance_type: impl Into<String>) -> Self {
        ShapeInfo {
            instance_type: instance_type.into(),
            ..Default::default()
        }
    }

    /// Default vCPU count, if reported.
    #[inline]
    pub fn default_vcpus(&self) -> Option<i64> {
        self.vcpu_info.default_vcpus
    }

    /// Memory size in MiB, if reported.
    #[inline]
    pub fn memory_mib(&self) -> Option<i64> {
        self.memory_info.size_in_mib
    }
}

// =============================================================================
// Nested Provider Structures
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProcessorInfo {
    pub supported_architectures: Vec<String>,
    pub sustained_clock_speed_in_ghz: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VCpuInfo {
    #[serde(rename = "DefaultVCpus")]
    pub default_vcpus: Option<i64>,
    pub default_cores: Option<i64>,
    pub default_threads_per_core: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryInfo {
    #[serde(rename = "SizeInMiB")]
    pub size_in_mib: Option<i64>,
}

/// Accelerator block. Absent entirely on shapes without GPUs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GpuInfo {
    pub gpus: Vec<GpuDevice>,
    #[serde(rename = "TotalGpuMemoryInMiB")]
    pub total_gpu_memory_in_mib: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GpuDevice {
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub count: Option<i64>,
    pub memory_info: MemoryInfo,
}

/// FPGA block. Its mere presence marks the shape as FPGA-equipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FpgaInfo {
    pub fpgas: Vec<FpgaDevice>,
    #[serde(rename = "TotalFpgaMemoryInMiB")]
    pub total_fpga_memory_in_mib: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FpgaDevice {
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub count: Option<i64>,
    pub memory_info: MemoryInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PlacementGroupInfo {
    pub supported_strategies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkInfo {
    /// `"unsupported"`, `"supported"` or `"required"`.
    pub ena_support: Option<String>,
    pub maximum_network_interfaces: Option<i64>,
    /// Descriptive bandwidth, e.g. `"Up to 10 Gigabit"` or `"Moderate"`.
    pub network_performance: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
