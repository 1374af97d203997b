//! Command-line flags and their mapping onto a [`FilterSpecification`].
//!
//! A single-value flag (`--vcpus 4`) pins both ends of its range; the
//! `-min` / `-max` variants then override one side each.

use std::path::PathBuf;

use clap::Parser;
use shapefinder_core::attributes::{round_to, RATIO_PRECISION};
use shapefinder_core::{FilterSpecification, FloatRange, IntRange};
use shapefinder_selector::OutputFormat;

#[derive(Parser, Debug, Default)]
#[command(name = "shapefinder")]
#[command(about = "Select compute instance types by resource criteria", long_about = None)]
#[command(version)]
pub struct Args {
    // -------------------------------------------------------------------------
    // Numeric ranges
    // -------------------------------------------------------------------------
    /// Exact number of vCPUs
    #[arg(long)]
    pub vcpus: Option<i64>,
    #[arg(long = "vcpus-min")]
    pub vcpus_min: Option<i64>,
    #[arg(long = "vcpus-max")]
    pub vcpus_max: Option<i64>,

    /// Memory in MiB
    #[arg(long)]
    pub memory: Option<i64>,
    #[arg(long = "memory-min")]
    pub memory_min: Option<i64>,
    #[arg(long = "memory-max")]
    pub memory_max: Option<i64>,

    /// Total number of GPUs
    #[arg(long)]
    pub gpus: Option<i64>,
    #[arg(long = "gpus-min")]
    pub gpus_min: Option<i64>,
    #[arg(long = "gpus-max")]
    pub gpus_max: Option<i64>,

    /// Total GPU memory in MiB
    #[arg(long = "gpu-memory-total")]
    pub gpu_memory_total: Option<i64>,
    #[arg(long = "gpu-memory-total-min")]
    pub gpu_memory_total_min: Option<i64>,
    #[arg(long = "gpu-memory-total-max")]
    pub gpu_memory_total_max: Option<i64>,

    /// Maximum number of network interfaces
    #[arg(long = "network-interfaces")]
    pub network_interfaces: Option<i64>,
    #[arg(long = "network-interfaces-min")]
    pub network_interfaces_min: Option<i64>,
    #[arg(long = "network-interfaces-max")]
    pub network_interfaces_max: Option<i64>,

    /// Network bandwidth in Gbit
    #[arg(long = "network-performance")]
    pub network_performance: Option<i64>,
    #[arg(long = "network-performance-min")]
    pub network_performance_min: Option<i64>,
    #[arg(long = "network-performance-max")]
    pub network_performance_max: Option<i64>,

    /// vCPU to memory (GiB) ratio, e.g. "1:2"
    #[arg(long = "vcpus-to-memory-ratio", value_parser = parse_ratio)]
    pub vcpus_to_memory_ratio: Option<f64>,

    // -------------------------------------------------------------------------
    // Text filters
    // -------------------------------------------------------------------------
    /// CPU architecture (x86_64, arm64, i386)
    #[arg(long = "cpu-architecture")]
    pub cpu_architecture: Option<String>,

    /// Usage class (spot, on-demand)
    #[arg(long = "usage-class")]
    pub usage_class: Option<String>,

    /// Root device type (ebs, instance-store)
    #[arg(long = "root-device-type")]
    pub root_device_type: Option<String>,

    /// Placement group strategy (cluster, partition, spread)
    #[arg(long = "placement-group-strategy")]
    pub placement_group_strategy: Option<String>,

    /// Hypervisor (xen, nitro)
    #[arg(long)]
    pub hypervisor: Option<String>,

    // -------------------------------------------------------------------------
    // Boolean filters
    // -------------------------------------------------------------------------
    #[arg(long = "hibernation-support")]
    pub hibernation_support: Option<bool>,

    #[arg(long)]
    pub baremetal: Option<bool>,

    #[arg(long = "burst-support")]
    pub burst_support: Option<bool>,

    #[arg(long = "fpga-support")]
    pub fpga_support: Option<bool>,

    #[arg(long = "ena-support")]
    pub ena_support: Option<bool>,

    #[arg(long = "current-generation")]
    pub current_generation: Option<bool>,

    // -------------------------------------------------------------------------
    // Location and result shaping
    // -------------------------------------------------------------------------
    /// Zone id or zone name; takes precedence over --region
    #[arg(long = "availability-zone", visible_alias = "az")]
    pub availability_zone: Option<String>,

    #[arg(long)]
    pub region: Option<String>,

    #[arg(long = "max-results")]
    pub max_results: Option<usize>,

    /// simple | verbose | table | table-wide
    #[arg(short, long)]
    pub output: Option<OutputFormat>,

    /// Catalog snapshot (JSON)
    #[arg(long, env = "SHAPEFINDER_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Config file (defaults to the platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn filter_spec(&self) -> FilterSpecification {
        FilterSpecification {
            cpu_architecture: self.cpu_architecture.clone(),
            usage_class: self.usage_class.clone(),
            root_device_type: self.root_device_type.clone(),
            hibernation_supported: self.hibernation_support,
            vcpus_range: int_range(self.vcpus, self.vcpus_min, self.vcpus_max),
            memory_range: int_range(self.memory, self.memory_min, self.memory_max),
            gpu_memory_range: int_range(
                self.gpu_memory_total,
                self.gpu_memory_total_min,
                self.gpu_memory_total_max,
            ),
            gpus_range: int_range(self.gpus, self.gpus_min, self.gpus_max),
            placement_group_strategy: self.placement_group_strategy.clone(),
            hypervisor: self.hypervisor.clone(),
            bare_metal: self.baremetal,
            burstable: self.burst_support,
            fpga: self.fpga_support,
            ena_support: self.ena_support,
            vcpus_to_memory_ratio: self.vcpus_to_memory_ratio.map(FloatRange::exactly),
            current_generation: self.current_generation,
            network_interfaces: int_range(
                self.network_interfaces,
                self.network_interfaces_min,
                self.network_interfaces_max,
            ),
            network_performance: int_range(
                self.network_performance,
                self.network_performance_min,
                self.network_performance_max,
            ),
            availability_zone: self.availability_zone.clone(),
            region: self.region.clone(),
            max_results: self.max_results,
        }
    }
}

fn int_range(exact: Option<i64>, min: Option<i64>, max: Option<i64>) -> Option<IntRange> {
    if exact.is_none() && min.is_none() && max.is_none() {
        return None;
    }
    Some(IntRange {
        min: min.or(exact),
        max: max.or(exact),
    })
}

/// Parses `"vcpus:memory_gib"` into the vCPU-per-GiB ratio.
fn parse_ratio(raw: &str) -> Result<f64, String> {
    let (vcpus, memory) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected VCPUS:MEMORY, got {raw:?}"))?;
    let vcpus: f64 = vcpus
        .trim()
        .parse()
        .map_err(|_| format!("invalid vCPU part in {raw:?}"))?;
    let memory: f64 = memory
        .trim()
        .parse()
        .map_err(|_| format!("invalid memory part in {raw:?}"))?;
    if !vcpus.is_finite() || !memory.is_finite() || memory <= 0.0 || vcpus <= 0.0 {
        return Err(format!("ratio parts must be positive finite numbers: {raw:?}"));
    }
    let ratio = round_to(vcpus / memory, RATIO_PRECISION);
    if !ratio.is_finite() {
        return Err(format!("ratio out of range: {raw:?}"));
    }
    Ok(ratio)
}
