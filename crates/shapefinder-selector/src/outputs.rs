//! # Output Formatters
//!
//! Plain functions turning matched records into display lines.
//!
//! ## Formats
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  simple      m5.large                                                   │
//! │              t3.micro                                                   │
//! │                                                                         │
//! │  verbose     [ { "InstanceType": "m5.large", ... }, ... ]               │
//! │                                                                         │
//! │  table       Instance Type  VCPUs  Mem (GiB)  Hypervisor  ...           │
//! │              -------------  -----  ---------  ----------               │
//! │              m5.large       2      8          nitro                     │
//! │                                                                         │
//! │  table-wide  table + GPUs, GPU Mem, ENA, ENIs, FPGA, Burstable, ...     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shapefinder_core::attributes::{total_gpu_memory, total_gpus};
use shapefinder_core::ShapeInfo;
use tracing::warn;

/// Signature shared by every built-in formatter.
pub type OutputFn = fn(&[ShapeInfo]) -> Vec<String>;

const NOT_AVAILABLE: &str = "none";

// =============================================================================
// Output Format
// =============================================================================

/// Named output format, selectable from config or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Simple,
    Verbose,
    Table,
    TableWide,
}

impl OutputFormat {
    pub fn formatter(&self) -> OutputFn {
        match self {
            OutputFormat::Simple => simple_output,
            OutputFormat::Verbose => verbose_output,
            OutputFormat::Table => table_output,
            OutputFormat::TableWide => table_wide_output,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Verbose => "verbose",
            OutputFormat::Table => "table",
            OutputFormat::TableWide => "table-wide",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(OutputFormat::Simple),
            "verbose" => Ok(OutputFormat::Verbose),
            "table" => Ok(OutputFormat::Table),
            "table-wide" | "table_wide" => Ok(OutputFormat::TableWide),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

// =============================================================================
// Formatters
// =============================================================================

/// One instance-type name per line.
pub fn simple_output(shapes: &[ShapeInfo]) -> Vec<String> {
    shapes.iter().map(|shape| shape.instance_type.clone()).collect()
}

/// The records as a single pretty-printed JSON array.
pub fn verbose_output(shapes: &[ShapeInfo]) -> Vec<String> {
    match serde_json::to_string_pretty(shapes) {
        Ok(json) => vec![json],
        Err(e) => {
            warn!("Failed to render verbose output: {}", e);
            Vec::new()
        }
    }
}

const TABLE_HEADERS: [&str; 8] = [
    "Instance Type",
    "VCPUs",
    "Mem (GiB)",
    "Hypervisor",
    "Current Gen",
    "Hibernation Support",
    "CPU Arch",
    "Network Performance",
];

const WIDE_HEADERS: [&str; 8] = [
    "GPUs",
    "GPU Mem (GiB)",
    "ENA Support",
    "Max ENIs",
    "FPGA",
    "Burstable",
    "Bare Metal",
    "Usage Class",
];

pub fn table_output(shapes: &[ShapeInfo]) -> Vec<String> {
    let rows: Vec<Vec<String>> = shapes.iter().map(table_row).collect();
    render_table(&TABLE_HEADERS, rows)
}

pub fn table_wide_output(shapes: &[ShapeInfo]) -> Vec<String> {
    let headers: Vec<&str> = TABLE_HEADERS.iter().chain(WIDE_HEADERS.iter()).copied().collect();
    let rows: Vec<Vec<String>> = shapes
        .iter()
        .map(|shape| {
            let mut row = table_row(shape);
            row.extend(wide_columns(shape));
            row
        })
        .collect();
    render_table(&headers, rows)
}

fn table_row(shape: &ShapeInfo) -> Vec<String> {
    vec![
        shape.instance_type.clone(),
        opt_cell(shape.default_vcpus()),
        opt_cell(shape.memory_mib().map(mib_to_gib)),
        shape.hypervisor.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        opt_cell(shape.current_generation),
        opt_cell(shape.hibernation_supported),
        join_cell(&shape.processor_info.supported_architectures),
        shape
            .network_info
            .network_performance
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    ]
}

fn wide_columns(shape: &ShapeInfo) -> Vec<String> {
    let gpu_info = shape.gpu_info.as_ref();
    vec![
        total_gpus(gpu_info).to_string(),
        mib_to_gib(total_gpu_memory(gpu_info)).to_string(),
        shape
            .network_info
            .ena_support
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        opt_cell(shape.network_info.maximum_network_interfaces),
        shape.fpga_info.is_some().to_string(),
        opt_cell(shape.burstable_performance_supported),
        opt_cell(shape.bare_metal),
        join_cell(&shape.supported_usage_classes),
    ]
}

fn mib_to_gib(mib: i64) -> f64 {
    mib as f64 / 1024.0
}

fn opt_cell<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

fn join_cell(values: &[String]) -> String {
    if values.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        values.join(", ")
    }
}

/// Left-aligns every column to its widest cell, header included.
fn render_table(headers: &[&str], rows: Vec<Vec<String>>) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_line(&widths, headers));
    lines.push(render_line(&widths, &rule));
    for row in &rows {
        lines.push(render_line(&widths, row));
    }
    lines
}

fn render_line<S: AsRef<str>>(widths: &[usize], cells: &[S]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapefinder_core::types::{GpuDevice, GpuInfo};

    fn shapes() -> Vec<ShapeInfo> {
        let mut m5 = ShapeInfo::new("m5.large");
        m5.vcpu_info.default_vcpus = Some(2);
        m5.memory_info.size_in_mib = Some(8192);
        m5.hypervisor = Some("nitro".to_string());
        m5.current_generation = Some(true);
        m5.processor_info.supported_architectures = vec!["x86_64".to_string()];

        let mut p3 = ShapeInfo::new("p3.2xlarge");
        p3.gpu_info = Some(GpuInfo {
            gpus: vec![GpuDevice {
                count: Some(1),
                ..Default::default()
            }],
            total_gpu_memory_in_mib: Some(16384),
        });
        vec![m5, p3]
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("simple".parse::<OutputFormat>().unwrap(), OutputFormat::Simple);
        assert_eq!("TABLE".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("table-wide".parse::<OutputFormat>().unwrap(), OutputFormat::TableWide);
        assert!("csv".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::TableWide.to_string(), "table-wide");
        assert_eq!(OutputFormat::default(), OutputFormat::Simple);
    }

    #[test]
    fn test_simple_output_is_names_in_order() {
        assert_eq!(simple_output(&shapes()), vec!["m5.large", "p3.2xlarge"]);
        assert!(simple_output(&[]).is_empty());
    }

    #[test]
    fn test_verbose_output_is_one_json_array() {
        let lines = verbose_output(&shapes());
        assert_eq!(lines.len(), 1);
        let parsed: Vec<ShapeInfo> = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(parsed, shapes());
    }

    #[test]
    fn test_verbose_output_of_no_matches_is_empty_array() {
        assert_eq!(verbose_output(&[]), vec!["[]".to_string()]);
    }

    #[test]
    fn test_table_output_aligns_columns() {
        let lines = table_output(&shapes());
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Instance Type  VCPUs"));
        assert!(lines[1].starts_with("-------------  -----"));
        assert!(lines[2].starts_with("m5.large       2      8 "));
        assert!(lines[2].contains("nitro"));
        assert!(lines[3].starts_with("p3.2xlarge     none"));
    }

    #[test]
    fn test_table_wide_adds_gpu_columns() {
        let lines = table_wide_output(&shapes());
        assert!(lines[0].contains("GPU Mem (GiB)"));
        assert!(lines[0].ends_with("Usage Class"));
        assert!(lines[3].contains("  16  "));
    }

    #[test]
    fn test_formatter_lookup() {
        let names = (OutputFormat::Simple.formatter())(&shapes());
        assert_eq!(names, simple_output(&shapes()));
    }
}
