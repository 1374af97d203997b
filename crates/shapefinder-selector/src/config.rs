//! # Selector Configuration
//!
//! Configuration management for the selector and the CLI.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHAPEFINDER_SHAPE_PAGE_SIZE=50                                     │
//! │     SHAPEFINDER_OUTPUT=table                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/shapefinder/shapefinder.toml (Linux)                     │
//! │     ~/Library/Application Support/dev.shapefinder.shapefinder/...      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     page sizes 100 / 1000, simple output                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # shapefinder.toml
//! [client]
//! sdk_name = "shapefinder"
//! version = "0.1.0"
//!
//! [paging]
//! shape_page_size = 100
//! offering_page_size = 1000
//!
//! [output]
//! format = "table"   # simple | verbose | table | table-wide
//!
//! [catalog]
//! snapshot_path = "/var/lib/shapefinder/catalog.json"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{SelectorError, SelectorResult};
use crate::outputs::OutputFormat;

// =============================================================================
// Client Settings
// =============================================================================

/// Identity attached to every provider request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default = "default_sdk_name")]
    pub sdk_name: String,

    #[serde(default = "default_version")]
    pub version: String,
}

fn default_sdk_name() -> String {
    "shapefinder".to_string()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for ClientSettings {
    fn default() -> Self {
        ClientSettings {
            sdk_name: default_sdk_name(),
            version: default_version(),
        }
    }
}

impl ClientSettings {
    /// User-agent tag, e.g. `shapefinder-v0.1.0`.
    pub fn user_agent(&self) -> String {
        format!("{}-v{}", self.sdk_name, self.version)
    }
}

// =============================================================================
// Paging Settings
// =============================================================================

/// Page sizes requested from each provider listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingSettings {
    #[serde(default = "default_shape_page_size")]
    pub shape_page_size: usize,

    #[serde(default = "default_offering_page_size")]
    pub offering_page_size: usize,
}

fn default_shape_page_size() -> usize {
    100
}

fn default_offering_page_size() -> usize {
    1000
}

impl Default for PagingSettings {
    fn default() -> Self {
        PagingSettings {
            shape_page_size: default_shape_page_size(),
            offering_page_size: default_offering_page_size(),
        }
    }
}

// =============================================================================
// Output / Catalog Settings
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// JSON catalog snapshot served by the snapshot provider.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

// =============================================================================
// Main Selector Configuration
// =============================================================================

/// Complete selector configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default)]
    pub client: ClientSettings,

    #[serde(default)]
    pub paging: PagingSettings,

    #[serde(default)]
    pub output: OutputSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,
}

impl SelectorConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (shapefinder.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SelectorResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading selector config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load selector config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn from_toml(contents: &str) -> SelectorResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SelectorResult<()> {
        if self.client.sdk_name.trim().is_empty() {
            return Err(SelectorError::InvalidConfig(
                "client.sdk_name must not be empty".into(),
            ));
        }
        if self.client.version.trim().is_empty() {
            return Err(SelectorError::InvalidConfig(
                "client.version must not be empty".into(),
            ));
        }
        if self.paging.shape_page_size == 0 {
            return Err(SelectorError::InvalidConfig(
                "paging.shape_page_size must be greater than 0".into(),
            ));
        }
        if self.paging.offering_page_size == 0 {
            return Err(SelectorError::InvalidConfig(
                "paging.offering_page_size must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F: Fn(&str) -> Option<String>>(&mut self, lookup: F) {
        if let Some(version) = lookup("SHAPEFINDER_VERSION") {
            debug!(version = %version, "Overriding client version from environment");
            self.client.version = version;
        }

        if let Some(size) = lookup("SHAPEFINDER_SHAPE_PAGE_SIZE") {
            match size.parse::<usize>() {
                Ok(n) => self.paging.shape_page_size = n,
                Err(_) => warn!(value = %size, "Ignoring invalid SHAPEFINDER_SHAPE_PAGE_SIZE"),
            }
        }

        if let Some(size) = lookup("SHAPEFINDER_OFFERING_PAGE_SIZE") {
            match size.parse::<usize>() {
                Ok(n) => self.paging.offering_page_size = n,
                Err(_) => warn!(value = %size, "Ignoring invalid SHAPEFINDER_OFFERING_PAGE_SIZE"),
            }
        }

        if let Some(format) = lookup("SHAPEFINDER_OUTPUT") {
            match format.parse::<OutputFormat>() {
                Ok(parsed) => {
                    debug!(format = %parsed, "Overriding output format from environment");
                    self.output.format = parsed;
                }
                Err(_) => warn!(format = %format, "Unknown output format in environment"),
            }
        }

        if let Some(path) = lookup("SHAPEFINDER_CATALOG") {
            self.catalog.snapshot_path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "shapefinder", "shapefinder")
            .map(|dirs| dirs.config_dir().join("shapefinder.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn user_agent(&self) -> String {
        self.client.user_agent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SelectorConfig::default();
        assert_eq!(config.paging.shape_page_size, 100);
        assert_eq!(config.paging.offering_page_size, 1000);
        assert_eq!(config.output.format, OutputFormat::Simple);
        assert!(config.catalog.snapshot_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_user_agent_tag() {
        let client = ClientSettings {
            sdk_name: "shapefinder".into(),
            version: "1.2.3".into(),
        };
        assert_eq!(client.user_agent(), "shapefinder-v1.2.3");
    }

    #[test]
    fn test_config_validation() {
        let mut config = SelectorConfig::default();
        config.paging.shape_page_size = 0;
        assert!(config.validate().unwrap_err().is_config_error());

        config = SelectorConfig::default();
        config.paging.offering_page_size = 0;
        assert!(config.validate().is_err());

        config = SelectorConfig::default();
        config.client.version = " ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SelectorConfig::from_toml(
            r#"
            [paging]
            shape_page_size = 20

            [output]
            format = "table-wide"
            "#,
        )
        .unwrap();
        assert_eq!(config.paging.shape_page_size, 20);
        assert_eq!(config.paging.offering_page_size, 1000);
        assert_eq!(config.output.format, OutputFormat::TableWide);
        assert_eq!(config.client.sdk_name, "shapefinder");
    }

    #[test]
    fn test_env_style_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SHAPEFINDER_VERSION", "9.9.9"),
            ("SHAPEFINDER_SHAPE_PAGE_SIZE", "7"),
            ("SHAPEFINDER_OFFERING_PAGE_SIZE", "not-a-number"),
            ("SHAPEFINDER_OUTPUT", "verbose"),
            ("SHAPEFINDER_CATALOG", "/tmp/catalog.json"),
        ]
        .into_iter()
        .collect();

        let mut config = SelectorConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.user_agent(), "shapefinder-v9.9.9");
        assert_eq!(config.paging.shape_page_size, 7);
        assert_eq!(config.paging.offering_page_size, 1000);
        assert_eq!(config.output.format, OutputFormat::Verbose);
        assert_eq!(
            config.catalog.snapshot_path,
            Some(PathBuf::from("/tmp/catalog.json"))
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[paging]\noffering_page_size = 25").unwrap();
        let config = SelectorConfig::load(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.paging.offering_page_size, 25);
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[paging\nshape_page_size = ").unwrap();
        let err = SelectorConfig::load(Some(file.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, SelectorError::ConfigLoadFailed(_)));
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&SelectorConfig::default()).unwrap();
        assert!(toml_str.contains("[client]"));
        assert!(toml_str.contains("[paging]"));
    }
}
