//! # Selector Error Types
//!
//! Error types for provider calls and selection runs.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Selector Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────────┐  ┌─────────────────────┐ │
//! │  │  Core (domain)  │  │  Upstream           │  │  Configuration      │ │
//! │  │                 │  │                     │  │                     │ │
//! │  │  InvalidLocation│  │  UpstreamFetch      │  │  InvalidConfig      │ │
//! │  │  Format         │  │  { operation,       │  │  ConfigLoadFailed   │ │
//! │  │  UnsupportedFil │  │    ProviderError }  │  │                     │ │
//! │  │  terType        │  │                     │  │                     │ │
//! │  └─────────────────┘  └─────────────────────┘  └─────────────────────┘ │
//! │                                                                         │
//! │  Every variant aborts the whole selection. No partial result.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shapefinder_core::CoreError;
use thiserror::Error;

/// Result type alias for provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Result type alias for selector operations.
pub type SelectorResult<T> = Result<T, SelectorError>;

// =============================================================================
// Provider Error
// =============================================================================

/// Failures reported by a catalog or availability provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request reached the provider and failed.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The provider refused the request for rate reasons.
    #[error("Request throttled: {0}")]
    Throttled(String),

    /// The provider answered with something that is not a valid page.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A local catalog snapshot could not be read or parsed.
    #[error("Catalog snapshot unreadable: {0}")]
    SnapshotUnreadable(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::SnapshotUnreadable(err.to_string())
    }
}

impl From<std::io::Error> for ProviderError {
    fn from(err: std::io::Error) -> Self {
        ProviderError::SnapshotUnreadable(err.to_string())
    }
}

// =============================================================================
// Selector Error
// =============================================================================

/// Selector error type covering every way a selection can fail.
#[derive(Debug, Error)]
pub enum SelectorError {
    /// Location or dispatch failure from the pure engine.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A provider call failed while paging.
    #[error("Encountered an error when calling {operation}: {source}")]
    UpstreamFetch {
        operation: &'static str,
        #[source]
        source: ProviderError,
    },

    /// Invalid selector configuration.
    #[error("Invalid selector configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for SelectorError {
    fn from(err: std::io::Error) -> Self {
        SelectorError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SelectorError {
    fn from(err: toml::de::Error) -> Self {
        SelectorError::ConfigLoadFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl SelectorError {
    /// Wraps a provider failure with the name of the failing call.
    pub fn upstream(operation: &'static str, source: ProviderError) -> Self {
        SelectorError::UpstreamFetch { operation, source }
    }

    /// Returns true if a provider call failed.
    pub fn is_upstream_error(&self) -> bool {
        matches!(self, SelectorError::UpstreamFetch { .. })
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SelectorError::InvalidConfig(_) | SelectorError::ConfigLoadFailed(_)
        )
    }

    /// Returns true if the caller supplied a location of no known shape.
    pub fn is_invalid_location(&self) -> bool {
        matches!(self, SelectorError::Core(CoreError::InvalidLocationFormat(_)))
    }
}
