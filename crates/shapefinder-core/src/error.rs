//! # Error Types
//!
//! Domain-specific error types for shapefinder-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shapefinder-core errors (this file)                                   │
//! │  └── CoreError                                                          │
//! │      ├── InvalidLocationFormat  - location matches no known shape      │
//! │      └── UnsupportedFilterType  - filter table pairs the wrong shapes  │
//! │                                                                         │
//! │  shapefinder-selector errors (separate crate)                          │
//! │  └── SelectorError   - wraps CoreError, adds UpstreamFetch + config    │
//! │                                                                         │
//! │  Flow: CoreError → SelectorError → caller / CLI exit status            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both variants abort the whole selection. Nothing partial is returned.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while classifying a location or evaluating filters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The location string is not a zone-id, zone-name or region name.
    ///
    /// ## When This Occurs
    /// - Typos such as `"us-east"` or `"useast1"`
    /// - Free-form strings such as `"not-a-zone"`
    ///
    /// Raised before any provider call is made.
    #[error("The location passed in ({0}) is not a valid zone-id, zone-name, or region name")]
    InvalidLocationFormat(String),

    /// A filter value was paired with a record attribute of a shape no
    /// comparator handles.
    ///
    /// Only reachable through a misconfigured filter descriptor table.
    #[error(
        "Unable to process filter ({filter}: {value_kind}) corresponding to instance spec ({attribute_kind}) for instance type {instance_type}"
    )]
    UnsupportedFilterType {
        filter: String,
        value_kind: &'static str,
        attribute_kind: &'static str,
        instance_type: String,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_location_message() {
        let err = CoreError::InvalidLocationFormat("not-a-zone".to_string());
        assert_eq!(
            err.to_string(),
            "The location passed in (not-a-zone) is not a valid zone-id, zone-name, or region name"
        );
    }

    #[test]
    fn test_unsupported_filter_message_names_everything() {
        let err = CoreError::UnsupportedFilterType {
            filter: "hypervisor".to_string(),
            value_kind: "boolean",
            attribute_kind: "text",
            instance_type: "m5.large".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("hypervisor"));
        assert!(msg.contains("boolean"));
        assert!(msg.contains("text"));
        assert!(msg.contains("m5.large"));
    }
}
