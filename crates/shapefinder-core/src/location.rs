//! # Location Classification
//!
//! Recognizes the three location granularities and answers the
//! location-membership question for a candidate.
//!
//! ## Recognized Shapes (checked in this order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. zone-id     use1-az1       → location type "availability-zone-id"  │
//! │  2. zone-name   us-east-1a     → location type "availability-zone"     │
//! │  3. region      us-east-1      → location type "region"                │
//! │                                                                         │
//! │  anything else  → CoreError::InvalidLocationFormat                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Zone names are account-relative; zone-ids are stable across accounts.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

static ZONE_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{3}[1-9]-az[1-9]$").expect("zone-id pattern is valid"));

static ZONE_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z]{2,3}-([a-z]{1,10}-)?[a-z]{1,10}-[1-9][a-z]$")
        .expect("zone-name pattern is valid")
});

static REGION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z]{2,3}-([a-z]{1,10}-)?[a-z]{1,10}-[1-9]").expect("region pattern is valid")
});

// =============================================================================
// Location Type
// =============================================================================

/// The granularity of a location string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationType {
    #[serde(rename = "availability-zone-id")]
    ZoneId,
    #[serde(rename = "availability-zone")]
    ZoneName,
    Region,
}

impl LocationType {
    /// The tag the availability provider filters on.
    pub const fn as_str(&self) -> &'static str {
        match self {
            LocationType::ZoneId => "availability-zone-id",
            LocationType::ZoneName => "availability-zone",
            LocationType::Region => "region",
        }
    }
}

impl std::fmt::Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a non-empty location string.
///
/// ## Example
/// ```rust
/// use shapefinder_core::location::{classify_location, LocationType};
///
/// assert_eq!(classify_location("use1-az1").unwrap(), LocationType::ZoneId);
/// assert_eq!(classify_location("us-east-1a").unwrap(), LocationType::ZoneName);
/// assert_eq!(classify_location("us-east-1").unwrap(), LocationType::Region);
/// assert!(classify_location("not-a-zone").is_err());
/// ```
pub fn classify_location(location: &str) -> CoreResult<LocationType> {
    if ZONE_ID_PATTERN.is_match(location) {
        Ok(LocationType::ZoneId)
    } else if ZONE_NAME_PATTERN.is_match(location) {
        Ok(LocationType::ZoneName)
    } else if REGION_PATTERN.is_match(location) {
        Ok(LocationType::Region)
    } else {
        Err(CoreError::InvalidLocationFormat(location.to_string()))
    }
}

// =============================================================================
// Location Index
// =============================================================================

/// Instance type name → the location it is offered in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationIndex {
    offerings: HashMap<String, String>,
}

impl LocationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one offering. A later offering for the same name replaces
    /// the earlier location.
    pub fn insert(&mut self, instance_type: impl Into<String>, location: impl Into<String>) {
        self.offerings.insert(instance_type.into(), location.into());
    }

    pub fn contains(&self, instance_type: &str) -> bool {
        self.offerings.contains_key(instance_type)
    }

    pub fn location_of(&self, instance_type: &str) -> Option<&str> {
        self.offerings.get(instance_type).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocationIndex {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index = LocationIndex::new();
        for (instance_type, location) in iter {
            index.insert(instance_type, location);
        }
        index
    }
}

/// Location membership: `None` means no restriction was requested.
///
/// A produced-but-empty index rejects everything.
pub fn is_supported_in_location(index: Option<&LocationIndex>, instance_type: &str) -> bool {
    index.map_or(true, |index| index.contains(instance_type))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_ids() {
        assert_eq!(classify_location("use1-az1"), Ok(LocationType::ZoneId));
        assert_eq!(classify_location("usw2-az3"), Ok(LocationType::ZoneId));
        assert!(classify_location("use1-az0").is_err());
    }

    #[test]
    fn test_zone_names() {
        assert_eq!(classify_location("us-east-1a"), Ok(LocationType::ZoneName));
        assert_eq!(classify_location("eu-west-2c"), Ok(LocationType::ZoneName));
        assert_eq!(classify_location("us-gov-west-1b"), Ok(LocationType::ZoneName));
    }

    #[test]
    fn test_regions() {
        assert_eq!(classify_location("us-east-1"), Ok(LocationType::Region));
        assert_eq!(classify_location("ap-southeast-2"), Ok(LocationType::Region));
        assert_eq!(classify_location("us-gov-west-1"), Ok(LocationType::Region));
    }

    #[test]
    fn test_invalid_locations() {
        for bad in ["not-a-zone", "us-east", "US-EAST-1", "useast1", "use1az1"] {
            assert_eq!(
                classify_location(bad),
                Err(CoreError::InvalidLocationFormat(bad.to_string())),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_location_type_tags() {
        assert_eq!(LocationType::ZoneId.to_string(), "availability-zone-id");
        assert_eq!(LocationType::ZoneName.to_string(), "availability-zone");
        assert_eq!(LocationType::Region.to_string(), "region");
    }

    #[test]
    fn test_membership_distinguishes_absent_from_empty() {
        assert!(is_supported_in_location(None, "m5.large"));

        let empty = LocationIndex::new();
        assert!(!is_supported_in_location(Some(&empty), "m5.large"));

        let index: LocationIndex = [("m5.large", "use1-az1")].into_iter().collect();
        assert!(is_supported_in_location(Some(&index), "m5.large"));
        assert!(!is_supported_in_location(Some(&index), "m5.xlarge"));
        assert_eq!(index.location_of("m5.large"), Some("use1-az1"));
    }
}
