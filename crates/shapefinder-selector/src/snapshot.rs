//! # Snapshot Provider
//!
//! Serves the catalog and its offerings from a JSON document, page by page.
//!
//! ## Snapshot Format
//! ```json
//! {
//!   "InstanceTypes": [
//!     { "InstanceType": "m5.large", "VCpuInfo": { "DefaultVCpus": 2 }, "MemoryInfo": { "SizeInMiB": 8192 } }
//!   ],
//!   "InstanceTypeOfferings": [
//!     { "InstanceType": "m5.large", "LocationType": "availability-zone-id", "Location": "use1-az1" }
//!   ]
//! }
//! ```
//!
//! The next-token is the offset of the next item, so paging over a snapshot
//! behaves like paging over the live listing.

use std::path::Path;

use serde::{Deserialize, Serialize};
use shapefinder_core::ShapeInfo;
use tracing::{debug, info};

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{
    AvailabilityProvider, CatalogProvider, InstanceTypeOffering, OfferingPage,
    OfferingPageRequest, ShapePage, ShapePageRequest,
};

// =============================================================================
// Catalog Snapshot
// =============================================================================

/// A point-in-time copy of both provider listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub instance_types: Vec<ShapeInfo>,

    #[serde(default)]
    pub instance_type_offerings: Vec<InstanceTypeOffering>,
}

// =============================================================================
// Snapshot Provider
// =============================================================================

/// Provider backed by an in-memory [`CatalogSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotProvider {
    snapshot: CatalogSnapshot,
}

impl SnapshotProvider {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        SnapshotProvider { snapshot }
    }

    pub fn from_json(json: &str) -> ProviderResult<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Reads and parses a snapshot file.
    pub fn load(path: &Path) -> ProviderResult<Self> {
        info!(?path, "Loading catalog snapshot");
        let contents = std::fs::read_to_string(path)?;
        let provider = Self::from_json(&contents)?;
        debug!(
            shapes = provider.snapshot.instance_types.len(),
            offerings = provider.snapshot.instance_type_offerings.len(),
            "Catalog snapshot loaded"
        );
        Ok(provider)
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }
}

impl CatalogProvider for SnapshotProvider {
    async fn describe_shapes(&self, request: ShapePageRequest) -> ProviderResult<ShapePage> {
        let (shapes, next_token) = page_of(
            &self.snapshot.instance_types,
            request.next_token.as_deref(),
            request.max_results,
        )?;
        Ok(ShapePage { shapes, next_token })
    }
}

impl AvailabilityProvider for SnapshotProvider {
    async fn describe_offerings(
        &self,
        request: OfferingPageRequest,
    ) -> ProviderResult<OfferingPage> {
        let matching: Vec<InstanceTypeOffering> = self
            .snapshot
            .instance_type_offerings
            .iter()
            .filter(|offering| {
                offering.location_type == request.location_type
                    && offering.location == request.location
            })
            .cloned()
            .collect();

        let (offerings, next_token) =
            page_of(&matching, request.next_token.as_deref(), request.max_results)?;
        Ok(OfferingPage {
            offerings,
            next_token,
        })
    }
}

/// Slices one page out of `items` starting at the offset encoded in `token`.
fn page_of<T: Clone>(
    items: &[T],
    token: Option<&str>,
    max_results: usize,
) -> ProviderResult<(Vec<T>, Option<String>)> {
    let start = match token {
        None => 0,
        Some(token) => token
            .parse::<usize>()
            .ok()
            .filter(|offset| *offset <= items.len())
            .ok_or_else(|| ProviderError::RequestFailed(format!("invalid next token: {token}")))?,
    };
    let end = start.saturating_add(max_results.max(1)).min(items.len());
    let next_token = (end < items.len()).then(|| end.to_string());
    Ok((items[start..end].to_vec(), next_token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapefinder_core::LocationType;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "InstanceTypes": [
            { "InstanceType": "m5.large" },
            { "InstanceType": "m5.xlarge" },
            { "InstanceType": "t3.micro" }
        ],
        "InstanceTypeOfferings": [
            { "InstanceType": "m5.large", "LocationType": "availability-zone-id", "Location": "use1-az1" },
            { "InstanceType": "t3.micro", "LocationType": "availability-zone-id", "Location": "use1-az2" },
            { "InstanceType": "t3.micro", "LocationType": "region", "Location": "us-east-1" }
        ]
    }"#;

    fn shape_request(next_token: Option<String>, max_results: usize) -> ShapePageRequest {
        ShapePageRequest {
            next_token,
            max_results,
            user_agent: "test".to_string(),
        }
    }

    #[test]
    fn test_page_of_slices_and_tokens() {
        let items = vec![1, 2, 3, 4, 5];
        assert_eq!(page_of(&items, None, 2).unwrap(), (vec![1, 2], Some("2".into())));
        assert_eq!(page_of(&items, Some("4"), 2).unwrap(), (vec![5], None));
        assert_eq!(page_of(&items, None, 10).unwrap(), (items.clone(), None));
        assert!(page_of(&items, Some("nope"), 2).is_err());
        assert!(page_of(&items, Some("9"), 2).is_err());
    }

    #[test]
    fn test_page_of_empty() {
        let items: Vec<i32> = vec![];
        assert_eq!(page_of(&items, None, 5).unwrap(), (vec![], None));
    }

    #[tokio::test]
    async fn test_describe_shapes_pages_through_catalog() {
        let provider = SnapshotProvider::from_json(SNAPSHOT).unwrap();

        let first = provider.describe_shapes(shape_request(None, 2)).await.unwrap();
        assert_eq!(first.shapes.len(), 2);
        let second = provider
            .describe_shapes(shape_request(first.next_token, 2))
            .await
            .unwrap();
        assert_eq!(second.shapes[0].instance_type, "t3.micro");
        assert!(second.next_token.is_none());
    }

    #[tokio::test]
    async fn test_describe_offerings_filters_by_location() {
        let provider = SnapshotProvider::from_json(SNAPSHOT).unwrap();
        let page = provider
            .describe_offerings(OfferingPageRequest {
                location_type: LocationType::ZoneId,
                location: "use1-az1".to_string(),
                next_token: None,
                max_results: 10,
                user_agent: "test".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(page.offerings.len(), 1);
        assert_eq!(page.offerings[0].instance_type, "m5.large");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();
        let provider = SnapshotProvider::load(file.path()).unwrap();
        assert_eq!(provider.snapshot().instance_types.len(), 3);
        assert_eq!(provider.snapshot().instance_type_offerings.len(), 3);
    }

    #[test]
    fn test_load_reports_unreadable_snapshot() {
        let err = SnapshotProvider::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ProviderError::SnapshotUnreadable(_)));
    }
}
