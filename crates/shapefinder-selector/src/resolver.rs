//! # Location Resolver
//!
//! Turns a location string into the index of instance types offered there.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ""            ──► None (no restriction, provider never called)        │
//! │  "not-a-zone"  ──► InvalidLocationFormat (provider never called)       │
//! │  "use1-az1"    ──► classify ──► page offerings ──► Some(LocationIndex) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shapefinder_core::{classify_location, LocationIndex};
use tracing::debug;

use crate::config::PagingSettings;
use crate::error::{SelectorError, SelectorResult};
use crate::provider::{AvailabilityProvider, OfferingPageRequest, DESCRIBE_OFFERINGS};

/// Builds the [`LocationIndex`] for `location`, across all offering pages.
pub async fn resolve_location<P: AvailabilityProvider>(
    provider: &P,
    location: &str,
    paging: &PagingSettings,
    user_agent: &str,
) -> SelectorResult<Option<LocationIndex>> {
    if location.is_empty() {
        return Ok(None);
    }
    let location_type = classify_location(location)?;
    debug!(%location, %location_type, "Resolving instance types offered in location");

    let mut index = LocationIndex::new();
    let mut next_token = None;
    let mut pages = 0usize;
    loop {
        let page = provider
            .describe_offerings(OfferingPageRequest {
                location_type,
                location: location.to_string(),
                next_token,
                max_results: paging.offering_page_size,
                user_agent: user_agent.to_string(),
            })
            .await
            .map_err(|source| SelectorError::upstream(DESCRIBE_OFFERINGS, source))?;
        pages += 1;

        for offering in page.offerings {
            index.insert(offering.instance_type, offering.location);
        }

        match page.next_token {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }

    debug!(%location, pages, offered = index.len(), "Location resolved");
    Ok(Some(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedProvider;
    use shapefinder_core::{CoreError, LocationType};

    fn paging() -> PagingSettings {
        PagingSettings {
            shape_page_size: 2,
            offering_page_size: 1,
        }
    }

    #[tokio::test]
    async fn test_empty_location_is_no_restriction() {
        let provider = ScriptedProvider::default();
        let index = resolve_location(&provider, "", &paging(), "ua").await.unwrap();
        assert!(index.is_none());
        assert_eq!(provider.offering_calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_location_never_calls_provider() {
        let provider = ScriptedProvider::default();
        let err = resolve_location(&provider, "not-a-zone", &paging(), "ua")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SelectorError::Core(CoreError::InvalidLocationFormat(ref l)) if l == "not-a-zone"
        ));
        assert_eq!(provider.offering_calls(), 0);
    }

    #[tokio::test]
    async fn test_collects_every_page() {
        let provider = ScriptedProvider::default()
            .with_offering("m5.large", LocationType::Region, "us-east-1")
            .with_offering("t3.micro", LocationType::Region, "us-east-1")
            .with_offering("c5.large", LocationType::Region, "us-west-2");

        let index = resolve_location(&provider, "us-east-1", &paging(), "ua")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(index.len(), 2);
        assert!(index.contains("m5.large"));
        assert!(index.contains("t3.micro"));
        assert!(!index.contains("c5.large"));
        assert_eq!(provider.offering_calls(), 2);

        let requests = provider.offering_requests();
        assert_eq!(requests[0].location_type, LocationType::Region);
        assert_eq!(requests[0].user_agent, "ua");
        assert_eq!(requests[1].next_token.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_produced_index_may_be_empty() {
        let provider = ScriptedProvider::default();
        let index = resolve_location(&provider, "use1-az1", &paging(), "ua")
            .await
            .unwrap();
        assert_eq!(index, Some(LocationIndex::new()));
    }

    #[tokio::test]
    async fn test_provider_failure_is_wrapped() {
        let provider = ScriptedProvider::default().fail_offerings_on_call(1);
        let err = resolve_location(&provider, "us-east-1a", &paging(), "ua")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SelectorError::UpstreamFetch {
                operation: DESCRIBE_OFFERINGS,
                ..
            }
        ));
    }
}
