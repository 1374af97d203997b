//! # Selector
//!
//! The public entry points: one call resolves the location, sweeps the
//! catalog, sorts and truncates.
//!
//! ## Selection Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  FilterSpecification                                                    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ┌────────────────┐  zone or region  ┌──────────────────────────────┐   │
//! │  │ location()     │ ───────────────► │ resolve_location             │   │
//! │  └───────┬────────┘                  │ (AvailabilityProvider pages) │   │
//! │          │ none                      └──────────────┬───────────────┘   │
//! │          ▼                                          ▼                   │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │ collect_candidates (CatalogProvider pages → CandidateSet)      │   │
//! │  └───────────────────────────────┬─────────────────────────────────┘   │
//! │                                  ▼                                      │
//! │                    finalize (sort by name, truncate)                    │
//! │                                  │                                      │
//! │            ┌─────────────────────┼──────────────────────┐               │
//! │            ▼                     ▼                      ▼               │
//! │        filter()          filter_verbose()     filter_with_output()      │
//! │     names per line        raw records          caller formatter         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shapefinder_core::{finalize, FilterSpecification, LocationIndex, ShapeInfo};
use tracing::info;

use crate::aggregator::collect_candidates;
use crate::config::{PagingSettings, SelectorConfig};
use crate::error::SelectorResult;
use crate::outputs::simple_output;
use crate::provider::{AvailabilityProvider, CatalogProvider};
use crate::resolver::resolve_location;

/// Filters a provider's catalog by a [`FilterSpecification`].
///
/// Each call is independent: the candidate set lives only for the duration
/// of one selection.
#[derive(Debug, Clone)]
pub struct Selector<P> {
    provider: P,
    user_agent: String,
    paging: PagingSettings,
}

impl<P> Selector<P>
where
    P: CatalogProvider + AvailabilityProvider,
{
    pub fn new(provider: P, config: &SelectorConfig) -> Self {
        Selector {
            provider,
            user_agent: config.user_agent(),
            paging: config.paging,
        }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Matching instance-type names, sorted and truncated.
    pub async fn filter(&self, spec: &FilterSpecification) -> SelectorResult<Vec<String>> {
        self.filter_with_output(spec, simple_output).await
    }

    /// Matching records, unformatted.
    pub async fn filter_verbose(&self, spec: &FilterSpecification) -> SelectorResult<Vec<ShapeInfo>> {
        self.raw_filter(spec).await
    }

    /// Matching records rendered by `output`.
    pub async fn filter_with_output<F>(
        &self,
        spec: &FilterSpecification,
        output: F,
    ) -> SelectorResult<Vec<String>>
    where
        F: Fn(&[ShapeInfo]) -> Vec<String>,
    {
        let shapes = self.raw_filter(spec).await?;
        Ok(output(&shapes))
    }

    /// Index of instance types offered in `location`; `None` for no restriction.
    pub async fn retrieve_supported_in_location(
        &self,
        location: &str,
    ) -> SelectorResult<Option<LocationIndex>> {
        resolve_location(&self.provider, location, &self.paging, &self.user_agent).await
    }

    async fn raw_filter(&self, spec: &FilterSpecification) -> SelectorResult<Vec<ShapeInfo>> {
        let location = spec.location().unwrap_or_default();
        info!(
            location = %location,
            max_results = ?spec.max_results,
            "Starting instance type selection"
        );

        let location_index = self.retrieve_supported_in_location(location).await?;
        let candidates = collect_candidates(
            &self.provider,
            spec,
            location_index.as_ref(),
            &self.paging,
            &self.user_agent,
        )
        .await?;

        let shapes = finalize(candidates, spec.max_results);
        info!(matched = shapes.len(), "Instance type selection finished");
        Ok(shapes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectorError;
    use crate::outputs::table_output;
    use crate::provider::DESCRIBE_SHAPES;
    use crate::test_support::ScriptedProvider;
    use shapefinder_core::{CoreError, FloatRange, IntRange, LocationType};

    fn shape(name: &str, vcpus: i64, memory_mib: i64) -> ShapeInfo {
        let mut shape = ShapeInfo::new(name);
        shape.vcpu_info.default_vcpus = Some(vcpus);
        shape.memory_info.size_in_mib = Some(memory_mib);
        shape.burstable_performance_supported = Some(false);
        shape
    }

    /// Deliberately unsorted, spread over two pages of two.
    fn catalog() -> ScriptedProvider {
        let mut t3 = shape("t3.micro", 2, 1024);
        t3.burstable_performance_supported = Some(true);
        ScriptedProvider::default()
            .with_shape(t3)
            .with_shape(shape("m5.xlarge", 4, 16384))
            .with_shape(shape("m5.large", 2, 8192))
    }

    fn selector(provider: ScriptedProvider) -> Selector<ScriptedProvider> {
        let mut config = SelectorConfig::default();
        config.client.version = "1.0.0".into();
        config.paging.shape_page_size = 2;
        Selector::new(provider, &config)
    }

    #[tokio::test]
    async fn test_empty_spec_returns_whole_catalog_sorted() {
        let selector = selector(catalog());
        let names = selector.filter(&FilterSpecification::default()).await.unwrap();
        assert_eq!(names, vec!["m5.large", "m5.xlarge", "t3.micro"]);
        assert_eq!(selector.provider().offering_calls(), 0);
        assert_eq!(selector.provider().shape_calls(), 2);
    }

    #[tokio::test]
    async fn test_vcpu_range() {
        let spec = FilterSpecification {
            vcpus_range: Some(IntRange::between(2, 2)),
            ..Default::default()
        };
        let names = selector(catalog()).filter(&spec).await.unwrap();
        assert_eq!(names, vec!["m5.large", "t3.micro"]);
    }

    #[tokio::test]
    async fn test_burstable_flag() {
        let spec = FilterSpecification {
            burstable: Some(true),
            ..Default::default()
        };
        let names = selector(catalog()).filter(&spec).await.unwrap();
        assert_eq!(names, vec!["t3.micro"]);
    }

    #[tokio::test]
    async fn test_max_results_truncates_after_sort() {
        let spec = FilterSpecification {
            vcpus_range: Some(IntRange::between(2, 2)),
            max_results: Some(1),
            ..Default::default()
        };
        let names = selector(catalog()).filter(&spec).await.unwrap();
        assert_eq!(names, vec!["m5.large"]);
    }

    #[tokio::test]
    async fn test_zero_max_results_is_empty() {
        let spec = FilterSpecification {
            max_results: Some(0),
            ..Default::default()
        };
        assert!(selector(catalog()).filter(&spec).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_location_restricts_to_index() {
        let provider = catalog().with_offering("m5.large", LocationType::ZoneId, "use1-az1");
        let spec = FilterSpecification {
            availability_zone: Some("use1-az1".into()),
            ..Default::default()
        };
        let selector = selector(provider);
        let names = selector.filter(&spec).await.unwrap();
        assert_eq!(names, vec!["m5.large"]);

        let request = &selector.provider().offering_requests()[0];
        assert_eq!(request.location_type, LocationType::ZoneId);
        assert_eq!(request.user_agent, "shapefinder-v1.0.0");
    }

    #[tokio::test]
    async fn test_zone_takes_precedence_over_region() {
        let provider = catalog()
            .with_offering("m5.large", LocationType::ZoneName, "us-east-1a")
            .with_offering("t3.micro", LocationType::Region, "us-east-1");
        let spec = FilterSpecification {
            availability_zone: Some("us-east-1a".into()),
            region: Some("us-east-1".into()),
            ..Default::default()
        };
        let names = selector(provider).filter(&spec).await.unwrap();
        assert_eq!(names, vec!["m5.large"]);
    }

    #[tokio::test]
    async fn test_invalid_location_fetches_nothing() {
        let spec = FilterSpecification {
            availability_zone: Some("not-a-zone".into()),
            ..Default::default()
        };
        let selector = selector(catalog());
        let err = selector.filter(&spec).await.unwrap_err();

        assert!(matches!(
            err,
            SelectorError::Core(CoreError::InvalidLocationFormat(_))
        ));
        assert_eq!(selector.provider().shape_calls(), 0);
        assert_eq!(selector.provider().offering_calls(), 0);
    }

    #[tokio::test]
    async fn test_upstream_error_yields_no_partial_result() {
        let selector = selector(catalog().fail_shapes_on_call(2));
        let err = selector.filter(&FilterSpecification::default()).await.unwrap_err();
        assert!(matches!(
            err,
            SelectorError::UpstreamFetch {
                operation: DESCRIBE_SHAPES,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_repeated_selection_is_deterministic() {
        let selector = selector(catalog());
        let spec = FilterSpecification {
            vcpus_to_memory_ratio: Some(FloatRange::between(0.0, 1.0)),
            ..Default::default()
        };
        let first = selector.filter_with_output(&spec, table_output).await.unwrap();
        let second = selector.filter_with_output(&spec, table_output).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_verbose_returns_records() {
        let spec = FilterSpecification {
            memory_range: Some(IntRange::at_least(8192)),
            ..Default::default()
        };
        let shapes = selector(catalog()).filter_verbose(&spec).await.unwrap();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].instance_type, "m5.large");
        assert_eq!(shapes[1].memory_mib(), Some(16384));
    }

    #[tokio::test]
    async fn test_custom_formatter() {
        let names = selector(catalog())
            .filter_with_output(&FilterSpecification::default(), |shapes: &[ShapeInfo]| {
                vec![format!("{} matches", shapes.len())]
            })
            .await
            .unwrap();
        assert_eq!(names, vec!["3 matches"]);
    }

    #[tokio::test]
    async fn test_retrieve_supported_in_location() {
        let provider = ScriptedProvider::default()
            .with_offering("c5.large", LocationType::Region, "eu-west-1");
        let selector = selector(provider);

        let index = selector
            .retrieve_supported_in_location("eu-west-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(index.location_of("c5.large"), Some("eu-west-1"));
        assert!(selector.retrieve_supported_in_location("").await.unwrap().is_none());
    }
}
