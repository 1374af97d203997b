//! Test-only provider that records requests and can fail on demand.

use std::sync::Mutex;

use shapefinder_core::{LocationType, ShapeInfo};

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{
    AvailabilityProvider, CatalogProvider, InstanceTypeOffering, OfferingPage,
    OfferingPageRequest, ShapePage, ShapePageRequest,
};
use crate::snapshot::{CatalogSnapshot, SnapshotProvider};

#[derive(Debug, Default)]
pub struct ScriptedProvider {
    snapshot: CatalogSnapshot,
    fail_shapes_on: Option<usize>,
    fail_offerings_on: Option<usize>,
    shape_requests: Mutex<Vec<ShapePageRequest>>,
    offering_requests: Mutex<Vec<OfferingPageRequest>>,
}

impl ScriptedProvider {
    pub fn with_shape(mut self, shape: ShapeInfo) -> Self {
        self.snapshot.instance_types.push(shape);
        self
    }

    pub fn with_offering(
        mut self,
        instance_type: &str,
        location_type: LocationType,
        location: &str,
    ) -> Self {
        self.snapshot.instance_type_offerings.push(InstanceTypeOffering {
            instance_type: instance_type.to_string(),
            location_type,
            location: location.to_string(),
        });
        self
    }

    /// The n-th catalog call (1-based) fails.
    pub fn fail_shapes_on_call(mut self, call: usize) -> Self {
        self.fail_shapes_on = Some(call);
        self
    }

    /// The n-th offerings call (1-based) fails.
    pub fn fail_offerings_on_call(mut self, call: usize) -> Self {
        self.fail_offerings_on = Some(call);
        self
    }

    pub fn shape_calls(&self) -> usize {
        self.shape_requests.lock().unwrap().len()
    }

    pub fn offering_calls(&self) -> usize {
        self.offering_requests.lock().unwrap().len()
    }

    pub fn shape_requests(&self) -> Vec<ShapePageRequest> {
        self.shape_requests.lock().unwrap().clone()
    }

    pub fn offering_requests(&self) -> Vec<OfferingPageRequest> {
        self.offering_requests.lock().unwrap().clone()
    }

    fn backing(&self) -> SnapshotProvider {
        SnapshotProvider::new(self.snapshot.clone())
    }
}

impl CatalogProvider for ScriptedProvider {
    async fn describe_shapes(&self, request: ShapePageRequest) -> ProviderResult<ShapePage> {
        let call = {
            let mut requests = self.shape_requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };
        if self.fail_shapes_on == Some(call) {
            return Err(ProviderError::RequestFailed(format!("scripted failure on call {call}")));
        }
        self.backing().describe_shapes(request).await
    }
}

impl AvailabilityProvider for ScriptedProvider {
    async fn describe_offerings(
        &self,
        request: OfferingPageRequest,
    ) -> ProviderResult<OfferingPage> {
        let call = {
            let mut requests = self.offering_requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };
        if self.fail_offerings_on == Some(call) {
            return Err(ProviderError::RequestFailed(format!("scripted failure on call {call}")));
        }
        self.backing().describe_offerings(request).await
    }
}
