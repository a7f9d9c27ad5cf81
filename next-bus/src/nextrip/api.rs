//! The transport seam between the lookup pipeline and NexTrip.

use crate::domain::{DirectionId, RouteId, StopId};

use super::error::ApiError;
use super::types::{DepartureRecord, DirectionRecord, RouteRecord, StopRecord};

/// Source of NexTrip records.
///
/// Implemented by [`NexTripClient`](super::NexTripClient) for the live API
/// and by [`MockNexTripClient`](super::MockNexTripClient) for tests. Each
/// call is one request; callers await it before issuing the next.
#[allow(async_fn_in_trait)]
pub trait TransitApi {
    /// All routes, in the order NexTrip lists them.
    async fn routes(&self) -> Result<Vec<RouteRecord>, ApiError>;

    /// Directions served by `route`.
    async fn directions(&self, route: &RouteId) -> Result<Vec<DirectionRecord>, ApiError>;

    /// Stops served by `route` travelling in `direction`.
    async fn stops(
        &self,
        route: &RouteId,
        direction: &DirectionId,
    ) -> Result<Vec<StopRecord>, ApiError>;

    /// Upcoming departures at `stop`, earliest first.
    async fn departures(
        &self,
        route: &RouteId,
        direction: &DirectionId,
        stop: &StopId,
    ) -> Result<Vec<DepartureRecord>, ApiError>;
}
