//! The route → direction → stop → departure pipeline.

use chrono::{DateTime, FixedOffset, Utc};
use tracing::info;

use crate::countdown::{Countdown, extract_departure_instant, format_countdown};
use crate::domain::{DirectionId, Heading, RouteId, StopId};
use crate::error::LookupError;
use crate::nextrip::TransitApi;
use crate::resolve::{resolve_direction, resolve_route, resolve_stop};

/// A validated request for the next departure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Substring of the route description.
    pub route: String,
    /// Substring of the stop name.
    pub stop: String,
    /// Direction of travel.
    pub heading: Heading,
}

impl Query {
    pub fn new(route: impl Into<String>, stop: impl Into<String>, heading: Heading) -> Self {
        Self {
            route: route.into(),
            stop: stop.into(),
            heading,
        }
    }
}

/// The resolved identifiers and the earliest departure for a [`Query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextDeparture {
    pub route: RouteId,
    pub direction: DirectionId,
    pub stop: StopId,
    pub departs_at: DateTime<FixedOffset>,
}

impl NextDeparture {
    /// Resolve each identifier in turn and fetch the earliest departure.
    ///
    /// Every request waits for the previous one; the first failure ends
    /// the lookup.
    pub async fn lookup<A: TransitApi>(api: &A, query: &Query) -> Result<Self, LookupError> {
        let route = resolve_route(api, &query.route).await?;
        let direction = resolve_direction(api, query.heading.as_str(), &route).await?;
        let stop = resolve_stop(api, &query.stop, &route, &direction).await?;
        let departs_at = extract_departure_instant(api, &route, &direction, &stop).await?;

        info!(%route, %direction, %stop, %departs_at, "found next departure");

        Ok(Self {
            route,
            direction,
            stop,
            departs_at,
        })
    }

    /// Countdown from `now` until this departure.
    pub fn countdown(&self, now: DateTime<Utc>) -> Countdown {
        Countdown::between(self.departs_at, now)
    }
}

/// Run a full lookup and render the countdown as of the current time.
pub async fn next_departure_countdown<A: TransitApi>(
    api: &A,
    query: &Query,
) -> Result<String, LookupError> {
    let next = NextDeparture::lookup(api, query).await?;
    Ok(format_countdown(next.departs_at))
}
