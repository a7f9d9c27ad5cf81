//! Countdown to the next departure.

use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use tracing::{debug, warn};

use crate::domain::{DepartureTime, DirectionId, RouteId, StopId};
use crate::error::LookupError;
use crate::nextrip::TransitApi;

/// Whole seconds remaining until a departure.
///
/// The seconds are truncated toward zero, and a departure already in the
/// past gives a negative countdown rather than being clamped.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use next_bus::countdown::Countdown;
///
/// let now = Utc::now();
/// let departure = (now + Duration::seconds(125)).fixed_offset();
///
/// let countdown = Countdown::between(departure, now);
/// assert_eq!(countdown.to_string(), "2 Minutes 5 Seconds");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Countdown {
    total_seconds: i64,
}

impl Countdown {
    /// Create a countdown of the given number of seconds.
    pub fn from_seconds(total_seconds: i64) -> Self {
        Self { total_seconds }
    }

    /// Countdown from `now` until `departure`.
    pub fn between(departure: DateTime<FixedOffset>, now: DateTime<Utc>) -> Self {
        let delta = departure.with_timezone(&Utc) - now;
        // num_seconds truncates toward zero
        Self::from_seconds(delta.num_seconds())
    }

    /// Returns the total number of seconds.
    pub fn total_seconds(&self) -> i64 {
        self.total_seconds
    }

    /// Returns whole minutes, truncated toward zero.
    pub fn minutes(&self) -> i64 {
        self.total_seconds / 60
    }

    /// Returns the seconds left over after [`minutes`](Self::minutes).
    pub fn seconds(&self) -> i64 {
        self.total_seconds - self.minutes() * 60
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Minutes {} Seconds", self.minutes(), self.seconds())
    }
}

/// Fetch departures for the stop and parse the earliest one's time.
///
/// An empty departure list means service has finished for the day.
pub async fn extract_departure_instant<A: TransitApi>(
    api: &A,
    route: &RouteId,
    direction: &DirectionId,
    stop: &StopId,
) -> Result<DateTime<FixedOffset>, LookupError> {
    let departures = api.departures(route, direction, stop).await?;
    let first = departures.first().ok_or(LookupError::NoMoreDepartures)?;

    debug!(
        departure_time = %first.departure_time,
        departure_text = ?first.departure_text,
        actual = ?first.actual,
        headsign = ?first.description,
        "next departure"
    );

    let time = DepartureTime::parse(&first.departure_time)?;
    Ok(time.instant())
}

/// Render the time from now until `instant` as `"<m> Minutes <s> Seconds"`.
pub fn format_countdown(instant: DateTime<FixedOffset>) -> String {
    let countdown = Countdown::between(instant, Utc::now());
    if countdown.total_seconds() < 0 {
        warn!(
            seconds = countdown.total_seconds(),
            "departure time is already in the past"
        );
    }
    countdown.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nextrip::{DepartureRecord, MockNexTripClient};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_600_000_000_000).unwrap()
    }

    fn ids() -> (RouteId, DirectionId, StopId) {
        (
            RouteId::parse("1902").unwrap(),
            DirectionId::parse("2").unwrap(),
            StopId::parse("DLSL").unwrap(),
        )
    }

    #[test]
    fn format_examples() {
        assert_eq!(Countdown::from_seconds(125).to_string(), "2 Minutes 5 Seconds");
        assert_eq!(Countdown::from_seconds(0).to_string(), "0 Minutes 0 Seconds");
        assert_eq!(Countdown::from_seconds(59).to_string(), "0 Minutes 59 Seconds");
        assert_eq!(Countdown::from_seconds(60).to_string(), "1 Minutes 0 Seconds");
    }

    #[test]
    fn negative_is_not_clamped() {
        let countdown = Countdown::from_seconds(-125);
        assert_eq!(countdown.minutes(), -2);
        assert_eq!(countdown.seconds(), -5);
        assert_eq!(countdown.to_string(), "-2 Minutes -5 Seconds");

        assert_eq!(Countdown::from_seconds(-59).to_string(), "0 Minutes -59 Seconds");
    }

    #[test]
    fn between_uses_offset_free_instant() {
        let central = FixedOffset::west_opt(5 * 3600).unwrap();
        let departure = (now() + Duration::seconds(125)).with_timezone(&central);

        assert_eq!(Countdown::between(departure, now()).total_seconds(), 125);
    }

    #[test]
    fn between_truncates_toward_zero() {
        let ahead = (now() + Duration::milliseconds(59_999)).fixed_offset();
        assert_eq!(Countdown::between(ahead, now()).total_seconds(), 59);

        let behind = (now() - Duration::milliseconds(1_500)).fixed_offset();
        assert_eq!(Countdown::between(behind, now()).total_seconds(), -1);
    }

    #[tokio::test]
    async fn extract_first_departure() {
        let (route, direction, stop) = ids();
        let api = MockNexTripClient::new().with_departures(
            route.clone(),
            direction.clone(),
            stop.clone(),
            vec![
                DepartureRecord::new("/Date(1600000000000-0500)/"),
                DepartureRecord::new("/Date(1600000900000-0500)/"),
            ],
        );

        let instant = extract_departure_instant(&api, &route, &direction, &stop)
            .await
            .unwrap();

        assert_eq!(instant.timestamp_millis(), 1_600_000_000_000);
        assert_eq!(instant.offset().local_minus_utc(), -5 * 3600);
    }

    #[tokio::test]
    async fn empty_departures_means_last_bus_left() {
        let (route, direction, stop) = ids();
        let api = MockNexTripClient::new().with_departures(
            route.clone(),
            direction.clone(),
            stop.clone(),
            vec![],
        );

        let err = extract_departure_instant(&api, &route, &direction, &stop)
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::NoMoreDepartures));
    }

    #[tokio::test]
    async fn malformed_time_is_error() {
        let (route, direction, stop) = ids();
        let api = MockNexTripClient::new().with_departures(
            route.clone(),
            direction.clone(),
            stop.clone(),
            vec![DepartureRecord::new("10:42")],
        );

        let err = extract_departure_instant(&api, &route, &direction, &stop)
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::DepartureTime(_)));
    }

    #[test]
    fn format_countdown_far_future() {
        let instant = (Utc::now() + Duration::hours(2)).fixed_offset();
        let text = format_countdown(instant);
        // Either 119:59 or 120:00 depending on how long the call took.
        assert!(
            text == "119 Minutes 59 Seconds" || text == "120 Minutes 0 Seconds",
            "{text}"
        );
    }
}
