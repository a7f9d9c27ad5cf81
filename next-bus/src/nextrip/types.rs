//! NexTrip API response DTOs.
//!
//! These types map directly to the NexTrip JSON records. Required fields
//! are the ones the lookup pipeline reads; the rest are `Option` because
//! NexTrip omits them freely. Unknown fields are ignored.

use serde::Deserialize;

use crate::domain::{DirectionId, RouteId, StopId};

/// Record from `GET /Routes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteRecord {
    /// Route identifier used in all further requests.
    pub route: RouteId,

    /// Human-readable route name, e.g. "METRO Blue Line".
    pub description: String,

    /// Operating agency.
    #[serde(rename = "ProviderID")]
    pub provider_id: Option<serde_json::Value>,
}

impl RouteRecord {
    /// Create a record with no provider.
    pub fn new(route: RouteId, description: impl Into<String>) -> Self {
        Self {
            route,
            description: description.into(),
            provider_id: None,
        }
    }
}

/// Record from `GET /Directions/{route}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DirectionRecord {
    /// Display text, e.g. "NORTHBOUND".
    pub text: String,

    /// Direction identifier.
    pub value: DirectionId,
}

impl DirectionRecord {
    pub fn new(value: DirectionId, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value,
        }
    }
}

/// Record from `GET /Stops/{route}/{direction}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StopRecord {
    /// Display text, e.g. "Nicollet Mall and 5th St".
    pub text: String,

    /// Stop identifier (place code).
    pub value: StopId,
}

impl StopRecord {
    pub fn new(value: StopId, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value,
        }
    }
}

/// Record from `GET /{route}/{direction}/{stop}`.
///
/// NexTrip returns these ordered earliest first.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepartureRecord {
    /// Departure time as `/Date(<ms><±hhmm>)/`.
    pub departure_time: String,

    /// Whether the time is a real-time prediction rather than the schedule.
    pub actual: Option<bool>,

    /// Headsign text.
    pub description: Option<String>,

    /// Countdown text as shown on signage, e.g. "5 Min" or "10:42".
    pub departure_text: Option<String>,

    /// Route label for display.
    pub route: Option<String>,

    /// Branch letter, if the route has branches.
    pub terminal: Option<String>,
}

impl DepartureRecord {
    /// Create a record carrying only a departure time.
    pub fn new(departure_time: impl Into<String>) -> Self {
        Self {
            departure_time: departure_time.into(),
            actual: None,
            description: None,
            departure_text: None,
            route: None,
            terminal: None,
        }
    }
}
