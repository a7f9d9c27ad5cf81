//! Metro Transit NexTrip client.
//!
//! This module provides an HTTP client for the NexTrip real-time departures
//! API, plus an in-memory stand-in for tests.
//!
//! Key characteristics of NexTrip:
//! - Every endpoint returns a bare JSON array and takes `format=json`
//! - Directions are scoped to a route, stops to a route and direction
//! - Identifiers are sometimes strings, sometimes numbers
//! - Departure times use the `/Date(<ms><±hhmm>)/` encoding

mod api;
mod client;
mod error;
mod mock;
mod types;

pub use api::TransitApi;
pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, NexTripClient, NexTripConfig};
pub use error::ApiError;
pub use mock::MockNexTripClient;
pub use types::{DepartureRecord, DirectionRecord, RouteRecord, StopRecord};
