//! Domain types for NexTrip lookups.
//!
//! Every type here enforces its invariants at construction time, so the
//! resolver and countdown code can trust values they are handed.

mod departure_time;
mod heading;
mod ids;

pub use departure_time::{DepartureTime, DepartureTimeError};
pub use heading::{Heading, InvalidHeading};
pub use ids::{DirectionId, InvalidId, RouteId, StopId};
