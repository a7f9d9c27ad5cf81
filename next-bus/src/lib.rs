//! Next bus countdown.
//!
//! Answers "how long until the next bus?" for a Metro Transit route, stop
//! and direction given as loose text, using the NexTrip real-time API.

pub mod cli;
pub mod countdown;
pub mod domain;
pub mod error;
pub mod lookup;
pub mod nextrip;
pub mod resolve;

pub use error::{ErrorKind, LookupError};
pub use lookup::{NextDeparture, Query, next_departure_countdown};
