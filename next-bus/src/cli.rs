//! Command-line arguments.

use clap::Parser;

use crate::domain::Heading;
use crate::lookup::Query;
use crate::nextrip::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, NexTripConfig};

/// Print a countdown to the next Metro Transit departure.
///
/// ROUTE and STOP are case-insensitive substrings of the route description
/// and stop name; each must match exactly one.
#[derive(Debug, Parser)]
#[command(name = "next-bus", version)]
pub struct Args {
    /// Part of the route description, e.g. "blue line"
    pub route: String,

    /// Part of the stop name, e.g. "target field"
    pub stop: String,

    /// Direction of travel: north, south, east or west
    pub direction: Heading,

    /// NexTrip API root
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl Args {
    /// The lookup these arguments describe.
    pub fn query(&self) -> Query {
        Query::new(&self.route, &self.stop, self.direction)
    }

    /// Client configuration from the connection flags.
    pub fn config(&self) -> NexTripConfig {
        NexTripConfig::new()
            .with_base_url(&self.base_url)
            .with_timeout(self.timeout)
    }
}
