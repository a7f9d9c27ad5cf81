//! Cardinal heading given on the command line.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing a heading that is not a cardinal direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction {input:?}: expected one of north, south, east, west")]
pub struct InvalidHeading {
    input: String,
}

/// The direction of travel the user asked for.
///
/// Parsing is case-insensitive. The lowercase word is what gets matched
/// against NexTrip direction text, so `East` finds `"EASTBOUND"`.
///
/// # Examples
///
/// ```
/// use next_bus::domain::Heading;
///
/// let heading: Heading = "NORTH".parse().unwrap();
/// assert_eq!(heading, Heading::North);
/// assert_eq!(heading.as_str(), "north");
///
/// assert!("up".parse::<Heading>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    South,
    East,
    West,
}

impl Heading {
    /// All headings, in the order they are listed in help text.
    pub const ALL: [Heading; 4] = [Heading::North, Heading::South, Heading::East, Heading::West];

    /// Returns the lowercase word for this heading.
    pub fn as_str(&self) -> &'static str {
        match self {
            Heading::North => "north",
            Heading::South => "south",
            Heading::East => "east",
            Heading::West => "west",
        }
    }
}

impl FromStr for Heading {
    type Err = InvalidHeading;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heading::ALL
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| InvalidHeading {
                input: s.to_string(),
            })
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
