//! NexTrip departure timestamps.
//!
//! NexTrip serialises times in the old ASP.NET JSON date form:
//! `"/Date(1600000000000-0500)/"`, i.e. milliseconds since the Unix epoch
//! followed by the UTC offset of the agency's local time. The offset does
//! not shift the instant; it only says which wall clock the server used.

use std::fmt;

use chrono::{DateTime, FixedOffset};

/// Error returned when a departure timestamp is not in `Date(<ms><±hhmm>)` form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid departure time {input:?}: {reason}")]
pub struct DepartureTimeError {
    input: String,
    reason: &'static str,
}

impl DepartureTimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// A parsed departure instant together with the offset it was reported in.
///
/// # Examples
///
/// ```
/// use next_bus::domain::DepartureTime;
///
/// let t = DepartureTime::parse("/Date(1600000000000-0500)/").unwrap();
/// assert_eq!(t.epoch_millis(), 1_600_000_000_000);
/// assert_eq!(t.offset_secs(), -5 * 3600);
/// assert_eq!(t.to_string(), "2020-09-13 07:26:40 -05:00");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepartureTime(DateTime<FixedOffset>);

impl DepartureTime {
    /// Parse the `Date(...)` wrapper, wherever it appears in the string.
    pub fn parse(s: &str) -> Result<Self, DepartureTimeError> {
        const OPEN: &str = "Date(";

        let start = s
            .find(OPEN)
            .ok_or_else(|| DepartureTimeError::new(s, "missing Date( wrapper"))?
            + OPEN.len();
        let len = s[start..]
            .find(')')
            .ok_or_else(|| DepartureTimeError::new(s, "missing closing parenthesis"))?;
        let inner = &s[start..start + len];

        // The millisecond count may itself be negative, so the offset sign is
        // the last '+' or '-' that isn't the first character.
        let split = inner
            .char_indices()
            .skip(1)
            .filter(|&(_, c)| c == '+' || c == '-')
            .map(|(i, _)| i)
            .last()
            .ok_or_else(|| DepartureTimeError::new(s, "missing UTC offset"))?;
        let (millis, offset) = inner.split_at(split);

        let millis = parse_millis(millis).ok_or_else(|| {
            DepartureTimeError::new(s, "milliseconds must be a signed integer")
        })?;
        let offset = parse_offset(offset)
            .ok_or_else(|| DepartureTimeError::new(s, "offset must be +hhmm or -hhmm"))?;

        let utc = DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| DepartureTimeError::new(s, "timestamp out of range"))?;

        Ok(Self(utc.with_timezone(&offset)))
    }

    /// Returns the instant in the offset the server reported.
    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// Returns milliseconds since the Unix epoch.
    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns the reported UTC offset in seconds (east positive).
    pub fn offset_secs(&self) -> i32 {
        self.0.offset().local_minus_utc()
    }
}

impl From<DepartureTime> for DateTime<FixedOffset> {
    fn from(t: DepartureTime) -> Self {
        t.0
    }
}

impl fmt::Debug for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DepartureTime({})", self.0.to_rfc3339())
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S %:z"))
    }
}

/// Parse an optionally negative run of ASCII digits.
fn parse_millis(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parse `+hhmm` / `-hhmm` into a fixed offset.
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || !bytes[1..].iter().all(u8::is_ascii_digit) {
        return None;
    }

    let digit = |i: usize| i32::from(bytes[i] - b'0');
    let hours = digit(1) * 10 + digit(2);
    let minutes = digit(3) * 10 + digit(4);
    if minutes > 59 {
        return None;
    }

    let secs = hours * 3600 + minutes * 60;
    match bytes[0] {
        b'+' => FixedOffset::east_opt(secs),
        b'-' => FixedOffset::west_opt(secs),
        _ => None,
    }
}
