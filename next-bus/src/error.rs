//! Errors from a full next-departure lookup.

use std::fmt;

use crate::domain::DepartureTimeError;
use crate::nextrip::ApiError;
use crate::resolve::ResolveError;

/// Any failure that ends a lookup. None of these are retried.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// A route, direction or stop could not be pinned down
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Fetching departures failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The earliest departure carried an unreadable timestamp
    #[error(transparent)]
    DepartureTime(#[from] DepartureTimeError),

    /// The stop has no further departures today
    #[error("no more departures: the last bus for the day has already left")]
    NoMoreDepartures,
}

/// Coarse classification of a [`LookupError`], for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    MalformedResponse,
    NotFound,
    AmbiguousMatch,
    NoMoreDepartures,
}

impl LookupError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::Resolve(ResolveError::NotFound { .. }) => ErrorKind::NotFound,
            LookupError::Resolve(ResolveError::Ambiguous { .. }) => ErrorKind::AmbiguousMatch,
            LookupError::Resolve(ResolveError::Api(e)) | LookupError::Api(e) => api_kind(e),
            LookupError::DepartureTime(_) => ErrorKind::MalformedResponse,
            LookupError::NoMoreDepartures => ErrorKind::NoMoreDepartures,
        }
    }
}

fn api_kind(err: &ApiError) -> ErrorKind {
    if err.is_network() {
        ErrorKind::Network
    } else {
        ErrorKind::MalformedResponse
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Network => "network",
            ErrorKind::MalformedResponse => "malformed response",
            ErrorKind::NotFound => "not found",
            ErrorKind::AmbiguousMatch => "ambiguous match",
            ErrorKind::NoMoreDepartures => "no more departures",
        })
    }
}
