//! Identifier resolution.
//!
//! Turns the user's free-text route, direction and stop descriptions into
//! the identifiers NexTrip needs. Matching is case-insensitive substring
//! containment throughout. Routes and stops must match exactly one record;
//! directions take the first record that matches.

use std::fmt;

use tracing::info;

use crate::domain::{DirectionId, RouteId, StopId};
use crate::nextrip::{ApiError, TransitApi};

/// Most candidate names quoted in an ambiguity error.
const MAX_CANDIDATES_SHOWN: usize = 5;

/// Which identifier a resolution step was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Route,
    Direction,
    Stop,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Route => "route",
            EntityKind::Direction => "direction",
            EntityKind::Stop => "stop",
        })
    }
}

/// Error from a resolution step.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// No record matched the query
    #[error("no {kind} matching {query:?}")]
    NotFound { kind: EntityKind, query: String },

    /// More than one record matched where exactly one was required
    #[error(
        "{kind} {query:?} is ambiguous: {total} matches ({})",
        candidate_list(.candidates, .total)
    )]
    Ambiguous {
        kind: EntityKind,
        query: String,
        /// The first few matching display texts.
        candidates: Vec<String>,
        /// How many records matched in total.
        total: usize,
    },

    /// Fetching the candidate records failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

fn candidate_list(candidates: &[String], total: &usize) -> String {
    let mut list = candidates.join(", ");
    if *total > candidates.len() {
        list.push_str(", ...");
    }
    list
}

/// Case-insensitive substring predicate shared by every resolution step.
fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}

/// Return the single record whose text contains `query`.
///
/// Zero matches is [`ResolveError::NotFound`]; more than one is
/// [`ResolveError::Ambiguous`]. Neither case falls back to picking a record.
pub fn find_unique<'a, T>(
    kind: EntityKind,
    records: &'a [T],
    query: &str,
    text: impl Fn(&T) -> &str,
) -> Result<&'a T, ResolveError> {
    let needle = query.to_lowercase();
    let matches: Vec<&T> = records
        .iter()
        .filter(|r| contains_folded(text(*r), &needle))
        .collect();

    match matches.as_slice() {
        [] => Err(ResolveError::NotFound {
            kind,
            query: query.to_string(),
        }),
        [only] => Ok(*only),
        many => Err(ResolveError::Ambiguous {
            kind,
            query: query.to_string(),
            candidates: many
                .iter()
                .take(MAX_CANDIDATES_SHOWN)
                .map(|r| text(*r).to_string())
                .collect(),
            total: many.len(),
        }),
    }
}

/// Return the first record, in the order given, whose text contains `query`.
pub fn find_first<'a, T>(
    kind: EntityKind,
    records: &'a [T],
    query: &str,
    text: impl Fn(&T) -> &str,
) -> Result<&'a T, ResolveError> {
    let needle = query.to_lowercase();
    records
        .iter()
        .find(|r| contains_folded(text(*r), &needle))
        .ok_or_else(|| ResolveError::NotFound {
            kind,
            query: query.to_string(),
        })
}

/// Resolve a route by a substring of its description.
pub async fn resolve_route<A: TransitApi>(
    api: &A,
    description: &str,
) -> Result<RouteId, ResolveError> {
    let routes = api.routes().await?;
    let route = find_unique(EntityKind::Route, &routes, description, |r| r.description.as_str())?;

    info!(route = %route.route, description = %route.description, "resolved route");
    Ok(route.route.clone())
}

/// Resolve a direction of `route` by a substring of its text.
///
/// Unlike routes and stops this takes the first match: direction text is
/// coarse ("north" in "NORTHBOUND") and a route's directions don't overlap.
pub async fn resolve_direction<A: TransitApi>(
    api: &A,
    direction: &str,
    route: &RouteId,
) -> Result<DirectionId, ResolveError> {
    let directions = api.directions(route).await?;
    let found = find_first(EntityKind::Direction, &directions, direction, |d| d.text.as_str())?;

    info!(direction = %found.value, text = %found.text, "resolved direction");
    Ok(found.value.clone())
}

/// Resolve a stop on `route` travelling `direction` by a substring of its text.
pub async fn resolve_stop<A: TransitApi>(
    api: &A,
    stop: &str,
    route: &RouteId,
    direction: &DirectionId,
) -> Result<StopId, ResolveError> {
    let stops = api.stops(route, direction).await?;
    let found = find_unique(EntityKind::Stop, &stops, stop, |s| s.text.as_str())?;

    info!(stop = %found.value, text = %found.text, "resolved stop");
    Ok(found.value.clone())
}
