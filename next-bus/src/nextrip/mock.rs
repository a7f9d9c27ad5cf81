//! Mock NexTrip client for testing without network access.
//!
//! Serves canned records either registered through the builder methods or
//! loaded from a fixture directory laid out like the API paths:
//!
//! ```text
//! Routes.json
//! Directions/{route}.json
//! Stops/{route}/{direction}.json
//! Departures/{route}/{direction}/{stop}.json
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::de::DeserializeOwned;

use crate::domain::{DirectionId, RouteId, StopId};

use super::api::TransitApi;
use super::client::decode_records;
use super::error::ApiError;
use super::types::{DepartureRecord, DirectionRecord, RouteRecord, StopRecord};

type StopKey = (RouteId, DirectionId);
type DepartureKey = (RouteId, DirectionId, StopId);

/// Mock NexTrip client that serves records from memory.
///
/// Anything not registered answers like the live API does for an unknown
/// path: a 404 status error.
#[derive(Debug, Default)]
pub struct MockNexTripClient {
    routes: Option<Vec<RouteRecord>>,
    directions: HashMap<RouteId, Vec<DirectionRecord>>,
    stops: HashMap<StopKey, Vec<StopRecord>>,
    departures: HashMap<DepartureKey, Vec<DepartureRecord>>,
    requests: AtomicUsize,
}

impl MockNexTripClient {
    /// Create an empty mock; every request fails with 404.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `routes` from `GET /Routes`.
    pub fn with_routes(mut self, routes: Vec<RouteRecord>) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Serve `directions` for `route`.
    pub fn with_directions(mut self, route: RouteId, directions: Vec<DirectionRecord>) -> Self {
        self.directions.insert(route, directions);
        self
    }

    /// Serve `stops` for `route` and `direction`.
    pub fn with_stops(
        mut self,
        route: RouteId,
        direction: DirectionId,
        stops: Vec<StopRecord>,
    ) -> Self {
        self.stops.insert((route, direction), stops);
        self
    }

    /// Serve `departures` for the stop.
    pub fn with_departures(
        mut self,
        route: RouteId,
        direction: DirectionId,
        stop: StopId,
        departures: Vec<DepartureRecord>,
    ) -> Self {
        self.departures.insert((route, direction, stop), departures);
        self
    }

    /// Load a mock from a fixture directory.
    ///
    /// Identifiers are taken from directory and file names, so
    /// `Stops/901/1.json` holds the stops for route `901`, direction `1`.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, ApiError> {
        let data_dir = data_dir.as_ref();
        let mut mock = Self::new();

        let routes_path = data_dir.join("Routes.json");
        if routes_path.is_file() {
            mock.routes = Some(load_records(&routes_path)?);
        }

        for (route, path) in json_files(&data_dir.join("Directions"))? {
            mock.directions
                .insert(parse_id(RouteId::parse, &route)?, load_records(&path)?);
        }

        for (route, route_dir) in subdirs(&data_dir.join("Stops"))? {
            let route = parse_id(RouteId::parse, &route)?;
            for (direction, path) in json_files(&route_dir)? {
                let direction = parse_id(DirectionId::parse, &direction)?;
                mock.stops
                    .insert((route.clone(), direction), load_records(&path)?);
            }
        }

        for (route, route_dir) in subdirs(&data_dir.join("Departures"))? {
            let route = parse_id(RouteId::parse, &route)?;
            for (direction, direction_dir) in subdirs(&route_dir)? {
                let direction = parse_id(DirectionId::parse, &direction)?;
                for (stop, path) in json_files(&direction_dir)? {
                    let stop = parse_id(StopId::parse, &stop)?;
                    mock.departures.insert(
                        (route.clone(), direction.clone(), stop),
                        load_records(&path)?,
                    );
                }
            }
        }

        if mock.is_empty() {
            return Err(fixture_error(format!(
                "No fixture files found in {:?}",
                data_dir
            )));
        }

        Ok(mock)
    }

    /// Number of requests served or refused so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    fn is_empty(&self) -> bool {
        self.routes.is_none()
            && self.directions.is_empty()
            && self.stops.is_empty()
            && self.departures.is_empty()
    }

    fn serve<T: Clone>(&self, records: Option<&Vec<T>>, path: String) -> Result<Vec<T>, ApiError> {
        self.requests.fetch_add(1, Ordering::Relaxed);
        records.cloned().ok_or_else(|| ApiError::Status {
            status: 404,
            message: format!("No mock data for /{path}"),
        })
    }
}

impl TransitApi for MockNexTripClient {
    async fn routes(&self) -> Result<Vec<RouteRecord>, ApiError> {
        self.serve(self.routes.as_ref(), "Routes".to_string())
    }

    async fn directions(&self, route: &RouteId) -> Result<Vec<DirectionRecord>, ApiError> {
        self.serve(self.directions.get(route), format!("Directions/{route}"))
    }

    async fn stops(
        &self,
        route: &RouteId,
        direction: &DirectionId,
    ) -> Result<Vec<StopRecord>, ApiError> {
        let key = (route.clone(), direction.clone());
        self.serve(self.stops.get(&key), format!("Stops/{route}/{direction}"))
    }

    async fn departures(
        &self,
        route: &RouteId,
        direction: &DirectionId,
        stop: &StopId,
    ) -> Result<Vec<DepartureRecord>, ApiError> {
        let key = (route.clone(), direction.clone(), stop.clone());
        self.serve(
            self.departures.get(&key),
            format!("{route}/{direction}/{stop}"),
        )
    }
}

fn fixture_error(message: String) -> ApiError {
    ApiError::Status { status: 0, message }
}

fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ApiError> {
    let json = fs::read_to_string(path)
        .map_err(|e| fixture_error(format!("Failed to read {:?}: {}", path, e)))?;
    decode_records(&json)
}

fn parse_id<T, E: std::fmt::Display>(
    parse: impl Fn(&str) -> Result<T, E>,
    name: &str,
) -> Result<T, ApiError> {
    parse(name).map_err(|e| fixture_error(format!("Invalid fixture name {name:?}: {e}")))
}

/// `(stem, path)` for each `.json` file directly inside `dir`.
fn json_files(dir: &Path) -> Result<Vec<(String, std::path::PathBuf)>, ApiError> {
    entries(dir, |path| {
        path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
    })
}

/// `(name, path)` for each directory directly inside `dir`.
fn subdirs(dir: &Path) -> Result<Vec<(String, std::path::PathBuf)>, ApiError> {
    entries(dir, Path::is_dir)
}

fn entries(
    dir: &Path,
    keep: impl Fn(&Path) -> bool,
) -> Result<Vec<(String, std::path::PathBuf)>, ApiError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let read = fs::read_dir(dir)
        .map_err(|e| fixture_error(format!("Failed to read fixture directory: {}", e)))?;

    let mut found = Vec::new();
    for entry in read {
        let entry = entry
            .map_err(|e| fixture_error(format!("Failed to read directory entry: {}", e)))?;
        let path = entry.path();
        if !keep(&path) {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| fixture_error(format!("Invalid filename: {:?}", path)))?
            .to_string();
        found.push((stem, path));
    }

    Ok(found)
}
