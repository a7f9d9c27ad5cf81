//! A local stand-in for the NexTrip HTTP API.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};

pub const ROUTE_DESCRIPTION: &str = "State Fair - Ltd Stop - Minneapolis - State Fair";

/// Canned JSON bodies keyed by request path, plus a request counter.
#[derive(Default)]
pub struct FakeNexTrip {
    bodies: HashMap<String, String>,
    requests: AtomicUsize,
}

impl FakeNexTrip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `GET /NexTrip/{path}?format=json`.
    pub fn with(mut self, path: &str, body: impl Into<String>) -> Self {
        self.bodies.insert(format!("/NexTrip/{path}"), body.into());
        self
    }

    /// State Fair express eastbound at DeLaSalle, departing at `departure_ms`.
    pub fn state_fair(departure_ms: i64) -> Self {
        Self::new()
            .with(
                "Routes",
                format!(
                    r#"[{{"Description": "METRO Blue Line", "ProviderID": "8", "Route": "901"}},
                        {{"Description": "{ROUTE_DESCRIPTION}", "ProviderID": "9", "Route": "1902"}}]"#
                ),
            )
            .with(
                "Directions/1902",
                r#"[{"Text": "EASTBOUND", "Value": "2"}, {"Text": "WESTBOUND", "Value": "3"}]"#,
            )
            .with(
                "Stops/1902/2",
                r#"[{"Text": "DeLaSalle High School", "Value": "DLSL"},
                    {"Text": "State Fairgrounds Lot 4", "Value": "SFAR"}]"#,
            )
            .with(
                "1902/2/DLSL",
                format!(
                    r#"[{{"Actual": false, "DepartureText": "2 Min",
                         "DepartureTime": "\/Date({departure_ms}-0500)\/",
                         "Description": "State Fair", "Route": "1902", "Terminal": ""}}]"#
                ),
            )
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

async fn serve(State(fake): State<Arc<FakeNexTrip>>, uri: Uri) -> Response {
    fake.requests.fetch_add(1, Ordering::SeqCst);

    if uri.query() != Some("format=json") {
        return (StatusCode::BAD_REQUEST, "format=json required").into_response();
    }

    match fake.bodies.get(uri.path()) {
        Some(body) => ([(header::CONTENT_TYPE, "application/json")], body.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "no such resource").into_response(),
    }
}

/// Start `fake` on an ephemeral port; returns the NexTrip base URL.
pub async fn start(fake: FakeNexTrip) -> (String, Arc<FakeNexTrip>) {
    let fake = Arc::new(fake);
    let app = Router::new().fallback(serve).with_state(Arc::clone(&fake));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/NexTrip"), fake)
}
