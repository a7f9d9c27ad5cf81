//! NexTrip client error types.

/// Errors from the NexTrip HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed (connection refused, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status code
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Body was not JSON, or not the record shape the endpoint promises
    #[error("malformed response: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },
}

impl ApiError {
    /// Whether this error came from the transport rather than the payload.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Http(_) | ApiError::Status { .. })
    }
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(" (body: {body})"),
        None => String::new(),
    }
}
