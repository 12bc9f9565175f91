use reqwest::StatusCode;

/// Failures of the weather service call. The presenter degrades all of them
/// to "no payload".
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Weather service responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Failed to parse weather JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid weather service URL: {0}")]
    Url(String),
}

/// Failures of the reverse-geocoding call.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Geocoding service responded with status {0}")]
    Status(StatusCode),
    #[error("Failed to parse geocoding JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Geocoding response carried no usable place name")]
    NoName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    Denied,
    #[error("Location service unavailable")]
    Unavailable,
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
