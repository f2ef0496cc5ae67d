//! Error types for the admin API client.

/// Errors from talking to the remote admin API.
///
/// The split between variants is what drives the retry wrapper: transient
/// failures are worth waiting out, everything else means the request
/// itself is wrong and repeating it would only repeat the failure.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The API key contains bytes that cannot go into an HTTP header.
    #[error("API key is not a valid header value")]
    InvalidApiKey,

    /// The request never produced a response: connect failure, timeout,
    /// reset mid-body.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status code.
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },

    /// The response body was not the JSON we expect.
    #[error("could not decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The response decoded but its content is unusable.
    #[error("unexpected payload from {endpoint}: {reason}")]
    Payload {
        endpoint: &'static str,
        reason: &'static str,
    },
}

impl ApiError {
    /// Whether retrying the same call can reasonably succeed.
    ///
    /// Server-side trouble (5xx) and transport trouble qualify. A 4xx or
    /// an undecodable payload will not get better by asking again, and
    /// neither will a bad API key.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Transport { source, .. } => !source.is_builder(),
            ApiError::Status { status, .. } => status.is_server_error(),
            ApiError::InvalidApiKey
            | ApiError::Decode { .. }
            | ApiError::Payload { .. } => false,
        }
    }
}
