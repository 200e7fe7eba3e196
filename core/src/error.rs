//! Error types for the tag protection client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." Every error produced after a response arrived carries that
//! response's metadata; errors raised while building a request never do,
//! since no request was sent.

use crate::http::Response;

/// Errors returned by `ApiClient` and the resource services.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound { response: Response },

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {}: {body}", .response.status)]
    HttpError { response: Response, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {source}")]
    Deserialization {
        response: Response,
        #[source]
        source: serde_json::Error,
    },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The request URL could not be formed from the configured base URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ApiError {
    /// Transport metadata of the response that caused this error, if one was
    /// received.
    pub fn response(&self) -> Option<&Response> {
        match self {
            ApiError::NotFound { response }
            | ApiError::HttpError { response, .. }
            | ApiError::Deserialization { response, .. } => Some(response),
            ApiError::Serialization(_)
            | ApiError::InvalidUrl(_)
            | ApiError::Transport(_)
            | ApiError::Configuration(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}
