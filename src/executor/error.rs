//! HTTP invocation error types.
//!
//! This module defines the errors that can occur while building, sending or
//! checking the single HTTP request of an invocation.

use thiserror::Error;

/// Errors that can occur during HTTP request execution.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Network error occurred during request execution.
    ///
    /// This includes connection failures, DNS resolution errors,
    /// and failures while reading the response body.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The URL uses a scheme other than HTTP or HTTPS.
    #[error("unsupported protocol: {0}")]
    UnsupportedProtocol(String),

    /// The template's method is not a valid HTTP method token.
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// A header name or value cannot be sent over HTTP.
    #[error("invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },

    /// The HTTP client or request could not be constructed.
    #[error("request build error: {0}")]
    BuildError(String),

    /// The API answered with a status other than 200.
    ///
    /// The raw response body is kept verbatim for diagnosis.
    #[error("API request failed with status {status}: {body}")]
    ApiError { status: u16, body: String },
}

/// Convert reqwest errors to RequestError.
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            RequestError::BuildError(err.to_string())
        } else {
            RequestError::NetworkError(err.to_string())
        }
    }
}

/// Convert URL parsing errors to RequestError.
impl From<url::ParseError> for RequestError {
    fn from(err: url::ParseError) -> Self {
        RequestError::InvalidUrl(err.to_string())
    }
}
