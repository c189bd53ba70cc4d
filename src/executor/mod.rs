//! HTTP request executor.
//!
//! Sends the single request of an invocation with a blocking `reqwest`
//! client. The request is built entirely from the substituted template: the
//! method, URL and headers are taken as given (no implicit `Content-Type`),
//! the body is the template's JSON serialized to bytes, and `User-Agent` is
//! always replaced with [`USER_AGENT`].
//!
//! There are no retries and no streaming; the whole response body is buffered.

pub mod error;

pub use error::RequestError;

use crate::models::{ApiResponse, Template};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use std::time::Duration;

/// Fixed `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("llm-caller/", env!("CARGO_PKG_VERSION"));

/// Executes templates as HTTP requests.
#[derive(Debug, Clone)]
pub struct HttpInvoker {
    client: Client,
}

impl HttpInvoker {
    /// Creates an invoker with a blocking client and no request timeout.
    pub fn new() -> Result<Self, RequestError> {
        // No request timeout: the call blocks until the full response arrives.
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| RequestError::BuildError(e.to_string()))?;
        Ok(Self { client })
    }

    /// Creates an invoker around an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Sends the request described by `template`.
    ///
    /// # Arguments
    ///
    /// * `template` - A validated template whose placeholders are already substituted
    ///
    /// # Returns
    ///
    /// The status and raw body when the API answers 200, otherwise
    /// `RequestError::ApiError` carrying the status and raw body.
    pub fn invoke(&self, template: &Template) -> Result<ApiResponse, RequestError> {
        let request = &template.request;

        let url = validate_url(&request.url)?;
        let method = parse_method(&request.method)?;
        let headers = build_headers(template)?;
        let body = serde_json::to_vec(template.body())
            .map_err(|e| RequestError::BuildError(format!("failed to serialize body: {}", e)))?;

        debug!(
            "sending {} request to {}",
            method,
            url.host_str().unwrap_or("<no host>")
        );

        let response = self
            .client
            .request(method, url)
            .headers(headers)
            .body(body)
            .send()?;

        let status_code = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| RequestError::NetworkError(format!("failed to read response body: {}", e)))?
            .to_vec();

        debug!("received status {} ({} bytes)", status_code, body.len());

        let response = ApiResponse::new(status_code, body);
        if !response.is_ok() {
            return Err(RequestError::ApiError {
                status: response.status_code,
                body: response.body_text(),
            });
        }

        Ok(response)
    }
}

/// Validates that a URL is well-formed and uses HTTP or HTTPS.
fn validate_url(url: &str) -> Result<url::Url, RequestError> {
    let parsed = url::Url::parse(url)?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(RequestError::UnsupportedProtocol(format!(
            "Only HTTP and HTTPS are supported, got: {}",
            scheme
        )));
    }

    Ok(parsed)
}

/// Parses a method name. Standard methods are matched case-insensitively.
fn parse_method(method: &str) -> Result<Method, RequestError> {
    let upper = method.trim().to_ascii_uppercase();
    Method::from_bytes(upper.as_bytes()).map_err(|_| RequestError::InvalidMethod(method.to_string()))
}

fn build_headers(template: &Template) -> Result<HeaderMap, RequestError> {
    let mut headers = HeaderMap::new();

    for (name, value) in &template.request.headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| RequestError::InvalidHeader {
                name: name.clone(),
                message: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| RequestError::InvalidHeader {
            name: name.clone(),
            message: e.to_string(),
        })?;
        headers.insert(header_name, header_value);
    }

    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    Ok(headers)
}
