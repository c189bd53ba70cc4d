//! HTTP response data model.

/// Raw result of one HTTP exchange.
///
/// The body is kept as bytes; it is only interpreted by the response extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code (e.g. 200, 401, 500).
    pub status_code: u16,

    /// Complete response body.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Creates a new ApiResponse.
    pub fn new(status_code: u16, body: Vec<u8>) -> Self {
        Self { status_code, body }
    }

    /// Returns `true` for the only status treated as success (200 OK).
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
