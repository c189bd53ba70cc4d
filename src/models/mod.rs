//! Data models for templates and HTTP responses.
//!
//! This module contains the core data structures shared by the template
//! loader, the substitution engine, the HTTP invoker and the extractor.

pub mod response;
pub mod template;

pub use response::ApiResponse;
pub use template::{
    RequestConfig, ResponseConfig, Template, DEFAULT_METHOD, DEFAULT_RESPONSE_PATH,
};
