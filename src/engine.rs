//! Template execution.
//!
//! Ties the pieces together for one invocation: substitute the bindings
//! into a validated template, send the request, and extract the result.

use crate::error::CallerError;
use crate::executor::HttpInvoker;
use crate::extractor;
use crate::models::Template;
use crate::variables::{substitute_template, Bindings, API_KEY_VARIABLE};
use log::info;

/// Adds the resolved API key to `bindings`.
///
/// An empty key is not added, so a declared `api_key` variable survives.
/// A non-empty key replaces any declared `api_key`.
pub fn inject_api_key(bindings: &mut Bindings, api_key: &str) {
    if !api_key.is_empty() {
        bindings.insert(API_KEY_VARIABLE.to_string(), api_key.to_string());
    }
}

/// Executes `template` with `bindings` and returns the extracted result.
///
/// # Arguments
///
/// * `template` - A validated template
/// * `bindings` - Resolved variables, including `api_key` when one was found
/// * `invoker` - HTTP client used for the single request
///
/// # Returns
///
/// The extracted result text, or the first request or extraction error.
pub fn execute(
    template: &Template,
    bindings: &Bindings,
    invoker: &HttpInvoker,
) -> Result<String, CallerError> {
    info!(
        "calling provider '{}': {} {}",
        template.provider, template.request.method, template.request.url
    );
    let substituted = substitute_template(template, bindings);

    let response = invoker.invoke(&substituted)?;

    let result = extractor::extract(&response.body, &substituted.response)?;
    Ok(result)
}
