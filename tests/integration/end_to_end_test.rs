//! End-to-end tests for template execution
//!
//! These tests run validated templates through substitution, the HTTP
//! invoker and extraction against a mockito server.

use super::{chat_response, invoker, template};
use llm_caller::engine::execute;
use llm_caller::error::CallerError;
use llm_caller::executor::{RequestError, USER_AGENT};
use llm_caller::template::parse_template;
use llm_caller::variables::Bindings;
use mockito::Matcher;
use serde_json::json;

fn bindings(pairs: &[(&str, &str)]) -> Bindings {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_substituted_body_is_sent() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/y")
        .match_body(Matcher::Json(json!({"m": "hello"})))
        .with_status(200)
        .with_body(chat_response("done"))
        .create();

    let raw = json!({
        "provider": "p",
        "request": {"url": format!("{}/y", server.url()), "body": {"m": "{{v}}"}}
    })
    .to_string();
    let template = parse_template(&raw).unwrap();

    let result = execute(&template, &bindings(&[("v", "hello")]), &invoker()).unwrap();

    assert_eq!(result, "done");
    mock.assert();
}

#[test]
fn test_user_agent_overwritten_and_no_implicit_content_type() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/chat")
        .match_header("user-agent", USER_AGENT)
        .match_header("content-type", Matcher::Missing)
        .match_header("x-trace", "abc")
        .with_status(200)
        .with_body(chat_response("ok"))
        .create();

    let template = template(
        &format!("{}/chat", server.url()),
        json!({"User-Agent": "spoofed/9.9", "X-Trace": "abc"}),
        json!({}),
        json!({}),
    );

    let result = execute(&template, &Bindings::new(), &invoker()).unwrap();
    assert_eq!(result, "ok");
    mock.assert();
}

#[test]
fn test_placeholders_in_url_and_headers() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/models/m1/generate")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::Json(json!({
            "prompt": "line one\nline \"two\"",
            "max_tokens": 16,
            "keep": "{{unbound}}"
        })))
        .with_status(200)
        .with_body(r#"{"response":"generated"}"#)
        .create();

    let template = template(
        &format!("{}/models/{{{{model}}}}/generate", server.url()),
        json!({"Authorization": "Bearer {{api_key}}", "Content-Type": "application/json"}),
        json!({"prompt": "{{prompt}}", "max_tokens": 16, "keep": "{{unbound}}"}),
        json!({"path": "response"}),
    );

    let b = bindings(&[
        ("model", "m1"),
        ("api_key", "sk-test"),
        ("prompt", "line one\nline \"two\""),
    ]);
    assert_eq!(execute(&template, &b, &invoker()).unwrap(), "generated");
    mock.assert();
}

#[test]
fn test_custom_method() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("PUT", "/resource")
        .with_status(200)
        .with_body(r#"{"content":"updated"}"#)
        .create();

    let raw = json!({
        "provider": "p",
        "request": {"url": format!("{}/resource", server.url()), "method": "put", "body": {}},
        "response": {"path": "content"}
    })
    .to_string();
    let template = parse_template(&raw).unwrap();

    assert_eq!(
        execute(&template, &Bindings::new(), &invoker()).unwrap(),
        "updated"
    );
    mock.assert();
}

#[test]
fn test_non_200_is_api_error_with_raw_body() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/chat")
        .with_status(401)
        .with_body(r#"{"error":{"message":"invalid api key"}}"#)
        .create();

    let template = template(
        &format!("{}/chat", server.url()),
        json!({}),
        json!({"m": 1}),
        json!({}),
    );

    let err = execute(&template, &Bindings::new(), &invoker()).unwrap_err();
    match err {
        CallerError::Request(RequestError::ApiError { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, r#"{"error":{"message":"invalid api key"}}"#);
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
    mock.assert();
}

#[test]
fn test_201_is_not_success() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/chat")
        .with_status(201)
        .with_body(chat_response("created"))
        .create();

    let template = template(
        &format!("{}/chat", server.url()),
        json!({}),
        json!({}),
        json!({}),
    );

    let err = execute(&template, &Bindings::new(), &invoker()).unwrap_err();
    assert!(matches!(
        err,
        CallerError::Request(RequestError::ApiError { status: 201, .. })
    ));
}

#[test]
fn test_connection_failure_is_network_error() {
    // Port 9 (discard) on localhost is not expected to accept HTTP.
    let template = template("http://127.0.0.1:9/none", json!({}), json!({}), json!({}));

    let err = execute(&template, &Bindings::new(), &invoker()).unwrap_err();
    assert!(matches!(
        err,
        CallerError::Request(RequestError::NetworkError(_))
    ));
}

#[test]
fn test_unsupported_protocol_is_rejected_before_sending() {
    let template = template("ftp://example.com/file", json!({}), json!({}), json!({}));

    let err = execute(&template, &Bindings::new(), &invoker()).unwrap_err();
    assert!(matches!(
        err,
        CallerError::Request(RequestError::UnsupportedProtocol(_))
    ));
}
