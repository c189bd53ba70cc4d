//! Response extraction against real HTTP exchanges
//!
//! Covers auto-detection of provider response shapes and the fallback to
//! the template's response path.

use super::{invoker, template};
use llm_caller::engine::execute;
use llm_caller::error::CallerError;
use llm_caller::extractor::ExtractError;
use llm_caller::variables::Bindings;
use serde_json::{json, Value};

fn call_with_response(response_body: &str, response_config: Value) -> Result<String, CallerError> {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/api")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(response_body)
        .create();

    let template = template(
        &format!("{}/api", server.url()),
        json!({}),
        json!({"q": "x"}),
        response_config,
    );
    execute(&template, &Bindings::new(), &invoker())
}

#[test]
fn test_default_path_chat_completion() {
    let body = r#"{"id":"1","choices":[{"index":0,"message":{"role":"assistant","content":"hi"}}]}"#;
    assert_eq!(call_with_response(body, json!({})).unwrap(), "hi");
}

#[test]
fn test_auto_detect_ollama_response() {
    let body = r#"{"model":"llama3","response":"local answer","done":true}"#;
    let result = call_with_response(body, json!({"auto_detect": true})).unwrap();
    assert_eq!(result, "local answer");
}

#[test]
fn test_auto_detect_anthropic_content_blocks() {
    let body = r#"{"content":[{"type":"text","text":"block answer"}],"stop_reason":"end_turn"}"#;
    let result = call_with_response(body, json!({"auto_detect": true})).unwrap();
    assert_eq!(result, "block answer");
}

#[test]
fn test_auto_detect_falls_back_to_path() {
    let body = r#"{"data":{"output":[{"text":"nested"}]}}"#;
    let result =
        call_with_response(body, json!({"auto_detect": true, "path": "data.output[0].text"}))
            .unwrap();
    assert_eq!(result, "nested");
}

#[test]
fn test_auto_detect_fallback_error_names_path() {
    let body = r#"{"data":{}}"#;
    let err = call_with_response(body, json!({"auto_detect": true, "path": "data.output"}))
        .unwrap_err();
    match err {
        CallerError::Extract(ExtractError::FieldNotFound {
            field,
            path,
            response,
        }) => {
            assert_eq!(field, "output");
            assert_eq!(path, "data.output");
            assert!(response.contains("\"data\""));
        }
        other => panic!("Expected FieldNotFound, got {:?}", other),
    }
}

#[test]
fn test_response_field_name_hint() {
    let body = r#"{"response":"generic","answer":"preferred"}"#;
    let result = call_with_response(
        body,
        json!({"auto_detect": true, "response_field_name": "answer"}),
    )
    .unwrap();
    assert_eq!(result, "preferred");
}

#[test]
fn test_index_out_of_bounds_reported() {
    let body = r#"{"choices":[{"text":"only"}]}"#;
    let err = call_with_response(body, json!({"path": "choices[5].text"})).unwrap_err();
    assert!(matches!(
        err,
        CallerError::Extract(ExtractError::IndexOutOfBounds {
            index: 5,
            length: 1,
            ..
        })
    ));
}

#[test]
fn test_non_json_response_is_parse_error() {
    let err = call_with_response("<html>oops</html>", json!({"auto_detect": true})).unwrap_err();
    assert!(matches!(
        err,
        CallerError::Extract(ExtractError::ResponseParseError(_))
    ));
}

#[test]
fn test_non_string_result_rendered() {
    let body = r#"{"usage":{"total_tokens":42},"items":[1,2]}"#;
    assert_eq!(
        call_with_response(body, json!({"path": "usage.total_tokens"})).unwrap(),
        "42"
    );
    assert_eq!(
        call_with_response(body, json!({"path": "items"})).unwrap(),
        "[1,2]"
    );
}
