//! Tests for the complete `call` flow
//!
//! Template lookup, variable resolution (including stdin), API key
//! resolution and output, driven through `commands::run_call` with the
//! process-facing pieces injected.

use super::{chat_response, invoker};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use llm_caller::cli::CallArgs;
use llm_caller::commands::run_call;
use llm_caller::config::{load_config, CallerConfig};
use llm_caller::credentials::EnvSnapshot;
use llm_caller::error::CallerError;
use llm_caller::output::OutputSink;
use llm_caller::template::TemplateError;
use llm_caller::variables::{VariableError, VariableResolver};
use mockito::Matcher;
use serde_json::json;
use serial_test::serial;
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

/// Writes `templates/<name>.json` under a fresh app dir.
fn app_with_template(name: &str, template: &serde_json::Value) -> (TempDir, CallerConfig) {
    let app = TempDir::new().unwrap();
    let config = CallerConfig::with_app_dir(app.path());
    fs::create_dir_all(config.default_template_dir()).unwrap();
    fs::write(
        config.default_template_dir().join(format!("{}.json", name)),
        template.to_string(),
    )
    .unwrap();
    (app, config)
}

fn chat_template(url: &str) -> serde_json::Value {
    json!({
        "provider": "deepseek",
        "title": "Chat",
        "request": {
            "url": url,
            "headers": {"Authorization": "Bearer {{api_key}}", "Content-Type": "application/json"},
            "body": {
                "model": "deepseek-chat",
                "messages": [{"role": "user", "content": "{{prompt}}"}]
            }
        }
    })
}

fn stdin(content: &str) -> VariableResolver<Cursor<Vec<u8>>> {
    VariableResolver::new(Cursor::new(content.as_bytes().to_vec()))
}

fn call_args(template: &str, vars: &[&str]) -> CallArgs {
    CallArgs {
        template: Some(template.to_string()),
        vars: vars.iter().map(|v| v.to_string()).collect(),
        ..CallArgs::default()
    }
}

#[test]
fn test_named_template_with_stdin_and_env_key() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer env-key")
        .match_body(Matcher::Json(json!({
            "model": "deepseek-chat",
            "messages": [{"role": "user", "content": "fn main() {}\n"}]
        })))
        .with_status(200)
        .with_body(chat_response("Looks fine."))
        .create();

    let (_app, config) = app_with_template(
        "deepseek-chat",
        &chat_template(&format!("{}/chat/completions", server.url())),
    );
    let env = EnvSnapshot::from_pairs([("DEEPSEEK_API_KEY", "env-key")]);

    let result = run_call(
        &call_args("deepseek-chat", &["prompt:file:-"]),
        &config,
        &mut stdin("fn main() {}\n"),
        &env,
        &invoker(),
    )
    .unwrap();

    assert_eq!(result, "Looks fine.");
    mock.assert();
}

#[test]
fn test_secrets_file_key_and_override() {
    let mut server = mockito::Server::new();
    let url = format!("{}/chat/completions", server.url());
    let (_app, config) = app_with_template("chat", &chat_template(&url));
    fs::write(
        config.secret_file().unwrap(),
        r#"{"deepseek_api_key":"file-key","api_key":"generic"}"#,
    )
    .unwrap();

    let from_file = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer file-key")
        .with_status(200)
        .with_body(chat_response("a"))
        .create();

    let env = EnvSnapshot::from_pairs([("DEEPSEEK_API_KEY", "env-key")]);
    run_call(
        &call_args("chat", &["prompt:hi"]),
        &config,
        &mut stdin(""),
        &env,
        &invoker(),
    )
    .unwrap();
    from_file.assert();

    let from_flag = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer cli-key")
        .with_status(200)
        .with_body(chat_response("b"))
        .create();

    let args = CallArgs {
        api_key: Some("cli-key".to_string()),
        ..call_args("chat", &["prompt:hi"])
    };
    run_call(&args, &config, &mut stdin(""), &env, &invoker()).unwrap();
    from_flag.assert();
}

#[test]
fn test_declared_api_key_used_when_none_resolved() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/chat")
        .match_header("authorization", "Bearer declared")
        .with_status(200)
        .with_body(chat_response("ok"))
        .create();

    let (_app, config) = app_with_template("chat", &chat_template(&format!("{}/chat", server.url())));

    run_call(
        &call_args("chat", &["prompt:hi", "api_key:declared"]),
        &config,
        &mut stdin(""),
        &EnvSnapshot::default(),
        &invoker(),
    )
    .unwrap();
    mock.assert();
}

#[test]
fn test_last_duplicate_var_wins() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/chat")
        .match_body(Matcher::PartialJson(json!({
            "messages": [{"role": "user", "content": "second"}]
        })))
        .with_status(200)
        .with_body(chat_response("ok"))
        .create();

    let (_app, config) = app_with_template("chat", &chat_template(&format!("{}/chat", server.url())));

    run_call(
        &call_args("chat", &["prompt:first", "prompt:second"]),
        &config,
        &mut stdin(""),
        &EnvSnapshot::default(),
        &invoker(),
    )
    .unwrap();
    mock.assert();
}

#[test]
fn test_base64_template_source() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/y")
        .match_body(Matcher::Json(json!({"m": "hello"})))
        .with_status(200)
        .with_body(r#"{"completion":"from base64"}"#)
        .create();

    let raw = json!({
        "provider": "p",
        "request": {"url": format!("{}/y", server.url()), "body": {"m": "{{v}}"}},
        "response": {"auto_detect": true}
    })
    .to_string();
    let args = CallArgs {
        template_base64: Some(STANDARD.encode(raw)),
        vars: vec!["v:hello".to_string()],
        ..CallArgs::default()
    };

    let result = run_call(
        &args,
        &CallerConfig::default(),
        &mut stdin(""),
        &EnvSnapshot::default(),
        &invoker(),
    )
    .unwrap();
    assert_eq!(result, "from base64");
    mock.assert();
}

#[test]
fn test_missing_template_lists_tried_paths() {
    let app = TempDir::new().unwrap();
    let config = CallerConfig::with_app_dir(app.path());

    let err = run_call(
        &call_args("nope", &[]),
        &config,
        &mut stdin(""),
        &EnvSnapshot::default(),
        &invoker(),
    )
    .unwrap_err();

    match err {
        CallerError::Template(TemplateError::NotFound { tried }) => {
            assert_eq!(tried, vec![config.default_template_dir().join("nope.json")]);
        }
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_bad_variable_aborts_before_request() {
    let err = run_call(
        &call_args("any", &["good:1", "bad"]),
        &CallerConfig::default(),
        &mut stdin(""),
        &EnvSnapshot::default(),
        &invoker(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CallerError::Variable(VariableError::MalformedVariableSpec(_))
    ));
}

#[test]
fn test_invalid_inline_template() {
    let args = CallArgs {
        template_json: Some(r#"{"provider":"p","request":{"url":"https://x/y"}}"#.to_string()),
        ..CallArgs::default()
    };
    let err = run_call(
        &args,
        &CallerConfig::default(),
        &mut stdin(""),
        &EnvSnapshot::default(),
        &invoker(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("request.body is required"));
}

#[test]
fn test_output_file_sink() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("result.md");

    OutputSink::File(path.clone()).write("# Result\n").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "# Result\n");
}

#[test]
#[serial]
fn test_load_config_from_home() {
    let home = TempDir::new().unwrap();
    let app_dir = home.path().join(".llm-caller");
    fs::create_dir_all(&app_dir).unwrap();
    fs::write(
        app_dir.join("config.json"),
        r#"{"template_dir": "~/my-templates"}"#,
    )
    .unwrap();

    let previous = std::env::var_os("HOME");
    std::env::set_var("HOME", home.path());
    let config = load_config(None);
    match previous {
        Some(value) => std::env::set_var("HOME", value),
        None => std::env::remove_var("HOME"),
    }

    let config = config.unwrap();
    assert_eq!(config.template_dir, Some(home.path().join("my-templates")));
    assert_eq!(config.secret_file(), Some(app_dir.join("keys.json").as_path()));
    assert_eq!(config.default_template_dir(), app_dir.join("templates"));
}
