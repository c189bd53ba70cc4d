//! llm-caller: call LLM APIs from declarative templates
//!
//! A template is a JSON document describing one HTTP API invocation: the
//! URL, method, headers and JSON body, any of which may contain `{{name}}`
//! placeholders, plus where the generated text lives in the response.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - **models**: Template and response data structures
//! - **template**: Parses and validates templates, and locates them on disk or inline
//! - **variables**: Resolves `--var` values (text, files, stdin) and substitutes placeholders
//! - **executor**: Sends the request with a blocking reqwest client
//! - **extractor**: Pulls the result out of the response by path or by shape detection
//! - **credentials**: API key lookup (flag, secrets file, environment, `.env`)
//! - **config**: Loads `~/.llm-caller/config.json`
//! - **engine**: Runs one invocation end to end
//! - **cli** / **commands**: The `llm-caller` command line
//!
//! # Flow
//!
//! 1. Load and validate the template
//! 2. Resolve variables and the API key into bindings
//! 3. Substitute the bindings into the URL, header values and body
//! 4. Send the request; anything but `200 OK` is an error
//! 5. Extract the result text from the response body
//!
//! # Example
//!
//! ```no_run
//! use llm_caller::engine::execute;
//! use llm_caller::executor::HttpInvoker;
//! use llm_caller::template::parse_template;
//! use llm_caller::variables::Bindings;
//!
//! let template = parse_template(r#"{
//!     "provider": "ollama",
//!     "request": {
//!         "url": "http://localhost:11434/api/generate",
//!         "body": {"model": "llama3", "prompt": "{{prompt}}", "stream": false}
//!     },
//!     "response": {"path": "response"}
//! }"#)?;
//!
//! let mut bindings = Bindings::new();
//! bindings.insert("prompt".to_string(), "Say hello".to_string());
//!
//! let invoker = HttpInvoker::new()?;
//! println!("{}", execute(&template, &bindings, &invoker)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod engine;
pub mod error;
pub mod executor;
pub mod extractor;
pub mod models;
pub mod output;
pub mod template;
pub mod variables;

pub use error::{CallerError, Result};
