//! CLI argument parsing for llm-caller.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; the implementations live in
//! [`crate::commands`].

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Call LLM and other HTTP JSON APIs from declarative templates.
///
/// A template describes the request (URL, method, headers, JSON body with
/// `{{name}}` placeholders) and where the answer lives in the response.
#[derive(Parser, Debug)]
#[command(name = "llm-caller")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file (default: ~/.llm-caller/config.json).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Call an API using a template.
    ///
    /// Exactly one template source is required: a template name or path,
    /// --template-json, or --template-base64.
    Call(CallArgs),

    /// Inspect local templates.
    #[command(subcommand)]
    Template(TemplateCommand),
}

/// Arguments for the `call` command.
#[derive(Args, Debug, Clone, Default)]
pub struct CallArgs {
    /// Template name (searched in the template directories) or path.
    pub template: Option<String>,

    /// Template as an inline JSON string.
    #[arg(long, value_name = "JSON")]
    pub template_json: Option<String>,

    /// Template as base64-encoded JSON.
    #[arg(long, value_name = "BASE64")]
    pub template_base64: Option<String>,

    /// Template variable: name:value or name:type:value (type is text or file; value - reads stdin).
    #[arg(long = "var", value_name = "SPEC", action = ArgAction::Append)]
    pub vars: Vec<String>,

    /// API key (overrides the secrets file and environment).
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Write the result to this file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Template subcommands.
#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// List templates in the user and default template directories.
    List,

    /// Print a template.
    Show(TemplateNameArgs),

    /// Check that a template loads and is valid.
    Validate(TemplateNameArgs),
}

/// A template name or path.
#[derive(Args, Debug, Clone)]
pub struct TemplateNameArgs {
    /// Template name or path.
    pub name: String,
}
