//! Command handlers for llm-caller.
//!
//! This module routes parsed CLI commands to their implementations. The
//! `call` flow is split so the pieces that touch the process (stdin, the
//! environment, stdout) are injected by [`dispatch`] and can be replaced in
//! tests.

use crate::cli::{CallArgs, Cli, Command, TemplateCommand, TemplateNameArgs};
use crate::config::{load_config, CallerConfig};
use crate::credentials::{resolve_api_key, EnvSnapshot};
use crate::engine::{execute, inject_api_key};
use crate::error::{CallerError, Result};
use crate::executor::HttpInvoker;
use crate::models::Template;
use crate::output::OutputSink;
use crate::template::{list_templates, load_template, TemplateSource};
use crate::variables::VariableResolver;
use log::debug;
use std::io::Read;
use std::path::Path;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    debug!("template search dirs: {:?}", config.template_search_dirs());

    match cli.command {
        Command::Call(args) => cmd_call(&args, &config),
        Command::Template(TemplateCommand::List) => cmd_template_list(&config),
        Command::Template(TemplateCommand::Show(args)) => cmd_template_show(&args, &config),
        Command::Template(TemplateCommand::Validate(args)) => {
            cmd_template_validate(&args, &config)
        }
    }
}

/// Picks the single template source given on the command line.
///
/// # Returns
///
/// The source, or `CallerError::Usage` when none or more than one is given.
pub fn template_source(args: &CallArgs) -> Result<TemplateSource> {
    let mut sources = Vec::with_capacity(1);

    if let Some(name) = args.template.as_ref().filter(|name| !name.is_empty()) {
        sources.push(TemplateSource::Named(name.clone()));
    }
    if let Some(json) = &args.template_json {
        sources.push(TemplateSource::Json(json.clone()));
    }
    if let Some(encoded) = &args.template_base64 {
        sources.push(TemplateSource::Base64(encoded.clone()));
    }

    match sources.len() {
        0 => Err(CallerError::Usage(
            "must specify a template source: template file, --template-json, or --template-base64"
                .to_string(),
        )),
        1 => Ok(sources.remove(0)),
        _ => Err(CallerError::Usage(
            "template sources are mutually exclusive: specify only one of template file, \
             --template-json, or --template-base64"
                .to_string(),
        )),
    }
}

/// Runs the `call` flow and returns the extracted result.
///
/// # Arguments
///
/// * `args` - Parsed `call` arguments
/// * `config` - Loaded configuration
/// * `resolver` - Variable resolver owning the stdin stream
/// * `env` - Environment snapshot for API key lookup
/// * `invoker` - HTTP client
///
/// # Returns
///
/// The result text; writing it out is left to the caller.
pub fn run_call<R: Read>(
    args: &CallArgs,
    config: &CallerConfig,
    resolver: &mut VariableResolver<R>,
    env: &EnvSnapshot,
    invoker: &HttpInvoker,
) -> Result<String> {
    let source = template_source(args)?;
    let mut bindings = resolver.resolve_all(&args.vars)?;
    let template = load_template(&source, config)?;

    let api_key = resolve_api_key(
        &template.provider,
        args.api_key.as_deref(),
        config.secret_file(),
        env,
    );
    inject_api_key(&mut bindings, &api_key);
    debug!(
        "bound variables: {:?}",
        bindings.keys().collect::<Vec<_>>()
    );

    execute(&template, &bindings, invoker)
}

fn cmd_call(args: &CallArgs, config: &CallerConfig) -> Result<()> {
    let mut resolver = VariableResolver::from_stdin();
    let env = EnvSnapshot::capture();
    let invoker = HttpInvoker::new()?;

    let result = run_call(args, config, &mut resolver, &env, &invoker)?;

    let sink = OutputSink::from_option(args.output.clone());
    sink.write(&result)?;
    if let OutputSink::File(path) = &sink {
        println!("Result saved to {}", path.display());
    }
    Ok(())
}

fn cmd_template_list(config: &CallerConfig) -> Result<()> {
    let mut total = 0;

    if let Some(user_dir) = &config.template_dir {
        total += print_template_dir("User templates", user_dir)?;
        println!();
    }
    total += print_template_dir("Downloaded templates", &config.default_template_dir())?;

    println!("\nTotal: {} templates found", total);
    Ok(())
}

fn print_template_dir(label: &str, dir: &Path) -> Result<usize> {
    let names = list_templates(dir)?;

    println!("{} ({}):", label, dir.display());
    if names.is_empty() {
        println!("  (no templates found)");
    }
    for name in &names {
        println!("  - {}", name);
    }
    Ok(names.len())
}

fn load_named(args: &TemplateNameArgs, config: &CallerConfig) -> Result<Template> {
    Ok(load_template(
        &TemplateSource::Named(args.name.clone()),
        config,
    )?)
}

fn cmd_template_show(args: &TemplateNameArgs, config: &CallerConfig) -> Result<()> {
    let template = load_named(args, config)?;
    println!("{}", render_template(&template));
    Ok(())
}

/// Pretty-prints a template as JSON.
pub fn render_template(template: &Template) -> String {
    serde_json::to_string_pretty(template).unwrap_or_else(|_| format!("{:?}", template))
}

fn cmd_template_validate(args: &TemplateNameArgs, config: &CallerConfig) -> Result<()> {
    let template = load_named(args, config)?;
    print!("{}", validation_summary(&args.name, &template));
    Ok(())
}

/// Summary printed by `template validate`.
pub fn validation_summary(name: &str, template: &Template) -> String {
    let mut summary = format!(
        "Template '{}' is valid\nProvider: {}\nURL: {}\nMethod: {}\n",
        name, template.provider, template.request.url, template.request.method
    );
    if let Some(title) = &template.title {
        summary.push_str(&format!("Title: {}\n", title));
    }
    if let Some(description) = &template.description {
        summary.push_str(&format!("Description: {}\n", description));
    }
    summary
}
