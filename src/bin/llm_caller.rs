//! llm-caller binary entry point.
//!
//! Parses arguments, initialises logging on stderr and dispatches to the
//! command handlers. The result of `call` is the only thing written to
//! stdout.

use llm_caller::cli::Cli;
use llm_caller::commands;
use llm_caller::error::EXIT_SUCCESS;
use log::LevelFilter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

/// Default level is `warn`; each `-v` raises it. `RUST_LOG` overrides both.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}
