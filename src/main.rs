//! anydiff - route a file argument, piped stdin, or the system clipboard
//! to an external comparison tool.

mod cli;
mod clipboard;
mod comparator;
mod config;
mod error;
mod logging;
mod resolver;
mod stdin;

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use crate::cli::Cli;
use crate::clipboard::SystemClipboard;
use crate::comparator::ExternalComparator;
use crate::config::Config;
use crate::error::AnydiffError;
use crate::resolver::{resolve_and_dispatch, InvocationContext};
use crate::stdin::classify_stdin;

fn main() -> ExitCode {
    logging::init_tracing();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<u8, AnydiffError> {
    let config = Config::load()?;
    let env_tool = std::env::var("ANYDIFF_TOOL").ok();
    let tool = config.resolve_tool(cli.tool.as_deref(), env_tool.as_deref());

    let ctx = InvocationContext {
        argument: cli.file,
        stdin: classify_stdin(),
    };
    debug!(?ctx, command = %tool.command, "resolved invocation context");

    let comparator = ExternalComparator::new(tool.command, tool.args);
    let code = resolve_and_dispatch(&ctx, std::io::stdin().lock(), &comparator, &SystemClipboard)?;

    // The comparator's exit code is mirrored unchanged.
    Ok(u8::try_from(code).unwrap_or(1))
}
