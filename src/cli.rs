//! Command-line surface.

use clap::Parser;

/// Route a file, piped stdin, or the clipboard to an external comparison tool.
#[derive(Debug, Parser)]
#[command(name = "anydiff", version, about)]
pub struct Cli {
    /// File to hand to the comparison tool. When given, stdin is never inspected.
    pub file: Option<String>,

    /// Override the configured comparison tool
    #[arg(long, value_name = "CMD")]
    pub tool: Option<String>,
}
