//! Error taxonomy and exit-code mapping.

use thiserror::Error;

use crate::clipboard::ClipboardError;
use crate::comparator::ComparatorError;
use crate::config::ConfigError;

/// Everything that can go wrong in one resolver run.
#[derive(Debug, Error)]
pub enum AnydiffError {
    /// No argument, stdin neither pipe nor terminal. Nothing to dispatch.
    #[error("no input source: pass a file, pipe data on stdin, or run from a terminal with text on the clipboard")]
    NoSourceSelected,

    /// Piped stdin could not be drained.
    #[error("failed to read piped stdin: {0}")]
    StdinRead(#[source] std::io::Error),

    /// The clipboard collaborator failed or held nothing.
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    /// The comparator could not be started or supervised.
    #[error(transparent)]
    Comparator(#[from] ComparatorError),

    /// Configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AnydiffError {
    /// Map an error to the process exit code.
    ///
    /// A comparator that ran and failed is not an error here - its exit
    /// code is mirrored directly. Code 2 marks "nothing selected" so it
    /// stays distinguishable from a comparator reporting differences
    /// (conventionally 1), and 127 mirrors the shell's command-not-found.
    pub fn exit_code(&self) -> u8 {
        match self {
            AnydiffError::NoSourceSelected => 2,
            AnydiffError::Comparator(ComparatorError::Spawn { .. }) => 127,
            AnydiffError::StdinRead(_)
            | AnydiffError::Clipboard(_)
            | AnydiffError::Comparator(_)
            | AnydiffError::Config(_) => 1,
        }
    }
}
