//! Invocation of the external comparison tool.
//!
//! The comparator is an opaque collaborator: it takes either a file path
//! argument or a stream on its stdin, and its stdout/stderr and exit code
//! pass through this process unchanged.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

/// The one input handed to the comparator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A file path passed as the tool's positional argument.
    File(PathBuf),
    /// Bytes written to the tool's stdin (piped input or a clipboard
    /// snapshot).
    Bytes(Vec<u8>),
}

/// Errors from starting or supervising the comparator process.
#[derive(Debug, Error)]
pub enum ComparatorError {
    /// The tool could not be started (not found, not executable, ...).
    #[error("failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool started but its stdin could not be fed.
    #[error("failed to feed input to '{command}': {source}")]
    Feed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool's exit status could not be collected.
    #[error("failed to wait for '{command}': {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Capability for running the comparison over one source.
///
/// Returns the comparator's own exit code, which the caller mirrors as
/// the process exit code.
pub trait Comparator {
    fn compare(&self, source: Source) -> Result<i32, ComparatorError>;
}

/// Comparator backed by an external command.
pub struct ExternalComparator {
    command: String,
    args: Vec<String>,
}

impl ExternalComparator {
    pub fn new(command: String, args: Vec<String>) -> Self {
        Self { command, args }
    }

    fn spawn_err(&self, source: std::io::Error) -> ComparatorError {
        ComparatorError::Spawn {
            command: self.command.clone(),
            source,
        }
    }
}

impl Comparator for ExternalComparator {
    fn compare(&self, source: Source) -> Result<i32, ComparatorError> {
        let (child, feed) = match source {
            Source::File(path) => {
                debug!(command = %self.command, path = %path.display(), "running comparator on file");
                let child = Command::new(&self.command)
                    .args(&self.args)
                    .arg(&path)
                    .spawn()
                    .map_err(|e| self.spawn_err(e))?;
                (child, None)
            }
            Source::Bytes(bytes) => {
                debug!(command = %self.command, bytes = bytes.len(), "running comparator on stream");
                let child = Command::new(&self.command)
                    .args(&self.args)
                    .stdin(Stdio::piped())
                    .spawn()
                    .map_err(|e| self.spawn_err(e))?;
                (child, Some(bytes))
            }
        };

        // Guarantee the child is reaped even if feeding its stdin or
        // collecting its status bails out early.
        let mut guard = scopeguard::guard(child, |mut child| {
            let _ = child.kill();
            let _ = child.wait();
        });

        if let Some(bytes) = feed {
            if let Some(mut pipe) = guard.stdin.take() {
                if let Err(e) = pipe.write_all(&bytes) {
                    // A tool that stops reading early (e.g. a pager
                    // quit) closes its end; its exit status still
                    // decides the outcome.
                    if e.kind() != std::io::ErrorKind::BrokenPipe {
                        return Err(ComparatorError::Feed {
                            command: self.command.clone(),
                            source: e,
                        });
                    }
                }
            }
        }

        let status = guard.wait().map_err(|e| ComparatorError::Wait {
            command: self.command.clone(),
            source: e,
        })?;
        scopeguard::ScopeGuard::into_inner(guard);

        let code = status.code().unwrap_or(1);
        debug!(command = %self.command, code, "comparator finished");
        Ok(code)
    }
}
