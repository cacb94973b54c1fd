//! Stdin channel classification.
//!
//! The dispatch decision needs to know what kind of device sits behind
//! fd 0: an interactive terminal, a streaming source (pipe or redirected
//! file), or something else entirely (e.g. `/dev/null`). Encoding the
//! answer as a single enum makes "pipe" and "terminal" structurally
//! mutually exclusive.

use std::io::IsTerminal;

/// What the process's standard input is connected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdinKind {
    /// A streaming source readable to completion: a pipe or a redirected
    /// regular file.
    Pipe,
    /// An interactive terminal device.
    Terminal,
    /// Anything else (character devices such as `/dev/null`, sockets, ...).
    Other,
}

/// Classify the process's standard input.
pub fn classify_stdin() -> StdinKind {
    if std::io::stdin().is_terminal() {
        return StdinKind::Terminal;
    }
    if stdin_is_stream() {
        StdinKind::Pipe
    } else {
        StdinKind::Other
    }
}

/// True when fd 0 is a FIFO or a regular file, i.e. a source we can
/// drain to completion.
#[cfg(unix)]
fn stdin_is_stream() -> bool {
    use std::os::unix::io::AsRawFd;

    let fd = std::io::stdin().as_raw_fd();
    // SAFETY: fstat only writes into the stat buffer we hand it, and the
    // fd is valid for the lifetime of the call.
    let mut stat: libc::stat = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::fstat(fd, &mut stat) };
    if rc != 0 {
        return false;
    }
    matches!(stat.st_mode & libc::S_IFMT, libc::S_IFIFO | libc::S_IFREG)
}

/// Without fstat introspection, any non-terminal stdin is assumed to be
/// a readable stream.
#[cfg(not(unix))]
fn stdin_is_stream() -> bool {
    true
}
