//! Input source resolution — the single dispatch decision.
//!
//! ```text
//! Invocation Context → select_source → dispatch → Comparator
//! ```
//!
//! Selection is a pure function over the context so the branch logic can
//! be unit-tested without a real terminal, pipe, or clipboard attached.
//! Dispatch performs the one blocking read the chosen branch needs and
//! invokes the comparator exactly once.

use std::io::Read;
use std::path::PathBuf;

use tracing::debug;

use crate::clipboard::ClipboardRead;
use crate::comparator::{Comparator, Source};
use crate::error::AnydiffError;
use crate::stdin::StdinKind;

/// One-shot snapshot of the process's invocation context.
///
/// Constructed once at startup, read once, discarded.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    /// First positional argument, semantically a file path.
    pub argument: Option<String>,
    /// Classification of the stdin descriptor.
    pub stdin: StdinKind,
}

/// Which input channel won the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// An explicit file path argument.
    FilePath(PathBuf),
    /// Piped stdin, to be drained to completion.
    Stream,
    /// The system clipboard, snapshotted at dispatch time.
    Clipboard,
}

/// Pick exactly one input source, in strict priority order.
///
/// 1. a present, non-empty argument wins unconditionally;
/// 2. otherwise piped stdin;
/// 3. otherwise an interactive terminal falls back to the clipboard;
/// 4. otherwise nothing is selected.
pub fn select_source(argument: Option<&str>, stdin: StdinKind) -> Option<SourceKind> {
    match argument {
        Some(path) if !path.is_empty() => return Some(SourceKind::FilePath(PathBuf::from(path))),
        _ => {}
    }
    match stdin {
        StdinKind::Pipe => Some(SourceKind::Stream),
        StdinKind::Terminal => Some(SourceKind::Clipboard),
        StdinKind::Other => None,
    }
}

/// Resolve the input source and invoke the comparator with it.
///
/// At most one comparator invocation happens per call; failures are
/// surfaced, never papered over by falling back to another branch.
/// Returns the comparator's exit code.
pub fn resolve_and_dispatch<R, C, P>(
    ctx: &InvocationContext,
    mut stream: R,
    comparator: &C,
    clipboard: &P,
) -> Result<i32, AnydiffError>
where
    R: Read,
    C: Comparator + ?Sized,
    P: ClipboardRead + ?Sized,
{
    let selected =
        select_source(ctx.argument.as_deref(), ctx.stdin).ok_or(AnydiffError::NoSourceSelected)?;

    let source = match selected {
        SourceKind::FilePath(path) => {
            debug!(path = %path.display(), "dispatching file argument");
            Source::File(path)
        }
        SourceKind::Stream => {
            let mut bytes = Vec::new();
            stream
                .read_to_end(&mut bytes)
                .map_err(AnydiffError::StdinRead)?;
            debug!(bytes = bytes.len(), "dispatching piped stdin");
            Source::Bytes(bytes)
        }
        SourceKind::Clipboard => {
            let text = clipboard.read_text()?;
            debug!(bytes = text.len(), "dispatching clipboard snapshot");
            Source::Bytes(text.into_bytes())
        }
    };

    Ok(comparator.compare(source)?)
}
