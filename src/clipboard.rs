//! Clipboard access for the terminal fallback branch.

use thiserror::Error;

/// Errors from the clipboard collaborator.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The platform clipboard could not be opened or read.
    #[error("failed to read the system clipboard: {0}")]
    Access(#[from] arboard::Error),

    /// The clipboard was readable but held no text.
    #[error("the clipboard holds no text")]
    Empty,
}

/// Capability for reading the current clipboard contents.
pub trait ClipboardRead {
    /// Snapshot the clipboard's text at call time.
    fn read_text(&self) -> Result<String, ClipboardError>;
}

/// Clipboard reader backed by the platform clipboard via arboard.
pub struct SystemClipboard;

impl ClipboardRead for SystemClipboard {
    fn read_text(&self) -> Result<String, ClipboardError> {
        // arboard wants a fresh Clipboard handle per operation.
        let mut clipboard = arboard::Clipboard::new()?;
        let text = clipboard.get_text()?;
        if text.is_empty() {
            return Err(ClipboardError::Empty);
        }
        Ok(text)
    }
}
