//! Byte-level rendering of the two-line search display.
//!
//! The display is drawn in place below the shell prompt with plain VT100
//! sequences and never enters the alternate screen, so the surrounding
//! scrollback stays intact:
//!
//! ```text
//! ] <preview of current match>
//! search: <query>
//! ```

use std::io::Write;

use anyhow::{Context, Result};

use crate::utils::terminal::sanitize_preview;

pub const PREVIEW_PREFIX: &str = "] ";
pub const PROMPT: &str = "search: ";

const SAVE_CURSOR: &[u8] = b"\x1b7";
const RESTORE_CURSOR: &[u8] = b"\x1b8";
const CLEAR_RIGHT: &[u8] = b"\x1b[0K";
const PREV_LINE: &[u8] = b"\x1b[1F";
const UP: &[u8] = b"\x1b[1A";
const LEFT: &[u8] = b"\x1b[1D";
const DELETE_CHAR: &[u8] = b"\x1b[1P";
const DELETE_LINE: &[u8] = b"\x1b[1M";
const NEXT_LINE: &[u8] = b"\x1b[1E";

fn move_to_column(column: usize) -> Vec<u8> {
    format!("\x1b[{}G", column).into_bytes()
}

/// Where the display is drawn
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Terminal width, when known
    pub columns: Option<u16>,
    /// 0-based column of the cursor when the session starts. The preview
    /// row begins there, not at the left margin.
    pub anchor_column: u16,
}

impl Geometry {
    /// Cells available to the preview text on the anchor row
    fn preview_width(self) -> Option<usize> {
        // Leave the last column free so the terminal never auto-wraps
        let used = self.anchor_column as usize + PREVIEW_PREFIX.len() + 1;
        self.columns.map(|c| (c as usize).saturating_sub(used))
    }
}

pub struct Renderer<W: Write> {
    out: W,
    preview_width: Option<usize>,
}

impl<W: Write> Renderer<W> {
    /// The preview is cut so it always fits on the anchor row
    pub fn new(out: W, geometry: Geometry) -> Self {
        Self { out, preview_width: geometry.preview_width() }
    }

    /// Reserve a row below the anchor, then save the anchor.
    ///
    /// The newline scrolls the screen when the anchor sits on the last row,
    /// so the saved position stays valid for every later redraw.
    pub fn begin(&mut self) -> Result<()> {
        self.write(&[&b"\n"[..], UP, SAVE_CURSOR])
    }

    /// Redraw both lines from the anchor, leaving the cursor after the query
    pub fn frame(&mut self, preview: &str, query: &[u8]) -> Result<()> {
        let preview = sanitize_preview(preview, self.preview_width);
        self.write(&[
            RESTORE_CURSOR,
            SAVE_CURSOR,
            CLEAR_RIGHT,
            PREVIEW_PREFIX.as_bytes(),
            preview.as_bytes(),
            &b"\r\n"[..],
            PROMPT.as_bytes(),
            query,
        ])
    }

    /// Remove the last query byte from the screen; `query_len` is the
    /// length after deletion
    pub fn erase_char(&mut self, query_len: usize) -> Result<()> {
        let column = move_to_column(PREVIEW_PREFIX.len() + query_len);
        self.write(&[LEFT, DELETE_CHAR, NEXT_LINE, column.as_slice(), DELETE_CHAR])
    }

    /// Drop the prompt line before the next frame
    pub fn delete_line(&mut self) -> Result<()> {
        self.write(&[DELETE_LINE])
    }

    /// Clear the working lines and return the cursor to the anchor
    pub fn finish(&mut self) -> Result<()> {
        self.write(&[DELETE_LINE, PREV_LINE, RESTORE_CURSOR, CLEAR_RIGHT])
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, parts: &[&[u8]]) -> Result<()> {
        for part in parts {
            self.out.write_all(part).context("Failed to write to terminal")?;
        }
        self.out.flush().context("Failed to flush terminal")
    }
}
