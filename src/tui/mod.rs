//! Interactive reverse search on the controlling terminal.
//!
//! Keys are read one at a time from `/dev/tty` in raw mode, fed through the
//! [`Session`] state machine, and the resulting effects are carried out
//! against a [`Searcher`] and the [`Renderer`](rendering::Renderer). The
//! terminal is used for both input and display so that stdout only carries
//! the chosen command back to the shell.
mod app;
mod events;
mod rendering;
mod terminal;

use std::fs::OpenOptions;
use std::io::{Read, Write};

use anyhow::{Context, Result};
use tracing::debug;
pub use app::{Effect, Session, SessionState};
pub use events::{Key, KeyReader};
pub use rendering::Geometry;
use rendering::Renderer;
use terminal::RawModeGuard;

use crate::search::Searcher;

const TTY_PATH: &str = "/dev/tty";

/// Run an interactive search on the controlling terminal and return the
/// command that was displayed when the user ended the session
pub fn run_interactive<S: Searcher>(searcher: &mut S) -> Result<String> {
    let input = OpenOptions::new()
        .read(true)
        .write(true)
        .open(TTY_PATH)
        .with_context(|| format!("Failed to open {}", TTY_PATH))?;
    let output = input.try_clone().context("Failed to duplicate terminal handle")?;
    let columns = crossterm::terminal::size().ok().map(|(columns, _)| columns);

    let guard = RawModeGuard::enable()?;
    // The widget runs from inside the line editor, so the cursor usually
    // sits after the shell prompt rather than at the left margin
    let anchor_column = match crossterm::cursor::position() {
        Ok((column, _)) => column,
        Err(e) => {
            debug!(error = %e, "cursor position unavailable; assuming column 0");
            0
        }
    };
    let geometry = Geometry { columns, anchor_column };
    let result = run_session(input, output, searcher, geometry);
    guard.restore()?;

    result
}

/// Drive one session over arbitrary input/output streams
pub fn run_session<R, W, S>(
    input: R,
    output: W,
    searcher: &mut S,
    geometry: Geometry,
) -> Result<String>
where
    R: Read,
    W: Write,
    S: Searcher,
{
    let mut keys = KeyReader::new(input);
    let mut renderer = Renderer::new(output, geometry);
    let mut session = Session::new();

    renderer.begin()?;
    renderer.frame(session.displayed().text(), session.query_bytes())?;

    loop {
        let key = keys.next_key()?;

        for effect in session.handle_key(key) {
            match effect {
                Effect::EraseChar => renderer.erase_char(session.query_bytes().len())?,
                Effect::Search => {
                    let query = session.query().into_owned();
                    let outcome = searcher.step(&query, session.cursor_mut())?;
                    session.show(outcome);
                    renderer.delete_line()?;
                }
                Effect::Redraw => {
                    renderer.frame(session.displayed().text(), session.query_bytes())?
                }
                Effect::Finish => {
                    renderer.finish()?;
                    return Ok(session.result().to_string());
                }
            }
        }
    }
}
