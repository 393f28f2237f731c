//! Interactive reverse-search state machine.
//!
//! [`Session::handle_key`] is the pure transition function: it updates the
//! query buffer and cursor for one key and returns the effects the driver
//! must carry out (search, erase, redraw, finish). Nothing here touches the
//! terminal or the index, so sessions can be scripted in tests.

use std::borrow::Cow;

use super::events::Key;
use crate::models::{SearchCursor, SearchOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Editing,
    Terminated,
}

/// Side effect requested by a transition, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Remove the deleted query byte from the screen
    EraseChar,
    /// Run a stepwise search and show its outcome
    Search,
    /// Redraw the preview and prompt lines
    Redraw,
    /// Clear the working lines; the displayed result is final
    Finish,
}

#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    query: Vec<u8>,
    cursor: SearchCursor,
    displayed: SearchOutcome,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Editing,
            query: Vec::new(),
            cursor: SearchCursor::new(),
            displayed: SearchOutcome::Empty,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn query_bytes(&self) -> &[u8] {
        &self.query
    }

    /// Query as text. A multi-byte character typed halfway shows up as U+FFFD
    /// until its remaining bytes arrive.
    pub fn query(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.query)
    }

    pub fn cursor(&self) -> &SearchCursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut SearchCursor {
        &mut self.cursor
    }

    pub fn displayed(&self) -> &SearchOutcome {
        &self.displayed
    }

    /// Replace the displayed outcome with a fresh search result
    pub fn show(&mut self, outcome: SearchOutcome) {
        self.displayed = outcome;
    }

    /// The text the session returns when it ends now
    pub fn result(&self) -> &str {
        self.displayed.text()
    }

    /// Apply one key. Keys arriving after termination are ignored.
    pub fn handle_key(&mut self, key: Key) -> Vec<Effect> {
        if self.state == SessionState::Terminated {
            return Vec::new();
        }

        match key {
            Key::Byte(byte) => {
                self.query.push(byte);
                vec![Effect::Search, Effect::Redraw]
            }
            Key::Backspace => {
                if self.query.pop().is_some() {
                    vec![Effect::EraseChar, Effect::Search, Effect::Redraw]
                } else {
                    vec![Effect::Redraw]
                }
            }
            Key::Up => {
                self.cursor.step_older();
                vec![Effect::Search, Effect::Redraw]
            }
            Key::Down => {
                self.cursor.step_newer();
                vec![Effect::Search, Effect::Redraw]
            }
            // Left/right are decoded but have no editing meaning yet
            Key::Left | Key::Right | Key::Control(_) | Key::UnknownEscape => {
                self.state = SessionState::Terminated;
                vec![Effect::Finish]
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
