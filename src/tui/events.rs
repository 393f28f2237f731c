use std::collections::VecDeque;
use std::io::{ErrorKind, Read};

use anyhow::{Context, Result, bail};

const ESC: u8 = 0x1b;
const DEL: u8 = 0x7f;
const CSI_INTRO: u8 = b'[';
const CHUNK_SIZE: usize = 64;

/// A decoded keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Printable byte, appended to the query as-is
    Byte(u8),
    Backspace,
    Up,
    Down,
    Left,
    Right,
    /// Control byte below 32, including a lone ESC
    Control(u8),
    /// ESC followed by anything but `[A`, `[B`, `[C` or `[D`
    UnknownEscape,
}

/// Decodes raw terminal bytes into [`Key`]s, one at a time.
///
/// Bytes arrive in chunks as the terminal delivers them. An escape sequence
/// comes in a single chunk, so an ESC with nothing buffered behind it is the
/// Escape key itself rather than the start of a sequence.
pub struct KeyReader<R> {
    reader: R,
    pending: VecDeque<u8>,
}

impl<R: Read> KeyReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, pending: VecDeque::new() }
    }

    /// Block until the next key is available
    pub fn next_key(&mut self) -> Result<Key> {
        let byte = self.next_byte()?;
        let key = match byte {
            ESC if self.pending.is_empty() => Key::Control(ESC),
            ESC => self.escape_sequence()?,
            DEL => Key::Backspace,
            b if b < 0x20 => Key::Control(b),
            b => Key::Byte(b),
        };
        Ok(key)
    }

    fn escape_sequence(&mut self) -> Result<Key> {
        if self.next_byte()? != CSI_INTRO {
            return Ok(Key::UnknownEscape);
        }
        let key = match self.next_byte()? {
            b'A' => Key::Up,
            b'B' => Key::Down,
            b'C' => Key::Right,
            b'D' => Key::Left,
            _ => Key::UnknownEscape,
        };
        Ok(key)
    }

    fn next_byte(&mut self) -> Result<u8> {
        if self.pending.is_empty() {
            self.fill()?;
        }
        self.pending.pop_front().context("Terminal input buffer unexpectedly empty")
    }

    fn fill(&mut self) -> Result<()> {
        let mut buf = [0u8; CHUNK_SIZE];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => bail!("Terminal input closed"),
                Ok(n) => {
                    self.pending.extend(&buf[..n]);
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e).context("Failed to read from terminal"),
            }
        }
    }
}
