//! Sanitising recorded commands for the interactive preview line.
//!
//! Recorded commands are arbitrary shell input. Echoing them verbatim into
//! the two-line interactive display would let embedded escape sequences move
//! the cursor or clear the screen, and embedded newlines would break the
//! fixed layout. The preview therefore shows a flattened copy; the command
//! printed when the session ends is untouched.

use unicode_width::UnicodeWidthChar;

/// Flatten `text` to a single displayable line.
///
/// - ANSI CSI sequences (`ESC [ ... letter`) and bare `ESC x` pairs are removed
/// - newline, carriage return and tab become a single space each
/// - other control characters are dropped
/// - the result is cut to `max_width` terminal cells when given; wide
///   (East Asian) characters take two cells and are never split
///
/// # Examples
///
/// ```
/// use scribe::utils::terminal::sanitize_preview;
///
/// assert_eq!(sanitize_preview("\x1b[31mls\x1b[0m\n-la", None), "ls -la");
/// assert_eq!(sanitize_preview("git status", Some(3)), "git");
/// ```
pub fn sanitize_preview(text: &str, max_width: Option<usize>) -> String {
    let limit = max_width.unwrap_or(usize::MAX);
    let mut result = String::with_capacity(text.len().min(limit));
    let mut width = 0;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            match chars.next() {
                Some('[') => {
                    // Parameters and intermediates up to the final byte
                    for next in chars.by_ref() {
                        if next.is_ascii_alphabetic() || next == '~' {
                            break;
                        }
                    }
                }
                Some(_) | None => {}
            }
            continue;
        }

        let shown = match ch {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() => continue,
            c => c,
        };
        let cells = shown.width().unwrap_or(0);
        if width + cells > limit {
            break;
        }
        result.push(shown);
        width += cells;
    }

    result
}
