/// Direction of a stepwise search relative to the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Older,
    Newer,
}

/// Logical position of a search cursor: the last matched rowid, or
/// `Unbounded` (+infinity) before anything has matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Unbounded,
    At(i64),
}

impl Position {
    /// Upper bound usable in SQL. `Unbounded` maps to `i64::MAX`.
    pub fn as_bound(self) -> i64 {
        match self {
            Position::Unbounded => i64::MAX,
            Position::At(rowid) => rowid,
        }
    }
}

/// Per-session cursor into the match sequence. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchCursor {
    pub position: Position,
    pub direction: Direction,
}

impl SearchCursor {
    pub fn new() -> Self {
        Self { position: Position::Unbounded, direction: Direction::Older }
    }

    /// Move one position towards older rows (up-arrow)
    pub fn step_older(&mut self) {
        self.direction = Direction::Older;
        if let Position::At(rowid) = self.position {
            self.position = Position::At(rowid.saturating_sub(1));
        }
    }

    /// Move one position towards newer rows (down-arrow)
    pub fn step_newer(&mut self) {
        self.direction = Direction::Newer;
        if let Position::At(rowid) = self.position {
            self.position = Position::At(rowid.saturating_add(1));
        }
    }
}

impl Default for SearchCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Text shown for the not-found sentinel
pub const NOT_FOUND: &str = "<no search found>";

/// Result of one stepwise search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Empty query: nothing searched, blank preview
    Empty,
    Found { rowid: i64, command: String },
    NotFound,
}

impl SearchOutcome {
    /// The text this outcome displays, and returns when the session ends on it
    pub fn text(&self) -> &str {
        match self {
            SearchOutcome::Empty => "",
            SearchOutcome::Found { command, .. } => command,
            SearchOutcome::NotFound => NOT_FOUND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cursor_is_unbounded_older() {
        let cursor = SearchCursor::new();
        assert_eq!(cursor.position, Position::Unbounded);
        assert_eq!(cursor.direction, Direction::Older);
        assert_eq!(cursor.position.as_bound(), i64::MAX);
    }

    #[test]
    fn test_steps_move_by_one() {
        let mut cursor = SearchCursor { position: Position::At(5), direction: Direction::Older };
        cursor.step_older();
        assert_eq!(cursor.position, Position::At(4));
        cursor.step_newer();
        cursor.step_newer();
        assert_eq!(cursor.position, Position::At(6));
        assert_eq!(cursor.direction, Direction::Newer);
    }

    #[test]
    fn test_unbounded_stays_unbounded() {
        let mut cursor = SearchCursor::new();
        cursor.step_older();
        assert_eq!(cursor.position, Position::Unbounded);
        cursor.step_newer();
        assert_eq!(cursor.position, Position::Unbounded);
        assert_eq!(cursor.direction, Direction::Newer);
    }

    #[test]
    fn test_outcome_text() {
        assert_eq!(SearchOutcome::Empty.text(), "");
        assert_eq!(SearchOutcome::NotFound.text(), NOT_FOUND);
        let found = SearchOutcome::Found { rowid: 1, command: "ls".into() };
        assert_eq!(found.text(), "ls");
    }
}
