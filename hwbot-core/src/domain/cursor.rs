//! Poll cursor

/// Unix timestamp sent as `from_date` to ask for submissions updated since then
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PollCursor(i64);

impl PollCursor {
    pub fn new(from_date: i64) -> Self {
        Self(from_date)
    }

    /// Cursor positioned at the current wall-clock time
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp())
    }

    pub fn from_date(&self) -> i64 {
        self.0
    }

    /// Moves the cursor to the server-reported date, if there is one
    ///
    /// Returns `true` when the cursor changed.
    pub fn advance(&mut self, current_date: Option<i64>) -> bool {
        match current_date {
            Some(date) if date != self.0 => {
                self.0 = date;
                true
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for PollCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_moves_to_current_date() {
        let mut cursor = PollCursor::new(1000);
        assert!(cursor.advance(Some(2000)));
        assert_eq!(cursor.from_date(), 2000);
    }

    #[test]
    fn test_advance_holds_without_current_date() {
        let mut cursor = PollCursor::new(1000);
        assert!(!cursor.advance(None));
        assert_eq!(cursor.from_date(), 1000);
    }

    #[test]
    fn test_now_is_recent() {
        let before = chrono::Utc::now().timestamp();
        let cursor = PollCursor::now();
        assert!(cursor.from_date() >= before);
    }
}
