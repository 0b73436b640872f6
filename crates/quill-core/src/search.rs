//! Incremental search.
//!
//! The search runs as a prompt callback. Every edit of the query starts
//! over from the top of the file; the arrow keys step to the next or
//! previous matching row, wrapping around at either end.

use crate::editor::Editor;
use crate::key::Key;
use crate::prompt::PromptCallback;

/// Direction of the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

/// State kept between keys of one search.
#[derive(Debug, Clone, Default)]
pub struct IncrementalSearch {
    last_match: Option<usize>,
    direction: SearchDirection,
}

impl IncrementalSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row of the current match, if any.
    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    /// Visits every row once, starting after the last match, and moves the
    /// cursor to the first row containing `query`.
    fn step(&mut self, editor: &mut Editor, query: &[u8]) {
        let len = editor.buffer.len();
        if len == 0 {
            return;
        }

        let mut current = self.last_match;
        for _ in 0..len {
            let next = match (current, self.direction) {
                (None, _) => 0,
                (Some(row), SearchDirection::Forward) => (row + 1) % len,
                (Some(0), SearchDirection::Backward) => len - 1,
                (Some(row), SearchDirection::Backward) => row - 1,
            };
            current = Some(next);

            let Some(row) = editor.buffer.row(next) else {
                continue;
            };
            if let Some(offset) = row.find(query) {
                tracing::debug!(row = next, offset, "search match");
                self.last_match = Some(next);
                editor.cursor.cy = next;
                editor.cursor.cx = row.rx_to_cx(offset);
                // Past the end, so the next scroll puts the match on the top line.
                editor.viewport.row_off = len;
                return;
            }
        }
    }
}

impl PromptCallback for IncrementalSearch {
    fn on_key(&mut self, editor: &mut Editor, input: &str, key: Key) {
        match key {
            Key::Enter | Key::Escape => {
                self.last_match = None;
                self.direction = SearchDirection::Forward;
                return;
            }
            Key::Right | Key::Down => self.direction = SearchDirection::Forward,
            Key::Left | Key::Up => self.direction = SearchDirection::Backward,
            _ => {
                self.last_match = None;
                self.direction = SearchDirection::Forward;
            }
        }

        if self.last_match.is_none() {
            self.direction = SearchDirection::Forward;
        }
        self.step(editor, input.as_bytes());
    }
}
