//! The visible window onto the document.

use quill_buffer::{Cursor, TextBuffer};

/// Top-left display offset plus the size of the text area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// First document row on screen
    pub row_off: usize,
    /// First display column on screen
    pub col_off: usize,
    /// Text rows on screen (status and message bars excluded)
    pub screen_rows: usize,
    /// Columns on screen
    pub screen_cols: usize,
}

impl Viewport {
    pub fn new(screen_rows: usize, screen_cols: usize) -> Self {
        Self {
            row_off: 0,
            col_off: 0,
            screen_rows,
            screen_cols,
        }
    }

    /// Refreshes `cursor.rx` and moves the window just enough to contain
    /// the cursor. Does nothing when the cursor is already visible.
    pub fn scroll(&mut self, cursor: &mut Cursor, buffer: &TextBuffer) {
        cursor.update_rx(buffer);

        if cursor.cy < self.row_off {
            self.row_off = cursor.cy;
        }
        if cursor.cy >= self.row_off + self.screen_rows {
            self.row_off = cursor.cy + 1 - self.screen_rows;
        }
        if cursor.rx < self.col_off {
            self.col_off = cursor.rx;
        }
        if cursor.rx >= self.col_off + self.screen_cols {
            self.col_off = cursor.rx + 1 - self.screen_cols;
        }
    }

    /// Cursor position on screen, 1-indexed, as used by `ESC [ row ; col H`.
    pub fn screen_position(&self, cursor: &Cursor) -> (usize, usize) {
        (
            cursor.cy.saturating_sub(self.row_off) + 1,
            cursor.rx.saturating_sub(self.col_off) + 1,
        )
    }
}
