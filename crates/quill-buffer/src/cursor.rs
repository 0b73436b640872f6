//! Cursor position and movement.
//!
//! The cursor addresses a raw column (`cx`) in a row (`cy`). The row
//! index may equal `buffer.len()`, which is the virtual empty row shown
//! after the last line of the file; typing there creates a real row.
//!
//! `rx` is the display column derived from `cx`. It is recomputed by the
//! viewport before every frame and is never edited directly by movement.

use crate::buffer::TextBuffer;

/// Cursor in a [`TextBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Raw column
    pub cx: usize,
    /// Row index
    pub cy: usize,
    /// Display column, derived from `cx`
    pub rx: usize,
}

impl Cursor {
    /// Creates a cursor at the given row and raw column.
    pub fn new(cy: usize, cx: usize) -> Self {
        Self { cx, cy, rx: 0 }
    }

    /// Recomputes `rx` from `cx`. The virtual row has `rx == 0`.
    pub fn update_rx(&mut self, buffer: &TextBuffer) {
        self.rx = buffer.row(self.cy).map_or(0, |row| row.cx_to_rx(self.cx));
    }

    /// Moves one column left, wrapping to the end of the previous row.
    pub fn move_left(&mut self, buffer: &TextBuffer) {
        if self.cx > 0 {
            self.cx -= 1;
        } else if self.cy > 0 {
            self.cy -= 1;
            self.cx = buffer.row_size(self.cy);
        }
        self.clamp(buffer);
    }

    /// Moves one column right, wrapping to the start of the next row.
    pub fn move_right(&mut self, buffer: &TextBuffer) {
        if let Some(row) = buffer.row(self.cy) {
            if self.cx < row.size() {
                self.cx += 1;
            } else {
                self.cy += 1;
                self.cx = 0;
            }
        }
        self.clamp(buffer);
    }

    /// Moves one row up.
    pub fn move_up(&mut self, buffer: &TextBuffer) {
        self.cy = self.cy.saturating_sub(1);
        self.clamp(buffer);
    }

    /// Moves one row down, stopping at the virtual row.
    pub fn move_down(&mut self, buffer: &TextBuffer) {
        if self.cy < buffer.len() {
            self.cy += 1;
        }
        self.clamp(buffer);
    }

    /// Moves to the start of the row.
    pub fn move_to_line_start(&mut self) {
        self.cx = 0;
    }

    /// Moves to the end of the row. No effect on the virtual row.
    pub fn move_to_line_end(&mut self, buffer: &TextBuffer) {
        if let Some(row) = buffer.row(self.cy) {
            self.cx = row.size();
        }
    }

    /// Pulls the cursor back inside the buffer.
    pub fn clamp(&mut self, buffer: &TextBuffer) {
        self.cy = self.cy.min(buffer.len());
        self.cx = self.cx.min(buffer.row_size(self.cy));
    }
}
