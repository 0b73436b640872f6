//! The editor's view of the terminal.
//!
//! Raw-mode setup, size queries and the actual file descriptors belong to
//! the front end. The core only needs to pull bytes with a bounded wait
//! and push whole frames.

use std::io;

/// Sequence written once when the editor exits: clear screen, home cursor.
pub const CLEAR_SCREEN: &[u8] = b"\x1b[2J\x1b[H";

/// Byte source and frame sink.
pub trait Terminal {
    /// Reads one byte, waiting no longer than the configured read timeout.
    ///
    /// Returns `Ok(None)` when the timeout expires with no input.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Writes one complete frame.
    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()>;
}

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub rows: usize,
    pub cols: usize,
}

impl ScreenSize {
    /// Rows kept for the status bar and the message bar.
    pub const RESERVED_ROWS: usize = 2;

    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Rows left for document text.
    pub fn text_rows(&self) -> usize {
        self.rows.saturating_sub(Self::RESERVED_ROWS)
    }
}
