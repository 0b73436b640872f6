//! # Quill Buffer
//!
//! Row-based text storage for the quill editor.
//!
//! ## Key Concepts
//!
//! ### Rows, not a flat string
//! - The document is a `Vec<Row>`; index order is line order
//! - Each `Row` owns its raw bytes and a tab-expanded render
//! - Rows are plain bytes: one byte is one column (tabs aside)
//!
//! ### Guards instead of errors
//! - Out-of-range edits are ignored rather than reported
//! - The buffer can never be left with rows out of order or a stale render

mod buffer;
mod cursor;
mod row;

pub use buffer::{BufferConfig, TextBuffer};
pub use cursor::Cursor;
pub use row::{DEFAULT_TAB_STOP, Row};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_creation() {
        let buffer = TextBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.config().tab_stop, DEFAULT_TAB_STOP);
    }

    #[test]
    fn test_edit_session() {
        let mut buffer = TextBuffer::new();
        buffer.insert_row(0, b"Hello");
        buffer.append_string(0, b", World!");
        assert_eq!(buffer.row(0).unwrap().chars(), b"Hello, World!");

        buffer.split_row(0, 6);
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.row(1).unwrap().chars(), b" World!");

        buffer.delete_char(1, 0);
        assert_eq!(buffer.to_bytes(), b"Hello,\nWorld!\n");
        assert_eq!(buffer.dirty(), 4);
    }
}
