//! The document: an ordered sequence of rows.
//!
//! ## Silent Guards
//!
//! Every mutation validates its indices and does nothing when they are
//! out of range. Callers (cursor movement, key dispatch) are expected to
//! keep indices valid; the guards only make sure a stray index can never
//! reorder rows or corrupt their bytes.
//!
//! ## Dirty Counter
//!
//! Each successful mutation bumps `dirty` by one. The counter is only
//! reset by `mark_clean`, which the editor calls after a load or a save.

use crate::row::{DEFAULT_TAB_STOP, Row};

/// Configuration for buffer behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferConfig {
    /// Tab width in display columns
    pub tab_stop: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            tab_stop: DEFAULT_TAB_STOP,
        }
    }
}

/// An in-memory document made of rows.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    /// Rows in document order
    rows: Vec<Row>,

    /// Mutations since the last load or save
    dirty: usize,

    /// Associated file name (if any)
    filename: Option<String>,

    /// Buffer-specific settings
    config: BufferConfig,
}

impl TextBuffer {
    /// Creates a new empty buffer.
    ///
    /// # Example
    /// ```
    /// use quill_buffer::TextBuffer;
    ///
    /// let buffer = TextBuffer::new();
    /// assert!(buffer.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer with custom configuration.
    pub fn with_config(config: BufferConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Builds a clean buffer from a sequence of lines.
    ///
    /// Rows are appended one at a time and the dirty counter is reset
    /// afterwards, so a freshly loaded buffer is never reported as modified.
    pub fn from_lines<I, L>(lines: I, config: BufferConfig) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut buffer = Self::with_config(config);
        for line in lines {
            buffer.insert_row(buffer.len(), line.as_ref());
        }
        buffer.mark_clean();
        buffer
    }

    // ==================== Access ====================

    /// Returns all rows in order.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the row at `idx`, if it exists.
    #[inline]
    pub fn row(&self, idx: usize) -> Option<&Row> {
        self.rows.get(idx)
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the buffer has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the size of row `idx`, or 0 for a row that does not exist.
    pub fn row_size(&self, idx: usize) -> usize {
        self.rows.get(idx).map_or(0, Row::size)
    }

    // ==================== State ====================

    /// Number of mutations since the last load or save.
    pub fn dirty(&self) -> usize {
        self.dirty
    }

    /// Returns true if the buffer has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.dirty > 0
    }

    /// Resets the dirty counter.
    pub fn mark_clean(&mut self) {
        self.dirty = 0;
    }

    /// Returns the associated file name, if any.
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Sets the associated file name.
    pub fn set_filename(&mut self, name: impl Into<String>) {
        self.filename = Some(name.into());
    }

    /// Returns the buffer's configuration.
    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// Changes the tab stop and re-renders every row.
    pub fn set_tab_stop(&mut self, tab_stop: usize) {
        self.config.tab_stop = tab_stop;
        for row in &mut self.rows {
            row.set_tab_stop(tab_stop);
        }
    }

    // ==================== Row Mutations ====================

    /// Inserts a row holding a copy of `bytes` before index `at`.
    ///
    /// `at == len()` appends. Any larger index is ignored.
    pub fn insert_row(&mut self, at: usize, bytes: &[u8]) {
        if at > self.rows.len() {
            return;
        }
        self.rows.insert(at, Row::new(bytes, self.config.tab_stop));
        self.dirty += 1;
    }

    /// Removes the row at `at`. Out-of-range indices are ignored.
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        self.dirty += 1;
    }

    // ==================== Character Mutations ====================

    /// Inserts `byte` into row `row` at column `at`.
    ///
    /// A column past the end of the row appends.
    pub fn insert_char(&mut self, row: usize, at: usize, byte: u8) {
        if let Some(r) = self.rows.get_mut(row) {
            r.insert_byte(at, byte);
            self.dirty += 1;
        }
    }

    /// Removes the byte at column `at` of row `row`.
    pub fn delete_char(&mut self, row: usize, at: usize) {
        if let Some(r) = self.rows.get_mut(row) {
            if r.remove_byte(at) {
                self.dirty += 1;
            }
        }
    }

    /// Appends `bytes` to the end of row `row`.
    pub fn append_string(&mut self, row: usize, bytes: &[u8]) {
        if let Some(r) = self.rows.get_mut(row) {
            r.append(bytes);
            self.dirty += 1;
        }
    }

    /// Breaks row `row` at column `col`.
    ///
    /// At column 0 an empty row is inserted before `row` (which may be
    /// the virtual row at `len()`). Otherwise the bytes from `col` onward
    /// move to a new row right after `row`.
    pub fn split_row(&mut self, row: usize, col: usize) {
        if col == 0 {
            self.insert_row(row, &[]);
            return;
        }
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        let tail = r.split_off(col);
        self.insert_row(row + 1, &tail);
    }

    /// Joins row `row` onto the end of the previous row.
    ///
    /// Returns the column in the previous row where the joined text
    /// starts, or `None` when there is no previous row.
    pub fn join_with_previous(&mut self, row: usize) -> Option<usize> {
        if row == 0 || row >= self.rows.len() {
            return None;
        }
        let join_at = self.rows[row - 1].size();
        let moved = self.rows[row].chars().to_vec();
        self.append_string(row - 1, &moved);
        self.delete_row(row);
        Some(join_at)
    }

    // ==================== Persistence ====================

    /// Serializes the buffer for saving: every row followed by `\n`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let total: usize = self.rows.iter().map(|r| r.size() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for row in &self.rows {
            out.extend_from_slice(row.chars());
            out.push(b'\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn buffer_of(lines: &[&str]) -> TextBuffer {
        TextBuffer::from_lines(lines.iter().map(|l| l.as_bytes()), BufferConfig::default())
    }

    fn lines(buffer: &TextBuffer) -> Vec<String> {
        buffer
            .rows()
            .iter()
            .map(|r| String::from_utf8_lossy(r.chars()).into_owned())
            .collect()
    }

    #[test]
    fn test_from_lines_is_clean() {
        let buffer = buffer_of(&["one", "two"]);
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.dirty(), 0);
        assert!(!buffer.is_modified());
    }

    #[test]
    fn test_insert_row_bounds() {
        let mut buffer = buffer_of(&["a"]);
        buffer.insert_row(5, b"nope");
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.dirty(), 0);

        buffer.insert_row(0, b"first");
        buffer.insert_row(2, b"last");
        assert_eq!(lines(&buffer), ["first", "a", "last"]);
        assert_eq!(buffer.dirty(), 2);
    }

    #[test]
    fn test_delete_row_bounds() {
        let mut buffer = buffer_of(&["a", "b", "c"]);
        buffer.delete_row(3);
        assert_eq!(buffer.dirty(), 0);

        buffer.delete_row(1);
        assert_eq!(lines(&buffer), ["a", "c"]);
        assert_eq!(buffer.dirty(), 1);
    }

    #[test]
    fn test_insert_char_clamps_column() {
        let mut buffer = buffer_of(&["ab"]);
        buffer.insert_char(0, 99, b'c');
        buffer.insert_char(0, 0, b'_');
        assert_eq!(lines(&buffer), ["_abc"]);
        assert_eq!(buffer.dirty(), 2);

        buffer.insert_char(4, 0, b'x');
        assert_eq!(buffer.dirty(), 2);
    }

    #[test]
    fn test_delete_char_out_of_range_is_noop() {
        let mut buffer = buffer_of(&["ab"]);
        buffer.delete_char(0, 2);
        buffer.delete_char(1, 0);
        assert_eq!(lines(&buffer), ["ab"]);
        assert_eq!(buffer.dirty(), 0);
    }

    #[test]
    fn test_split_row_at_start_inserts_above() {
        let mut buffer = buffer_of(&["abc"]);
        buffer.split_row(0, 0);
        assert_eq!(lines(&buffer), ["", "abc"]);
    }

    #[test]
    fn test_split_row_in_middle() {
        let mut buffer = buffer_of(&["ab\tcd"]);
        buffer.split_row(0, 2);
        assert_eq!(lines(&buffer), ["ab", "\tcd"]);
        assert_eq!(buffer.row(0).unwrap().render(), b"ab");
        assert_eq!(buffer.row(1).unwrap().render(), b"    cd");
    }

    #[test]
    fn test_split_virtual_row() {
        let mut buffer = TextBuffer::new();
        buffer.split_row(0, 0);
        assert_eq!(buffer.len(), 1);
        buffer.split_row(5, 3);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_join_with_previous() {
        let mut buffer = buffer_of(&["abc", "def"]);
        assert_eq!(buffer.join_with_previous(1), Some(3));
        assert_eq!(lines(&buffer), ["abcdef"]);
        assert_eq!(buffer.join_with_previous(0), None);
    }

    #[test]
    fn test_to_bytes_terminates_every_row() {
        let buffer = buffer_of(&["a", "", "bc"]);
        assert_eq!(buffer.to_bytes(), b"a\n\nbc\n");
        assert!(TextBuffer::new().to_bytes().is_empty());
    }

    #[test]
    fn test_set_tab_stop_rerenders_rows() {
        let mut buffer = buffer_of(&["\tx"]);
        buffer.set_tab_stop(8);
        assert_eq!(buffer.row(0).unwrap().rsize(), 9);
        buffer.insert_row(1, b"\t");
        assert_eq!(buffer.row(1).unwrap().rsize(), 8);
    }

    proptest! {
        #[test]
        fn insert_then_delete_is_identity(
            text in "[a-z\t ]{0,30}",
            at in 0usize..40,
            byte in prop_oneof![Just(b'\t'), b'a'..=b'z'],
        ) {
            let mut buffer = buffer_of(&[text.as_str()]);
            let before = buffer.row(0).unwrap().clone();
            let at = at.min(before.size());

            buffer.insert_char(0, at, byte);
            buffer.delete_char(0, at);

            let after = buffer.row(0).unwrap();
            prop_assert_eq!(after.chars(), before.chars());
            prop_assert_eq!(after.rsize(), before.rsize());
            // Every mutation counts, even one that undoes the previous.
            prop_assert_eq!(buffer.dirty(), 2);
        }

        #[test]
        fn rows_render_consistently_after_mutations(
            ops in prop::collection::vec((0u8..5, 0usize..6, 0usize..12, b'a'..=b'c'), 0..40),
        ) {
            let mut buffer = buffer_of(&["a\tb", "cd"]);
            for (op, row, col, byte) in ops {
                match op {
                    0 => buffer.insert_row(row, &[byte, b'\t']),
                    1 => buffer.delete_row(row),
                    2 => buffer.insert_char(row, col, byte),
                    3 => buffer.delete_char(row, col),
                    _ => buffer.split_row(row, col),
                }
            }
            for row in buffer.rows() {
                prop_assert_eq!(row.cx_to_rx(row.size()), row.rsize());
                let mut copy = row.clone();
                copy.regenerate();
                prop_assert_eq!(&copy, row);
            }
        }
    }
}
