//! A single line of the document.
//!
//! ## Raw vs. Display Columns
//!
//! A row keeps two byte sequences:
//! - `chars`: the bytes exactly as they will be written to disk
//! - `render`: the bytes as they are drawn, with every tab expanded to
//!   spaces up to the next tab stop
//!
//! Cursor positions live in raw-column space (indices into `chars`).
//! Scrolling and drawing happen in display-column space (indices into
//! `render`). `cx_to_rx` and `rx_to_cx` convert between the two.
//!
//! Every method that touches `chars` regenerates `render` before it
//! returns, so a stale render is never observable.

/// Default distance between tab stops.
pub const DEFAULT_TAB_STOP: usize = 4;

/// One logical line: raw bytes plus their tab-expanded display form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    chars: Vec<u8>,
    render: Vec<u8>,
    tab_stop: usize,
}

impl Row {
    /// Creates a row holding a copy of `bytes`.
    ///
    /// A tab stop of 0 is treated as 1.
    pub fn new(bytes: &[u8], tab_stop: usize) -> Self {
        let mut row = Self {
            chars: bytes.to_vec(),
            render: Vec::new(),
            tab_stop: tab_stop.max(1),
        };
        row.regenerate();
        row
    }

    /// Creates an empty row.
    pub fn empty(tab_stop: usize) -> Self {
        Self::new(&[], tab_stop)
    }

    // ==================== Access ====================

    /// Raw bytes of the row.
    #[inline]
    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    /// Display bytes of the row.
    #[inline]
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// Number of raw bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.chars.len()
    }

    /// Number of display bytes.
    #[inline]
    pub fn rsize(&self) -> usize {
        self.render.len()
    }

    /// Tab stop used for rendering.
    #[inline]
    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    // ==================== Column Conversion ====================

    /// Converts a raw column to a display column.
    ///
    /// Columns past the end of the row are clamped to `size()`, so
    /// `cx_to_rx(size())` always equals `rsize()`.
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let cx = cx.min(self.chars.len());
        self.chars[..cx].iter().fold(0, |rx, &byte| {
            if byte == b'\t' {
                next_tab_stop(rx, self.tab_stop)
            } else {
                rx + 1
            }
        })
    }

    /// Converts a display column back to the raw column whose expansion
    /// covers it.
    ///
    /// Returns `size()` when `rx` lies beyond the rendered width.
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        let mut cur_rx = 0;
        for (cx, &byte) in self.chars.iter().enumerate() {
            cur_rx = if byte == b'\t' {
                next_tab_stop(cur_rx, self.tab_stop)
            } else {
                cur_rx + 1
            };
            if cur_rx > rx {
                return cx;
            }
        }
        self.chars.len()
    }

    /// Rebuilds `render` from `chars`.
    pub fn regenerate(&mut self) {
        let tabs = self.chars.iter().filter(|&&b| b == b'\t').count();
        let mut render = Vec::with_capacity(self.chars.len() + tabs * (self.tab_stop - 1));

        for &byte in &self.chars {
            if byte == b'\t' {
                render.push(b' ');
                while render.len() % self.tab_stop != 0 {
                    render.push(b' ');
                }
            } else {
                render.push(byte);
            }
        }

        self.render = render;
    }

    /// Changes the tab stop and re-renders.
    pub fn set_tab_stop(&mut self, tab_stop: usize) {
        self.tab_stop = tab_stop.max(1);
        self.regenerate();
    }

    // ==================== Search ====================

    /// Returns the display offset of the first occurrence of `query` in
    /// the rendered row.
    ///
    /// An empty query matches at offset 0.
    pub fn find(&self, query: &[u8]) -> Option<usize> {
        if query.is_empty() {
            return Some(0);
        }
        self.render
            .windows(query.len())
            .position(|window| window == query)
    }

    // ==================== Mutation ====================
    //
    // These are crate-private: the dirty counter lives in `TextBuffer`,
    // which is the only public way to change a row.

    /// Inserts `byte` at `at`, appending when `at` is past the end.
    pub(crate) fn insert_byte(&mut self, at: usize, byte: u8) {
        let at = at.min(self.chars.len());
        self.chars.insert(at, byte);
        self.regenerate();
    }

    /// Removes the byte at `at`. Returns false when `at` is out of range.
    pub(crate) fn remove_byte(&mut self, at: usize) -> bool {
        if at >= self.chars.len() {
            return false;
        }
        self.chars.remove(at);
        self.regenerate();
        true
    }

    /// Appends `bytes` to the end of the row.
    pub(crate) fn append(&mut self, bytes: &[u8]) {
        self.chars.extend_from_slice(bytes);
        self.regenerate();
    }

    /// Cuts the row at `at` and returns the removed suffix.
    pub(crate) fn split_off(&mut self, at: usize) -> Vec<u8> {
        let at = at.min(self.chars.len());
        let tail = self.chars.split_off(at);
        self.regenerate();
        tail
    }
}

#[inline]
fn next_tab_stop(rx: usize, tab_stop: usize) -> usize {
    rx + (tab_stop - 1) - (rx % tab_stop) + 1
}
