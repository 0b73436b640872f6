//! Frame composition.
//!
//! A frame is built into one byte buffer and handed to the terminal in a
//! single write, so the user never sees a half-drawn screen.
//!
//! ## Layout
//!
//! ```text
//! +------------------------------+
//! | text rows (screen_rows)      |
//! | ~                            |
//! +------------------------------+
//! | status bar (inverted)        |
//! | message bar                  |
//! +------------------------------+
//! ```

use std::time::Instant;

use crate::editor::Editor;

const HIDE_CURSOR: &[u8] = b"\x1b[?25l";
const SHOW_CURSOR: &[u8] = b"\x1b[?25h";
const CURSOR_HOME: &[u8] = b"\x1b[H";
const ERASE_LINE: &[u8] = b"\x1b[K";
const INVERT: &[u8] = b"\x1b[7m";
const RESET_ATTRS: &[u8] = b"\x1b[m";
const CRLF: &[u8] = b"\r\n";

/// Longest file name shown in the status bar, in bytes.
const MAX_STATUS_NAME: usize = 20;

/// Text shown in the status bar for a document without a file name.
const NO_NAME: &str = "[No Name]";

/// Welcome line drawn on an empty document.
pub fn welcome_banner() -> String {
    format!("Quill editor -- version {}", env!("CARGO_PKG_VERSION"))
}

impl Editor {
    /// Builds the complete frame for the current state.
    ///
    /// Assumes the viewport has already been scrolled to the cursor.
    pub fn compose_frame(&self, now: Instant) -> Vec<u8> {
        let mut frame = Vec::with_capacity(
            (self.viewport.screen_rows + 2) * (self.viewport.screen_cols + ERASE_LINE.len() + 2),
        );

        frame.extend_from_slice(HIDE_CURSOR);
        frame.extend_from_slice(CURSOR_HOME);

        self.draw_rows(&mut frame);
        self.draw_status_bar(&mut frame);
        self.draw_message_bar(&mut frame, now);

        let (row, col) = self.viewport.screen_position(&self.cursor);
        frame.extend_from_slice(format!("\x1b[{};{}H", row, col).as_bytes());
        frame.extend_from_slice(SHOW_CURSOR);
        frame
    }

    fn draw_rows(&self, frame: &mut Vec<u8>) {
        let cols = self.viewport.screen_cols;
        let screen_rows = self.viewport.screen_rows;

        for y in 0..screen_rows {
            let file_row = y + self.viewport.row_off;

            match self.buffer.row(file_row) {
                Some(row) => {
                    let render = row.render();
                    let start = self.viewport.col_off.min(render.len());
                    let end = (start + cols).min(render.len());
                    frame.extend_from_slice(&render[start..end]);
                }
                None if self.buffer.is_empty() && y == screen_rows / 3 => {
                    draw_banner(frame, cols);
                }
                None => frame.push(b'~'),
            }

            frame.extend_from_slice(ERASE_LINE);
            frame.extend_from_slice(CRLF);
        }
    }

    fn draw_status_bar(&self, frame: &mut Vec<u8>) {
        let cols = self.viewport.screen_cols;

        let name = self.buffer.filename().unwrap_or(NO_NAME);
        let name = &name.as_bytes()[..name.len().min(MAX_STATUS_NAME)];
        let mut left = name.to_vec();
        left.extend_from_slice(
            format!(
                " - {} lines {}",
                self.buffer.len(),
                if self.buffer.is_modified() { "(modified)" } else { "" }
            )
            .as_bytes(),
        );
        let right = format!("{}/{}", self.cursor.cy + 1, self.buffer.len());

        frame.extend_from_slice(INVERT);
        let mut len = left.len().min(cols);
        frame.extend_from_slice(&left[..len]);
        while len < cols {
            if cols - len == right.len() {
                frame.extend_from_slice(right.as_bytes());
                break;
            }
            frame.push(b' ');
            len += 1;
        }
        frame.extend_from_slice(RESET_ATTRS);
        frame.extend_from_slice(CRLF);
    }

    fn draw_message_bar(&self, frame: &mut Vec<u8>, now: Instant) {
        frame.extend_from_slice(ERASE_LINE);
        if let Some(text) = self.status.visible(now, self.config.editor.message_timeout()) {
            let bytes = text.as_bytes();
            frame.extend_from_slice(&bytes[..bytes.len().min(self.viewport.screen_cols)]);
        }
    }
}

fn draw_banner(frame: &mut Vec<u8>, cols: usize) {
    let banner = welcome_banner();
    let shown = banner.len().min(cols);
    let mut padding = (cols - shown) / 2;
    if padding > 0 {
        frame.push(b'~');
        padding -= 1;
    }
    frame.extend(std::iter::repeat_n(b' ', padding));
    frame.extend_from_slice(&banner.as_bytes()[..shown]);
}
