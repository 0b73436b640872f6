//! Status messages shown in the bottom bar.
//!
//! Messages are built from a closed set of kinds with typed arguments
//! instead of free-form format strings. A message expires a fixed time
//! after it was set; expiry is checked when the frame is drawn, nothing
//! clears it actively.

use std::time::{Duration, Instant};

/// Longest message kept, in bytes.
pub const MAX_MESSAGE_LEN: usize = 79;

/// Every message the editor can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    /// Key help shown at startup
    Help,
    /// Save-as prompt with the text typed so far
    SaveAsPrompt(String),
    /// Search prompt with the query typed so far
    SearchPrompt(String),
    /// The save-as prompt was cancelled
    SaveAborted,
    /// A save completed
    BytesWritten(usize),
    /// A save failed
    SaveFailed(String),
    /// Quit was refused because of unsaved changes
    UnsavedChanges { presses_left: usize },
    /// Empty message
    Clear,
}

impl std::fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusMessage::Help => {
                write!(f, "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find")
            }
            StatusMessage::SaveAsPrompt(input) => write!(f, "Save as: {} (ESC to cancel)", input),
            StatusMessage::SearchPrompt(query) => {
                write!(f, "Search: {} (Use ESC/Arrows/Enter)", query)
            }
            StatusMessage::SaveAborted => write!(f, "Save aborted"),
            StatusMessage::BytesWritten(n) => write!(f, "{} bytes written to disk", n),
            StatusMessage::SaveFailed(err) => write!(f, "Can't save! I/O error: {}", err),
            StatusMessage::UnsavedChanges { presses_left } => write!(
                f,
                "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                presses_left
            ),
            StatusMessage::Clear => Ok(()),
        }
    }
}

/// The current message and when it was set.
#[derive(Debug, Clone, Default)]
pub struct StatusBar {
    text: String,
    set_at: Option<Instant>,
}

impl StatusBar {
    /// Replaces the message, stamping it with `now`.
    pub fn set(&mut self, message: &StatusMessage, now: Instant) {
        let mut text = message.to_string();
        truncate_at_char_boundary(&mut text, MAX_MESSAGE_LEN);
        self.text = text;
        self.set_at = Some(now);
    }

    /// Raw message text, expired or not.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The message to draw at `now`, if it is non-empty and younger
    /// than `timeout`.
    pub fn visible(&self, now: Instant, timeout: Duration) -> Option<&str> {
        let set_at = self.set_at?;
        if self.text.is_empty() || now.saturating_duration_since(set_at) >= timeout {
            return None;
        }
        Some(&self.text)
    }
}

fn truncate_at_char_boundary(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}
