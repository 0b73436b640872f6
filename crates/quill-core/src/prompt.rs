//! Single-line input in the message bar.
//!
//! The prompt takes over the key loop: it redraws the screen, reads a key
//! and edits its input until the user confirms with Enter or cancels with
//! Escape. An optional callback sees every key together with the input so
//! far, which is how incremental search follows the typing.

use crate::CoreResult;
use crate::editor::Editor;
use crate::input::read_key;
use crate::key::{Key, ctrl};
use crate::message::StatusMessage;
use crate::terminal::Terminal;

/// What the prompt is asking for. Picks the message bar template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    SaveAs,
    Search,
}

impl PromptKind {
    fn message(self, input: &str) -> StatusMessage {
        match self {
            PromptKind::SaveAs => StatusMessage::SaveAsPrompt(input.to_string()),
            PromptKind::Search => StatusMessage::SearchPrompt(input.to_string()),
        }
    }
}

/// Observer for prompt keys.
///
/// Called after every key that does not end the prompt, and once more
/// with the final Enter or Escape.
pub trait PromptCallback {
    fn on_key(&mut self, editor: &mut Editor, input: &str, key: Key);
}

impl Editor {
    /// Reads a line of input in the message bar.
    ///
    /// Returns `None` when the user pressed Escape. Enter on an empty
    /// input is ignored.
    pub fn prompt(
        &mut self,
        term: &mut dyn Terminal,
        kind: PromptKind,
        mut callback: Option<&mut dyn PromptCallback>,
    ) -> CoreResult<Option<String>> {
        let mut input = String::new();

        loop {
            self.set_status(kind.message(&input));
            self.refresh_screen(term)?;

            let key = read_key(term)?;
            match key {
                Key::Backspace | Key::Delete => {
                    input.pop();
                }
                Key::Char(byte) if byte == ctrl(b'h') => {
                    input.pop();
                }
                Key::Escape => {
                    self.set_status(StatusMessage::Clear);
                    if let Some(cb) = callback.as_deref_mut() {
                        cb.on_key(self, &input, key);
                    }
                    return Ok(None);
                }
                Key::Enter if !input.is_empty() => {
                    self.set_status(StatusMessage::Clear);
                    if let Some(cb) = callback.as_deref_mut() {
                        cb.on_key(self, &input, key);
                    }
                    return Ok(Some(input));
                }
                Key::Char(byte) if key.is_printable() => input.push(char::from(byte)),
                _ => {}
            }

            if let Some(cb) = callback.as_deref_mut() {
                cb.on_key(self, &input, key);
            }
        }
    }
}
