//! Editor commands.
//!
//! Keys are translated into commands by the [`Keymap`](crate::Keymap);
//! the editor then executes commands. Keeping the two apart lets the
//! configuration rebind keys without touching dispatch.

/// Everything a key press can ask the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // Editing
    InsertChar(u8),
    InsertNewline,
    DeleteBackward,
    DeleteForward,

    // Cursor movement
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    MoveToLineStart,
    MoveToLineEnd,
    PageUp,
    PageDown,

    // File and search
    Save,
    Find,
    Quit,

    /// Ignored key
    Noop,
}

impl Command {
    /// Name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Command::InsertChar(_) => "insert-char",
            Command::InsertNewline => "newline",
            Command::DeleteBackward => "delete-backward",
            Command::DeleteForward => "delete-forward",
            Command::MoveLeft => "move-left",
            Command::MoveRight => "move-right",
            Command::MoveUp => "move-up",
            Command::MoveDown => "move-down",
            Command::MoveToLineStart => "line-start",
            Command::MoveToLineEnd => "line-end",
            Command::PageUp => "page-up",
            Command::PageDown => "page-down",
            Command::Save => "save",
            Command::Find => "find",
            Command::Quit => "quit",
            Command::Noop => "noop",
        }
    }

    /// Parses a configuration name. `insert-char` is not bindable.
    pub fn parse(name: &str) -> Option<Self> {
        let cmd = match name.trim().to_lowercase().as_str() {
            "newline" => Command::InsertNewline,
            "delete-backward" => Command::DeleteBackward,
            "delete-forward" => Command::DeleteForward,
            "move-left" => Command::MoveLeft,
            "move-right" => Command::MoveRight,
            "move-up" => Command::MoveUp,
            "move-down" => Command::MoveDown,
            "line-start" => Command::MoveToLineStart,
            "line-end" => Command::MoveToLineEnd,
            "page-up" => Command::PageUp,
            "page-down" => Command::PageDown,
            "save" => Command::Save,
            "find" => Command::Find,
            "quit" => Command::Quit,
            "noop" => Command::Noop,
            _ => return None,
        };
        Some(cmd)
    }

    /// Returns true if the command may change the document.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Command::InsertChar(_)
                | Command::InsertNewline
                | Command::DeleteBackward
                | Command::DeleteForward
        )
    }
}
