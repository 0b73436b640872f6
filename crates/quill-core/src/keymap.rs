//! Key to command mapping.
//!
//! The default map covers the editor's fixed shortcuts. User bindings
//! from the `[keyboard.bindings]` config section are layered on top and
//! win over the defaults. Any unbound `Key::Char` inserts itself.

use std::collections::HashMap;

use crate::command::Command;
use crate::config::Config;
use crate::key::{Key, ctrl};

/// Keyboard mapping.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<Key, Command>,
}

impl Keymap {
    /// Creates a keymap with the default bindings.
    pub fn new() -> Self {
        let mut keymap = Self {
            bindings: HashMap::new(),
        };
        keymap.add_default_bindings();
        keymap
    }

    /// Creates a keymap with user bindings applied.
    ///
    /// Entries whose key or command does not parse are skipped with a
    /// warning.
    pub fn from_config(config: &Config) -> Self {
        let mut keymap = Self::new();

        for (key_str, cmd_str) in &config.keyboard.bindings {
            match (Key::parse(key_str), Command::parse(cmd_str)) {
                (Some(key), Some(cmd)) => keymap.bind(key, cmd),
                _ => tracing::warn!(key = %key_str, command = %cmd_str, "ignoring invalid key binding"),
            }
        }

        keymap
    }

    fn add_default_bindings(&mut self) {
        use Command::*;

        let bindings = [
            (Key::Enter, InsertNewline),
            (Key::Char(ctrl(b'q')), Quit),
            (Key::Char(ctrl(b's')), Save),
            (Key::Char(ctrl(b'f')), Find),
            (Key::Backspace, DeleteBackward),
            (Key::Char(ctrl(b'h')), DeleteBackward),
            (Key::Delete, DeleteForward),
            (Key::Left, MoveLeft),
            (Key::Right, MoveRight),
            (Key::Up, MoveUp),
            (Key::Down, MoveDown),
            (Key::Home, MoveToLineStart),
            (Key::End, MoveToLineEnd),
            (Key::PageUp, PageUp),
            (Key::PageDown, PageDown),
            (Key::Char(ctrl(b'l')), Noop),
            (Key::Escape, Noop),
        ];

        for (key, cmd) in bindings {
            self.bind(key, cmd);
        }
    }

    /// Binds `key` to `command`, replacing any previous binding.
    pub fn bind(&mut self, key: Key, command: Command) {
        self.bindings.insert(key, command);
    }

    /// Looks up the command for a key press.
    pub fn lookup(&self, key: Key) -> Command {
        match self.bindings.get(&key) {
            Some(cmd) => *cmd,
            None => match key {
                Key::Char(byte) => Command::InsertChar(byte),
                _ => Command::Noop,
            },
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}
