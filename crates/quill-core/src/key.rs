//! Logical key events.
//!
//! The terminal delivers bytes. Most bytes are keys on their own
//! (`Key::Char`), including control bytes such as Ctrl-S (0x13). A few
//! bytes and escape sequences have names: Enter, Backspace, the arrows
//! and the editing block.

/// The escape byte that starts every terminal key sequence.
pub const ESC: u8 = 0x1b;

/// Backspace as sent by most terminals.
pub const BACKSPACE: u8 = 127;

/// Returns the byte produced by Ctrl plus the given letter.
#[inline]
pub const fn ctrl(letter: u8) -> u8 {
    letter & 0x1f
}

/// A decoded key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Any byte without a name, control bytes included
    Char(u8),
    Enter,
    Backspace,
    Escape,
    Left,
    Right,
    Up,
    Down,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    /// Maps a single byte (not part of an escape sequence) to a key.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'\r' => Key::Enter,
            BACKSPACE => Key::Backspace,
            ESC => Key::Escape,
            other => Key::Char(other),
        }
    }

    /// Returns true for printable ASCII (no control bytes, no high bytes).
    pub fn is_printable(&self) -> bool {
        matches!(self, Key::Char(b) if b.is_ascii() && !b.is_ascii_control())
    }

    /// Parses a key binding string like `"ctrl+s"`, `"pageup"` or `"x"`.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        if let Some(letter) = lower.strip_prefix("ctrl+") {
            return match letter.as_bytes() {
                [b @ b'a'..=b'z'] => Some(Key::Char(ctrl(*b))),
                _ => None,
            };
        }
        match lower.as_str() {
            "enter" | "return" => Some(Key::Enter),
            "backspace" | "bs" => Some(Key::Backspace),
            "escape" | "esc" => Some(Key::Escape),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "delete" | "del" => Some(Key::Delete),
            "home" => Some(Key::Home),
            "end" => Some(Key::End),
            "pageup" | "pgup" => Some(Key::PageUp),
            "pagedown" | "pgdn" => Some(Key::PageDown),
            "tab" => Some(Key::Char(b'\t')),
            _ => match s.as_bytes() {
                [b] => Some(Key::Char(*b)),
                _ => None,
            },
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Char(b'\t') => write!(f, "Tab"),
            Key::Char(b) if *b < 0x20 => write!(f, "Ctrl+{}", (*b | 0x40) as char),
            Key::Char(b) if b.is_ascii() => write!(f, "{}", *b as char),
            Key::Char(b) => write!(f, "0x{:02x}", b),
            Key::Enter => write!(f, "Enter"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Escape => write!(f, "Escape"),
            Key::Left => write!(f, "Left"),
            Key::Right => write!(f, "Right"),
            Key::Up => write!(f, "Up"),
            Key::Down => write!(f, "Down"),
            Key::Delete => write!(f, "Delete"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
            Key::PageUp => write!(f, "PageUp"),
            Key::PageDown => write!(f, "PageDown"),
        }
    }
}
