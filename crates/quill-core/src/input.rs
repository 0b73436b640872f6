//! Input decoding: raw terminal bytes to [`Key`]s.
//!
//! ## Escape Sequences
//!
//! Special keys arrive as short sequences starting with ESC:
//!
//! ```text
//! ESC [ A        arrow up          ESC [ 5 ~   page up
//! ESC [ H        home              ESC [ 3 ~   delete
//! ESC O F        end               ESC [ 1 ~   home
//! ```
//!
//! A lone ESC press looks like the start of a sequence, so every read
//! after the first ESC is bounded by the terminal's read timeout. If the
//! rest of a sequence does not arrive in time, or it is not one we know,
//! the result is a bare `Key::Escape`.

use std::io;

use crate::key::{ESC, Key};
use crate::terminal::Terminal;

/// Blocks until a key is available and decodes it.
///
/// Timeouts while waiting for the first byte are retried. Errors on the
/// first byte are fatal and propagate.
pub fn read_key(term: &mut dyn Terminal) -> io::Result<Key> {
    let byte = loop {
        if let Some(byte) = term.read_byte()? {
            break byte;
        }
    };

    if byte != ESC {
        return Ok(Key::from_byte(byte));
    }

    let key = decode_escape(term);
    tracing::trace!(%key, "decoded escape sequence");
    Ok(key)
}

/// Decodes the bytes following an ESC.
fn decode_escape(term: &mut dyn Terminal) -> Key {
    let Some(first) = read_pending(term) else {
        return Key::Escape;
    };
    let Some(second) = read_pending(term) else {
        return Key::Escape;
    };

    match (first, second) {
        (b'[', digit @ b'0'..=b'9') => match read_pending(term) {
            Some(b'~') => tilde_key(digit),
            _ => Key::Escape,
        },
        (b'[', b'A') => Key::Up,
        (b'[', b'B') => Key::Down,
        (b'[', b'C') => Key::Right,
        (b'[', b'D') => Key::Left,
        (b'[', b'H') | (b'O', b'H') => Key::Home,
        (b'[', b'F') | (b'O', b'F') => Key::End,
        _ => Key::Escape,
    }
}

/// Maps the digit of an `ESC [ <digit> ~` sequence.
fn tilde_key(digit: u8) -> Key {
    match digit {
        b'1' | b'7' => Key::Home,
        b'3' => Key::Delete,
        b'4' | b'8' => Key::End,
        b'5' => Key::PageUp,
        b'6' => Key::PageDown,
        _ => Key::Escape,
    }
}

/// One bounded read inside an escape sequence. Timeouts, end of input
/// and read errors all end the sequence.
fn read_pending(term: &mut dyn Terminal) -> Option<u8> {
    match term.read_byte() {
        Ok(byte) => byte,
        Err(err) => {
            tracing::debug!(%err, "read failed inside escape sequence");
            None
        }
    }
}
