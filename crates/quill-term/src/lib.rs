//! # Quill Term
//!
//! The real terminal behind [`quill_core::Terminal`].
//!
//! [`RawTerminal`] switches stdin to raw mode when created and restores
//! the saved settings when dropped, so the user's shell comes back intact
//! even when the editor exits through an error.
//!
//! ## Read timeout
//!
//! Raw mode is set up with `VMIN = 0` and `VTIME = n` tenths of a second:
//! a read returns as soon as one byte is available, or with nothing after
//! the timeout. The input decoder relies on this to tell a lone Escape
//! press from the start of an escape sequence.

use std::io::{self, Read, Write};
use std::os::fd::AsFd;

use nix::sys::termios::{
    self, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg, SpecialCharacterIndices,
    Termios,
};
use quill_core::{ScreenSize, Terminal};

/// Result type for terminal setup
pub type TermResult<T> = Result<T, TermError>;

/// Errors that can occur while setting up the terminal
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    #[error("Termios error: {0}")]
    Termios(#[from] nix::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Terminal reports an unusable size: {cols}x{rows}")]
    BadSize { cols: u16, rows: u16 },
}

/// Stdin in raw mode, stdout as the frame sink.
pub struct RawTerminal {
    original: Termios,
}

impl RawTerminal {
    /// Enables raw mode with a read timeout of `read_timeout_tenths`
    /// tenths of a second.
    pub fn enable(read_timeout_tenths: u8) -> TermResult<Self> {
        let stdin = io::stdin();
        let original = termios::tcgetattr(stdin.as_fd())?;

        let mut raw = original.clone();
        make_raw(&mut raw, read_timeout_tenths);
        termios::tcsetattr(stdin.as_fd(), SetArg::TCSAFLUSH, &raw)?;

        tracing::debug!(read_timeout_tenths, "raw mode enabled");
        Ok(Self { original })
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        if let Err(err) = termios::tcsetattr(io::stdin().as_fd(), SetArg::TCSAFLUSH, &self.original) {
            tracing::warn!(%err, "failed to restore terminal mode");
        }
    }
}

impl Terminal for RawTerminal {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        byte_from_read(io::stdin().lock().read(&mut buf), buf[0])
    }

    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(frame)?;
        stdout.flush()
    }
}

/// Clears the flags that make up cooked mode: echo, line buffering,
/// signal keys, flow control, CR/NL translation and output processing.
fn make_raw(termios: &mut Termios, read_timeout_tenths: u8) {
    termios.input_flags &= !(InputFlags::BRKINT
        | InputFlags::ICRNL
        | InputFlags::INPCK
        | InputFlags::ISTRIP
        | InputFlags::IXON);
    termios.output_flags &= !OutputFlags::OPOST;
    termios.control_flags |= ControlFlags::CS8;
    termios.local_flags &=
        !(LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG);

    termios.control_chars[SpecialCharacterIndices::VMIN as usize] = 0;
    termios.control_chars[SpecialCharacterIndices::VTIME as usize] = read_timeout_tenths;
}

/// Turns the outcome of a one-byte read into the [`Terminal`] contract.
///
/// Zero bytes means the timeout expired. Interrupted and would-block
/// reads count as timeouts too; the caller just asks again.
fn byte_from_read(result: io::Result<usize>, byte: u8) -> io::Result<Option<u8>> {
    match result {
        Ok(0) => Ok(None),
        Ok(_) => Ok(Some(byte)),
        Err(err) if matches!(err.kind(), io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock) => {
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Asks the terminal for its size.
pub fn screen_size() -> TermResult<ScreenSize> {
    let (cols, rows) = crossterm::terminal::size()?;
    let size = checked_size(cols, rows)?;
    tracing::debug!(rows = size.rows, cols = size.cols, "screen size");
    Ok(size)
}

/// Rejects sizes with no room for text.
fn checked_size(cols: u16, rows: u16) -> TermResult<ScreenSize> {
    if cols == 0 || usize::from(rows) <= ScreenSize::RESERVED_ROWS {
        return Err(TermError::BadSize { cols, rows });
    }
    Ok(ScreenSize::new(usize::from(rows), usize::from(cols)))
}
