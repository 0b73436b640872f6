//! # Quill Core
//!
//! Editor state and the pieces that act on it.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                        Editor                          │
//! │  ┌────────────┐ ┌──────────┐ ┌────────────┐ ┌────────┐ │
//! │  │ TextBuffer │ │  Cursor  │ │  Viewport  │ │ Status │ │
//! │  └────────────┘ └──────────┘ └────────────┘ └────────┘ │
//! │        ▲                                               │
//! │   Storage (load/save)        Keymap → Command          │
//! └───────────────────────────────────────────────────────┘
//!          ▲ read_key                  │ compose_frame
//!          │                           ▼
//!      ┌───────────────── Terminal ─────────────────┐
//! ```
//!
//! The terminal and the file system sit behind the [`Terminal`] and
//! [`Storage`] traits, so everything here runs against in-memory fakes
//! in tests.

pub mod command;
pub mod config;
pub mod editor;
pub mod input;
pub mod key;
pub mod keymap;
pub mod message;
pub mod prompt;
pub mod screen;
pub mod search;
pub mod storage;
pub mod terminal;
pub mod viewport;

#[cfg(test)]
mod testing;

pub use command::Command;
pub use config::{Config, ConfigError};
pub use editor::{Editor, Flow};
pub use input::read_key;
pub use key::Key;
pub use keymap::Keymap;
pub use message::{StatusBar, StatusMessage};
pub use prompt::{PromptCallback, PromptKind};
pub use search::IncrementalSearch;
pub use storage::{FileStorage, Storage};
pub use terminal::{CLEAR_SCREEN, ScreenSize, Terminal};
pub use viewport::Viewport;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open {name}: {source}")]
    Open {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
