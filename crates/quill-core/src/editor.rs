//! Main editor orchestration.
//!
//! `Editor` is the single aggregate of mutable state: the document, the
//! cursor, the viewport and the status message. Every component works on
//! it through `&mut self` (or `&self` for drawing), so there is no global
//! state and each piece can be tested on its own.
//!
//! One interaction cycle is: draw a frame, read a key, run the command.

use std::time::Instant;

use quill_buffer::{BufferConfig, Cursor, TextBuffer};

use crate::command::Command;
use crate::config::Config;
use crate::input::read_key;
use crate::keymap::Keymap;
use crate::message::{StatusBar, StatusMessage};
use crate::prompt::PromptKind;
use crate::search::IncrementalSearch;
use crate::storage::{FileStorage, Storage};
use crate::terminal::{CLEAR_SCREEN, ScreenSize, Terminal};
use crate::viewport::Viewport;
use crate::{CoreError, CoreResult};

/// What the main loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The editor state.
pub struct Editor {
    /// The document
    pub(crate) buffer: TextBuffer,

    /// Cursor in the document
    pub(crate) cursor: Cursor,

    /// Visible window
    pub(crate) viewport: Viewport,

    /// Bottom-bar message
    pub(crate) status: StatusBar,

    /// Editor configuration
    pub(crate) config: Config,

    /// Key bindings
    keymap: Keymap,

    /// Where documents are loaded from and saved to
    storage: Box<dyn Storage>,

    /// Quit presses still required while the document is dirty
    quit_times: usize,
}

impl Editor {
    /// Creates an editor for a terminal of the given size, backed by the
    /// local file system.
    pub fn new(config: Config, size: ScreenSize) -> Self {
        Self::with_storage(config, size, Box::new(FileStorage))
    }

    /// Creates an editor with a custom storage backend.
    pub fn with_storage(config: Config, size: ScreenSize, storage: Box<dyn Storage>) -> Self {
        let buffer = TextBuffer::with_config(BufferConfig {
            tab_stop: config.editor.tab_stop,
        });
        let mut status = StatusBar::default();
        status.set(&StatusMessage::Help, Instant::now());

        Self {
            buffer,
            cursor: Cursor::default(),
            viewport: Viewport::new(size.text_rows(), size.cols),
            status,
            keymap: Keymap::from_config(&config),
            quit_times: config.editor.quit_times,
            config,
            storage,
        }
    }

    // ==================== Accessors ====================

    /// Returns the document.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Returns the cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Returns the viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Returns the current status text, expired or not.
    pub fn status_text(&self) -> &str {
        self.status.text()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shows a message in the bottom bar.
    pub fn set_status(&mut self, message: StatusMessage) {
        self.status.set(&message, Instant::now());
    }

    // ==================== File Operations ====================

    /// Loads `name` into the editor, replacing the current document.
    ///
    /// A file that does not exist yet gives an empty document bound to
    /// that name, so the first save creates it.
    pub fn open(&mut self, name: &str) -> CoreResult<()> {
        let lines = match self.storage.load(name) {
            Ok(lines) => lines,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(file = name, "new file");
                Vec::new()
            }
            Err(source) => {
                return Err(CoreError::Open {
                    name: name.to_string(),
                    source,
                });
            }
        };

        let mut buffer = TextBuffer::from_lines(lines, *self.buffer.config());
        buffer.set_filename(name);
        tracing::info!(file = name, rows = buffer.len(), "opened");

        self.buffer = buffer;
        self.cursor = Cursor::default();
        self.viewport.row_off = 0;
        self.viewport.col_off = 0;
        Ok(())
    }

    /// Saves the document, asking for a name first if it has none.
    ///
    /// Failures are reported in the status bar; only terminal errors
    /// propagate.
    pub fn save(&mut self, term: &mut dyn Terminal) -> CoreResult<()> {
        if self.buffer.filename().is_none() {
            let Some(name) = self.prompt(term, PromptKind::SaveAs, None)? else {
                self.set_status(StatusMessage::SaveAborted);
                return Ok(());
            };
            let name = self.with_save_extension(name);
            self.buffer.set_filename(name);
        }

        let Some(name) = self.buffer.filename().map(str::to_owned) else {
            return Ok(());
        };
        let bytes = self.buffer.to_bytes();

        match self.storage.save(&name, &bytes) {
            Ok(()) => {
                self.buffer.mark_clean();
                tracing::info!(file = %name, bytes = bytes.len(), "saved");
                self.set_status(StatusMessage::BytesWritten(bytes.len()));
            }
            Err(err) => {
                tracing::warn!(file = %name, %err, "save failed");
                self.set_status(StatusMessage::SaveFailed(err.to_string()));
            }
        }
        Ok(())
    }

    /// Applies `editor.save_extension` to a name typed at the prompt.
    fn with_save_extension(&self, name: String) -> String {
        match &self.config.editor.save_extension {
            Some(ext) if !ext.is_empty() && !name.ends_with(&format!(".{}", ext)) => {
                format!("{}.{}", name, ext)
            }
            _ => name,
        }
    }

    // ==================== Search ====================

    /// Runs an incremental search.
    ///
    /// Escape puts the cursor and viewport back where they were; Enter
    /// leaves the cursor on the match.
    pub fn find(&mut self, term: &mut dyn Terminal) -> CoreResult<()> {
        let saved_cursor = self.cursor;
        let saved_viewport = self.viewport;

        let mut search = IncrementalSearch::new();
        let query = self.prompt(term, PromptKind::Search, Some(&mut search))?;

        if query.is_none() {
            self.cursor = saved_cursor;
            self.viewport = saved_viewport;
        }
        Ok(())
    }

    // ==================== Text Editing ====================

    /// Inserts a byte at the cursor. On the virtual row past the end of
    /// the file a new row is created first.
    pub fn insert_char(&mut self, byte: u8) {
        if self.cursor.cy == self.buffer.len() {
            self.buffer.insert_row(self.buffer.len(), &[]);
        }
        self.buffer.insert_char(self.cursor.cy, self.cursor.cx, byte);
        self.cursor.cx += 1;
    }

    /// Breaks the line at the cursor and moves to the start of the new line.
    pub fn insert_newline(&mut self) {
        self.buffer.split_row(self.cursor.cy, self.cursor.cx);
        self.cursor.cy += 1;
        self.cursor.cx = 0;
    }

    /// Deletes the byte left of the cursor, joining with the previous
    /// line at column 0.
    pub fn delete_backward(&mut self) {
        if self.cursor.cy == self.buffer.len() {
            return;
        }
        if self.cursor.cx == 0 && self.cursor.cy == 0 {
            return;
        }

        if self.cursor.cx > 0 {
            self.buffer.delete_char(self.cursor.cy, self.cursor.cx - 1);
            self.cursor.cx -= 1;
        } else if let Some(join_at) = self.buffer.join_with_previous(self.cursor.cy) {
            self.cursor.cy -= 1;
            self.cursor.cx = join_at;
        }
    }

    /// Deletes the byte under the cursor.
    pub fn delete_forward(&mut self) {
        self.cursor.move_right(&self.buffer);
        self.delete_backward();
    }

    // ==================== Cursor Movement ====================

    /// Moves the cursor up one screen.
    pub fn page_up(&mut self) {
        self.cursor.cy = self.viewport.row_off;
        for _ in 0..self.viewport.screen_rows {
            self.cursor.move_up(&self.buffer);
        }
    }

    /// Moves the cursor down one screen.
    pub fn page_down(&mut self) {
        self.cursor.cy = (self.viewport.row_off + self.viewport.screen_rows)
            .saturating_sub(1)
            .min(self.buffer.len());
        for _ in 0..self.viewport.screen_rows {
            self.cursor.move_down(&self.buffer);
        }
    }

    // ==================== Dispatch ====================

    /// Reads one key and acts on it.
    pub fn process_keypress(&mut self, term: &mut dyn Terminal) -> CoreResult<Flow> {
        let key = read_key(term)?;
        let command = self.keymap.lookup(key);
        tracing::debug!(%key, ?command, "dispatch");
        self.execute(command, term)
    }

    /// Runs a command.
    pub fn execute(&mut self, command: Command, term: &mut dyn Terminal) -> CoreResult<Flow> {
        if command == Command::Quit {
            if self.buffer.is_modified() && self.quit_times > 0 {
                self.set_status(StatusMessage::UnsavedChanges {
                    presses_left: self.quit_times,
                });
                self.quit_times -= 1;
                return Ok(Flow::Continue);
            }
            return Ok(Flow::Quit);
        }

        match command {
            Command::InsertChar(byte) => self.insert_char(byte),
            Command::InsertNewline => self.insert_newline(),
            Command::DeleteBackward => self.delete_backward(),
            Command::DeleteForward => self.delete_forward(),
            Command::MoveLeft => self.cursor.move_left(&self.buffer),
            Command::MoveRight => self.cursor.move_right(&self.buffer),
            Command::MoveUp => self.cursor.move_up(&self.buffer),
            Command::MoveDown => self.cursor.move_down(&self.buffer),
            Command::MoveToLineStart => self.cursor.move_to_line_start(),
            Command::MoveToLineEnd => self.cursor.move_to_line_end(&self.buffer),
            Command::PageUp => self.page_up(),
            Command::PageDown => self.page_down(),
            Command::Save => self.save(term)?,
            Command::Find => self.find(term)?,
            Command::Quit | Command::Noop => {}
        }

        if command.is_edit() {
            tracing::trace!(dirty = self.buffer.dirty(), "document changed");
        }
        self.quit_times = self.config.editor.quit_times;
        Ok(Flow::Continue)
    }

    /// Scrolls and draws one frame.
    pub fn refresh_screen(&mut self, term: &mut dyn Terminal) -> CoreResult<()> {
        self.viewport.scroll(&mut self.cursor, &self.buffer);
        let frame = self.compose_frame(Instant::now());
        term.write_frame(&frame)?;
        Ok(())
    }

    /// Runs the editor until the user quits, then clears the screen.
    pub fn run(&mut self, term: &mut dyn Terminal) -> CoreResult<()> {
        loop {
            self.refresh_screen(term)?;
            if self.process_keypress(term)? == Flow::Quit {
                break;
            }
        }
        term.write_frame(CLEAR_SCREEN)?;
        tracing::info!("quit");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::ctrl;
    use crate::testing::{MemoryStorage, ScriptedTerminal};

    fn editor_with(lines: &[&str]) -> Editor {
        let mut editor = Editor::with_storage(
            Config::default(),
            ScreenSize::new(12, 40),
            Box::new(MemoryStorage::default()),
        );
        editor.buffer = TextBuffer::from_lines(lines.iter().map(|l| l.as_bytes()), BufferConfig::default());
        editor
    }

    fn lines(editor: &Editor) -> Vec<String> {
        editor
            .buffer()
            .rows()
            .iter()
            .map(|r| String::from_utf8_lossy(r.chars()).into_owned())
            .collect()
    }

    fn press(editor: &mut Editor, bytes: &[u8]) -> Flow {
        let mut term = ScriptedTerminal::new(bytes);
        let mut flow = Flow::Continue;
        while flow == Flow::Continue {
            match editor.process_keypress(&mut term) {
                Ok(next) => flow = next,
                Err(_) => break,
            }
        }
        flow
    }

    #[test]
    fn test_backspace_at_line_start_joins_rows() {
        let mut editor = editor_with(&["abc", "def"]);
        editor.cursor = Cursor::new(1, 0);
        editor.delete_backward();

        assert_eq!(lines(&editor), ["abcdef"]);
        assert_eq!((editor.cursor.cy, editor.cursor.cx), (0, 3));
        assert_eq!(editor.buffer().len(), 1);
    }

    #[test]
    fn test_delete_at_end_of_line_joins_next_row() {
        let mut editor = editor_with(&["abc", "def"]);
        editor.cursor = Cursor::new(0, 3);
        editor.delete_forward();

        assert_eq!(lines(&editor), ["abcdef"]);
        assert_eq!((editor.cursor.cy, editor.cursor.cx), (0, 3));
    }

    #[test]
    fn test_backspace_noops() {
        let mut editor = editor_with(&["abc"]);
        editor.delete_backward();
        assert_eq!(lines(&editor), ["abc"]);

        editor.cursor = Cursor::new(1, 0);
        editor.delete_backward();
        assert_eq!(lines(&editor), ["abc"]);
        assert_eq!(editor.buffer().dirty(), 0);
    }

    #[test]
    fn test_typing_on_virtual_row_creates_row() {
        let mut editor = editor_with(&[]);
        press(&mut editor, b"hi\rthere");
        assert_eq!(lines(&editor), ["hi", "there"]);
        assert_eq!((editor.cursor.cy, editor.cursor.cx), (1, 5));
        assert!(editor.buffer().is_modified());
    }

    #[test]
    fn test_enter_at_line_start_inserts_above() {
        let mut editor = editor_with(&["abc"]);
        press(&mut editor, b"\r");
        assert_eq!(lines(&editor), ["", "abc"]);
        assert_eq!((editor.cursor.cy, editor.cursor.cx), (1, 0));
    }

    #[test]
    fn test_enter_mid_line_splits() {
        let mut editor = editor_with(&["abcdef"]);
        editor.cursor = Cursor::new(0, 2);
        press(&mut editor, b"\r");
        assert_eq!(lines(&editor), ["ab", "cdef"]);
    }

    #[test]
    fn test_arrow_keys_and_home_end() {
        let mut editor = editor_with(&["hello", "hi"]);
        press(&mut editor, b"\x1b[F");
        assert_eq!(editor.cursor.cx, 5);
        press(&mut editor, b"\x1b[B");
        assert_eq!((editor.cursor.cy, editor.cursor.cx), (1, 2));
        press(&mut editor, b"\x1b[H\x1b[D");
        assert_eq!((editor.cursor.cy, editor.cursor.cx), (0, 5));
    }

    #[test]
    fn test_page_down_and_up() {
        let rows: Vec<String> = (0..50).map(|i| format!("line {}", i)).collect();
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        let mut editor = editor_with(&refs);
        let screen_rows = editor.viewport.screen_rows;
        assert_eq!(screen_rows, 10);

        editor.page_down();
        assert_eq!(editor.cursor.cy, 19);

        editor.viewport.row_off = 10;
        editor.page_up();
        assert_eq!(editor.cursor.cy, 0);
    }

    #[test]
    fn test_page_down_stops_at_virtual_row() {
        let mut editor = editor_with(&["a", "b"]);
        editor.page_down();
        assert_eq!(editor.cursor.cy, 2);
    }

    #[test]
    fn test_quit_requires_confirmation_when_dirty() {
        let mut editor = editor_with(&["abc"]);
        editor.insert_char(b'x');

        let quit = [ctrl(b'q')];
        assert_eq!(press(&mut editor, &quit), Flow::Continue);
        assert!(editor.status_text().contains("2 more times"));
        assert_eq!(press(&mut editor, &quit), Flow::Continue);
        assert!(editor.status_text().contains("1 more times"));
        assert_eq!(press(&mut editor, &quit), Flow::Quit);
    }

    #[test]
    fn test_other_key_resets_quit_counter() {
        let mut editor = editor_with(&["abc"]);
        editor.insert_char(b'x');

        press(&mut editor, &[ctrl(b'q')]);
        press(&mut editor, b"\x1b[C");
        assert_eq!(press(&mut editor, &[ctrl(b'q')]), Flow::Continue);
        assert!(editor.status_text().contains("2 more times"));
    }

    #[test]
    fn test_clean_document_quits_immediately() {
        let mut editor = editor_with(&["abc"]);
        assert_eq!(press(&mut editor, &[ctrl(b'q')]), Flow::Quit);
    }

    #[test]
    fn test_open_loads_clean_document() {
        let storage = MemoryStorage::with_file("notes.txt", b"one\r\ntwo\n");
        let mut editor = Editor::with_storage(
            Config::default(),
            ScreenSize::new(24, 80),
            Box::new(storage),
        );
        editor.open("notes.txt").unwrap();

        assert_eq!(lines(&editor), ["one", "two"]);
        assert_eq!(editor.buffer().dirty(), 0);
        assert_eq!(editor.buffer().filename(), Some("notes.txt"));
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let mut editor = editor_with(&["stale"]);
        editor.open("fresh.txt").unwrap();
        assert!(editor.buffer().is_empty());
        assert_eq!(editor.buffer().filename(), Some("fresh.txt"));
    }

    #[test]
    fn test_save_named_document() {
        let storage = MemoryStorage::with_file("a.txt", b"abc\n");
        let handle = storage.clone();
        let mut editor = Editor::with_storage(
            Config::default(),
            ScreenSize::new(24, 80),
            Box::new(storage),
        );
        editor.open("a.txt").unwrap();
        editor.cursor = Cursor::new(0, 3);
        editor.insert_char(b'!');

        let mut term = ScriptedTerminal::new(b"");
        editor.save(&mut term).unwrap();

        assert_eq!(handle.get("a.txt").unwrap(), b"abc!\n");
        assert_eq!(editor.buffer().dirty(), 0);
        assert_eq!(editor.status_text(), "5 bytes written to disk");
    }

    #[test]
    fn test_save_failure_is_reported() {
        let mut storage = MemoryStorage::default();
        storage.fail_saves = true;
        let mut editor = Editor::with_storage(
            Config::default(),
            ScreenSize::new(24, 80),
            Box::new(storage),
        );
        editor.buffer.set_filename("locked.txt");
        editor.insert_char(b'x');

        let mut term = ScriptedTerminal::new(b"");
        editor.save(&mut term).unwrap();

        assert!(editor.status_text().starts_with("Can't save! I/O error"));
        assert!(editor.buffer().is_modified());
    }

    #[test]
    fn test_save_as_prompt() {
        let storage = MemoryStorage::default();
        let handle = storage.clone();
        let mut editor = Editor::with_storage(
            Config::default(),
            ScreenSize::new(24, 80),
            Box::new(storage),
        );
        editor.insert_char(b'x');

        let mut term = ScriptedTerminal::new(b"out\r");
        editor.save(&mut term).unwrap();

        assert_eq!(editor.buffer().filename(), Some("out"));
        assert_eq!(handle.get("out").unwrap(), b"x\n");
        assert!(!term.frames.is_empty());
    }

    #[test]
    fn test_save_as_applies_configured_extension() {
        let storage = MemoryStorage::default();
        let handle = storage.clone();
        let mut config = Config::default();
        config.editor.save_extension = Some("txt".to_string());
        let mut editor = Editor::with_storage(config, ScreenSize::new(24, 80), Box::new(storage));

        let mut term = ScriptedTerminal::new(b"draft\r");
        editor.save(&mut term).unwrap();
        assert_eq!(editor.buffer().filename(), Some("draft.txt"));
        assert!(handle.get("draft.txt").is_some());

        editor.buffer = TextBuffer::new();
        let mut term = ScriptedTerminal::new(b"final.txt\r");
        editor.save(&mut term).unwrap();
        assert_eq!(editor.buffer().filename(), Some("final.txt"));
    }

    #[test]
    fn test_save_as_cancelled() {
        let mut editor = editor_with(&["x"]);
        let mut term = ScriptedTerminal::new(b"ab\x1b").with_timeout();
        editor.save(&mut term).unwrap();

        assert_eq!(editor.buffer().filename(), None);
        assert_eq!(editor.status_text(), "Save aborted");
    }

    #[test]
    fn test_run_clears_screen_on_quit() {
        let mut editor = editor_with(&["abc"]);
        let mut term = ScriptedTerminal::new(&[b'\x1b', b'[', b'B', ctrl(b'q')]);
        editor.run(&mut term).unwrap();

        assert_eq!(term.frames.len(), 3);
        assert_eq!(term.last_frame(), CLEAR_SCREEN);
    }

    #[test]
    fn test_run_propagates_read_errors() {
        let mut editor = editor_with(&["abc"]);
        let mut term = ScriptedTerminal::new(b"x");
        assert!(matches!(editor.run(&mut term), Err(CoreError::Io(_))));
    }
}
