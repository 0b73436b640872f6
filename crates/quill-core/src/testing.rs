//! In-memory stand-ins for the terminal and the file system.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::rc::Rc;

use crate::storage::Storage;
use crate::terminal::Terminal;

/// A terminal fed from a script of bytes and timeouts.
///
/// Once the script runs out every read fails, which ends any loop
/// still waiting for input.
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    input: VecDeque<Option<u8>>,
    pub frames: Vec<Vec<u8>>,
}

impl ScriptedTerminal {
    pub fn new(bytes: &[u8]) -> Self {
        let mut term = Self::default();
        term.push_bytes(bytes);
        term
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied().map(Some));
    }

    /// Queues one read that times out.
    pub fn with_timeout(mut self) -> Self {
        self.input.push_back(None);
        self
    }

    pub fn last_frame(&self) -> &[u8] {
        self.frames.last().map(Vec::as_slice).unwrap_or_default()
    }
}

impl Terminal for ScriptedTerminal {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        self.input
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        self.frames.push(frame.to_vec());
        Ok(())
    }
}

/// Storage backed by a shared map of file names to contents.
///
/// Clones share the same map, so a test can keep a handle and inspect
/// what the editor saved.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    files: Rc<RefCell<HashMap<String, Vec<u8>>>>,
    pub fail_saves: bool,
}

impl MemoryStorage {
    pub fn with_file(name: &str, contents: &[u8]) -> Self {
        let storage = Self::default();
        storage.insert(name, contents);
        storage
    }

    pub fn insert(&self, name: &str, contents: &[u8]) {
        self.files
            .borrow_mut()
            .insert(name.to_string(), contents.to_vec());
    }

    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(name).cloned()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, name: &str) -> io::Result<Vec<Vec<u8>>> {
        let contents = self
            .get(name)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        Ok(crate::storage::split_lines(&contents))
    }

    fn save(&mut self, name: &str, bytes: &[u8]) -> io::Result<()> {
        if self.fail_saves {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        self.insert(name, bytes);
        Ok(())
    }
}
