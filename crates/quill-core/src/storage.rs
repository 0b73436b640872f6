//! Loading and saving documents.
//!
//! The editor talks to a [`Storage`] rather than to the file system so
//! that the save and load paths can be exercised without touching disk.

use std::fs::OpenOptions;
use std::io::{self, Write};

/// Persistence collaborator.
pub trait Storage {
    /// Reads a document as a list of lines without their terminators.
    fn load(&self, name: &str) -> io::Result<Vec<Vec<u8>>>;

    /// Replaces the document's contents with `bytes`.
    fn save(&mut self, name: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Storage on the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStorage;

impl Storage for FileStorage {
    fn load(&self, name: &str) -> io::Result<Vec<Vec<u8>>> {
        let contents = std::fs::read(name)?;
        Ok(split_lines(&contents))
    }

    /// Rewrites the named file in place. The file keeps its inode, so its
    /// permissions and any symlink pointing at it survive the save.
    fn save(&mut self, name: &str, bytes: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(name)?;
        file.write_all(bytes)?;
        file.set_len(bytes.len() as u64)?;
        file.sync_all()
    }
}

/// Splits file contents into lines.
///
/// Trailing `\n` and `\r` bytes are stripped from each line. A final line
/// terminator does not start an extra empty line.
pub fn split_lines(contents: &[u8]) -> Vec<Vec<u8>> {
    if contents.is_empty() {
        return Vec::new();
    }
    let body = contents.strip_suffix(b"\n").unwrap_or(contents);
    body.split(|&b| b == b'\n')
        .map(|line| {
            let end = line
                .iter()
                .rposition(|&b| b != b'\r')
                .map_or(0, |i| i + 1);
            line[..end].to_vec()
        })
        .collect()
}
