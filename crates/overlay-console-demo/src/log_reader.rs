//! File Log Reader
//!
//! Tails a log file and hands out complete lines as they are appended.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::PathBuf;

/// Reads log file with tailing support
pub struct FileLogReader {
    path: PathBuf,
    last_position: u64,
    /// Bytes after the last newline, waiting for the rest of their line
    pending: Vec<u8>,
    max_lines: usize,
}

impl FileLogReader {
    /// Create a new log reader
    ///
    /// # Arguments
    /// * `path` - Path to the log file
    /// * `max_lines` - Maximum number of lines returned by one poll
    pub fn new(path: PathBuf, max_lines: usize) -> Self {
        Self {
            path,
            last_position: 0,
            pending: Vec::new(),
            max_lines,
        }
    }

    /// Poll for new lines (non-blocking)
    ///
    /// Returns the complete lines appended since the last poll. When more than
    /// `max_lines` arrived, only the newest are returned. A file that shrank
    /// is read again from the start.
    pub fn poll_new_lines(&mut self) -> io::Result<Vec<String>> {
        let mut file = File::open(&self.path)?;
        let current_size = file.metadata()?.len();

        if current_size < self.last_position {
            log::debug!("{} was truncated, reading from the start", self.path.display());
            self.last_position = 0;
            self.pending.clear();
        }

        if current_size == self.last_position {
            return Ok(Vec::new());
        }

        file.seek(SeekFrom::Start(self.last_position))?;
        file.take(current_size - self.last_position)
            .read_to_end(&mut self.pending)?;
        self.last_position = current_size;

        let mut lines = Vec::new();
        while let Some(end) = self.pending.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.pending.drain(..=end).collect();
            let line = String::from_utf8_lossy(&raw);
            lines.push(line.trim_end_matches(['\r', '\n']).to_string());
        }

        if lines.len() > self.max_lines {
            lines.drain(..lines.len() - self.max_lines);
        }

        Ok(lines)
    }
}
