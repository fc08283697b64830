// history.rs

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::HistoryError;

/// Default storage file, relative to the working directory.
pub const HISTORY_FILENAME: &str = "history.txt";

/// Evaluated expressions of this and earlier runs.
///
/// The combined log is kept in one vector, oldest first: `entries[..persisted]`
/// came from (or has been written to) the history file, the rest belongs to the
/// current session. The recall pointer counts backwards from the newest entry,
/// `-1` meaning "nothing selected".
pub struct History {
    entries: Vec<String>,
    persisted: usize,
    pointer: i64,
    path: PathBuf,
}

impl History {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            entries: Vec::new(),
            persisted: 0,
            pointer: -1,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the history file into the persisted part, in file order.
    /// A missing file means there is no history yet.
    /// Call once per store: loading twice duplicates the persisted entries.
    pub fn load(&mut self) -> Result<(), HistoryError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("no history file at {}", self.path.display());
                return Ok(());
            }
            Err(source) => {
                return Err(HistoryError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let lines = BufReader::new(file)
            .lines()
            .collect::<io::Result<Vec<String>>>()
            .map_err(|source| HistoryError::Read {
                path: self.path.clone(),
                source,
            })?;
        let loaded = lines.len();
        let session = self.entries.split_off(self.persisted);
        self.entries.extend(lines);
        self.entries.extend(session);
        self.persisted += loaded;
        info!("loaded {} history entries from {}", loaded, self.path.display());
        Ok(())
    }

    pub fn add(&mut self, entry: String) {
        self.entries.push(entry);
    }

    /// Appends the session to the history file and moves it into the persisted part.
    /// With an empty session this only makes sure the file exists.
    /// The whole session goes out in one `write_all`.
    pub fn save(&mut self) -> Result<(), HistoryError> {
        let write_err = |source| HistoryError::Write {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_err)?;
        let batch: String = self.session().iter().map(|e| format!("{}\n", e)).collect();
        file.write_all(batch.as_bytes()).map_err(write_err)?;
        info!(
            "saved {} session entries to {}",
            self.entries.len() - self.persisted,
            self.path.display()
        );
        self.persisted = self.entries.len();
        Ok(())
    }

    /// Moves the recall pointer, clamped to `[-1, len - 1]`.
    pub fn shift_pointer(&mut self, delta: i64) {
        let max = self.entries.len() as i64 - 1;
        self.pointer = self.pointer.saturating_add(delta).clamp(-1, max.max(-1));
        debug!("history pointer at {}", self.pointer);
    }

    pub fn pointer(&self) -> i64 {
        self.pointer
    }

    /// Entry under the recall pointer, or `""` when nothing is selected.
    pub fn current(&self) -> &str {
        if self.pointer < 0 {
            return "";
        }
        usize::try_from(self.entries.len() as i64 - 1 - self.pointer)
            .ok()
            .and_then(|idx| self.entries.get(idx))
            .map_or("", String::as_str)
    }

    /// The last `n` entries of the combined log, oldest first.
    pub fn recent(&self, n: i64) -> &[String] {
        let total = self.entries.len();
        let n = n.clamp(0, total as i64) as usize;
        &self.entries[total - n..]
    }

    pub fn persisted(&self) -> &[String] {
        &self.entries[..self.persisted]
    }

    pub fn session(&self) -> &[String] {
        &self.entries[self.persisted..]
    }

    pub fn all(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops the session; persisted entries and the file are left alone.
    pub fn clear_session(&mut self) {
        self.entries.truncate(self.persisted);
        self.pointer = -1;
    }

    /// Drops everything, on disk and in memory. Memory is only touched once
    /// the file has been truncated.
    pub fn clear_all(&mut self) -> Result<(), HistoryError> {
        File::create(&self.path).map_err(|source| HistoryError::Clear {
            path: self.path.clone(),
            source,
        })?;
        self.entries.clear();
        self.persisted = 0;
        self.pointer = -1;
        info!("cleared history file {}", self.path.display());
        Ok(())
    }
}
