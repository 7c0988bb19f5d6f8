//! Table file persistence.
//!
//! One [`TableFile`] owns the path of a single entity's table and knows how
//! to load, append to, and atomically rewrite it. The handle itself holds
//! no file descriptor or cached state; every operation opens the file
//! afresh, so handles are cheap and the caller's lock is the only
//! synchronization that matters.

use std::fmt::Write as _;
use std::fs;
use std::io::{ErrorKind, Write as _};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use marquee_core::FIELD_SEPARATOR;

use crate::error::{Result, StoreError};
use crate::Record;

/// File-backed table store for one record type.
pub struct TableFile<R> {
    path: PathBuf,
    _record: PhantomData<R>,
}

impl<R: Record> TableFile<R> {
    /// Open a table file, creating it with its header when missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the file cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let table = Self {
            path: path.as_ref().to_path_buf(),
            _record: PhantomData,
        };
        table.ensure_exists()?;
        Ok(table)
    }

    /// The path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full ordered record set.
    ///
    /// Blank lines and rows that fail to decode are skipped with a warning;
    /// a missing file is recreated with its header and reads as empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] on any read failure other than a missing
    /// file.
    pub fn load(&self) -> Result<Vec<R>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                self.ensure_exists()?;
                return Ok(Vec::new());
            }
            Err(source) => return Err(StoreError::io(&self.path, source)),
        };

        let mut records = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            if index == 0 || line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
            match R::from_fields(&fields) {
                Some(record) => records.push(record),
                None => {
                    tracing::warn!(
                        table = R::TABLE,
                        line = index + 1,
                        "skipping malformed row"
                    );
                }
            }
        }
        Ok(records)
    }

    /// Append one record to the table.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the medium is unwritable.
    pub fn append(&self, record: &R) -> Result<()> {
        self.ensure_exists()?;
        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        writeln!(file, "{}", encode_row(record)).map_err(|e| StoreError::io(&self.path, e))
    }

    /// Atomically rewrite the entire table.
    ///
    /// This is the unit of consistency for updates and deletes: callers
    /// read, modify in memory, and replace under their store lock.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the rewrite fails; the previous
    /// contents stay in place in that case.
    pub fn replace_all(&self, records: &[R]) -> Result<()> {
        let mut contents = String::from(R::HEADER);
        contents.push('\n');
        for record in records {
            let _ = writeln!(contents, "{}", encode_row(record));
        }
        self.persist(&contents)
    }

    /// Write contents to a sibling temp file, then rename over the table.
    fn persist(&self, contents: &str) -> Result<()> {
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))
    }

    fn ensure_exists(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        let mut header = String::from(R::HEADER);
        header.push('\n');
        fs::write(&self.path, header).map_err(|e| StoreError::io(&self.path, e))
    }
}

fn encode_row<R: Record>(record: &R) -> String {
    record.to_fields().join(&FIELD_SEPARATOR.to_string())
}
