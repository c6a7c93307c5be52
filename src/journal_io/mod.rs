//! Journal I/O operations and file management.
//!
//! This module owns the journal directory: it is the only code that creates,
//! replaces or enumerates journal documents. Documents are written to a
//! temporary file in the same directory and renamed into place, so an
//! interrupted run never leaves a half-written journal behind.

use crate::constants;
use crate::errors::{AppError, AppResult};
use crate::journal_core::{date_from_file_name, journal_file_name, JournalDocument};
use chrono::NaiveDate;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::Builder;
use tracing::debug;
use walkdir::WalkDir;

/// Result of a write request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The document was persisted at this path.
    Written(PathBuf),
    /// `overwrite` was false and a journal already existed at this path.
    AlreadyExists(PathBuf),
}

/// The directory of `YYYYMMDD.md` journal documents.
#[derive(Debug, Clone)]
pub struct JournalStore {
    dir: PathBuf,
}

impl JournalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the journal directory and any missing parents.
    ///
    /// Calling this on an existing directory is not an error.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the directory cannot be created.
    pub fn ensure_dir(&self) -> AppResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::Io(io::Error::new(
                e.kind(),
                format!(
                    "Failed to create journal directory {}: {}",
                    self.dir.display(),
                    e
                ),
            ))
        })
    }

    /// The path a date's journal is stored at.
    pub fn entry_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(journal_file_name(date))
    }

    pub fn exists(&self, date: NaiveDate) -> bool {
        self.entry_path(date).exists()
    }

    /// Persists `markdown` as the journal for `date`.
    ///
    /// With `overwrite` false an existing journal is left untouched and
    /// `WriteOutcome::AlreadyExists` is returned; with `overwrite` true it is
    /// replaced. The journal directory is created if needed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` naming the date if any filesystem step fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use daybook::journal_io::{JournalStore, WriteOutcome};
    /// use chrono::NaiveDate;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let store = JournalStore::new(dir.path().join("docs/journal"));
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    ///
    /// let first = store.write(date, "# first\n", false).unwrap();
    /// assert!(matches!(first, WriteOutcome::Written(_)));
    ///
    /// let second = store.write(date, "# second\n", false).unwrap();
    /// assert!(matches!(second, WriteOutcome::AlreadyExists(_)));
    /// ```
    pub fn write(&self, date: NaiveDate, markdown: &str, overwrite: bool) -> AppResult<WriteOutcome> {
        let path = self.entry_path(date);

        if !overwrite && path.exists() {
            debug!(%date, path = %path.display(), "Journal exists, not overwriting");
            return Ok(WriteOutcome::AlreadyExists(path));
        }

        self.ensure_dir()?;

        let store_err = |source: io::Error| AppError::Store { date, source };

        let mut temp = Builder::new()
            .prefix(constants::TEMP_FILE_PREFIX)
            .suffix(constants::JOURNAL_FILE_EXTENSION)
            .tempfile_in(&self.dir)
            .map_err(store_err)?;
        temp.write_all(markdown.as_bytes()).map_err(store_err)?;
        temp.as_file().sync_all().map_err(store_err)?;

        // Temp files are created owner-only; journals are ordinary project files.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            temp.as_file()
                .set_permissions(fs::Permissions::from_mode(
                    constants::JOURNAL_FILE_PERMISSIONS,
                ))
                .map_err(store_err)?;
        }

        if overwrite {
            temp.persist(&path).map_err(|e| store_err(e.error))?;
        } else {
            match temp.persist_noclobber(&path) {
                Ok(_) => {}
                Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                    debug!(%date, "Journal appeared while writing, keeping existing file");
                    return Ok(WriteOutcome::AlreadyExists(path));
                }
                Err(e) => return Err(store_err(e.error)),
            }
        }

        Ok(WriteOutcome::Written(path))
    }

    /// Persists a rendered document.
    pub fn write_document(
        &self,
        document: &JournalDocument,
        overwrite: bool,
    ) -> AppResult<WriteOutcome> {
        self.write(document.date, &document.markdown, overwrite)
    }

    /// Lists existing journals, oldest first. Other files in the directory are ignored.
    ///
    /// A missing directory simply has no journals.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the directory exists but cannot be read.
    pub fn list_entries(&self) -> AppResult<Vec<(NaiveDate, PathBuf)>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                AppError::Io(io::Error::other(format!(
                    "Failed to read journal directory: {}",
                    e
                )))
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            if let Some(date) = entry.file_name().to_str().and_then(date_from_file_name) {
                entries.push((date, entry.into_path()));
            }
        }

        entries.sort_by_key(|(date, _)| *date);
        Ok(entries)
    }
}
