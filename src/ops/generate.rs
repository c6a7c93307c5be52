//! Journal generation for one date or for the whole history.
//!
//! # Flow
//!
//! 1. Enumerate dates (all-history) or take the requested date
//! 2. Skip dates that already have a journal (all-history only)
//! 3. Collect the day's commits: message, changed paths, diff
//! 4. Render the document in memory
//! 5. Persist it in a single write
//!
//! Any error other than a diff failure aborts the run. Diff failures are
//! absorbed by the summary fallback in [`diff_for`].

use crate::errors::AppResult;
use crate::history::HistorySource;
use crate::journal_core::{
    diff_for, CommitRecord, DateGrouper, DayBucket, JournalRenderer, StructuralRule,
};
use crate::journal_io::{JournalStore, WriteOutcome};
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{debug, info};

/// What happened to a single date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayOutcome {
    /// A journal was written at this path.
    Written(PathBuf),
    /// A journal already existed at this path and was kept.
    Skipped(PathBuf),
    /// The history has no commits on this date; nothing was written.
    NoCommits,
}

/// Summary of an all-history run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub written: Vec<NaiveDate>,
    pub skipped: Vec<NaiveDate>,
    pub empty: Vec<NaiveDate>,
}

/// Ties history, rendering and storage together.
pub struct JournalGenerator<'a> {
    history: &'a dyn HistorySource,
    store: &'a JournalStore,
    renderer: JournalRenderer<'a>,
}

impl<'a> JournalGenerator<'a> {
    pub fn new(
        history: &'a dyn HistorySource,
        store: &'a JournalStore,
        rule: &'a dyn StructuralRule,
    ) -> Self {
        Self {
            history,
            store,
            renderer: JournalRenderer::new(rule),
        }
    }

    /// Generates the journal for one date, replacing any existing file.
    ///
    /// # Errors
    ///
    /// - `AppError::History` if the history cannot be queried
    /// - `AppError::Store` if the journal cannot be written
    pub fn generate_for_date(&self, date: NaiveDate) -> AppResult<DayOutcome> {
        self.store.ensure_dir()?;
        self.generate_day(date, true)
    }

    /// Generates journals for every date in the history that does not have one yet.
    ///
    /// Existing journals are never modified. The run stops at the first failing date.
    ///
    /// # Errors
    ///
    /// - `AppError::History` if the history cannot be queried
    /// - `AppError::Store` naming the date whose journal could not be written
    pub fn generate_all(&self) -> AppResult<GenerationReport> {
        let dates = DateGrouper::distinct(self.history.commit_dates()?);
        info!(dates = dates.len(), "Enumerated commit dates");

        self.store.ensure_dir()?;

        let mut report = GenerationReport::default();
        for date in dates {
            if self.store.exists(date) {
                info!(%date, "Journal already exists, skipping");
                report.skipped.push(date);
                continue;
            }

            match self.generate_day(date, false)? {
                DayOutcome::Written(_) => report.written.push(date),
                DayOutcome::Skipped(_) => report.skipped.push(date),
                DayOutcome::NoCommits => report.empty.push(date),
            }
        }

        info!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            empty = report.empty.len(),
            "Journal generation completed"
        );
        Ok(report)
    }

    /// Collects the commits of `date` in history order. `None` when there are none.
    pub fn collect_day(&self, date: NaiveDate) -> AppResult<Option<DayBucket>> {
        let hashes = self.history.commits_in_range(date, date)?;
        if hashes.is_empty() {
            return Ok(None);
        }

        let commits = hashes
            .iter()
            .map(|hash| self.commit_record(hash))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Some(DayBucket { date, commits }))
    }

    fn generate_day(&self, date: NaiveDate, overwrite: bool) -> AppResult<DayOutcome> {
        let Some(bucket) = self.collect_day(date)? else {
            info!(%date, "No commits found");
            return Ok(DayOutcome::NoCommits);
        };

        let document = self.renderer.document(&bucket);
        match self.store.write_document(&document, overwrite)? {
            WriteOutcome::Written(path) => {
                info!(%date, commits = bucket.commits.len(), path = %path.display(), "Created journal entry");
                Ok(DayOutcome::Written(path))
            }
            WriteOutcome::AlreadyExists(path) => Ok(DayOutcome::Skipped(path)),
        }
    }

    fn commit_record(&self, hash: &str) -> AppResult<CommitRecord> {
        debug!(%hash, "Collecting commit");
        let message = self.history.metadata(hash)?;
        let changed_paths = self.history.changed_paths(hash)?;
        let diff_text = diff_for(self.history, hash);

        Ok(CommitRecord {
            hash: hash.to_string(),
            message,
            changed_paths,
            diff_text,
        })
    }
}
