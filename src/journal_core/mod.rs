//! Core journal functionality without I/O operations.
//!
//! This module contains the data model shared by the history, rendering and
//! storage layers, plus the pure date logic: strict parsing of the single-date
//! argument, journal filenames, and collapsing per-commit dates into the set of
//! days that need a journal.

use crate::constants;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fmt;

pub mod diff;
pub mod render;
pub mod structural;

pub use diff::diff_for;
pub use render::JournalRenderer;
pub use structural::{is_structural, LayerNamingRule, StructuralRule};

/// The kind of change a commit made to one path.
///
/// Only the five codes a journal lists are modelled; copies, unmerged and
/// unknown status lines are dropped when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed,
    Typechange,
}

impl ChangeKind {
    /// Parses a name-status code such as `M` or `R100`.
    ///
    /// # Examples
    ///
    /// ```
    /// use daybook::journal_core::ChangeKind;
    ///
    /// assert_eq!(ChangeKind::from_status_code("M"), Some(ChangeKind::Modified));
    /// assert_eq!(ChangeKind::from_status_code("R086"), Some(ChangeKind::Renamed));
    /// assert_eq!(ChangeKind::from_status_code("C100"), None);
    /// ```
    pub fn from_status_code(code: &str) -> Option<Self> {
        match code.chars().next()? {
            'A' => Some(ChangeKind::Added),
            'M' => Some(ChangeKind::Modified),
            'D' => Some(ChangeKind::Deleted),
            'R' => Some(ChangeKind::Renamed),
            'T' => Some(ChangeKind::Typechange),
            _ => None,
        }
    }

    /// The single-letter code used in rendered journals.
    pub fn code(self) -> char {
        match self {
            ChangeKind::Added => 'A',
            ChangeKind::Modified => 'M',
            ChangeKind::Deleted => 'D',
            ChangeKind::Renamed => 'R',
            ChangeKind::Typechange => 'T',
        }
    }
}

/// One entry of a commit's file-status listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedPath {
    pub kind: ChangeKind,
    /// The path after the change.
    pub path: String,
    /// The path before a rename.
    pub source_path: Option<String>,
}

impl ChangedPath {
    pub fn new(kind: ChangeKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            source_path: None,
        }
    }

    pub fn renamed(source_path: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Renamed,
            path: path.into(),
            source_path: Some(source_path.into()),
        }
    }
}

impl fmt::Display for ChangedPath {
    /// Renders as `statusCode path`, or `R old -> new` for renames.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source_path {
            Some(source) => write!(f, "{} {} -> {}", self.kind.code(), source, self.path),
            None => write!(f, "{} {}", self.kind.code(), self.path),
        }
    }
}

/// Subject and body of a commit message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitMessage {
    pub subject: String,
    pub body: String,
}

impl CommitMessage {
    /// Splits raw message text into subject (first line) and body (the rest, trimmed).
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let (subject, body) = raw.split_once('\n').unwrap_or((raw, ""));
        Self {
            subject: subject.trim_end().to_string(),
            body: body.trim().to_string(),
        }
    }

    /// The full message: subject, then the body after a line break when present.
    pub fn full_text(&self) -> String {
        if self.body.is_empty() {
            self.subject.clone()
        } else {
            format!("{}\n{}", self.subject, self.body)
        }
    }
}

/// Everything a journal shows about one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    pub message: CommitMessage,
    pub changed_paths: Vec<ChangedPath>,
    /// Full diff, or the fallback summary when the diff could not be loaded.
    pub diff_text: String,
}

/// The commits of one calendar day, in history order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub commits: Vec<CommitRecord>,
}

/// A fully rendered journal, ready to be persisted in one write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalDocument {
    pub date: NaiveDate,
    pub markdown: String,
}

/// Collapses per-commit dates into the days that have commits.
pub struct DateGrouper;

impl DateGrouper {
    /// Returns each date once, keeping the order of first occurrence.
    ///
    /// # Examples
    ///
    /// ```
    /// use daybook::journal_core::DateGrouper;
    /// use chrono::NaiveDate;
    ///
    /// let d1 = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    /// let d2 = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
    ///
    /// assert_eq!(DateGrouper::distinct(vec![d1, d1, d2, d1]), vec![d1, d2]);
    /// ```
    pub fn distinct<I>(dates: I) -> Vec<NaiveDate>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut seen = HashSet::new();
        dates.into_iter().filter(|date| seen.insert(*date)).collect()
    }
}

/// Parses the single-date argument, which must be exactly `YYYY-MM-DD`.
///
/// The shape is checked before the calendar, so `2024-3-1` and `20240301`
/// are rejected just like `2024-13-40`.
///
/// # Errors
///
/// Returns `AppError::InvalidDate` for any other shape or an impossible date.
///
/// # Examples
///
/// ```
/// use daybook::journal_core::parse_journal_date;
///
/// assert!(parse_journal_date("2024-03-01").is_ok());
/// assert!(parse_journal_date("2024-13-40").is_err());
/// assert!(parse_journal_date("2024-3-1").is_err());
/// ```
pub fn parse_journal_date(input: &str) -> AppResult<NaiveDate> {
    let well_formed = input.len() == 10
        && input.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(AppError::InvalidDate(format!(
            "'{}' is not in YYYY-MM-DD format",
            input
        )));
    }

    NaiveDate::parse_from_str(input, constants::DATE_FORMAT_ISO).map_err(|e| {
        AppError::InvalidDate(format!("'{}' is not a calendar date: {}", input, e))
    })
}

/// The journal filename for a date, `YYYYMMDD.md`.
pub fn journal_file_name(date: NaiveDate) -> String {
    format!(
        "{}{}",
        date.format(constants::DATE_FORMAT_COMPACT),
        constants::JOURNAL_FILE_EXTENSION
    )
}

/// Recovers the date from a journal filename, if it is one.
pub fn date_from_file_name(name: &str) -> Option<NaiveDate> {
    let stem = name.strip_suffix(constants::JOURNAL_FILE_EXTENSION)?;
    if stem.len() != 8 || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(stem, constants::DATE_FORMAT_COMPACT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_journal_date_valid() {
        assert_eq!(parse_journal_date("2024-03-01").unwrap(), date(2024, 3, 1));
        assert_eq!(parse_journal_date("2024-02-29").unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_parse_journal_date_rejects_impossible_dates() {
        for input in ["2024-13-40", "2023-02-29", "2024-00-10", "2024-04-31"] {
            match parse_journal_date(input) {
                Err(AppError::InvalidDate(msg)) => {
                    assert!(msg.contains(input));
                    assert!(msg.contains("calendar date"));
                }
                other => panic!("Expected InvalidDate for {}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_parse_journal_date_rejects_other_formats() {
        for input in [
            "20240301",
            "2024-3-1",
            "2024/03/01",
            " 2024-03-01",
            "2024-03-01T00:00",
            "not-a-date",
            "",
            "２０２４-03-01",
        ] {
            match parse_journal_date(input) {
                Err(AppError::InvalidDate(msg)) => assert!(msg.contains("YYYY-MM-DD")),
                other => panic!("Expected format error for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_journal_file_name_round_trip() {
        let d = date(2024, 3, 1);
        assert_eq!(journal_file_name(d), "20240301.md");
        assert_eq!(date_from_file_name("20240301.md"), Some(d));
    }

    #[test]
    fn test_date_from_file_name_ignores_other_files() {
        assert_eq!(date_from_file_name("README.md"), None);
        assert_eq!(date_from_file_name("20240301.txt"), None);
        assert_eq!(date_from_file_name("20241340.md"), None);
        assert_eq!(date_from_file_name("2024030.md"), None);
        assert_eq!(date_from_file_name(".daybook-abc.md"), None);
    }

    #[test]
    fn test_distinct_dates_preserves_first_occurrence() {
        let dates = vec![
            date(2024, 3, 1),
            date(2024, 3, 1),
            date(2024, 2, 28),
            date(2024, 3, 2),
            date(2024, 2, 28),
        ];
        assert_eq!(
            DateGrouper::distinct(dates),
            vec![date(2024, 3, 1), date(2024, 2, 28), date(2024, 3, 2)]
        );
        assert!(DateGrouper::distinct(Vec::new()).is_empty());
    }

    #[test]
    fn test_commit_message_parse() {
        let message = CommitMessage::parse("Add login form\n\nWires the form to the session.\n\n");
        assert_eq!(message.subject, "Add login form");
        assert_eq!(message.body, "Wires the form to the session.");
        assert_eq!(
            message.full_text(),
            "Add login form\nWires the form to the session."
        );

        let message = CommitMessage::parse("Fix typo\n");
        assert_eq!(message.subject, "Fix typo");
        assert!(message.body.is_empty());
        assert_eq!(message.full_text(), "Fix typo");
    }

    #[test]
    fn test_changed_path_display() {
        assert_eq!(
            ChangedPath::new(ChangeKind::Modified, "README.md").to_string(),
            "M README.md"
        );
        assert_eq!(
            ChangedPath::renamed("docs/old.md", "docs/new.md").to_string(),
            "R docs/old.md -> docs/new.md"
        );
        assert_eq!(
            ChangedPath::new(ChangeKind::Typechange, "bin/run").to_string(),
            "T bin/run"
        );
    }
}
