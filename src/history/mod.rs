//! Version-control history queries.
//!
//! `HistorySource` is the read-only interface the generator needs from a
//! repository. `GitHistory` implements it by running `git` through a
//! [`CommandRunner`]; tests substitute in-memory sources.

use crate::config::Config;
use crate::constants;
use crate::errors::{HistoryError, HistoryResult};
use crate::journal_core::{ChangeKind, ChangedPath, CommitMessage};
use chrono::NaiveDate;
use std::cell::OnceCell;
use std::time::Duration;
use tracing::debug;

pub mod runner;

pub use runner::CommandRunner;

/// Read-only queries against a repository's history.
pub trait HistorySource {
    /// One date per commit, oldest commit first.
    fn commit_dates(&self) -> HistoryResult<Vec<NaiveDate>>;

    /// Hashes of commits dated within `[start, end]`, oldest first.
    fn commits_in_range(&self, start: NaiveDate, end: NaiveDate) -> HistoryResult<Vec<String>>;

    fn metadata(&self, hash: &str) -> HistoryResult<CommitMessage>;

    fn changed_paths(&self, hash: &str) -> HistoryResult<Vec<ChangedPath>>;

    /// The complete textual diff of a commit.
    fn full_diff(&self, hash: &str) -> HistoryResult<String>;

    /// A per-file insertion/deletion summary of a commit.
    fn stat_summary(&self, hash: &str) -> HistoryResult<String>;
}

/// `HistorySource` backed by the git command line.
///
/// The commit listing is read once and reused for every date query.
#[derive(Debug, Clone)]
pub struct GitHistory {
    runner: CommandRunner,
    diff_timeout: Option<Duration>,
    dated: OnceCell<Vec<(String, NaiveDate)>>,
}

impl GitHistory {
    pub fn new(runner: CommandRunner) -> Self {
        Self {
            runner,
            diff_timeout: None,
            dated: OnceCell::new(),
        }
    }

    /// Builds the runner from configuration: binary, repository, environment and ceiling.
    pub fn from_config(config: &Config) -> Self {
        let runner = CommandRunner::new(config.git_command.clone(), config.repo_dir.clone())
            .with_unset_env(config.git_unset_env.clone())
            .with_max_output_bytes(config.max_output_bytes);
        Self::new(runner).with_diff_timeout(config.diff_timeout)
    }

    /// Bounds full-diff retrieval; other queries are never timed out.
    pub fn with_diff_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.diff_timeout = timeout;
        self
    }

    /// Every commit as `(short hash, author date)`, oldest first.
    fn dated_commits(&self) -> HistoryResult<&[(String, NaiveDate)]> {
        if let Some(commits) = self.dated.get() {
            return Ok(commits.as_slice());
        }
        let commits = self.load_dated_commits()?;
        Ok(self.dated.get_or_init(|| commits).as_slice())
    }

    fn load_dated_commits(&self) -> HistoryResult<Vec<(String, NaiveDate)>> {
        let output = match self.runner.run(&[
            "log",
            "--reverse",
            "--format=%h%x09%ad",
            "--date=short",
        ]) {
            Ok(output) => output,
            Err(HistoryError::CommandFailed { stderr, .. })
                if stderr.contains(constants::GIT_NO_COMMITS_YET) =>
            {
                debug!("Repository has no commits yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };
        parse_dated_log(&output)
    }

    /// Runs `git show` with path quoting off, so non-ASCII paths come back verbatim.
    fn show(&self, args: &[&str], timeout: Option<Duration>) -> HistoryResult<String> {
        let mut full = vec!["-c", "core.quotePath=false", "show"];
        full.extend_from_slice(args);
        self.runner.run_with_timeout(&full, timeout)
    }
}

impl HistorySource for GitHistory {
    fn commit_dates(&self) -> HistoryResult<Vec<NaiveDate>> {
        Ok(self.dated_commits()?.iter().map(|(_, date)| *date).collect())
    }

    fn commits_in_range(&self, start: NaiveDate, end: NaiveDate) -> HistoryResult<Vec<String>> {
        let hashes: Vec<String> = self
            .dated_commits()?
            .iter()
            .filter(|(_, date)| (start..=end).contains(date))
            .map(|(hash, _)| hash.clone())
            .collect();
        debug!(%start, %end, count = hashes.len(), "Selected commits in range");
        Ok(hashes)
    }

    fn metadata(&self, hash: &str) -> HistoryResult<CommitMessage> {
        let output = self.show(&["-s", "--format=%s%n%b", hash], None)?;
        Ok(CommitMessage::parse(&output))
    }

    fn changed_paths(&self, hash: &str) -> HistoryResult<Vec<ChangedPath>> {
        let output = self.show(&["--name-status", "-z", "--format=", hash], None)?;
        Ok(parse_name_status(&output))
    }

    fn full_diff(&self, hash: &str) -> HistoryResult<String> {
        self.show(
            &["--color=never", "--no-ext-diff", "--format=", hash],
            self.diff_timeout,
        )
    }

    fn stat_summary(&self, hash: &str) -> HistoryResult<String> {
        self.show(&["--stat", "--oneline", "--color=never", hash], None)
    }
}

/// Parses `hash<TAB>YYYY-MM-DD` lines.
fn parse_dated_log(output: &str) -> HistoryResult<Vec<(String, NaiveDate)>> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (hash, date) = line.split_once('\t').ok_or_else(|| malformed(line))?;
            let date = NaiveDate::parse_from_str(date.trim(), constants::DATE_FORMAT_ISO)
                .map_err(|_| malformed(line))?;
            Ok((hash.trim().to_string(), date))
        })
        .collect()
}

fn malformed(line: &str) -> HistoryError {
    HistoryError::CommandFailed {
        command: "git log".to_string(),
        exit_code: 0,
        stderr: format!("unexpected log line: {:?}", line),
    }
}

/// Parses `git show --name-status -z` output, keeping only `A M D R T` entries in order.
///
/// Fields are NUL-separated: a status, then one path, or two paths for
/// renames and copies (`R086\0old\0new\0`). Paths are taken verbatim, so tabs,
/// quotes and non-ASCII characters survive.
pub fn parse_name_status(output: &str) -> Vec<ChangedPath> {
    let mut fields = output.split('\0');
    let mut changes = Vec::new();

    while let Some(field) = fields.next() {
        let code = field.trim();
        if code.is_empty() {
            continue;
        }

        let two_paths = code.starts_with('R') || code.starts_with('C');
        let Some(first) = fields.next() else { break };
        let second = if two_paths { fields.next() } else { None };

        match (ChangeKind::from_status_code(code), second) {
            (Some(ChangeKind::Renamed), Some(second)) => {
                changes.push(ChangedPath::renamed(first, second))
            }
            (Some(kind), _) => changes.push(ChangedPath::new(kind, first)),
            (None, _) => debug!(status = code, path = first, "Ignoring change status"),
        }
    }

    changes
}
