//! Markdown rendering of a day's commits.

use super::structural::{is_structural, StructuralRule};
use super::{CommitRecord, DayBucket, JournalDocument};
use crate::constants;
use std::fmt::Write;

const DIAGRAM_PLACEHOLDER: &str = "@startuml
' Add a diagram of the structural change introduced by this commit
' Example:
' class NewClass
' class ExistingClass
' NewClass --> ExistingClass
@enduml";

/// Renders one journal document per day. Rendering is pure: same bucket, same text.
pub struct JournalRenderer<'a> {
    rule: &'a dyn StructuralRule,
}

impl<'a> JournalRenderer<'a> {
    pub fn new(rule: &'a dyn StructuralRule) -> Self {
        Self { rule }
    }

    pub fn document(&self, bucket: &DayBucket) -> JournalDocument {
        JournalDocument {
            date: bucket.date,
            markdown: self.render(bucket),
        }
    }

    /// Renders the title, the summary line and every commit in bucket order.
    ///
    /// # Examples
    ///
    /// ```
    /// use daybook::journal_core::{DayBucket, JournalRenderer, LayerNamingRule};
    /// use chrono::NaiveDate;
    ///
    /// let rule = LayerNamingRule::default();
    /// let renderer = JournalRenderer::new(&rule);
    /// let bucket = DayBucket {
    ///     date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    ///     commits: Vec::new(),
    /// };
    ///
    /// assert!(renderer.render(&bucket).starts_with("# Work log 2024-03-01\n"));
    /// ```
    pub fn render(&self, bucket: &DayBucket) -> String {
        let date = bucket.date.format(constants::DATE_FORMAT_ISO).to_string();
        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "# Work log {date}\n\n## Summary\n\nThis document summarizes the work done on {date}.\n\n"
        );

        for commit in &bucket.commits {
            self.render_commit(&mut out, commit);
        }

        out
    }

    fn render_commit(&self, out: &mut String, commit: &CommitRecord) {
        let _ = write!(out, "## Commit: {}\n\n", commit.hash);

        out.push_str("### Message\n\n");
        push_fenced(out, "", &commit.message.full_text());

        out.push_str("### Changed files\n\n");
        for change in &commit.changed_paths {
            let _ = writeln!(out, "- {}", change);
        }
        out.push('\n');

        out.push_str("### Changes\n\n");
        push_fenced(out, "diff", commit.diff_text.trim_end_matches('\n'));

        if is_structural(self.rule, &commit.changed_paths) {
            out.push_str("### Structural changes\n\n");
            push_fenced(out, "plantuml", DIAGRAM_PLACEHOLDER);
        }
    }
}

/// Appends a fenced block whose fence is longer than any backtick run in `body`.
fn push_fenced(out: &mut String, info: &str, body: &str) {
    let fence = "`".repeat(longest_backtick_run(body).max(2) + 1);
    let _ = write!(out, "{fence}{info}\n{body}\n{fence}\n\n");
}

fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for ch in text.chars() {
        if ch == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
