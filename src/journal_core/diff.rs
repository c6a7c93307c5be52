//! Diff extraction with graceful degradation.
//!
//! Oversized, slow or failing diffs must not sink a whole day's journal, so the
//! full diff is replaced by a stat summary behind an explicit marker.

use crate::constants::DIFF_FALLBACK_MARKER;
use crate::history::HistorySource;
use tracing::warn;

/// Returns the full diff for `hash`, or a marked summary if it cannot be loaded.
///
/// Never fails: if even the summary is unavailable, the marker is followed by a
/// note naming the error.
pub fn diff_for(history: &dyn HistorySource, hash: &str) -> String {
    let error = match history.full_diff(hash) {
        Ok(diff) => return diff,
        Err(e) => e,
    };

    warn!(%hash, error = %error, "Full diff unavailable, falling back to summary");

    match history.stat_summary(hash) {
        Ok(summary) => format!("{}\n\n{}", DIFF_FALLBACK_MARKER, summary.trim_end()),
        Err(summary_error) => {
            warn!(%hash, error = %summary_error, "Stat summary unavailable");
            format!(
                "{}\n\n(summary unavailable: {})",
                DIFF_FALLBACK_MARKER, summary_error
            )
        }
    }
}
