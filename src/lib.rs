/*!
# daybook

daybook turns a repository's commit history into per-day markdown journals.
Each journal lists every commit made that day with its message, the changed
paths and the diff, so a project keeps a readable work log next to its code.

## Core Features

- Generate journals for every day in the history, skipping days that already have one
- Regenerate the journal for one specific date, replacing the existing file
- Fall back to a stat summary when a diff is too large or fails to load
- Flag commits that touch architectural layers with a diagram placeholder

## Architecture

- `cli`: Command-line interface handling using clap
- `config`: Configuration loading and validation
- `errors`: Error handling infrastructure
- `history`: Version-control queries (`HistorySource`, `GitHistory`)
- `journal_core`: Data model, date logic, diff fallback, structural rule and rendering
- `journal_io`: The journal directory
- `ops`: Generation flows tying the pieces together

## Usage Example

```rust,no_run
use daybook::history::GitHistory;
use daybook::journal_core::LayerNamingRule;
use daybook::journal_io::JournalStore;
use daybook::ops::JournalGenerator;
use daybook::Config;

fn main() -> daybook::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let history = GitHistory::from_config(&config);
    let store = JournalStore::new(config.journal_path());
    let rule = LayerNamingRule::default();

    let report = JournalGenerator::new(&history, &store, &rule).generate_all()?;
    println!("wrote {} journals", report.written.len());
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Centralized constants
pub mod constants;
/// Error types and utilities for error handling
pub mod errors;
/// Version-control history queries
pub mod history;
/// Pure journal logic: data model, dates, rendering
pub mod journal_core;
/// Journal file storage
pub mod journal_io;
/// Generation operations
pub mod ops;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult, HistoryError};
