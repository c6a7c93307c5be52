/*!
# daybook

Generates per-day markdown journals from a repository's commit history.

This file contains the main application flow, coordinating the various components
to implement the journal generation.

## Usage

```
daybook [OPTIONS]

Options:
  -d, --date <DATE>              Regenerates the journal for one date, overwriting it (format: YYYY-MM-DD)
  -l, --list                     Lists existing journal files instead of generating
  -r, --repo <PATH>              Repository to read history from
  -o, --journal-dir <PATH>       Directory journals are written to
  -v, --verbose                  Print verbose output
      --log-format <LOG_FORMAT>  Log output format [default: text] [possible values: text, json]
  -h, --help                     Print help information
  -V, --version                  Print version information
```

## Configuration

- `DAYBOOK_REPO`: The repository to read (defaults to the current directory)
- `DAYBOOK_DIR`: The journal directory, relative to the repository unless absolute (defaults to "docs/journal")
- `DAYBOOK_GIT`: The git executable (defaults to "git")
- `DAYBOOK_MAX_OUTPUT_BYTES`: Cap on captured output per git command
- `DAYBOOK_DIFF_TIMEOUT_SECS`: Time limit for loading a single diff
- `DAYBOOK_GIT_UNSET_ENV`: Comma-separated variables removed from git's environment
- `DAYBOOK_STRUCTURAL_EXTENSIONS` / `DAYBOOK_STRUCTURAL_MARKERS`: The structural-change rule
*/

use clap::Parser;
use daybook::cli::CliArgs;
use daybook::config::Config;
use daybook::constants;
use daybook::errors::AppResult;
use daybook::history::GitHistory;
use daybook::journal_core::{parse_journal_date, LayerNamingRule};
use daybook::journal_io::JournalStore;
use daybook::ops::{DayOutcome, JournalGenerator};
use std::io::IsTerminal;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// The main entry point for the daybook application.
///
/// Errors are logged once here, at the application boundary, and then
/// returned so the process exits with a failure status.
fn main() -> AppResult<()> {
    let args = CliArgs::parse();

    init_tracing(&args);

    let correlation_id = Uuid::new_v4();
    let root_span = tracing::info_span!(
        constants::TRACING_ROOT_SPAN_NAME,
        service_name = constants::TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    info!("Starting daybook");
    debug!("CLI arguments: {:?}", args);

    let result = run(&args);
    if let Err(e) = &result {
        error!("{}", e);
    }
    result
}

fn init_tracing(args: &CliArgs) {
    // --verbose wins over RUST_LOG so the flag always has a visible effect.
    let filter = if args.verbose {
        EnvFilter::new(args.log_level())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if args.json_logs() {
        builder.json().with_current_span(true).init();
    } else {
        builder.with_ansi(std::io::stderr().is_terminal()).init();
    }
}

fn run(args: &CliArgs) -> AppResult<()> {
    // Reject a malformed date before touching the repository or the filesystem.
    let date = args.date.as_deref().map(parse_journal_date).transpose()?;

    info!("Loading configuration");
    let mut config = Config::load()?;
    args.apply_to(&mut config);
    config.validate()?;
    debug!("Configuration: {:?}", config);

    let store = JournalStore::new(config.journal_path());

    if args.list {
        for (date, path) in store.list_entries()? {
            println!("{}\t{}", date.format(constants::DATE_FORMAT_ISO), path.display());
        }
        return Ok(());
    }

    let history = GitHistory::from_config(&config);
    let rule = LayerNamingRule::new(
        config.structural_extensions.clone(),
        config.structural_markers.clone(),
    );
    let generator = JournalGenerator::new(&history, &store, &rule);

    match date {
        Some(date) => match generator.generate_for_date(date)? {
            DayOutcome::Written(path) => println!("{}", path.display()),
            DayOutcome::Skipped(path) => println!("{} (kept)", path.display()),
            DayOutcome::NoCommits => println!(
                "No commits on {}",
                date.format(constants::DATE_FORMAT_ISO)
            ),
        },
        None => {
            let report = generator.generate_all()?;
            for date in &report.written {
                println!("{}", store.entry_path(*date).display());
            }
            info!(
                written = report.written.len(),
                skipped = report.skipped.len(),
                "Done"
            );
        }
    }

    Ok(())
}
