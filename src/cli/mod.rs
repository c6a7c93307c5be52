use crate::config::Config;
use crate::constants;
use clap::Parser;
use std::path::PathBuf;

/// Turns a repository's commit history into per-day markdown journals
///
/// Without options, journals are generated for every day in the history that
/// does not have one yet.
#[derive(Parser, Debug)]
#[clap(name = constants::APP_NAME, about = constants::APP_DESCRIPTION)]
#[clap(author, version)]
pub struct CliArgs {
    /// Regenerates the journal for one date, overwriting it (format: YYYY-MM-DD)
    #[clap(short = 'd', long, conflicts_with = "list")]
    pub date: Option<String>,

    /// Lists existing journal files instead of generating
    #[clap(short = 'l', long)]
    pub list: bool,

    /// Repository to read history from (overrides DAYBOOK_REPO)
    #[clap(short = 'r', long, value_name = "PATH")]
    pub repo: Option<PathBuf>,

    /// Directory journals are written to (overrides DAYBOOK_DIR)
    #[clap(short = 'o', long, value_name = "PATH")]
    pub journal_dir: Option<PathBuf>,

    /// Print verbose output
    #[clap(short = 'v', long)]
    pub verbose: bool,

    /// Log output format
    #[clap(
        long,
        value_parser = [constants::LOG_FORMAT_TEXT, constants::LOG_FORMAT_JSON],
        default_value = constants::LOG_FORMAT_TEXT
    )]
    pub log_format: String,
}

impl CliArgs {
    /// Applies path overrides from the command line on top of loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(repo) = &self.repo {
            config.repo_dir = repo.clone();
        }
        if let Some(dir) = &self.journal_dir {
            config.journal_dir = dir.clone();
        }
    }

    /// The log level implied by the flags.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            constants::VERBOSE_LOG_LEVEL
        } else {
            constants::DEFAULT_LOG_LEVEL
        }
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == constants::LOG_FORMAT_JSON
    }
}
