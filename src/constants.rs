//! Constants used throughout the application.
//!
//! This module contains all constants used in daybook, organized into logical
//! groups. Having constants centralized makes them easier to find, modify, and
//! reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "daybook";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str =
    "Turns a repository's commit history into per-day markdown journals";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Log level used when `--verbose` is given.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Configuration Keys & Environment Variables
/// Environment variable for the repository working directory.
pub const ENV_VAR_DAYBOOK_REPO: &str = "DAYBOOK_REPO";
/// Environment variable for the journal output directory.
pub const ENV_VAR_DAYBOOK_DIR: &str = "DAYBOOK_DIR";
/// Environment variable for the version-control binary.
pub const ENV_VAR_DAYBOOK_GIT: &str = "DAYBOOK_GIT";
/// Environment variable for the per-command output ceiling, in bytes.
pub const ENV_VAR_DAYBOOK_MAX_OUTPUT_BYTES: &str = "DAYBOOK_MAX_OUTPUT_BYTES";
/// Environment variable for the optional diff timeout, in seconds.
pub const ENV_VAR_DAYBOOK_DIFF_TIMEOUT_SECS: &str = "DAYBOOK_DIFF_TIMEOUT_SECS";
/// Environment variable listing variables to strip from the git child process.
pub const ENV_VAR_DAYBOOK_GIT_UNSET_ENV: &str = "DAYBOOK_GIT_UNSET_ENV";
/// Environment variable listing file extensions for the structural rule.
pub const ENV_VAR_DAYBOOK_STRUCTURAL_EXTENSIONS: &str = "DAYBOOK_STRUCTURAL_EXTENSIONS";
/// Environment variable listing layer markers for the structural rule.
pub const ENV_VAR_DAYBOOK_STRUCTURAL_MARKERS: &str = "DAYBOOK_STRUCTURAL_MARKERS";

/// Default repository directory (the current working directory).
pub const DEFAULT_REPO_DIR: &str = ".";
/// Default journal directory, relative to the repository.
pub const DEFAULT_JOURNAL_SUBDIR: &str = "docs/journal";
/// Default version-control binary.
pub const DEFAULT_GIT_COMMAND: &str = "git";
/// Default ceiling for captured command output (256 MiB).
pub const DEFAULT_MAX_OUTPUT_BYTES: u64 = 256 * 1024 * 1024;
/// Default file extensions considered by the structural rule.
pub const DEFAULT_STRUCTURAL_EXTENSIONS: &[&str] = &[".rb"];
/// Default layer markers considered by the structural rule.
pub const DEFAULT_STRUCTURAL_MARKERS: &[&str] = &["model", "controller", "service"];

// Validation
/// Characters forbidden in the git command for security reasons.
pub const COMMAND_FORBIDDEN_CHARS: &[char] =
    &['|', '&', ';', '$', '(', ')', '`', '\\', '<', '>', '\'', '"'];
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// File System Parameters
/// File extension for journal documents.
pub const JOURNAL_FILE_EXTENSION: &str = ".md";
/// POSIX permissions applied to persisted journal documents.
#[cfg(unix)]
pub const JOURNAL_FILE_PERMISSIONS: u32 = 0o644;
/// Prefix for temporary files created while persisting a journal document.
pub const TEMP_FILE_PREFIX: &str = ".daybook-";

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD), used for filenames.
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";

// Version-control output
/// Marker that prefixes the stat summary when the full diff could not be loaded.
pub const DIFF_FALLBACK_MARKER: &str =
    "[Diff too large or failed to load. Showing summary instead.]";
/// Cap on captured stderr, which is only used for error messages.
pub const MAX_STDERR_BYTES: u64 = 64 * 1024;
/// Locale forced on child processes so their diagnostics are untranslated.
pub const CHILD_LOCALE: &str = "C";
/// Substring git prints when run outside a repository.
pub const GIT_NOT_A_REPO: &str = "not a git repository";

/// stderr fragment of `git log` in a repository without commits.
pub const GIT_NO_COMMITS_YET: &str = "does not have any commits yet";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "daybook";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
