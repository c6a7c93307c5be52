//! Configuration management for the daybook application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults. Command-line flags are applied on top of the
//! loaded values by `main`.
//!
//! # Environment Variables
//!
//! - `DAYBOOK_REPO`: Repository working directory (defaults to the current directory)
//! - `DAYBOOK_DIR`: Journal directory (defaults to `docs/journal` inside the repository)
//! - `DAYBOOK_GIT`: Version-control binary (defaults to `git`)
//! - `DAYBOOK_MAX_OUTPUT_BYTES`: Capture ceiling per command (defaults to 256 MiB)
//! - `DAYBOOK_DIFF_TIMEOUT_SECS`: Optional timeout for a single diff
//! - `DAYBOOK_GIT_UNSET_ENV`: Comma-separated variables removed from the git environment
//! - `DAYBOOK_STRUCTURAL_EXTENSIONS`: Comma-separated extensions for the structural rule
//! - `DAYBOOK_STRUCTURAL_MARKERS`: Comma-separated layer markers for the structural rule

use crate::constants;
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for the daybook application.
///
/// # Examples
///
/// Starting from defaults and pointing at a repository:
/// ```
/// use daybook::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     repo_dir: PathBuf::from("/path/to/repo"),
///     ..Config::default()
/// };
/// assert_eq!(config.journal_path(), PathBuf::from("/path/to/repo/docs/journal"));
/// ```
#[derive(Clone)]
pub struct Config {
    /// Working directory in which the version-control binary runs.
    pub repo_dir: PathBuf,

    /// Directory where journal documents are written.
    ///
    /// Relative paths are resolved against `repo_dir` by [`Config::journal_path`].
    pub journal_dir: PathBuf,

    /// Version-control binary to invoke.
    pub git_command: String,

    /// Ceiling for captured stdout of a single command.
    pub max_output_bytes: u64,

    /// Optional timeout for a single diff retrieval. Expiry triggers the summary fallback.
    pub diff_timeout: Option<Duration>,

    /// Environment variables removed from the version-control child process.
    pub git_unset_env: Vec<String>,

    /// File extensions the structural rule considers (e.g. `.rb`).
    pub structural_extensions: Vec<String>,

    /// Path substrings that mark an architectural layer (e.g. `controller`).
    pub structural_markers: Vec<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("repo_dir", &constants::REDACTED_PLACEHOLDER)
            .field("journal_dir", &constants::REDACTED_PLACEHOLDER)
            .field("git_command", &self.git_command)
            .field("max_output_bytes", &self.max_output_bytes)
            .field("diff_timeout", &self.diff_timeout)
            .field("git_unset_env", &self.git_unset_env)
            .field("structural_extensions", &self.structural_extensions)
            .field("structural_markers", &self.structural_markers)
            .finish()
    }
}

impl Default for Config {
    /// Creates a new Config with default values.
    fn default() -> Self {
        Config {
            repo_dir: PathBuf::from(constants::DEFAULT_REPO_DIR),
            journal_dir: PathBuf::from(constants::DEFAULT_JOURNAL_SUBDIR),
            git_command: constants::DEFAULT_GIT_COMMAND.to_string(),
            max_output_bytes: constants::DEFAULT_MAX_OUTPUT_BYTES,
            diff_timeout: None,
            git_unset_env: Vec::new(),
            structural_extensions: to_owned_list(constants::DEFAULT_STRUCTURAL_EXTENSIONS),
            structural_markers: to_owned_list(constants::DEFAULT_STRUCTURAL_MARKERS),
        }
    }
}

impl Config {
    /// Validates a version-control command string for security.
    ///
    /// The command is passed straight to `std::process::Command`, so it must be a
    /// single program name or path: not empty, no spaces, no shell metacharacters.
    fn validate_git_command(command: &str) -> AppResult<&str> {
        if command.is_empty() {
            return Err(AppError::Config("Git command cannot be empty".to_string()));
        }

        if command.contains(' ') {
            return Err(AppError::Config(
                "Git command cannot contain spaces. Use a wrapper script for commands requiring arguments".to_string(),
            ));
        }

        if let Some(ch) = command
            .chars()
            .find(|c| constants::COMMAND_FORBIDDEN_CHARS.contains(c))
        {
            return Err(AppError::Config(format!(
                "Git command cannot contain shell metacharacters: '{}'",
                ch
            )));
        }

        Ok(command)
    }

    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// Paths are expanded with `shellexpand`, so `~` and `$VAR` references work.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - A path expansion fails
    /// - The git command fails validation
    /// - A numeric variable is not a positive integer
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use daybook::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Writing journals to {}", config.journal_path().display()),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let defaults = Config::default();

        let repo_dir = match env::var(constants::ENV_VAR_DAYBOOK_REPO) {
            Ok(raw) => expand_path(&raw)?,
            Err(_) => defaults.repo_dir,
        };

        let journal_dir = match env::var(constants::ENV_VAR_DAYBOOK_DIR) {
            Ok(raw) => expand_path(&raw)?,
            Err(_) => defaults.journal_dir,
        };

        let git_raw = env::var(constants::ENV_VAR_DAYBOOK_GIT)
            .unwrap_or_else(|_| constants::DEFAULT_GIT_COMMAND.to_string());
        let git_command = Config::validate_git_command(&git_raw)?.to_string();

        let max_output_bytes =
            env_positive_u64(constants::ENV_VAR_DAYBOOK_MAX_OUTPUT_BYTES)?
                .unwrap_or(defaults.max_output_bytes);

        let diff_timeout = env_positive_u64(constants::ENV_VAR_DAYBOOK_DIFF_TIMEOUT_SECS)?
            .map(Duration::from_secs);

        let git_unset_env = env_list(constants::ENV_VAR_DAYBOOK_GIT_UNSET_ENV)
            .unwrap_or(defaults.git_unset_env);
        let structural_extensions = env_list(constants::ENV_VAR_DAYBOOK_STRUCTURAL_EXTENSIONS)
            .unwrap_or(defaults.structural_extensions);
        let structural_markers = env_list(constants::ENV_VAR_DAYBOOK_STRUCTURAL_MARKERS)
            .unwrap_or(defaults.structural_markers);

        Ok(Config {
            repo_dir,
            journal_dir,
            git_command,
            max_output_bytes,
            diff_timeout,
            git_unset_env,
            structural_extensions,
            structural_markers,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when a path is empty, the git command is invalid,
    /// or the output ceiling is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use daybook::Config;
    ///
    /// assert!(Config::default().validate().is_ok());
    ///
    /// let invalid = Config { max_output_bytes: 0, ..Config::default() };
    /// assert!(invalid.validate().is_err());
    /// ```
    pub fn validate(&self) -> AppResult<()> {
        if self.repo_dir.as_os_str().is_empty() {
            return Err(AppError::Config(
                "Repository directory path is empty".to_string(),
            ));
        }

        if self.journal_dir.as_os_str().is_empty() {
            return Err(AppError::Config(
                "Journal directory path is empty".to_string(),
            ));
        }

        Config::validate_git_command(&self.git_command)?;

        if self.max_output_bytes == 0 {
            return Err(AppError::Config(
                "Maximum output size must be greater than zero".to_string(),
            ));
        }

        if self.diff_timeout.is_some_and(|t| t.is_zero()) {
            return Err(AppError::Config(
                "Diff timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns the journal directory, resolved against the repository when relative.
    pub fn journal_path(&self) -> PathBuf {
        if self.journal_dir.is_absolute() {
            self.journal_dir.clone()
        } else {
            self.repo_dir.join(&self.journal_dir)
        }
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn expand_path(raw: &str) -> AppResult<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
    Ok(Path::new(expanded.as_ref()).to_path_buf())
}

/// Reads a comma-separated list, dropping blank items. `None` when the variable is unset.
fn env_list(name: &str) -> Option<Vec<String>> {
    env::var(name).ok().map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
}

fn env_positive_u64(name: &str) -> AppResult<Option<u64>> {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(value) if value > 0 => Ok(Some(value)),
            _ => Err(AppError::Config(format!(
                "{} must be a positive integer, got '{}'",
                name, raw
            ))),
        },
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    const ALL_VARS: &[&str] = &[
        constants::ENV_VAR_DAYBOOK_REPO,
        constants::ENV_VAR_DAYBOOK_DIR,
        constants::ENV_VAR_DAYBOOK_GIT,
        constants::ENV_VAR_DAYBOOK_MAX_OUTPUT_BYTES,
        constants::ENV_VAR_DAYBOOK_DIFF_TIMEOUT_SECS,
        constants::ENV_VAR_DAYBOOK_GIT_UNSET_ENV,
        constants::ENV_VAR_DAYBOOK_STRUCTURAL_EXTENSIONS,
        constants::ENV_VAR_DAYBOOK_STRUCTURAL_MARKERS,
    ];

    fn setup() {
        for var in ALL_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_debug_impl_redacts_paths() {
        let config = Config {
            repo_dir: PathBuf::from("/home/username/secret-project"),
            journal_dir: PathBuf::from("/home/username/private/journal"),
            ..Config::default()
        };

        let debug_output = format!("{:?}", config);

        assert!(debug_output.contains(constants::REDACTED_PLACEHOLDER));
        assert!(!debug_output.contains("secret-project"));
        assert!(!debug_output.contains("/home/username/private/journal"));
        assert!(debug_output.contains("git"));
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.repo_dir, PathBuf::from("."));
        assert_eq!(config.journal_dir, PathBuf::from("docs/journal"));
        assert_eq!(config.git_command, "git");
        assert_eq!(config.max_output_bytes, 256 * 1024 * 1024);
        assert!(config.diff_timeout.is_none());
        assert!(config.git_unset_env.is_empty());
        assert_eq!(config.structural_extensions, vec![".rb"]);
        assert_eq!(
            config.structural_markers,
            vec!["model", "controller", "service"]
        );
    }

    #[test]
    #[serial]
    fn test_load_without_env_uses_defaults() {
        setup();

        let config = Config::load().unwrap();

        assert_eq!(config.repo_dir, PathBuf::from("."));
        assert_eq!(config.journal_path(), PathBuf::from("./docs/journal"));
        assert_eq!(config.git_command, "git");
    }

    #[test]
    #[serial]
    fn test_load_with_custom_dirs() {
        setup();

        let temp_dir = tempdir().unwrap();
        let repo = temp_dir.path().to_string_lossy().to_string();
        let journal = temp_dir.path().join("out").to_string_lossy().to_string();

        env::set_var(constants::ENV_VAR_DAYBOOK_REPO, &repo);
        env::set_var(constants::ENV_VAR_DAYBOOK_DIR, &journal);
        let config = Config::load().unwrap();
        setup();

        assert_eq!(config.repo_dir, PathBuf::from(&repo));
        assert_eq!(config.journal_path(), PathBuf::from(&journal));
    }

    #[test]
    #[serial]
    fn test_load_lists_and_numbers() {
        setup();

        env::set_var(constants::ENV_VAR_DAYBOOK_MAX_OUTPUT_BYTES, "4096");
        env::set_var(constants::ENV_VAR_DAYBOOK_DIFF_TIMEOUT_SECS, "30");
        env::set_var(constants::ENV_VAR_DAYBOOK_GIT_UNSET_ENV, "DOCKER_HOST, ,GIT_DIR");
        env::set_var(constants::ENV_VAR_DAYBOOK_STRUCTURAL_EXTENSIONS, ".java,.kt");
        env::set_var(constants::ENV_VAR_DAYBOOK_STRUCTURAL_MARKERS, "domain,application");
        let config = Config::load().unwrap();
        setup();

        assert_eq!(config.max_output_bytes, 4096);
        assert_eq!(config.diff_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.git_unset_env, vec!["DOCKER_HOST", "GIT_DIR"]);
        assert_eq!(config.structural_extensions, vec![".java", ".kt"]);
        assert_eq!(config.structural_markers, vec!["domain", "application"]);
    }

    #[test]
    #[serial]
    fn test_load_rejects_bad_numbers() {
        setup();

        env::set_var(constants::ENV_VAR_DAYBOOK_MAX_OUTPUT_BYTES, "lots");
        let result = Config::load();
        setup();

        match result {
            Err(AppError::Config(msg)) => {
                assert!(msg.contains(constants::ENV_VAR_DAYBOOK_MAX_OUTPUT_BYTES));
                assert!(msg.contains("lots"));
            }
            _ => panic!("Expected Config error for non-numeric ceiling"),
        }

        env::set_var(constants::ENV_VAR_DAYBOOK_DIFF_TIMEOUT_SECS, "0");
        let result = Config::load();
        setup();

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_load_config_with_invalid_git_command() {
        setup();

        env::set_var(constants::ENV_VAR_DAYBOOK_GIT, "git --no-pager");
        let result = Config::load();
        match result {
            Err(AppError::Config(msg)) => assert!(msg.contains("cannot contain spaces")),
            _ => panic!("Expected Config error for git command with spaces"),
        }

        env::set_var(constants::ENV_VAR_DAYBOOK_GIT, "git;rm");
        let result = Config::load();
        setup();

        match result {
            Err(AppError::Config(msg)) => {
                assert!(msg.contains("shell metacharacters"));
                assert!(msg.contains(';'));
            }
            _ => panic!("Expected Config error for metacharacters"),
        }
    }

    #[test]
    fn test_validate_git_command_valid() {
        assert_eq!(Config::validate_git_command("git").unwrap(), "git");
        assert_eq!(
            Config::validate_git_command("/usr/local/bin/git").unwrap(),
            "/usr/local/bin/git"
        );
    }

    #[test]
    fn test_validate_git_command_with_metacharacters() {
        for cmd in ["git|cat", "git&", "$(git)", "`git`", "git>out", "git'x'"] {
            match Config::validate_git_command(cmd) {
                Err(AppError::Config(msg)) => assert!(msg.contains("shell metacharacters")),
                _ => panic!("Expected Config error for '{}'", cmd),
            }
        }
    }

    #[test]
    fn test_validate_empty_paths() {
        let config = Config {
            journal_dir: PathBuf::from(""),
            ..Config::default()
        };
        match config.validate() {
            Err(AppError::Config(msg)) => assert!(msg.contains("Journal directory path is empty")),
            _ => panic!("Expected Config error about empty journal directory"),
        }

        let config = Config {
            repo_dir: PathBuf::from(""),
            ..Config::default()
        };
        match config.validate() {
            Err(AppError::Config(msg)) => assert!(msg.contains("Repository directory")),
            _ => panic!("Expected Config error about empty repository directory"),
        }
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = Config {
            diff_timeout: Some(Duration::ZERO),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_journal_path_absolute_is_kept() {
        let config = Config {
            repo_dir: PathBuf::from("/repo"),
            journal_dir: PathBuf::from("/elsewhere/journal"),
            ..Config::default()
        };
        assert_eq!(config.journal_path(), PathBuf::from("/elsewhere/journal"));
    }
}
