//! Process runner for version-control commands.
//!
//! Runs one command at a time with an explicit working directory and
//! environment, reading stdout through a hard ceiling. Children always run
//! under the `C` locale, since stderr is matched against untranslated text. Output past the ceiling
//! is never truncated silently: the child is killed and the call fails with
//! `HistoryError::OutputTooLarge`.

use crate::constants;
use crate::errors::{HistoryError, HistoryResult};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Runner for a single external program.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: String,
    working_dir: PathBuf,
    unset_env: Vec<String>,
    max_output_bytes: u64,
}

impl CommandRunner {
    pub fn new(program: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            working_dir: working_dir.into(),
            unset_env: Vec::new(),
            max_output_bytes: constants::DEFAULT_MAX_OUTPUT_BYTES,
        }
    }

    /// Removes these variables from the child's environment.
    pub fn with_unset_env(mut self, names: Vec<String>) -> Self {
        self.unset_env = names;
        self
    }

    pub fn with_max_output_bytes(mut self, limit: u64) -> Self {
        self.max_output_bytes = limit;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Runs the program to completion and returns its stdout.
    pub fn run(&self, args: &[&str]) -> HistoryResult<String> {
        self.run_with_timeout(args, None)
    }

    /// Runs the program, killing it if it outlives `timeout`.
    ///
    /// # Errors
    ///
    /// - `HistoryError::Unavailable` if the program cannot be started, or reports
    ///   that the working directory is not a repository
    /// - `HistoryError::OutputTooLarge` if stdout exceeds the ceiling
    /// - `HistoryError::Timeout` if the timeout elapses
    /// - `HistoryError::CommandFailed` for any other unsuccessful exit
    pub fn run_with_timeout(
        &self,
        args: &[&str],
        timeout: Option<Duration>,
    ) -> HistoryResult<String> {
        let command_line = self.describe(args);
        debug!(command = %command_line, "Running command");

        let mut child = self.spawn(args)?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| self.unavailable("stdout was not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| self.unavailable("stderr was not captured"))?;

        let limit = self.max_output_bytes;
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buffer = Vec::new();
            // One byte past the limit is enough to tell "exactly full" from "too large".
            let result = stdout
                .take(limit.saturating_add(1))
                .read_to_end(&mut buffer)
                .map(|_| buffer);
            let _ = tx.send(result);
        });
        let stderr_reader = thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = stderr
                .take(constants::MAX_STDERR_BYTES)
                .read_to_end(&mut buffer);
            String::from_utf8_lossy(&buffer).into_owned()
        });

        let received = match timeout {
            Some(wait) => match rx.recv_timeout(wait) {
                Ok(result) => Some(result),
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    terminate(&mut child);
                    warn!(command = %command_line, seconds = wait.as_secs(), "Command timed out");
                    return Err(HistoryError::Timeout {
                        seconds: wait.as_secs(),
                    });
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => None,
            },
            None => rx.recv().ok(),
        };

        let output = match received {
            Some(Ok(bytes)) => bytes,
            Some(Err(e)) => {
                terminate(&mut child);
                return Err(self.read_failed(command_line, &e.to_string()));
            }
            None => {
                terminate(&mut child);
                return Err(self.read_failed(command_line, "output reader stopped unexpectedly"));
            }
        };

        if output.len() as u64 > limit {
            terminate(&mut child);
            warn!(command = %command_line, limit, "Command output exceeded capture limit");
            return Err(HistoryError::OutputTooLarge { limit });
        }

        let status = child.wait().map_err(|e| self.unavailable(&e.to_string()))?;
        let stderr = stderr_reader.join().unwrap_or_default();

        if status.success() {
            return Ok(String::from_utf8_lossy(&output).into_owned());
        }

        if stderr.contains(constants::GIT_NOT_A_REPO) {
            return Err(self.unavailable(stderr.trim()));
        }

        Err(HistoryError::CommandFailed {
            command: command_line,
            exit_code: status.code().unwrap_or(-1),
            stderr: stderr.trim().to_string(),
        })
    }

    fn spawn(&self, args: &[&str]) -> HistoryResult<Child> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .env("LC_ALL", constants::CHILD_LOCALE)
            .env_remove("LANGUAGE");

        for name in &self.unset_env {
            cmd.env_remove(name);
        }

        cmd.spawn().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound if !self.working_dir.is_dir() => self.unavailable(&format!(
                "working directory {} does not exist",
                self.working_dir.display()
            )),
            io::ErrorKind::NotFound => self.unavailable("program not found in PATH"),
            _ => self.unavailable(&e.to_string()),
        })
    }

    fn read_failed(&self, command: String, reason: &str) -> HistoryError {
        HistoryError::CommandFailed {
            command,
            exit_code: -1,
            stderr: format!("failed to read output: {}", reason),
        }
    }

    fn unavailable(&self, reason: &str) -> HistoryError {
        HistoryError::Unavailable {
            program: self.program.clone(),
            reason: reason.to_string(),
        }
    }

    fn describe(&self, args: &[&str]) -> String {
        std::iter::once(self.program.as_str())
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Kills and reaps a child whose output is no longer wanted.
fn terminate(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
