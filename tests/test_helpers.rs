#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tempfile::TempDir;

/// Returns true when a `git` executable is on PATH. Tests that need a real
/// repository return early otherwise.
pub fn git_available() -> bool {
    process::Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Creates a `Command` for the `daybook` binary with a clean, non-interactive environment.
/// `home` stands in for HOME so no user or global git configuration leaks in.
pub fn base_daybook_command(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("daybook").expect("daybook binary not built");
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
        cmd.env("PATH", path);
    }
    if let Ok(tmpdir) = std::env::var("TMPDIR") {
        cmd.env("TMPDIR", tmpdir);
    }
    cmd.env("HOME", home).env("GIT_CONFIG_NOSYSTEM", "1");
    cmd
}

/// A throwaway git repository with deterministic commit dates.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let repo = Self { dir };
        repo.git(&["init", "-q"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn journal_dir(&self) -> PathBuf {
        self.path().join("docs").join("journal")
    }

    pub fn journal(&self, compact_date: &str) -> PathBuf {
        self.journal_dir().join(format!("{}.md", compact_date))
    }

    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dirs");
        }
        fs::write(path, content).expect("failed to write file");
    }

    /// Stages everything and commits with author and committer date `date` (YYYY-MM-DD).
    pub fn commit_on(&self, date: &str, message: &str) {
        self.git(&["add", "-A"]);
        let stamp = format!("{}T12:00:00+0000", date);
        let status = process::Command::new("git")
            .args(["commit", "-q", "-m", message])
            .current_dir(self.path())
            .env("HOME", self.path())
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GIT_AUTHOR_DATE", &stamp)
            .env("GIT_COMMITTER_DATE", &stamp)
            .status()
            .expect("failed to run git commit");
        assert!(status.success(), "git commit failed");
    }

    /// Runs daybook against this repository.
    pub fn daybook(&self) -> Command {
        let mut cmd = base_daybook_command(self.path());
        cmd.env("DAYBOOK_REPO", self.path());
        cmd
    }

    fn git(&self, args: &[&str]) {
        let status = process::Command::new("git")
            .args(args)
            .current_dir(self.path())
            .env("HOME", self.path())
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .status()
            .expect("failed to run git");
        assert!(status.success(), "git {:?} failed", args);
    }
}

/// Two commits on 2024-03-01 (one touching a controller) and one on 2024-03-04.
pub fn login_repo() -> TestRepo {
    let repo = TestRepo::new();
    repo.write_file(
        "app/controllers/login_controller.rb",
        "class LoginController\nend\n",
    );
    repo.commit_on("2024-03-01", "Add login");
    repo.write_file("README.md", "Login docs\n");
    repo.commit_on("2024-03-01", "Fix typo\n\nREADME wording.");
    repo.write_file("lib/tasks.rb", "puts 'tasks'\n");
    repo.commit_on("2024-03-04", "Add tasks");
    repo
}
