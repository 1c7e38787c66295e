//! Git command execution wrapper.

use crate::error::{VcsError, VcsResult};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs git commands against one repository checkout and captures their
/// output as text.
pub struct GitRunner {
    repo_path: PathBuf,
}

impl GitRunner {
    /// Open an existing checkout. Verifies that git is on the PATH and
    /// that the path really is a repository before any history command
    /// runs.
    pub fn open(repo_path: &Path) -> VcsResult<Self> {
        let output = Command::new("git").arg("--version").output()?;
        if !output.status.success() {
            return Err(VcsError::GitNotAvailable);
        }

        let output = Command::new("git")
            .current_dir(repo_path)
            .args(["rev-parse", "--git-dir"])
            .output()?;
        if !output.status.success() {
            return Err(VcsError::NotARepository(repo_path.to_path_buf()));
        }

        Ok(Self {
            repo_path: repo_path.to_path_buf(),
        })
    }

    /// Clone `url` into `dest`, optionally pinning the branch.
    pub fn clone(url: &str, dest: &Path, branch: Option<&str>) -> VcsResult<()> {
        let mut cmd = Command::new("git");
        cmd.arg("clone");
        if let Some(branch) = branch {
            cmd.args(["-b", branch]);
        }
        cmd.arg(url).arg(dest);

        let output = cmd.output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VcsError::CommandFailed(stderr.trim().to_string()));
        }
        Ok(())
    }

    /// Full non-merge history touching `*.sql` files, one
    /// `hash;committer-date;author-date` line per commit.
    pub fn schema_commit_log(&self) -> VcsResult<String> {
        self.run(&[
            "log",
            "--no-merges",
            "--pretty=format:%H;%cI;%aI",
            "--follow",
            "--",
            "*.sql",
        ])
    }

    /// Change-type listing for one commit: the one-line summary followed
    /// by a status letter and path(s) per changed file.
    pub fn name_status(&self, commit: &str) -> VcsResult<String> {
        self.run(&["show", commit, "--oneline", "--name-status"])
    }

    /// Per-file diff for one commit with every whitespace-suppressing
    /// flag enabled and zero context lines, so that whitespace-only edits
    /// come back as an empty body.
    pub fn file_diff(&self, commit: &str, path: &str) -> VcsResult<String> {
        self.run(&[
            "show",
            commit,
            "--oneline",
            "--ignore-space-at-eol",
            "-b",
            "-w",
            "--ignore-blank-lines",
            "-U0",
            "--",
            path,
        ])
    }

    fn run(&self, args: &[&str]) -> VcsResult<String> {
        let output = Command::new("git")
            .current_dir(&self.repo_path)
            .args(args)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VcsError::CommandFailed(stderr.trim().to_string()));
        }
        Ok(String::from_utf8(output.stdout)?)
    }
}
