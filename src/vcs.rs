//! Synchronising the journal directory through the `git` executable.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::NaiveDate;

use crate::error::JournalError;

const STASH_NAME: &str = "braindump-auto-stash";

/// Captured result of one git invocation.
#[derive(Debug)]
struct GitOutput {
    success: bool,
    stdout: String,
    stderr: String,
}

/// A git working tree rooted at the journal directory.
#[derive(Debug, Clone)]
pub struct Repo {
    dir: PathBuf,
}

impl Repo {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn is_repo(&self) -> bool {
        self.dir.join(".git").exists()
    }

    fn run(&self, args: &[&str]) -> Result<GitOutput, JournalError> {
        tracing::debug!(dir = %self.dir.display(), ?args, "running git");
        let output =
            Command::new("git").args(args).current_dir(&self.dir).output()?;
        let out = GitOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        if !out.success {
            tracing::debug!(?args, stderr = %out.stderr.trim(), "git exited non-zero");
        }
        Ok(out)
    }

    /// Run git and turn a non-zero exit into an error.
    fn check(&self, args: &[&str]) -> Result<GitOutput, JournalError> {
        let out = self.run(args)?;
        if out.success {
            Ok(out)
        } else {
            Err(JournalError::Git {
                command: args.join(" "),
                stderr: out.stderr.trim().to_string(),
            })
        }
    }

    pub fn has_remote(&self) -> Result<bool, JournalError> {
        let out = self.run(&["remote"])?;
        Ok(out.success && !out.stdout.trim().is_empty())
    }

    pub fn has_uncommitted_changes(&self) -> Result<bool, JournalError> {
        let out = self.run(&["status", "--porcelain"])?;
        Ok(out.success && !out.stdout.trim().is_empty())
    }

    /// Fail unless this is a repository with a remote.
    fn ensure_remote(&self) -> Result<(), JournalError> {
        if !self.is_repo() {
            return Err(JournalError::NotARepository(self.dir.clone()));
        }
        if !self.has_remote()? {
            return Err(JournalError::NoRemote(self.dir.clone()));
        }
        Ok(())
    }

    /// Fetch, rebase onto the remote around any local edits, commit
    /// everything and push. Returns the commit message used.
    pub fn sync(&self, today: NaiveDate) -> Result<String, JournalError> {
        self.ensure_remote()?;
        let message = commit_message(today);

        self.check(&["fetch"])?;

        let mut stashed = false;
        if self.has_uncommitted_changes()? {
            self.check(&["add", "."])?;
            let out = self.run(&["stash", "push", "-m", STASH_NAME])?;
            stashed = out.success && !out.stdout.contains("No local changes");
        }

        if let Err(err) = self.check(&["pull", "--rebase"]) {
            if stashed {
                let _ = self.run(&["stash", "pop"]);
            }
            return Err(err);
        }
        if stashed {
            self.check(&["stash", "pop"])?;
        }

        self.check(&["add", "."])?;
        let commit = self.run(&["commit", "-m", &message])?;
        if !commit.success && !nothing_to_commit(&commit) {
            return Err(JournalError::Git {
                command: "commit".to_string(),
                stderr: commit.stderr.trim().to_string(),
            });
        }
        self.check(&["push"])?;
        tracing::info!(%message, "journal synchronised");
        Ok(message)
    }

    /// Pull with rebase. Refuses to run over uncommitted edits.
    pub fn pull(&self) -> Result<(), JournalError> {
        self.ensure_remote()?;
        if self.has_uncommitted_changes()? {
            return Err(JournalError::UncommittedChanges);
        }
        self.check(&["pull", "--rebase"])?;
        Ok(())
    }
}

fn nothing_to_commit(out: &GitOutput) -> bool {
    out.stdout.contains("nothing to commit")
        || out.stderr.contains("nothing to commit")
}

pub fn commit_message(date: NaiveDate) -> String {
    format!("Log: {}", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn commit_message_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(commit_message(date), "Log: 2026-01-05");
    }

    #[test]
    fn plain_directory_is_not_a_repo() {
        let tmp = tempdir().unwrap();
        let repo = Repo::new(tmp.path());
        assert!(!repo.is_repo());
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert!(matches!(
            repo.sync(date),
            Err(JournalError::NotARepository(_))
        ));
        assert!(matches!(repo.pull(), Err(JournalError::NotARepository(_))));
    }

    #[test]
    fn nothing_to_commit_is_detected_on_either_stream() {
        let out = GitOutput {
            success: false,
            stdout: "On branch main\nnothing to commit, working tree clean\n"
                .to_string(),
            stderr: String::new(),
        };
        assert!(nothing_to_commit(&out));
    }
}
