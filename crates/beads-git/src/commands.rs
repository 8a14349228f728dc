//! Git command execution wrappers.
//!
//! Provides a thin wrapper around `git` subprocess invocation so that the
//! rest of the codebase does not need to deal with `std::process::Command`
//! directly.
//!
//! Ported from Go `internal/git/gitdir.go` (command execution parts).

use std::path::Path;
use std::process::Command;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when running git commands.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git binary could not be found or spawned.
    #[error("failed to execute git: {0}")]
    SpawnError(#[from] std::io::Error),

    /// The git command exited with a non-zero status.
    #[error("git command failed (exit code {code:?}): {stderr}")]
    CommandFailed {
        /// The exit code, or `None` if the process was killed by a signal.
        code: Option<i32>,
        /// The content of stderr.
        stderr: String,
    },

    /// Not inside a git repository.
    #[error("not a git repository")]
    NotARepo,
}

/// A specialized `Result` type for git operations.
pub type Result<T> = std::result::Result<T, GitError>;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Execute a `git` command with the given arguments and working directory.
///
/// Returns the trimmed contents of stdout on success.
///
/// # Errors
///
/// Returns [`GitError::SpawnError`] if `git` cannot be found, or
/// [`GitError::CommandFailed`] if the command exits with a non-zero status.
///
/// # Examples
///
/// ```no_run
/// use beads_git::commands::git_command;
/// use std::path::Path;
///
/// let branch = git_command(&["rev-parse", "--abbrev-ref", "HEAD"], Path::new(".")).unwrap();
/// println!("Current branch: {branch}");
/// ```
pub fn git_command(args: &[&str], cwd: &Path) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(GitError::CommandFailed {
            code: output.status.code(),
            stderr,
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(stdout)
}

/// Stages `journal_path` and commits it with `message`, relative to
/// `repo_root`. Used by the daemon's auto-flush to keep the journal's git
/// history in step with the store without requiring a separate `git add`
/// workflow from the caller.
///
/// A no-op (returns `Ok(())`) if `repo_root` is not inside a git repository,
/// since journal commits are an optional convenience, not a correctness
/// requirement.
pub fn commit_journal(repo_root: &Path, journal_path: &Path, message: &str) -> Result<()> {
    if git_command(&["rev-parse", "--is-inside-work-tree"], repo_root).is_err() {
        return Ok(());
    }

    let journal_str = journal_path.to_string_lossy();
    git_command(&["add", "--", &journal_str], repo_root)?;

    // Nothing staged (e.g. the journal content didn't actually change) is
    // not an error; `git commit` would just fail on an empty diff.
    let status = git_command(&["status", "--porcelain", "--", &journal_str], repo_root)?;
    if status.is_empty() {
        return Ok(());
    }

    git_command(&["commit", "-m", message, "--", &journal_str], repo_root)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_command_version() {
        // `git --version` should succeed on any system with git installed.
        let result = git_command(&["--version"], Path::new("."));
        assert!(result.is_ok(), "git --version failed: {result:?}");
        let output = result.unwrap();
        assert!(
            output.starts_with("git version"),
            "unexpected output: {output}"
        );
    }

    #[test]
    fn test_git_command_failure() {
        // An invalid git subcommand should fail.
        let result = git_command(&["not-a-real-subcommand"], Path::new("."));
        assert!(result.is_err());
        match result.unwrap_err() {
            GitError::CommandFailed { code, stderr } => {
                assert!(code.is_some());
                assert!(!stderr.is_empty());
            }
            other => panic!("expected CommandFailed, got: {other:?}"),
        }
    }

    #[test]
    fn test_git_command_bad_cwd() {
        // Running git in a nonexistent directory should fail.
        let result = git_command(&["status"], Path::new("/nonexistent/directory/xyz"));
        assert!(result.is_err());
    }

    #[test]
    fn test_commit_journal_outside_repo_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let journal = dir.path().join("journal.jsonl");
        std::fs::write(&journal, "{}\n").unwrap();

        let result = commit_journal(dir.path(), &journal, "sync journal");
        assert!(result.is_ok());
    }

    #[test]
    fn test_commit_journal_commits_changes() {
        let dir = tempfile::tempdir().unwrap();
        git_command(&["init"], dir.path()).unwrap();
        git_command(&["config", "user.email", "test@example.com"], dir.path()).unwrap();
        git_command(&["config", "user.name", "Test"], dir.path()).unwrap();

        let journal = dir.path().join(".beads/journal.jsonl");
        std::fs::create_dir_all(journal.parent().unwrap()).unwrap();
        std::fs::write(&journal, "{}\n").unwrap();

        commit_journal(dir.path(), &journal, "sync journal").unwrap();

        let log = git_command(&["log", "--oneline"], dir.path()).unwrap();
        assert!(log.contains("sync journal"));
    }
}
