// git-jira-cz - Conventional commits scoped by Jira issues.
// Copyright (C) 2024 Jean-Philippe Cugnet <jean-philippe@cugnet.eu>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, version 3 of the License.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Interactions with Git.

use std::{io, path::PathBuf, process::Command};

use thiserror::Error;

use crate::tracing::LogResult as _;

/// Errors that can occur when running Git.
#[derive(Debug, Error)]
pub enum GitError {
    /// The `git` command cannot be run.
    #[error("Failed to run the git command")]
    CannotRunGit(#[source] io::Error),
    /// Git has returned an error.
    #[error("{0}")]
    GitError(String),
    /// The output of the git command is not proper UTF-8.
    #[error("The output of the git command is not proper UTF-8")]
    EncodingError(#[source] std::string::FromUtf8Error),
    /// The command is not run from inside a Git worktree.
    #[error("Not inside a Git worktree")]
    NotInWorktree,
}

/// A commit, as read from the Git log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommit {
    /// The full revision hash.
    pub rev: String,
    /// The first line of the commit message.
    pub title: String,
    /// The rest of the commit message.
    pub body: String,
}

/// Separates the fields of a commit in the `git log` output.
const FIELD_SEPARATOR: char = '\u{1f}';
/// Separates the commits in the `git log` output.
const COMMIT_SEPARATOR: char = '\u{1e}';

impl GitCommit {
    /// Builds a commit from its revision and full message.
    pub fn new(rev: &str, message: &str) -> Self {
        let message = message.trim();
        let (title, body) = message.split_once('\n').unwrap_or((message, ""));

        Self {
            rev: rev.to_owned(),
            title: title.trim().to_owned(),
            body: body.trim().to_owned(),
        }
    }

    /// Returns the full commit message.
    pub fn message(&self) -> String {
        if self.body.is_empty() {
            self.title.clone()
        } else {
            format!("{}\n\n{}", self.title, self.body)
        }
    }
}

/// Ensures the command is run from a Git worktree.
#[tracing::instrument(level = "trace")]
pub fn ensure_in_git_worktree() -> Result<(), GitError> {
    let is_inside_work_tree = run_git(&["rev-parse", "--is-inside-work-tree"])?;

    if is_inside_work_tree == "true" {
        Ok(())
    } else {
        Err(GitError::NotInWorktree).log_err()
    }
}

/// Returns the root of the current Git repository.
#[tracing::instrument(level = "trace")]
pub fn repo_root() -> Result<PathBuf, GitError> {
    Ok(PathBuf::from(run_git(&["rev-parse", "--show-toplevel"])?))
}

/// Reads the commits in `rev_range`, from the newest to the oldest.
///
/// Without a range, reads the whole history of `HEAD`.
#[tracing::instrument(level = "trace")]
pub fn log(rev_range: Option<&str>) -> Result<Vec<GitCommit>, GitError> {
    let format = format!("--format=%H{FIELD_SEPARATOR}%B{COMMIT_SEPARATOR}");

    let mut args = vec!["log", format.as_str()];
    if let Some(rev_range) = rev_range {
        args.push(rev_range);
    }

    let commits = parse_log(&run_git(&args)?);
    tracing::debug!(count = commits.len(), "read commits from the log");
    Ok(commits)
}

/// Parses the output of `git log` with the custom format used in [`log`].
fn parse_log(output: &str) -> Vec<GitCommit> {
    output
        .split(COMMIT_SEPARATOR)
        .filter_map(|raw_commit| raw_commit.split_once(FIELD_SEPARATOR))
        .map(|(rev, message)| GitCommit::new(rev.trim(), message))
        .collect()
}

/// Runs git with `args` and returns its trimmed standard output.
fn run_git(args: &[&str]) -> Result<String, GitError> {
    let git = Command::new("git")
        .args(args)
        .output()
        .map_err(GitError::CannotRunGit)
        .log_err()?;

    if git.status.success() {
        Ok(String::from_utf8(git.stdout)
            .map_err(GitError::EncodingError)
            .log_err()?
            .trim()
            .to_owned())
    } else {
        Err(GitError::GitError(
            String::from_utf8(git.stderr)
                .map_err(GitError::EncodingError)
                .log_err()?
                .trim()
                .to_owned(),
        ))
        .log_err()
    }
}
