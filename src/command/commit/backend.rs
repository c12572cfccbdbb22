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

//! Where the commit message goes once assembled.

use std::{io, process::Command};

use thiserror::Error;

use crate::tracing::LogResult as _;

/// A commit backend.
pub trait Backend {
    /// Hands the commit message over.
    fn call(&self, commit_message: &str) -> Result<(), BackendError>;
}

/// Errors that can occur when running the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// `git commit` cannot be run.
    #[error("Failed to run `git commit`")]
    CannotRun(#[source] io::Error),
    /// `git commit` has returned an error.
    #[error("`git commit` has returned an error")]
    ExecutionError {
        /// The status code returned by Git.
        status_code: Option<i32>,
    },
}

/// A backend using `git commit -em "$message"`.
///
/// The message is opened in the editor so that it can be reviewed before
/// committing.
#[derive(Debug)]
pub struct GitBackend {
    /// Extra arguments to pass to `git commit`.
    extra_args: Vec<String>,
}

impl GitBackend {
    /// Builds a new Git backend.
    pub fn new(extra_args: &[String]) -> Self {
        Self {
            extra_args: extra_args.to_owned(),
        }
    }
}

impl Backend for GitBackend {
    #[tracing::instrument(name = "git_backend", level = "trace", skip_all)]
    fn call(&self, commit_message: &str) -> Result<(), BackendError> {
        let mut git_commit = Command::new("git");
        git_commit
            .arg("commit")
            .args(&self.extra_args)
            .args(["-em", commit_message]);

        tracing::info!(?git_commit, "calling git commit");

        let status = git_commit
            .status()
            .map_err(BackendError::CannotRun)
            .log_err()?;

        tracing::debug!(?status);

        if status.success() {
            Ok(())
        } else {
            Err(BackendError::ExecutionError {
                status_code: status.code(),
            })
            .log_err()
        }
    }
}

/// A backend printing the message to the terminal.
#[derive(Debug)]
pub struct PrintBackend;

impl Backend for PrintBackend {
    #[tracing::instrument(name = "print_backend", level = "trace", skip_all)]
    fn call(&self, commit_message: &str) -> Result<(), BackendError> {
        tracing::debug!("printing the commit message");
        println!("{commit_message}");
        Ok(())
    }
}
