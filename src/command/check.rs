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

//! The `check` subcommand.
//!
//! Meant to be used in a `commit-msg` hook:
//!
//! ```sh
//! git jira-cz check --commit-msg-file "$1"
//! ```

use std::{fs, path::PathBuf};

use clap::{ArgGroup, Parser};
use eyre::{Context as _, Result};
use itertools::Itertools as _;
use thiserror::Error;

use super::{GlobalOptions, helpers::load_formatter};
use crate::{formatter::CommitFormatter, success};

/// A readable version of the commit pattern, for hints.
pub const PATTERN_HINT: &str = "<type>(<scope>)!: <subject>";

/// The check command.
#[derive(Debug, Parser)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["message", "commit_msg_file"])
))]
pub struct Check {
    /// The commit message to check.
    #[arg(long, short)]
    message: Option<String>,
    /// The file containing the commit message to check.
    #[arg(long, value_name = "PATH")]
    commit_msg_file: Option<PathBuf>,
}

/// Errors found when checking a commit message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckError {
    /// The commit message is empty.
    #[error("The commit message is empty")]
    EmptyMessage,
    /// The commit message does not follow the schema.
    #[error(
        "Commit validation failed: `{title}` does not follow the commit rules"
    )]
    InvalidMessage {
        /// The first line of the commit message.
        title: String,
    },
}

impl super::Command for Check {
    #[tracing::instrument(name = "check", level = "trace", skip_all)]
    fn run(&self, options: &GlobalOptions) -> Result<()> {
        let formatter = load_formatter(options)?;

        let raw_message = match (&self.message, &self.commit_msg_file) {
            (Some(message), _) => message.clone(),
            (None, Some(path)) => fs::read_to_string(path).wrap_err_with(
                || format!("Failed to read {}", path.display()),
            )?,
            (None, None) => String::new(),
        };

        check_message(&formatter, &raw_message)?;
        success!("Commit validation: successful!");

        Ok(())
    }
}

/// Checks the commit message, ignoring `#` comment lines.
///
/// Merge and revert commits generated by Git are accepted as is.
fn check_message(
    formatter: &CommitFormatter,
    raw_message: &str,
) -> Result<(), CheckError> {
    let message = raw_message
        .lines()
        .filter(|line| !line.starts_with('#'))
        .join("\n");
    let message = message.trim();

    tracing::debug!(?message, "checking the commit message");

    if message.is_empty() {
        return Err(CheckError::EmptyMessage);
    }

    if message.starts_with("Merge") || message.starts_with("Revert") {
        tracing::debug!("generated by Git, accepting it");
        return Ok(());
    }

    if formatter.is_valid(message) {
        Ok(())
    } else {
        let title = message.lines().next().unwrap_or_default().to_owned();
        Err(CheckError::InvalidMessage { title })
    }
}

#[cfg(test)]
mod test {
    #![allow(clippy::pedantic, clippy::restriction)]

    use indoc::indoc;

    use super::*;
    use crate::config::Config;

    fn formatter() -> CommitFormatter {
        CommitFormatter::new(&Config {
            jira_base_url: Some(String::from("https://j.example")),
            github_repo: Some(String::from("org/repo")),
            ..Config::default()
        })
        .unwrap()
    }

    #[test]
    fn accepts_a_conventional_commit() {
        let message = indoc! {"
            feat(XZ-1,XZ-2): add widget

            The widget does things.

            BREAKING CHANGE: the gadget is gone
        "};

        assert_eq!(check_message(&formatter(), message), Ok(()));
    }

    #[test]
    fn ignores_comments() {
        let message = indoc! {"
            # Please enter the commit message for your changes.
            fix: correct typo
            # On branch main
        "};

        assert_eq!(check_message(&formatter(), message), Ok(()));
    }

    #[test]
    fn accepts_git_generated_messages() {
        assert_eq!(
            check_message(&formatter(), "Merge branch 'feature'"),
            Ok(())
        );
        assert_eq!(
            check_message(&formatter(), "Revert \"feat: add widget\""),
            Ok(())
        );
    }

    #[test]
    fn rejects_an_empty_message() {
        assert_eq!(
            check_message(&formatter(), "# only a comment\n\n"),
            Err(CheckError::EmptyMessage)
        );
    }

    #[test]
    fn rejects_other_messages() {
        assert_eq!(
            check_message(&formatter(), "add widget\n\nsome body"),
            Err(CheckError::InvalidMessage {
                title: String::from("add widget")
            })
        );
        assert!(check_message(&formatter(), "feature: add widget").is_err());
    }
}
