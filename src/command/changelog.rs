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

//! The `changelog` subcommand.

use clap::Parser;
use eyre::Result;

use super::{GlobalOptions, helpers::load_formatter};
use crate::{changelog, git, hint, warning};

/// The changelog command.
#[derive(Debug, Parser)]
pub struct Changelog {
    /// The revision range to include, like `v1.0.0..HEAD`.
    ///
    /// Defaults to the whole history.
    rev_range: Option<String>,
}

impl super::Command for Changelog {
    #[tracing::instrument(name = "changelog", level = "trace", skip_all)]
    fn run(&self, options: &GlobalOptions) -> Result<()> {
        git::ensure_in_git_worktree()?;

        let formatter = load_formatter(options)?;
        let commits = git::log(self.rev_range.as_deref())?;
        let changelog = changelog::Changelog::build(&formatter, &commits);

        if changelog.is_empty() {
            warning!("There is no commit to include in the changelog.");
            return Ok(());
        }

        print!("{}", changelog.render());

        if let Some(increment) = changelog.increment {
            hint!("Suggested version increment: {increment}");
        }

        Ok(())
    }
}
