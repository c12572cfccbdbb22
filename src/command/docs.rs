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

//! The `example`, `schema` and `info` subcommands.

use clap::Parser;
use eyre::Result;

use super::{GlobalOptions, helpers::load_formatter};

/// The example command.
#[derive(Debug, Parser)]
pub struct Example;

/// The schema command.
#[derive(Debug, Parser)]
pub struct Schema {
    /// Print the regular expression matching a commit title instead.
    #[arg(long)]
    pattern: bool,
}

/// The info command.
#[derive(Debug, Parser)]
pub struct Info;

impl super::Command for Example {
    fn run(&self, options: &GlobalOptions) -> Result<()> {
        println!("{}", load_formatter(options)?.example());
        Ok(())
    }
}

impl super::Command for Schema {
    fn run(&self, options: &GlobalOptions) -> Result<()> {
        let formatter = load_formatter(options)?;

        if self.pattern {
            println!("{}", formatter.schema_pattern());
        } else {
            println!("{}", formatter.schema());
        }

        Ok(())
    }
}

impl super::Command for Info {
    fn run(&self, options: &GlobalOptions) -> Result<()> {
        print!("{}", load_formatter(options)?.info());
        Ok(())
    }
}
