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

//! The command-line interface.

mod changelog;
mod check;
mod commit;
mod docs;
mod init;

pub mod helpers;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eyre::Result;
use inquire::InquireError;

use self::{
    changelog::Changelog,
    check::{Check, CheckError},
    commit::Commit,
    docs::{Example, Info, Schema},
    init::{Init, InitError},
};
use crate::{
    config::CONFIG_FILE_NAMES, error, formatter::ConfigError, hint, warning,
};

/// A Git extension writing conventional commits scoped by Jira issues.
#[derive(Debug, Parser)]
#[command(author, version)]
pub struct GitJiraCz {
    /// Options shared by all subcommands.
    #[command(flatten)]
    options: GlobalOptions,
    /// The subcommand to run.
    #[command(subcommand)]
    command: GitJiraCzCommand,
}

/// Options shared by all subcommands.
#[derive(Debug, Args)]
struct GlobalOptions {
    /// Use this configuration file instead of the one in the repository.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// The subcommands.
#[derive(Debug, Subcommand)]
enum GitJiraCzCommand {
    /// Initialises the configuration.
    Init(Init),
    /// Runs the commit wizard.
    Commit(Commit),
    /// Checks a commit message against the commit schema.
    Check(Check),
    /// Prints the changelog, with links to Jira and GitHub.
    Changelog(Changelog),
    /// Prints an example commit message.
    Example(Example),
    /// Prints the schema of a commit message.
    Schema(Schema),
    /// Prints information about the commit rules.
    Info(Info),
}

/// A subcommand.
trait Command {
    /// Runs the command.
    fn run(&self, options: &GlobalOptions) -> Result<()>;
}

impl GitJiraCz {
    /// Runs git-jira-cz.
    pub fn run() -> Result<()> {
        crate::tracing::init();

        let Self { options, command } = Self::parse();
        tracing::debug!(?options, ?command, "running the command");

        let result = match command {
            GitJiraCzCommand::Init(init) => init.run(&options),
            GitJiraCzCommand::Commit(commit) => commit.run(&options),
            GitJiraCzCommand::Check(check) => check.run(&options),
            GitJiraCzCommand::Changelog(changelog) => changelog.run(&options),
            GitJiraCzCommand::Example(example) => example.run(&options),
            GitJiraCzCommand::Schema(schema) => schema.run(&options),
            GitJiraCzCommand::Info(info) => info.run(&options),
        };

        match result {
            Err(e) => handle_errors(e),
            Ok(()) => Ok(()),
        }
    }
}

#[expect(clippy::exit, reason = "Usage errors end the process early.")]
fn handle_errors(e: color_eyre::Report) -> Result<()> {
    if let Some(e) = e.downcast_ref::<ConfigError>() {
        error!("{e}");
        let files = CONFIG_FILE_NAMES.join("|");
        match e {
            ConfigError::MissingJiraBaseUrl => {
                hint!(
                    "Please add the key jira_base_url to your {files} config \
                        file."
                );
            }
            ConfigError::MissingGithubRepo => {
                hint!(
                    "Please add the key github_repo to your {files} config \
                        file."
                );
            }
            ConfigError::EmptyJiraPrefixList => {
                hint!("Remove jira_prefix to type fully-qualified issues.");
            }
            ConfigError::UnsupportedChangeTypeMap => {
                hint!("Remove change_type_map from your {files} config file.");
            }
        }
        std::process::exit(exitcode::CONFIG);
    } else if let Some(e) = e.downcast_ref::<InitError>() {
        match e {
            InitError::ExistingConfig { .. } => {
                error!("{e}");
                hint!(
                    "You can force the command by running `git jira-cz init \
                        -f`."
                );
            }
        }
        std::process::exit(exitcode::CANTCREAT);
    } else if let Some(e) = e.downcast_ref::<CheckError>() {
        error!("{e}");
        if let CheckError::InvalidMessage { .. } = e {
            hint!(
                "The commit message must follow the pattern: {}",
                check::PATTERN_HINT
            );
        }
        std::process::exit(exitcode::DATAERR);
    } else if let Some(
        InquireError::OperationCanceled | InquireError::OperationInterrupted,
    ) = e.downcast_ref::<InquireError>()
    {
        warning!("Aborted.");
        std::process::exit(exitcode::TEMPFAIL);
    } else {
        Err(e)
    }
}
