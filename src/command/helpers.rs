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

//! Helpers for writing CLIs.

use std::path::{Path, PathBuf};

use eyre::Result;

use crate::{
    config::{CONFIG_FILE_NAMES, Config},
    formatter::CommitFormatter,
    git,
};

use super::GlobalOptions;

/// Loads the configuration and builds the commit formatter from it.
pub(super) fn load_formatter(
    options: &GlobalOptions,
) -> Result<CommitFormatter> {
    let config = match &options.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    Ok(CommitFormatter::new(&config)?)
}

/// Returns the path where to write the configuration.
///
/// Defaults to the first configuration file name at the repository root.
pub(super) fn config_file(options: &GlobalOptions) -> Result<PathBuf> {
    match &options.config {
        Some(path) => Ok(path.clone()),
        None => {
            git::ensure_in_git_worktree()?;
            Ok(git::repo_root()?.join(default_config_file_name()))
        }
    }
}

/// Returns the name of the configuration file written by `init`.
fn default_config_file_name() -> &'static Path {
    let [name, ..] = CONFIG_FILE_NAMES;
    Path::new(name)
}

/// Uncapitalises the first character in s.
pub fn uncapitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Prints a success.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        let message = format!($($arg)*).green().bold();
        println!("{message}");
    }};
}

/// Prints a warning.
#[macro_export]
macro_rules! warning {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        let message = format!($($arg)*).yellow().bold();
        eprintln!("{message}");
    }};
}

/// Prints an error.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        let message = format!($($arg)*);
        let message = $crate::command::helpers::uncapitalise(&message);
        let message = format!("Error: {message}").red().bold();
        eprintln!("{message}");
    }};
}

/// Prints a hint.
#[macro_export]
macro_rules! hint {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        let message = format!($($arg)*).blue();
        eprintln!("{message}");
    }};
}
