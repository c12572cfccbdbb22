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

//! The `init` subcommand.

use std::{fs, path::PathBuf};

use askama::Template;
use clap::Parser;
use eyre::{Result, bail};
use inquire::{CustomUserError, Text, validator::Validation};
use thiserror::Error;

use super::{GlobalOptions, helpers::config_file};
use crate::{hint, success};

/// The init command.
#[derive(Debug, Parser)]
pub struct Init {
    /// The base URL of the Jira instance.
    #[arg(long, value_name = "URL", requires = "github_repo")]
    jira_base_url: Option<String>,
    /// The GitHub repository, as `owner/name`.
    #[arg(long, value_name = "OWNER/NAME", requires = "jira_base_url")]
    github_repo: Option<String>,
    /// A Jira project prefix, like `XZ-`. Can be repeated.
    #[arg(long, value_name = "PREFIX")]
    jira_prefix: Vec<String>,
    /// Force the init process.
    #[arg(long, short = 'f')]
    force: bool,
}

/// Usage errors of `git jira-cz init`.
#[derive(Debug, Error)]
pub enum InitError {
    /// A configuration already exists.
    #[error("There is already a configuration in {}", path.display())]
    ExistingConfig {
        /// The path of the existing configuration.
        path: PathBuf,
    },
}

/// Parameters to generate a configuration file.
///
/// Values are rendered as TOML values, so that they are properly quoted.
#[derive(Debug, Template)]
#[template(path = "cz.toml.jinja", escape = "none")]
struct Config {
    /// The Jira project prefix(es).
    jira_prefix: Option<String>,
    /// The base URL of the Jira instance.
    jira_base_url: String,
    /// The GitHub repository.
    github_repo: String,
    /// The base URL of GitHub.
    github_base_url: Option<String>,
}

impl super::Command for Init {
    #[tracing::instrument(name = "init", level = "trace", skip_all)]
    fn run(&self, options: &GlobalOptions) -> Result<()> {
        let path = config_file(options)?;

        if !self.force && path.exists() {
            bail!(InitError::ExistingConfig { path });
        }

        let config = match (&self.jira_base_url, &self.github_repo) {
            (Some(jira_base_url), Some(github_repo)) => {
                Config::new(&self.jira_prefix, jira_base_url, github_repo)
            }
            _ => Config::run_wizard()?,
        };

        tracing::debug!(?path, ?config, "writing the configuration");
        fs::write(&path, format!("{}\n", config.render()?))?;

        success!("{} has been created!", path.display());
        hint!("You can now edit it to adjust the configuration.");

        Ok(())
    }
}

impl Config {
    /// Builds the parameters from raw values.
    fn new(
        jira_prefixes: &[String],
        jira_base_url: &str,
        github_repo: &str,
    ) -> Self {
        let jira_prefix = match jira_prefixes {
            [] => None,
            [prefix] => Some(toml_string(prefix)),
            prefixes => Some(toml::Value::from(prefixes.to_vec()).to_string()),
        };

        Self {
            jira_prefix,
            jira_base_url: toml_string(jira_base_url),
            github_repo: toml_string(github_repo),
            github_base_url: None,
        }
    }

    /// Runs the wizard to fill the parameters for the configuration.
    fn run_wizard() -> Result<Self> {
        let jira_base_url = Text::new("Jira base URL")
            .with_placeholder("https://myproject.atlassian.net")
            .with_validator(validate_url)
            .prompt()?;

        let github_repo = Text::new("GitHub repository")
            .with_placeholder("owner/name")
            .with_validator(validate_repo)
            .prompt()?;

        let jira_prefixes = Text::new("Jira project prefixes")
            .with_placeholder("XZ-, XY-")
            .with_help_message(
                "Separate several projects with commas. Leave empty to type \
                    fully-qualified issues like XZ-42.",
            )
            .prompt()?;

        let jira_prefixes = jira_prefixes
            .split(',')
            .map(str::trim)
            .filter(|prefix| !prefix.is_empty())
            .map(ToOwned::to_owned)
            .collect::<Vec<_>>();

        let mut config =
            Self::new(&jira_prefixes, &jira_base_url, &github_repo);

        let github_base_url = Text::new("GitHub base URL")
            .with_placeholder("https://github.com/")
            .with_help_message("Leave empty to use https://github.com/.")
            .prompt()?;

        if !github_base_url.trim().is_empty() {
            config.github_base_url = Some(toml_string(github_base_url.trim()));
        }

        Ok(config)
    }
}

/// Renders a string as a TOML value.
fn toml_string(value: &str) -> String {
    toml::Value::from(value).to_string()
}

/// Validates the Jira base URL.
#[expect(clippy::unnecessary_wraps, reason = "Imposed by Inquire.")]
fn validate_url(url: &str) -> Result<Validation, CustomUserError> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(Validation::Valid)
    } else {
        Ok(Validation::Invalid(
            "The URL must start with https:// or http://".into(),
        ))
    }
}

/// Validates the GitHub repository.
#[expect(clippy::unnecessary_wraps, reason = "Imposed by Inquire.")]
fn validate_repo(repo: &str) -> Result<Validation, CustomUserError> {
    match repo.split_once('/') {
        Some((owner, name))
            if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
        {
            Ok(Validation::Valid)
        }
        _ => Ok(Validation::Invalid(
            "The repository must be in the form owner/name".into(),
        )),
    }
}
