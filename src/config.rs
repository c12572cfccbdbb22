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

//! Configuration for git-jira-cz.
//!
//! The configuration lives in the `[tool.commitizen]` table of a `.cz.toml`,
//! `cz.toml` or `pyproject.toml` at the root of the repository, so that it can
//! be shared with other conventional-commit tooling. Keys that are not known
//! here are ignored.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    git::{self, GitError},
    tracing::LogResult as _,
};

/// An error that can occur when loading the configuration.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The path of the configuration file cannot be resolved.
    #[error("Failed to get the configuration file path")]
    ConfigFile(#[from] GitError),
    /// The configuration file cannot be read.
    #[error("Failed to read {path}")]
    Read {
        /// The path of the configuration file.
        path: PathBuf,
        /// The OS error.
        #[source]
        os_error: io::Error,
    },
    /// The configuration file contains invalid TOML.
    #[error("Invalid configuration in {path}")]
    InvalidConfig {
        /// The path of the configuration file.
        path: PathBuf,
        /// The parsing error.
        #[source]
        parse_error: toml::de::Error,
    },
}

/// The names of the files that can hold the configuration, by priority.
pub const CONFIG_FILE_NAMES: [&str; 3] =
    [".cz.toml", "cz.toml", "pyproject.toml"];

/// The git-jira-cz configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// The Jira project prefix(es) to prepend to issue numbers.
    pub jira_prefix: Option<JiraPrefixConfig>,
    /// The base URL of the Jira instance.
    pub jira_base_url: Option<String>,
    /// The GitHub repository, as `owner/name`.
    pub github_repo: Option<String>,
    /// The base URL of GitHub.
    pub github_base_url: Option<String>,
    /// The mapping from change types to changelog section titles.
    pub change_type_map: Option<IndexMap<String, String>>,
}

/// The raw value of `jira_prefix`: either a single prefix or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum JiraPrefixConfig {
    /// A single Jira project prefix.
    Single(String),
    /// Several Jira project prefixes to choose from.
    Multiple(Vec<String>),
}

/// A configuration file, where only the commitizen table is of interest.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    /// The `[tool]` table.
    #[serde(default)]
    tool: Tool,
}

/// The `[tool]` table.
#[derive(Debug, Default, Deserialize)]
struct Tool {
    /// The `[tool.commitizen]` table.
    commitizen: Option<Config>,
}

impl Config {
    /// Loads the configuration from the repository root.
    ///
    /// When no configuration file exists, returns an empty configuration.
    #[tracing::instrument(name = "load_config", level = "trace")]
    pub fn load() -> Result<Self, LoadError> {
        let repo_root = git::repo_root().log_err()?;

        let Some(path) = CONFIG_FILE_NAMES
            .iter()
            .map(|name| repo_root.join(name))
            .find(|path| path.exists())
        else {
            tracing::warn!(?repo_root, "no configuration file found");
            return Ok(Self::default());
        };

        Self::load_from(&path)
    }

    /// Loads the configuration from the given file.
    #[tracing::instrument(level = "trace")]
    pub fn load_from(path: &Path) -> Result<Self, LoadError> {
        tracing::debug!(?path, "loading the configuration");

        let toml = fs::read_to_string(path)
            .map_err(|os_error| LoadError::Read {
                path: path.to_owned(),
                os_error,
            })
            .log_err()?;

        Self::from_toml(&toml)
            .map_err(|parse_error| LoadError::InvalidConfig {
                path: path.to_owned(),
                parse_error,
            })
            .log_err()
    }

    /// Builds the configuration from its TOML representation.
    ///
    /// A document without a `[tool.commitizen]` table yields an empty
    /// configuration.
    pub fn from_toml(toml: &str) -> Result<Self, toml::de::Error> {
        let config_file: ConfigFile = toml::from_str(toml)?;
        let config = config_file.tool.commitizen.unwrap_or_default();
        tracing::debug!(?config);
        Ok(config)
    }
}

#[cfg(test)]
mod test {
    #![allow(clippy::pedantic, clippy::restriction)]

    use indexmap::indexmap;
    use indoc::indoc;

    use super::*;

    #[test]
    fn reads_the_commitizen_table() {
        let config = Config::from_toml(indoc! {r#"
            [tool.commitizen]
            name = "cz_github_jira_conventional"
            version = "1.2.0"
            jira_prefix = "XZ-"
            jira_base_url = "https://myproject.atlassian.net"
            github_repo = "org/repo"
        "#})
        .unwrap();

        assert_eq!(
            config,
            Config {
                jira_prefix: Some(JiraPrefixConfig::Single(String::from(
                    "XZ-"
                ))),
                jira_base_url: Some(String::from(
                    "https://myproject.atlassian.net"
                )),
                github_repo: Some(String::from("org/repo")),
                github_base_url: None,
                change_type_map: None,
            }
        );
    }

    #[test]
    fn reads_a_list_of_prefixes() {
        let config = Config::from_toml(indoc! {r#"
            [tool.commitizen]
            jira_prefix = ["XZ-", "XY-"]
        "#})
        .unwrap();

        assert_eq!(
            config.jira_prefix,
            Some(JiraPrefixConfig::Multiple(vec![
                String::from("XZ-"),
                String::from("XY-"),
            ]))
        );
    }

    #[test]
    fn reads_the_change_type_map() {
        let config = Config::from_toml(indoc! {r#"
            [tool.commitizen.change_type_map]
            feat = "Feat"
            fix = "Fix"
        "#})
        .unwrap();

        assert_eq!(
            config.change_type_map,
            Some(indexmap! {
                String::from("feat") => String::from("Feat"),
                String::from("fix") => String::from("Fix"),
            })
        );
    }

    #[test]
    fn other_tools_only_give_an_empty_config() {
        let config = Config::from_toml(indoc! {r#"
            [project]
            name = "something"

            [tool.black]
            line-length = 88
        "#})
        .unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn rejects_invalid_toml() {
        assert!(Config::from_toml("[tool.commitizen\n").is_err());
    }
}
