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

//! Utilities to help with tracing.

use tracing_subscriber::EnvFilter;

use crate::command::helpers::uncapitalise;

/// The environment variable to configure the log filter.
const LOG_ENV_VAR: &str = "GIT_JIRA_CZ_LOG";

/// The log filter used when [`LOG_ENV_VAR`] is not set.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Installs the global subscriber, logging to stderr.
///
/// The filter is read from `GIT_JIRA_CZ_LOG`, with the `EnvFilter` directive
/// syntax, and defaults to `warn`.
pub fn init() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(build_filter(std::env::var(LOG_ENV_VAR).ok()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    // A subscriber may already be installed, which is fine.
    if let Err(error) = result {
        tracing::debug!(%error, "a global subscriber is already installed");
    }
}

/// Builds the log filter from an optional directive.
fn build_filter(directive: Option<String>) -> EnvFilter {
    directive
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// An extension trait for [`Result`] to insert logging.
pub trait LogResult {
    /// Logs the error.
    ///
    /// If the [`Result`] is an [`Err`], logs the error. Otherwise this function
    /// does nothing.
    fn log_err(self) -> Self;
}

impl<T, E> LogResult for Result<T, E>
where
    E: std::fmt::Display + std::fmt::Debug,
{
    fn log_err(self) -> Self {
        if let Err(error) = &self {
            tracing::error!(?error, "{}", uncapitalise(&error.to_string()));
        }

        self
    }
}
