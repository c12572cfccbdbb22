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

//! A Git extension writing conventional commits scoped by Jira issues.
//!
//! The heart of the crate is the [`CommitFormatter`], a conventional-commit
//! style where the scope is a list of Jira issues. It asks its
//! [`questions`](CommitFormatter::questions), validates the answers, assembles
//! the commit message and, when rendering a changelog, rewrites the entries to
//! link to Jira and GitHub.

pub mod changelog;
pub mod config;
pub mod formatter;
pub mod git;

mod command;
mod tracing;

pub use command::GitJiraCz;
pub use config::Config;
pub use formatter::{Answers, CommitFormatter};
