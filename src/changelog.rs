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

//! Changelog generation from the Git log.

use std::sync::LazyLock;

use indexmap::IndexMap;
use itertools::Itertools as _;
use regex::Regex;

use crate::{
    formatter::{
        CommitFormatter,
        defaults::{
            BUMP_MAP, BUMP_PATTERN, CHANGELOG_PATTERN, COMMIT_PARSER, Increment,
        },
    },
    git::GitCommit,
};

/// The title of the section for breaking changes.
pub const BREAKING_CHANGE: &str = "BREAKING CHANGE";

#[expect(clippy::expect_used, reason = "The regex is known to be valid.")]
static CHANGELOG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(CHANGELOG_PATTERN).expect("invalid changelog pattern")
});

#[expect(clippy::expect_used, reason = "The regex is known to be valid.")]
static COMMIT_PARSER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(COMMIT_PARSER).expect("invalid commit parser")
});

#[expect(clippy::expect_used, reason = "The regex is known to be valid.")]
static BUMP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?m){BUMP_PATTERN}")).expect("invalid bump pattern")
});

#[expect(clippy::expect_used, reason = "The regexes are known to be valid.")]
static BUMP_MAP_REGEXES: LazyLock<Vec<(Regex, Increment)>> =
    LazyLock::new(|| {
        BUMP_MAP
            .iter()
            .map(|&(pattern, increment)| {
                (Regex::new(pattern).expect("invalid bump map"), increment)
            })
            .collect()
    });

/// A commit parsed for the changelog.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    /// The change type, like `feat`.
    pub change_type: String,
    /// The comma-separated issues, or an empty string.
    pub scope: String,
    /// The description.
    pub message: String,
    /// Whether the title marks a breaking change with `!`.
    pub breaking: bool,
}

/// A changelog for a range of commits.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Changelog {
    /// The entries, by section title.
    pub sections: IndexMap<String, Vec<ParsedMessage>>,
    /// The version increment implied by the commits.
    pub increment: Option<Increment>,
}

impl ParsedMessage {
    /// Parses the title of a commit.
    ///
    /// Returns [`None`] for commits that have no place in the changelog.
    pub fn parse(title: &str) -> Option<Self> {
        if !CHANGELOG_REGEX.is_match(title) {
            return None;
        }

        let captures = COMMIT_PARSER_REGEX.captures(title)?;
        let group = |name: &str| {
            captures
                .name(name)
                .map(|group| group.as_str().to_owned())
                .unwrap_or_default()
        };

        let change_type = group("change_type");

        Some(Self {
            breaking: captures.name("breaking").is_some()
                || change_type.is_empty(),
            scope: group("scope"),
            message: group("message").trim().to_owned(),
            change_type,
        })
    }
}

impl Changelog {
    /// Builds the changelog of `commits`, given from the newest to the oldest.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn build(formatter: &CommitFormatter, commits: &[GitCommit]) -> Self {
        let mut sections = IndexMap::new();
        sections.insert(String::from(BREAKING_CHANGE), vec![]);
        for title in formatter.change_type_map().values() {
            sections.insert(title.clone(), vec![]);
        }

        for commit in commits {
            let Some(parsed_message) = ParsedMessage::parse(&commit.title)
            else {
                tracing::trace!(title = %commit.title, "skipping commit");
                continue;
            };

            let section = if parsed_message.breaking
                || parsed_message.change_type == BREAKING_CHANGE
            {
                String::from(BREAKING_CHANGE)
            } else {
                formatter
                    .change_type_map()
                    .get(&parsed_message.change_type)
                    .cloned()
                    .unwrap_or_else(|| parsed_message.change_type.clone())
            };

            let entry = formatter
                .changelog_message_builder_hook(parsed_message, commit);
            sections.entry(section).or_default().push(entry);
        }

        sections.retain(|_, entries| !entries.is_empty());

        Self {
            sections,
            increment: increment(commits),
        }
    }

    /// Renders the changelog in Markdown.
    pub fn render(&self) -> String {
        self.sections
            .iter()
            .map(|(title, entries)| {
                let entries = entries.iter().map(render_entry).join("\n");
                format!("### {title}\n\n{entries}\n")
            })
            .join("\n")
    }

    /// Checks whether there is no entry.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Renders an entry of the changelog.
fn render_entry(entry: &ParsedMessage) -> String {
    if entry.scope.is_empty() {
        format!("- {}", entry.message)
    } else {
        format!("- **{}**: {}", entry.scope, entry.message)
    }
}

/// Returns the highest version increment implied by `commits`.
///
/// Each keyword matched by the bump pattern, in the title or a footer, gets the
/// increment of the first matching rule of the bump map.
pub fn increment(commits: &[GitCommit]) -> Option<Increment> {
    commits
        .iter()
        .flat_map(|commit| {
            let message = commit.message();
            BUMP_REGEX
                .captures_iter(&message)
                .filter_map(|captures| captures.get(1))
                .filter_map(|keyword| keyword_increment(keyword.as_str()))
                .collect::<Vec<_>>()
        })
        .max()
}

/// Returns the increment of a bump keyword.
fn keyword_increment(keyword: &str) -> Option<Increment> {
    BUMP_MAP_REGEXES
        .iter()
        .find(|(regex, _)| regex.is_match(keyword))
        .map(|&(_, increment)| increment)
}
