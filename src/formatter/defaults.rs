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

//! Constants of the conventional-commit style.

use std::fmt;

use indexmap::IndexMap;
use indoc::indoc;

/// The change types that can be selected, with their description.
pub const CHANGE_TYPES: [(&str, &str); 9] = [
    ("fix", "fix: A bug fix. Correlates with PATCH in SemVer"),
    ("feat", "feat: A new feature. Correlates with MINOR in SemVer"),
    ("docs", "docs: Documentation only changes"),
    (
        "style",
        "style: Changes that do not affect the meaning of the code \
            (white-space, formatting, missing semi-colons, etc)",
    ),
    (
        "refactor",
        "refactor: A code change that neither fixes a bug nor adds a feature",
    ),
    ("perf", "perf: A code change that improves performance"),
    ("test", "test: Adding missing or correcting existing tests"),
    (
        "build",
        "build: Changes that affect the build system or external \
            dependencies (example scopes: pip, docker, npm)",
    ),
    (
        "ci",
        "ci: Changes to our CI configuration files and scripts \
            (example scopes: GitLabCI)",
    ),
];

/// The only supported mapping from change types to changelog titles.
pub const CHANGE_TYPE_MAP: [(&str, &str); 4] = [
    ("feat", "Feat"),
    ("fix", "Fix"),
    ("refactor", "Refactor"),
    ("perf", "Perf"),
];

/// The base URL of GitHub, used when `github_base_url` is not configured.
pub const GITHUB_BASE_URL: &str = "https://github.com/";

/// The grammar of a commit title: type, optional scope, optional `!`.
pub const SCHEMA_PATTERN: &str = concat!(
    r"(build|ci|docs|feat|fix|perf|refactor|style|test|chore|revert|bump)",
    r"(\(\S+\))?!?:(\s.*)",
);

/// Matches the part of a commit line relevant for bumping.
pub const BUMP_PATTERN: &str = r"^((BREAKING[- ]CHANGE|\w+)(\(.+\))?!?):";

/// Selects the commits to include in the changelog.
pub const CHANGELOG_PATTERN: &str = BUMP_PATTERN;

/// Parses a commit title into its change type, scope and message.
pub const COMMIT_PARSER: &str = concat!(
    r"^((?P<change_type>feat|fix|refactor|perf|BREAKING CHANGE)",
    r"(?:\((?P<scope>[^()\r\n]*)\)|\()?(?P<breaking>!)?|\w+!):",
    r"\s(?P<message>.*)?",
);

/// The version increment for matches of [`BUMP_PATTERN`], by priority.
pub const BUMP_MAP: [(&str, Increment); 6] = [
    (r"^.+!$", Increment::Major),
    (r"^BREAKING[- ]CHANGE", Increment::Major),
    (r"^feat", Increment::Minor),
    (r"^fix", Increment::Patch),
    (r"^refactor", Increment::Patch),
    (r"^perf", Increment::Patch),
];

/// An example commit message.
pub const EXAMPLE: &str = indoc! {"
    fix: correct minor typos in code

    see the issue for details on the typos fixed

    closes issue #12"
};

/// The schema of a commit message.
pub const SCHEMA: &str = indoc! {"
    <type>(<scope>): <subject>
    <BLANK LINE>
    <body>
    <BLANK LINE>
    (BREAKING CHANGE: )<footer>"
};

/// Documentation about conventional commits.
pub const INFO: &str =
    include_str!("../../templates/conventional_commits_info.txt");

/// A SemVer version increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Increment {
    /// A patch increment.
    Patch,
    /// A minor increment.
    Minor,
    /// A major increment.
    Major,
}

impl fmt::Display for Increment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Patch => write!(f, "PATCH"),
            Self::Minor => write!(f, "MINOR"),
            Self::Major => write!(f, "MAJOR"),
        }
    }
}

/// Returns [`CHANGE_TYPE_MAP`] as an ordered map.
pub fn change_type_map() -> IndexMap<String, String> {
    CHANGE_TYPE_MAP
        .iter()
        .map(|&(ty, title)| (ty.to_owned(), title.to_owned()))
        .collect()
}
