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

//! The commit formatter.
//!
//! A conventional-commit style where the scope lists the Jira issues concerned
//! by the change, e.g.:
//!
//! ```text
//! feat(XZ-42,XZ-123): add a widget
//! ```
//!
//! The formatter is built once from the [`Config`]. It then provides the
//! questions to ask, validates the answers, assembles the commit message, and
//! adds Jira and GitHub links to the changelog entries.

pub mod defaults;

mod question;

pub use question::{
    AnswerValue, Choice, Filter, Question, QuestionKind, QuestionName,
    multiple_line_breaker, parse_subject,
};

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use thiserror::Error;

use crate::{
    changelog::ParsedMessage,
    config::{Config, JiraPrefixConfig},
    git::GitCommit,
};

use self::defaults::{
    BUMP_MAP, BUMP_PATTERN, CHANGE_TYPES, CHANGELOG_PATTERN, COMMIT_PARSER,
    EXAMPLE, GITHUB_BASE_URL, INFO, Increment, SCHEMA, SCHEMA_PATTERN,
};

/// Issue numbers, when the Jira project prefix is known.
#[expect(clippy::expect_used, reason = "The regex is known to be valid.")]
static ISSUE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("invalid issue number regex"));

/// Fully-qualified Jira issues.
#[expect(clippy::expect_used, reason = "The regex is known to be valid.")]
static QUALIFIED_ISSUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+-\d+$").expect("invalid qualified issue regex")
});

/// The commit schema, anchored at the start of the message.
#[expect(clippy::expect_used, reason = "The regex is known to be valid.")]
static SCHEMA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^(?:{SCHEMA_PATTERN})"))
        .expect("invalid schema regex")
});

/// Errors in the configuration, detected when building the formatter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `jira_base_url` is not set.
    #[error("The key `jira_base_url` is missing from the configuration")]
    MissingJiraBaseUrl,
    /// `github_repo` is not set.
    #[error("The key `github_repo` is missing from the configuration")]
    MissingGithubRepo,
    /// `jira_prefix` is an empty list.
    #[error("The key `jira_prefix` must not be an empty list")]
    EmptyJiraPrefixList,
    /// `change_type_map` is not the supported one.
    #[error("Custom values for `change_type_map` are not supported")]
    UnsupportedChangeTypeMap,
}

/// An invalid answer, to be asked again.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidAnswerError {
    /// A Jira issue in the scope does not have the expected format.
    #[error("JIRA scope of '{issue}' is invalid")]
    InvalidIssue {
        /// The invalid issue.
        issue: String,
    },
    /// A required answer is empty.
    #[error("{message}")]
    Required {
        /// What is required.
        message: &'static str,
    },
}

/// The Jira project prefix(es), resolved from the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JiraPrefix {
    /// Issues are given fully qualified, like `XZ-42`.
    None,
    /// Issues are numbers in a single project.
    Single(String),
    /// Issues are numbers in a project selected among several.
    Multiple(Vec<String>),
}

/// The answers to the [`questions`](CommitFormatter::questions).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Answers {
    /// The change type.
    pub prefix: String,
    /// The Jira project selected among several.
    pub issue_jira_prefix: Option<String>,
    /// The issues, without their project prefix.
    pub scope: Vec<String>,
    /// The short summary.
    pub subject: String,
    /// The long description.
    pub body: String,
    /// Whether the change is breaking.
    pub is_breaking_change: bool,
    /// The footer.
    pub footer: String,
}

/// The commit formatter.
#[derive(Debug, Clone)]
pub struct CommitFormatter {
    /// The Jira project prefix(es).
    jira_prefix: JiraPrefix,
    /// The base URL of the Jira instance.
    jira_base_url: String,
    /// The GitHub repository.
    github_repo: String,
    /// The base URL of GitHub.
    github_base_url: String,
    /// The mapping from change types to changelog titles.
    change_type_map: IndexMap<String, String>,
}

impl CommitFormatter {
    /// Builds the formatter from the configuration.
    #[tracing::instrument(name = "new_commit_formatter", level = "trace")]
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let jira_base_url = config
            .jira_base_url
            .clone()
            .ok_or(ConfigError::MissingJiraBaseUrl)?;

        let github_repo = config
            .github_repo
            .clone()
            .ok_or(ConfigError::MissingGithubRepo)?;

        let github_base_url = config
            .github_base_url
            .clone()
            .unwrap_or_else(|| String::from(GITHUB_BASE_URL));

        let jira_prefix = match &config.jira_prefix {
            None => JiraPrefix::None,
            Some(JiraPrefixConfig::Single(prefix)) => {
                JiraPrefix::Single(prefix.clone())
            }
            Some(JiraPrefixConfig::Multiple(prefixes)) => {
                if prefixes.is_empty() {
                    return Err(ConfigError::EmptyJiraPrefixList);
                }
                JiraPrefix::Multiple(prefixes.clone())
            }
        };

        let change_type_map = defaults::change_type_map();
        if config
            .change_type_map
            .as_ref()
            .is_some_and(|map| *map != change_type_map)
        {
            return Err(ConfigError::UnsupportedChangeTypeMap);
        }

        let formatter = Self {
            jira_prefix,
            jira_base_url,
            github_repo,
            github_base_url,
            change_type_map,
        };

        tracing::debug!(?formatter);
        Ok(formatter)
    }

    /// Returns the Jira project prefix(es).
    pub const fn jira_prefix(&self) -> &JiraPrefix {
        &self.jira_prefix
    }

    /// Returns the mapping from change types to changelog titles.
    pub const fn change_type_map(&self) -> &IndexMap<String, String> {
        &self.change_type_map
    }

    /// Returns an example of the issues to type in the scope.
    pub fn issue_multiple_hint(&self) -> &'static str {
        match self.jira_prefix {
            JiraPrefix::None => "XZ-42, XY-123",
            JiraPrefix::Single(_) | JiraPrefix::Multiple(_) => "42, 123",
        }
    }

    /// Returns the questions to ask, in order.
    pub fn questions(&self) -> Vec<Question> {
        let mut questions = vec![Question {
            name: QuestionName::Prefix,
            kind: QuestionKind::List {
                choices: CHANGE_TYPES
                    .iter()
                    .map(|&(value, name)| Choice::new(value, name))
                    .collect(),
            },
            message: String::from(
                "Select the type of change you are committing",
            ),
            filter: None,
        }];

        if let JiraPrefix::Multiple(prefixes) = &self.jira_prefix {
            questions.push(Question {
                name: QuestionName::IssueJiraPrefix,
                kind: QuestionKind::List {
                    choices: prefixes
                        .iter()
                        .map(|prefix| Choice::new(prefix, prefix))
                        .collect(),
                },
                message: String::from("Select the JIRA project of the issues"),
                filter: None,
            });
        }

        let displayed_prefix = match &self.jira_prefix {
            JiraPrefix::Single(prefix) => prefix.as_str(),
            JiraPrefix::None | JiraPrefix::Multiple(_) => "",
        };

        questions.extend([
            Question {
                name: QuestionName::Scope,
                kind: QuestionKind::Input,
                message: format!(
                    "JIRA issue number (multiple \"{}\"). {displayed_prefix}",
                    self.issue_multiple_hint()
                ),
                filter: Some(Filter::Scope),
            },
            Question {
                name: QuestionName::Subject,
                kind: QuestionKind::Input,
                message: String::from(
                    "Write a short and imperative summary of the code \
                        changes: (lower case and no period)",
                ),
                filter: Some(Filter::Subject),
            },
            Question {
                name: QuestionName::Body,
                kind: QuestionKind::Input,
                message: String::from(
                    "Provide additional contextual information about the \
                        code changes: (press [enter] to skip)",
                ),
                filter: Some(Filter::Body),
            },
            Question {
                name: QuestionName::IsBreakingChange,
                kind: QuestionKind::Confirm { default: false },
                message: String::from(
                    "Is this a BREAKING CHANGE? Correlates with MAJOR in \
                        SemVer",
                ),
                filter: None,
            },
            Question {
                name: QuestionName::Footer,
                kind: QuestionKind::Input,
                message: String::from(
                    "Footer. Information about Breaking Changes and \
                        reference issues that this commit closes: (press \
                        [enter] to skip)",
                ),
                filter: None,
            },
        ]);

        questions
    }

    /// Applies the filter of `question` to the raw input.
    ///
    /// Questions without a filter record the input as is.
    pub fn filter(
        &self,
        question: &Question,
        raw: &str,
    ) -> Result<AnswerValue, InvalidAnswerError> {
        match question.filter {
            Some(filter) => filter.apply(self, raw),
            None => Ok(AnswerValue::Text(raw.to_owned())),
        }
    }

    /// Parses the scope as a comma-separated list of Jira issues.
    ///
    /// When a Jira project prefix is configured, issues are numbers and the
    /// prefix is added later by [`message`](Self::message). Otherwise, they
    /// must be fully qualified, like `XZ-42`.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn parse_scope(
        &self,
        text: &str,
    ) -> Result<Vec<String>, InvalidAnswerError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(vec![]);
        }

        let issue_regex = match self.jira_prefix {
            JiraPrefix::None => &QUALIFIED_ISSUE_REGEX,
            JiraPrefix::Single(_) | JiraPrefix::Multiple(_) => {
                &ISSUE_NUMBER_REGEX
            }
        };

        let issues = text
            .split(',')
            .map(str::trim)
            .map(|issue| {
                if issue_regex.is_match(issue) {
                    Ok(issue.to_owned())
                } else {
                    Err(InvalidAnswerError::InvalidIssue {
                        issue: issue.to_owned(),
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        if issues.is_empty() {
            return Err(InvalidAnswerError::Required {
                message: "JIRA scope is required",
            });
        }

        tracing::trace!(?issues);
        Ok(issues)
    }

    /// Assembles the commit message.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn message(&self, answers: &Answers) -> String {
        let jira_prefix = match (&answers.issue_jira_prefix, &self.jira_prefix)
        {
            (Some(prefix), _) | (None, JiraPrefix::Single(prefix)) => {
                prefix.as_str()
            }
            (None, JiraPrefix::None | JiraPrefix::Multiple(_)) => "",
        };

        let scope = if answers.scope.is_empty() {
            String::new()
        } else {
            let issues = answers
                .scope
                .iter()
                .map(|issue| format!("{jira_prefix}{issue}"))
                .collect::<Vec<_>>()
                .join(",");
            format!("({issues})")
        };

        let body = if answers.body.is_empty() {
            String::new()
        } else {
            format!("\n\n{}", answers.body)
        };

        let footer = if answers.is_breaking_change {
            format!("BREAKING CHANGE: {}", answers.footer)
        } else {
            answers.footer.clone()
        };

        let footer = if footer.is_empty() {
            footer
        } else {
            format!("\n\n{footer}")
        };

        let message = format!(
            "{}{scope}: {}{body}{footer}",
            answers.prefix, answers.subject
        );
        tracing::debug!(?message);
        message
    }

    /// Returns an example commit message.
    pub const fn example(&self) -> &'static str {
        EXAMPLE
    }

    /// Returns the schema of a commit message.
    pub const fn schema(&self) -> &'static str {
        SCHEMA
    }

    /// Returns the pattern matching a valid commit title.
    pub const fn schema_pattern(&self) -> &'static str {
        SCHEMA_PATTERN
    }

    /// Returns documentation about the commit style.
    pub const fn info(&self) -> &'static str {
        INFO
    }

    /// Returns the pattern matching the keywords relevant for bumping.
    pub const fn bump_pattern(&self) -> &'static str {
        BUMP_PATTERN
    }

    /// Returns the increments associated to bump keywords, by priority.
    pub const fn bump_map(&self) -> &'static [(&'static str, Increment)] {
        &BUMP_MAP
    }

    /// Returns the pattern parsing a commit title for the changelog.
    pub const fn commit_parser(&self) -> &'static str {
        COMMIT_PARSER
    }

    /// Returns the pattern selecting the commits for the changelog.
    pub const fn changelog_pattern(&self) -> &'static str {
        CHANGELOG_PATTERN
    }

    /// Checks whether `commit` follows the schema.
    pub fn is_valid(&self, commit: &str) -> bool {
        SCHEMA_REGEX.is_match(commit)
    }

    /// Extracts the description from a commit following the schema.
    ///
    /// Returns an empty string for commits that do not follow the schema.
    pub fn process_commit(&self, commit: &str) -> String {
        SCHEMA_REGEX
            .captures(commit)
            .and_then(|captures| captures.get(3))
            .map(|description| description.as_str().trim().to_owned())
            .unwrap_or_default()
    }

    /// Adds Jira links to the scope and a GitHub link to the message.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn changelog_message_builder_hook(
        &self,
        mut parsed_message: ParsedMessage,
        commit: &GitCommit,
    ) -> ParsedMessage {
        if !parsed_message.scope.is_empty() {
            parsed_message.scope = parsed_message
                .scope
                .split(',')
                .map(|issue_id| {
                    format!("[{issue_id}]({})", self.jira_issue_url(issue_id))
                })
                .collect::<Vec<_>>()
                .join(" ");
        }

        let short_rev = commit.rev.chars().take(5).collect::<String>();
        parsed_message.message = format!(
            "{} [{short_rev}]({})",
            parsed_message.message,
            self.github_commit_url(&commit.rev)
        );

        tracing::trace!(?parsed_message);
        parsed_message
    }

    /// Returns the URL of a Jira issue.
    fn jira_issue_url(&self, issue_id: &str) -> String {
        format!(
            "{}/browse/{issue_id}",
            self.jira_base_url.trim_end_matches('/')
        )
    }

    /// Returns the URL of a commit on GitHub.
    fn github_commit_url(&self, rev: &str) -> String {
        format!(
            "{}/{}/commit/{rev}",
            self.github_base_url.trim_end_matches('/'),
            self.github_repo
        )
    }
}

impl Answers {
    /// Records an answer.
    pub fn record(&mut self, name: QuestionName, value: AnswerValue) {
        match (name, value) {
            (QuestionName::Prefix, AnswerValue::Text(prefix)) => {
                self.prefix = prefix;
            }
            (QuestionName::IssueJiraPrefix, AnswerValue::Text(prefix)) => {
                self.issue_jira_prefix = Some(prefix);
            }
            (QuestionName::Scope, AnswerValue::Issues(issues)) => {
                self.scope = issues;
            }
            (QuestionName::Subject, AnswerValue::Text(subject)) => {
                self.subject = subject;
            }
            (QuestionName::Body, AnswerValue::Text(body)) => {
                self.body = body;
            }
            (QuestionName::IsBreakingChange, AnswerValue::Confirm(answer)) => {
                self.is_breaking_change = answer;
            }
            (QuestionName::Footer, AnswerValue::Text(footer)) => {
                self.footer = footer;
            }
            (name, value) => {
                tracing::warn!(%name, ?value, "mismatched answer, ignoring it");
            }
        }
    }
}
