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

//! Questions asked to build a commit message.

use std::fmt;

use super::{CommitFormatter, InvalidAnswerError};

/// A question to ask the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// The answer this question fills.
    pub name: QuestionName,
    /// How to ask the question.
    pub kind: QuestionKind,
    /// The prompt.
    pub message: String,
    /// The filter to apply to the raw input.
    pub filter: Option<Filter>,
}

/// The answers that can be given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionName {
    /// The change type.
    Prefix,
    /// The Jira project, when several are configured.
    IssueJiraPrefix,
    /// The issues concerned by the change.
    Scope,
    /// The short summary.
    Subject,
    /// The long description.
    Body,
    /// Whether the change is breaking.
    IsBreakingChange,
    /// The footer.
    Footer,
}

/// The kinds of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// A selection in a list.
    List {
        /// The possible choices.
        choices: Vec<Choice>,
    },
    /// A free text input.
    Input,
    /// A yes / no question.
    Confirm {
        /// The default answer.
        default: bool,
    },
}

/// A choice in a [`QuestionKind::List`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// The value to record when selected.
    pub value: String,
    /// The label to show.
    pub name: String,
}

/// A transformation of raw input into an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Parses a list of Jira issues.
    Scope,
    /// Normalises the subject and requires it.
    Subject,
    /// Turns `|` into line breaks.
    Body,
}

/// A filtered answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    /// A text answer.
    Text(String),
    /// A list of Jira issues.
    Issues(Vec<String>),
    /// A yes / no answer.
    Confirm(bool),
}

impl QuestionName {
    /// Returns the name of the answer.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prefix => "prefix",
            Self::IssueJiraPrefix => "issue_jira_prefix",
            Self::Scope => "scope",
            Self::Subject => "subject",
            Self::Body => "body",
            Self::IsBreakingChange => "is_breaking_change",
            Self::Footer => "footer",
        }
    }
}

impl fmt::Display for QuestionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Choice {
    /// Builds a choice.
    pub fn new(value: &str, name: &str) -> Self {
        Self {
            value: value.to_owned(),
            name: name.to_owned(),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Filter {
    /// Applies the filter to the raw input.
    pub fn apply(
        self,
        formatter: &CommitFormatter,
        raw: &str,
    ) -> Result<AnswerValue, InvalidAnswerError> {
        match self {
            Self::Scope => formatter.parse_scope(raw).map(AnswerValue::Issues),
            Self::Subject => parse_subject(raw).map(AnswerValue::Text),
            Self::Body => Ok(AnswerValue::Text(multiple_line_breaker(raw))),
        }
    }
}

/// Strips the periods and spaces around the subject, which is required.
pub fn parse_subject(text: &str) -> Result<String, InvalidAnswerError> {
    let subject = text.trim_matches(|c: char| c == '.' || c.is_whitespace());

    if subject.is_empty() {
        Err(InvalidAnswerError::Required {
            message: "Subject is required.",
        })
    } else {
        Ok(subject.to_owned())
    }
}

/// Turns each `|` into a line break, trimming the lines.
pub fn multiple_line_breaker(text: &str) -> String {
    text.split('|')
        .filter(|line| !line.is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}
