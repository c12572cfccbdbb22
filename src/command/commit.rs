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

//! The `commit` subcommand.

mod backend;

use clap::Parser;
use eyre::Result;
use inquire::{Confirm, CustomUserError, Select, Text, validator::Validation};

use self::backend::{Backend, GitBackend, PrintBackend};
use super::{GlobalOptions, helpers::load_formatter};
use crate::{
    formatter::{
        AnswerValue, Answers, CommitFormatter, Question, QuestionKind,
    },
    git::ensure_in_git_worktree,
};

/// The size of a page in the terminal.
const PAGE_SIZE: usize = 15;

/// The commit command.
#[derive(Debug, Parser)]
pub struct Commit {
    /// Print the commit message instead of calling `git commit`.
    #[arg(long)]
    print_only: bool,
    /// Extra arguments to be passed to `git commit`.
    #[arg(last = true)]
    extra_args: Vec<String>,
}

impl super::Command for Commit {
    #[tracing::instrument(name = "commit", level = "trace", skip_all)]
    fn run(&self, options: &GlobalOptions) -> Result<()> {
        if !self.print_only {
            ensure_in_git_worktree()?;
        }

        let formatter = load_formatter(options)?;
        let answers = run_wizard(&formatter)?;
        tracing::info!(?answers, "wizard completed");

        let commit_message = formatter.message(&answers);

        let backend: Box<dyn Backend> = if self.print_only {
            Box::new(PrintBackend)
        } else {
            Box::new(GitBackend::new(&self.extra_args))
        };

        backend.call(&commit_message)?;
        Ok(())
    }
}

/// Asks the questions of the formatter and records the answers.
fn run_wizard(formatter: &CommitFormatter) -> Result<Answers> {
    let mut answers = Answers::default();

    for question in formatter.questions() {
        let value = ask(formatter, &question)?;
        tracing::debug!(name = %question.name, ?value);
        answers.record(question.name, value);
    }

    Ok(answers)
}

/// Asks a question according to its kind.
fn ask(
    formatter: &CommitFormatter,
    question: &Question,
) -> Result<AnswerValue> {
    match &question.kind {
        QuestionKind::List { choices } => {
            let choice = Select::new(&question.message, choices.clone())
                .with_page_size(PAGE_SIZE)
                .with_formatter(&|choice| choice.value.value.clone())
                .prompt()?;
            Ok(AnswerValue::Text(choice.value))
        }

        QuestionKind::Input => {
            let input = Text::new(&question.message)
                .with_validator(filter_validator(formatter, question))
                .prompt()?;
            Ok(formatter.filter(question, &input)?)
        }

        QuestionKind::Confirm { default } => {
            let answer = Confirm::new(&question.message)
                .with_default(*default)
                .prompt()?;
            Ok(AnswerValue::Confirm(answer))
        }
    }
}

/// Builds a validator from the filter of the question.
///
/// An input rejected by the filter is asked again, with the filter error.
fn filter_validator(
    formatter: &CommitFormatter,
    question: &Question,
) -> impl Fn(&str) -> Result<Validation, CustomUserError> + Clone + use<> {
    let formatter = formatter.clone();
    let question = question.clone();

    move |input: &str| match formatter.filter(&question, input) {
        Ok(_) => Ok(Validation::Valid),
        Err(error) => Ok(Validation::Invalid(error.to_string().into())),
    }
}
