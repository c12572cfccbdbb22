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

// NOTE: rexpect is only compatible with Unix-like systems, so let’s just not
// compile the CLI tests on Windows.
//! Integration tests for the commit command.

#![cfg(not(target_os = "windows"))]
#![allow(clippy::pedantic, clippy::restriction)]

use std::{path::PathBuf, process::Command};

use assert_cmd::cargo::cargo_bin;
use eyre::Result;
use rexpect::session::{PtySession, spawn_command};

const TIMEOUT: Option<u64> = Some(1_000);

////////////////////////////////////////////////////////////////////////////////
//                                  Helpers                                   //
////////////////////////////////////////////////////////////////////////////////

fn config_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("res")
        .join("config")
        .join(name)
}

fn commit_print_only(config: &str) -> Command {
    let mut cmd = Command::new(cargo_bin("git-jira-cz"));
    cmd.env("NO_COLOR", "1")
        .arg("--config")
        .arg(config_file(config))
        .args(["commit", "--print-only"]);
    cmd
}

fn fill_type(process: &mut PtySession, r#type: &str) -> Result<()> {
    process.exp_string("Select the type of change you are committing")?;
    process.send_line(r#type)?;
    Ok(())
}

fn fill_scope(process: &mut PtySession, scope: &str) -> Result<()> {
    process.exp_string("JIRA issue number")?;
    process.send_line(scope)?;
    Ok(())
}

fn fill_subject(process: &mut PtySession, subject: &str) -> Result<()> {
    process.exp_string("Write a short and imperative summary")?;
    process.send_line(subject)?;
    Ok(())
}

fn fill_body(process: &mut PtySession, body: &str) -> Result<()> {
    process.exp_string("Provide additional contextual information")?;
    process.send_line(body)?;
    Ok(())
}

fn fill_breaking_change(process: &mut PtySession, answer: &str) -> Result<()> {
    process.exp_string("Is this a BREAKING CHANGE?")?;
    process.send_line(answer)?;
    Ok(())
}

fn fill_footer(process: &mut PtySession, footer: &str) -> Result<()> {
    process.exp_string("Footer.")?;
    process.send_line(footer)?;
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
//                                   Wizard                                   //
////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_commit_wizard_builds_a_message_with_a_single_prefix() -> Result<()> {
    let mut process =
        spawn_command(commit_print_only("single_prefix.toml"), TIMEOUT)?;

    fill_type(&mut process, "feat")?;
    fill_scope(&mut process, "42, 123")?;
    fill_subject(&mut process, "add widget.")?;
    fill_body(&mut process, "")?;
    fill_breaking_change(&mut process, "n")?;
    fill_footer(&mut process, "")?;

    process.exp_string("feat(XZ-42,XZ-123): add widget")?;
    process.exp_eof()?;

    Ok(())
}

#[test]
fn test_commit_wizard_shows_the_prefix_in_the_scope_question() -> Result<()> {
    let mut process =
        spawn_command(commit_print_only("single_prefix.toml"), TIMEOUT)?;

    fill_type(&mut process, "")?;
    process.exp_string("JIRA issue number (multiple \"42, 123\"). XZ-")?;

    Ok(())
}

#[test]
fn test_commit_wizard_offers_the_change_types() -> Result<()> {
    let mut process =
        spawn_command(commit_print_only("single_prefix.toml"), TIMEOUT)?;

    process.exp_string("Select the type of change you are committing")?;
    process.exp_string("fix: A bug fix. Correlates with PATCH in SemVer")?;
    process.exp_string("feat: A new feature. Correlates with MINOR in SemVer")?;

    Ok(())
}

#[test]
fn test_commit_wizard_asks_again_for_an_invalid_scope() -> Result<()> {
    let mut process =
        spawn_command(commit_print_only("single_prefix.toml"), TIMEOUT)?;

    fill_type(&mut process, "fix")?;
    fill_scope(&mut process, "abc")?;
    process.exp_string("JIRA scope of 'abc' is invalid")?;

    Ok(())
}

#[test]
fn test_commit_wizard_requires_a_subject() -> Result<()> {
    let mut process =
        spawn_command(commit_print_only("single_prefix.toml"), TIMEOUT)?;

    fill_type(&mut process, "fix")?;
    fill_scope(&mut process, "1")?;
    fill_subject(&mut process, " . ")?;
    process.exp_string("Subject is required.")?;

    Ok(())
}

#[test]
fn test_commit_wizard_omits_an_empty_scope() -> Result<()> {
    let mut process =
        spawn_command(commit_print_only("no_prefix.toml"), TIMEOUT)?;

    fill_type(&mut process, "docs")?;
    fill_scope(&mut process, "")?;
    fill_subject(&mut process, "document the widget")?;
    fill_body(&mut process, "")?;
    fill_breaking_change(&mut process, "")?;
    fill_footer(&mut process, "")?;

    process.exp_string("docs: document the widget")?;
    process.exp_eof()?;

    Ok(())
}

#[test]
fn test_commit_wizard_asks_for_the_project_with_several_prefixes()
-> Result<()> {
    let mut process =
        spawn_command(commit_print_only("multiple_prefixes.toml"), TIMEOUT)?;

    fill_type(&mut process, "fix")?;

    process.exp_string("Select the JIRA project of the issues")?;
    process.send_line("XY-")?;

    fill_scope(&mut process, "7")?;
    fill_subject(&mut process, "fix widget")?;
    fill_body(&mut process, "")?;
    fill_breaking_change(&mut process, "")?;
    fill_footer(&mut process, "")?;

    process.exp_string("fix(XY-7): fix widget")?;
    process.exp_eof()?;

    Ok(())
}

#[test]
fn test_commit_wizard_adds_the_breaking_change_footer() -> Result<()> {
    let mut process =
        spawn_command(commit_print_only("no_prefix.toml"), TIMEOUT)?;

    fill_type(&mut process, "feat")?;
    fill_scope(&mut process, "AB-1")?;
    fill_subject(&mut process, "remove the gadget")?;
    fill_body(&mut process, "first line | second line")?;
    fill_breaking_change(&mut process, "y")?;
    fill_footer(&mut process, "the gadget is gone")?;

    process.exp_string("feat(AB-1): remove the gadget")?;
    process.exp_string("first line")?;
    process.exp_string("second line")?;
    process.exp_string("BREAKING CHANGE: the gadget is gone")?;
    process.exp_eof()?;

    Ok(())
}
