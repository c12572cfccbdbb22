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

//! Integration tests for the command-line interface.

#![cfg(not(target_os = "windows"))]
#![allow(clippy::pedantic, clippy::restriction)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_fs::{TempDir, prelude::*};
use eyre::Result;
use predicates::prelude::*;

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

fn git_jira_cz(config: impl AsRef<Path>) -> Result<Command> {
    let mut cmd = Command::cargo_bin("git-jira-cz")?;
    cmd.env("NO_COLOR", "1").arg("--config").arg(config.as_ref());
    Ok(cmd)
}

fn git(repo: &TempDir, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .current_dir(repo.path())
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .args(["-c", "commit.gpgsign=false"])
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    Ok(String::from_utf8(output)?.trim().to_owned())
}

fn setup_repo(config: &str) -> Result<TempDir> {
    let repo = TempDir::new()?;
    git(&repo, &["init", "--quiet"])?;
    repo.child(".cz.toml").write_file(&config_file(config))?;
    Ok(repo)
}

fn commit(repo: &TempDir, message: &str) -> Result<String> {
    git(repo, &["commit", "--quiet", "--allow-empty", "-m", message])?;
    git(repo, &["rev-parse", "HEAD"])
}

////////////////////////////////////////////////////////////////////////////////
//                               Configuration                                //
////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_missing_jira_base_url_is_a_config_error() -> Result<()> {
    git_jira_cz(config_file("missing_jira_base_url.toml"))?
        .arg("example")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains(
            "Please add the key jira_base_url",
        ));

    Ok(())
}

#[test]
fn test_missing_github_repo_is_a_config_error() -> Result<()> {
    git_jira_cz(config_file("missing_github_repo.toml"))?
        .arg("schema")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("Please add the key github_repo"));

    Ok(())
}

#[test]
fn test_custom_change_type_map_is_a_config_error() -> Result<()> {
    git_jira_cz(config_file("custom_change_type_map.toml"))?
        .arg("info")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("change_type_map"));

    Ok(())
}

#[test]
fn test_unreadable_config_file_is_an_error() -> Result<()> {
    git_jira_cz(config_file("does_not_exist.toml"))?
        .arg("example")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
//                               Static texts                                 //
////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_example_prints_an_example_commit() -> Result<()> {
    git_jira_cz(config_file("single_prefix.toml"))?
        .arg("example")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "fix: correct minor typos in code\n\n",
        ))
        .stdout(predicate::str::contains("closes issue #12"));

    Ok(())
}

#[test]
fn test_schema_prints_the_schema() -> Result<()> {
    git_jira_cz(config_file("single_prefix.toml"))?
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<type>(<scope>): <subject>"))
        .stdout(predicate::str::contains("(BREAKING CHANGE: )<footer>"));

    Ok(())
}

#[test]
fn test_schema_prints_the_pattern() -> Result<()> {
    git_jira_cz(config_file("single_prefix.toml"))?
        .args(["schema", "--pattern"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "(build|ci|docs|feat|fix|perf|refactor|style|test|chore|",
        ))
        .stdout(predicate::str::contains("|revert|bump)(\\(\\S+\\))?!?:"));

    Ok(())
}

#[test]
fn test_info_is_always_the_same() -> Result<()> {
    let first = git_jira_cz(config_file("no_prefix.toml"))?
        .arg("info")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let second = git_jira_cz(config_file("no_prefix.toml"))?
        .arg("info")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert!(!first.is_empty());
    assert_eq!(first, second);

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
//                                   Check                                    //
////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_check_accepts_a_conventional_commit() -> Result<()> {
    git_jira_cz(config_file("single_prefix.toml"))?
        .args(["check", "--message", "feat(XZ-42): add widget"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Commit validation: successful!"));

    Ok(())
}

#[test]
fn test_check_rejects_other_commits() -> Result<()> {
    git_jira_cz(config_file("single_prefix.toml"))?
        .args(["check", "--message", "add widget"])
        .assert()
        .code(exitcode::DATAERR)
        .stderr(predicate::str::contains("add widget"));

    Ok(())
}

#[test]
fn test_check_reads_the_commit_message_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let commit_msg = temp_dir.child("COMMIT_EDITMSG");
    commit_msg.write_str(
        "fix!: remove the gadget\n\n# Please enter the commit message.\n",
    )?;

    git_jira_cz(config_file("single_prefix.toml"))?
        .arg("check")
        .arg("--commit-msg-file")
        .arg(commit_msg.path())
        .assert()
        .success();

    Ok(())
}

#[test]
fn test_check_requires_a_message() -> Result<()> {
    git_jira_cz(config_file("single_prefix.toml"))?
        .arg("check")
        .assert()
        .failure();

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
//                                    Init                                    //
////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_init_writes_the_configuration() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = temp_dir.child(".cz.toml");

    git_jira_cz(config.path())?
        .args([
            "init",
            "--jira-base-url",
            "https://j.example",
            "--github-repo",
            "org/repo",
            "--jira-prefix",
            "XZ-",
        ])
        .assert()
        .success();

    config.assert(predicate::str::contains("jira_prefix = \"XZ-\""));
    config.assert(predicate::str::contains(
        "jira_base_url = \"https://j.example\"",
    ));
    config.assert(predicate::str::contains("github_repo = \"org/repo\""));

    // The written configuration is usable right away.
    git_jira_cz(config.path())?
        .args(["check", "--message", "feat(XZ-1): add widget"])
        .assert()
        .success();

    Ok(())
}

#[test]
fn test_init_does_not_overwrite_the_configuration() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = temp_dir.child(".cz.toml");
    config.write_str("[tool.commitizen]\n")?;

    git_jira_cz(config.path())?
        .args([
            "init",
            "--jira-base-url",
            "https://j.example",
            "--github-repo",
            "org/repo",
        ])
        .assert()
        .code(exitcode::CANTCREAT)
        .stderr(predicate::str::contains("git jira-cz init -f"));

    config.assert("[tool.commitizen]\n");

    Ok(())
}

#[test]
fn test_init_can_be_forced() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = temp_dir.child(".cz.toml");
    config.write_str("[tool.commitizen]\n")?;

    git_jira_cz(config.path())?
        .args([
            "init",
            "-f",
            "--jira-base-url",
            "https://j.example",
            "--github-repo",
            "org/repo",
        ])
        .assert()
        .success();

    config.assert(predicate::str::contains("github_repo = \"org/repo\""));
    config.assert(predicate::str::contains("jira_prefix").not());

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
//                                 Changelog                                  //
////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_changelog_links_to_jira_and_github() -> Result<()> {
    let repo = setup_repo("single_prefix.toml")?;
    let rev = commit(&repo, "feat(XZ-1): add widget")?;
    commit(&repo, "docs: readme")?;

    let short_rev = &rev[..5];
    let entry = format!(
        "- **[XZ-1](https://myproject.atlassian.net/browse/XZ-1)**: add \
            widget [{short_rev}](https://github.com/org/repo/commit/{rev})"
    );

    Command::cargo_bin("git-jira-cz")?
        .current_dir(repo.path())
        .env("NO_COLOR", "1")
        .arg("changelog")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("### Feat\n\n"))
        .stdout(predicate::str::contains(entry))
        .stdout(predicate::str::contains("readme").not())
        .stderr(predicate::str::contains(
            "Suggested version increment: MINOR",
        ));

    Ok(())
}

#[test]
fn test_changelog_reads_the_revision_range() -> Result<()> {
    let repo = setup_repo("no_prefix.toml")?;
    commit(&repo, "feat(XZ-1): add widget")?;
    git(&repo, &["tag", "v0.1.0"])?;
    commit(&repo, "fix(XZ-2): fix widget")?;

    Command::cargo_bin("git-jira-cz")?
        .current_dir(repo.path())
        .env("NO_COLOR", "1")
        .args(["changelog", "v0.1.0..HEAD"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("### Fix\n\n"))
        .stdout(predicate::str::contains("fix widget"))
        .stdout(predicate::str::contains("add widget").not())
        .stderr(predicate::str::contains(
            "Suggested version increment: PATCH",
        ));

    Ok(())
}

#[test]
fn test_changelog_without_config_is_a_config_error() -> Result<()> {
    let repo = TempDir::new()?;
    git(&repo, &["init", "--quiet"])?;
    commit(&repo, "feat(XZ-1): add widget")?;

    Command::cargo_bin("git-jira-cz")?
        .current_dir(repo.path())
        .env("NO_COLOR", "1")
        .arg("changelog")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains(
            "Please add the key jira_base_url",
        ));

    Ok(())
}
