mod common;

use assert_cmd::Command;
use common::get_fzbmark_bin;
use predicates::prelude::*;

#[test]
fn test_completion_bash_generates_script() {
    let mut cmd = Command::new(get_fzbmark_bin());
    cmd.args(["--completions", "bash"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_fzbmark()"))
        .stdout(predicate::str::contains("--list-browsers"));
}

#[test]
fn test_completion_zsh_generates_script() {
    let mut cmd = Command::new(get_fzbmark_bin());
    cmd.args(["--completions", "zsh"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("#compdef fzbmark"));
}

#[test]
fn test_completion_fish_generates_script() {
    let mut cmd = Command::new(get_fzbmark_bin());
    cmd.args(["--completions", "fish"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("complete -c fzbmark"));
}

#[test]
fn test_completion_does_not_need_browsers() {
    let mut cmd = Command::new(get_fzbmark_bin());
    cmd.env("FZBMARK_HOME", "/nonexistent/fzbmark-home")
        .args(["--completions", "powershell"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("fzbmark"));
}

#[test]
fn test_completion_invalid_shell() {
    let mut cmd = Command::new(get_fzbmark_bin());
    cmd.args(["--completions", "tcsh"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
