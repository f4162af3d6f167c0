//! Shared harness for the minigit end-to-end tests.
//!
//! Identity and logging variables are pinned so output does not depend on
//! the machine running the tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

/// Captured output from running a command.
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

fn pin_env(cmd: &mut Command) {
    cmd.env("MINIGIT_AUTHOR_NAME", "Test Author")
        .env("MINIGIT_AUTHOR_EMAIL", "test@example.com")
        .env("MINIGIT_LOG", "warn")
        .env_remove("MINIGIT_DIR")
        .env("TZ", "UTC");
}

/// Run the minigit binary in `dir` with the given arguments.
pub fn minigit(dir: &Path, args: &[&str]) -> CommandResult {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_minigit"));
    cmd.args(args).current_dir(dir);
    pin_env(&mut cmd);
    let output = cmd.output().expect("failed to run minigit");
    CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(128),
    }
}

/// Run minigit and assert that it exited successfully.
pub fn minigit_ok(dir: &Path, args: &[&str]) -> CommandResult {
    let result = minigit(dir, args);
    assert_eq!(
        result.exit_code, 0,
        "minigit {:?} failed\nstdout: {}\nstderr: {}",
        args, result.stdout, result.stderr
    );
    result
}

/// Initialize a repository in `dir`.
pub fn setup_repo(dir: &Path) {
    minigit_ok(dir, &["init", "-q"]);
}

pub fn write_file(dir: &Path, path: &str, content: &str) {
    let full = dir.join(path);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(full, content).unwrap();
}

pub fn read_file(dir: &Path, path: &str) -> String {
    fs::read_to_string(dir.join(path)).unwrap()
}

/// Stage everything in the work tree and commit it.
pub fn commit_all(dir: &Path, message: &str) {
    minigit_ok(dir, &["add", "."]);
    minigit_ok(dir, &["commit", "-m", message]);
}

/// Full hash of the current branch tip.
pub fn head_hash(dir: &Path) -> String {
    let head = read_file(dir, ".minigit/HEAD");
    let target = head.trim().trim_start_matches("ref: ");
    read_file(dir, &format!(".minigit/{target}")).trim().to_string()
}
