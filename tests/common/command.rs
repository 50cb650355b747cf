use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const AUTHOR_NAME: &str = "fake_user";
pub const AUTHOR_EMAIL: &str = "fake_email@email.com";
pub const AUTHOR_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// An initialized repository with one commit on `master` tracking
/// `1.txt`, `a/2.txt` and `a/b/3.txt`.
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_grove_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_grove_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    grove_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_grove_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("grove").expect("Failed to find grove binary");
    cmd.current_dir(dir);
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn grove_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_grove_command(dir, &["commit", "-m", message]);
    cmd.envs(vec![
        ("GROVE_AUTHOR_NAME", AUTHOR_NAME),
        ("GROVE_AUTHOR_EMAIL", AUTHOR_EMAIL),
        ("GROVE_AUTHOR_DATE", AUTHOR_DATE), // %Y-%m-%d %H:%M:%S %z
    ]);
    cmd
}

/// Commit id a branch points at, read straight from its ref file.
pub fn branch_tip(dir: &Path, branch: &str) -> Option<String> {
    std::fs::read_to_string(dir.join(".grove/refs/heads").join(branch))
        .ok()
        .map(|content| content.trim().to_string())
        .filter(|oid| !oid.is_empty())
}

pub fn head_content(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".grove/HEAD")).expect("Failed to read HEAD")
}
