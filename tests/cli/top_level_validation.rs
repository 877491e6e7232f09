use crate::common::command::{init_repository_dir, repository_dir, run_gitlet_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn no_command_asks_for_one(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(repository_dir.path(), &[])
        .assert()
        .success()
        .stdout(predicate::eq("Please enter a command.\n"));

    Ok(())
}

#[rstest]
#[case::uninitialized(false)]
#[case::initialized(true)]
fn unknown_command_is_reported(
    repository_dir: TempDir,
    #[case] initialized: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if initialized {
        run_gitlet_command(repository_dir.path(), &["init"])
            .assert()
            .success();
    }

    run_gitlet_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::eq("No command with that name exists.\n"));

    Ok(())
}

#[rstest]
#[case(&["add", "a.txt"])]
#[case(&["commit", "message"])]
#[case(&["rm", "a.txt"])]
#[case(&["log"])]
#[case(&["global-log"])]
#[case(&["find", "message"])]
#[case(&["branch", "feature"])]
#[case(&["rm-branch", "feature"])]
#[case(&["checkout", "master"])]
// wrong operands still report the missing repository first
#[case(&["add"])]
#[case(&["log", "extra"])]
fn commands_outside_a_repository_fail(
    repository_dir: TempDir,
    #[case] args: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(repository_dir.path(), args)
        .assert()
        .success()
        .stdout(predicate::eq("Not in an initialized Gitlet directory.\n"));

    assert!(!repository_dir.path().join(".gitlet").exists());

    Ok(())
}

#[rstest]
#[case(&["add"])]
#[case(&["add", "a.txt", "b.txt"])]
#[case(&["rm"])]
#[case(&["find"])]
#[case(&["branch"])]
#[case(&["rm-branch", "a", "b"])]
#[case(&["global-log", "--oneline"])]
#[case(&["init", "somewhere"])]
#[case(&["checkout", "master", "--"])]
fn wrong_operands_are_reported(
    init_repository_dir: TempDir,
    #[case] args: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(init_repository_dir.path(), args)
        .assert()
        .success()
        .stdout(predicate::eq("Incorrect operands.\n"));

    Ok(())
}

#[rstest]
fn help_lists_the_commands(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(repository_dir.path(), &["--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("global-log"))
        .stdout(predicate::str::contains("rm-branch"));

    Ok(())
}

#[cfg(unix)]
#[rstest]
fn non_utf8_operands_are_reported(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    run_gitlet_command(init_repository_dir.path(), &["add"])
        .arg(OsStr::from_bytes(b"bad\xffname.txt"))
        .assert()
        .success()
        .stdout(predicate::eq("Incorrect operands.\n"));

    Ok(())
}
