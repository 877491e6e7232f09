use crate::common::command::{get_head_commit_sha, init_repository_dir, run_gitlet_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn reinitializing_a_repository_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let head_before = get_head_commit_sha(init_repository_dir.path())?;

    run_gitlet_command(init_repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "A Gitlet version-control system already exists in the current directory.\n",
        ));

    assert_eq!(get_head_commit_sha(init_repository_dir.path())?, head_before);

    Ok(())
}
