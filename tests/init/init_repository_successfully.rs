use crate::common::command::{
    get_branch_commit_sha, get_current_branch, get_head_commit_sha, repository_dir,
    run_gitlet_command,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir_absolute_path = repository_dir.path().canonicalize()?.display().to_string();

    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty Gitlet repository in .+\.gitlet\n$",
        )?)
        .stdout(predicate::str::contains(dir_absolute_path));

    let gitlet_dir = repository_dir.path().join(".gitlet");
    for dir in ["objects/blobs", "objects/commits", "refs/heads"] {
        assert!(gitlet_dir.join(dir).is_dir(), "missing {dir}");
    }
    assert!(gitlet_dir.join("index").is_file());

    Ok(())
}

#[rstest]
fn init_points_master_and_head_at_the_initial_commit(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let head = get_head_commit_sha(repository_dir.path())?;
    assert_eq!(head.len(), 40);
    assert_eq!(get_branch_commit_sha(repository_dir.path(), "master")?, head);
    assert_eq!(get_current_branch(repository_dir.path())?, "master");

    run_gitlet_command(repository_dir.path(), &["global-log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("commit {head}")))
        .stdout(predicate::str::contains("initial commit"));

    Ok(())
}

#[rstest]
fn every_repository_starts_from_the_same_initial_commit(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let other_dir = TempDir::new()?;

    for dir in [repository_dir.path(), other_dir.path()] {
        run_gitlet_command(dir, &["init"]).assert().success();
    }

    assert_eq!(
        get_head_commit_sha(repository_dir.path())?,
        get_head_commit_sha(other_dir.path())?
    );

    Ok(())
}
