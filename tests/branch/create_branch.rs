use crate::common::command::{
    committed_repository_dir, get_branch_commit_sha, get_current_branch, get_head_commit_sha,
    run_gitlet_command,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn create_branch_at_head_without_switching(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();

    run_gitlet_command(dir, &["branch", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(get_branch_commit_sha(dir, "feature")?, get_head_commit_sha(dir)?);
    assert_eq!(get_current_branch(dir)?, "master");

    Ok(())
}

#[rstest]
#[case("feature")]
#[case("feature-1")]
#[case("bugfix_2")]
#[case("release/v1.0")]
#[case("user/alice/topic")]
fn create_branch_with_various_valid_names(
    committed_repository_dir: TempDir,
    #[case] name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();

    run_gitlet_command(dir, &["branch", name])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(get_branch_commit_sha(dir, name)?, get_head_commit_sha(dir)?);

    Ok(())
}

#[rstest]
#[case(".hidden")]
#[case("bad..name")]
#[case("ends-with.lock")]
#[case("trailing/")]
#[case("has space")]
#[case("tilde~1")]
fn create_branch_with_invalid_name_fails(
    committed_repository_dir: TempDir,
    #[case] name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(committed_repository_dir.path(), &["branch", name])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Invalid branch name"));

    Ok(())
}

#[rstest]
fn create_duplicate_branch_fails(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    run_gitlet_command(dir, &["branch", "feature"]).assert().success();

    run_gitlet_command(dir, &["branch", "feature"])
        .assert()
        .success()
        .stdout(predicate::eq("A branch with that name already exists.\n"));

    run_gitlet_command(dir, &["branch", "master"])
        .assert()
        .success()
        .stdout(predicate::eq("A branch with that name already exists.\n"));

    Ok(())
}

#[rstest]
fn create_branch_conflicting_with_an_existing_hierarchy_fails(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();

    run_gitlet_command(dir, &["branch", "master/child"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Invalid branch name"));

    run_gitlet_command(dir, &["branch", "topic/child"]).assert().success();
    run_gitlet_command(dir, &["branch", "topic"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Invalid branch name"));

    Ok(())
}
