use crate::common::command::{
    get_head_commit_sha, get_parent_commit_id, gitlet_commit, read_commit_object,
    repository_dir, run_gitlet_command, stdout_of,
};
use crate::common::file::{FileSpec, write_file};
use crate::common::logged_commit_ids;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn init_commit_remove_and_restore(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();

    run_gitlet_command(dir, &["init"]).assert().success();
    let root = get_head_commit_sha(dir)?;

    write_file(FileSpec::new(dir.join("a.txt"), "hello".to_string()));
    run_gitlet_command(dir, &["add", "a.txt"]).assert().success();
    gitlet_commit(dir, "first").assert().success();

    let first = get_head_commit_sha(dir)?;
    assert_eq!(get_parent_commit_id(dir, &first)?, Some(root.clone()));
    assert_eq!(
        logged_commit_ids(&stdout_of(&mut run_gitlet_command(dir, &["log"]))),
        vec![first.clone(), root.clone()]
    );
    run_gitlet_command(dir, &["commit", "nothing staged"])
        .assert()
        .stdout(predicate::eq("No changes added to the commit.\n"));

    run_gitlet_command(dir, &["rm", "a.txt"]).assert().success();
    assert!(!dir.join("a.txt").exists());

    gitlet_commit(dir, "remove a").assert().success();
    let removed = get_head_commit_sha(dir)?;
    assert!(!read_commit_object(dir, &removed)?.contains("a.txt"));

    run_gitlet_command(dir, &["checkout", &root, "--", "a.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("File does not exist in that commit.\n"));

    run_gitlet_command(dir, &["checkout", &first, "--", "a.txt"])
        .assert()
        .success();
    assert_eq!(std::fs::read_to_string(dir.join("a.txt"))?, "hello");

    assert_eq!(
        logged_commit_ids(&stdout_of(&mut run_gitlet_command(dir, &["log"]))),
        vec![removed, first, root]
    );

    Ok(())
}
