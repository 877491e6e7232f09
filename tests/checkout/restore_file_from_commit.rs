use crate::common::command::{
    add_and_commit, committed_repository_dir, get_head_commit_sha, get_parent_commit_id,
    run_gitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn restore_file_from_head(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    write_file(FileSpec::new(dir.join("a/2.txt"), "scribbled".to_string()));
    std::fs::remove_file(dir.join("1.txt"))?;

    run_gitlet_command(dir, &["checkout", "--", "a/2.txt"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    run_gitlet_command(dir, &["checkout", "--", "1.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("a/2.txt")), "two");
    assert_eq!(read_file(&dir.join("1.txt")), "one");

    Ok(())
}

#[rstest]
#[case::full_id(40)]
#[case::abbreviated_id(8)]
#[case::shortest_prefix(4)]
fn restore_file_from_an_earlier_commit(
    committed_repository_dir: TempDir,
    #[case] id_length: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    let first = get_head_commit_sha(dir)?;

    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    add_and_commit(dir, "1.txt", "translate one");

    run_gitlet_command(dir, &["checkout", &first[..id_length], "--", "1.txt"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(read_file(&dir.join("1.txt")), "one");
    // HEAD does not move
    assert_ne!(get_head_commit_sha(dir)?, first);

    Ok(())
}

#[rstest]
fn restore_file_over_a_directory_of_untracked_files_fails(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    write_file(FileSpec::new(dir.join("d"), "v1".to_string()));
    add_and_commit(dir, "d", "add d");

    std::fs::remove_file(dir.join("d"))?;
    write_file(FileSpec::new(dir.join("d/work.txt"), "precious".to_string()));

    run_gitlet_command(dir, &["checkout", "--", "d"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "There is an untracked file in the way; delete it, or add and commit it first.\n",
        ));

    assert_eq!(read_file(&dir.join("d/work.txt")), "precious");

    Ok(())
}

#[rstest]
fn restore_file_missing_from_the_commit_fails(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    let root = get_parent_commit_id(dir, &get_head_commit_sha(dir)?)?.ok_or("no parent")?;

    run_gitlet_command(dir, &["checkout", "--", "nope.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("File does not exist in that commit.\n"));

    run_gitlet_command(dir, &["checkout", &root, "--", "1.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("File does not exist in that commit.\n"));

    assert_eq!(read_file(&dir.join("1.txt")), "one");

    Ok(())
}

#[rstest]
#[case::unknown_id("0000000000000000000000000000000000000000")]
#[case::too_short("abc")]
#[case::not_hex("zzzzzzzz")]
fn restore_file_from_unknown_commit_fails(
    committed_repository_dir: TempDir,
    #[case] commit_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(
        committed_repository_dir.path(),
        &["checkout", commit_id, "--", "1.txt"],
    )
    .assert()
    .success()
    .stdout(predicate::eq("No commit with that id exists.\n"));

    Ok(())
}

#[rstest]
#[case::no_operands(&["checkout"])]
#[case::dashes_only(&["checkout", "--"])]
#[case::too_many(&["checkout", "a", "b"])]
fn checkout_with_incorrect_operands_fails(
    committed_repository_dir: TempDir,
    #[case] args: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(committed_repository_dir.path(), args)
        .assert()
        .success()
        .stdout(predicate::eq("Incorrect operands.\n"));

    Ok(())
}
