use crate::common::command::{
    add_and_commit, committed_repository_dir, get_branch_commit_sha, get_current_branch,
    get_head_commit_sha, run_gitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use std::path::Path;

/// `master` tracks the initial files with `1.txt` changed and `master.txt`
/// added; `feature` tracks the initial files with `a/2.txt` removed and
/// `feature.txt` added. The repository is left on `master`.
#[fixture]
fn diverged_repository_dir(committed_repository_dir: TempDir) -> TempDir {
    let dir = committed_repository_dir.path();
    run_gitlet_command(dir, &["branch", "feature"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.join("1.txt"), "master one".to_string()));
    write_file(FileSpec::new(dir.join("master.txt"), "master".to_string()));
    run_gitlet_command(dir, &["add", "1.txt"]).assert().success();
    add_and_commit(dir, "master.txt", "master work");

    // switching to `feature` (still at the shared commit) restores the
    // initial snapshot
    run_gitlet_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    run_gitlet_command(dir, &["rm", "a/2.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("feature.txt"), "feature".to_string()));
    add_and_commit(dir, "feature.txt", "feature work");

    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();

    committed_repository_dir
}

fn working_files(dir: &Path) -> Vec<String> {
    let mut files = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".gitlet")
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(dir)
                .ok()
                .map(|path| path.display().to_string())
        })
        .collect::<Vec<_>>();
    files.sort();
    files
}

#[rstest]
fn checkout_branch_successfully(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();

    run_gitlet_command(dir, &["checkout", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(get_current_branch(dir)?, "feature");
    assert_eq!(get_head_commit_sha(dir)?, get_branch_commit_sha(dir, "feature")?);
    assert_eq!(
        working_files(dir),
        vec!["1.txt", "a/b/3.txt", "feature.txt"]
    );
    assert_eq!(read_file(&dir.join("1.txt")), "one");
    assert!(!dir.join("master.txt").exists());

    Ok(())
}

#[rstest]
fn switching_away_and_back_restores_the_branch_snapshot(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();
    let master_files = working_files(dir);

    run_gitlet_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();

    assert_eq!(working_files(dir), master_files);
    assert_eq!(
        master_files,
        vec!["1.txt", "a/2.txt", "a/b/3.txt", "master.txt"]
    );
    assert_eq!(read_file(&dir.join("1.txt")), "master one");
    assert_eq!(read_file(&dir.join("a/2.txt")), "two");
    assert_eq!(get_current_branch(dir)?, "master");

    Ok(())
}

#[rstest]
fn checkout_branch_clears_the_staging_area(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();
    write_file(FileSpec::new(dir.join("master.txt"), "edited".to_string()));
    run_gitlet_command(dir, &["add", "master.txt"]).assert().success();

    run_gitlet_command(dir, &["checkout", "feature"])
        .assert()
        .success();

    run_gitlet_command(dir, &["commit", "leftovers"])
        .assert()
        .success()
        .stdout(predicate::eq("No changes added to the commit.\n"));

    Ok(())
}

#[rstest]
fn commits_after_switching_advance_the_new_branch(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();
    let master_before = get_branch_commit_sha(dir, "master")?;

    run_gitlet_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("more.txt"), "more".to_string()));
    add_and_commit(dir, "more.txt", "more feature work");

    assert_eq!(get_branch_commit_sha(dir, "master")?, master_before);
    assert_eq!(get_branch_commit_sha(dir, "feature")?, get_head_commit_sha(dir)?);

    Ok(())
}

#[rstest]
fn checkout_branch_with_a_dangling_separator_fails(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();
    let head = get_head_commit_sha(dir)?;

    run_gitlet_command(dir, &["checkout", "feature", "--"])
        .assert()
        .success()
        .stdout(predicate::eq("Incorrect operands.\n"));

    assert_eq!(get_current_branch(dir)?, "master");
    assert_eq!(get_head_commit_sha(dir)?, head);
    assert!(dir.join("master.txt").exists());

    Ok(())
}

#[rstest]
fn checkout_unknown_branch_fails(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(diverged_repository_dir.path(), &["checkout", "nope"])
        .assert()
        .success()
        .stdout(predicate::eq("No such branch exists.\n"));

    Ok(())
}

#[rstest]
fn checkout_current_branch_fails(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();

    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success()
        .stdout(predicate::eq("No need to checkout the current branch.\n"));

    assert_eq!(get_current_branch(dir)?, "master");

    Ok(())
}
