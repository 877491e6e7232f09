//! User-facing error taxonomy
//!
//! Every failure a command can report to the user is a `GitletError` variant.
//! Commands raise them through `anyhow` (`Err(GitletError::X.into())`) and the
//! binary downcasts at the top level to decide how the process exits:
//!
//! - recoverable errors print their one-line message and exit cleanly
//! - fatal errors (`ConsistencyViolation`) abort loudly on stderr

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

/// Coarse classification of a `GitletError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotInitialized,
    NotFound,
    AlreadyExists,
    InvalidArgument,
    UntrackedFileInWay,
    ConsistencyViolation,
}

#[derive(Debug, thiserror::Error)]
pub enum GitletError {
    #[error("Please enter a command.")]
    NoCommand,
    #[error("No command with that name exists.")]
    UnknownCommand(String),
    #[error("Incorrect operands.")]
    IncorrectOperands,
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,
    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,
    #[error("File does not exist.")]
    FileNotFound(PathBuf),
    #[error("Please enter a commit message.")]
    EmptyMessage,
    #[error("No changes added to the commit.")]
    NothingToCommit,
    #[error("A commit with identical content already exists: {0}")]
    CommitCollision(ObjectId),
    #[error("No reason to remove the file.")]
    NoReasonToRemove(PathBuf),
    #[error("Found no commit with that message.")]
    NoCommitWithMessage,
    #[error("A branch with that name already exists.")]
    BranchAlreadyExists(String),
    #[error("A branch with that name does not exist.")]
    BranchNotFound(String),
    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),
    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch(String),
    #[error("No such branch exists.")]
    NoSuchBranch(String),
    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch(String),
    #[error("No commit with that id exists.")]
    NoSuchCommit(String),
    #[error("File does not exist in that commit.")]
    FileNotInCommit(PathBuf),
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInWay(PathBuf),
    #[error("repository is corrupt: {0}")]
    ConsistencyViolation(String),
}

impl GitletError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GitletError::NotInitialized => ErrorKind::NotInitialized,
            GitletError::FileNotFound(_)
            | GitletError::NoCommitWithMessage
            | GitletError::BranchNotFound(_)
            | GitletError::NoSuchBranch(_)
            | GitletError::NoSuchCommit(_)
            | GitletError::FileNotInCommit(_) => ErrorKind::NotFound,
            GitletError::AlreadyInitialized
            | GitletError::BranchAlreadyExists(_)
            | GitletError::CommitCollision(_) => ErrorKind::AlreadyExists,
            GitletError::NoCommand
            | GitletError::UnknownCommand(_)
            | GitletError::IncorrectOperands
            | GitletError::EmptyMessage
            | GitletError::NothingToCommit
            | GitletError::NoReasonToRemove(_)
            | GitletError::InvalidBranchName(_)
            | GitletError::CannotRemoveCurrentBranch(_)
            | GitletError::AlreadyOnBranch(_) => ErrorKind::InvalidArgument,
            GitletError::UntrackedFileInWay(_) => ErrorKind::UntrackedFileInWay,
            GitletError::ConsistencyViolation(_) => ErrorKind::ConsistencyViolation,
        }
    }

    /// Whether the error signals a corrupt store rather than a user mistake
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::ConsistencyViolation
    }

    pub fn missing_object(what: &str, oid: &ObjectId) -> Self {
        GitletError::ConsistencyViolation(format!("{what} {oid} is missing from the object store"))
    }
}
