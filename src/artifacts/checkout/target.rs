use crate::errors::GitletError;

/// The three forms of `checkout`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutTarget {
    /// `checkout -- <path>`: restore a file from HEAD
    ByPath(String),
    /// `checkout <commit-id> -- <path>`: restore a file from any commit
    ByCommitAndPath { commit_id: String, path: String },
    /// `checkout <branch>`: switch branches
    ByBranch(String),
}

impl CheckoutTarget {
    /// Build a target from the operands before and after `--`
    pub fn from_operands(target: Option<String>, path: Option<String>) -> anyhow::Result<Self> {
        match (target, path) {
            (Some(branch), None) => Ok(CheckoutTarget::ByBranch(branch)),
            (None, Some(path)) => Ok(CheckoutTarget::ByPath(path)),
            (Some(commit_id), Some(path)) => {
                Ok(CheckoutTarget::ByCommitAndPath { commit_id, path })
            }
            (None, None) => Err(GitletError::IncorrectOperands.into()),
        }
    }
}
