use crate::artifacts::branch::{DEFAULT_BRANCH, HEADS_DIR, INVALID_BRANCH_NAME_REGEX, SYMREF_REGEX};
use crate::errors::GitletError;
use anyhow::Context;
use std::path::PathBuf;

/// A validated branch name
///
/// Names follow git's ref-name rules, so `feature/login` is a valid name and is
/// stored as a nested ref file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            return Err(GitletError::InvalidBranchName(name).into());
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if re.is_match(&name) {
            Err(GitletError::InvalidBranchName(name).into())
        } else {
            Ok(Self(name))
        }
    }

    pub fn default_branch() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }

    /// Parse the content of the current-branch record
    pub fn from_sym_ref(content: &str) -> anyhow::Result<Self> {
        let re = regex::Regex::new(SYMREF_REGEX)
            .with_context(|| format!("invalid symref regex: {SYMREF_REGEX}"))?;

        match re.captures(content.trim()) {
            Some(captures) => Self::try_parse(captures[1].to_string()),
            None => Err(GitletError::ConsistencyViolation(format!(
                "current branch record is not a branch reference: {}",
                content.trim()
            ))
            .into()),
        }
    }

    pub fn as_sym_ref(&self) -> String {
        format!("ref: {HEADS_DIR}/{}", self.0)
    }

    /// Location of the branch's ref file relative to `.gitlet`
    pub fn as_ref_path(&self) -> PathBuf {
        PathBuf::from(HEADS_DIR).join(&self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
