//! References (branches, current branch, HEAD)
//!
//! All references live under `.gitlet`:
//!
//! - `refs/heads/<name>`: one file per branch holding the id of its tip commit
//! - `CURRENT_BRANCH`: symbolic ref naming the checked-out branch
//!   (`ref: refs/heads/<name>`)
//! - `HEAD`: id of the commit the working directory reflects
//!
//! HEAD is a direct reference rather than a symref so that it can be read
//! without following the current branch; both are updated together by
//! `commit` and branch checkout.

use crate::artifacts::branch::HEADS_DIR;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Name of the current-branch record
pub const CURRENT_BRANCH_REF_NAME: &str = "CURRENT_BRANCH";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (typically `.gitlet`)
    path: Box<Path>,
}

impl Refs {
    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_ref_file(&self.head_path())
    }

    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        tracing::debug!(%oid, "moving HEAD");
        self.update_ref_file(self.head_path(), oid.as_ref())
    }

    /// Name of the checked-out branch
    ///
    /// A repository always has a current branch, so a missing record means the
    /// repository is damaged.
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let path = self.current_branch_path();
        if !path.exists() {
            return Err(GitletError::ConsistencyViolation(format!(
                "{CURRENT_BRANCH_REF_NAME} is missing"
            ))
            .into());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;

        BranchName::from_sym_ref(&content)
    }

    pub fn set_current_branch(&self, name: &BranchName) -> anyhow::Result<()> {
        tracing::debug!(branch = %name, "switching current branch");
        self.update_ref_file(self.current_branch_path(), &name.as_sym_ref())
    }

    pub fn is_current_branch(&self, name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == name)
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).is_file()
    }

    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        self.read_ref_file(&self.branch_path(name))
    }

    pub fn update_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        tracing::debug!(branch = %name, %oid, "updating branch");
        self.update_ref_file(self.branch_path(name), oid.as_ref())
    }

    /// Create a new branch pointing at `oid`
    ///
    /// Hierarchical names share the ref namespace with plain ones: `feature`
    /// and `feature/login` cannot coexist because one would need to be both a
    /// file and a directory.
    pub fn create_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        let branch_path = self.branch_path(name);

        if branch_path.is_file() {
            return Err(GitletError::BranchAlreadyExists(name.to_string()).into());
        }
        if branch_path.exists() || self.has_file_ancestor(&branch_path) {
            return Err(GitletError::InvalidBranchName(name.to_string()).into());
        }

        self.update_ref_file(branch_path, oid.as_ref())
    }

    /// Delete a branch ref; the commits it pointed at are left untouched
    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        let branch_path = self.branch_path(name);

        let oid = match self.read_ref_file(&branch_path)? {
            Some(oid) => oid,
            None => return Err(GitletError::BranchNotFound(name.to_string()).into()),
        };

        if self.is_current_branch(name)? {
            return Err(GitletError::CannotRemoveCurrentBranch(name.to_string()).into());
        }

        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;
        tracing::debug!(branch = %name, %oid, "deleted branch");

        Ok(oid)
    }

    fn read_ref_file(&self, path: &Path) -> anyhow::Result<Option<ObjectId>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = content.trim();

        ObjectId::try_parse(content.to_string())
            .map(Some)
            .map_err(|_| {
                GitletError::ConsistencyViolation(format!(
                    "ref file {} does not hold a commit id",
                    path.display()
                ))
                .into()
            })
    }

    fn update_ref_file(&self, path: Box<Path>, raw_ref: &str) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut()
            .write_all(raw_ref.as_bytes())
            .with_context(|| format!("failed to write ref file at {:?}", path))?;

        Ok(())
    }

    fn has_file_ancestor(&self, path: &Path) -> bool {
        let heads_path = self.heads_path();

        path.ancestors()
            .skip(1)
            .take_while(|ancestor| *ancestor != &*heads_path)
            .any(|ancestor| ancestor.is_file())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn branch_path(&self, name: &BranchName) -> Box<Path> {
        self.path.join(name.as_ref_path()).into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn current_branch_path(&self) -> Box<Path> {
        self.path.join(CURRENT_BRANCH_REF_NAME).into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.path.join(HEADS_DIR).into_boxed_path()
    }
}
