use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::checkout::target::CheckoutTarget;
use crate::artifacts::objects::commit::Commit;
use crate::errors::GitletError;
use std::io::Write;
use std::path::PathBuf;

impl Repository {
    pub async fn checkout(&mut self, target: CheckoutTarget) -> anyhow::Result<()> {
        match target {
            CheckoutTarget::ByPath(path) => {
                let head = self.head_commit()?;
                self.restore_file(&head, &path)
            }
            CheckoutTarget::ByCommitAndPath { commit_id, path } => {
                let commit_oid = self.resolve_commit_id(&commit_id)?;
                let commit = self.load_commit(&commit_oid)?;
                self.restore_file(&commit, &path)
            }
            CheckoutTarget::ByBranch(branch) => self.switch_branch(&branch).await,
        }
    }

    /// Overwrite a working file with its content in `commit`
    ///
    /// The index is left alone: the restored file shows up as modified or
    /// unmodified relative to what is staged, like any other edit.
    fn restore_file(&self, commit: &Commit, path: &str) -> anyhow::Result<()> {
        let not_in_commit = || GitletError::FileNotInCommit(PathBuf::from(path));

        let file_path = self.workspace().normalize(path).ok_or_else(not_in_commit)?;
        let blob_oid = commit.file_oid(&file_path).ok_or_else(not_in_commit)?;
        let blob = self.load_blob(blob_oid)?;

        if self.workspace().is_populated_dir(&file_path) {
            return Err(GitletError::UntrackedFileInWay(file_path).into());
        }

        self.workspace().write_file(&file_path, blob.content())
    }

    async fn switch_branch(&mut self, branch: &str) -> anyhow::Result<()> {
        let no_such_branch = || GitletError::NoSuchBranch(branch.to_string());

        let branch_name = BranchName::try_parse(branch.to_string()).map_err(|_| no_such_branch())?;
        let target_oid = self
            .refs()
            .read_branch(&branch_name)?
            .ok_or_else(no_such_branch)?;

        let head_oid = self.head_oid()?;
        if target_oid == head_oid {
            return Err(GitletError::AlreadyOnBranch(branch.to_string()).into());
        }

        let head = self.load_commit(&head_oid)?;
        let target = self.load_commit(&target_oid)?;

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let mut migration = Migration::new(self, &head, &target);
        migration.plan_changes(&index)?;

        let refused = migration.refused().to_vec();
        for path in &refused {
            writeln!(self.writer(), "{}", GitletError::UntrackedFileInWay(path.clone()))?;
        }

        if !refused.is_empty() && self.config().abort_on_refusal() {
            tracing::debug!(refused = refused.len(), "checkout aborted before touching the working directory");
            return Ok(());
        }

        migration.apply_changes()?;

        self.refs().set_current_branch(&branch_name)?;
        self.refs().update_head(&target_oid)?;

        index.clear();
        index.write_updates()?;

        Ok(())
    }
}
