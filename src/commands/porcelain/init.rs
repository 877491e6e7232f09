use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::GitletError;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.config().is_initialized() {
            return Err(GitletError::AlreadyInitialized.into());
        }

        for object_type in [ObjectType::Blob, ObjectType::Commit] {
            fs::create_dir_all(self.database().partition_path(object_type))
                .with_context(|| format!("Failed to create .gitlet/objects/{}", object_type.partition()))?;
        }

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .gitlet/refs/heads directory")?;

        let root_id = self
            .database()
            .store(&Commit::root())
            .context("Failed to store the initial commit")?;

        let default_branch = BranchName::default_branch();
        self.refs().update_branch(&default_branch, &root_id)?;
        self.refs()
            .set_current_branch(&default_branch)
            .context("Failed to create the current branch record")?;
        self.refs().update_head(&root_id)?;

        let index = self.index();
        let mut index = index.lock().await;
        index
            .write_updates()
            .context("Failed to create .gitlet/index file")?;

        writeln!(
            self.writer(),
            "Initialized empty Gitlet repository in {}",
            self.config().git_dir().display()
        )?;

        Ok(())
    }
}
