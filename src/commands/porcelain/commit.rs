use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::errors::GitletError;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        if message.trim().is_empty() {
            return Err(GitletError::EmptyMessage.into());
        }

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        if index.is_empty() {
            return Err(GitletError::NothingToCommit.into());
        }

        let parent = self.head_oid()?;
        let mut files = self.load_commit(&parent)?.files().clone();
        for (path, oid) in index.added() {
            files.insert(path.clone(), oid.clone());
        }
        for path in index.removed() {
            files.remove(path);
        }

        let commit = Commit::new(
            Some(parent),
            self.config().commit_timestamp(),
            files,
            message.to_string(),
        );
        let commit_id = commit.object_id()?;

        // same parent, second, files and message as an existing commit
        if self.database().has_commit(&commit_id) {
            tracing::warn!(oid = %commit_id, "commit id collision");
            return Err(GitletError::CommitCollision(commit_id).into());
        }

        self.database().store(&commit)?;

        let branch = self.refs().current_branch()?;
        self.refs().update_branch(&branch, &commit_id)?;
        self.refs().update_head(&commit_id)?;

        index.clear();
        index.write_updates()?;

        Ok(())
    }
}
