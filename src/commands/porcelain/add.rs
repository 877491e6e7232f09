use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::errors::GitletError;
use std::path::PathBuf;

impl Repository {
    pub async fn add(&mut self, path: &str) -> anyhow::Result<()> {
        let file_path = self
            .workspace()
            .normalize(path)
            .filter(|file_path| self.workspace().exists(file_path))
            .ok_or_else(|| GitletError::FileNotFound(PathBuf::from(path)))?;

        let head = self.head_commit()?;

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let blob = self.workspace().parse_blob(&file_path)?;
        let blob_id = blob.object_id()?;

        if head.file_oid(&file_path) == Some(&blob_id) {
            // back to the committed content: nothing left to stage either way
            index.discard(&file_path);
        } else {
            self.database().store(&blob)?;
            index.stage_addition(file_path, blob_id);
        }

        if index.is_changed() {
            index.write_updates()?;
        }

        Ok(())
    }
}
