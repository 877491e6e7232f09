use crate::areas::repository::Repository;
use crate::errors::GitletError;
use std::path::PathBuf;

impl Repository {
    pub async fn rm(&mut self, path: &str) -> anyhow::Result<()> {
        let no_reason = || GitletError::NoReasonToRemove(PathBuf::from(path));
        let file_path = self.workspace().normalize(path).ok_or_else(no_reason)?;

        let head = self.head_commit()?;

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        if head.tracks(&file_path) {
            index.stage_removal(file_path.clone());
            self.workspace().remove_file(&file_path)?;
        } else if !index.unstage(&file_path) {
            return Err(no_reason().into());
        }

        if index.is_changed() {
            index.write_updates()?;
        }

        Ok(())
    }
}
