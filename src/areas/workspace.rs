//! Working directory access
//!
//! Paths handed to and returned from the workspace are always relative to the
//! repository root and never reach into `.gitlet`.

use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::objects::blob::Blob;
use crate::config::GITLET_DIR;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// Turn a path typed by the user into a workspace-relative path
    ///
    /// Returns `None` for paths outside the workspace, paths inside `.gitlet`
    /// and paths that cannot be recorded in a commit (e.g. containing a
    /// newline).
    pub fn normalize(&self, raw_path: &str) -> Option<PathBuf> {
        if raw_path.contains('\n') {
            return None;
        }

        let path = Path::new(raw_path);
        let path = if path.is_absolute() {
            path.strip_prefix(self.path.as_ref()).ok()?
        } else {
            path
        };

        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::Normal(name) => normalized.push(name),
                _ => return None,
            }
        }

        if normalized.as_os_str().is_empty() || Self::is_ignored(&normalized) {
            return None;
        }

        Some(normalized)
    }

    /// Every file in the working directory, sorted, excluding `.gitlet`
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.path)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != GITLET_DIR)
        {
            let entry = entry.with_context(|| {
                format!("Unable to list working directory {}", self.path.display())
            })?;

            if entry.file_type().is_file()
                && let Ok(relative) = entry.path().strip_prefix(self.path.as_ref())
            {
                files.push(relative.to_path_buf());
            }
        }
        files.sort();

        Ok(files)
    }

    fn is_ignored(path: &Path) -> bool {
        matches!(
            path.components().next(),
            Some(Component::Normal(name)) if name == GITLET_DIR
        )
    }

    pub fn exists(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);

        let content = std::fs::read(&full_path)
            .with_context(|| format!("Unable to read file {}", file_path.display()))?;

        Ok(content.into())
    }

    pub fn parse_blob(&self, file_path: &Path) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(file_path)?))
    }

    /// Whether `file_path` is a directory with at least one file somewhere
    /// below it
    pub fn is_populated_dir(&self, file_path: &Path) -> bool {
        let full_path = self.path.join(file_path);

        full_path.is_dir()
            && WalkDir::new(&full_path)
                .min_depth(1)
                .into_iter()
                .filter_map(Result::ok)
                .any(|entry| !entry.file_type().is_dir())
    }

    /// Write `data` to `file_path`, creating parent directories
    ///
    /// An empty directory tree at `file_path` is replaced; one holding files
    /// is an error.
    pub fn write_file(&self, file_path: &Path, data: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if self.is_populated_dir(file_path) {
            anyhow::bail!(
                "Refusing to replace directory {:?}: it still holds files",
                file_path
            );
        }
        if full_path.is_dir() {
            std::fs::remove_dir_all(&full_path).with_context(|| {
                format!("Failed to remove existing directory: {:?}", file_path)
            })?;
        }
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create parent directories for {:?}", file_path)
            })?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&full_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;
        file.write_all(data)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    /// Delete `file_path` if present, then prune the directories it leaves empty
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_file() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        self.prune_empty_parent_dirs(&full_path)
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.is_dir()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)
                .with_context(|| format!("Failed to remove empty directory: {:?}", parent))?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    // Deletions go first so that a file being replaced by a directory (or the
    // other way around) is out of the way before anything is written.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for action in [ActionType::Delete, ActionType::Modify, ActionType::Add] {
            self.apply_migration_action_set(migration, action)?;
        }

        Ok(())
    }

    fn apply_migration_action_set(
        &self,
        migration: &Migration,
        action: ActionType,
    ) -> anyhow::Result<()> {
        let Some(entries) = migration.actions().get(&action) else {
            return Ok(());
        };

        for (file_path, oid) in entries {
            match (&action, oid) {
                (ActionType::Delete, _) => self.remove_file(file_path)?,
                (ActionType::Add | ActionType::Modify, Some(oid)) => {
                    let data = migration.load_blob_data(oid)?;
                    self.write_file(file_path, &data)?;
                }
                _ => anyhow::bail!("Invalid action and entry combination"),
            }
        }

        Ok(())
    }
}
