//! Branch checkout planning
//!
//! Switching branches reconciles every working file with the target commit's
//! snapshot:
//!
//! 1. a file the target tracks with different content is overwritten, unless
//!    it is not tracked (see [`GuardBasis`]), in which case it is refused and
//!    left untouched
//! 2. a file the target does not track is deleted
//! 3. a target path missing from the working directory is written out
//!
//! All actions are planned before any file is touched, so a caller can look at
//! the refused files and decide whether to go ahead.

use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::checkout::conflict::GuardBasis;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

/// Type of file system action required for checkout
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Create new file
    Add,
    /// Delete file
    Delete,
    /// Overwrite existing file
    Modify,
}

/// Planned actions grouped by type, with the blob to write for additions and
/// modifications
pub type ActionsSet = HashMap<ActionType, Vec<(PathBuf, Option<ObjectId>)>>;

pub struct Migration<'r> {
    repository: &'r Repository,
    /// Commit the working directory currently reflects
    head: &'r Commit,
    /// Commit being checked out
    target: &'r Commit,
    guard: GuardBasis,
    actions: ActionsSet,
    /// Files left untouched because overwriting them would lose untracked work
    refused: Vec<PathBuf>,
}

impl<'r> Migration<'r> {
    pub fn new(repository: &'r Repository, head: &'r Commit, target: &'r Commit) -> Self {
        let actions = HashMap::from([
            (ActionType::Add, Vec::new()),
            (ActionType::Delete, Vec::new()),
            (ActionType::Modify, Vec::new()),
        ]);

        Self {
            repository,
            head,
            target,
            guard: repository.config().checkout_guard(),
            actions,
            refused: Vec::new(),
        }
    }

    pub fn actions(&self) -> &ActionsSet {
        &self.actions
    }

    pub fn refused(&self) -> &[PathBuf] {
        &self.refused
    }

    pub fn plan_changes(&mut self, index: &Index) -> anyhow::Result<()> {
        let working_files = self.repository.workspace().list_files()?;

        for path in &working_files {
            match self.target.file_oid(path) {
                Some(target_oid) => {
                    let current_oid = self.repository.workspace().parse_blob(path)?.object_id()?;
                    if &current_oid == target_oid {
                        continue;
                    }

                    if self.guard.is_tracked(path, self.head, index) {
                        self.record(ActionType::Modify, path.clone(), Some(target_oid.clone()));
                    } else {
                        tracing::warn!(path = %path.display(), guard = %self.guard, "untracked file in the way");
                        self.refused.push(path.clone());
                    }
                }
                None => self.record(ActionType::Delete, path.clone(), None),
            }
        }

        let present = working_files.into_iter().collect::<BTreeSet<_>>();
        for (path, oid) in self.target.files() {
            if !present.contains(path) {
                self.record(ActionType::Add, path.clone(), Some(oid.clone()));
            }
        }

        Ok(())
    }

    fn record(&mut self, action: ActionType, path: PathBuf, oid: Option<ObjectId>) {
        tracing::debug!(?action, path = %path.display(), "planned checkout action");
        self.actions.entry(action).or_default().push((path, oid));
    }

    pub fn apply_changes(&self) -> anyhow::Result<()> {
        self.repository.workspace().apply_migration(self)
    }

    pub fn load_blob_data(&self, oid: &ObjectId) -> anyhow::Result<Bytes> {
        Ok(self.repository.load_blob(oid)?.into_content())
    }
}
