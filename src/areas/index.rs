//! Staging area (index)
//!
//! The index buffers the changes that the next commit will apply on top of
//! HEAD's file table:
//!
//! - `added`: paths staged for addition or modification, with their blob ids
//! - `removed`: paths staged for removal
//!
//! A path is never in both at once; staging it on one side drops it from the
//! other. The index is loaded from `.gitlet/index` at the start of every command
//! that needs it and written back when it changed.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::staged_entry::StagedEntry;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::{Context, anyhow};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.gitlet/index`)
    path: Box<Path>,
    /// Paths staged for addition mapped to their blob ids
    added: BTreeMap<PathBuf, ObjectId>,
    /// Paths staged for removal
    removed: BTreeSet<PathBuf>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            added: BTreeMap::new(),
            removed: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn added(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.added
    }

    pub fn removed(&self) -> &BTreeSet<PathBuf> {
        &self.removed
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn staged_oid(&self, path: &Path) -> Option<&ObjectId> {
        self.added.get(path)
    }

    pub fn is_staged_for_addition(&self, path: &Path) -> bool {
        self.added.contains_key(path)
    }

    pub fn is_staged_for_removal(&self, path: &Path) -> bool {
        self.removed.contains(path)
    }

    /// Load the index from disk
    ///
    /// A missing or empty file is an empty index. The trailing checksum is
    /// verified so a torn write is reported instead of silently dropping
    /// staged changes.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.reset();

        if !self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(self.path())
            .with_context(|| format!("Unable to open index file {}", self.path.display()))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock);
        let header = Self::parse_header(&mut reader)?;

        for _ in 0..header.added_count {
            if let StagedEntry::Addition { name, oid } = StagedEntry::read_addition(&mut reader)? {
                self.added.insert(name, oid);
            }
        }
        for _ in 0..header.removed_count {
            let entry = StagedEntry::read_removal(&mut reader)?;
            self.removed.insert(entry.name().to_path_buf());
        }

        reader.verify()
    }

    fn parse_header(reader: &mut Checksum) -> anyhow::Result<IndexHeader> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(&header_bytes)?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid index file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported index file version: {}",
                header.version
            ));
        }

        Ok(header)
    }

    /// Record `path` -> `oid` as a pending addition, dropping any pending removal
    pub fn stage_addition(&mut self, path: PathBuf, oid: ObjectId) {
        let removed = self.removed.remove(&path);

        if self.added.get(&path) != Some(&oid) {
            self.added.insert(path, oid);
            self.changed = true;
        } else if removed {
            self.changed = true;
        }
    }

    /// Record `path` as a pending removal, dropping any pending addition
    pub fn stage_removal(&mut self, path: PathBuf) {
        let unstaged = self.added.remove(&path).is_some();
        let inserted = self.removed.insert(path);

        self.changed |= unstaged || inserted;
    }

    /// Drop a pending addition; returns whether there was one
    pub fn unstage(&mut self, path: &Path) -> bool {
        let unstaged = self.added.remove(path).is_some();
        self.changed |= unstaged;

        unstaged
    }

    /// Forget anything staged for `path`, on either side
    pub fn discard(&mut self, path: &Path) {
        let unstaged = self.added.remove(path).is_some();
        let unmarked = self.removed.remove(path);

        self.changed |= unstaged || unmarked;
    }

    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.changed = true;
        }

        self.added.clear();
        self.removed.clear();
    }

    fn reset(&mut self) {
        self.added.clear();
        self.removed.clear();
        self.changed = false;
    }

    /// Persist the index
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the index file during writing.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())
            .with_context(|| format!("Unable to open index file {}", self.path.display()))?;
        let lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock);

        let header = IndexHeader {
            added_count: self.added.len() as u32,
            removed_count: self.removed.len() as u32,
            ..IndexHeader::empty()
        };
        writer.write(&header.serialize()?)?;

        for entry in self.entries() {
            writer.write(&entry.serialize()?)?;
        }

        writer.write_checksum()?;
        self.changed = false;

        Ok(())
    }

    /// Staged additions first, then staged removals, each sorted by path
    pub fn entries(&self) -> impl Iterator<Item = StagedEntry> + '_ {
        let additions = self
            .added
            .iter()
            .map(|(name, oid)| StagedEntry::Addition {
                name: name.clone(),
                oid: oid.clone(),
            });
        let removals = self
            .removed
            .iter()
            .map(|name| StagedEntry::Removal { name: name.clone() });

        additions.chain(removals)
    }
}
