//! Content-addressed object store
//!
//! Objects are zlib-compressed and written under
//! `.gitlet/objects/<partition>/<2-hex>/<38-hex>`, one partition per object
//! type. The store is append-only: storing an object that already exists is a
//! no-op and nothing is ever rewritten or deleted.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::GitletError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn partition_path(&self, object_type: ObjectType) -> PathBuf {
        self.path.join(object_type.partition())
    }

    /// Store an object unless it already exists and return its id
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object.object_path()?);

        if object_path.exists() {
            tracing::debug!(oid = %object_id, kind = %object.object_type(), "object already stored");
            return Ok(object_id);
        }

        std::fs::create_dir_all(
            object_path
                .parent()
                .context(format!("Invalid object path {}", object_path.display()))?,
        )
        .context(format!(
            "Unable to create object directory {}",
            object_path.display()
        ))?;

        self.write_object(object_path, object.serialize()?)?;
        tracing::debug!(oid = %object_id, kind = %object.object_type(), "stored object");

        Ok(object_id)
    }

    pub fn has_blob(&self, object_id: &ObjectId) -> bool {
        self.object_file(ObjectType::Blob, object_id).exists()
    }

    pub fn has_commit(&self, object_id: &ObjectId) -> bool {
        self.object_file(ObjectType::Commit, object_id).exists()
    }

    /// Load a blob, `None` if no blob with this id was ever stored
    pub fn parse_blob(&self, object_id: &ObjectId) -> anyhow::Result<Option<Blob>> {
        match self.parse_object_as_bytes(ObjectType::Blob, object_id)? {
            Some(reader) => Ok(Some(Blob::deserialize(reader)?)),
            None => Ok(None),
        }
    }

    /// Load a commit, `None` if no commit with this id was ever stored
    pub fn parse_commit(&self, object_id: &ObjectId) -> anyhow::Result<Option<Commit>> {
        match self.parse_object_as_bytes(ObjectType::Commit, object_id)? {
            Some(reader) => Ok(Some(Commit::deserialize(reader)?)),
            None => Ok(None),
        }
    }

    /// Ids of every commit in the store, sorted
    pub fn commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let commits_path = self.partition_path(ObjectType::Commit);
        if !commits_path.exists() {
            return Ok(Vec::new());
        }

        let mut oids = WalkDir::new(&commits_path)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(&commits_path).ok()?;
                let oid = relative.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "");
                ObjectId::try_parse(oid).ok()
            })
            .collect::<Vec<_>>();
        oids.sort();

        Ok(oids)
    }

    /// Find all commits whose id starts with the given prefix
    ///
    /// Only the directory named after the first two characters is scanned, so
    /// the prefix must be at least two characters long.
    pub fn find_commits_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        if prefix.len() < 2 {
            return Ok(Vec::new());
        }

        let prefix = prefix.to_ascii_lowercase();
        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path = self.partition_path(ObjectType::Commit).join(dir_name);

        if !dir_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut matches = Vec::new();
        for entry in std::fs::read_dir(&dir_path)
            .with_context(|| format!("Unable to list {}", dir_path.display()))?
        {
            let entry = entry?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();

            if file_name.starts_with(file_prefix)
                && let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}"))
            {
                matches.push(oid);
            }
        }

        Ok(matches)
    }

    fn object_file(&self, object_type: ObjectType, object_id: &ObjectId) -> PathBuf {
        self.partition_path(object_type).join(object_id.to_path())
    }

    fn parse_object_as_bytes(
        &self,
        expected_type: ObjectType,
        object_id: &ObjectId,
    ) -> anyhow::Result<Option<impl BufRead>> {
        let object_path = self.object_file(expected_type, object_id);
        if !object_path.exists() {
            return Ok(None);
        }

        let object_content = self.read_object(object_path)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;
        if object_type != expected_type {
            return Err(GitletError::ConsistencyViolation(format!(
                "object {object_id} is stored as a {expected_type} but contains a {object_type}"
            ))
            .into());
        }

        Ok(Some(object_reader))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // the rename makes the object appear atomically
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
