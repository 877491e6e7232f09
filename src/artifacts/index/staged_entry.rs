//! Entries of the index file
//!
//! A staged addition pairs a path with the blob holding its new content; a
//! staged removal is just the path.

use crate::artifacts::index::MAX_PATH_SIZE;
use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use byteorder::WriteBytesExt;
use bytes::Bytes;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedEntry {
    Addition { name: PathBuf, oid: ObjectId },
    Removal { name: PathBuf },
}

impl StagedEntry {
    pub fn name(&self) -> &Path {
        match self {
            StagedEntry::Addition { name, .. } | StagedEntry::Removal { name } => name,
        }
    }

    pub fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut entry_bytes = Vec::new();

        if let StagedEntry::Addition { oid, .. } = self {
            oid.write_h40_to(&mut entry_bytes)?;
        }
        Self::write_path(&mut entry_bytes, self.name())?;

        Ok(Bytes::from(entry_bytes))
    }

    pub fn read_addition(reader: &mut Checksum) -> anyhow::Result<Self> {
        let oid_bytes = reader.read(20)?;
        let oid = ObjectId::read_h40_from(&mut &oid_bytes[..])?;
        let name = reader.read_path()?;

        Ok(StagedEntry::Addition { name, oid })
    }

    pub fn read_removal(reader: &mut Checksum) -> anyhow::Result<Self> {
        Ok(StagedEntry::Removal {
            name: reader.read_path()?,
        })
    }

    fn write_path(writer: &mut Vec<u8>, path: &Path) -> anyhow::Result<()> {
        let name = path
            .to_str()
            .with_context(|| format!("Path is not valid UTF-8: {}", path.display()))?;
        if name.len() > MAX_PATH_SIZE {
            anyhow::bail!("Path is too long to be staged: {}", path.display());
        }

        writer.write_u16::<byteorder::NetworkEndian>(name.len() as u16)?;
        writer.write_all(name.as_bytes())?;

        Ok(())
    }
}
