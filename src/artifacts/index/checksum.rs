//! Checksummed access to a locked index file
//!
//! Every byte read or written passes through a running SHA-1 digest so the
//! trailing checksum can be written or verified once the entries are done.

use crate::artifacts::index::CHECKSUM_SIZE;
use anyhow::anyhow;
use byteorder::ByteOrder;
use bytes::Bytes;
use file_guard::FileGuard;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::PathBuf;

pub struct Checksum<'f> {
    file: FileGuard<&'f mut std::fs::File>,
    digest: Sha1,
}

impl<'f> Checksum<'f> {
    pub fn new(file: FileGuard<&'f mut std::fs::File>) -> Self {
        Checksum {
            file,
            digest: Sha1::new(),
        }
    }

    pub fn read(&mut self, size: usize) -> anyhow::Result<Bytes> {
        let mut buffer = vec![0; size];
        self.file
            .deref_mut()
            .read_exact(&mut buffer)
            .map_err(|_| anyhow!("Unexpected end-of-file while reading index"))?;

        self.digest.update(&buffer);
        Ok(Bytes::from(buffer))
    }

    pub fn read_u16(&mut self) -> anyhow::Result<u16> {
        let bytes = self.read(2)?;
        Ok(byteorder::NetworkEndian::read_u16(&bytes))
    }

    /// Read a length-prefixed path
    pub fn read_path(&mut self) -> anyhow::Result<PathBuf> {
        let length = self.read_u16()? as usize;
        let bytes = self.read(length)?;
        let path = String::from_utf8(bytes.to_vec())
            .map_err(|_| anyhow!("Invalid path in index entry"))?;

        Ok(PathBuf::from(path))
    }

    pub fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.file.deref_mut().write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    pub fn write_checksum(&mut self) -> anyhow::Result<()> {
        let checksum = self.digest.clone().finalize();
        self.file
            .deref_mut()
            .write_all(checksum.as_slice())
            .map_err(|_| anyhow!("Failed to write checksum to index file"))?;

        Ok(())
    }

    pub fn verify(&mut self) -> anyhow::Result<()> {
        let mut expected_checksum = [0u8; CHECKSUM_SIZE];
        self.file
            .deref_mut()
            .read_exact(&mut expected_checksum)
            .map_err(|_| anyhow!("Index file is missing its checksum"))?;

        let actual_checksum = self.digest.clone().finalize();

        if expected_checksum != actual_checksum.as_slice() {
            return Err(anyhow!("Checksum does not match value stored on disk"));
        }

        Ok(())
    }
}
