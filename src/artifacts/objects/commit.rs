//! Commit object
//!
//! A commit is an immutable snapshot of every tracked file plus metadata. Unlike
//! git there are no trees: the commit carries the complete path -> blob table,
//! inherited from its parent and then updated with the staged changes.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>           (absent for the root commit)
//! timestamp <unix-seconds> <timezone>
//! file <blob-sha> <path>        (one per tracked path, sorted by path)
//!
//! <commit message>
//! ```
//!
//! The id is the hash of exactly these bytes, so two commits built from the same
//! (parent, timestamp, files, message) share an id.

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Message of the commit created by `init`
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Fixed-width format used by `log`
const LOG_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

/// Every tracked path and the blob holding its content
pub type FileTable = BTreeMap<PathBuf, ObjectId>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Previous commit, `None` only for the root commit
    parent: Option<ObjectId>,
    timestamp: DateTime<FixedOffset>,
    files: FileTable,
    message: String,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        timestamp: DateTime<FixedOffset>,
        files: FileTable,
        message: String,
    ) -> Self {
        Commit {
            parent,
            timestamp,
            files,
            message,
        }
    }

    /// The commit every repository starts from
    ///
    /// It uses the Unix epoch rather than the wall clock so its id is the same
    /// in every repository.
    pub fn root() -> Self {
        Commit::new(
            None,
            DateTime::<Utc>::UNIX_EPOCH.fixed_offset(),
            FileTable::new(),
            ROOT_COMMIT_MESSAGE.to_string(),
        )
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn files(&self) -> &FileTable {
        &self.files
    }

    pub fn file_oid(&self, path: &Path) -> Option<&ObjectId> {
        self.files.get(path)
    }

    pub fn tracks(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format(LOG_DATE_FORMAT).to_string()
    }

    fn serialize_timestamp(&self) -> String {
        format!(
            "{} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        let (seconds, timezone) = value
            .split_once(' ')
            .context("Invalid commit object: malformed timestamp")?;

        let seconds = seconds
            .parse::<i64>()
            .context("Invalid commit object: timestamp is not a number")?;
        let offset = *DateTime::parse_from_str(
            &format!("1970-01-01 00:00:00 {timezone}"),
            "%Y-%m-%d %H:%M:%S %z",
        )
        .context("Invalid commit object: malformed timezone")?
        .offset();

        DateTime::from_timestamp(seconds, 0)
            .map(|utc| utc.with_timezone(&offset))
            .context("Invalid commit object: timestamp out of range")
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        frame(self.object_type(), self.display().as_bytes())
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        // header lines are never empty, so the first blank line ends them
        let (headers, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;
        let mut lines = headers.lines().peekable();

        let parent = match lines
            .peek()
            .copied()
            .and_then(|line| line.strip_prefix("parent "))
        {
            Some(parent) => {
                let parent = ObjectId::try_parse(parent.to_string())?;
                lines.next();
                Some(parent)
            }
            None => None,
        };

        let timestamp = lines
            .next()
            .and_then(|line| line.strip_prefix("timestamp "))
            .context("Invalid commit object: missing timestamp line")?;
        let timestamp = Self::parse_timestamp(timestamp)?;

        let files = lines
            .map(|line| {
                let entry = line
                    .strip_prefix("file ")
                    .context("Invalid commit object: invalid file line")?;
                let (oid, path) = entry
                    .split_once(' ')
                    .context("Invalid commit object: file line without a path")?;

                Ok((PathBuf::from(path), ObjectId::try_parse(oid.to_string())?))
            })
            .collect::<anyhow::Result<FileTable>>()?;

        Ok(Self::new(parent, timestamp, files, message.to_string()))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = vec![];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!("timestamp {}", self.serialize_timestamp()));
        for (path, oid) in &self.files {
            lines.push(format!("file {} {}", oid.as_ref(), path.display()));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}
