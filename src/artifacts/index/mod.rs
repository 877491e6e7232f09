//! Staging area file format
//!
//! The index file persists the pending changes between two commits.
//!
//! ## File Format (Version 1)
//!
//! ```text
//! Header (16 bytes):
//!   - Signature: "GLIX" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Staged additions count (4 bytes)
//!   - Staged removals count (4 bytes)
//!
//! Additions (variable length):
//!   - Blob id (20 bytes)
//!   - Path length (2 bytes) followed by the path
//!
//! Removals (variable length):
//!   - Path length (2 bytes) followed by the path
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```
//!
//! All integers are big-endian. An empty file is a valid, empty index.

pub mod checksum;
pub mod index_header;
pub mod staged_entry;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 16;

/// Magic signature identifying index files
pub const SIGNATURE: &str = "GLIX";

/// Index file format version
pub const VERSION: u32 = 1;

/// Longest path an entry can hold (the length prefix is a u16)
pub const MAX_PATH_SIZE: usize = u16::MAX as usize;
