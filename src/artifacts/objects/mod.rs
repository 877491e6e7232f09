//! Gitlet object types and operations
//!
//! Everything that ends up in the object store is an immutable object identified
//! by the SHA-1 hash of its canonical serialization. There are two kinds:
//!
//! - **Blob**: the raw bytes of one file at the moment it was staged
//! - **Commit**: a full path -> blob table plus message, timestamp and parent link
//!
//! All objects serialize to `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Shortest prefix accepted when resolving an abbreviated object id
pub const MIN_ABBREV_LENGTH: usize = 4;
