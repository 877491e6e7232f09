//! Data structures and algorithms behind the commands
//!
//! - `branch`: branch names and the current-branch symref
//! - `checkout`: checkout targets, the overwrite guard and branch-switch planning
//! - `core`: pager output adapter
//! - `index`: on-disk format of the staging area
//! - `log`: commit history traversal
//! - `objects`: blobs, commits and their ids

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod objects;
