//! Repository areas
//!
//! - `database`: content-addressed store for blobs and commits
//! - `index`: staging area of pending additions and removals
//! - `refs`: branches, current branch and HEAD
//! - `repository`: handle tying the areas together
//! - `workspace`: working directory file operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
