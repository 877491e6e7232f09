//! Commit history traversal
//!
//! - `rev_list`: lazy walk from a commit back to the root along parent links

pub mod rev_list;
