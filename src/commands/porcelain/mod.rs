//! User-facing commands
//!
//! Each command is an `async` method on [`Repository`](crate::areas::repository::Repository),
//! one file per command family:
//!
//! - `init`: create `.gitlet` with the root commit on `master`
//! - `add`: stage a file's current content
//! - `commit`: snapshot HEAD plus the staged changes
//! - `rm`: unstage a file or stage its removal
//! - `log`: `log`, `global-log` and `find`
//! - `branch`: `branch` and `rm-branch`
//! - `checkout`: restore a file or switch branches

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod rm;
