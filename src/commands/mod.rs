//! Command implementations
//!
//! Commands load whatever persisted state they need, mutate it in memory and
//! write it back before returning. User-facing failures are returned as
//! [`GitletError`](crate::errors::GitletError) values for the binary to report.

pub mod porcelain;
