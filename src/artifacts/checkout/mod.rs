//! Checkout engine
//!
//! - `target`: what a `checkout` invocation asks for
//! - `conflict`: which working files are safe to overwrite
//! - `migration`: planning and applying a branch switch

pub mod conflict;
pub mod migration;
pub mod target;
