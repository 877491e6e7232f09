//! Runtime configuration
//!
//! A `Config` is built once at startup from the process environment and handed
//! to the `Repository`, which passes it on to every operation. Nothing else in
//! the crate reads environment variables or the current directory.
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `GITLET_COMMIT_DATE` | fixed timestamp for new commits (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`) |
//! | `GITLET_CHECKOUT_GUARD` | `tracked` (default) or `staged`, see [`GuardBasis`] |
//! | `GITLET_ABORT_ON_REFUSAL` | `1`/`true` aborts a branch checkout before touching any file when a file is in the way |
//! | `NO_PAGER` | disable paging for `log` and `global-log` |
//! | `GITLET_LOG` | tracing filter, read by the binary |

use crate::artifacts::checkout::conflict::GuardBasis;
use anyhow::Context;
use chrono::{DateTime, FixedOffset, Timelike};
use std::path::{Path, PathBuf};

/// Name of the repository directory inside the working directory
pub const GITLET_DIR: &str = ".gitlet";

pub const COMMIT_DATE_ENV: &str = "GITLET_COMMIT_DATE";
pub const CHECKOUT_GUARD_ENV: &str = "GITLET_CHECKOUT_GUARD";
pub const ABORT_ON_REFUSAL_ENV: &str = "GITLET_ABORT_ON_REFUSAL";
pub const NO_PAGER_ENV: &str = "NO_PAGER";
pub const LOG_ENV: &str = "GITLET_LOG";

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory root (the directory holding `.gitlet`)
    root: PathBuf,
    /// Overrides the wall clock for new commits
    commit_date: Option<DateTime<FixedOffset>>,
    checkout_guard: GuardBasis,
    abort_on_refusal: bool,
    paging: bool,
}

impl Config {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Config {
            root: root.into(),
            commit_date: None,
            checkout_guard: GuardBasis::default(),
            abort_on_refusal: false,
            paging: true,
        }
    }

    pub fn from_env(root: &Path) -> anyhow::Result<Self> {
        let root = root
            .canonicalize()
            .with_context(|| format!("Unable to resolve working directory {}", root.display()))?;

        let commit_date = match std::env::var(COMMIT_DATE_ENV) {
            Ok(date) => Some(parse_commit_date(&date)?),
            Err(_) => None,
        };

        let checkout_guard = match std::env::var(CHECKOUT_GUARD_ENV) {
            Ok(guard) => guard.parse()?,
            Err(_) => GuardBasis::default(),
        };

        let abort_on_refusal = std::env::var(ABORT_ON_REFUSAL_ENV)
            .map(|value| is_truthy(&value))
            .unwrap_or(false);

        let paging = std::env::var_os(NO_PAGER_ENV).is_none();

        Ok(Config {
            root,
            commit_date,
            checkout_guard,
            abort_on_refusal,
            paging,
        })
    }

    pub fn with_commit_date(mut self, commit_date: DateTime<FixedOffset>) -> Self {
        self.commit_date = Some(commit_date);
        self
    }

    pub fn with_checkout_guard(mut self, checkout_guard: GuardBasis) -> Self {
        self.checkout_guard = checkout_guard;
        self
    }

    pub fn with_abort_on_refusal(mut self, abort_on_refusal: bool) -> Self {
        self.abort_on_refusal = abort_on_refusal;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn git_dir(&self) -> PathBuf {
        self.root.join(GITLET_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        self.git_dir().is_dir()
    }

    pub fn checkout_guard(&self) -> GuardBasis {
        self.checkout_guard
    }

    pub fn abort_on_refusal(&self) -> bool {
        self.abort_on_refusal
    }

    pub fn paging(&self) -> bool {
        self.paging
    }

    /// Timestamp for a new (non-root) commit, truncated to whole seconds
    /// since that is the resolution commits are serialized with
    pub fn commit_timestamp(&self) -> DateTime<FixedOffset> {
        let now = self
            .commit_date
            .unwrap_or_else(|| chrono::Local::now().fixed_offset());

        now.with_nanosecond(0).unwrap_or(now)
    }
}

pub fn parse_commit_date(date: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(date)
        .or_else(|_| DateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S %z"))
        .with_context(|| format!("Invalid {COMMIT_DATE_ENV} value: {date}"))
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
