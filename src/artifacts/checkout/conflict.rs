use crate::areas::index::Index;
use crate::artifacts::objects::commit::Commit;
use std::path::Path;
use std::str::FromStr;

/// What makes a working file safe to overwrite during a branch checkout
///
/// A file that is not tracked holds work that exists nowhere else, so checkout
/// refuses to overwrite it when the target snapshot has different content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardBasis {
    /// Tracked by HEAD's commit or staged for addition
    #[default]
    Tracked,
    /// Staged for addition only
    Staged,
}

impl GuardBasis {
    pub fn is_tracked(&self, path: &Path, head: &Commit, index: &Index) -> bool {
        match self {
            GuardBasis::Tracked => head.tracks(path) || index.is_staged_for_addition(path),
            GuardBasis::Staged => index.is_staged_for_addition(path),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GuardBasis::Tracked => "tracked",
            GuardBasis::Staged => "staged",
        }
    }
}

impl FromStr for GuardBasis {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tracked" => Ok(GuardBasis::Tracked),
            "staged" => Ok(GuardBasis::Staged),
            other => anyhow::bail!("Invalid checkout guard: {other} (expected 'tracked' or 'staged')"),
        }
    }
}

impl std::fmt::Display for GuardBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
