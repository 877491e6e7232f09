pub mod branch_name;

/// Branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";

/// Directory holding one ref file per branch, relative to `.gitlet`
pub const HEADS_DIR: &str = "refs/heads";

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Content of the current-branch record
pub const SYMREF_REGEX: &str = r"^ref: refs/heads/(.+)$";
