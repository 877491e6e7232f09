use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::MIN_ABBREV_LENGTH;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::config::Config;
use crate::errors::GitletError;
use std::cell::{RefCell, RefMut};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handle to an on-disk repository
///
/// Built once per invocation from a [`Config`]; every command is a method on
/// it. Output goes to the injected writer so commands can be driven against an
/// in-memory buffer.
pub struct Repository {
    config: Config,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(config: Config, writer: Box<dyn std::io::Write>) -> Self {
        let git_dir = config.git_dir();

        let index = Index::new(git_dir.join("index").into_boxed_path());
        let database = Database::new(git_dir.join("objects").into_boxed_path());
        let workspace = Workspace::new(config.root().to_path_buf().into_boxed_path());
        let refs = Refs::new(git_dir.into_boxed_path());

        Repository {
            config,
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn head_oid(&self) -> anyhow::Result<ObjectId> {
        self.refs.read_head()?.ok_or_else(|| {
            GitletError::ConsistencyViolation("HEAD does not point at a commit".to_string()).into()
        })
    }

    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        self.load_commit(&self.head_oid()?)
    }

    /// Load a commit that some reference points at
    ///
    /// Unlike a lookup of a user-supplied id, a miss here means the store lost
    /// an object that is still referenced.
    pub fn load_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        self.database
            .parse_commit(oid)?
            .ok_or_else(|| GitletError::missing_object("commit", oid).into())
    }

    pub fn load_blob(&self, oid: &ObjectId) -> anyhow::Result<Blob> {
        self.database
            .parse_blob(oid)?
            .ok_or_else(|| GitletError::missing_object("blob", oid).into())
    }

    /// Resolve a full or abbreviated commit id typed by the user
    pub fn resolve_commit_id(&self, raw_id: &str) -> anyhow::Result<ObjectId> {
        let no_such_commit = || GitletError::NoSuchCommit(raw_id.to_string());

        if !ObjectId::is_valid_prefix(raw_id) {
            return Err(no_such_commit().into());
        }

        let mut candidates = self.database.find_commits_by_prefix(raw_id)?;
        match candidates.len() {
            1 => Ok(candidates.remove(0)),
            0 => Err(no_such_commit().into()),
            count => {
                tracing::debug!(
                    prefix = raw_id,
                    count,
                    min_length = MIN_ABBREV_LENGTH,
                    "ambiguous commit prefix"
                );
                Err(no_such_commit().into())
            }
        }
    }
}
