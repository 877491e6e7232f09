use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// Ancestors of a commit, newest first, ending at the root commit
///
/// Every commit reached through a parent link must be in the store; a missing
/// one is yielded as an error once and ends the walk.
#[derive(Clone, new)]
pub struct RevList<'r> {
    repository: &'r Repository,
    start: ObjectId,
}

impl<'r> IntoIterator for RevList<'r> {
    type Item = anyhow::Result<Commit>;
    type IntoIter = RevListIntoIter<'r>;

    fn into_iter(self) -> Self::IntoIter {
        RevListIntoIter {
            repository: self.repository,
            current_commit_oid: Some(self.start),
        }
    }
}

#[derive(Clone)]
pub struct RevListIntoIter<'r> {
    repository: &'r Repository,
    current_commit_oid: Option<ObjectId>,
}

impl Iterator for RevListIntoIter<'_> {
    type Item = anyhow::Result<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match self.repository.load_commit(&commit_oid) {
            Ok(commit) => {
                // Move to the parent commit for the next iteration
                self.current_commit_oid = commit.parent().cloned();
                Some(Ok(commit))
            }
            Err(error) => Some(Err(error)),
        }
    }
}

impl Repository {
    pub fn ancestors(&self, start: ObjectId) -> RevList<'_> {
        RevList::new(self, start)
    }
}
