use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use std::io::Write;

impl Repository {
    /// Print the history of HEAD, newest first
    pub async fn log(&mut self) -> anyhow::Result<()> {
        let head_oid = self.head_oid()?;

        for commit in self.ancestors(head_oid) {
            let commit = commit?;
            self.show_commit(&commit.object_id()?, &commit)?;
        }

        Ok(())
    }

    /// Print every commit in the store, ordered by id
    pub async fn global_log(&mut self) -> anyhow::Result<()> {
        for oid in self.database().commit_ids()? {
            let commit = self.load_commit(&oid)?;
            self.show_commit(&oid, &commit)?;
        }

        Ok(())
    }

    /// Print the id of every commit whose message is exactly `message`
    pub async fn find(&mut self, message: &str) -> anyhow::Result<()> {
        let mut found = false;

        for oid in self.database().commit_ids()? {
            if self.load_commit(&oid)?.message() == message {
                writeln!(self.writer(), "{oid}")?;
                found = true;
            }
        }

        if !found {
            return Err(GitletError::NoCommitWithMessage.into());
        }

        Ok(())
    }

    fn show_commit(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {oid}")?;
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer)?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
