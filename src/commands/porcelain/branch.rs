use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::GitletError;

impl Repository {
    /// Create a branch at HEAD's commit without switching to it
    pub async fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let head_oid = self.head_oid()?;

        self.refs().create_branch(&branch_name, &head_oid)?;

        Ok(())
    }

    /// Delete a branch pointer; its commits stay in the store
    pub async fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        // a name that cannot be a branch cannot name an existing one either
        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| GitletError::BranchNotFound(branch_name.to_string()))?;

        self.refs().delete_branch(&branch_name)?;

        Ok(())
    }
}
