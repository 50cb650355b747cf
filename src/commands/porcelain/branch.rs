use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::errors::Result;
use crate::artifacts::objects::object_id::ObjectId;

/// Branches with ref files, sorted, plus the branch HEAD names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchListing {
    pub branches: Vec<BranchName>,
    pub current: BranchName,
}

impl BranchListing {
    pub fn is_current(&self, branch: &BranchName) -> bool {
        &self.current == branch
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchOutcome {
    Created { branch: BranchName, oid: ObjectId },
    /// `oid` is `None` when the deleted branch had no commits
    Deleted { branch: BranchName, oid: Option<ObjectId> },
    Listed(BranchListing),
}

impl Repository {
    /// Create, delete or list branches. Without a name the branches are
    /// listed; deleting requires a name.
    pub fn branch(&self, name: Option<&str>, delete: bool) -> Result<BranchOutcome> {
        match (name, delete) {
            (Some(name), false) => {
                let (branch, oid) = self.create_branch(name)?;
                Ok(BranchOutcome::Created { branch, oid })
            }
            (name, true) => {
                let (branch, oid) = self.delete_branch(name.unwrap_or_default())?;
                Ok(BranchOutcome::Deleted { branch, oid })
            }
            (None, false) => Ok(BranchOutcome::Listed(self.list_branches()?)),
        }
    }

    /// Point a new branch at the current branch's commit without switching to it.
    pub fn create_branch(&self, name: &str) -> Result<(BranchName, ObjectId)> {
        self.ensure_initialized()?;

        let branch = BranchName::try_parse(name)?;
        let oid = self.refs().create_branch(&branch)?;

        Ok((branch, oid))
    }

    pub fn delete_branch(&self, name: &str) -> Result<(BranchName, Option<ObjectId>)> {
        self.ensure_initialized()?;

        let branch = BranchName::try_parse(name)?;
        let oid = self.refs().delete_branch(&branch)?;

        Ok((branch, oid))
    }

    pub fn list_branches(&self) -> Result<BranchListing> {
        self.ensure_initialized()?;

        Ok(BranchListing {
            branches: self.refs().list_branches()?,
            current: self.refs().current_branch(),
        })
    }
}
