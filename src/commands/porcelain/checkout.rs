use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::errors::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOutcome {
    pub branch: BranchName,
    /// The branch was created by this checkout
    pub created: bool,
    /// Files of the previous branch removed from the working directory
    pub removed: usize,
    /// Files of the target branch written to the working directory
    pub restored: usize,
}

impl Repository {
    /// Switch to `target`, optionally creating it from the current branch's
    /// commit first. The working directory is rebuilt: files tracked by the
    /// current branch are removed, then the target's files are written.
    /// Nothing is touched when the target cannot be resolved.
    pub fn checkout(&self, target: &str, create: bool) -> Result<CheckoutOutcome> {
        self.ensure_initialized()?;

        let target = BranchName::try_parse(target)?;
        let source = self.refs().current_branch();
        let migration = Migration::new(self, &source);

        let created = if self.refs().branch_exists(&target) {
            false
        } else if create {
            self.refs().create_branch(&target)?;
            true
        } else {
            return Err(Error::BranchNotFound(target.to_string()));
        };

        self.refs().set_head(&target)?;

        let removed = migration.remove_tracked();
        let restored = match self.refs().branch_commit(&target)? {
            Some(commit_oid) => {
                let commit = self.database().get_commit(&commit_oid)?;
                migration.restore(commit.tree_oid())?
            }
            None => 0,
        };

        self.clear_index()?;

        tracing::debug!(from = %source, to = %target, removed, restored, "checked out branch");

        Ok(CheckoutOutcome {
            branch: target,
            created,
            removed,
            restored,
        })
    }
}
