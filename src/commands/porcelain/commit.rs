use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::errors::Result;
use crate::artifacts::objects::commit::{Commit, Signature};
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::tree::builder::TreeBuilder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Created {
        oid: ObjectId,
        branch: BranchName,
        /// The commit has no parent
        root: bool,
    },
    /// The index is empty
    NothingToCommit,
    /// The staged tree is identical to the parent's tree
    WorkingTreeClean,
}

impl Repository {
    /// Record the staged snapshot on the current branch, with the current
    /// branch's commit (if any) as sole parent.
    pub fn commit(&self, message: &str, author: &str) -> Result<CommitOutcome> {
        self.ensure_initialized()?;
        Signature::validate_identity(author)?;

        let index = self.load_index();
        if index.is_empty() {
            return Ok(CommitOutcome::NothingToCommit);
        }

        let tree_oid = TreeBuilder::build(index.entries())?.write(self.database())?;

        let branch = self.refs().current_branch();
        let parent = self.refs().branch_commit(&branch)?;

        if let Some(parent_oid) = &parent {
            let parent_commit = self.database().get_commit(parent_oid)?;
            if parent_commit.tree_oid() == &tree_oid {
                tracing::debug!(tree = %tree_oid, "tree unchanged since parent");
                return Ok(CommitOutcome::WorkingTreeClean);
            }
        }

        let root = parent.is_none();
        let commit = Commit::new(
            tree_oid,
            parent.into_iter().collect(),
            Signature::now(author),
            message,
        );
        let commit_oid = self.database().put(&Object::Commit(commit))?;

        self.refs().set_branch_commit(&branch, &commit_oid)?;
        self.clear_index()?;

        Ok(CommitOutcome::Created {
            oid: commit_oid,
            branch,
            root,
        })
    }
}
