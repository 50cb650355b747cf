use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::errors::{Error, Result};
use std::fs;

impl Repository {
    /// Create `.grove` with an empty object store, `HEAD` on the default
    /// branch and an empty index. The default branch gets no ref file until
    /// its first commit.
    pub fn init(&self) -> Result<()> {
        if self.is_initialized() {
            return Err(Error::RepositoryAlreadyInitialized(self.meta_path().into()));
        }

        fs::create_dir_all(self.database().objects_path())?;
        fs::create_dir_all(self.refs().heads_path())?;

        self.refs().set_head(&BranchName::default_branch())?;
        self.clear_index()?;

        tracing::debug!(path = %self.meta_path().display(), "initialized repository");

        Ok(())
    }
}
