//! Working directory migration between two branches
//!
//! The working tree is rebuilt from scratch: every file tracked by the
//! source branch's tree is removed, then every file of the target tree is
//! written back. Files tracked by neither tree are never touched.

use crate::areas::repository::{META_DIR, Repository};
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::errors::{Error, Result};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::tree::walker::TreeWalker;
use crate::artifacts::warning::Warning;

pub struct Migration<'r> {
    repository: &'r Repository,
    /// Files materialized by the source branch's commit
    tracked: Vec<String>,
}

impl<'r> Migration<'r> {
    /// Plan a migration away from `source`. A source tree that cannot be read
    /// is reported as a warning and treated as tracking nothing.
    pub fn new(repository: &'r Repository, source: &BranchName) -> Self {
        let tracked = match Self::source_files(repository, source) {
            Ok(tracked) => tracked,
            Err(e) => {
                repository.warn(Warning::UnreadableTree {
                    branch: source.to_string(),
                    reason: e.to_string(),
                });
                Vec::new()
            }
        };

        Migration {
            repository,
            tracked,
        }
    }

    fn source_files(repository: &Repository, source: &BranchName) -> Result<Vec<String>> {
        let Some(commit_oid) = repository.refs().branch_commit(source)? else {
            return Ok(Vec::new());
        };

        let commit = repository.database().get_commit(&commit_oid)?;
        TreeWalker::new(repository.database()).tracked_files(commit.tree_oid())
    }

    pub fn tracked_files(&self) -> &[String] {
        &self.tracked
    }

    /// Remove every tracked file, then prune the directories left empty.
    /// Missing files are skipped and failures are reported, never fatal.
    /// Returns how many files were removed.
    pub fn remove_tracked(&self) -> usize {
        let workspace = self.repository.workspace();
        let mut removed = Vec::new();

        for path in &self.tracked {
            match workspace.remove_file(path) {
                Ok(true) => removed.push(path),
                Ok(false) => tracing::debug!(path, "tracked file already gone"),
                Err(e) => self.repository.warn(Warning::RemovalFailed {
                    path: path.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        for path in &removed {
            workspace.prune_empty_parents(path);
        }

        removed.len()
    }

    /// Write every file of the target tree, creating directories as their
    /// entries are reached. Returns how many files were written.
    pub fn restore(&self, tree_oid: &ObjectId) -> Result<usize> {
        let database = self.repository.database();
        let workspace = self.repository.workspace();
        let mut restored = 0;

        TreeWalker::new(database).walk(tree_oid, |entry| {
            if entry.path.split('/').any(|component| component == META_DIR) {
                return Err(Error::invalid_path(&entry.path, "inside the metadata directory"));
            }

            if entry.mode.is_tree() {
                workspace.make_directory(&entry.path)
            } else {
                let blob = database.get_blob(&entry.oid)?;
                workspace.write_file(&entry.path, blob.content())?;
                restored += 1;
                Ok(())
            }
        })?;

        Ok(restored)
    }
}
