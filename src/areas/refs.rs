//! References (branches and HEAD)
//!
//! Branches are files under `refs/heads/` holding a commit id followed by a
//! newline. HEAD is always symbolic: `ref: refs/heads/<branch>`. A branch
//! without a ref file is a valid branch that has no commits yet.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::errors::{Error, Result};
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

const SYMREF_PREFIX: &str = "ref: refs/heads/";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.grove`)
    path: Box<Path>,
}

impl Refs {
    /// Branch HEAD points at, falling back to the default branch when HEAD
    /// is missing or unreadable.
    pub fn current_branch(&self) -> BranchName {
        let head = match std::fs::read_to_string(self.head_path()) {
            Ok(head) => head,
            Err(e) => {
                tracing::debug!(error = %e, "HEAD unreadable, assuming default branch");
                return BranchName::default_branch();
            }
        };

        head.trim()
            .strip_prefix(SYMREF_PREFIX)
            .and_then(|name| BranchName::try_parse(name).ok())
            .unwrap_or_else(|| {
                tracing::warn!(content = head.trim(), "malformed HEAD, assuming default branch");
                BranchName::default_branch()
            })
    }

    pub fn set_head(&self, branch_name: &BranchName) -> Result<()> {
        self.update_ref_file(&self.head_path(), &format!("{SYMREF_PREFIX}{branch_name}\n"))?;
        tracing::debug!(branch = %branch_name, "HEAD updated");

        Ok(())
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.branch_path(branch_name).is_file()
    }

    /// Commit a branch points at, or `None` for a branch with no commits.
    pub fn branch_commit(&self, branch_name: &BranchName) -> Result<Option<ObjectId>> {
        let branch_path = self.branch_path(branch_name);
        if !branch_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        ObjectId::try_parse(content)
            .map(Some)
            .map_err(|_| Error::CorruptRef {
                branch: branch_name.to_string(),
                content: content.to_string(),
            })
    }

    pub fn set_branch_commit(&self, branch_name: &BranchName, oid: &ObjectId) -> Result<()> {
        self.update_ref_file(&self.branch_path(branch_name), &format!("{oid}\n"))?;
        tracing::debug!(branch = %branch_name, %oid, "branch updated");

        Ok(())
    }

    /// Point a new branch at the current branch's commit.
    pub fn create_branch(&self, branch_name: &BranchName) -> Result<ObjectId> {
        let current_branch = self.current_branch();
        let source_oid = self
            .branch_commit(&current_branch)?
            .ok_or_else(|| Error::NoCommitsYet(current_branch.to_string()))?;

        if self.branch_exists(branch_name) {
            return Err(Error::BranchAlreadyExists(branch_name.to_string()));
        }

        self.set_branch_commit(branch_name, &source_oid)?;

        Ok(source_oid)
    }

    /// Remove a branch and return the commit it pointed at. Deleting the
    /// checked-out branch is allowed.
    pub fn delete_branch(&self, branch_name: &BranchName) -> Result<Option<ObjectId>> {
        if !self.branch_exists(branch_name) {
            return Err(Error::BranchNotFound(branch_name.to_string()));
        }

        let oid = self.branch_commit(branch_name).ok().flatten();
        let branch_path = self.branch_path(branch_name);

        std::fs::remove_file(&branch_path)?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;
        tracing::debug!(branch = %branch_name, "branch deleted");

        Ok(oid)
    }

    /// All branch names, sorted.
    pub fn list_branches(&self) -> Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");

                BranchName::try_parse(name).ok()
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> Result<()> {
        let heads_path = self.heads_path();

        if let Some(parent) = path.parent()
            && parent != heads_path.as_path()
            && parent.starts_with(&heads_path)
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    pub fn branch_path(&self, branch_name: &BranchName) -> PathBuf {
        branch_name
            .as_ref()
            .split('/')
            .fold(self.heads_path(), |path, component| path.join(component))
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn refs() -> (assert_fs::TempDir, Refs) {
        let dir = assert_fs::TempDir::new().unwrap();
        let refs = Refs::new(dir.path().join(".grove").into_boxed_path());
        std::fs::create_dir_all(refs.heads_path()).unwrap();
        (dir, refs)
    }

    fn branch(name: &str) -> BranchName {
        BranchName::try_parse(name).unwrap()
    }

    #[rstest]
    fn missing_head_defaults_to_master(refs: (assert_fs::TempDir, Refs)) {
        let (_dir, refs) = refs;

        pretty_assertions::assert_eq!(refs.current_branch(), branch("master"));
    }

    #[rstest]
    fn head_round_trips_through_disk(refs: (assert_fs::TempDir, Refs)) {
        let (_dir, refs) = refs;
        refs.set_head(&branch("feature/login")).unwrap();

        pretty_assertions::assert_eq!(
            std::fs::read_to_string(refs.head_path()).unwrap(),
            "ref: refs/heads/feature/login\n"
        );
        pretty_assertions::assert_eq!(refs.current_branch(), branch("feature/login"));
    }

    #[rstest]
    fn branch_without_ref_file_has_no_commit(refs: (assert_fs::TempDir, Refs)) {
        let (_dir, refs) = refs;

        pretty_assertions::assert_eq!(refs.branch_commit(&branch("master")).unwrap(), None);
    }

    #[rstest]
    fn ref_files_hold_id_and_newline(refs: (assert_fs::TempDir, Refs)) {
        let (_dir, refs) = refs;
        let oid = ObjectId::digest(b"commit");

        refs.set_branch_commit(&branch("master"), &oid).unwrap();

        pretty_assertions::assert_eq!(
            std::fs::read_to_string(refs.heads_path().join("master")).unwrap(),
            format!("{oid}\n")
        );
        pretty_assertions::assert_eq!(refs.branch_commit(&branch("master")).unwrap(), Some(oid));
    }

    #[rstest]
    fn garbage_ref_is_corrupt(refs: (assert_fs::TempDir, Refs)) {
        let (_dir, refs) = refs;
        std::fs::write(refs.heads_path().join("master"), "not-a-hash\n").unwrap();

        assert!(matches!(
            refs.branch_commit(&branch("master")),
            Err(Error::CorruptRef { .. })
        ));
    }

    #[rstest]
    fn create_branch_requires_a_commit(refs: (assert_fs::TempDir, Refs)) {
        let (_dir, refs) = refs;

        assert!(matches!(
            refs.create_branch(&branch("feature")),
            Err(Error::NoCommitsYet(name)) if name == "master"
        ));
        assert!(!refs.branch_exists(&branch("feature")));
    }

    #[rstest]
    fn create_branch_copies_current_commit(refs: (assert_fs::TempDir, Refs)) {
        let (_dir, refs) = refs;
        let oid = ObjectId::digest(b"tip");
        refs.set_branch_commit(&branch("master"), &oid).unwrap();

        pretty_assertions::assert_eq!(refs.create_branch(&branch("feature")).unwrap(), oid);
        pretty_assertions::assert_eq!(refs.branch_commit(&branch("feature")).unwrap(), Some(oid));
        assert!(matches!(
            refs.create_branch(&branch("feature")),
            Err(Error::BranchAlreadyExists(_))
        ));
    }

    #[rstest]
    fn delete_branch_prunes_empty_directories(refs: (assert_fs::TempDir, Refs)) {
        let (_dir, refs) = refs;
        let oid = ObjectId::digest(b"tip");
        refs.set_branch_commit(&branch("feature/deep/login"), &oid).unwrap();

        pretty_assertions::assert_eq!(
            refs.delete_branch(&branch("feature/deep/login")).unwrap(),
            Some(oid)
        );
        assert!(!refs.heads_path().join("feature").exists());
        assert!(refs.heads_path().exists());
    }

    #[rstest]
    fn delete_missing_branch_fails(refs: (assert_fs::TempDir, Refs)) {
        let (_dir, refs) = refs;

        assert!(matches!(
            refs.delete_branch(&branch("ghost")),
            Err(Error::BranchNotFound(name)) if name == "ghost"
        ));
    }

    #[rstest]
    fn list_branches_is_sorted_and_recursive(refs: (assert_fs::TempDir, Refs)) {
        let (_dir, refs) = refs;
        let oid = ObjectId::digest(b"tip");
        for name in ["topic", "master", "feature/b", "feature/a"] {
            refs.set_branch_commit(&branch(name), &oid).unwrap();
        }

        pretty_assertions::assert_eq!(
            refs.list_branches().unwrap(),
            vec![
                branch("feature/a"),
                branch("feature/b"),
                branch("master"),
                branch("topic")
            ]
        );
    }
}
