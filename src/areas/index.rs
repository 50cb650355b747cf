//! Index (staging area)
//!
//! Maps repository-relative, `/`-separated file paths to the blob ids that
//! will make up the next commit. Directories are implicit in the paths.
//! The index is persisted as a JSON object and is emptied by every
//! successful commit and checkout.

use crate::artifacts::errors::Result;
use crate::artifacts::objects::object_id::ObjectId;
use file_guard::Lock;
use std::collections::BTreeMap;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.grove/index`)
    path: Box<Path>,
    entries: BTreeMap<String, ObjectId>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &BTreeMap<String, ObjectId> {
        &self.entries
    }

    pub fn get(&self, path: &str) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Load the index from disk.
    ///
    /// A missing file yields an empty index. A file that cannot be read or
    /// parsed also leaves the index empty but reports why, so callers can
    /// decide to carry on.
    pub fn rehydrate(&mut self) -> Result<()> {
        self.entries.clear();

        if !self.path.exists() {
            return Ok(());
        }

        let content = std::fs::read(&self.path)?;
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }

        self.entries = serde_json::from_slice(&content)?;
        tracing::debug!(entries = self.entries.len(), "loaded index");

        Ok(())
    }

    /// Stage `path`, dropping entries that can no longer coexist with it:
    /// any parent path staged as a file, and anything staged beneath `path`.
    pub fn add(&mut self, path: String, oid: ObjectId) {
        self.discard_conflicts(&path);
        self.entries.insert(path, oid);
    }

    fn discard_conflicts(&mut self, path: &str) {
        for (separator, _) in path.match_indices('/') {
            self.entries.remove(&path[..separator]);
        }

        let prefix = format!("{path}/");
        let children = self
            .entries
            .range(prefix.clone()..)
            .take_while(|(child, _)| child.starts_with(&prefix))
            .map(|(child, _)| child.clone())
            .collect::<Vec<_>>();

        for child in children {
            self.entries.remove(&child);
        }
    }

    pub fn write_updates(&self) -> Result<()> {
        let content = serde_json::to_vec_pretty(&self.entries)?;

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(&content)?;

        tracing::debug!(entries = self.entries.len(), "wrote index");

        Ok(())
    }
}
