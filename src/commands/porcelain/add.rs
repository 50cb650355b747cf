use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::errors::{Error, Result};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use std::path::Path;

/// What staging one user supplied path did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    File { path: String },
    Directory { path: String, count: usize },
}

impl Repository {
    /// Stage every path, in order, then persist the index once. Relative
    /// paths are resolved against the repository root.
    pub fn add(&self, paths: &[impl AsRef<Path>]) -> Result<Vec<AddOutcome>> {
        self.ensure_initialized()?;
        let mut index = self.load_index();

        let outcomes = paths
            .iter()
            .map(|path| self.stage_path(&mut index, path.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        index.write_updates()?;

        Ok(outcomes)
    }

    pub fn add_file(&self, path: impl AsRef<Path>) -> Result<String> {
        self.ensure_initialized()?;
        let path = path.as_ref();
        let relative = self.workspace().normalize(path)?;

        if !self.workspace().absolute(&relative).is_file() {
            return Err(self.missing_or_invalid(path, "not a file"));
        }

        let mut index = self.load_index();
        self.stage_file(&mut index, &relative)?;
        index.write_updates()?;

        Ok(relative)
    }

    /// Stage every file below a directory, returning how many were staged.
    pub fn add_directory(&self, path: impl AsRef<Path>) -> Result<usize> {
        self.ensure_initialized()?;
        let path = path.as_ref();
        let relative = self.workspace().normalize(path)?;

        if !self.workspace().absolute(&relative).is_dir() {
            return Err(self.missing_or_invalid(path, "not a directory"));
        }

        let mut index = self.load_index();
        let count = self.stage_directory(&mut index, &relative)?;
        index.write_updates()?;

        Ok(count)
    }

    fn stage_path(&self, index: &mut Index, path: &Path) -> Result<AddOutcome> {
        let relative = self.workspace().normalize(path)?;
        let absolute = self.workspace().absolute(&relative);

        if absolute.is_file() {
            self.stage_file(index, &relative)?;
            Ok(AddOutcome::File { path: relative })
        } else if absolute.is_dir() {
            let count = self.stage_directory(index, &relative)?;
            Ok(AddOutcome::Directory {
                path: relative,
                count,
            })
        } else {
            Err(self.missing_or_invalid(path, "neither a file nor a directory"))
        }
    }

    fn stage_directory(&self, index: &mut Index, relative: &str) -> Result<usize> {
        let files = self.workspace().list_files(relative)?;

        for file in &files {
            self.stage_file(index, file)?;
        }

        Ok(files.len())
    }

    fn stage_file(&self, index: &mut Index, relative: &str) -> Result<()> {
        let data = self.workspace().read_file(relative)?;
        let blob_id = self.database().put(&Object::Blob(Blob::new(data)))?;

        tracing::debug!(path = relative, oid = %blob_id, "staged file");
        index.add(relative.to_string(), blob_id);

        Ok(())
    }

    fn missing_or_invalid(&self, path: &Path, reason: &str) -> Error {
        if self.workspace().path().join(path).exists() {
            Error::invalid_path(path, reason)
        } else {
            Error::PathNotFound(path.to_path_buf())
        }
    }
}
