//! Working directory access
//!
//! All paths handed to and returned from the workspace are repository
//! relative and `/`-separated, the same form the index and trees use.

use crate::areas::repository::META_DIR;
use crate::artifacts::errors::{Error, Result};
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute location of a repository-relative path.
    pub fn absolute(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|component| !component.is_empty())
            .fold(self.path.to_path_buf(), |path, component| path.join(component))
    }

    /// Resolve a user supplied path (absolute, or relative to the repository
    /// root) to its repository-relative form. The root itself maps to `""`.
    pub fn normalize(&self, path: &Path) -> Result<String> {
        let joined = self.path.join(path);

        let mut resolved = PathBuf::new();
        for component in joined.components() {
            match component {
                Component::ParentDir => {
                    resolved.pop();
                }
                Component::CurDir => {}
                other => resolved.push(other.as_os_str()),
            }
        }

        let relative = resolved
            .strip_prefix(&self.path)
            .map_err(|_| Error::invalid_path(path, "outside the repository"))?;

        let components = relative
            .components()
            .map(|component| {
                component
                    .as_os_str()
                    .to_str()
                    .map(str::to_string)
                    .ok_or_else(|| Error::invalid_path(path, "not valid UTF-8"))
            })
            .collect::<Result<Vec<_>>>()?;

        if Self::is_ignored(components.iter().map(String::as_str)) {
            return Err(Error::invalid_path(path, "inside the metadata directory"));
        }

        Ok(components.join("/"))
    }

    /// Every regular file below `relative_dir`, skipping the metadata directory.
    pub fn list_files(&self, relative_dir: &str) -> Result<Vec<String>> {
        let root = self.absolute(relative_dir);
        let mut files = Vec::new();

        let walker = WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.file_name() != META_DIR);

        for entry in walker {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }

            if let Some(relative) = self.relative(entry.path()) {
                files.push(relative);
            }
        }

        Ok(files)
    }

    fn relative(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.path).ok()?;
        let components = relative
            .components()
            .map(|component| component.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()?;

        if Self::is_ignored(components.iter().copied()) {
            return None;
        }

        Some(components.join("/"))
    }

    fn is_ignored<'a>(mut components: impl Iterator<Item = &'a str>) -> bool {
        components.any(|component| component == META_DIR)
    }

    pub fn read_file(&self, relative: &str) -> Result<Bytes> {
        Ok(std::fs::read(self.absolute(relative))?.into())
    }

    pub fn write_file(&self, relative: &str, data: &[u8]) -> Result<()> {
        std::fs::write(self.absolute(relative), data)?;

        Ok(())
    }

    /// Create a directory unless it already exists.
    pub fn make_directory(&self, relative: &str) -> Result<()> {
        let dir_path = self.absolute(relative);

        if !dir_path.is_dir() {
            std::fs::create_dir(&dir_path)?;
        }

        Ok(())
    }

    /// Remove a tracked file. Returns `false` when there was nothing to remove.
    pub fn remove_file(&self, relative: &str) -> Result<bool> {
        let file_path = self.absolute(relative);

        match std::fs::symlink_metadata(&file_path) {
            Ok(metadata) if metadata.is_file() => {
                std::fs::remove_file(&file_path)?;
                Ok(true)
            }
            Ok(_) => Ok(false),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove the now-empty parent directories of a removed file, stopping at
    /// the first directory that still has content. Best-effort.
    pub fn prune_empty_parents(&self, relative: &str) {
        let mut current = self.absolute(relative);

        while let Some(parent) = current.parent() {
            if parent == &*self.path || !parent.starts_with(&self.path) {
                break;
            }

            let is_empty = parent
                .read_dir()
                .map(|mut entries| entries.next().is_none())
                .unwrap_or(false);
            if !is_empty || std::fs::remove_dir(parent).is_err() {
                break;
            }

            current = parent.to_path_buf();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn workspace() -> (assert_fs::TempDir, Workspace) {
        let dir = assert_fs::TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        (dir, Workspace::new(root.into_boxed_path()))
    }

    #[rstest]
    #[case("a.txt", "a.txt")]
    #[case("./dir/../dir/b.txt", "dir/b.txt")]
    #[case(".", "")]
    fn normalizes_relative_paths(
        workspace: (assert_fs::TempDir, Workspace),
        #[case] input: &str,
        #[case] expected: &str,
    ) {
        let (_dir, workspace) = workspace;

        pretty_assertions::assert_eq!(workspace.normalize(Path::new(input)).unwrap(), expected);
    }

    #[rstest]
    #[case("../outside.txt")]
    #[case(".grove/index")]
    fn rejects_paths_outside_the_tracked_area(
        workspace: (assert_fs::TempDir, Workspace),
        #[case] input: &str,
    ) {
        let (_dir, workspace) = workspace;

        assert!(matches!(
            workspace.normalize(Path::new(input)),
            Err(Error::InvalidPath { .. })
        ));
    }

    #[rstest]
    fn list_files_skips_metadata_directory(workspace: (assert_fs::TempDir, Workspace)) {
        let (_dir, workspace) = workspace;
        let root = workspace.path().to_path_buf();
        std::fs::create_dir_all(root.join(".grove/objects")).unwrap();
        std::fs::create_dir_all(root.join("src/nested")).unwrap();
        std::fs::write(root.join(".grove/HEAD"), "ref").unwrap();
        std::fs::write(root.join("src/nested/lib.rs"), "lib").unwrap();
        std::fs::write(root.join("README"), "readme").unwrap();

        pretty_assertions::assert_eq!(
            workspace.list_files("").unwrap(),
            vec!["README".to_string(), "src/nested/lib.rs".to_string()]
        );
        pretty_assertions::assert_eq!(
            workspace.list_files("src").unwrap(),
            vec!["src/nested/lib.rs".to_string()]
        );
    }

    #[rstest]
    fn pruning_stops_at_non_empty_directories(workspace: (assert_fs::TempDir, Workspace)) {
        let (_dir, workspace) = workspace;
        let root = workspace.path().to_path_buf();
        std::fs::create_dir_all(root.join("a/b/c")).unwrap();
        std::fs::write(root.join("a/keep.txt"), "keep").unwrap();
        std::fs::write(root.join("a/b/c/gone.txt"), "gone").unwrap();

        assert!(workspace.remove_file("a/b/c/gone.txt").unwrap());
        workspace.prune_empty_parents("a/b/c/gone.txt");

        assert!(!root.join("a/b").exists());
        assert!(root.join("a/keep.txt").exists());
        assert!(!workspace.remove_file("a/b/c/gone.txt").unwrap());
    }
}
