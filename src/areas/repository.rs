use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::errors::{Error, Result};
use crate::artifacts::warning::Warning;
use std::path::Path;

/// Name of the metadata directory at the repository root
pub const META_DIR: &str = ".grove";

type WarningHandler = Box<dyn Fn(&Warning)>;

/// Explicit handle on one repository: its working directory root and the
/// metadata areas stored below `.grove`.
pub struct Repository {
    path: Box<Path>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    on_warning: WarningHandler,
}

impl Repository {
    /// Open a handle rooted at `path`. Nothing is created on disk here, a
    /// missing root is only made by `init`.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path = if path.exists() {
            path.canonicalize()?
        } else {
            std::path::absolute(path)?
        };
        let meta_path = path.join(META_DIR);

        let database = Database::new(meta_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(meta_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            database,
            workspace,
            refs,
            on_warning: Box::new(|warning| tracing::warn!("{warning}")),
        })
    }

    /// Replace the default warning handler, which logs through `tracing`.
    pub fn with_warning_handler(mut self, handler: impl Fn(&Warning) + 'static) -> Self {
        self.on_warning = Box::new(handler);
        self
    }

    pub(crate) fn warn(&self, warning: Warning) {
        (self.on_warning)(&warning);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn meta_path(&self) -> Box<Path> {
        self.path.join(META_DIR).into_boxed_path()
    }

    pub fn index_path(&self) -> Box<Path> {
        self.meta_path().join("index").into_boxed_path()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn is_initialized(&self) -> bool {
        self.meta_path().is_dir()
    }

    pub(crate) fn ensure_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(Error::RepositoryMissing(self.meta_path().into()))
        }
    }

    /// Load the index, degrading to an empty one (with a warning) when the
    /// persisted form is unreadable.
    pub fn load_index(&self) -> Index {
        let mut index = Index::new(self.index_path());

        if let Err(e) = index.rehydrate() {
            self.warn(Warning::UnreadableIndex {
                reason: e.to_string(),
            });
        }

        index
    }

    pub(crate) fn clear_index(&self) -> Result<()> {
        let mut index = Index::new(self.index_path());
        index.clear();
        index.write_updates()
    }
}
