//! Error taxonomy shared by every repository operation.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("path {} does not exist", .0.display())]
    PathNotFound(PathBuf),

    #[error("invalid path {}: {reason}", .path.display())]
    InvalidPath { path: PathBuf, reason: String },

    #[error("object {0} not found")]
    ObjectNotFound(String),

    #[error("corrupt object {oid}: {reason}")]
    CorruptObject { oid: String, reason: String },

    #[error("branch {0} does not exist")]
    BranchNotFound(String),

    #[error("branch {0} has no commits yet")]
    NoCommitsYet(String),

    #[error("repository already initialized at {}", .0.display())]
    RepositoryAlreadyInitialized(PathBuf),

    #[error("not a repository (missing {})", .0.display())]
    RepositoryMissing(PathBuf),

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("branch {0} already exists")]
    BranchAlreadyExists(String),

    #[error("corrupt ref {branch}: {content:?}")]
    CorruptRef { branch: String, content: String },

    #[error("invalid author {0:?}: line breaks and NUL bytes are not allowed")]
    InvalidAuthor(String),

    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("tree nesting deeper than {0} levels")]
    TreeTooDeep(usize),

    #[error("index serialization failed: {0}")]
    Index(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn corrupt(oid: impl ToString, reason: impl Into<String>) -> Self {
        Error::CorruptObject {
            oid: oid.to_string(),
            reason: reason.into(),
        }
    }

    /// Attribute a decoding failure to the object it was read from.
    pub(crate) fn with_oid(self, oid: &impl ToString) -> Self {
        match self {
            Error::CorruptObject { reason, .. } => Error::CorruptObject {
                oid: oid.to_string(),
                reason,
            },
            other => other,
        }
    }

    pub fn invalid_path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
