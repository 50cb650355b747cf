//! Non-fatal conditions reported while an operation keeps going.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The index could not be read or parsed and was treated as empty.
    UnreadableIndex { reason: String },
    /// The tree tracked by the branch being left could not be walked, so no
    /// files were removed for it.
    UnreadableTree { branch: String, reason: String },
    /// A tracked file could not be removed during checkout.
    RemovalFailed { path: String, reason: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnreadableIndex { reason } => {
                write!(f, "could not read index, treating it as empty: {reason}")
            }
            Warning::UnreadableTree { branch, reason } => {
                write!(f, "could not read tree of branch {branch}: {reason}")
            }
            Warning::RemovalFailed { path, reason } => {
                write!(f, "could not remove {path}: {reason}")
            }
        }
    }
}
