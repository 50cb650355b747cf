//! Command implementations, as `impl Repository` blocks
//!
//! - `plumbing`: low-level object commands (hash-object, cat-file, write-tree, ls-tree)
//! - `porcelain`: user-facing workflows (init, add, commit, checkout, branch, log)
//!
//! Commands return structured outcomes; formatting is left to the caller.

pub mod plumbing;
pub mod porcelain;
