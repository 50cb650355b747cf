//! Conversions between the flat index and nested tree objects
//!
//! - `builder`: index paths to stored trees, children before parents
//! - `walker`: stored trees back to the flat list of files they track

pub mod builder;
pub mod walker;

/// Deepest directory nesting accepted when building or walking trees
pub const MAX_TREE_DEPTH: usize = 256;
