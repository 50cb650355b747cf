//! Plumbing commands
//!
//! Direct access to stored objects, used for scripting and inspection:
//!
//! - `hash-object`: compute a file's blob id and optionally store it
//! - `cat-file`: load any stored object
//! - `write-tree`: store the tree for the current index without committing
//! - `ls-tree`: list the entries of a tree (or of a commit's tree)

pub mod cat_file;
pub mod hash_object;
pub mod ls_tree;
pub mod write_tree;
