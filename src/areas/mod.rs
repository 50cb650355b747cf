//! Stateful repository areas
//!
//! - `database`: content-addressed object store below `.grove/objects`
//! - `index`: staging area mapping paths to blob ids
//! - `refs`: branch pointers and the symbolic `HEAD`
//! - `repository`: the handle tying the areas together
//! - `workspace`: working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
