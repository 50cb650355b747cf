//! Data structures and algorithms
//!
//! - `branch`: branch names and their validation
//! - `checkout`: rebuilding the working directory for another branch
//! - `errors`: the error taxonomy
//! - `log`: first-parent history traversal
//! - `objects`: object kinds (blob, tree, commit) and their encodings
//! - `tree`: index to tree conversion and tree walking
//! - `warning`: non-fatal conditions reported to the caller

pub mod branch;
pub mod checkout;
pub mod errors;
pub mod log;
pub mod objects;
pub mod tree;
pub mod warning;
