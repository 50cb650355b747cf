//! Commit history traversal for `grove log`
//!
//! - `rev_list`: first-parent iterator over stored commits
//! - `log_entry`: the displayable summary of one visited commit

pub mod log_entry;
pub mod rev_list;
