//! Porcelain commands
//!
//! - `init`: create the metadata directory
//! - `add`: stage files for commit
//! - `commit`: record the staged snapshot on the current branch
//! - `checkout`: switch branches, rebuilding the working directory
//! - `branch`: create, list or delete branches
//! - `log`: show first-parent history

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
