//! grove: a small content-addressed version control engine
//!
//! Objects (blobs, trees, commits) are stored by SHA-1 below `.grove/objects`,
//! branches are plain ref files and `HEAD` names the active branch. Every
//! operation goes through an explicit [`Repository`] handle.

pub mod areas;
pub mod artifacts;
pub mod commands;

pub use areas::repository::Repository;
pub use artifacts::errors::{Error, Result};
pub use artifacts::warning::Warning;
pub use commands::porcelain::add::AddOutcome;
pub use commands::porcelain::branch::{BranchListing, BranchOutcome};
pub use commands::porcelain::checkout::CheckoutOutcome;
pub use commands::porcelain::commit::CommitOutcome;
pub use commands::porcelain::log::LogOutcome;
