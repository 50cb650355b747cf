use crate::areas::repository::Repository;
use crate::artifacts::errors::Result;
use crate::artifacts::log::log_entry::LogEntry;
use crate::artifacts::log::rev_list::RevList;

/// Default number of commits shown by `grove log`
pub const DEFAULT_LOG_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutcome {
    /// The current branch has no commit
    NoCommits,
    Entries(Vec<LogEntry>),
}

impl Repository {
    /// Up to `limit` commits of the current branch's mainline, newest first.
    pub fn log(&self, limit: usize) -> Result<LogOutcome> {
        self.ensure_initialized()?;

        let branch = self.refs().current_branch();
        let Some(head) = self.refs().branch_commit(&branch)? else {
            return Ok(LogOutcome::NoCommits);
        };

        let entries = RevList::new(self.database(), Some(head))
            .take(limit)
            .map(|entry| entry.map(LogEntry::from))
            .collect::<Result<Vec<_>>>()?;

        Ok(LogOutcome::Entries(entries))
    }
}
