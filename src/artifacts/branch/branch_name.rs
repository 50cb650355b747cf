use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::artifacts::errors::{Error, Result};

/// Name of a branch under `refs/heads`, validated so it maps onto a
/// well-formed relative path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();

        if name.is_empty() {
            return Err(Error::InvalidBranchName(name));
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .map_err(|e| Error::InvalidBranchName(format!("{name} ({e})")))?;

        if re.is_match(&name) {
            return Err(Error::InvalidBranchName(name));
        }

        Ok(Self(name))
    }

    pub fn is_default_branch(&self) -> bool {
        self.0 == super::DEFAULT_BRANCH
    }

    pub fn default_branch() -> Self {
        Self(super::DEFAULT_BRANCH.to_string())
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
