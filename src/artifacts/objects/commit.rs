//! Commit object
//!
//! Commits represent snapshots of the repository at specific points in time.
//! They contain:
//! - A tree object ID (directory snapshot)
//! - Parent commit ID(s) (for history, first parent is the mainline)
//! - Author and committer information
//! - Commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name-and-contact> <timestamp> <timezone>
//! commiter <name-and-contact> <timestamp> <timezone>
//!
//! <commit message>
//! ```
//!
//! The committer label is spelled `commiter`; stored commits depend on it.

use crate::artifacts::errors::{Error, Result};
use crate::artifacts::objects::object::{Packable, UNKNOWN_OID, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};

const TREE_LABEL: &str = "tree ";
const PARENT_LABEL: &str = "parent ";
const AUTHOR_LABEL: &str = "author ";
const COMMITTER_LABEL: &str = "commiter ";

pub const AUTHOR_NAME_ENV: &str = "GROVE_AUTHOR_NAME";
pub const AUTHOR_EMAIL_ENV: &str = "GROVE_AUTHOR_EMAIL";
pub const AUTHOR_DATE_ENV: &str = "GROVE_AUTHOR_DATE";
pub const DEFAULT_IDENTITY: &str = "Anonymous <user@grove>";

/// Author or committer line: a free-form identity plus a timestamp with offset.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Signature {
    identity: String,
    timestamp: DateTime<FixedOffset>,
}

impl Signature {
    pub fn new(identity: impl Into<String>, timestamp: DateTime<FixedOffset>) -> Self {
        Signature {
            identity: identity.into(),
            timestamp,
        }
    }

    /// Signature stamped with the current time, unless `GROVE_AUTHOR_DATE`
    /// pins it (`%Y-%m-%d %H:%M:%S %z` or RFC 2822).
    pub fn now(identity: impl Into<String>) -> Self {
        let timestamp = std::env::var(AUTHOR_DATE_ENV)
            .ok()
            .and_then(|date_str| {
                DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z")
                    .or_else(|_| DateTime::parse_from_rfc2822(&date_str))
                    .ok()
            })
            .unwrap_or_else(|| chrono::Local::now().fixed_offset());

        Self::new(identity, timestamp)
    }

    /// Resolve the identity to commit with: an explicit value wins, then the
    /// `GROVE_AUTHOR_NAME`/`GROVE_AUTHOR_EMAIL` pair, then a fixed default.
    pub fn resolve_identity(explicit: Option<&str>) -> String {
        if let Some(identity) = explicit {
            return identity.to_string();
        }

        match (
            std::env::var(AUTHOR_NAME_ENV),
            std::env::var(AUTHOR_EMAIL_ENV),
        ) {
            (Ok(name), Ok(email)) => format!("{name} <{email}>"),
            _ => DEFAULT_IDENTITY.to_string(),
        }
    }

    /// Identities end up on a single header line of the commit text.
    pub fn validate_identity(identity: &str) -> Result<()> {
        if identity.contains(['\n', '\r', '\0']) {
            return Err(Error::InvalidAuthor(identity.to_string()));
        }

        Ok(())
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Timestamp rendered in UTC, e.g. `2024-01-01 12:34:56`
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }

    fn encode(&self) -> String {
        format!(
            "{} {} {}",
            self.identity,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Parse `"<identity> <unix-seconds> <+hhmm>"`, splitting exactly two
    /// tokens off the right so the identity may contain spaces.
    fn parse(value: &str) -> std::result::Result<Self, String> {
        let mut parts = value.rsplitn(3, ' ');
        let (Some(timezone), Some(timestamp), Some(identity)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(format!("malformed signature {value:?}"));
        };

        let timestamp = timestamp
            .parse::<i64>()
            .map_err(|_| format!("invalid timestamp {timestamp:?}"))?;
        let offset = Self::parse_offset(timezone)?;
        let timestamp = DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| format!("timestamp {timestamp} out of range"))?
            .with_timezone(&offset);

        Ok(Self::new(identity, timestamp))
    }

    fn parse_offset(timezone: &str) -> std::result::Result<FixedOffset, String> {
        let invalid = || format!("invalid timezone {timezone:?}");

        let (sign, digits) = match timezone.split_at_checked(1) {
            Some(("+", digits)) => (1, digits),
            Some(("-", digits)) => (-1, digits),
            _ => return Err(invalid()),
        };
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let hours = digits[..2].parse::<i32>().map_err(|_| invalid())?;
        let minutes = digits[2..].parse::<i32>().map_err(|_| invalid())?;

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    tree_oid: ObjectId,
    /// Parent commit IDs (empty for a root commit, several for a merge)
    parents: Vec<ObjectId>,
    author: Signature,
    committer: Signature,
    message: String,
}

impl Commit {
    /// Create a commit whose committer is its author
    pub fn new(
        tree_oid: ObjectId,
        parents: Vec<ObjectId>,
        author: Signature,
        message: impl Into<String>,
    ) -> Self {
        Commit {
            tree_oid,
            parents,
            committer: author.clone(),
            author,
            message: message.into(),
        }
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// First parent, the mainline
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn author(&self) -> &Signature {
        &self.author
    }

    pub fn committer(&self) -> &Signature {
        &self.committer
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

impl Packable for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn encode(&self) -> Bytes {
        let mut lines = vec![format!("{TREE_LABEL}{}", self.tree_oid)];
        for parent in &self.parents {
            lines.push(format!("{PARENT_LABEL}{parent}"));
        }
        lines.push(format!("{AUTHOR_LABEL}{}", self.author.encode()));
        lines.push(format!("{COMMITTER_LABEL}{}", self.committer.encode()));
        lines.push(String::new());
        lines.push(self.message.clone());

        Bytes::from(lines.join("\n"))
    }
}

impl Unpackable for Commit {
    fn decode(content: &[u8]) -> Result<Self> {
        let corrupt = |reason: String| Error::corrupt(UNKNOWN_OID, reason);
        let content = std::str::from_utf8(content)
            .map_err(|_| corrupt("commit is not valid UTF-8".into()))?;

        let (headers, message) = content.split_once("\n\n").unwrap_or((content, ""));

        let mut tree_oid = None;
        let mut parents = Vec::new();
        let mut author = None;
        let mut committer = None;

        for line in headers.split('\n') {
            if let Some(oid) = line.strip_prefix(TREE_LABEL) {
                tree_oid = Some(ObjectId::try_parse(oid).map_err(|e| corrupt(e.to_string()))?);
            } else if let Some(oid) = line.strip_prefix(PARENT_LABEL) {
                parents.push(ObjectId::try_parse(oid).map_err(|e| corrupt(e.to_string()))?);
            } else if let Some(signature) = line.strip_prefix(AUTHOR_LABEL) {
                author = Some(Signature::parse(signature).map_err(corrupt)?);
            } else if let Some(signature) = line.strip_prefix(COMMITTER_LABEL) {
                committer = Some(Signature::parse(signature).map_err(corrupt)?);
            }
        }

        let tree_oid = tree_oid.ok_or_else(|| corrupt("missing tree line".into()))?;
        let author = author.ok_or_else(|| corrupt("missing author line".into()))?;
        let committer = committer.unwrap_or_else(|| author.clone());

        Ok(Commit {
            tree_oid,
            parents,
            author,
            committer,
            message: message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn signature() -> Signature {
        let timestamp = DateTime::parse_from_str("2023-01-01 12:00:00 +0200", "%Y-%m-%d %H:%M:%S %z")
            .unwrap();
        Signature::new("Ada Lovelace <ada@example.com>", timestamp)
    }

    #[fixture]
    fn tree_oid() -> ObjectId {
        ObjectId::try_parse("4b825dc642cb6eb9a060e54bf8d69288fbee4904").unwrap()
    }

    #[rstest]
    fn encodes_lines_in_canonical_order(signature: Signature, tree_oid: ObjectId) {
        let parent = ObjectId::try_parse("b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0").unwrap();
        let commit = Commit::new(tree_oid, vec![parent], signature, "subject\n\nbody");

        let expected = "tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n\
            parent b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0\n\
            author Ada Lovelace <ada@example.com> 1672567200 +0200\n\
            commiter Ada Lovelace <ada@example.com> 1672567200 +0200\n\
            \n\
            subject\n\nbody";

        pretty_assertions::assert_eq!(String::from_utf8(commit.encode().to_vec()).unwrap(), expected);
    }

    #[rstest]
    fn decoding_keeps_message_blank_lines_and_parent_order(
        signature: Signature,
        tree_oid: ObjectId,
    ) {
        let parents = vec![
            ObjectId::digest(b"first"),
            ObjectId::digest(b"second"),
        ];
        let commit = Commit::new(tree_oid, parents.clone(), signature, "one\n\n\nfour\n");

        let decoded = Commit::decode(&commit.encode()).unwrap();

        pretty_assertions::assert_eq!(decoded.parents(), parents.as_slice());
        pretty_assertions::assert_eq!(decoded.message(), "one\n\n\nfour\n");
        pretty_assertions::assert_eq!(decoded, commit);
    }

    #[rstest]
    fn identity_keeps_embedded_spaces(signature: Signature) {
        let parsed = Signature::parse(&signature.encode()).unwrap();

        pretty_assertions::assert_eq!(parsed.identity(), "Ada Lovelace <ada@example.com>");
        pretty_assertions::assert_eq!(parsed.timestamp(), signature.timestamp());
        pretty_assertions::assert_eq!(parsed.readable_timestamp(), "2023-01-01 10:00:00");
    }

    #[rstest]
    #[case("tree nope\nauthor A 1 +0000\n\nmsg")]
    #[case("author A 1 +0000\n\nmsg")]
    #[case("tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n\nmsg")]
    #[case("tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\nauthor A x +0000\n\nmsg")]
    #[case("tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\nauthor A 1 UTC\n\nmsg")]
    fn malformed_commits_are_corrupt(#[case] content: &str) {
        assert!(matches!(
            Commit::decode(content.as_bytes()),
            Err(Error::CorruptObject { .. })
        ));
    }

    #[rstest]
    #[case("Eve\nparent 0000000000000000000000000000000000000000")]
    #[case("Eve\r")]
    #[case("Eve\0")]
    fn identities_spanning_lines_are_invalid(#[case] identity: &str) {
        assert!(matches!(
            Signature::validate_identity(identity),
            Err(Error::InvalidAuthor(_))
        ));
    }

    #[test]
    fn identity_with_spaces_and_brackets_is_valid() {
        assert!(Signature::validate_identity("Ada Lovelace <ada@example.com>").is_ok());
    }

    #[test]
    fn explicit_identity_wins() {
        pretty_assertions::assert_eq!(Signature::resolve_identity(Some("Me <me@x>")), "Me <me@x>");
    }
}
