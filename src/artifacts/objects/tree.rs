//! Tree object
//!
//! Trees represent directory snapshots. They contain entries for files (blobs)
//! and subdirectories (other trees), along with their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! Entries are encoded sorted by the tuple `(mode, name, hex id)` compared
//! byte-wise, so regular files (`100644`) always precede subdirectories
//! (`40000`). The order is part of the canonical form and therefore of the
//! tree's id; insertion order never matters.

use crate::artifacts::errors::{Error, Result};
use crate::artifacts::objects::OBJECT_ID_RAW_LENGTH;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Packable, UNKNOWN_OID, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub name: String,
    pub oid: ObjectId,
}

impl TreeEntry {
    fn sort_key(&self) -> (&[u8], &[u8], &[u8]) {
        (
            self.mode.as_str().as_bytes(),
            self.name.as_bytes(),
            self.oid.as_ref().as_bytes(),
        )
    }

    fn validate_name(name: &str) -> std::result::Result<(), String> {
        if name.is_empty() || name == "." || name == ".." || name.contains('/') {
            return Err(format!("invalid entry name {name:?}"));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Tree { entries }
    }

    pub fn add_entry(&mut self, mode: EntryMode, name: impl Into<String>, oid: ObjectId) {
        self.entries.push(TreeEntry::new(mode, name.into(), oid));
    }

    /// Entries in the order they were inserted or, for a decoded tree, stored.
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in canonical encoding order.
    pub fn sorted_entries(&self) -> Vec<&TreeEntry> {
        let mut entries = self.entries.iter().collect::<Vec<_>>();
        entries.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        entries
    }
}

impl Packable for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn encode(&self) -> Bytes {
        let mut content = Vec::new();

        for entry in self.sorted_entries() {
            content.extend_from_slice(entry.mode.as_str().as_bytes());
            content.push(b' ');
            content.extend_from_slice(entry.name.as_bytes());
            content.push(0);
            content.extend_from_slice(&entry.oid.to_raw());
        }

        Bytes::from(content)
    }
}

impl Unpackable for Tree {
    fn decode(content: &[u8]) -> Result<Self> {
        let corrupt = |reason: String| Error::corrupt(UNKNOWN_OID, reason);
        let mut entries = Vec::new();
        let mut rest = content;

        while !rest.is_empty() {
            let space = rest
                .iter()
                .position(|&byte| byte == b' ')
                .ok_or_else(|| corrupt("unexpected end of entry mode".into()))?;
            let mode = std::str::from_utf8(&rest[..space])
                .map_err(|_| corrupt("entry mode is not UTF-8".into()))?;
            let mode = EntryMode::try_from(mode).map_err(corrupt)?;
            rest = &rest[space + 1..];

            let nul = rest
                .iter()
                .position(|&byte| byte == 0)
                .ok_or_else(|| corrupt("unexpected end of entry name".into()))?;
            let name = std::str::from_utf8(&rest[..nul])
                .map_err(|_| corrupt("entry name is not UTF-8".into()))?
                .to_string();
            TreeEntry::validate_name(&name).map_err(corrupt)?;
            rest = &rest[nul + 1..];

            if rest.len() < OBJECT_ID_RAW_LENGTH {
                return Err(corrupt(format!("truncated object id for entry {name:?}")));
            }
            let oid = ObjectId::from_raw(&rest[..OBJECT_ID_RAW_LENGTH])?;
            rest = &rest[OBJECT_ID_RAW_LENGTH..];

            entries.push(TreeEntry::new(mode, name, oid));
        }

        Ok(Tree { entries })
    }
}
