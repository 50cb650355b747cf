//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character lowercase hexadecimal strings. Every object in
//! the store is identified by the SHA-1 of its header-prefixed content.
//!
//! ## Storage
//!
//! Objects are stored in `.grove/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::errors::{Error, Result};
use crate::artifacts::objects::{OBJECT_ID_LENGTH, OBJECT_ID_RAW_LENGTH};
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::path::PathBuf;

/// Validated 40-character hexadecimal object id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Uppercase digits are accepted and normalised to lowercase.
    pub fn try_parse(id: impl Into<String>) -> Result<Self> {
        let id = id.into();

        if id.len() != OBJECT_ID_LENGTH || !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidObjectId(id));
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// SHA-1 of an already header-prefixed byte sequence.
    pub fn digest(data: &[u8]) -> Self {
        let digest = Sha1::digest(data);
        Self(format!("{digest:x}"))
    }

    /// The 20 raw bytes of the id, as stored in tree entries.
    pub fn to_raw(&self) -> [u8; OBJECT_ID_RAW_LENGTH] {
        let mut raw = [0u8; OBJECT_ID_RAW_LENGTH];

        for (byte, pair) in raw.iter_mut().zip(self.0.as_bytes().chunks_exact(2)) {
            *byte = (Self::nibble(pair[0]) << 4) | Self::nibble(pair[1]);
        }

        raw
    }

    // ids only ever hold lowercase hex
    fn nibble(digit: u8) -> u8 {
        match digit {
            b'0'..=b'9' => digit - b'0',
            b'a'..=b'f' => digit - b'a' + 10,
            _ => 0,
        }
    }

    /// Build an object ID from its raw 20-byte form.
    pub fn from_raw(raw: &[u8]) -> Result<Self> {
        if raw.len() != OBJECT_ID_RAW_LENGTH {
            return Err(Error::InvalidObjectId(format!(
                "expected {OBJECT_ID_RAW_LENGTH} raw bytes, got {}",
                raw.len()
            )));
        }

        let hex40 = raw.iter().map(|byte| format!("{byte:02x}")).collect::<String>();
        Ok(Self(hex40))
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ObjectId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::try_parse(value)
    }
}

impl From<ObjectId> for String {
    fn from(oid: ObjectId) -> Self {
        oid.0
    }
}
