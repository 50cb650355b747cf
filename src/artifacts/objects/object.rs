//! The `Object` tagged variant and its shared encode/decode contract.
//!
//! Every object is hashed over `"<kind> <len>\0" + content` and persisted as
//! the zlib-compressed form of the same bytes. Compression never takes part
//! in the hash.

use crate::artifacts::errors::{Error, Result};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use bytes::Bytes;
use std::io::{Read, Write};

/// Placeholder id used by decoders that do not know which object they read.
pub(crate) const UNKNOWN_OID: &str = "<unknown>";

pub trait Packable {
    fn object_type(&self) -> ObjectType;

    /// Canonical content bytes, without the header.
    fn encode(&self) -> Bytes;
}

pub trait Unpackable {
    fn decode(content: &[u8]) -> Result<Self>
    where
        Self: Sized;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl Object {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Blob(blob) => blob.object_type(),
            Object::Tree(tree) => tree.object_type(),
            Object::Commit(commit) => commit.object_type(),
        }
    }

    pub fn content(&self) -> Bytes {
        match self {
            Object::Blob(blob) => blob.encode(),
            Object::Tree(tree) => tree.encode(),
            Object::Commit(commit) => commit.encode(),
        }
    }

    /// `"<kind> <len>\0" + content`, the byte sequence the id is computed over.
    pub fn to_bytes(&self) -> Bytes {
        let content = self.content();
        let header = format!("{} {}\0", self.object_type().as_str(), content.len());

        let mut object_bytes = Vec::with_capacity(header.len() + content.len());
        object_bytes.extend_from_slice(header.as_bytes());
        object_bytes.extend_from_slice(&content);

        Bytes::from(object_bytes)
    }

    pub fn object_id(&self) -> ObjectId {
        ObjectId::digest(&self.to_bytes())
    }

    /// Header-prefixed content, zlib-compressed for storage.
    pub fn serialize(&self) -> Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&self.to_bytes())?;

        Ok(encoder.finish()?.into())
    }

    pub fn deserialize(data: &[u8]) -> Result<Self> {
        let mut decoder = flate2::read::ZlibDecoder::new(data);
        let mut raw = Vec::new();
        decoder
            .read_to_end(&mut raw)
            .map_err(|e| Error::corrupt(UNKNOWN_OID, format!("decompression failed: {e}")))?;

        let (object_type, content) = Self::split_header(&raw)?;

        match object_type {
            ObjectType::Blob => Ok(Object::Blob(Blob::decode(content)?)),
            ObjectType::Tree => Ok(Object::Tree(Tree::decode(content)?)),
            ObjectType::Commit => Ok(Object::Commit(Commit::decode(content)?)),
        }
    }

    fn split_header(raw: &[u8]) -> Result<(ObjectType, &[u8])> {
        let nul = raw
            .iter()
            .position(|&byte| byte == 0)
            .ok_or_else(|| Error::corrupt(UNKNOWN_OID, "missing header separator"))?;
        let (header, content) = (&raw[..nul], &raw[nul + 1..]);

        let header = std::str::from_utf8(header)
            .map_err(|_| Error::corrupt(UNKNOWN_OID, "header is not valid UTF-8"))?;
        let (kind, size) = header
            .split_once(' ')
            .ok_or_else(|| Error::corrupt(UNKNOWN_OID, format!("malformed header {header:?}")))?;

        let object_type = ObjectType::try_from(kind).map_err(|e| Error::corrupt(UNKNOWN_OID, e))?;
        let size = size
            .parse::<usize>()
            .map_err(|_| Error::corrupt(UNKNOWN_OID, format!("invalid size {size:?}")))?;

        if size != content.len() {
            return Err(Error::corrupt(
                UNKNOWN_OID,
                format!("header declares {size} bytes, found {}", content.len()),
            ));
        }

        Ok((object_type, content))
    }
}

impl From<Blob> for Object {
    fn from(blob: Blob) -> Self {
        Object::Blob(blob)
    }
}

impl From<Tree> for Object {
    fn from(tree: Tree) -> Self {
        Object::Tree(tree)
    }
}

impl From<Commit> for Object {
    fn from(commit: Commit) -> Self {
        Object::Commit(commit)
    }
}
