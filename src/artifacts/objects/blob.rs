//! Blob object
//!
//! Blobs store file content. They carry only the raw bytes, without any
//! metadata like file name or mode (those live in the referencing tree entry).
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`

use crate::artifacts::errors::Result;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn into_content(self) -> Bytes {
        self.content
    }
}

impl Packable for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn encode(&self) -> Bytes {
        self.content.clone()
    }
}

impl Unpackable for Blob {
    fn decode(content: &[u8]) -> Result<Self> {
        Ok(Self::new(Bytes::copy_from_slice(content)))
    }
}
