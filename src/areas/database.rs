//! Object database
//!
//! Content-addressed store under `.grove/objects`. Objects are written once
//! under `<2 hex>/<38 hex>` and never modified; storing content that already
//! exists is a no-op. Nothing is ever garbage collected.

use crate::artifacts::errors::{Error, Result};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use bytes::Bytes;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).is_file()
    }

    /// Store an object unless one with the same id already exists.
    pub fn put(&self, object: &Object) -> Result<ObjectId> {
        let object_id = object.object_id();
        let object_path = self.object_path(&object_id);

        if object_path.exists() {
            tracing::debug!(oid = %object_id, kind = %object.object_type(), "object already stored");
            return Ok(object_id);
        }

        self.write_object(&object_path, object.serialize()?)?;
        tracing::debug!(oid = %object_id, kind = %object.object_type(), "stored object");

        Ok(object_id)
    }

    pub fn get(&self, object_id: &ObjectId) -> Result<Object> {
        let object_path = self.object_path(object_id);

        let data = match std::fs::read(&object_path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ObjectNotFound(object_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        Object::deserialize(&data).map_err(|e| e.with_oid(object_id))
    }

    pub fn get_blob(&self, object_id: &ObjectId) -> Result<Blob> {
        match self.get(object_id)? {
            Object::Blob(blob) => Ok(blob),
            other => Err(Self::unexpected_kind(object_id, ObjectType::Blob, &other)),
        }
    }

    pub fn get_tree(&self, object_id: &ObjectId) -> Result<Tree> {
        match self.get(object_id)? {
            Object::Tree(tree) => Ok(tree),
            other => Err(Self::unexpected_kind(object_id, ObjectType::Tree, &other)),
        }
    }

    pub fn get_commit(&self, object_id: &ObjectId) -> Result<Commit> {
        match self.get(object_id)? {
            Object::Commit(commit) => Ok(commit),
            other => Err(Self::unexpected_kind(object_id, ObjectType::Commit, &other)),
        }
    }

    fn unexpected_kind(object_id: &ObjectId, expected: ObjectType, found: &Object) -> Error {
        Error::corrupt(
            object_id,
            format!("expected {expected}, found {}", found.object_type()),
        )
    }

    fn write_object(&self, object_path: &Path, object_content: Bytes) -> Result<()> {
        let object_dir = object_path
            .parent()
            .ok_or_else(|| Error::invalid_path(object_path, "object path has no parent"))?;
        std::fs::create_dir_all(object_dir)?;

        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)?;
        file.write_all(&object_content)?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path)?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
