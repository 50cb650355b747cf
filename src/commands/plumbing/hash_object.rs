use crate::areas::repository::Repository;
use crate::artifacts::errors::{Error, Result};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use std::path::Path;

impl Repository {
    /// Blob id of a file's content. With `write`, the blob is also stored,
    /// which requires an initialized repository.
    pub fn hash_object(&self, path: impl AsRef<Path>, write: bool) -> Result<ObjectId> {
        let path = path.as_ref();
        let file_path = self.path().join(path);

        let data = match std::fs::read(&file_path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::PathNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        let object = Object::Blob(Blob::new(data.into()));

        if !write {
            return Ok(object.object_id());
        }

        self.ensure_initialized()?;
        self.database().put(&object)
    }
}
