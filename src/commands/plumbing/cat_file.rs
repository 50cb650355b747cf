use crate::areas::repository::Repository;
use crate::artifacts::errors::Result;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub fn cat_file(&self, object_id: &str) -> Result<Object> {
        self.ensure_initialized()?;

        let object_id = ObjectId::try_parse(object_id)?;
        self.database().get(&object_id)
    }
}

#[cfg(test)]
mod tests {
    use crate::areas::repository::Repository;
    use crate::artifacts::errors::Error;
    use crate::artifacts::objects::object::Object;

    #[test]
    fn loads_stored_objects_by_id() {
        let dir = assert_fs::TempDir::new().unwrap();
        let repository = Repository::new(dir.path()).unwrap();
        repository.init().unwrap();
        std::fs::write(repository.path().join("a.txt"), "hello").unwrap();
        let oid = repository.hash_object("a.txt", true).unwrap();

        let Object::Blob(blob) = repository.cat_file(oid.as_ref()).unwrap() else {
            panic!("expected a blob");
        };

        pretty_assertions::assert_eq!(blob.content().as_ref(), b"hello");
    }

    #[test]
    fn malformed_and_unknown_ids_fail() {
        let dir = assert_fs::TempDir::new().unwrap();
        let repository = Repository::new(dir.path()).unwrap();
        repository.init().unwrap();

        assert!(matches!(
            repository.cat_file("xyz"),
            Err(Error::InvalidObjectId(_))
        ));
        assert!(matches!(
            repository.cat_file("b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0"),
            Err(Error::ObjectNotFound(_))
        ));
    }
}
