use crate::areas::repository::Repository;
use crate::artifacts::errors::Result;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::TreeEntry;

impl Repository {
    /// Entries of a tree in stored order. A commit id lists its root tree.
    pub fn ls_tree(&self, object_id: &str) -> Result<Vec<TreeEntry>> {
        self.ensure_initialized()?;

        let object_id = ObjectId::try_parse(object_id)?;
        let tree = match self.database().get(&object_id)? {
            Object::Commit(commit) => self.database().get_tree(commit.tree_oid())?,
            _ => self.database().get_tree(&object_id)?,
        };

        Ok(tree.entries().to_vec())
    }
}
