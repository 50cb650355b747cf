use crate::areas::repository::Repository;
use crate::artifacts::errors::Result;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::tree::builder::TreeBuilder;

impl Repository {
    /// Store the tree for the current index and return its id. The index is
    /// left as is; an empty index gives the empty tree.
    pub fn write_tree(&self) -> Result<ObjectId> {
        self.ensure_initialized()?;

        let index = self.load_index();
        TreeBuilder::build(index.entries())?.write(self.database())
    }
}
