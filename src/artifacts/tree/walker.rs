use crate::areas::database::Database;
use crate::artifacts::errors::{Error, Result};
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::TreeEntry;
use crate::artifacts::tree::MAX_TREE_DEPTH;

/// An entry reached while walking a stored tree, with its full
/// repository-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: String,
    pub mode: EntryMode,
    pub oid: ObjectId,
}

/// Pre-order walk over stored trees. Entries are visited in each tree's
/// stored order and a directory is always visited before anything nested
/// under it.
#[derive(Debug)]
pub struct TreeWalker<'d> {
    database: &'d Database,
}

impl<'d> TreeWalker<'d> {
    pub fn new(database: &'d Database) -> Self {
        TreeWalker { database }
    }

    pub fn walk<F>(&self, root: &ObjectId, mut visit: F) -> Result<()>
    where
        F: FnMut(&WalkEntry) -> Result<()>,
    {
        let mut stack = Vec::new();
        self.push_children(&mut stack, "", root, 1)?;

        while let Some((entry, depth)) = stack.pop() {
            visit(&entry)?;

            if entry.mode.is_tree() {
                self.push_children(&mut stack, &entry.path, &entry.oid, depth + 1)?;
            }
        }

        Ok(())
    }

    /// Every file path tracked by the tree, in walk order.
    pub fn tracked_files(&self, root: &ObjectId) -> Result<Vec<String>> {
        let mut files = Vec::new();

        self.walk(root, |entry| {
            if !entry.mode.is_tree() {
                files.push(entry.path.clone());
            }
            Ok(())
        })?;

        Ok(files)
    }

    fn push_children(
        &self,
        stack: &mut Vec<(WalkEntry, usize)>,
        prefix: &str,
        tree_oid: &ObjectId,
        depth: usize,
    ) -> Result<()> {
        if depth > MAX_TREE_DEPTH {
            return Err(Error::TreeTooDeep(MAX_TREE_DEPTH));
        }

        let tree = self.database.get_tree(tree_oid)?;

        // reversed so that popping yields the stored order
        for TreeEntry { mode, name, oid } in tree.entries().iter().rev().cloned() {
            let path = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };
            stack.push((WalkEntry { path, mode, oid }, depth));
        }

        Ok(())
    }
}
