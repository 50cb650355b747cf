use crate::areas::database::Database;
use crate::artifacts::errors::{Error, Result};
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::tree::MAX_TREE_DEPTH;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
enum TreeNode {
    File(ObjectId),
    Directory(BTreeMap<String, TreeNode>),
}

/// Nested view of index paths: files are leaves holding blob ids, every
/// intermediate path component is a directory.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    root: BTreeMap<String, TreeNode>,
}

impl TreeBuilder {
    pub fn build<'e>(entries: impl IntoIterator<Item = (&'e String, &'e ObjectId)>) -> Result<Self> {
        let mut builder = Self::default();

        for (path, oid) in entries {
            builder.insert(path, oid.clone())?;
        }

        Ok(builder)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Add a file. When a path is both a file and a directory, the directory wins.
    fn insert(&mut self, path: &str, oid: ObjectId) -> Result<()> {
        let components = path.split('/').collect::<Vec<_>>();

        if components.len() > MAX_TREE_DEPTH {
            return Err(Error::TreeTooDeep(MAX_TREE_DEPTH));
        }
        if components
            .iter()
            .any(|component| component.is_empty() || *component == "." || *component == "..")
        {
            return Err(Error::invalid_path(path, "not a normalized repository path"));
        }

        let Some((file_name, parents)) = components.split_last() else {
            return Err(Error::invalid_path(path, "empty path"));
        };

        let mut level = &mut self.root;
        for parent in parents {
            let node = level
                .entry(parent.to_string())
                .or_insert_with(|| TreeNode::Directory(BTreeMap::new()));
            if let TreeNode::File(_) = node {
                *node = TreeNode::Directory(BTreeMap::new());
            }

            let TreeNode::Directory(children) = node else {
                return Err(Error::invalid_path(path, "parent is not a directory"));
            };
            level = children;
        }

        match level.get(*file_name) {
            Some(TreeNode::Directory(_)) => {
                tracing::warn!(path, "path is also a directory, keeping the directory");
            }
            _ => {
                level.insert(file_name.to_string(), TreeNode::File(oid));
            }
        }

        Ok(())
    }

    /// Store every tree bottom-up and return the root tree's id. With no
    /// entries this stores and returns the empty tree.
    pub fn write(&self, database: &Database) -> Result<ObjectId> {
        Self::write_level(&self.root, database)
    }

    fn write_level(level: &BTreeMap<String, TreeNode>, database: &Database) -> Result<ObjectId> {
        let mut tree = Tree::default();

        for (name, node) in level {
            match node {
                TreeNode::File(oid) => tree.add_entry(EntryMode::File, name, oid.clone()),
                TreeNode::Directory(children) => {
                    let subtree_oid = Self::write_level(children, database)?;
                    tree.add_entry(EntryMode::Directory, name, subtree_oid);
                }
            }
        }

        database.put(&Object::Tree(tree))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn database() -> (assert_fs::TempDir, Database) {
        let dir = assert_fs::TempDir::new().unwrap();
        let database = Database::new(dir.path().join("objects").into_boxed_path());
        (dir, database)
    }

    fn entries(paths: &[&str]) -> BTreeMap<String, ObjectId> {
        paths
            .iter()
            .map(|path| (path.to_string(), ObjectId::digest(path.as_bytes())))
            .collect()
    }

    #[rstest]
    fn empty_index_writes_the_empty_tree(database: (assert_fs::TempDir, Database)) {
        let (_dir, database) = database;

        let root = TreeBuilder::build(&BTreeMap::<String, ObjectId>::new())
            .unwrap()
            .write(&database)
            .unwrap();

        pretty_assertions::assert_eq!(root.as_ref(), "4b825dc642cb6eb9a060e54bf8d69288fbee4904");
        assert!(database.contains(&root));
    }

    #[rstest]
    fn nested_paths_become_subtrees(database: (assert_fs::TempDir, Database)) {
        let (_dir, database) = database;
        let index = entries(&["1.txt", "a/2.txt", "a/b/3.txt"]);

        let root_oid = TreeBuilder::build(&index).unwrap().write(&database).unwrap();

        let root = database.get_tree(&root_oid).unwrap();
        let root_entries = root
            .entries()
            .iter()
            .map(|entry| (entry.mode, entry.name.as_str()))
            .collect::<Vec<_>>();
        pretty_assertions::assert_eq!(
            root_entries,
            vec![(EntryMode::File, "1.txt"), (EntryMode::Directory, "a")]
        );

        let a = database.get_tree(&root.entries()[1].oid).unwrap();
        pretty_assertions::assert_eq!(a.entries().len(), 2);
        pretty_assertions::assert_eq!(a.entries()[0].oid, index["a/2.txt"]);

        let b = database.get_tree(&a.entries()[1].oid).unwrap();
        pretty_assertions::assert_eq!(b.entries()[0].name, "3.txt");
    }

    #[rstest]
    fn same_paths_give_same_root(database: (assert_fs::TempDir, Database)) {
        let (_dir, database) = database;

        let first = TreeBuilder::build(&entries(&["x/y", "x/z", "w"])).unwrap();
        let second = TreeBuilder::build(&entries(&["w", "x/z", "x/y"])).unwrap();

        pretty_assertions::assert_eq!(
            first.write(&database).unwrap(),
            second.write(&database).unwrap()
        );
    }

    #[test]
    fn directory_wins_over_file_with_the_same_name() {
        let builder = TreeBuilder::build(&entries(&["a", "a/b"])).unwrap();

        assert!(matches!(builder.root.get("a"), Some(TreeNode::Directory(_))));
    }

    #[test]
    fn too_deep_paths_are_rejected() {
        let deep = vec!["d"; MAX_TREE_DEPTH + 1].join("/");

        assert!(matches!(
            TreeBuilder::build(&entries(&[deep.as_str()])),
            Err(Error::TreeTooDeep(_))
        ));
    }

    #[rstest]
    #[case("a//b")]
    #[case("../a")]
    #[case("")]
    fn unnormalized_paths_are_rejected(#[case] path: &str) {
        assert!(matches!(
            TreeBuilder::build(&entries(&[path])),
            Err(Error::InvalidPath { .. })
        ));
    }
}
