//! Cached remote output tree.
//!
//! [`TreeNode`] is the recursive, path-keyed representation of a remote
//! run's output artifacts, built lazily by merging directory listings as
//! the user expands the browser. Nodes own their children, so a derived
//! [`Clone`] is a full deep copy; the store relies on this to realize
//! copy-on-write (copy the root, mutate the copy, publish the copy).

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};

/// Joins a child name onto its parent's path.
///
/// The root's path is the empty string, so its direct children carry just
/// their own name with no leading slash.
fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// One filesystem entry in the cached remote tree.
///
/// A node reachable at path `P` always has `path() == P`; this holds after
/// every mutation because [`set_children`](TreeNode::set_children) computes
/// each child's path from the parent's. Directory nodes start with an empty
/// children map and `loaded() == false` until their listing is merged, which
/// lets the renderer distinguish "empty directory" from "never listed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    is_root: bool,
    name: String,
    is_dir: bool,
    path: String,
    children: HashMap<String, TreeNode>,
    loaded: bool,
}

impl TreeNode {
    /// Creates the root node of a tree: empty path, directory, not loaded.
    pub fn root() -> Self {
        Self {
            is_root: true,
            name: String::new(),
            is_dir: true,
            path: String::new(),
            children: HashMap::new(),
            loaded: false,
        }
    }

    /// Creates an unlisted directory node.
    pub fn dir(name: String, path: String) -> Self {
        Self {
            is_root: false,
            name,
            is_dir: true,
            path,
            children: HashMap::new(),
            loaded: false,
        }
    }

    /// Creates a leaf file node. Files have nothing further to list, so
    /// they are born loaded.
    pub fn file(name: String, path: String) -> Self {
        Self {
            is_root: false,
            name,
            is_dir: false,
            path,
            children: HashMap::new(),
            loaded: true,
        }
    }

    /// Returns `true` only for the single root node of a tree.
    pub fn is_root(&self) -> bool {
        self.is_root
    }

    /// Returns the entry's own name component (empty for the root).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for directories.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Returns the full path this node represents (empty for the root).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns `true` once this node's listing has been merged.
    pub fn loaded(&self) -> bool {
        self.loaded
    }

    /// Returns this node's children, keyed by name. Always empty for files
    /// and for directories whose listing was never fetched.
    pub fn children(&self) -> &HashMap<String, TreeNode> {
        &self.children
    }

    /// Looks up the descendant at a slash-delimited relative `path`.
    ///
    /// Splits `path` into segments and descends by exact name match. The
    /// path must be non-empty with no leading or trailing slash, matching
    /// the convention used when the tree was populated.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] when any segment is absent, meaning
    /// an ancestor directory listing was never fetched. This is a pure
    /// lookup; it never triggers a fetch.
    pub fn find_child(&self, path: &str) -> CoreResult<&TreeNode> {
        let mut node = self;
        for segment in path.split('/') {
            node = node
                .children
                .get(segment)
                .ok_or_else(|| CoreError::NotFound(path.to_string()))?;
        }
        Ok(node)
    }

    /// Mutable variant of [`find_child`](TreeNode::find_child), used by the
    /// store to populate a node inside an owned, not-yet-published copy.
    pub fn find_child_mut(&mut self, path: &str) -> CoreResult<&mut TreeNode> {
        let mut node = self;
        for segment in path.split('/') {
            node = node
                .children
                .get_mut(segment)
                .ok_or_else(|| CoreError::NotFound(path.to_string()))?;
        }
        Ok(node)
    }

    /// Replaces this node's children with fresh nodes built from a listing.
    ///
    /// `path` is the absolute path this node represents; each child's path
    /// is computed from it. This is a **replace**, not a merge: re-listing
    /// a directory discards previously tracked children of that directory,
    /// including any expanded subtrees under them. Listings are treated as
    /// authoritative snapshots of a directory's immediate contents.
    ///
    /// When a name appears in both `files` and `dirs`, the directory wins
    /// (last write into the map).
    ///
    /// Caller contract: only invoke on a node inside an owned copy that has
    /// not been published yet. Calling this on a node reachable from the
    /// currently published snapshot would mutate state a reader may hold.
    pub fn set_children(&mut self, path: &str, files: &[String], dirs: &[String]) {
        let mut children = HashMap::with_capacity(files.len() + dirs.len());
        for name in files {
            let child = TreeNode::file(name.clone(), child_path(path, name));
            children.insert(name.clone(), child);
        }
        for name in dirs {
            let child = TreeNode::dir(name.clone(), child_path(path, name));
            children.insert(name.clone(), child);
        }
        self.children = children;
        self.loaded = true;
    }

    /// Returns this node's children ordered for display: directories first,
    /// then files, each group alphabetical by name.
    pub fn sorted_children(&self) -> Vec<&TreeNode> {
        let mut entries: Vec<&TreeNode> = self.children.values().collect();
        entries.sort_by(|a, b| {
            b.is_dir
                .cmp(&a.is_dir)
                .then_with(|| a.name.cmp(&b.name))
        });
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn root_node_shape() {
        let root = TreeNode::root();
        assert!(root.is_root());
        assert!(root.is_dir());
        assert_eq!(root.path(), "");
        assert_eq!(root.name(), "");
        assert!(!root.loaded());
        assert!(root.children().is_empty());
    }

    #[test]
    fn file_node_is_born_loaded() {
        let file = TreeNode::file("a.txt".to_string(), "a.txt".to_string());
        assert!(!file.is_dir());
        assert!(file.loaded());
        assert!(file.children().is_empty());
    }

    #[test]
    fn dir_node_starts_unloaded() {
        let dir = TreeNode::dir("logs".to_string(), "logs".to_string());
        assert!(dir.is_dir());
        assert!(!dir.loaded());
        assert!(!dir.is_root());
    }

    #[test]
    fn set_children_creates_files_and_dirs() {
        let mut root = TreeNode::root();
        root.set_children("", &names(&["a.txt"]), &names(&["logs"]));

        assert_eq!(root.children().len(), 2);
        assert!(!root.children()["a.txt"].is_dir());
        assert!(root.children()["logs"].is_dir());
    }

    #[test]
    fn set_children_marks_loaded() {
        let mut root = TreeNode::root();
        assert!(!root.loaded());
        root.set_children("", &[], &[]);
        assert!(root.loaded());
        assert!(root.children().is_empty());
    }

    #[test]
    fn root_children_have_bare_paths() {
        let mut root = TreeNode::root();
        root.set_children("", &names(&["a.txt"]), &names(&["logs"]));

        assert_eq!(root.children()["a.txt"].path(), "a.txt");
        assert_eq!(root.children()["logs"].path(), "logs");
    }

    #[test]
    fn nested_children_have_joined_paths() {
        let mut dir = TreeNode::dir("logs".to_string(), "logs".to_string());
        dir.set_children("logs", &names(&["run.txt"]), &[]);

        let child = &dir.children()["run.txt"];
        assert_eq!(child.path(), "logs/run.txt");
        assert_eq!(child.name(), "run.txt");
    }

    #[test]
    fn set_children_replaces_previous_contents() {
        let mut root = TreeNode::root();
        root.set_children("", &names(&["old.txt"]), &names(&["gone"]));
        root.set_children("", &names(&["new.txt"]), &[]);

        assert_eq!(root.children().len(), 1);
        assert!(root.children().contains_key("new.txt"));
        assert!(!root.children().contains_key("old.txt"));
        assert!(!root.children().contains_key("gone"));
    }

    #[test]
    fn duplicate_name_across_lists_prefers_dir() {
        let mut root = TreeNode::root();
        root.set_children("", &names(&["both"]), &names(&["both"]));

        assert_eq!(root.children().len(), 1);
        assert!(root.children()["both"].is_dir());
    }

    #[test]
    fn find_child_single_segment() {
        let mut root = TreeNode::root();
        root.set_children("", &names(&["a.txt"]), &[]);

        let node = root.find_child("a.txt").unwrap();
        assert_eq!(node.path(), "a.txt");
    }

    #[test]
    fn find_child_descends_nested_path() {
        let mut root = TreeNode::root();
        root.set_children("", &[], &names(&["a"]));
        root.find_child_mut("a")
            .unwrap()
            .set_children("a", &[], &names(&["b"]));
        root.find_child_mut("a/b")
            .unwrap()
            .set_children("a/b", &names(&["deep.txt"]), &[]);

        let node = root.find_child("a/b/deep.txt").unwrap();
        assert_eq!(node.path(), "a/b/deep.txt");
        assert!(!node.is_dir());
    }

    #[test]
    fn find_child_missing_segment_is_not_found() {
        let mut root = TreeNode::root();
        root.set_children("", &[], &names(&["a"]));

        let err = root.find_child("a/missing").unwrap_err();
        assert!(matches!(err, CoreError::NotFound(path) if path == "a/missing"));
    }

    #[test]
    fn find_child_unlisted_ancestor_is_not_found() {
        let root = TreeNode::root();
        assert!(root.find_child("missing/dir").is_err());
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let mut root = TreeNode::root();
        root.set_children("", &[], &names(&["a"]));

        let mut copy = root.clone();
        copy.find_child_mut("a")
            .unwrap()
            .set_children("a", &names(&["f1"]), &[]);

        // The original's subtree is untouched by mutating the copy.
        assert!(root.find_child("a").unwrap().children().is_empty());
        assert_eq!(copy.find_child("a").unwrap().children().len(), 1);
    }

    #[test]
    fn sorted_children_dirs_first_then_alphabetical() {
        let mut root = TreeNode::root();
        root.set_children(
            "",
            &names(&["zeta.txt", "alpha.txt"]),
            &names(&["outputs", "data"]),
        );

        let order: Vec<&str> = root.sorted_children().iter().map(|n| n.name()).collect();
        assert_eq!(order, vec!["data", "outputs", "alpha.txt", "zeta.txt"]);
    }
}
