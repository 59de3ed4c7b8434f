//! Outputs state container and transitions.
//!
//! [`OutputsState`] is the immutable snapshot the renderer reads: the
//! cached tree plus a flat map of fetched file bodies. [`OutputsStore`]
//! is the single authority that applies incoming [`Fact`]s to produce the
//! next snapshot, following the project-wide immutability convention:
//! every transition builds a **new** state and the previous one stays
//! valid for any reader still holding it.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::CoreResult;
use crate::fact::{Fact, Listing};
use crate::tree::TreeNode;

/// An immutable snapshot of the cached outputs.
///
/// Cheap to clone: the tree and the file map are behind [`Arc`], so
/// snapshots share unchanged parts by reference. A file transition reuses
/// the tree handle; a subtree listing reuses the file-map handle. Readers
/// on any thread may hold a snapshot without synchronization.
#[derive(Debug, Clone)]
pub struct OutputsState {
    tree: Arc<TreeNode>,
    files: Arc<HashMap<String, String>>,
}

impl Default for OutputsState {
    /// The initial state: an unloaded empty root and no file content.
    fn default() -> Self {
        Self {
            tree: Arc::new(TreeNode::root()),
            files: Arc::new(HashMap::new()),
        }
    }
}

impl OutputsState {
    /// Creates the initial empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the root of the cached tree.
    ///
    /// Before the first root listing arrives this is an empty root with
    /// `loaded() == false`.
    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    /// Returns the flat map of fetched file bodies, keyed by path.
    pub fn files(&self) -> &HashMap<String, String> {
        &self.files
    }

    /// Returns the fetched content of the file at `path`, if any.
    pub fn file_content(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Returns a new state with `content` recorded for `path`.
    ///
    /// Total: overwrites any prior content at the same path. File content
    /// does not affect tree shape, so the tree is reused by reference.
    pub fn with_file(&self, path: String, content: String) -> Self {
        let mut files = (*self.files).clone();
        files.insert(path, content);
        Self {
            tree: Arc::clone(&self.tree),
            files: Arc::new(files),
        }
    }

    /// Returns a new state with `listing` merged at `path`.
    ///
    /// An empty `path` is a root listing and resets the whole cache: a
    /// brand-new root is populated from the listing and **all** previously
    /// fetched file bodies are dropped, even for unrelated subtrees. A
    /// non-empty `path` deep-copies the current root, populates the target
    /// node inside the copy, and reuses the file map by reference, so
    /// siblings outside the listed directory keep their expanded subtrees.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`](crate::CoreError::NotFound) when
    /// `path`'s ancestor chain was never listed. `self` is untouched in
    /// that case.
    pub fn with_listing(&self, path: &str, listing: &Listing) -> CoreResult<Self> {
        if path.is_empty() {
            let mut root = TreeNode::root();
            root.set_children("", &listing.files, &listing.dirs);
            return Ok(Self {
                tree: Arc::new(root),
                files: Arc::new(HashMap::new()),
            });
        }

        let mut root = (*self.tree).clone();
        root.find_child_mut(path)?
            .set_children(path, &listing.files, &listing.dirs);
        Ok(Self {
            tree: Arc::new(root),
            files: Arc::clone(&self.files),
        })
    }
}

/// The single-writer container for the current [`OutputsState`].
///
/// Designed to be driven from one serialized dispatch queue: transitions
/// are synchronous, run one at a time, and never block. Construct one
/// store per browser instance rather than sharing a global, so tests and
/// multiple views stay isolated.
#[derive(Debug, Default)]
pub struct OutputsStore {
    current: OutputsState,
}

impl OutputsStore {
    /// Creates a store holding the initial empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle to the currently published snapshot.
    pub fn state(&self) -> OutputsState {
        self.current.clone()
    }

    /// Borrows the currently published snapshot.
    pub fn current(&self) -> &OutputsState {
        &self.current
    }

    /// Applies a fact and publishes the resulting snapshot.
    ///
    /// # Errors
    ///
    /// A [`ListingReceived`](Fact::ListingReceived) for a path whose
    /// ancestors were never listed fails with
    /// [`CoreError::NotFound`](crate::CoreError::NotFound); the prior
    /// snapshot stays published and the inconsistency is logged so the
    /// contract violation is visible instead of silently dropped.
    pub fn apply(&mut self, fact: Fact) -> CoreResult<()> {
        let next = match fact {
            Fact::FileReceived { path, content } => self.current.with_file(path, content),
            Fact::ListingReceived { path, listing } => {
                match self.current.with_listing(&path, &listing) {
                    Ok(next) => next,
                    Err(err) => {
                        tracing::warn!("dropping listing for `{}`: {}", path, err);
                        return Err(err);
                    }
                }
            }
        };
        self.current = next;
        Ok(())
    }
}
