//! Facts delivered by the fetch collaborator.
//!
//! The transport layer resolves a remote fetch and hands the result to
//! [`OutputsStore::apply`](crate::store::OutputsStore::apply) as a [`Fact`].
//! Facts flow **transport → store**; the store never creates facts itself.
//! Wire decoding is the transport's concern, but both types derive serde
//! so a decoded response body can be passed through unchanged.

use serde::{Deserialize, Serialize};

/// A directory's immediate contents as returned by the remote source.
///
/// Names are opaque strings; the core performs no validation on them.
/// Either list may be empty (an empty directory is a valid listing).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Plain file names directly under the listed directory.
    #[serde(default)]
    pub files: Vec<String>,
    /// Subdirectory names directly under the listed directory.
    #[serde(default)]
    pub dirs: Vec<String>,
}

impl Listing {
    /// Creates a listing from file and directory name lists.
    pub fn new(files: Vec<String>, dirs: Vec<String>) -> Self {
        Self { files, dirs }
    }
}

/// An external event applied to the store to produce the next snapshot.
///
/// This is the store's entire input surface: exactly two fact kinds,
/// validated into this closed enum at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fact {
    /// The body of the file at `path` was fetched.
    FileReceived {
        /// Slash-delimited path relative to the outputs root.
        path: String,
        /// The fetched file content.
        content: String,
    },
    /// The listing of the directory at `path` was fetched.
    ///
    /// An empty `path` denotes the outputs root.
    ListingReceived {
        /// Slash-delimited path relative to the outputs root; `""` is root.
        path: String,
        /// The directory's immediate contents.
        listing: Listing,
    },
}
