//! OutView core library — UI-agnostic run-outputs browser logic.
//!
//! `outview-core` maintains a client-side cache of a remote run's output
//! artifacts: a lazily explored directory tree plus the file bodies that
//! have been fetched so far. It is intentionally decoupled from both the
//! transport that fetches listings/files and the frontend that renders
//! them, so any UI can drive the same cache.
//!
//! The transport hands each fetch result to the store as a [`Fact`]; the
//! store merges it into a fresh immutable [`OutputsState`] snapshot and
//! publishes it. Previously handed-out snapshots stay valid, so a renderer
//! mid-walk never observes a half-applied update.
//!
//! # Modules
//!
//! - [`tree`] — The cached remote tree: [`TreeNode`], path lookup, listing merge.
//! - [`store`] — Snapshot state and transitions: [`OutputsState`], [`OutputsStore`].
//! - [`fact`] — Boundary types for incoming fetch results: [`Fact`], [`Listing`].
//! - [`error`] — Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod error;
pub mod fact;
pub mod store;
pub mod tree;

pub use error::{CoreError, CoreResult};
pub use fact::{Fact, Listing};
pub use store::{OutputsState, OutputsStore};
pub use tree::TreeNode;
