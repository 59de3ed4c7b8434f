//! Error types for `outview-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`.

/// Unified error type for all core operations.
///
/// The cache produces exactly one kind of error: a path lookup that fails
/// because an ancestor directory listing was never merged. This is a
/// contract violation by the fetch collaborator (it must only request
/// subtrees of already-listed directories), not a transient condition, so
/// callers should surface it rather than retry.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No node exists at the given path in the cached tree.
    #[error("tree inconsistency: no node at `{0}` (ancestor listing never loaded)")]
    NotFound(String),
}

/// Convenience alias used throughout `outview-core`.
pub type CoreResult<T> = Result<T, CoreError>;
