//! The closed error taxonomy for every fallible tree operation.

use thiserror::Error;

/// Errors returned by [`crate::tree::AdaptiveRadixTree`] operations.
///
/// This mirrors the six-variant `art_error_id` taxonomy of the container
/// this crate is modeled on: every fallible entry point returns one of
/// these, never an ad-hoc string or a bare `Option`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The container holds no entries, but the requested operation needs at
    /// least one (e.g. `complete` on an empty tree).
    #[error("container is empty")]
    Empty,

    /// `insert_new` was called with a key that already maps to a value.
    #[error("key already exists")]
    Exists,

    /// The key was rejected during normalization — currently only raised
    /// for an empty key, text or binary.
    #[error("key is invalid")]
    InvalidKey,

    /// A lookup, removal, or prefix operation found no matching entry.
    #[error("key or prefix not found")]
    NotFound,

    /// A `fold`/`find` visitor signalled failure (`ControlFlow::Break` with
    /// an error outcome).
    #[error("callback returned an error")]
    Callback,

    /// Reserved for allocation failure. Unreachable in practice: Rust's
    /// global allocator aborts the process on OOM rather than returning a
    /// recoverable error. Kept in the enum so the taxonomy stays a complete
    /// mirror of the container this models.
    #[error("allocation failure")]
    Oom,
}

pub type Result<T> = std::result::Result<T, Error>;
