//! Error taxonomy shared by the path codec, the tree, and the store.

use thiserror::Error;

/// Errors produced while encoding, decoding, or applying mutations.
///
/// Every variant's `Display` message is used verbatim as the `body` of the
/// `/ctl/err` event an apply-time failure is rewritten into, so the wording
/// here is part of the wire contract between replicas, not just diagnostics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("bad path")]
    BadPath,
    #[error("bad mutation")]
    BadMutation {
        #[source]
        source: Option<std::num::ParseIntError>,
    },
    #[error("revision mismatch")]
    RevMismatch,
    #[error("not a directory")]
    NotDir,
    #[error("is a directory")]
    IsDir,
    #[error("too late")]
    TooLate,
}

/// Convenience result type for fallible pure operations (path codec, tree reads).
pub type StoreResult<T> = Result<T, StoreError>;
