//! # vtree-model — canonical types for the versioned tree store
//!
//! This crate defines the shared, dependency-light vocabulary the rest of
//! the `vtree-*` family builds on: revision/sequence sentinels, the error
//! taxonomy produced by the path codec and the apply loop, and the `Op`
//! type that represents one numbered mutation arriving from consensus.
//!
//! It intentionally carries no `tokio` dependency — it is pure data and pure
//! errors, shared by both the synchronous tree and the asynchronous store.
//!
//! ## Module overview
//!
//! - [`rev`] — `Rev`/`Seqn` aliases and the reserved sentinel constants.
//! - [`error`] — [`StoreError`] and [`StoreResult`].
//! - [`op`] — [`Op`], the numbered mutation.

pub mod error;
pub mod op;
pub mod rev;

pub use error::{StoreError, StoreResult};
pub use op::Op;
pub use rev::{CLOBBER, DIR, ERR_PATH, MISSING, NOP, NOP_MUT, Rev, Seqn};
