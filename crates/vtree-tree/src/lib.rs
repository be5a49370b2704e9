//! # vtree-tree — the immutable, path-addressed, structurally-shared tree
//!
//! Everything here is synchronous and pure: [`Tree::apply`] is a total
//! function from `(seqn, mutation)` to `(newTree, Event)`, and [`Tree::get`]
//! / [`Tree::stat`] never touch the apply loop. This is deliberate — the
//! tree is the one piece of store state readers are allowed to see without
//! synchronizing with the serializer in `vtree-store`.
//!
//! ## Module overview
//!
//! - [`node`] — the private, `Arc`-based, copy-on-write node.
//! - [`tree`] — [`Tree`], [`Getter`], and `apply`.
//! - [`event`] — [`Event`], the record `apply` produces for every mutation.

mod node;

pub mod event;
pub mod tree;

pub use event::Event;
pub use tree::{Getter, Tree};
