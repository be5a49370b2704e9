//! # vtree-store — the serial apply loop
//!
//! This crate is the actor that ties the rest of the `vtree-*` family
//! together: it owns a [`vtree_tree::Tree`], ingests a possibly
//! out-of-order, possibly duplicated, possibly gapped stream of numbered
//! [`vtree_model::Op`]s, advances a monotonic version, and publishes the
//! resulting [`vtree_tree::Event`]s to a bounded log and to one-shot
//! path-glob watchers.
//!
//! Construct a store with [`StoreBuilder`]; everything else is a method
//! on the resulting [`Store`] handle.
//!
//! ## Module overview
//!
//! - [`config`] — [`StoreBuilder`], the configuration surface.
//! - [`handle`] — [`Store`], the public client API.
//! - [`actor`] (private) — the serializer task.
//! - [`log`] (private) — the bounded sequence-number-to-event log.
//! - [`watch`] (private) — the live watch set and registration protocol.

mod actor;
mod config;
mod handle;
mod log;
mod watch;

pub use config::StoreBuilder;
pub use handle::Store;

pub use vtree_model::{CLOBBER, DIR, ERR_PATH, MISSING, NOP, NOP_MUT, Op, Rev, Seqn, StoreError};
pub use vtree_tree::{Event, Getter, Tree};
pub use vtree_watch::{Any, Exact, Matcher, Prefix};
