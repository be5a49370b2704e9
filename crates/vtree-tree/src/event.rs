//! The result of applying one numbered mutation.

use vtree_model::{Rev, Seqn, StoreError};

use crate::tree::Tree;

/// Produced by [`Tree::apply`](crate::tree::Tree::apply) for every mutation,
/// successful or not. A failing mutation still produces an `Event` — it is
/// simply rewritten to land on `/ctl/err` — so appliers never need to
/// special-case errors when building the log or notifying watchers.
#[derive(Debug, Clone)]
pub struct Event {
    pub seqn: Seqn,
    pub rev: Rev,
    pub path: String,
    pub body: String,
    pub mutation: String,
    pub err: Option<StoreError>,
    pub getter: Tree,
}

impl Event {
    pub fn is_err(&self) -> bool {
        self.err.is_some()
    }
}
