//! The unit of work a consensus layer hands to the store.

use serde::{Deserialize, Serialize};

use crate::rev::Seqn;

/// A numbered mutation as delivered by the external consensus layer.
///
/// `Op` carries no semantics of its own beyond ordering: `mutation` is an
/// opaque wire string decoded by `vtree-path`, and `seqn` is the position
/// consensus assigned it in the global stream. The apply loop is the only
/// consumer that interprets either field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Op {
    pub seqn: Seqn,
    pub mutation: String,
}

impl Op {
    pub fn new(seqn: Seqn, mutation: impl Into<String>) -> Self {
        Self {
            seqn,
            mutation: mutation.into(),
        }
    }
}
