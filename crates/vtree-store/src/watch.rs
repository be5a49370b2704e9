//! The watch registry: live one-shot subscriptions, and the message a
//! `Wait` call sends the loop to register one.

use std::sync::Arc;

use tokio::sync::oneshot;
use vtree_model::{Seqn, StoreError};
use vtree_tree::Event;
use vtree_watch::Matcher;

/// A subscription the loop has accepted but not yet satisfied.
pub(crate) struct LiveWatch {
    pub(crate) matcher: Arc<dyn Matcher>,
    pub(crate) rev: Seqn,
    pub(crate) sink: oneshot::Sender<Event>,
}

impl LiveWatch {
    /// Whether `event` satisfies this watch: in-order and glob-matched.
    pub(crate) fn is_satisfied_by(&self, event: &Event) -> bool {
        event.seqn >= self.rev && self.matcher.matches(&event.path)
    }
}

/// Sent on the watch-registration channel by [`crate::Store::wait`].
///
/// `ack` reports whether registration succeeded (and, deterministically,
/// `Err(StoreError::TooLate)` without ever touching `sink`) synchronously
/// inside the serializer, closing the race the spec calls out between
/// reading `head` and registering. `sink` carries the eventual delivery
/// and is read by the caller only after `ack` resolves `Ok`.
pub(crate) struct WatchRequest {
    pub(crate) matcher: Arc<dyn Matcher>,
    pub(crate) rev: Seqn,
    pub(crate) sink: oneshot::Sender<Event>,
    pub(crate) ack: oneshot::Sender<Result<(), StoreError>>,
}
