//! `Store` — the cheaply `Clone`-able client handle to the serializer.
//!
//! Every method that must be serialized against applied ops (`submit`,
//! `version`, `waiting_count`, `clean`, `flush`, `wait`) goes through a
//! channel to the loop. `snap`, `get`, and `stat` are the exception: they
//! read the latest published `(ver, root)` pair off a `watch::Receiver`
//! and never touch the loop, which is the whole point of publishing
//! snapshots instead of routing reads through the serializer.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::instrument;
use vtree_model::{Op, Rev, Seqn};
use vtree_tree::{Event, Getter, Tree};
use vtree_watch::Matcher;

use crate::watch::WatchRequest;

/// A handle to a running store. Cloning shares the same underlying
/// serializer task; it does not spawn a new one.
#[derive(Clone)]
pub struct Store {
    op_tx: mpsc::Sender<Op>,
    watch_tx: mpsc::Sender<WatchRequest>,
    clean_tx: mpsc::Sender<Seqn>,
    version_tx: mpsc::Sender<oneshot::Sender<Seqn>>,
    waiting_tx: mpsc::Sender<oneshot::Sender<usize>>,
    flush_tx: mpsc::Sender<oneshot::Sender<Seqn>>,
    snapshot_rx: watch::Receiver<(Seqn, Tree)>,
}

const CLOSED: &str = "store's serializer task has shut down";

impl Store {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        op_tx: mpsc::Sender<Op>,
        watch_tx: mpsc::Sender<WatchRequest>,
        clean_tx: mpsc::Sender<Seqn>,
        version_tx: mpsc::Sender<oneshot::Sender<Seqn>>,
        waiting_tx: mpsc::Sender<oneshot::Sender<usize>>,
        flush_tx: mpsc::Sender<oneshot::Sender<Seqn>>,
        snapshot_rx: watch::Receiver<(Seqn, Tree)>,
    ) -> Self {
        Self {
            op_tx,
            watch_tx,
            clean_tx,
            version_tx,
            waiting_tx,
            flush_tx,
            snapshot_rx,
        }
    }

    /// Submits a numbered mutation. Resolves once the loop has accepted
    /// it onto its input channel — not once it has been applied; ops with
    /// a gap ahead of them sit in `todo` until the gap closes.
    #[instrument(skip(self, op), fields(seqn = op.seqn))]
    pub async fn submit(&self, op: Op) -> Result<()> {
        self.op_tx.send(op).await.context(CLOSED)
    }

    /// The highest applied `seqn`.
    pub async fn version(&self) -> Result<Seqn> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.version_tx.send(reply_tx).await.context(CLOSED)?;
        reply_rx.await.context(CLOSED)
    }

    /// The number of watches still waiting for a match.
    pub async fn waiting_count(&self) -> Result<usize> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.waiting_tx.send(reply_tx).await.context(CLOSED)?;
        reply_rx.await.context(CLOSED)
    }

    /// Reclaims log entries up to and including `seqn`, advancing `head`.
    #[instrument(skip(self))]
    pub async fn clean(&self, seqn: Seqn) -> Result<()> {
        self.clean_tx.send(seqn).await.context(CLOSED)
    }

    /// Collapses every currently-queued op into a single terminal state,
    /// advancing `ver` over any gaps, and returns the resulting version.
    #[instrument(skip(self))]
    pub async fn flush(&self) -> Result<Seqn> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.flush_tx.send(reply_tx).await.context(CLOSED)?;
        reply_rx.await.context(CLOSED)
    }

    /// Reads the latest published `(ver, root)` pair without contending
    /// with the serializer.
    pub fn snap(&self) -> (Seqn, Tree) {
        self.snapshot_rx.borrow().clone()
    }

    pub fn get(&self, path: &str) -> (Vec<String>, Rev) {
        self.snap().1.get(path)
    }

    pub fn stat(&self, path: &str) -> (i32, Rev) {
        self.snap().1.stat(path)
    }

    /// Registers a one-shot watch for the first event with `seqn >= rev`
    /// whose path matches `matcher`, resolving with it; resolves with
    /// `Err` immediately if `rev` has already fallen out of the log
    /// (`StoreError::TooLate`, downcastable from the returned error).
    #[instrument(skip(self, matcher))]
    pub async fn wait(&self, matcher: Arc<dyn Matcher>, rev: Seqn) -> Result<Event> {
        let (sink_tx, sink_rx) = oneshot::channel();
        let (ack_tx, ack_rx) = oneshot::channel();
        self.watch_tx
            .send(WatchRequest {
                matcher,
                rev,
                sink: sink_tx,
                ack: ack_tx,
            })
            .await
            .context(CLOSED)?;
        ack_rx.await.context(CLOSED)??;
        sink_rx.await.context("watch cancelled: store shut down before it fired")
    }
}
