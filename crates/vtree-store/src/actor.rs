//! The serializer: the single task that owns every piece of mutable store
//! state and the `tokio::select!` loop that multiplexes its six input
//! streams, per the apply-loop design in the spec this crate implements.

use std::collections::BTreeMap;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, trace, warn};
use vtree_model::{Op, Seqn, StoreError};
use vtree_tree::{Event, Tree};

use crate::log::EventLog;
use crate::watch::{LiveWatch, WatchRequest};

pub(crate) struct Channels {
    pub(crate) op_rx: mpsc::Receiver<Op>,
    pub(crate) watch_rx: mpsc::Receiver<WatchRequest>,
    pub(crate) clean_rx: mpsc::Receiver<Seqn>,
    pub(crate) version_rx: mpsc::Receiver<oneshot::Sender<Seqn>>,
    pub(crate) waiting_rx: mpsc::Receiver<oneshot::Sender<usize>>,
    pub(crate) flush_rx: mpsc::Receiver<oneshot::Sender<Seqn>>,
}

struct State {
    tree: Tree,
    ver: Seqn,
    todo: BTreeMap<Seqn, Op>,
    log: EventLog,
    watches: Vec<LiveWatch>,
}

/// Runs the serializer until the op channel closes. Every other channel
/// closing simply disables that branch of the select; the op channel is
/// the loop's lifetime — consensus deciding there are no more ops is the
/// only clean shutdown signal this layer recognizes.
pub(crate) async fn run(mut channels: Channels, initial_head: Seqn, snapshot_tx: watch::Sender<(Seqn, Tree)>) {
    let mut state = State {
        tree: Tree::empty(),
        ver: 0,
        todo: BTreeMap::new(),
        log: EventLog::new(initial_head),
        watches: Vec::new(),
    };

    loop {
        let ver_before = state.ver;

        tokio::select! {
            maybe_op = channels.op_rx.recv() => {
                match maybe_op {
                    Some(op) => {
                        if op.seqn > state.ver {
                            trace!(seqn = op.seqn, "op queued");
                            state.todo.entry(op.seqn).or_insert(op);
                        } else {
                            trace!(seqn = op.seqn, ver = state.ver, "dropping late or duplicate op");
                        }
                        drain(&mut state, None);
                    }
                    None => break,
                }
            }
            Some(request) = channels.watch_rx.recv() => {
                handle_watch_request(&mut state, request);
            }
            Some(seqn) = channels.clean_rx.recv() => {
                debug!(seqn, "cleaning log");
                state.log.clean(seqn);
            }
            Some(reply) = channels.version_rx.recv() => {
                let _ = reply.send(state.ver);
            }
            Some(reply) = channels.waiting_rx.recv() => {
                let _ = reply.send(state.watches.len());
            }
            Some(reply) = channels.flush_rx.recv() => {
                drain(&mut state, Some(reply));
            }
        };

        if state.ver != ver_before {
            let _ = snapshot_tx.send((state.ver, state.tree.clone()));
        }
    }

    debug!("op channel closed, shutting down serializer");
    // Dropping `state` drops every live watch's `oneshot::Sender`, which
    // closes the corresponding receiver — the cancellation signal `Wait`
    // callers are told to expect.
}

/// Applies every op in `todo` that can be applied in order, starting from
/// `ver + 1`. Under `flush`, gaps are jumped rather than blocked on, and
/// only the final applied event is published — then history is purged.
fn drain(state: &mut State, flush: Option<oneshot::Sender<Seqn>>) {
    let flushing = flush.is_some();
    let mut last_applied: Option<Event> = None;

    loop {
        let Some(&next_seqn) = state.todo.keys().next() else {
            break;
        };

        if flushing && next_seqn > state.ver + 1 {
            debug!(from = state.ver + 1, to = next_seqn - 1, "flush jumping gap");
            state.ver = next_seqn - 1;
        }

        if next_seqn > state.ver + 1 {
            break;
        }

        let op = state.todo.remove(&next_seqn).expect("key just observed");
        if next_seqn < state.ver + 1 {
            trace!(seqn = next_seqn, "discarding duplicate drained from todo");
            continue;
        }

        let (new_tree, event) = state.tree.apply(next_seqn, &op.mutation);
        state.tree = new_tree;
        state.ver = next_seqn;

        if flushing {
            last_applied = Some(event);
        } else {
            publish(state, event);
        }
    }

    if let Some(reply) = flush {
        if let Some(event) = last_applied {
            publish(state, event);
        }
        state.log.purge_to(state.ver + 1);
        let _ = reply.send(state.ver);
    }
}

fn publish(state: &mut State, event: Event) {
    notify_watches(state, &event);
    state.log.insert(event);
}

fn notify_watches(state: &mut State, event: &Event) {
    let mut still_live = Vec::with_capacity(state.watches.len());
    for watch in state.watches.drain(..) {
        if watch.is_satisfied_by(event) {
            trace!(seqn = event.seqn, path = %event.path, "watch fired");
            let _ = watch.sink.send(event.clone());
        } else {
            still_live.push(watch);
        }
    }
    state.watches = still_live;
}

fn handle_watch_request(state: &mut State, request: WatchRequest) {
    let WatchRequest {
        matcher,
        rev,
        sink,
        ack,
    } = request;

    if rev < state.log.head() {
        warn!(rev, head = state.log.head(), "watch registration too late");
        let _ = ack.send(Err(StoreError::TooLate));
        return;
    }

    let mut n = rev.max(state.log.head());
    while n <= state.ver {
        if let Some(event) = state.log.get(n)
            && matcher.matches(&event.path)
        {
            let _ = sink.send(event.clone());
            let _ = ack.send(Ok(()));
            return;
        }
        n += 1;
    }

    state.watches.push(LiveWatch { matcher, rev, sink });
    let _ = ack.send(Ok(()));
}
