//! `StoreBuilder` — the few knobs this component owns, with sensible
//! defaults, mirroring the builder-with-defaults pattern used throughout
//! the rest of the crate family.

use tokio::sync::{mpsc, watch};
use vtree_model::Seqn;
use vtree_tree::Tree;

use crate::actor::{self, Channels};
use crate::handle::Store;

const DEFAULT_INITIAL_HEAD: Seqn = 1;
const DEFAULT_OP_BUFFER: usize = 1024;
const DEFAULT_WATCH_BUFFER: usize = 64;
const DEFAULT_CONTROL_BUFFER: usize = 16;

/// Configures and spawns a [`Store`]'s serializer task.
#[derive(Debug, Clone)]
pub struct StoreBuilder {
    initial_head: Seqn,
    op_buffer: usize,
    watch_buffer: usize,
    control_buffer: usize,
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self {
            initial_head: DEFAULT_INITIAL_HEAD,
            op_buffer: DEFAULT_OP_BUFFER,
            watch_buffer: DEFAULT_WATCH_BUFFER,
            control_buffer: DEFAULT_CONTROL_BUFFER,
        }
    }
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The smallest `seqn` the log retains at startup. Defaults to `1`.
    pub fn initial_head(mut self, head: Seqn) -> Self {
        self.initial_head = head;
        self
    }

    /// Bound on the op submission channel. Defaults to `1024`.
    pub fn op_buffer(mut self, capacity: usize) -> Self {
        self.op_buffer = capacity;
        self
    }

    /// Bound on the watch-registration channel. Defaults to `64`.
    pub fn watch_buffer(mut self, capacity: usize) -> Self {
        self.watch_buffer = capacity;
        self
    }

    /// Bound shared by the clean/version/waiting-count/flush control
    /// channels. Defaults to `16`.
    pub fn control_buffer(mut self, capacity: usize) -> Self {
        self.control_buffer = capacity;
        self
    }

    /// Spawns the serializer task and returns a cheaply `Clone`-able
    /// handle to it.
    pub fn build(self) -> Store {
        let (op_tx, op_rx) = mpsc::channel(self.op_buffer);
        let (watch_tx, watch_rx) = mpsc::channel(self.watch_buffer);
        let (clean_tx, clean_rx) = mpsc::channel(self.control_buffer);
        let (version_tx, version_rx) = mpsc::channel(self.control_buffer);
        let (waiting_tx, waiting_rx) = mpsc::channel(self.control_buffer);
        let (flush_tx, flush_rx) = mpsc::channel(self.control_buffer);
        let (snapshot_tx, snapshot_rx) = watch::channel((0, Tree::empty()));

        let channels = Channels {
            op_rx,
            watch_rx,
            clean_rx,
            version_rx,
            waiting_rx,
            flush_rx,
        };
        tokio::spawn(actor::run(channels, self.initial_head, snapshot_tx));

        Store::new(op_tx, watch_tx, clean_tx, version_tx, waiting_tx, flush_tx, snapshot_rx)
    }
}
