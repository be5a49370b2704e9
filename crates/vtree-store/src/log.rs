//! Bounded mapping from sequence number to the event produced at that
//! position. Trimmed by `Clean` and by `Flush`'s history-purging step.

use std::collections::BTreeMap;

use vtree_model::Seqn;
use vtree_tree::Event;

pub(crate) struct EventLog {
    head: Seqn,
    entries: BTreeMap<Seqn, Event>,
}

impl EventLog {
    pub(crate) fn new(head: Seqn) -> Self {
        Self {
            head,
            entries: BTreeMap::new(),
        }
    }

    pub(crate) fn head(&self) -> Seqn {
        self.head
    }

    pub(crate) fn get(&self, seqn: Seqn) -> Option<&Event> {
        self.entries.get(&seqn)
    }

    pub(crate) fn insert(&mut self, event: Event) {
        self.entries.insert(event.seqn, event);
    }

    /// Drops `log[head..=seqn]` and advances `head` to `seqn + 1`.
    pub(crate) fn clean(&mut self, seqn: Seqn) {
        self.purge_to(self.head.max(seqn + 1));
    }

    /// Forgets everything below `new_head`, used by flush to purge all
    /// history up to the freshly-advanced version.
    pub(crate) fn purge_to(&mut self, new_head: Seqn) {
        self.head = new_head;
        self.entries.retain(|seqn, _| *seqn >= self.head);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(seqn: Seqn) -> Event {
        Event {
            seqn,
            rev: seqn,
            path: "/x".to_owned(),
            body: String::new(),
            mutation: String::new(),
            err: None,
            getter: vtree_tree::Tree::empty(),
        }
    }

    #[test]
    fn clean_drops_everything_at_or_below_seqn() {
        let mut log = EventLog::new(1);
        for seqn in 1..=5 {
            log.insert(event(seqn));
        }
        log.clean(3);
        assert_eq!(log.head(), 4);
        assert!(log.get(3).is_none());
        assert!(log.get(4).is_some());
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn clean_never_moves_head_backwards() {
        let mut log = EventLog::new(1);
        log.clean(5);
        assert_eq!(log.head(), 6);
        log.clean(1);
        assert_eq!(log.head(), 6);
    }
}
