//! The immutable node and its copy-on-write `set`.

use std::collections::BTreeMap;
use std::sync::Arc;

use vtree_model::{DIR, Rev};

/// A node in the tree: a file (`children` empty, `rev` positive) or a
/// directory (`rev = DIR`, `value` empty). Never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node {
    pub(crate) value: String,
    pub(crate) rev: Rev,
    pub(crate) children: BTreeMap<String, Arc<Node>>,
}

impl Node {
    pub(crate) fn empty_dir() -> Self {
        Node {
            value: String::new(),
            rev: DIR,
            children: BTreeMap::new(),
        }
    }

    pub(crate) fn is_dir(&self) -> bool {
        self.rev == DIR || !self.children.is_empty()
    }

    /// Recursively writes `value`/`rev` at `parts`, copying each level on
    /// the path and sharing every untouched sibling subtree.
    ///
    /// Returns the new node for this level along with whether this level
    /// should still occupy a slot in its parent: `keep` at the leaf, or
    /// "still has children" one level up — this is what prunes a directory
    /// once its last child is deleted.
    pub(crate) fn set(self: &Arc<Node>, parts: &[&str], value: &str, rev: Rev, keep: bool) -> (Arc<Node>, bool) {
        let Some((head, rest)) = parts.split_first() else {
            let node = Node {
                value: value.to_owned(),
                rev,
                children: self.children.clone(),
            };
            return (Arc::new(node), keep);
        };

        if !self.is_dir() {
            // `self` is a file: there's no directory here for `head` to live
            // under. The only way a write reaches this deep past a file is a
            // delete of a path that was never there (sets are already turned
            // into an IsDir/NotDir error before reaching the tree) — leave
            // the file as-is rather than reinterpreting it as an empty dir.
            return (self.clone(), true);
        }

        let mut children = self.children.clone();
        let child = children
            .get(*head)
            .cloned()
            .unwrap_or_else(|| Arc::new(Node::empty_dir()));
        let (new_child, child_occupies_slot) = child.set(rest, value, rev, keep);
        if child_occupies_slot {
            children.insert((*head).to_owned(), new_child);
        } else {
            children.remove(*head);
        }

        let nonempty = !children.is_empty();
        let node = Node {
            value: String::new(),
            rev: DIR,
            children,
        };
        (Arc::new(node), nonempty)
    }
}
