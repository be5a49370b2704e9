//! The public, immutable, persistent tree and its pure `apply`.

use std::sync::Arc;

use tracing::trace;
use vtree_model::{CLOBBER, DIR, ERR_PATH, MISSING, NOP, Rev, Seqn, StoreError};
use vtree_path::{check_path, decode, is_nop, join, split};

use crate::event::Event;
use crate::node::Node;

/// Read access to a tree: file values, directory listings, and the
/// `(size, rev)` pair `Stat` reports. Implemented by [`Tree`]; spelled out
/// as a trait because an `Event`'s `getter` is conceptually "whatever tree
/// resulted from this mutation", independent of how that tree is reached.
pub trait Getter {
    /// Reads `path`. Invalid or missing paths both report `([""], Missing)`.
    /// A directory reports its (unordered) child names and `Dir`.
    fn get(&self, path: &str) -> (Vec<String>, Rev);

    /// Reads the size of `path`: byte length for a file, child count for a
    /// directory, `(0, Missing)` if absent or invalid.
    fn stat(&self, path: &str) -> (i32, Rev);
}

/// A cheaply-cloneable handle to an immutable tree snapshot.
///
/// Cloning a `Tree` is an `Arc` refcount bump, not a copy of the data: two
/// `Tree`s produced by successive `apply` calls share every subtree neither
/// mutation touched.
#[derive(Debug, Clone)]
pub struct Tree(pub(crate) Arc<Node>);

impl Default for Tree {
    fn default() -> Self {
        Tree::empty()
    }
}

impl Tree {
    /// The empty tree: just the root directory, no children.
    pub fn empty() -> Self {
        Tree(Arc::new(Node::empty_dir()))
    }

    fn resolve(&self, parts: &[&str]) -> Option<Arc<Node>> {
        let mut node = self.0.clone();
        for part in parts {
            node = node.children.get(*part)?.clone();
        }
        Some(node)
    }

    /// Returns `true` if `a` and `b` are the same tree instance — used to
    /// assert structural sharing in tests, not part of the store's logic.
    pub fn ptr_eq(a: &Tree, b: &Tree) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    fn check_ancestors(&self, path: &str) -> Option<StoreError> {
        let parts = split(path);
        for depth in 1..parts.len() {
            let ancestor = join(&parts[..depth]);
            let (_, rev) = self.get(&ancestor);
            if rev != MISSING && rev != DIR {
                return Some(StoreError::NotDir);
            }
        }
        None
    }

    /// Applies mutation `mutation`, stamped with sequence number `seqn`,
    /// producing the resulting tree and the event it generated.
    ///
    /// Total and deterministic: every mutation, well-formed or not,
    /// produces a tree and an event. A failing mutation is rewritten onto
    /// `/ctl/err` rather than rejected, so `apply` never returns an error
    /// to its caller — see the apply loop for how `ver` still advances.
    pub fn apply(&self, seqn: Seqn, mutation: &str) -> (Tree, Event) {
        if is_nop(mutation) {
            trace!(seqn, "applying nop");
            let event = Event {
                seqn,
                rev: NOP,
                path: "/".to_owned(),
                body: String::new(),
                mutation: mutation.to_owned(),
                err: None,
                getter: self.clone(),
            };
            return (self.clone(), event);
        }

        let mut rev_stamp: Rev = seqn;
        let mut err: Option<StoreError> = None;
        let mut path = String::new();
        let mut body = String::new();
        let mut keep = true;

        match decode(mutation) {
            Ok(decoded) => {
                path = decoded.path;
                body = decoded.body;
                keep = decoded.keep;

                if keep {
                    err = self.check_ancestors(&path);
                }
                if err.is_none() {
                    let (_, cur_rev) = self.get(&path);
                    if decoded.rev != CLOBBER && decoded.rev < cur_rev {
                        err = Some(StoreError::RevMismatch);
                    } else if cur_rev == DIR {
                        err = Some(StoreError::IsDir);
                    }
                }
            }
            Err(decode_err) => err = Some(decode_err),
        }

        if let Some(e) = &err {
            path = ERR_PATH.to_owned();
            body = e.to_string();
            keep = true;
        } else if !keep {
            rev_stamp = MISSING;
        }

        let parts = split(&path);
        let (new_root, _) = self.0.set(&parts, &body, rev_stamp, keep);
        let new_tree = Tree(new_root);

        if let Some(e) = &err {
            trace!(seqn, %path, error = %e, "apply failed, rewritten to /ctl/err");
        } else {
            trace!(seqn, %path, rev = rev_stamp, "applied");
        }

        let event = Event {
            seqn,
            rev: rev_stamp,
            path,
            body,
            mutation: mutation.to_owned(),
            err,
            getter: new_tree.clone(),
        };
        (new_tree, event)
    }
}

impl Getter for Tree {
    fn get(&self, path: &str) -> (Vec<String>, Rev) {
        if check_path(path).is_err() {
            return (vec![String::new()], MISSING);
        }
        let parts = split(path);
        match self.resolve(&parts) {
            None => (vec![String::new()], MISSING),
            Some(node) if node.is_dir() => (node.children.keys().cloned().collect(), DIR),
            Some(node) => (vec![node.value.clone()], node.rev),
        }
    }

    fn stat(&self, path: &str) -> (i32, Rev) {
        if check_path(path).is_err() {
            return (0, MISSING);
        }
        let parts = split(path);
        match self.resolve(&parts) {
            None => (0, MISSING),
            Some(node) if node.is_dir() => (node.children.len() as i32, DIR),
            Some(node) => (node.value.len() as i32, node.rev),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_1_set_on_empty_tree() {
        let tree = Tree::empty();
        let (tree, event) = tree.apply(1, "1:/x=hi");
        assert!(!event.is_err());
        assert_eq!(tree.get("/x"), (vec!["hi".to_owned()], 1));
        assert_eq!(tree.get("/"), (vec!["x".to_owned()], DIR));
        assert_eq!(tree.stat("/x"), (2, 1));
    }

    #[test]
    fn scenario_2_set_with_satisfied_precondition() {
        let tree = Tree::empty();
        let (tree, _) = tree.apply(1, "1:/x=hi");
        let (tree, event) = tree.apply(2, "1:/x=bye");
        assert!(!event.is_err());
        assert_eq!(tree.get("/x"), (vec!["bye".to_owned()], 2));
    }

    #[test]
    fn scenario_3_rev_mismatch_lands_on_ctl_err() {
        let tree = Tree::empty();
        let (tree, _) = tree.apply(1, "1:/x=hi");
        let (tree, event) = tree.apply(2, "0:/x=nope");
        assert_eq!(event.err, Some(StoreError::RevMismatch));
        assert_eq!(event.path, "/ctl/err");
        assert_eq!(tree.get("/x"), (vec!["hi".to_owned()], 1));
    }

    #[test]
    fn scenario_4_clobber_delete_collapses_directory() {
        let tree = Tree::empty();
        let (tree, _) = tree.apply(1, "1:/x=hi");
        let (tree, event) = tree.apply(3, "-1:/x");
        assert!(!event.is_err());
        assert_eq!(tree.get("/x"), (vec![String::new()], MISSING));
        assert_eq!(tree.get("/"), (Vec::<String>::new(), DIR));
    }

    #[test]
    fn scenario_5_set_under_directory_then_overwrite_with_file_is_isdir_error() {
        let tree = Tree::empty();
        let (tree, _) = tree.apply(1, "1:/a/b=1");
        let (tree, event) = tree.apply(2, "2:/a=2");
        assert_eq!(event.err, Some(StoreError::IsDir));
        assert_eq!(tree.get("/a/b"), (vec!["1".to_owned()], 1));
    }

    #[test]
    fn set_under_a_file_is_not_dir_error() {
        let tree = Tree::empty();
        let (tree, _) = tree.apply(1, "1:/a=file");
        let (_, event) = tree.apply(2, "1:/a/b=nested");
        assert_eq!(event.err, Some(StoreError::NotDir));
    }

    #[test]
    fn deleting_nonexistent_path_under_a_file_leaves_the_file_untouched() {
        let tree = Tree::empty();
        let (tree, _) = tree.apply(1, "1:/a=hello");
        let (tree, event) = tree.apply(2, "0:/a/b");
        assert!(!event.is_err());
        assert_eq!(event.rev, MISSING);
        assert_eq!(tree.get("/a"), (vec!["hello".to_owned()], 1));
    }

    #[test]
    fn malformed_mutation_still_advances_and_lands_on_ctl_err() {
        let tree = Tree::empty();
        let (tree, event) = tree.apply(1, "not-a-mutation");
        assert!(matches!(event.err, Some(StoreError::BadMutation { source: None })));
        assert_eq!(event.path, "/ctl/err");
        assert_eq!(tree.get("/ctl/err").1, 1);
    }

    #[test]
    fn nop_leaves_tree_unchanged_and_reports_nop_rev() {
        let tree = Tree::empty();
        let (tree, _) = tree.apply(1, "1:/x=hi");
        let before = tree.clone();
        let (after, event) = tree.apply(2, "nop:");
        assert_eq!(event.rev, NOP);
        assert_eq!(event.path, "/");
        assert!(Tree::ptr_eq(&before, &after));
    }

    #[test]
    fn structural_sharing_leaves_untouched_subtree_identical() {
        let tree = Tree::empty();
        let (tree, _) = tree.apply(1, "1:/a/x=1");
        let (tree, _) = tree.apply(2, "1:/b/y=2");
        let a_before = tree.resolve(&["a"]).unwrap();
        let (tree, _) = tree.apply(3, "1:/b/y=3");
        let a_after = tree.resolve(&["a"]).unwrap();
        assert!(Arc::ptr_eq(&a_before, &a_after));
    }

    #[test]
    fn deleting_nonexistent_path_is_a_no_op_at_tree_level() {
        let tree = Tree::empty();
        let (_, event) = tree.apply(1, "-1:/never-existed");
        assert!(!event.is_err());
        assert_eq!(event.rev, MISSING);
    }

    #[test]
    fn invalid_path_reads_report_missing() {
        let tree = Tree::empty();
        assert_eq!(tree.get("no-leading-slash"), (vec![String::new()], MISSING));
        assert_eq!(tree.stat("no-leading-slash"), (0, MISSING));
    }

    #[test]
    fn snap_is_stable_across_subsequent_applies() {
        let tree = Tree::empty();
        let (tree, _) = tree.apply(1, "1:/x=hi");
        let snapshot = tree.clone();
        let (_, _) = tree.apply(2, "1:/x=bye");
        assert_eq!(snapshot.get("/x"), (vec!["hi".to_owned()], 1));
    }

    #[test]
    fn determinism_identical_sequences_produce_identical_trees() {
        let ops: &[(i64, &str)] = &[(1, "1:/a=1"), (2, "1:/b/c=2"), (3, "-1:/a"), (4, "nop:")];
        let run = || {
            let mut tree = Tree::empty();
            for (seqn, mutation) in ops {
                tree = tree.apply(*seqn, mutation).0;
            }
            tree
        };
        let first = run();
        let second = run();
        assert_eq!(first.get("/"), second.get("/"));
        assert_eq!(first.get("/b/c"), second.get("/b/c"));
    }
}
