use log::debug;

use super::node::{Key, Link, NIL};
use super::RBTree;

impl RBTree {
    /// The next node in key order, or `NIL` after the last one.
    fn successor(&self, mut x: Link) -> Link {
        let right = self.nodes[x as usize].right;
        if right != NIL {
            return self.minimum(right)
        }
        let mut parent = self.nodes[x as usize].parent;
        while parent != NIL && x == self.nodes[parent as usize].right {
            x = parent;
            parent = self.nodes[x as usize].parent;
        }
        parent
    }

    /// Calls `f` on every node in key order until it returns `false`.
    pub(super) fn for_each_in_order(&self, mut f: impl FnMut(Link) -> bool) {
        if self.root == NIL { return }
        let mut x = self.minimum(self.root);
        while x != NIL && f(x) {
            x = self.successor(x);
        }
    }

    /// Writes the keys in ascending order into `buf`, returning how many were written.
    ///
    /// If `buf` is shorter than the tree, the walk stops once it is full; what was written is
    /// then the first `buf.len()` keys of the full sequence.
    pub fn to_array(&self, buf: &mut [Key]) -> usize {
        let mut written = 0;
        if buf.is_empty() { return 0 }
        self.for_each_in_order(|x| {
            buf[written] = self.nodes[x as usize].key;
            written += 1;
            written < buf.len()
        });
        written
    }

    /// All keys in ascending order.
    pub fn to_vec(&self) -> Vec<Key> {
        let mut keys = Vec::with_capacity(self.len);
        self.for_each_in_order(|x| {
            keys.push(self.nodes[x as usize].key);
            true
        });
        keys
    }

    /// Frees every node, children before their parents, and returns how many there were.
    ///
    /// The arena keeps its memory; every outstanding `NodeId` goes stale.
    pub fn clear(&mut self) -> usize {
        let mut freed = 0;
        let mut x = self.root;
        while x != NIL {
            let node = &self.nodes[x as usize];
            if node.left != NIL {
                x = node.left;
                continue
            }
            if node.right != NIL {
                x = node.right;
                continue
            }

            // `x` is a leaf now: cut it off and go back up
            let parent = node.parent;
            if parent != NIL {
                if self.nodes[parent as usize].left == x {
                    self.nodes[parent as usize].left = NIL;
                } else {
                    self.nodes[parent as usize].right = NIL;
                }
            }
            self.release(x);
            freed += 1;
            x = parent;
        }

        debug_assert_eq!(freed, self.len);
        debug!("Cleared {freed} nodes");
        self.root = NIL;
        self.len = 0;
        freed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(keys: impl IntoIterator<Item = Key>) -> RBTree {
        let mut tree = RBTree::new();
        for k in keys {
            tree.insert(k).unwrap();
        }
        tree
    }

    #[test]
    fn to_array_with_room_to_spare() {
        let tree = tree_of([9, -2, 4, 4, 0]);
        let mut buf = [i64::MAX; 8];

        assert_eq!(tree.to_array(&mut buf), 5);
        assert_eq!(buf[..5], [-2, 0, 4, 4, 9]);
        assert!(buf[5..].iter().all(|&k| k == i64::MAX));
    }

    #[test]
    fn to_array_truncates_to_a_prefix() {
        let keys: Vec<Key> = (0..50).map(|k| (k * 37) % 50).collect();
        let tree = tree_of(keys.iter().copied());
        let sorted = tree.to_vec();

        for cap in [1, 2, 7, 49, 50] {
            let mut buf = vec![0; cap];
            assert_eq!(tree.to_array(&mut buf), cap);
            assert_eq!(buf, sorted[..cap]);
        }
        assert_eq!(tree.to_array(&mut []), 0);
    }

    #[test]
    fn to_array_on_empty_tree() {
        let tree = RBTree::new();
        let mut buf = [1, 2, 3];
        assert_eq!(tree.to_array(&mut buf), 0);
        assert_eq!(buf, [1, 2, 3]);
        assert!(tree.to_vec().is_empty());
    }

    #[test]
    fn successor_walks_every_node_once() {
        let tree = tree_of([5, 1, 8, 1, 3, 9, 7]);
        let mut seen = vec![];
        tree.for_each_in_order(|x| {
            seen.push(x);
            true
        });
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), tree.len());
    }

    #[test]
    fn clear_frees_everything() {
        let mut tree = tree_of((0..300).map(|k| k % 17));
        let handles: Vec<_> = [0, 5, 16].map(|k| tree.find(k).unwrap()).into();

        assert_eq!(tree.clear(), 300);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.check_invariants(), Ok(0));
        assert!(tree.nodes.iter().all(|slot| !slot.occupied));
        for n in handles {
            assert_eq!(tree.key(n), None);
        }

        // the tree is usable again, reusing the old slots
        let slots = tree.nodes.len();
        for k in [3, 1, 2] {
            tree.insert(k).unwrap();
        }
        assert_eq!(tree.nodes.len(), slots);
        assert_eq!(tree.to_vec(), [1, 2, 3]);
        assert_eq!(tree.clear(), 3);
        assert_eq!(tree.clear(), 0);
    }
}
