use std::fmt;

use super::node::{Key, Link, NIL};
use super::RBTree;

/// The first broken red-black property [`RBTree::check_invariants`] ran into.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The sentinel changed color or kept a link to a real node.
    SentinelDisturbed,
    RedRoot,
    /// A red node has a red child.
    RedRed { key: Key },
    /// The black heights of the two subtrees of a node differ.
    BlackHeightMismatch { key: Key, left: usize, right: usize },
    /// The in-order sequence went down from `prev` to `key`.
    OutOfOrder { prev: Key, key: Key },
    /// A node's parent link doesn't point at the node it hangs under.
    BadParentLink { key: Key },
    /// A freed slot is still linked into the tree.
    FreedNodeReachable,
    /// `len()` doesn't match the amount of reachable nodes.
    LengthMismatch { len: usize, reachable: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SentinelDisturbed => f.write_str("sentinel node was modified"),
            Self::RedRoot => f.write_str("root is red"),
            Self::RedRed { key } => write!(f, "red node {key} has a red child"),
            Self::BlackHeightMismatch { key, left, right } => {
                write!(f, "black heights under {key} differ ({left} on the left, {right} on the right)")
            }
            Self::OutOfOrder { prev, key } => write!(f, "key {key} comes after {prev}"),
            Self::BadParentLink { key } => write!(f, "node {key} has a wrong parent link"),
            Self::FreedNodeReachable => f.write_str("a freed node is still linked into the tree"),
            Self::LengthMismatch { len, reachable } => write!(f, "len is {len}, but {reachable} nodes are reachable"),
        }
    }
}

impl std::error::Error for InvariantViolation {}

impl RBTree {
    /// Checks every red-black property and returns the tree's black height.
    ///
    /// The black height counts the black nodes on any path from the root down to (but not including)
    /// the sentinel. This walks the whole tree, and is meant for tests and debugging, nothing calls it
    /// on its own.
    pub fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        let nil = &self.nodes[NIL as usize];
        if !nil.is_black() || nil.left != NIL || nil.right != NIL || nil.parent != NIL {
            return Err(InvariantViolation::SentinelDisturbed)
        }
        if self.root == NIL {
            return match self.len {
                0 => Ok(0),
                len => Err(InvariantViolation::LengthMismatch { len, reachable: 0 }),
            }
        }

        let root = &self.nodes[self.root as usize];
        if root.is_red() {
            return Err(InvariantViolation::RedRoot)
        }
        if root.parent != NIL {
            return Err(InvariantViolation::BadParentLink { key: root.key })
        }

        let mut prev = None;
        let mut reachable = 0;
        let black_height = self.check_subtree(self.root, &mut prev, &mut reachable)?;
        if reachable != self.len {
            return Err(InvariantViolation::LengthMismatch { len: self.len, reachable })
        }
        Ok(black_height)
    }

    fn check_subtree(&self, x: Link, prev: &mut Option<Key>, reachable: &mut usize) -> Result<usize, InvariantViolation> {
        if x == NIL { return Ok(0) }
        let node = &self.nodes[x as usize];
        if !node.occupied {
            return Err(InvariantViolation::FreedNodeReachable)
        }

        for child in [node.left, node.right] {
            if child == NIL { continue }
            let child = &self.nodes[child as usize];
            if child.parent != x {
                return Err(InvariantViolation::BadParentLink { key: child.key })
            }
            if node.is_red() && child.is_red() {
                return Err(InvariantViolation::RedRed { key: node.key })
            }
        }

        let left = self.check_subtree(node.left, prev, reachable)?;

        if let Some(prev) = *prev {
            if node.key < prev {
                return Err(InvariantViolation::OutOfOrder { prev, key: node.key })
            }
        }
        *prev = Some(node.key);
        *reachable += 1;

        let right = self.check_subtree(node.right, prev, reachable)?;

        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch { key: node.key, left, right })
        }
        Ok(left + node.is_black() as usize)
    }

    /// The amount of nodes on the longest path from the root to a leaf (`0` for an empty tree).
    ///
    /// A node with black height `bh` has at least `2^bh - 1` nodes below it, and no red node has a red
    /// child, so for `n` nodes this is never more than `2*log₂(n+1)`.
    pub fn height(&self) -> usize {
        fn height_of(tree: &RBTree, x: Link) -> usize {
            if x == NIL { return 0 }
            let node = &tree.nodes[x as usize];
            1 + height_of(tree, node.left).max(height_of(tree, node.right))
        }
        height_of(self, self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbtree::Color;

    fn tree_of(keys: impl IntoIterator<Item = Key>) -> RBTree {
        let mut tree = RBTree::new();
        for k in keys {
            tree.insert(k).unwrap();
        }
        tree
    }

    #[test]
    fn height_bound() {
        for n in [1_usize, 2, 3, 10, 100, 1023, 1024, 5000] {
            let tree = tree_of(0..n as Key);
            let bound = 2.0 * ((n + 1) as f64).log2();
            assert!(tree.height() as f64 <= bound, "n = {n}: height {}", tree.height());
        }
        assert_eq!(RBTree::new().height(), 0);
    }

    #[test]
    fn detects_red_root() {
        let mut tree = tree_of([1]);
        let root = tree.root;
        tree.nodes[root as usize].color = Color::Red;
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::RedRoot));
    }

    #[test]
    fn detects_red_red() {
        let mut tree = tree_of([2, 1, 3, 4]);
        let three = tree.find(3).unwrap().index;
        tree.nodes[three as usize].color = Color::Red;
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::RedRed { key: 3 }));
    }

    #[test]
    fn detects_black_height_mismatch() {
        let mut tree = tree_of([2, 1, 3]);
        let one = tree.find(1).unwrap().index;
        tree.nodes[one as usize].color = Color::Black;
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::BlackHeightMismatch { key: 2, left: 1, right: 0 }),
        );
    }

    #[test]
    fn detects_out_of_order_keys() {
        let mut tree = tree_of([2, 1, 3]);
        let one = tree.find(1).unwrap().index;
        tree.nodes[one as usize].key = 5;
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::OutOfOrder { prev: 5, key: 2 }));
    }

    #[test]
    fn detects_dirty_sentinel() {
        let mut tree = tree_of([2, 1, 3]);
        tree.nodes[NIL as usize].parent = tree.root;
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::SentinelDisturbed));
    }

    #[test]
    fn violations_have_messages() {
        let msg = InvariantViolation::LengthMismatch { len: 3, reachable: 2 }.to_string();
        assert_eq!(msg, "len is 3, but 2 nodes are reachable");
    }
}
