use log::trace;

use super::node::{Color, Key, Link, NIL, NodeId};
use super::rotate::Side;
use super::RBTree;
use crate::error::RBTreeError;

/// The shapes a red-red violation at `z` can take, with `z`'s parent on `side` of the grandparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsertCase {
    /// The uncle is red: push the violation two levels up by recoloring.
    RedUncle,
    /// The uncle is black and `z` sits on the opposite side of its parent than the parent does of
    /// the grandparent. One rotation turns this into `OuterChild`.
    InnerChild,
    /// The uncle is black and `z` lines up with its parent. One rotation finishes the fixup.
    OuterChild,
}

impl RBTree {
    /// Inserts `key`, always as a new node.
    ///
    /// An equal key goes to the right of all existing equal keys, so duplicates stay in insertion order.
    /// If the node can't be allocated, the tree is left exactly as it was.
    ///
    /// Complexity: O(log(n))
    pub fn insert(&mut self, key: Key) -> Result<NodeId, RBTreeError> {
        let z = self.allocate(key)?;

        let mut y = NIL;
        let mut x = self.root;
        while x != NIL {
            y = x;
            x = if key < self.nodes[x as usize].key {
                self.nodes[x as usize].left
            } else {
                self.nodes[x as usize].right
            };
        }

        self.nodes[z as usize].parent = y;
        if y == NIL {
            self.root = z;
        } else if key < self.nodes[y as usize].key {
            self.nodes[y as usize].left = z;
        } else {
            self.nodes[y as usize].right = z;
        }
        self.len += 1;

        self.insert_fixup(z);
        Ok(self.handle(z))
    }

    fn insert_case(&self, z: Link, side: Side, uncle: Link) -> InsertCase {
        if self.nodes[uncle as usize].is_red() {
            InsertCase::RedUncle
        } else if self.side_of(z) != side {
            InsertCase::InnerChild
        } else {
            InsertCase::OuterChild
        }
    }

    /// Restores the red-black properties after `z` was attached as a red leaf.
    ///
    /// The only property that can be broken is "no red node has a red child", at `z`.
    /// Every iteration either moves the violation two levels closer to the root or ends it.
    fn insert_fixup(&mut self, mut z: Link) {
        // NOTE: the root's parent is the sentinel, which is black, so this stops at the root
        while self.nodes[self.nodes[z as usize].parent as usize].is_red() {
            let parent = self.nodes[z as usize].parent;
            // a red parent is never the root, so the grandparent is a real node
            let grandparent = self.nodes[parent as usize].parent;
            let side = self.side_of(parent);
            let uncle = self.child(grandparent, side.opposite());

            let case = self.insert_case(z, side, uncle);
            trace!("insert_fixup at {z}: {case:?} ({side:?})");
            match case {
                InsertCase::RedUncle => {
                    self.nodes[parent as usize].color = Color::Black;
                    self.nodes[uncle as usize].color = Color::Black;
                    self.nodes[grandparent as usize].color = Color::Red;
                    z = grandparent;
                }
                InsertCase::InnerChild => {
                    z = parent;
                    self.rotate(z, side);
                    self.finish_outer_child(z, side);
                }
                InsertCase::OuterChild => self.finish_outer_child(z, side),
            }
        }
        let root = self.root;
        self.nodes[root as usize].color = Color::Black;
    }

    /// `z`, its parent and grandparent are lined up along `side`. Afterwards the parent is a black
    /// subtree root with two red children, which ends the loop.
    fn finish_outer_child(&mut self, z: Link, side: Side) {
        let parent = self.nodes[z as usize].parent;
        let grandparent = self.nodes[parent as usize].parent;
        self.nodes[parent as usize].color = Color::Black;
        self.nodes[grandparent as usize].color = Color::Red;
        self.rotate(grandparent, side.opposite());
    }
}
