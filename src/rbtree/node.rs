/// The key type stored in the tree.
pub type Key = i64;

/// Index of a slot in the node arena.
pub(super) type Link = u32;

/// Slot `0` of every arena is the sentinel.
///
/// It stands in for every missing child and for the root's parent, so real nodes always have
/// two children and a parent. It is black forever, and all of its links point back at itself,
/// except for `parent`, which `erase` borrows while fixing up (and resets before returning).
pub(super) const NIL: Link = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// A handle to a node that was returned by [`RBTree::insert`](super::RBTree::insert),
/// [`RBTree::find`](super::RBTree::find), [`RBTree::min`](super::RBTree::min) or [`RBTree::max`](super::RBTree::max).
///
/// Handles stay valid until the node is erased (or the tree is cleared).
/// After that, the slot's generation no longer matches and the handle is simply ignored.
/// Handles also remember which tree made them, so another tree ignores them too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(super) tree: u32,
    pub(super) index: Link,
    pub(super) generation: u32,
}

pub(super) struct RBTreeNode {
    pub(super) key: Key,
    pub(super) color: Color,
    pub(super) left: Link,
    pub(super) right: Link,
    pub(super) parent: Link,
    /// bumped every time the slot is freed, so that old `NodeId`s go stale
    pub(super) generation: u32,
    /// NOTE: free slots reuse `right` as the next link of the free list
    pub(super) occupied: bool,
}

impl RBTreeNode {
    pub(super) const fn sentinel() -> Self {
        Self {
            key: 0,
            color: Color::Black,
            left: NIL,
            right: NIL,
            parent: NIL,
            generation: 0,
            occupied: false,
        }
    }

    /// A fresh red leaf.
    pub(super) const fn leaf(key: Key, generation: u32) -> Self {
        Self {
            key,
            color: Color::Red,
            left: NIL,
            right: NIL,
            parent: NIL,
            generation,
            occupied: true,
        }
    }

    pub(super) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    pub(super) fn is_black(&self) -> bool {
        self.color == Color::Black
    }
}
