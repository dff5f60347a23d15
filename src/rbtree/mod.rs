//! An ordered multiset of [`Key`]s, kept in a red-black tree.
//!
//! All nodes live in one arena owned by the tree. Slot `0` is the shared black sentinel,
//! which plays the part of every null link, so none of the balancing code has to special-case
//! missing children or a missing parent.

use std::sync::atomic::{AtomicU32, Ordering};

use log::debug;

use crate::error::RBTreeError;

mod erase;
mod insert;
mod node;
mod rotate;
mod traverse;
mod validate;

pub use node::{Color, Key, NodeId};
pub use validate::InvariantViolation;

use node::{Link, NIL, RBTreeNode};

/// Source of the ids that tie a `NodeId` to the tree that handed it out.
static NEXT_TREE_ID: AtomicU32 = AtomicU32::new(0);

fn next_tree_id() -> u32 {
    NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed)
}

/// An ordered multiset of `i64` keys that keeps duplicates in insertion order.
pub struct RBTree {
    /// stamped into every `NodeId` this tree hands out
    id: u32,
    /// `nodes[NIL]` is the sentinel, everything else is a real node or a free slot
    nodes: Vec<RBTreeNode>,
    root: Link,
    /// head of the free slot list (threaded through `right`), or `NIL`
    free: Link,
    len: usize,
}

impl RBTree {
    /// Creates an empty tree. Only the sentinel is allocated.
    pub fn new() -> Self {
        Self {
            id: next_tree_id(),
            nodes: vec![RBTreeNode::sentinel()],
            root: NIL,
            free: NIL,
            len: 0,
        }
    }

    /// Creates an empty tree with room for at least `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Result<Self, RBTreeError> {
        let mut nodes = Vec::new();
        nodes.try_reserve(capacity.saturating_add(1)).map_err(|_| RBTreeError::OutOfMemory)?;
        nodes.push(RBTreeNode::sentinel());
        Ok(Self { id: next_tree_id(), nodes, root: NIL, free: NIL, len: 0 })
    }

    /// The amount of keys in the tree (duplicates included).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// Finds a node with the given key.
    ///
    /// When `key` was inserted several times, this is whichever equal node the descent meets first,
    /// which is not necessarily the oldest one.
    ///
    /// Complexity: O(log(n))
    pub fn find(&self, key: Key) -> Option<NodeId> {
        let mut x = self.root;
        while x != NIL {
            let node = &self.nodes[x as usize];
            if key == node.key {
                return Some(self.handle(x))
            }
            x = if key < node.key { node.left } else { node.right };
        }
        None
    }

    pub fn contains(&self, key: Key) -> bool {
        self.find(key).is_some()
    }

    /// The node with the smallest key, or `None` if the tree is empty.
    ///
    /// Among equal smallest keys this is the first one inserted.
    pub fn min(&self) -> Option<NodeId> {
        if self.root == NIL { return None }
        Some(self.handle(self.minimum(self.root)))
    }

    /// The node with the largest key, or `None` if the tree is empty.
    ///
    /// Among equal largest keys this is the last one inserted.
    pub fn max(&self) -> Option<NodeId> {
        if self.root == NIL { return None }
        let mut x = self.root;
        while self.nodes[x as usize].right != NIL {
            x = self.nodes[x as usize].right;
        }
        Some(self.handle(x))
    }

    /// The key stored at `node`, if the handle is still live.
    pub fn key(&self, node: NodeId) -> Option<Key> {
        self.resolve(node).map(|x| self.nodes[x as usize].key)
    }

    /// The color of `node`, if the handle is still live.
    pub fn color(&self, node: NodeId) -> Option<Color> {
        self.resolve(node).map(|x| self.nodes[x as usize].color)
    }

    /// Leftmost node of the subtree rooted at `x` (which must not be `NIL`).
    fn minimum(&self, mut x: Link) -> Link {
        while self.nodes[x as usize].left != NIL {
            x = self.nodes[x as usize].left;
        }
        x
    }

    fn handle(&self, x: Link) -> NodeId {
        NodeId { tree: self.id, index: x, generation: self.nodes[x as usize].generation }
    }

    /// Turns a handle back into a link, unless it is stale or was made by another tree.
    fn resolve(&self, node: NodeId) -> Option<Link> {
        if node.tree != self.id || node.index == NIL { return None }
        let slot = self.nodes.get(node.index as usize)?;
        (slot.occupied && slot.generation == node.generation).then_some(node.index)
    }

    /// Claims a slot for a new red leaf holding `key`.
    ///
    /// Nothing in the tree is touched if this fails.
    fn allocate(&mut self, key: Key) -> Result<Link, RBTreeError> {
        if self.free != NIL {
            let x = self.free;
            let slot = &mut self.nodes[x as usize];
            self.free = slot.right;
            *slot = RBTreeNode::leaf(key, slot.generation);
            debug!("Reusing slot {x} for key {key}");
            return Ok(x)
        }

        let x = Link::try_from(self.nodes.len()).map_err(|_| RBTreeError::TooManyNodes)?;
        self.nodes.try_reserve(1).map_err(|_| RBTreeError::OutOfMemory)?;
        self.nodes.push(RBTreeNode::leaf(key, 0));
        debug!("Allocated slot {x} for key {key}");
        Ok(x)
    }

    /// Returns a detached node's slot to the free list.
    ///
    /// Every real node goes through here exactly once.
    fn release(&mut self, x: Link) -> Key {
        debug_assert_ne!(x, NIL, "tried to free the sentinel");
        let free = self.free;
        let slot = &mut self.nodes[x as usize];
        debug_assert!(slot.occupied, "slot {x} was already free");
        slot.occupied = false;
        slot.generation = slot.generation.wrapping_add(1);
        slot.left = NIL;
        slot.parent = NIL;
        slot.right = free;
        self.free = x;
        slot.key
    }

    /// Tears the tree down, returning how many nodes were freed.
    pub fn destroy(mut self) -> usize {
        let freed = self.clear();
        debug!("Destroyed tree ({freed} nodes)");
        freed
    }
}

impl Default for RBTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RBTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.to_vec()).finish()
    }
}
