use log::trace;

use super::node::{Link, NIL};
use super::RBTree;

/// Which child of its parent a node is.
///
/// The fixups are written once in terms of a `Side` and its opposite instead of twice as mirror images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Side {
    Left,
    Right,
}

impl Side {
    pub(super) fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl RBTree {
    pub(super) fn child(&self, x: Link, side: Side) -> Link {
        match side {
            Side::Left => self.nodes[x as usize].left,
            Side::Right => self.nodes[x as usize].right,
        }
    }

    /// Which side of its parent `x` hangs on.
    ///
    /// `x` may be the sentinel, as long as its parent link was pointed at the right place first.
    pub(super) fn side_of(&self, x: Link) -> Side {
        let parent = self.nodes[x as usize].parent;
        if x == self.nodes[parent as usize].left { Side::Left } else { Side::Right }
    }

    /// Rotates `x` down towards `side`, lifting its child from the other side into its place.
    pub(super) fn rotate(&mut self, x: Link, side: Side) {
        match side {
            Side::Left => self.rotate_left(x),
            Side::Right => self.rotate_right(x),
        }
    }

    /// Puts `y` where `x` used to hang: under `x`'s parent, or at the root.
    fn replace_child(&mut self, x: Link, y: Link) {
        let parent = self.nodes[x as usize].parent;
        self.nodes[y as usize].parent = parent;
        if parent == NIL {
            self.root = y;
        } else if x == self.nodes[parent as usize].left {
            self.nodes[parent as usize].left = y;
        } else {
            self.nodes[parent as usize].right = y;
        }
    }

    /// ```text
    ///     x               y
    ///    / \             / \
    ///   a   y    ->     x   c
    ///      / \         / \
    ///     b   c       a   b
    /// ```
    ///
    /// `x` must have a right child. Colors and the in-order sequence don't change.
    pub(super) fn rotate_left(&mut self, x: Link) {
        let y = self.nodes[x as usize].right;
        debug_assert_ne!(y, NIL, "rotate_left without a right child");
        trace!("rotate_left at {x}");

        let b = self.nodes[y as usize].left;
        self.nodes[x as usize].right = b;
        if b != NIL {
            self.nodes[b as usize].parent = x;
        }

        self.replace_child(x, y);

        self.nodes[y as usize].left = x;
        self.nodes[x as usize].parent = y;
    }

    /// Mirror image of [`rotate_left`](Self::rotate_left); `x` must have a left child.
    pub(super) fn rotate_right(&mut self, x: Link) {
        let y = self.nodes[x as usize].left;
        debug_assert_ne!(y, NIL, "rotate_right without a left child");
        trace!("rotate_right at {x}");

        let b = self.nodes[y as usize].right;
        self.nodes[x as usize].left = b;
        if b != NIL {
            self.nodes[b as usize].parent = x;
        }

        self.replace_child(x, y);

        self.nodes[y as usize].right = x;
        self.nodes[x as usize].parent = y;
    }
}
