use log::trace;

use super::node::{Color, Key, Link, NIL, NodeId};
use super::rotate::Side;
use super::RBTree;

/// The shapes a black-height deficit at `x` can take, named after `x`'s sibling `w`.
/// "Near" is `w`'s child on `x`'s side, "far" is the other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EraseCase {
    /// `w` is red: rotate it above the parent so that `x` gets a black sibling, then look again.
    RedSibling,
    /// `w` and both its children are black: make `w` red and move the deficit up to the parent.
    BlackNephews,
    /// Only the near child of `w` is red: rotate it into `w`'s place, which gives `FarNephewRed`.
    NearNephewRed,
    /// The far child of `w` is red: one rotation at the parent absorbs the deficit.
    FarNephewRed,
}

impl RBTree {
    /// Hangs `v` where `u` used to be under `u`'s parent (or makes it the root).
    ///
    /// `v.parent` is set even when `v` is the sentinel: the delete fixup uses it to find its way
    /// back up from an empty subtree. `v`'s children are left for the caller.
    fn transplant(&mut self, u: Link, v: Link) {
        let parent = self.nodes[u as usize].parent;
        if parent == NIL {
            self.root = v;
        } else if u == self.nodes[parent as usize].left {
            self.nodes[parent as usize].left = v;
        } else {
            self.nodes[parent as usize].right = v;
        }
        self.nodes[v as usize].parent = parent;
    }

    /// Removes `node` from the tree and returns its key.
    ///
    /// Returns `None` without touching anything if the handle is stale (its node was already erased).
    /// The same goes for a handle that some other tree handed out.
    ///
    /// Complexity: O(log(n))
    pub fn erase(&mut self, node: NodeId) -> Option<Key> {
        let z = self.resolve(node)?;
        let z_left = self.nodes[z as usize].left;
        let z_right = self.nodes[z as usize].right;

        // `x` is whatever ends up in the spot the removed black (if any) was taken from
        let x;
        let removed_color;
        if z_left == NIL {
            removed_color = self.nodes[z as usize].color;
            x = z_right;
            self.transplant(z, z_right);
        } else if z_right == NIL {
            removed_color = self.nodes[z as usize].color;
            x = z_left;
            self.transplant(z, z_left);
        } else {
            // `z` has two children: its successor `y` takes its place (and color),
            // so the node that actually goes missing from the structure is `y`
            let y = self.minimum(z_right);
            removed_color = self.nodes[y as usize].color;
            x = self.nodes[y as usize].right;
            if self.nodes[y as usize].parent == z {
                self.nodes[x as usize].parent = y;
            } else {
                self.transplant(y, x);
                self.nodes[y as usize].right = z_right;
                self.nodes[z_right as usize].parent = y;
            }
            self.transplant(z, y);
            self.nodes[y as usize].left = z_left;
            self.nodes[z_left as usize].parent = y;
            self.nodes[y as usize].color = self.nodes[z as usize].color;
        }

        if removed_color == Color::Black {
            self.erase_fixup(x);
        }
        // the sentinel may have been used as a placeholder above
        self.nodes[NIL as usize].parent = NIL;

        self.len -= 1;
        Some(self.release(z))
    }

    fn erase_case(&self, w: Link, side: Side) -> EraseCase {
        let near = self.child(w, side);
        let far = self.child(w, side.opposite());
        if self.nodes[w as usize].is_red() {
            EraseCase::RedSibling
        } else if self.nodes[far as usize].is_red() {
            EraseCase::FarNephewRed
        } else if self.nodes[near as usize].is_red() {
            EraseCase::NearNephewRed
        } else {
            EraseCase::BlackNephews
        }
    }

    /// Restores black heights after a black node was removed above `x`.
    ///
    /// `x` carries an extra black. Each iteration either moves it one level up, or gets rid of it
    /// with at most three rotations in total.
    fn erase_fixup(&mut self, mut x: Link) {
        while x != self.root && self.nodes[x as usize].is_black() {
            let parent = self.nodes[x as usize].parent;
            let side = self.side_of(x);
            // `x`'s side is a black short of the other one, so the sibling is always a real node
            let w = self.child(parent, side.opposite());

            let case = self.erase_case(w, side);
            trace!("erase_fixup at {x}: {case:?} ({side:?})");
            match case {
                EraseCase::RedSibling => {
                    self.nodes[w as usize].color = Color::Black;
                    self.nodes[parent as usize].color = Color::Red;
                    self.rotate(parent, side);
                }
                EraseCase::BlackNephews => {
                    self.nodes[w as usize].color = Color::Red;
                    x = parent;
                }
                EraseCase::NearNephewRed => {
                    let near = self.child(w, side);
                    self.nodes[near as usize].color = Color::Black;
                    self.nodes[w as usize].color = Color::Red;
                    self.rotate(w, side.opposite());
                    self.finish_far_nephew(parent, side);
                    x = self.root;
                }
                EraseCase::FarNephewRed => {
                    self.finish_far_nephew(parent, side);
                    x = self.root;
                }
            }
        }
        self.nodes[x as usize].color = Color::Black;
    }

    /// The sibling of `parent`'s `side` child is black with a red far child.
    fn finish_far_nephew(&mut self, parent: Link, side: Side) {
        let w = self.child(parent, side.opposite());
        let far = self.child(w, side.opposite());
        self.nodes[w as usize].color = self.nodes[parent as usize].color;
        self.nodes[parent as usize].color = Color::Black;
        self.nodes[far as usize].color = Color::Black;
        self.rotate(parent, side);
    }
}
