//! Colour-balanced (red-black) discipline.
//!
//! Invariants: the root and every sentinel are black, no red node has a red
//! child, and every root-to-sentinel path crosses the same number of black
//! nodes. Rotations leave colours alone; the fixups below recolour explicitly.

use tracing::trace;

use crate::arena::Handle;
use crate::balance::Balance;
use crate::map::TreeMap;

/// Node colour label of the red-black discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Red node.
    Red,
    /// Black node.
    Black,
}

/// The red-black balancing discipline.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedBlack;

impl Balance for RedBlack {
    type Label = Color;

    const SENTINEL: Color = Color::Black;
    const FRESH: Color = Color::Red;

    fn after_rotate<K, V>(_tree: &mut TreeMap<K, V, Self>, _lower: Handle, _upper: Handle) {}

    fn after_insert<K, V>(tree: &mut TreeMap<K, V, Self>, node: Handle) {
        tree.insert_fixup(node);
    }

    fn remove_node<K, V>(tree: &mut TreeMap<K, V, Self>, node: Handle) -> Option<(K, V)> {
        let removed_color = tree.color(node);
        let (replacement, entry) = tree.splice_out(node);

        if removed_color == Color::Black {
            if tree.color(replacement) == Color::Red {
                // A red child absorbs the lost black.
                tree.set_color(replacement, Color::Black);
            } else {
                tree.erase_fixup(replacement);
            }
        }
        entry
    }
}

impl<K, V> TreeMap<K, V, RedBlack> {
    #[inline]
    fn color(&self, h: Handle) -> Color {
        self.arena.label(h)
    }

    #[inline]
    fn set_color(&mut self, h: Handle, color: Color) {
        debug_assert!(
            color == Color::Black || !self.arena.is_sentinel(h),
            "sentinels stay black"
        );
        self.arena.set_label(h, color);
    }

    /// Resolve a red-red violation between fresh red node `x` and its parent.
    fn insert_fixup(&mut self, mut x: Handle) {
        loop {
            let parent = self.arena.parent(x);
            if parent.is_end() {
                self.set_color(x, Color::Black);
                return;
            }
            if self.color(parent) == Color::Black {
                return;
            }

            // A red parent is never the root, so the grandparent exists.
            let grandparent = self.arena.parent(parent);
            let uncle = self.arena.sibling(parent);

            if self.color(uncle) == Color::Red {
                trace!(node = ?x, "rb insert: red uncle, recolour");
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                x = grandparent;
                continue;
            }

            let parent_is_left = self.arena.left(grandparent) == parent;
            let x_is_left = self.arena.left(parent) == x;

            if parent_is_left != x_is_left {
                // Zig-zag: straighten the chain, then the old parent is the
                // lower red node of a straight chain.
                trace!(node = ?x, "rb insert: zig-zag, rotate parent");
                if parent_is_left {
                    self.rotate_left(parent);
                } else {
                    self.rotate_right(parent);
                }
                x = parent;
                continue;
            }

            trace!(node = ?x, "rb insert: straight chain, rotate grandparent");
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            if parent_is_left {
                self.rotate_right(grandparent);
            } else {
                self.rotate_left(grandparent);
            }
            return;
        }
    }

    /// Resolve a double-black defect at `x`: the subtree rooted at `x` is one
    /// black short of its sibling's.
    fn erase_fixup(&mut self, mut x: Handle) {
        while x != self.root {
            let a = self.arena.parent(x);
            let x_is_left = self.arena.left(a) == x;
            let b = self.arena.sibling(x);
            debug_assert!(!self.arena.is_sentinel(b), "double-black node needs a live sibling");

            let (near, far) = if x_is_left {
                (self.arena.left(b), self.arena.right(b))
            } else {
                (self.arena.right(b), self.arena.left(b))
            };

            match (self.color(a), self.color(b)) {
                (_, Color::Red) => {
                    // `a` is black. Rotate `b` above `a`; `x` then has a red
                    // parent and a black sibling (the old near nephew).
                    trace!(node = ?x, "rb erase: red sibling, rotate parent");
                    self.set_color(b, Color::Black);
                    self.set_color(a, Color::Red);
                    self.rotate_toward(a, x_is_left);
                }
                (a_color, Color::Black) if self.color(far) == Color::Red => {
                    trace!(node = ?x, parent_color = ?a_color, "rb erase: far red nephew");
                    self.set_color(b, a_color);
                    self.set_color(a, Color::Black);
                    self.set_color(far, Color::Black);
                    self.rotate_toward(a, x_is_left);
                    return;
                }
                (a_color, Color::Black) if self.color(near) == Color::Red => {
                    // The near nephew ends up on top of the subtree.
                    trace!(node = ?x, parent_color = ?a_color, "rb erase: near red nephew");
                    self.set_color(near, a_color);
                    self.set_color(a, Color::Black);
                    if x_is_left {
                        self.rotate_right_left(a);
                    } else {
                        self.rotate_left_right(a);
                    }
                    return;
                }
                (Color::Red, Color::Black) => {
                    trace!(node = ?x, "rb erase: red parent, black nephews");
                    self.set_color(b, Color::Red);
                    self.set_color(a, Color::Black);
                    return;
                }
                (Color::Black, Color::Black) => {
                    // Both subtrees of `a` are now short; push the defect up.
                    trace!(node = ?x, "rb erase: all black, propagate");
                    self.set_color(b, Color::Red);
                    x = a;
                }
            }
        }
    }

    /// Rotate at `a` so that the side holding `x` goes down.
    fn rotate_toward(&mut self, a: Handle, x_is_left: bool) {
        if x_is_left {
            self.rotate_left(a);
        } else {
            self.rotate_right(a);
        }
    }
}
