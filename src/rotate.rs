//! Rotation primitives and link surgery shared by both disciplines.
//!
//! ```text
//!       x                 y
//!      / \               / \
//!     a   y     <=>     x   c
//!        / \           / \
//!       b   c         a   b
//! ```
//!
//! Left rotation reads left to right, right rotation right to left. The
//! in-order sequence `a x b y c` is the same on both sides.

use tracing::trace;

use crate::arena::Handle;
use crate::balance::Balance;
use crate::map::TreeMap;

impl<K, V, B: Balance> TreeMap<K, V, B> {
    /// Point `parent`'s link at `old` to `new` instead (or make `new` the root
    /// when `parent` is `NIL`), and set `new`'s parent.
    pub(crate) fn replace_child(&mut self, parent: Handle, old: Handle, new: Handle) {
        if parent.is_end() {
            self.root = new;
        } else if self.arena.left(parent) == old {
            self.arena.set_left(parent, new);
        } else {
            debug_assert_eq!(self.arena.right(parent), old);
            self.arena.set_right(parent, new);
        }
        self.arena.set_parent(new, parent);
    }

    pub(crate) fn rotate_left(&mut self, x: Handle) {
        let y = self.arena.right(x);
        debug_assert!(!self.arena.is_sentinel(y), "rotate_left needs a live right child");
        trace!(node = ?x, pivot = ?y, "rotate left");

        let parent = self.arena.parent(x);
        let inner = self.arena.left(y);

        self.arena.set_right(x, inner);
        self.arena.set_parent(inner, x);

        self.replace_child(parent, x, y);
        self.arena.set_left(y, x);
        self.arena.set_parent(x, y);

        B::after_rotate(self, x, y);
    }

    pub(crate) fn rotate_right(&mut self, x: Handle) {
        let y = self.arena.left(x);
        debug_assert!(!self.arena.is_sentinel(y), "rotate_right needs a live left child");
        trace!(node = ?x, pivot = ?y, "rotate right");

        let parent = self.arena.parent(x);
        let inner = self.arena.right(y);

        self.arena.set_left(x, inner);
        self.arena.set_parent(inner, x);

        self.replace_child(parent, x, y);
        self.arena.set_right(y, x);
        self.arena.set_parent(x, y);

        B::after_rotate(self, x, y);
    }

    /// Zig-zag fix for a left-heavy `x` whose left child leans right.
    pub(crate) fn rotate_left_right(&mut self, x: Handle) {
        self.rotate_left(self.arena.left(x));
        self.rotate_right(x);
    }

    /// Zig-zag fix for a right-heavy `x` whose right child leans left.
    pub(crate) fn rotate_right_left(&mut self, x: Handle) {
        self.rotate_right(self.arena.right(x));
        self.rotate_left(x);
    }

    /// Unlink live node `x`, which has at most one live child, putting that
    /// child (or one of its sentinels) in its place. Releases `x` and the
    /// discarded sentinel; returns the replacement and `x`'s entry.
    pub(crate) fn splice_out(&mut self, x: Handle) -> (Handle, Option<(K, V)>) {
        let left = self.arena.left(x);
        let right = self.arena.right(x);
        let (keep, discard) = if self.arena.is_sentinel(left) {
            (right, left)
        } else {
            debug_assert!(self.arena.is_sentinel(right), "splice_out on a two-child node");
            (left, right)
        };
        trace!(node = ?x, replacement = ?keep, "splice");

        let parent = self.arena.parent(x);
        self.replace_child(parent, x, keep);
        self.arena.release(discard);
        let entry = self.arena.release(x);
        (keep, entry)
    }
}
