//! Height-balanced (AVL) discipline.
//!
//! Every node carries its subtree height; sentinels are height 0 and a fresh
//! leaf is height 1. After any mutation the balancer walks from the mutation
//! point to the root, recomputing heights and rotating wherever the two child
//! heights differ by 2.

use tracing::trace;

use crate::arena::Handle;
use crate::balance::Balance;
use crate::map::TreeMap;

/// Subtree height label of the AVL discipline.
pub type Height = u32;

/// The AVL balancing discipline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Avl;

impl Balance for Avl {
    type Label = Height;

    const SENTINEL: Height = 0;
    const FRESH: Height = 1;

    fn after_rotate<K, V>(tree: &mut TreeMap<K, V, Self>, lower: Handle, upper: Handle) {
        tree.update_height(lower);
        tree.update_height(upper);
    }

    fn after_insert<K, V>(tree: &mut TreeMap<K, V, Self>, node: Handle) {
        let parent = tree.arena.parent(node);
        tree.rebalance_from(parent);
    }

    fn remove_node<K, V>(tree: &mut TreeMap<K, V, Self>, node: Handle) -> Option<(K, V)> {
        let parent = tree.arena.parent(node);
        let (_, entry) = tree.splice_out(node);
        tree.rebalance_from(parent);
        entry
    }
}

impl<K, V> TreeMap<K, V, Avl> {
    #[inline]
    fn height(&self, h: Handle) -> Height {
        self.arena.label(h)
    }

    fn update_height(&mut self, h: Handle) {
        let left = self.height(self.arena.left(h));
        let right = self.height(self.arena.right(h));
        self.arena.set_label(h, 1 + left.max(right));
    }

    /// Walk from `x` to the root, fixing heights and rotating out any
    /// imbalance. Insertion needs at most one (single or double) rotation on
    /// the way up; erasure may need one per level.
    fn rebalance_from(&mut self, mut x: Handle) {
        while !x.is_end() {
            let left = self.arena.left(x);
            let right = self.arena.right(x);
            let hl = self.height(left);
            let hr = self.height(right);

            if hr > hl + 1 {
                // Right-heavy. An inner-leaning right child needs a double rotation.
                if self.height(self.arena.left(right)) > self.height(self.arena.right(right)) {
                    trace!(node = ?x, "avl: right-left rotation");
                    self.rotate_right_left(x);
                } else {
                    trace!(node = ?x, "avl: left rotation");
                    self.rotate_left(x);
                }
                // `x` moved down; continue from the new subtree root.
                x = self.arena.parent(x);
            } else if hl > hr + 1 {
                if self.height(self.arena.right(left)) > self.height(self.arena.left(left)) {
                    trace!(node = ?x, "avl: left-right rotation");
                    self.rotate_left_right(x);
                } else {
                    trace!(node = ?x, "avl: right rotation");
                    self.rotate_right(x);
                }
                x = self.arena.parent(x);
            } else {
                self.update_height(x);
            }
            x = self.arena.parent(x);
        }
    }
}
