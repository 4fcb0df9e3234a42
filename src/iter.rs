//! In-order traversal by parent links.

use std::iter::FusedIterator;

use crate::arena::Handle;
use crate::balance::Balance;
use crate::map::TreeMap;

impl<K, V, B: Balance> TreeMap<K, V, B> {
    /// Handle to the entry following `h` in key order.
    ///
    /// Returns the end handle when `h` is the last entry, or when `h` does not
    /// name a live entry.
    pub fn next(&self, h: Handle) -> Handle {
        if !self.is_live(h) {
            return Handle::NIL;
        }

        let right = self.arena.right(h);
        if !self.arena.is_sentinel(right) {
            return self.arena.leftmost(right);
        }

        // Climb while we are a right child; the first parent reached from the
        // left is the successor.
        let mut current = h;
        let mut parent = self.arena.parent(current);
        while !parent.is_end() && self.arena.right(parent) == current {
            current = parent;
            parent = self.arena.parent(current);
        }
        parent
    }
}

/// Iterator over the entries of a [`TreeMap`], in ascending key order.
pub struct Iter<'a, K, V, B: Balance> {
    tree: &'a TreeMap<K, V, B>,
    cursor: Handle,
    remaining: usize,
}

impl<'a, K, V, B: Balance> Iter<'a, K, V, B> {
    pub(crate) fn new(tree: &'a TreeMap<K, V, B>) -> Self {
        Self {
            tree,
            cursor: tree.begin(),
            remaining: tree.len(),
        }
    }
}

impl<'a, K, V, B: Balance> Iterator for Iter<'a, K, V, B> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let (k, v) = tree.entry(self.cursor).ok()?;
        self.cursor = tree.next(self.cursor);
        self.remaining -= 1;
        Some((k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, B: Balance> ExactSizeIterator for Iter<'_, K, V, B> {}

impl<K, V, B: Balance> FusedIterator for Iter<'_, K, V, B> {}

impl<K, V, B: Balance> Clone for Iter<'_, K, V, B> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

/// Iterator over the keys of a [`TreeMap`].
pub struct Keys<'a, K, V, B: Balance> {
    pub(crate) inner: Iter<'a, K, V, B>,
}

impl<'a, K, V, B: Balance> Iterator for Keys<'a, K, V, B> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, B: Balance> ExactSizeIterator for Keys<'_, K, V, B> {}

/// Iterator over the values of a [`TreeMap`], in ascending key order.
pub struct Values<'a, K, V, B: Balance> {
    pub(crate) inner: Iter<'a, K, V, B>,
}

impl<'a, K, V, B: Balance> Iterator for Values<'a, K, V, B> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, B: Balance> ExactSizeIterator for Values<'_, K, V, B> {}
