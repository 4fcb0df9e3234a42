//! The ordered map façade.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use crate::arena::{Handle, NodeArena};
use crate::balance::Balance;
use crate::config::TreeConfig;
use crate::error::{Result, TreeError};
use crate::iter::{Iter, Keys, Values};
use crate::rb::RedBlack;

/// An ordered map over a balanced binary search tree.
///
/// The balancing discipline is picked by `B`: [`Avl`](crate::Avl) keeps
/// subtree heights within one of each other, [`RedBlack`] keeps a colour
/// invariant. Both give logarithmic insert, erase, lookup and bound queries.
///
/// Entries are addressed by [`Handle`]s, lightweight cursors that stay valid
/// only until the next mutating call.
pub struct TreeMap<K, V, B: Balance = RedBlack> {
    pub(crate) arena: NodeArena<K, V, B::Label>,
    pub(crate) root: Handle,
    pub(crate) len: usize,
    _marker: PhantomData<B>,
}

impl<K, V, B: Balance> TreeMap<K, V, B> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Create an empty map with the given configuration.
    pub fn with_config(config: TreeConfig) -> Self {
        if config.initial_capacity > 0 {
            debug!(capacity = config.initial_capacity, "reserving tree arena");
        }
        let mut arena = NodeArena::with_capacity(config.arena_slots());
        let root = arena.allocate(Handle::NIL, B::SENTINEL);
        Self {
            arena,
            root,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every entry and reset the arena.
    pub fn clear(&mut self) {
        debug!(len = self.len, "clearing tree");
        self.arena.clear();
        self.len = 0;
        self.root = self.arena.allocate(Handle::NIL, B::SENTINEL);
    }

    /// Bytes reserved by the node arena.
    pub fn memory_usage(&self) -> usize {
        self.arena.capacity_bytes()
    }

    /// Release spare arena capacity. Freed slots stay on the free list, since
    /// handles are stable slot indices and nodes cannot be moved.
    pub fn shrink_to_fit(&mut self) {
        debug!(before = self.memory_usage(), "shrinking tree arena");
        self.arena.shrink_to_fit();
    }

    /// Check if `h` names a live entry of this map.
    #[inline]
    pub(crate) fn is_live(&self, h: Handle) -> bool {
        self.arena.get(h).is_some_and(|n| n.entry.is_some())
    }

    /// Descend towards `key`. Returns the live node holding it, or the
    /// sentinel where it would be inserted.
    pub(crate) fn search<Q>(&self, key: &Q) -> Handle
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some((k, _)) = self.arena.entry(current) {
            current = match key.cmp(k.borrow()) {
                Ordering::Less => self.arena.left(current),
                Ordering::Greater => self.arena.right(current),
                Ordering::Equal => break,
            };
        }
        current
    }

    /// Insert `key` with `value` unless the key is already present.
    ///
    /// Returns a handle to the entry for `key`. An existing entry keeps its
    /// value; `value` is dropped.
    pub fn insert(&mut self, key: K, value: V) -> Handle
    where
        K: Ord,
    {
        let slot = self.search(&key);
        if !self.arena.is_sentinel(slot) {
            return slot;
        }

        self.arena.set_entry(slot, (key, value));
        self.arena.set_label(slot, B::FRESH);
        let left = self.arena.allocate(slot, B::SENTINEL);
        let right = self.arena.allocate(slot, B::SENTINEL);
        self.arena.set_left(slot, left);
        self.arena.set_right(slot, right);
        self.len += 1;

        B::after_insert(self, slot);
        slot
    }

    /// Remove the entry for `key`.
    ///
    /// Returns a handle to the entry that followed it in key order (or the
    /// end handle).
    pub fn erase<Q>(&mut self, key: &Q) -> Result<Handle>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let h = self.find(key);
        if h.is_end() {
            return Err(TreeError::KeyNotFound);
        }
        Ok(self.erase_live(h).0)
    }

    /// Remove the entry named by `h`.
    ///
    /// Returns a handle to the entry that followed it in key order (or the
    /// end handle).
    pub fn erase_at(&mut self, h: Handle) -> Result<Handle> {
        if !self.is_live(h) {
            return Err(TreeError::HandleNotFound);
        }
        Ok(self.erase_live(h).0)
    }

    /// Remove the entry for `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let h = self.find(key);
        if h.is_end() {
            return None;
        }
        self.erase_live(h).1.map(|(_, v)| v)
    }

    /// Remove live node `x`; returns the successor handle and the removed entry.
    fn erase_live(&mut self, x: Handle) -> (Handle, Option<(K, V)>) {
        let left = self.arena.left(x);
        let right = self.arena.right(x);

        // With two live children the successor's entry moves into `x`, so `x`
        // itself becomes the successor position and the successor's old slot
        // (which has no left child) is the one unlinked.
        let (target, successor) = if !self.arena.is_sentinel(left) && !self.arena.is_sentinel(right)
        {
            let min_right = self.arena.leftmost(right);
            self.arena.swap_entries(x, min_right);
            (min_right, x)
        } else {
            (x, self.next(x))
        };

        let entry = B::remove_node(self, target);
        debug_assert!(entry.is_some(), "erased slot held no entry");
        self.len -= 1;
        (successor, entry)
    }

    /// Handle to the entry for `key`, or the end handle.
    pub fn find<Q>(&self, key: &Q) -> Handle
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let h = self.search(key);
        if self.arena.is_sentinel(h) {
            Handle::NIL
        } else {
            h
        }
    }

    /// Check if the map holds `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        !self.find(key).is_end()
    }

    /// Reference to the value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.arena.entry(self.search(key)).map(|(_, v)| v)
    }

    /// Mutable reference to the value for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let h = self.search(key);
        self.value_mut(h).ok()
    }

    /// Checked lookup: the value for `key`, or [`TreeError::MissingKey`].
    pub fn lookup<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(TreeError::MissingKey)
    }

    /// Checked mutable lookup: the value for `key`, or [`TreeError::MissingKey`].
    pub fn lookup_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_mut(key).ok_or(TreeError::MissingKey)
    }

    /// Handle to the smallest entry, or the end handle when empty.
    pub fn begin(&self) -> Handle {
        if self.is_empty() {
            return Handle::NIL;
        }
        self.arena.leftmost(self.root)
    }

    /// The end handle, one past the largest entry.
    #[inline]
    pub fn end(&self) -> Handle {
        Handle::NIL
    }

    /// Key and value at `h`.
    pub fn entry(&self, h: Handle) -> Result<(&K, &V)> {
        self.arena
            .get(h)
            .and_then(|n| n.entry.as_ref())
            .map(|(k, v)| (k, v))
            .ok_or(TreeError::DereferenceEnd)
    }

    /// Mutable value at `h`. Keys are never exposed mutably.
    pub fn value_mut(&mut self, h: Handle) -> Result<&mut V> {
        self.arena
            .get_mut(h)
            .and_then(|n| n.entry.as_mut())
            .map(|(_, v)| v)
            .ok_or(TreeError::DereferenceEnd)
    }

    /// Smallest entry.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.entry(self.begin()).ok()
    }

    /// Largest entry.
    pub fn last(&self) -> Option<(&K, &V)> {
        if self.is_empty() {
            return None;
        }
        self.entry(self.arena.rightmost(self.root)).ok()
    }

    /// Iterate over entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V, B> {
        Iter::new(self)
    }

    /// Iterate over keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V, B> {
        Keys { inner: self.iter() }
    }

    /// Iterate over values in ascending key order.
    pub fn values(&self) -> Values<'_, K, V, B> {
        Values { inner: self.iter() }
    }
}

impl<K, V, B: Balance> Default for TreeMap<K, V, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone, B: Balance> Clone for TreeMap<K, V, B> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            root: self.root,
            len: self.len,
            _marker: PhantomData,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, B: Balance> fmt::Debug for TreeMap<K, V, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, B: Balance> IntoIterator for &'a TreeMap<K, V, B> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
