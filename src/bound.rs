//! Lower/upper bound descent.

use std::borrow::Borrow;

use crate::arena::Handle;
use crate::balance::Balance;
use crate::map::TreeMap;

impl<K, V, B: Balance> TreeMap<K, V, B> {
    /// Handle to the first entry whose key is not less than `key`, or the end
    /// handle.
    pub fn lower_bound<Q>(&self, key: &Q) -> Handle
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.descend_bound(|k| {
            let k: &Q = k.borrow();
            k >= key
        })
    }

    /// Handle to the first entry whose key is strictly greater than `key`, or
    /// the end handle.
    pub fn upper_bound<Q>(&self, key: &Q) -> Handle
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.descend_bound(|k| {
            let k: &Q = k.borrow();
            k > key
        })
    }

    /// Leftmost live node satisfying `accept`, which must be monotone in key
    /// order (false for a prefix of keys, true for the rest).
    fn descend_bound(&self, accept: impl Fn(&K) -> bool) -> Handle {
        let mut best = Handle::NIL;
        let mut current = self.root;
        while let Some((k, _)) = self.arena.entry(current) {
            if accept(k) {
                best = current;
                current = self.arena.left(current);
            } else {
                current = self.arena.right(current);
            }
        }
        best
    }
}
