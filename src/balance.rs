//! The rebalancing-discipline abstraction shared by both tree flavours.

use std::fmt;

use crate::arena::Handle;
use crate::map::TreeMap;

mod private {
    pub trait Sealed {}

    impl Sealed for crate::avl::Avl {}
    impl Sealed for crate::rb::RedBlack {}
}

/// A balancing discipline: the per-node label it maintains and the fixups that
/// restore its invariant after insertion and removal.
///
/// Implemented by [`Avl`](crate::Avl) and [`RedBlack`](crate::RedBlack); the
/// trait is sealed. Everything else (arena, rotations, iteration, bound
/// queries, the map API) is shared.
pub trait Balance: private::Sealed + Sized {
    /// Structural label stored on every node.
    type Label: Copy + Eq + fmt::Debug;

    /// Label carried by sentinel leaves.
    #[doc(hidden)]
    const SENTINEL: Self::Label;

    /// Label given to a freshly inserted live node.
    #[doc(hidden)]
    const FRESH: Self::Label;

    /// Called by every rotation once links are rewritten. `lower` is the node
    /// that moved down, `upper` the one that took its place.
    #[doc(hidden)]
    fn after_rotate<K, V>(tree: &mut TreeMap<K, V, Self>, lower: Handle, upper: Handle);

    /// Restore the invariant after `node` was materialized as a live node.
    #[doc(hidden)]
    fn after_insert<K, V>(tree: &mut TreeMap<K, V, Self>, node: Handle);

    /// Unlink and release a live node with at most one live child, then
    /// restore the invariant. Returns the entry the node held.
    #[doc(hidden)]
    fn remove_node<K, V>(tree: &mut TreeMap<K, V, Self>, node: Handle) -> Option<(K, V)>;
}
