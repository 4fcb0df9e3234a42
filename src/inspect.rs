//! Read-only structural introspection.
//!
//! Exposes each node's links, sentinel flag and discipline label so that an
//! independent checker can re-derive every tree invariant from the outside.

use crate::arena::Handle;
use crate::balance::Balance;
use crate::map::TreeMap;

/// Read-only view of one arena node.
#[derive(Debug)]
pub struct NodeView<'a, K, V, L> {
    handle: Handle,
    parent: Handle,
    left: Handle,
    right: Handle,
    label: L,
    entry: Option<&'a (K, V)>,
}

impl<K, V, L: Copy> Clone for NodeView<'_, K, V, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, L: Copy> Copy for NodeView<'_, K, V, L> {}

impl<'a, K, V, L: Copy> NodeView<'a, K, V, L> {
    /// Handle of this node.
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Parent link (`NIL` at the root).
    pub fn parent(&self) -> Handle {
        self.parent
    }

    /// Left child (`NIL` for a sentinel).
    pub fn left(&self) -> Handle {
        self.left
    }

    /// Right child (`NIL` for a sentinel).
    pub fn right(&self) -> Handle {
        self.right
    }

    /// Discipline label: height for AVL, colour for red-black.
    pub fn label(&self) -> L {
        self.label
    }

    /// Whether this is a sentinel leaf rather than a live entry.
    pub fn is_sentinel(&self) -> bool {
        self.entry.is_none()
    }

    /// Key of a live node.
    pub fn key(&self) -> Option<&'a K> {
        self.entry.map(|(k, _)| k)
    }

    /// Value of a live node.
    pub fn value(&self) -> Option<&'a V> {
        self.entry.map(|(_, v)| v)
    }
}

impl<K, V, B: Balance> TreeMap<K, V, B> {
    /// Handle of the root node. For an empty map this is a sentinel.
    pub fn root(&self) -> Handle {
        self.root
    }

    /// View of the node at `h`, or `None` for `NIL` and out-of-range handles.
    ///
    /// Slots on the free list read as unlinked sentinels; they are never
    /// reachable from [`root`](Self::root).
    pub fn node(&self, h: Handle) -> Option<NodeView<'_, K, V, B::Label>> {
        self.arena.get(h).map(|n| NodeView {
            handle: h,
            parent: n.parent,
            left: n.left,
            right: n.right,
            label: n.label,
            entry: n.entry.as_ref(),
        })
    }
}
