//! Node arena with free-list slot reuse.
//!
//! Nodes live in a single `Vec` and refer to each other by 32-bit slot index
//! (`Handle`). Rebalancing only rewrites links, so a node never moves once it
//! has a slot.

use std::fmt;

/// Index of a node slot in a tree's arena.
///
/// A handle is the map's cursor type: it names a live entry, a sentinel (only
/// seen through introspection), or the end position [`Handle::NIL`]. Handles
/// are invalidated by any mutating call on the map they came from.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Handle(u32);

impl Handle {
    /// The end position; also the "no link" value for parent/child links.
    pub const NIL: Handle = Handle(u32::MAX);

    /// Check if this is the end position.
    #[inline]
    pub fn is_end(self) -> bool {
        self == Self::NIL
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        assert!(index < u32::MAX as usize, "arena slot index too large");
        Self(index as u32)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        debug_assert!(!self.is_end());
        self.0 as usize
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end() {
            f.write_str("Handle(end)")
        } else {
            write!(f, "Handle({})", self.0)
        }
    }
}

/// One arena slot.
///
/// `entry` is `None` for a sentinel: a materialized "no child" leaf.
#[derive(Clone)]
pub(crate) struct Node<K, V, L> {
    pub(crate) parent: Handle,
    pub(crate) left: Handle,
    pub(crate) right: Handle,
    pub(crate) label: L,
    pub(crate) entry: Option<(K, V)>,
}

#[derive(Clone)]
pub(crate) struct NodeArena<K, V, L> {
    slots: Vec<Node<K, V, L>>,
    free: Vec<Handle>,
}

impl<K, V, L: Copy> NodeArena<K, V, L> {
    pub(crate) fn with_capacity(slots: usize) -> Self {
        Self {
            slots: Vec::with_capacity(slots),
            free: Vec::new(),
        }
    }

    /// Take a slot (reused or freshly grown) and initialize it as a sentinel.
    pub(crate) fn allocate(&mut self, parent: Handle, label: L) -> Handle {
        let node = Node {
            parent,
            left: Handle::NIL,
            right: Handle::NIL,
            label,
            entry: None,
        };
        if let Some(h) = self.free.pop() {
            self.slots[h.index()] = node;
            h
        } else {
            let h = Handle::from_index(self.slots.len());
            self.slots.push(node);
            h
        }
    }

    /// Return a slot to the free list. It must already be unlinked from the tree.
    pub(crate) fn release(&mut self, h: Handle) -> Option<(K, V)> {
        let node = &mut self.slots[h.index()];
        node.parent = Handle::NIL;
        node.left = Handle::NIL;
        node.right = Handle::NIL;
        let entry = node.entry.take();
        self.free.push(h);
        entry
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.slots.shrink_to_fit();
        self.free.shrink_to_fit();
    }

    /// Bytes reserved by the slot and free-list vectors.
    pub(crate) fn capacity_bytes(&self) -> usize {
        self.slots.capacity() * std::mem::size_of::<Node<K, V, L>>()
            + self.free.capacity() * std::mem::size_of::<Handle>()
    }

    /// Slot lookup that tolerates `NIL` and out-of-range handles.
    #[inline]
    pub(crate) fn get(&self, h: Handle) -> Option<&Node<K, V, L>> {
        if h.is_end() {
            return None;
        }
        self.slots.get(h.index())
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, h: Handle) -> Option<&mut Node<K, V, L>> {
        if h.is_end() {
            return None;
        }
        self.slots.get_mut(h.index())
    }

    // Link and label accessors below index directly: callers only pass handles
    // reachable from the root, which are always in range.

    #[inline]
    pub(crate) fn parent(&self, h: Handle) -> Handle {
        self.slots[h.index()].parent
    }

    #[inline]
    pub(crate) fn left(&self, h: Handle) -> Handle {
        self.slots[h.index()].left
    }

    #[inline]
    pub(crate) fn right(&self, h: Handle) -> Handle {
        self.slots[h.index()].right
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, h: Handle, parent: Handle) {
        self.slots[h.index()].parent = parent;
    }

    #[inline]
    pub(crate) fn set_left(&mut self, h: Handle, left: Handle) {
        self.slots[h.index()].left = left;
    }

    #[inline]
    pub(crate) fn set_right(&mut self, h: Handle, right: Handle) {
        self.slots[h.index()].right = right;
    }

    #[inline]
    pub(crate) fn label(&self, h: Handle) -> L {
        self.slots[h.index()].label
    }

    #[inline]
    pub(crate) fn set_label(&mut self, h: Handle, label: L) {
        self.slots[h.index()].label = label;
    }

    #[inline]
    pub(crate) fn is_sentinel(&self, h: Handle) -> bool {
        self.slots[h.index()].entry.is_none()
    }

    #[inline]
    pub(crate) fn entry(&self, h: Handle) -> Option<&(K, V)> {
        self.slots[h.index()].entry.as_ref()
    }

    #[inline]
    pub(crate) fn set_entry(&mut self, h: Handle, entry: (K, V)) {
        self.slots[h.index()].entry = Some(entry);
    }

    /// Exchange the entries held by two slots, leaving all links in place.
    pub(crate) fn swap_entries(&mut self, a: Handle, b: Handle) {
        if a == b {
            return;
        }
        let ea = self.slots[a.index()].entry.take();
        let eb = self.slots[b.index()].entry.take();
        self.slots[a.index()].entry = eb;
        self.slots[b.index()].entry = ea;
    }

    /// Sibling of `h` under its parent. `h` must not be the root.
    #[inline]
    pub(crate) fn sibling(&self, h: Handle) -> Handle {
        let p = self.parent(h);
        if self.left(p) == h {
            self.right(p)
        } else {
            self.left(p)
        }
    }

    /// Leftmost live node of the subtree rooted at live node `h`.
    pub(crate) fn leftmost(&self, mut h: Handle) -> Handle {
        while !self.is_sentinel(self.left(h)) {
            h = self.left(h);
        }
        h
    }

    /// Rightmost live node of the subtree rooted at live node `h`.
    pub(crate) fn rightmost(&self, mut h: Handle) -> Handle {
        while !self.is_sentinel(self.right(h)) {
            h = self.right(h);
        }
        h
    }
}
