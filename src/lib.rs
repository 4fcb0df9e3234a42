//! # balanced-map
//!
//! An ordered map backed by an arena-allocated, self-balancing binary search
//! tree. Two balancing disciplines share one node arena, one rotation engine,
//! in-order iteration and bound queries:
//!
//! - [`Avl`]: height-balanced, every node stores its subtree height.
//! - [`RedBlack`]: colour-balanced, every node stores a red/black colour.
//!
//! Nodes are addressed by [`Handle`], a small index into the arena. Every
//! live node has two children; absent children are explicit sentinel leaves,
//! so a handle is either a live entry, a sentinel, or the end position.
//!
//! ## Example
//!
//! ```rust
//! use balanced_map::{RbMap, TreeError};
//!
//! let mut map: RbMap<u32, &str> = RbMap::new();
//! map.insert(20, "twenty");
//! map.insert(10, "ten");
//! map.insert(30, "thirty");
//!
//! assert_eq!(map.lookup(&10), Ok(&"ten"));
//! assert_eq!(map.lookup(&15), Err(TreeError::MissingKey));
//!
//! let h = map.lower_bound(&15);
//! assert_eq!(map.entry(h), Ok((&20, &"twenty")));
//!
//! // Erasing returns the handle of the next entry in key order.
//! let next = map.erase(&20).unwrap();
//! assert_eq!(map.entry(next), Ok((&30, &"thirty")));
//!
//! let keys: Vec<u32> = map.keys().copied().collect();
//! assert_eq!(keys, vec![10, 30]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod arena;
mod avl;
mod balance;
mod bound;
mod config;
mod error;
mod inspect;
mod iter;
mod map;
mod rb;
mod rotate;

pub use arena::Handle;
pub use avl::{Avl, Height};
pub use balance::Balance;
pub use config::TreeConfig;
pub use error::{Result, TreeError};
pub use inspect::NodeView;
pub use iter::{Iter, Keys, Values};
pub use map::TreeMap;
pub use rb::{Color, RedBlack};

/// Ordered map balanced with the AVL discipline.
pub type AvlMap<K, V> = TreeMap<K, V, Avl>;

/// Ordered map balanced with the red-black discipline.
pub type RbMap<K, V> = TreeMap<K, V, RedBlack>;


#[cfg(test)]
mod proptests;
