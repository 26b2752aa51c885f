#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A slab-style object pool that stores items of one type behind small reusable integer keys.
//!
//! This crate provides [`KeyedPool`], a dynamically growing pool with O(1) insertion, lookup and
//! removal. Removing an item vacates its slot, and the most recently vacated slot (together with
//! its key) is handed to the next inserted item. Once the pool has grown to its working size,
//! inserting and removing items does not allocate.
//!
//! Typical uses are entity tables, object pools, graph and arena node storage and registries of
//! event handlers, where items are referenced by a small [`Key`] instead of a reference.
//!
//! # Key features
//!
//! - **Reusable keys**: keys are slot indexes, counting up from zero and reused most recent first
//! - **Ownership transfer**: [`KeyedPool::take()`] hands an item back to the caller
//! - **Optional stale key detection**: [`KeyPolicy::Checked`] attaches a generation to each key
//! - **Skip-vacant traversal**: double-ended iterators and bidirectional [`Cursor`]s over items
//! - **Flexible drop policies**: configure behavior when the pool is dropped with remaining items
//! - **Thread mobility**: the pool is `Send`/`Sync` when its items are, with no internal locking
//!
//! # Examples
//!
//! ## Basic usage
//!
//! ```rust
//! use keyed_pool::KeyedPool;
//!
//! let mut pool = KeyedPool::<String>::new();
//!
//! let alice = pool.insert("Alice".to_string());
//! let bob = pool.insert("Bob".to_string());
//!
//! assert_eq!(pool.get(alice), "Alice");
//! assert_eq!(pool.len(), 2);
//!
//! // Taking an item transfers ownership back to the caller.
//! let bob_name = pool.take(bob).unwrap();
//! assert_eq!(bob_name, "Bob");
//! assert!(!pool.contains(bob));
//!
//! // The vacated slot and its key are reused by the next item.
//! let carol = pool.insert("Carol".to_string());
//! assert_eq!(carol, bob);
//! ```
//!
//! ## Detecting stale keys
//!
//! ```rust
//! use keyed_pool::{KeyPolicy, KeyedPool};
//!
//! let mut pool = KeyedPool::builder().key_policy(KeyPolicy::Checked).build();
//!
//! let first = pool.insert(1);
//! pool.remove(first);
//! let second = pool.insert(2);
//!
//! assert_eq!(first.index(), second.index());
//! assert!(!pool.contains(first));
//! assert_eq!(pool[second], 2);
//! ```
//!
//! ## Traversal
//!
//! ```rust
//! use keyed_pool::KeyedPool;
//!
//! let mut pool = KeyedPool::from_iter([1, 2, 3]);
//! let two = pool.keys().nth(1).unwrap();
//!
//! pool.remove(two);
//! pool.insert(4);
//!
//! // Items are visited in slot order, so the reused slot comes second.
//! assert_eq!(pool.values().copied().collect::<Vec<_>>(), [1, 4, 3]);
//! assert_eq!(pool.to_string(), "1 4 3");
//! ```

mod builder;
mod display;
mod drop_policy;
mod entry;
mod error;
mod iter;
mod key;
mod key_policy;
mod pool;

pub use builder::*;
pub use display::DisplayValues;
pub use drop_policy::*;
pub(crate) use entry::*;
pub use error::KeyError;
pub(crate) use error::Result;
pub use iter::*;
pub use key::Key;
pub use key_policy::*;
pub use pool::{Cursor, CursorMut, KeyedPool};
