//! A Binary Search Tree that orders its values with a pluggable [`Comparator`] and counts
//! duplicates instead of storing them twice.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value ordered before its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value ordered after its own value.
//!
//! Here "ordered before/after" is whatever the tree's [`Comparator`] says, which need not be
//! [`Ord`]. Values the comparator considers [equal][Comparator::equals] never get a second node:
//! the existing node's count goes up instead, and [`OrderedTree::asc_list`] yields the value
//! once per count.
//!
//! This tree never rebalances, so searching costs `O(height)` and the height is `O(N)` in the
//! worst case (for example, adding already sorted values).
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{Natural, OrderedTree, Removal, TreeError};
//!
//! let mut tree = OrderedTree::new("m", Natural);
//! tree.add("c");
//! tree.add("c");
//! tree.add("z");
//! tree.add("d");
//!
//! assert_eq!(tree.asc_list(), vec!["c", "c", "d", "m", "z"]);
//! assert_eq!(tree.find(&"d"), Some(&"d"));
//! assert_eq!(tree.find(&"q"), None);
//!
//! assert_eq!(tree.remove(&"c"), Ok(Removal::Decremented { remaining: 1 }));
//! assert_eq!(tree.remove(&"q"), Ok(Removal::NotFound));
//!
//! let mut single = OrderedTree::new(1, Natural);
//! assert_eq!(single.remove(&1), Err(TreeError::CannotRemoveLast));
//! ```
//!
//! ## Threads
//!
//! An [`OrderedTree`] has no internal locking. It is `Send`/`Sync` whenever its values and
//! comparator are, so share one between threads behind a `Mutex` or keep one per thread.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod comparator;
mod erased;
pub mod error;
pub mod iter;
pub mod tree;
mod util;

pub use comparator::{Comparator, Contents, FnComparator, Natural, Reversed};
pub use error::TreeError;
pub use iter::Iter;
pub use tree::{Node, OrderedTree, Removal};
