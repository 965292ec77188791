//! An ordered, mutable Binary Search Tree (BST) over integer keys, mostly for educational
//! purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of this BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than or equal to its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for keys in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). [`OrderedTree`] makes no attempt to limit its
//! height, so inserting sorted keys degrades it into a list. BSTs also naturally support sorted
//! iteration by visiting the left subtree, then the subtree root, then the right subtree.
//!
//! ## Parents
//!
//! Every node also records its parent, which is what lets [`OrderedTree::successor`] step to the
//! next key from any node. Nodes live in a slot map and link to each other by [`NodeId`], so the
//! parent link is just another index and never owns anything.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{Order, OrderedTree};
//!
//! let mut tree = OrderedTree::new();
//! let two = tree.insert(2);
//! tree.insert(1);
//! tree.insert(3);
//!
//! assert_eq!(tree.find(2), Some(two));
//! assert_eq!(tree.successor(two).map(|id| tree.key(id)), Some(Ok(3)));
//! assert_eq!(tree.traverse(Order::In), vec![1, 2, 3]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
mod traversal;
mod tree;


pub use error::Error;
pub use traversal::{Order, Traversal};
pub use tree::{Locate, NodeId, OrderedTree, Side};

/// The type of key stored in an [`OrderedTree`].
pub type Key = i64;
