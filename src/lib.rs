//! This crate provides two small associative containers, mostly for educational purposes: a
//! Binary Search Tree that is walked without recursion, and a chained hash table with a fixed
//! number of buckets.
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
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)`. The [`Tree`] here doesn't rebalance itself, so
//! inserting sorted keys builds a chain whose height is the number of keys. Nothing
//! in it recurses on the height though: searches and edits walk a cursor down the
//! tree and traversals keep their place on an [`ExplicitStack`], so even a chain of
//! millions of nodes is fine. When the shape gets bad, [`Tree::balance`] relinks the
//! existing nodes into a tree of minimal height.
//!
//! ## Hash table
//!
//! [`HashTable`] maps string keys to values. Its bucket count is fixed when it is
//! built (see [`HashTableConfig`]) and colliding keys are chained.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
pub mod hashtable;
pub mod items;
pub mod letters;
pub mod stack;
pub mod tree;

pub use error::{Error, Result};
pub use hashtable::{HashTable, HashTableConfig};
pub use items::ItemsBuffer;
pub use letters::letter_count;
pub use stack::ExplicitStack;
pub use tree::{Node, Tree};
