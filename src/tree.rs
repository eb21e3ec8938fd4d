//! An unbalanced BST that never recurses. Searching, inserting, and deleting walk the tree with a
//! cursor, while traversals and disposal walk it with an [`ExplicitStack`]. The tree only becomes
//! balanced when [`Tree::balance`] is called.
//!
//! # Examples
//!
//! ```
//! use iterbst::{ItemsBuffer, Tree};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.search(&'b'), None);
//!
//! tree.insert('b', 2);
//! tree.insert('a', 1);
//! tree.insert('c', 3);
//! assert_eq!(tree.search(&'b'), Some(&2));
//!
//! // Inserting a new value for the same key overwrites the value.
//! tree.insert('b', 20);
//! assert_eq!(tree.search(&'b'), Some(&20));
//! assert_eq!(tree.len(), 3);
//!
//! // Traversals record the nodes they visit.
//! let mut items = ItemsBuffer::new();
//! tree.preorder(&mut items).unwrap();
//! let keys: Vec<_> = items.iter().map(|node| *node.key()).collect();
//! assert_eq!(keys, ['b', 'a', 'c']);
//!
//! // Deleting a node returns its value.
//! assert_eq!(tree.delete(&'b'), Some(20));
//! assert_eq!(tree.search(&'b'), None);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ptr;

use crate::error::Result;
use crate::items::ItemsBuffer;
use crate::stack::ExplicitStack;

/// The slot a node lives in: either its parent's `left`/`right` or the tree's root. A slot is the
/// only owner of the node in it.
type Link<K, V> = Option<Box<Node<K, V>>>;

/// A `Node` has a key that is used for searching/sorting and a value that is associated with that
/// key. Its children are owned by the node itself.
pub struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn new_boxed(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
        })
    }

    /// The key this node is sorted by.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The value stored at this node's key.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The root of the subtree holding every smaller key.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the subtree holding every larger key.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

impl<K, V> fmt::Debug for Node<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Children are left out so formatting a deep tree doesn't recurse.
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// A Binary Search Tree. This can be used for inserting, searching, and deleting keys and values.
/// Keys are unique: inserting an existing key replaces its value.
pub struct Tree<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for Tree<K, V> {
    fn drop(&mut self) {
        // `Box`'s own drop would recurse once per level, which a degenerate tree can't afford.
        self.dispose();
    }
}

impl<K, V> Clone for Tree<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    fn clone(&self) -> Self {
        // Re-inserting keys in preorder reproduces the exact shape of the original.
        let mut tree = Self::new();
        for node in PreorderNodes::new(self.root()) {
            tree.insert(node.key.clone(), node.value.clone());
        }
        tree
    }
}

impl<K, V> fmt::Debug for Tree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Tree<K, V> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns the tree to its freshly constructed state. Any nodes it still holds are disposed of
    /// first, so re-initializing a populated tree doesn't leak.
    pub fn init(&mut self) {
        self.dispose();
    }

    /// How many keys are stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    /// How many levels are in the tree. An empty tree has a height of 0 and a lone root has a
    /// height of 1.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut to_visit = ExplicitStack::new();
        if let Some(root) = self.root() {
            to_visit.push((root, 1));
        }
        while let Some((node, depth)) = to_visit.pop() {
            height = height.max(depth);
            if let Some(left) = node.left() {
                to_visit.push((left, depth + 1));
            }
            if let Some(right) = node.right() {
                to_visit.push((right, depth + 1));
            }
        }
        height
    }

    /// Potentially finds the value associated with the given key in this tree. If no node has the
    /// corresponding key, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use iterbst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert('x', 2);
    ///
    /// assert_eq!(tree.search(&'x'), Some(&2));
    /// assert_eq!(tree.search(&'y'), None);
    /// ```
    pub fn search(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        let mut current = self.root();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Less => current = node.left(),
                Ordering::Equal => return Some(&node.value),
                Ordering::Greater => current = node.right(),
            }
        }
        None
    }

    /// Inserts the given value into the tree stored at the given key. Inserting a new value for an
    /// existing key overwrites its value in place and returns the old one; the shape of the tree
    /// doesn't change.
    ///
    /// # Examples
    ///
    /// ```
    /// use iterbst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert_eq!(tree.insert('k', 2), None);
    /// assert_eq!(tree.insert('k', 3), Some(2));
    /// assert_eq!(tree.search(&'k'), Some(&3));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Equal => return Some(mem::replace(&mut node.value, value)),
                Ordering::Greater => &mut node.right,
            };
        }

        *slot = Some(Node::new_boxed(key, value));
        self.len += 1;
        None
    }

    /// Deletes the node containing the given key from the tree and returns its value. If the tree
    /// does not contain a node with the key, nothing happens.
    ///
    /// A node with two children isn't unlinked itself. Instead it takes the key and value of its
    /// predecessor (the rightmost node of its left subtree), and the predecessor, which has no
    /// right child, is unlinked in its place.
    ///
    /// # Examples
    ///
    /// ```
    /// use iterbst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert('d', 4);
    ///
    /// assert_eq!(tree.delete(&'d'), Some(4));
    /// assert_eq!(tree.delete(&'d'), None);
    /// assert!(tree.is_empty());
    /// ```
    pub fn delete(&mut self, key: &K) -> Option<V>
    where
        K: Ord,
    {
        // Walk down to the slot owning the target. Running off the bottom means it isn't here.
        let mut slot = &mut self.root;
        loop {
            match key.cmp(&slot.as_ref()?.key) {
                Ordering::Less => slot = &mut slot.as_mut()?.left,
                Ordering::Equal => break,
                Ordering::Greater => slot = &mut slot.as_mut()?.right,
            }
        }

        let target = slot.as_mut()?;
        let removed = if target.left.is_some() && target.right.is_some() {
            let mut rightmost = &mut target.left;
            while rightmost.as_ref().map_or(false, |node| node.right.is_some()) {
                rightmost = &mut rightmost.as_mut()?.right;
            }

            let mut predecessor = rightmost.take()?;
            *rightmost = predecessor.left.take();

            mem::swap(&mut target.key, &mut predecessor.key);
            mem::swap(&mut target.value, &mut predecessor.value);
            predecessor
        } else {
            let mut removed = slot.take()?;
            *slot = removed.left.take().or_else(|| removed.right.take());
            removed
        };

        self.len -= 1;
        Some(removed.value)
    }

    /// Releases every node in the tree, leaving it empty.
    ///
    /// Nodes are released in postorder: a node is only dropped once both of its children have
    /// been. Detaching a child from its parent's slot as we descend is what marks it as handled.
    pub fn dispose(&mut self) {
        let Some(root) = self.root.take() else {
            return;
        };

        let mut released = 0usize;
        let mut to_release = ExplicitStack::new();
        to_release.push(root);
        while let Some(top) = to_release.top_mut() {
            if let Some(left) = top.left.take() {
                to_release.push(left);
            } else if let Some(right) = top.right.take() {
                to_release.push(right);
            } else {
                drop(to_release.pop());
                released += 1;
            }
        }

        self.len = 0;
        log::trace!("disposed of {released} nodes");
    }

    /// Records every node in preorder (node, left subtree, right subtree).
    ///
    /// # Errors
    ///
    /// [`Error::Alloc`][crate::Error::Alloc] if `items` can't grow. Nodes recorded before the
    /// failure are left in `items`.
    pub fn preorder<'a>(&'a self, items: &mut ItemsBuffer<&'a Node<K, V>>) -> Result<()> {
        PreorderNodes::new(self.root()).try_for_each(|node| items.push(node))
    }

    /// Records every node in inorder (left subtree, node, right subtree), which is ascending key
    /// order.
    ///
    /// # Errors
    ///
    /// [`Error::Alloc`][crate::Error::Alloc] if `items` can't grow.
    pub fn inorder<'a>(&'a self, items: &mut ItemsBuffer<&'a Node<K, V>>) -> Result<()> {
        InorderNodes::new(self.root()).try_for_each(|node| items.push(node))
    }

    /// Records every node in postorder (left subtree, right subtree, node).
    ///
    /// # Errors
    ///
    /// [`Error::Alloc`][crate::Error::Alloc] if `items` can't grow.
    pub fn postorder<'a>(&'a self, items: &mut ItemsBuffer<&'a Node<K, V>>) -> Result<()> {
        PostorderNodes::new(self.root()).try_for_each(|node| items.push(node))
    }

    /// Iterates keys and values in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter(InorderNodes::new(self.root()))
    }

    /// Rebuilds the tree so that, for every node, the heights of its two subtrees differ by at
    /// most one. Keys and values are untouched and no node is reallocated: the existing nodes are
    /// only relinked.
    ///
    /// # Errors
    ///
    /// [`Error::Alloc`][crate::Error::Alloc] if the scratch buffer for the nodes can't be
    /// allocated. The tree is left exactly as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use iterbst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in 1..=5 {
    ///     tree.insert(key, ());
    /// }
    /// assert_eq!(tree.height(), 5);
    ///
    /// tree.balance().unwrap();
    /// assert_eq!(tree.height(), 3);
    /// assert_eq!(tree.root().map(|root| *root.key()), Some(3));
    /// ```
    pub fn balance(&mut self) -> Result<()> {
        if self.root.is_none() {
            return Ok(());
        }

        // Reserved up front so that nothing below can fail once the tree is being taken apart.
        let mut sorted = ItemsBuffer::with_capacity(self.len)?;

        // An inorder walk that detaches each node from its slot as it is recorded.
        let mut to_visit = ExplicitStack::new();
        let mut current = self.root.take();
        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                to_visit.push(node);
            }
            let Some(mut node) = to_visit.pop() else {
                break;
            };
            current = node.right.take();
            sorted.push(node)?;
        }

        let count = sorted.count();
        self.root = build_balanced(count, &mut sorted.into_iter());
        log::trace!("rebalanced {count} nodes to height {}", self.height());
        Ok(())
    }
}

/// Links the next `count` nodes of `sorted` into a balanced subtree and returns its root.
///
/// The root is the floor of the midpoint, so the left half is never larger than the right half.
/// Recursion only goes `O(lg count)` deep.
fn build_balanced<K, V, I>(count: usize, sorted: &mut I) -> Link<K, V>
where
    I: Iterator<Item = Box<Node<K, V>>>,
{
    if count == 0 {
        return None;
    }

    let left_count = (count - 1) / 2;
    let left = build_balanced(left_count, sorted);
    let mut root = sorted.next()?;
    root.left = left;
    root.right = build_balanced(count - left_count - 1, sorted);
    Some(root)
}

/// Visits each node before its subtrees. Right children are stacked for later while the walk
/// keeps descending left.
struct PreorderNodes<'a, K, V> {
    current: Option<&'a Node<K, V>>,
    to_visit: ExplicitStack<&'a Node<K, V>>,
}

impl<'a, K, V> PreorderNodes<'a, K, V> {
    fn new(root: Option<&'a Node<K, V>>) -> Self {
        Self {
            current: root,
            to_visit: ExplicitStack::new(),
        }
    }
}

impl<'a, K, V> Iterator for PreorderNodes<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = match self.current.take() {
            Some(node) => node,
            None => self.to_visit.pop()?,
        };
        if let Some(right) = node.right() {
            self.to_visit.push(right);
        }
        self.current = node.left();
        Some(node)
    }
}

/// Visits nodes in ascending key order. The stack holds the ancestors whose left subtree is still
/// being walked.
struct InorderNodes<'a, K, V> {
    to_visit: ExplicitStack<&'a Node<K, V>>,
}

impl<'a, K, V> InorderNodes<'a, K, V> {
    fn new(root: Option<&'a Node<K, V>>) -> Self {
        let mut nodes = Self {
            to_visit: ExplicitStack::new(),
        };
        nodes.push_leftmost(root);
        nodes
    }

    fn push_leftmost(&mut self, mut current: Option<&'a Node<K, V>>) {
        while let Some(node) = current {
            self.to_visit.push(node);
            current = node.left();
        }
    }
}

impl<'a, K, V> Iterator for InorderNodes<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.to_visit.pop()?;
        self.push_leftmost(node.right());
        Some(node)
    }
}

/// Visits each node after both of its subtrees. When the top of the stack has a right child, the
/// last visited node tells us whether that right subtree is done yet.
struct PostorderNodes<'a, K, V> {
    current: Option<&'a Node<K, V>>,
    last_visited: Option<&'a Node<K, V>>,
    to_visit: ExplicitStack<&'a Node<K, V>>,
}

impl<'a, K, V> PostorderNodes<'a, K, V> {
    fn new(root: Option<&'a Node<K, V>>) -> Self {
        Self {
            current: root,
            last_visited: None,
            to_visit: ExplicitStack::new(),
        }
    }
}

impl<'a, K, V> Iterator for PostorderNodes<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while let Some(node) = self.current {
                self.to_visit.push(node);
                self.current = node.left();
            }

            let top = *self.to_visit.top()?;
            match top.right() {
                Some(right) if !self.last_visited.map_or(false, |last| ptr::eq(last, right)) => {
                    self.current = Some(right);
                }
                _ => {
                    self.to_visit.pop();
                    self.last_visited = Some(top);
                    return Some(top);
                }
            }
        }
    }
}

/// An iterator over the keys and values of a [`Tree`], in ascending key order.
pub struct Iter<'a, K, V>(InorderNodes<'a, K, V>);

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|node| (&node.key, &node.value))
    }
}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
