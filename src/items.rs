//! An ordered buffer that traversals append visited nodes to.

use std::ops::Index;
use std::slice;

use crate::error::Result;

/// The output of a traversal: nodes in the order they were visited.
///
/// For the public traversals this holds borrowed `&Node`s, so it only observes the tree and
/// dropping it leaves the nodes untouched. Growth is fallible: running out of memory while
/// recording a traversal is reported as [`Error::Alloc`][crate::Error::Alloc] instead of aborting.
#[derive(Debug)]
pub struct ItemsBuffer<T> {
    nodes: Vec<T>,
}

impl<T> Default for ItemsBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ItemsBuffer<T> {
    /// Generates a new, empty buffer. Nothing is allocated until the first push.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Generates an empty buffer that can hold `capacity` items without growing again.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut nodes = Vec::new();
        nodes.try_reserve_exact(capacity)?;
        Ok(Self { nodes })
    }

    /// Appends an item, growing the buffer if it's full.
    pub fn push(&mut self, item: T) -> Result<()> {
        if self.nodes.len() == self.nodes.capacity() {
            self.nodes.try_reserve(1)?;
        }
        self.nodes.push(item);
        Ok(())
    }

    /// How many items have been recorded.
    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    /// How many items fit before the buffer must grow.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The recorded items, in visiting order.
    pub fn as_slice(&self) -> &[T] {
        &self.nodes
    }

    /// Iterates the recorded items in visiting order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.nodes.iter()
    }

    /// Forgets every recorded item but keeps the allocation for reuse.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<T> Index<usize> for ItemsBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.nodes[index]
    }
}

impl<T> IntoIterator for ItemsBuffer<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ItemsBuffer<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
