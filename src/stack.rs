//! A growable LIFO stack used as scratch space by the iterative tree algorithms.
//!
//! Every traversal and the disposal of a [`Tree`][crate::Tree] walk the tree with one of these
//! instead of the call stack, so a degenerate tree (one long chain) costs heap space rather than
//! overflowing the thread's stack. A stack never outlives the call that created it.

/// A last-in, first-out stack. It holds whatever the algorithm needs to come back to: borrowed
/// nodes for traversals, owned nodes while disposing.
#[derive(Debug)]
pub struct ExplicitStack<T> {
    data: Vec<T>,
}

impl<T> Default for ExplicitStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ExplicitStack<T> {
    /// Generates a new, empty stack.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Pushes `value` on top of the stack.
    pub fn push(&mut self, value: T) {
        self.data.push(value);
    }

    /// Removes and returns the top of the stack, or `None` if it is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.data.pop()
    }

    /// Peeks at the top of the stack without removing it.
    pub fn top(&self) -> Option<&T> {
        self.data.last()
    }

    /// Mutable peek at the top of the stack.
    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.data.last_mut()
    }

    /// How many values are on the stack.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the stack holds nothing.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
