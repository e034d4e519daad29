//! LIFO stack, top at the last position

use tracing::warn;

use super::Snapshot;
use crate::error::ContainerError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackContainer<T> {
    data: Vec<T>,
}

impl<T> StackContainer<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create a stack whose top is the last element of `initial`.
    pub fn from_elements(initial: impl IntoIterator<Item = T>) -> Self {
        Self {
            data: initial.into_iter().collect(),
        }
    }

    pub fn push(&mut self, element: T) {
        self.data.push(element);
    }

    pub fn pop(&mut self) -> Result<T, ContainerError> {
        self.data.pop().ok_or_else(|| empty("pop"))
    }

    pub fn peek(&self) -> Result<&T, ContainerError> {
        self.data.last().ok_or_else(|| empty("peek"))
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Bottom-to-top iterator.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

fn empty(op: &'static str) -> ContainerError {
    let err = ContainerError::Empty { op };
    warn!(target: "linvis::containers::stack", "{}", err);
    err
}

impl<T> Default for StackContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Snapshot<T> for StackContainer<T> {
    fn elements(&self) -> Vec<T> {
        self.data.clone()
    }

    fn size(&self) -> usize {
        self.data.len()
    }

    fn clear(&mut self) {
        self.data.clear();
    }
}

impl<T> FromIterator<T> for StackContainer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}

impl<T> Extend<T> for StackContainer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_push_pop_peek() {
        let mut stack = StackContainer::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);
        assert_eq!(stack.pop(), Ok(3));
        assert_eq!(stack.peek(), Ok(&2));
        assert_eq!(stack.size(), 2);
    }

    #[test]
    fn test_empty_stack_errors() {
        let mut stack = StackContainer::<char>::new();
        assert_eq!(stack.pop(), Err(ContainerError::Empty { op: "pop" }));
        assert_eq!(stack.peek(), Err(ContainerError::Empty { op: "peek" }));
        assert_eq!(stack.size(), 0);
    }

    #[test]
    fn test_drain_in_reverse_order() {
        let mut stack: StackContainer<_> = (0..5).collect();
        let drained: Vec<_> = std::iter::from_fn(|| stack.pop().ok()).collect();
        assert_eq!(drained, vec![4, 3, 2, 1, 0]);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_elements_bottom_to_top() {
        let stack = StackContainer::from_elements(["a", "b"]);
        assert_eq!(stack.elements(), vec!["a", "b"]);
        assert_eq!(stack.peek(), Ok(&"b"));
    }

    #[test]
    fn test_clear_twice() {
        let mut stack = StackContainer::from_elements([1, 2]);
        stack.clear();
        assert_eq!(stack.size(), 0);
        stack.clear();
        assert_eq!(stack.size(), 0);
    }
}
