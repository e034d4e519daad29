//! FIFO queue, front at position 0

use std::collections::VecDeque;

use tracing::warn;

use super::Snapshot;
use crate::error::ContainerError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueContainer<T> {
    data: VecDeque<T>,
}

impl<T> QueueContainer<T> {
    pub fn new() -> Self {
        Self {
            data: VecDeque::new(),
        }
    }

    /// Create a queue whose front is the first element of `initial`.
    pub fn from_elements(initial: impl IntoIterator<Item = T>) -> Self {
        Self {
            data: initial.into_iter().collect(),
        }
    }

    pub fn enqueue(&mut self, element: T) {
        self.data.push_back(element);
    }

    /// Remove and return the front element.
    pub fn dequeue(&mut self) -> Result<T, ContainerError> {
        self.data.pop_front().ok_or_else(|| empty("dequeue"))
    }

    pub fn front(&self) -> Result<&T, ContainerError> {
        self.data.front().ok_or_else(|| empty("front"))
    }

    pub fn rear(&self) -> Result<&T, ContainerError> {
        self.data.back().ok_or_else(|| empty("rear"))
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

    /// Front-to-rear iterator.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.data.iter()
    }
}

fn empty(op: &'static str) -> ContainerError {
    let err = ContainerError::Empty { op };
    warn!(target: "linvis::containers::queue", "{}", err);
    err
}

impl<T> Default for QueueContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Snapshot<T> for QueueContainer<T> {
    fn elements(&self) -> Vec<T> {
        self.data.iter().cloned().collect()
    }

    fn size(&self) -> usize {
        self.data.len()
    }

    fn clear(&mut self) {
        self.data.clear();
    }
}

impl<T> FromIterator<T> for QueueContainer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}

impl<T> Extend<T> for QueueContainer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dequeue_empty_then_fifo() {
        let mut queue = QueueContainer::new();
        assert_eq!(queue.dequeue(), Err(ContainerError::Empty { op: "dequeue" }));
        queue.enqueue(5);
        queue.enqueue(6);
        assert_eq!(queue.dequeue(), Ok(5));
        assert_eq!(queue.front(), Ok(&6));
    }

    #[test]
    fn test_peeks_on_empty_queue() {
        let queue = QueueContainer::<i32>::new();
        assert!(queue.front().is_err());
        assert!(queue.rear().is_err());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_front_and_rear() {
        let queue = QueueContainer::from_elements(["a", "b", "c"]);
        assert_eq!(queue.front(), Ok(&"a"));
        assert_eq!(queue.rear(), Ok(&"c"));
        assert_eq!(queue.size(), 3);
    }

    #[test]
    fn test_drain_in_insertion_order() {
        let mut queue = QueueContainer::new();
        for i in 0..5 {
            queue.enqueue(i);
        }
        let drained: Vec<_> = std::iter::from_fn(|| queue.dequeue().ok()).collect();
        assert_eq!(drained, vec![0, 1, 2, 3, 4]);
        assert_eq!(queue.size(), 0);
    }

    #[test]
    fn test_elements_front_to_rear_copy() {
        let mut queue = QueueContainer::from_elements([1, 2, 3]);
        queue.dequeue().unwrap();
        queue.enqueue(4);
        let mut snapshot = queue.elements();
        assert_eq!(snapshot, vec![2, 3, 4]);
        snapshot.clear();
        assert_eq!(queue.size(), 3);
    }

    #[test]
    fn test_clear_twice() {
        let mut queue = QueueContainer::from_elements([1]);
        queue.clear();
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.size(), 0);
    }
}
