//! Singly linked list with head/tail tracking
//!
//! Every node is owned by exactly one predecessor, the head node by the
//! container itself. Links only ever point forward, so the chain cannot form a
//! cycle. `tail` is a second, non-owning pointer to the last node that exists
//! only to make [`LinkedContainer::append`] O(1).
//!
//! Owning links are `NonNull` pointers to `Box` allocations rather than
//! `Box<Node<T>>` values. A `Box` asserts unique access to its node every time
//! it is moved, which would invalidate `tail` whenever the last node's owner
//! changes hands. With raw links the owning link and `tail` are plain copies of
//! the same pointer. A node is allocated in [`Node::alloc`] and freed in
//! [`Node::free`] exactly once, when it is unlinked or the chain is cleared.
//!
//! Invariants kept by every operation:
//! - `head.is_none()` iff `count == 0` iff `tail.is_none()`
//! - walking `count` links from `head` ends on `tail`, whose `next` is `None`

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use tracing::warn;

use super::Snapshot;
use crate::error::ContainerError;

type Link<T> = Option<NonNull<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

impl<T> Node<T> {
    /// Heap-allocate a node. The returned pointer owns the allocation until it
    /// is handed back to [`Node::free`].
    fn alloc(value: T, next: Link<T>) -> NonNull<Node<T>> {
        NonNull::from(Box::leak(Box::new(Node { value, next })))
    }

    /// # Safety
    ///
    /// `node` must come from [`Node::alloc`] and must no longer be reachable
    /// from any chain.
    unsafe fn free(node: NonNull<Node<T>>) -> Node<T> {
        *Box::from_raw(node.as_ptr())
    }
}

pub struct LinkedContainer<T> {
    head: Link<T>,
    tail: Link<T>,
    count: usize,
    marker: PhantomData<Box<Node<T>>>,
}

impl<T> LinkedContainer<T> {
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            count: 0,
            marker: PhantomData,
        }
    }

    /// Build a chain by appending each element of `initial` in order.
    pub fn from_elements(initial: impl IntoIterator<Item = T>) -> Self {
        let mut list = Self::new();
        list.extend(initial);
        list
    }

    /// Link a new node after the current tail.
    pub fn append(&mut self, element: T) {
        let node = Node::alloc(element, None);
        match self.tail {
            // SAFETY: `tail` is the live last node of the chain owned by `self`,
            // and `&mut self` rules out any outstanding borrow into it.
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.count += 1;
    }

    /// Insert `element` so that it ends up at `index`. Valid range is `[0, count]`.
    pub fn insert(&mut self, index: usize, element: T) -> Result<(), ContainerError> {
        if index > self.count {
            return Err(bounds("insert", index, self.count));
        }
        if index == self.count {
            self.append(element);
            return Ok(());
        }

        if index == 0 {
            self.head = Some(Node::alloc(element, self.head));
        } else {
            let Some(prev) = self.node_at(index - 1) else {
                return Err(bounds("insert", index, self.count));
            };
            // SAFETY: `prev` is a live node of this chain and `index < count`
            // means it is not the tail, so `tail` stays correct.
            unsafe {
                let prev = prev.as_ptr();
                (*prev).next = Some(Node::alloc(element, (*prev).next));
            }
        }
        self.count += 1;
        Ok(())
    }

    /// Unlink the node at `index` and return its value.
    pub fn delete(&mut self, index: usize) -> Result<T, ContainerError> {
        if index >= self.count {
            return Err(bounds("delete", index, self.count));
        }

        let target = if index == 0 {
            let Some(head) = self.head else {
                return Err(bounds("delete", index, self.count));
            };
            // SAFETY: `head` is live; its successor becomes the new head.
            self.head = unsafe { head.as_ref().next };
            if self.head.is_none() {
                self.tail = None;
            }
            head
        } else {
            let Some(prev) = self.node_at(index - 1) else {
                return Err(bounds("delete", index, self.count));
            };
            // SAFETY: `prev` is live and `index < count` guarantees a successor.
            let Some(target) = (unsafe { prev.as_ref().next }) else {
                return Err(bounds("delete", index, self.count));
            };
            // SAFETY: both nodes are live; bypass `target` in the chain.
            unsafe { (*prev.as_ptr()).next = target.as_ref().next };
            if self.tail == Some(target) {
                self.tail = Some(prev);
            }
            target
        };

        self.count -= 1;
        // SAFETY: `target` came from `Node::alloc` and was just unlinked.
        let node = unsafe { Node::free(target) };
        Ok(node.value)
    }

    /// Index of the first element equal to `element`.
    pub fn find(&self, element: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|value| value == element)
    }

    /// Walk `index` links from the head.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    pub fn size(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Drop every node. The chain is released iteratively.
    pub fn clear(&mut self) {
        let mut current = self.head.take();
        self.tail = None;
        self.count = 0;
        while let Some(node) = current {
            // SAFETY: `head` was detached above, so every node on this walk is
            // unreachable from the container and freed exactly once.
            let node = unsafe { Node::free(node) };
            current = node.next;
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head,
            remaining: self.count,
            marker: PhantomData,
        }
    }

    fn node_at(&self, index: usize) -> Link<T> {
        let mut current = self.head;
        for _ in 0..index {
            // SAFETY: every pointer reached from `head` is a live node.
            current = unsafe { current?.as_ref().next };
        }
        current
    }

    #[cfg(test)]
    fn assert_invariants(&self) {
        assert_eq!(self.head.is_none(), self.count == 0);
        assert_eq!(self.tail.is_none(), self.count == 0);
        let mut last = None;
        let mut current = self.head;
        let mut walked = 0;
        while let Some(node) = current {
            walked += 1;
            last = Some(node);
            current = unsafe { node.as_ref().next };
        }
        assert_eq!(walked, self.count);
        assert_eq!(last, self.tail);
    }
}

fn bounds(op: &'static str, index: usize, len: usize) -> ContainerError {
    let err = ContainerError::out_of_bounds(op, index, len);
    warn!(target: "linvis::containers::linked", "{}", err);
    err
}

impl<T> Drop for LinkedContainer<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for LinkedContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedContainer<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedContainer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedContainer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedContainer<T> {}

// SAFETY: the container owns its nodes exactly like `Box<Node<T>>` would.
unsafe impl<T: Send> Send for LinkedContainer<T> {}
// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync> Sync for LinkedContainer<T> {}

impl<T: Clone> Snapshot<T> for LinkedContainer<T> {
    fn elements(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    fn size(&self) -> usize {
        self.count
    }

    fn clear(&mut self) {
        LinkedContainer::clear(self);
    }
}

impl<T> FromIterator<T> for LinkedContainer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}

impl<T> Extend<T> for LinkedContainer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.append(element);
        }
    }
}

impl<'a, T> IntoIterator for &'a LinkedContainer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Borrowing iterator over the values of a [`LinkedContainer`], head first.
pub struct Iter<'a, T> {
    next: Link<T>,
    remaining: usize,
    marker: PhantomData<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.next?;
        // SAFETY: the container is borrowed for `'a`, so no node is freed or
        // mutated while this iterator is alive.
        let node = unsafe { &*node.as_ptr() };
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}
