//! Array-backed list with arbitrary-index insert, delete and update

use tracing::warn;

use super::Snapshot;
use crate::error::ContainerError;

/// Contiguous ordered storage. Valid indices are always `[0, size)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceContainer<T> {
    data: Vec<T>,
}

impl<T> SequenceContainer<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create a container holding `initial` in order.
    pub fn from_elements(initial: impl IntoIterator<Item = T>) -> Self {
        Self {
            data: initial.into_iter().collect(),
        }
    }

    /// Insert `element` so that it ends up at `index`. `index == size` appends.
    pub fn insert(&mut self, index: usize, element: T) -> Result<(), ContainerError> {
        if index > self.data.len() {
            return Err(bounds("insert", index, self.data.len()));
        }
        self.data.insert(index, element);
        Ok(())
    }

    /// Remove and return the element at `index`.
    pub fn delete(&mut self, index: usize) -> Result<T, ContainerError> {
        if index >= self.data.len() {
            return Err(bounds("delete", index, self.data.len()));
        }
        Ok(self.data.remove(index))
    }

    /// Replace the element at `index`, returning the old one.
    pub fn update(&mut self, index: usize, element: T) -> Result<T, ContainerError> {
        match self.data.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, element)),
            None => Err(bounds("update", index, self.data.len())),
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Index of the first element equal to `element`.
    pub fn find(&self, element: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.data.iter().position(|e| e == element)
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> Default for SequenceContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn bounds(op: &'static str, index: usize, len: usize) -> ContainerError {
    let err = ContainerError::out_of_bounds(op, index, len);
    warn!(target: "linvis::containers::sequence", "{}", err);
    err
}

impl<T: Clone> Snapshot<T> for SequenceContainer<T> {
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

impl<T> FromIterator<T> for SequenceContainer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}

impl<T> Extend<T> for SequenceContainer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}
