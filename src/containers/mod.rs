//! The four linear containers
//!
//! Each container owns its elements outright and is only changed through its
//! own operations. Failed operations return a [`ContainerError`] and leave the
//! container untouched; the failure is also logged as a `tracing` warning so a
//! caller that ignores the result still leaves a trace.
//!
//! A rendering layer reads a container through [`Snapshot`], which hands out
//! an independent copy of the element sequence.
//!
//! [`ContainerError`]: crate::error::ContainerError

mod linked;
mod queue;
mod sequence;
mod stack;

pub use linked::{Iter as LinkedIter, LinkedContainer};
pub use queue::QueueContainer;
pub use sequence::SequenceContainer;
pub use stack::StackContainer;

/// Uniform read access used by whatever renders a container.
pub trait Snapshot<T> {
    /// Copy of the current contents in the container's natural order.
    fn elements(&self) -> Vec<T>;

    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn clear(&mut self);
}
