//! A named structure: one container plus its bookkeeping

use chrono::{DateTime, Utc};

use crate::containers::{
    LinkedContainer, QueueContainer, SequenceContainer, Snapshot, StackContainer,
};
use crate::parser::{StructureKind, Value};

/// One of the four containers, holding command-language values
#[derive(Debug, Clone)]
pub enum Container {
    Array(SequenceContainer<Value>),
    List(LinkedContainer<Value>),
    Queue(QueueContainer<Value>),
    Stack(StackContainer<Value>),
}

impl Container {
    /// Build an empty container of `kind`, then fill it in order
    pub fn new(kind: StructureKind, initial: impl IntoIterator<Item = Value>) -> Self {
        match kind {
            StructureKind::Array => Container::Array(initial.into_iter().collect()),
            StructureKind::List => Container::List(initial.into_iter().collect()),
            StructureKind::Queue => Container::Queue(initial.into_iter().collect()),
            StructureKind::Stack => Container::Stack(initial.into_iter().collect()),
        }
    }

    pub fn kind(&self) -> StructureKind {
        match self {
            Container::Array(_) => StructureKind::Array,
            Container::List(_) => StructureKind::List,
            Container::Queue(_) => StructureKind::Queue,
            Container::Stack(_) => StructureKind::Stack,
        }
    }

    pub fn snapshot(&self) -> &dyn Snapshot<Value> {
        match self {
            Container::Array(c) => c,
            Container::List(c) => c,
            Container::Queue(c) => c,
            Container::Stack(c) => c,
        }
    }

    pub fn snapshot_mut(&mut self) -> &mut dyn Snapshot<Value> {
        match self {
            Container::Array(c) => c,
            Container::List(c) => c,
            Container::Queue(c) => c,
            Container::Stack(c) => c,
        }
    }
}

/// A container registered in a workspace under a name
#[derive(Debug, Clone)]
pub struct Structure {
    /// Unique name within the workspace
    pub name: String,
    pub container: Container,
    /// When the structure was created
    pub created_at: DateTime<Utc>,
}

impl Structure {
    pub fn new(name: String, kind: StructureKind, initial: Vec<Value>) -> Self {
        Self {
            name,
            container: Container::new(kind, initial),
            created_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> StructureKind {
        self.container.kind()
    }

    /// Independent copy of the current contents
    pub fn elements(&self) -> Vec<Value> {
        self.container.snapshot().elements()
    }

    pub fn size(&self) -> usize {
        self.container.snapshot().size()
    }
}
