//! Workspace of named structures
//!
//! The workspace handles creating, switching between and dropping
//! structures. It always keeps a `main` structure, and records every executed
//! statement in a timestamped history.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::structure::Structure;
use crate::error::{LinvisError, Result};
use crate::parser::{StructureKind, Value};

/// Name of the structure every workspace starts with
pub const MAIN_STRUCTURE: &str = "main";

/// One executed statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Structure the statement ran against
    pub structure: String,
    /// Statement in source form
    pub action: String,
    /// Whether the container accepted it
    pub accepted: bool,
    pub timestamp: DateTime<Utc>,
}

/// Named structures plus the currently active one
#[derive(Debug)]
pub struct Workspace {
    structures: HashMap<String, Structure>,
    active: String,
    history: Vec<HistoryEntry>,
}

impl Workspace {
    /// Create a workspace whose `main` structure is an empty array
    pub fn new() -> Self {
        Self::with_main(StructureKind::Array, Vec::new())
    }

    /// Create a workspace whose `main` structure has the given kind and contents
    pub fn with_main(kind: StructureKind, initial: Vec<Value>) -> Self {
        let mut structures = HashMap::new();
        structures.insert(
            MAIN_STRUCTURE.to_string(),
            Structure::new(MAIN_STRUCTURE.to_string(), kind, initial),
        );

        Self {
            structures,
            active: MAIN_STRUCTURE.to_string(),
            history: Vec::new(),
        }
    }

    /// Create a new structure and make it active
    pub fn create(
        &mut self,
        name: &str,
        kind: StructureKind,
        initial: Vec<Value>,
    ) -> Result<&mut Structure> {
        if self.structures.contains_key(name) {
            return Err(LinvisError::DuplicateStructure(name.to_string()));
        }

        debug!(name, %kind, size = initial.len(), "creating structure");
        self.active = name.to_string();
        Ok(self
            .structures
            .entry(name.to_string())
            .or_insert_with(|| Structure::new(name.to_string(), kind, initial)))
    }

    /// Switch to a different structure
    pub fn switch(&mut self, name: &str) -> Result<()> {
        if !self.structures.contains_key(name) {
            return Err(LinvisError::UnknownStructure(name.to_string()));
        }

        debug!(from = %self.active, to = name, "switching structure");
        self.active = name.to_string();
        Ok(())
    }

    /// Drop a structure (the `main` structure cannot be dropped)
    pub fn destroy(&mut self, name: &str) -> Result<()> {
        if name == MAIN_STRUCTURE {
            return Err(LinvisError::ExecutionError(
                "Cannot drop the main structure".to_string(),
            ));
        }

        if self.structures.remove(name).is_none() {
            return Err(LinvisError::UnknownStructure(name.to_string()));
        }

        // Dropping the active structure falls back to main
        if self.active == name {
            self.active = MAIN_STRUCTURE.to_string();
        }

        debug!(name, "dropped structure");
        Ok(())
    }

    /// All structure names, sorted
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.structures.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn active(&self) -> Result<&Structure> {
        self.structures
            .get(&self.active)
            .ok_or_else(|| LinvisError::UnknownStructure(self.active.clone()))
    }

    pub fn active_mut(&mut self) -> Result<&mut Structure> {
        self.structures
            .get_mut(&self.active)
            .ok_or_else(|| LinvisError::UnknownStructure(self.active.clone()))
    }

    pub fn active_name(&self) -> &str {
        &self.active
    }

    pub fn get(&self, name: &str) -> Option<&Structure> {
        self.structures.get(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.structures.contains_key(name)
    }

    pub fn count(&self) -> usize {
        self.structures.len()
    }

    /// Append a statement to the history
    pub fn record(&mut self, structure: &str, action: String, accepted: bool) {
        self.history.push(HistoryEntry {
            structure: structure.to_string(),
            action,
            accepted,
            timestamp: Utc::now(),
        });
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_workspace_new() {
        let ws = Workspace::new();
        assert_eq!(ws.count(), 1);
        assert!(ws.exists(MAIN_STRUCTURE));
        assert_eq!(ws.active_name(), MAIN_STRUCTURE);
        assert_eq!(ws.active().unwrap().kind(), StructureKind::Array);
    }

    #[test]
    fn test_with_main_seeds_contents() {
        let ws = Workspace::with_main(StructureKind::Stack, vec![Value::Int(1), Value::Int(2)]);
        let main = ws.active().unwrap();
        assert_eq!(main.kind(), StructureKind::Stack);
        assert_eq!(main.size(), 2);
    }

    #[test]
    fn test_create_activates() {
        let mut ws = Workspace::new();
        ws.create("q", StructureKind::Queue, Vec::new()).unwrap();
        assert_eq!(ws.count(), 2);
        assert_eq!(ws.active_name(), "q");
    }

    #[test]
    fn test_create_duplicate() {
        let mut ws = Workspace::new();
        ws.create("q", StructureKind::Queue, Vec::new()).unwrap();
        let result = ws.create("q", StructureKind::Stack, Vec::new());
        assert!(matches!(result, Err(LinvisError::DuplicateStructure(_))));
        assert_eq!(ws.get("q").unwrap().kind(), StructureKind::Queue);
    }

    #[test]
    fn test_switch() {
        let mut ws = Workspace::new();
        ws.create("s", StructureKind::Stack, Vec::new()).unwrap();
        ws.switch(MAIN_STRUCTURE).unwrap();
        assert_eq!(ws.active_name(), MAIN_STRUCTURE);
        assert!(ws.switch("missing").is_err());
        assert_eq!(ws.active_name(), MAIN_STRUCTURE);
    }

    #[test]
    fn test_destroy_main() {
        let mut ws = Workspace::new();
        assert!(ws.destroy(MAIN_STRUCTURE).is_err());
        assert!(ws.exists(MAIN_STRUCTURE));
    }

    #[test]
    fn test_destroy_active_falls_back_to_main() {
        let mut ws = Workspace::new();
        ws.create("tmp", StructureKind::List, Vec::new()).unwrap();
        ws.destroy("tmp").unwrap();
        assert_eq!(ws.active_name(), MAIN_STRUCTURE);
        assert!(!ws.exists("tmp"));
        assert!(matches!(ws.destroy("tmp"), Err(LinvisError::UnknownStructure(_))));
    }

    #[test]
    fn test_list_sorted() {
        let mut ws = Workspace::new();
        ws.create("zeta", StructureKind::List, Vec::new()).unwrap();
        ws.create("alpha", StructureKind::Queue, Vec::new()).unwrap();
        assert_eq!(ws.list(), vec!["alpha", "main", "zeta"]);
    }

    #[test]
    fn test_record_history() {
        let mut ws = Workspace::new();
        ws.record("main", "APPEND 1".to_string(), true);
        ws.record("main", "DELETE AT 9".to_string(), false);
        assert_eq!(ws.history().len(), 2);
        assert!(!ws.history()[1].accepted);
    }
}
