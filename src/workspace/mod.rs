//! Workspace module: the named structures a session works on
//!
//! A workspace holds:
//! - any number of named structures, one of them active
//! - a `main` structure that always exists
//! - the history of executed statements

mod manager;
mod structure;

pub use manager::{HistoryEntry, Workspace, MAIN_STRUCTURE};
pub use structure::{Container, Structure};
