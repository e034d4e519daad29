//! Script execution module for Linvis
//!
//! Handles loading, validating, and executing .lvs script files.

pub mod runner;
pub mod validator;

pub use runner::{explain_script, load_script, ScriptResult, ScriptRunner, SCRIPT_EXTENSION};
pub use validator::{
    has_errors, has_warnings, validate_script, ScriptValidationError, ValidationOptions,
    ValidationSeverity,
};
