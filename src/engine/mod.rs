//! Execution engine for Linvis commands

pub mod executor;

pub use executor::{
    execute_command, explain_command, ExecutionContext, ExecutionResult, ResultData,
    StructureInfo, StructureView,
};
