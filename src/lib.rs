//! Linvis - linear data structures you can drive one statement at a time
//!
//! Linvis provides four generic containers (a growable array, a singly linked
//! list, a FIFO queue and a LIFO stack) plus a small command language that
//! runs operations against named structures and renders their contents after
//! every step.
//!
//! # Example
//!
//! ```
//! use linvis::{execute_command, format_output, parse_command, ExecutionContext, OutputFormat, Workspace};
//!
//! let mut workspace = Workspace::new();
//! let ctx = ExecutionContext::default();
//! for statement in ["CREATE STACK s", "PUSH 1", "PUSH 2", "POP"] {
//!     let cmd = parse_command(statement).unwrap();
//!     let result = execute_command(&cmd, &ctx, &mut workspace).unwrap();
//!     println!("{}", format_output(&result, &OutputFormat::Human));
//! }
//! assert_eq!(workspace.active().unwrap().size(), 1);
//! ```

pub mod cli;
pub mod containers;
pub mod engine;
pub mod error;
pub mod output;
pub mod parser;
pub mod repl;
pub mod script;
pub mod workspace;

pub use containers::{LinkedContainer, QueueContainer, SequenceContainer, Snapshot, StackContainer};
pub use engine::{execute_command, ExecutionContext, ExecutionResult, ResultData};
pub use error::{ContainerError, LinvisError, Result};
pub use output::{format_output, OutputFormat};
pub use parser::{parse_command, parse_script, Command, Script, StructureKind, Value};
pub use script::{validate_script, ScriptResult, ScriptRunner};
pub use workspace::Workspace;
