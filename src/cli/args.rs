//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::parser::{StructureKind, Value};

#[derive(Parser)]
#[command(name = "linvis")]
#[command(author, version, about = "Drive arrays, linked lists, queues and stacks step by step", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: SubCommand,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log filter, e.g. `warn` or `linvis=debug`
    #[arg(long, global = true, env = "LINVIS_LOG")]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum SubCommand {
    /// Execute a single statement
    Exec {
        /// The statement to execute, e.g. "PUSH 3"
        statement: String,

        /// Kind of the `main` structure
        #[arg(long, short, default_value = "array")]
        kind: StructureKind,

        /// Initial contents of `main`, comma separated (front/bottom first)
        #[arg(long, value_delimiter = ',', value_parser = parse_init_value)]
        init: Vec<Value>,
    },

    /// Run a Linvis script file (.lvs)
    Run {
        /// Path to the .lvs script file
        file: PathBuf,

        /// Kind of the `main` structure
        #[arg(long, short, default_value = "array")]
        kind: StructureKind,

        /// Skip static validation before running
        #[arg(long)]
        no_validate: bool,
    },

    /// Explain a statement or script without executing
    Explain {
        /// Statement or path to .lvs script file
        input: String,
    },

    /// Start interactive REPL mode
    Repl {
        /// Kind of the `main` structure
        #[arg(long, short, default_value = "array")]
        kind: StructureKind,
    },
}

/// Integers stay integers, anything else is text
pub fn parse_init_value(raw: &str) -> Result<Value, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("empty value".to_string());
    }
    Ok(match raw.parse::<i64>() {
        Ok(n) => Value::Int(n),
        Err(_) => Value::Text(raw.trim_matches(|c| c == '"' || c == '\'').to_string()),
    })
}
