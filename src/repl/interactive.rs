//! Interactive REPL implementation

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::engine::{execute_command, ExecutionContext};
use crate::error::{LinvisError, Result};
use crate::output::format_output;
use crate::parser::parse_command;
use crate::workspace::Workspace;

use super::{classify_line, ReplInput};

pub fn run_repl(mut workspace: Workspace, exec_ctx: &ExecutionContext) -> Result<()> {
    let mut rl = DefaultEditor::new().map_err(|e| LinvisError::ExecutionError(e.to_string()))?;

    println!("Linvis v{} - Interactive Mode", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for commands, 'exit' to quit\n");

    loop {
        let prompt = match workspace.active() {
            Ok(s) => format!("linvis [{} {}]> ", s.name, s.kind()),
            Err(_) => "linvis> ".to_string(),
        };

        match rl.readline(&prompt) {
            Ok(line) => {
                let statement = match classify_line(&line) {
                    ReplInput::Empty => continue,
                    ReplInput::Exit => {
                        println!("Goodbye!");
                        break;
                    }
                    ReplInput::Help => {
                        print_help();
                        continue;
                    }
                    ReplInput::ClearScreen => {
                        print!("\x1B[2J\x1B[1;1H");
                        continue;
                    }
                    ReplInput::Statement(statement) => statement,
                };

                let _ = rl.add_history_entry(line.trim());

                match parse_command(&statement) {
                    Ok(cmd) => match execute_command(&cmd, exec_ctx, &mut workspace) {
                        Ok(result) => {
                            let output = format_output(&result, &exec_ctx.output_format);
                            if !output.is_empty() {
                                println!("{}\n", output);
                            }
                        }
                        Err(e) => eprintln!("Error: {}\n", e),
                    },
                    Err(e) => eprintln!("Parse error: {}\n", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"
Linvis Commands
===============

STRUCTURES:
  CREATE ARRAY name [FROM [1, 2]]  - Create an array and make it active
  CREATE LIST name                 - Create a singly linked list
  CREATE QUEUE name                - Create a FIFO queue
  CREATE STACK name                - Create a LIFO stack
  USE name                         - Switch the active structure
  DROP name                        - Discard a structure (not main)
  LIST STRUCTURES                  - List all structures

ARRAY / LIST:
  INSERT v AT i                    - Insert at index (0..=size)
  APPEND v                         - Add at the end
  DELETE AT i                      - Remove at index (0..size)
  UPDATE AT i TO v                 - Replace at index (array only)
  GET AT i                         - Read at index
  FIND v                           - First index of a value

QUEUE:
  ENQUEUE v, DEQUEUE, FRONT, REAR

STACK:
  PUSH v, POP, PEEK

ANY STRUCTURE:
  SIZE, IS EMPTY, CLEAR, SHOW

OTHER:
  SHOW HISTORY                     - Show executed statements
  EXPLAIN <statement>              - Show what a statement would do

SHORTCUTS:
  ls, structures                   - Same as LIST STRUCTURES
  history                          - Same as SHOW HISTORY
  s                                - Same as SHOW

REPL Commands:
  help, ?                          - Show this help
  cls, :clear                      - Clear screen
  exit, quit, q                    - Exit REPL

Values are integers (42, -7) or quoted strings ("a", 'b').
"#
    );
}
