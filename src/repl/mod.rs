//! REPL module for interactive mode
//!
//! Line classification lives here so it is available (and tested) without
//! the `repl` feature; only the rustyline loop is feature-gated.

#[cfg(feature = "repl")]
pub mod interactive;

#[cfg(feature = "repl")]
pub use interactive::run_repl;

/// What a line typed at the prompt asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    Empty,
    Exit,
    Help,
    ClearScreen,
    /// A statement for the engine, shortcuts already expanded
    Statement(String),
}

/// Sort a prompt line into a REPL command or a statement.
///
/// REPL commands never share a name with a statement keyword, so a
/// statement such as `CLEAR` always reaches the engine.
pub fn classify_line(line: &str) -> ReplInput {
    let line = line.trim().trim_end_matches(';').trim();
    if line.is_empty() {
        return ReplInput::Empty;
    }

    match line.to_lowercase().as_str() {
        "exit" | "quit" | "q" => ReplInput::Exit,
        "help" | "?" => ReplInput::Help,
        "cls" | ":clear" => ReplInput::ClearScreen,
        "ls" | "structures" => ReplInput::Statement("LIST STRUCTURES".to_string()),
        "history" => ReplInput::Statement("SHOW HISTORY".to_string()),
        "s" => ReplInput::Statement("SHOW".to_string()),
        _ => ReplInput::Statement(line.to_string()),
    }
}

#[cfg(not(feature = "repl"))]
pub fn run_repl(
    _workspace: crate::workspace::Workspace,
    _ctx: &crate::engine::ExecutionContext,
) -> crate::error::Result<()> {
    Err(crate::error::LinvisError::ExecutionError(
        "REPL not enabled. Rebuild with --features repl".to_string(),
    ))
}
