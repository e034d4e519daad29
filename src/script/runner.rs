//! Script runner for executing .lvs files

use std::fs;
use std::path::Path;

use tracing::info;

use crate::engine::{execute_command, explain_command, ExecutionContext, ExecutionResult};
use crate::error::{LinvisError, Result};
use crate::output::{format_output, OutputFormat};
use crate::parser::{parse_script, Script};
use crate::workspace::Workspace;

/// File extension of Linvis scripts
pub const SCRIPT_EXTENSION: &str = "lvs";

/// Result of script execution
#[derive(Debug)]
pub struct ScriptResult {
    /// All results from executed statements
    pub results: Vec<ExecutionResult>,
    /// Total statements executed
    pub statements_executed: usize,
    /// Whether the script completed successfully
    pub success: bool,
    /// Error message if script failed
    pub error: Option<String>,
}

/// Runs scripts against one workspace that persists between runs
pub struct ScriptRunner {
    exec_ctx: ExecutionContext,
    workspace: Workspace,
    echo: bool,
}

impl ScriptRunner {
    /// Create a runner over a fresh workspace
    pub fn new(exec_ctx: ExecutionContext) -> Self {
        Self {
            exec_ctx,
            workspace: Workspace::new(),
            echo: true,
        }
    }

    /// Start from an existing workspace instead of a fresh one
    pub fn with_workspace(mut self, workspace: Workspace) -> Self {
        self.workspace = workspace;
        self
    }

    /// Whether results are printed as they are produced
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Load and run a script file
    pub fn run_file(&mut self, path: &Path) -> Result<ScriptResult> {
        let script = load_script(path)?;
        info!(path = %path.display(), statements = script.statements.len(), "running script");
        self.run_script(&script)
    }

    /// Run a parsed script, stopping at the first statement that fails
    pub fn run_script(&mut self, script: &Script) -> Result<ScriptResult> {
        let mut results = Vec::new();
        let mut statements_executed = 0;

        for cmd in &script.statements {
            match execute_command(cmd, &self.exec_ctx, &mut self.workspace) {
                Ok(result) => {
                    statements_executed += 1;
                    if self.echo {
                        println!("{}", format_output(&result, &self.exec_ctx.output_format));
                    }
                    results.push(result);
                }
                Err(e) => {
                    info!(statement = %cmd, error = %e, "script stopped");
                    return Ok(ScriptResult {
                        results,
                        statements_executed,
                        success: false,
                        error: Some(format!("{}: {}", cmd, e)),
                    });
                }
            }
        }

        info!(statements_executed, "script finished");
        Ok(ScriptResult {
            results,
            statements_executed,
            success: true,
            error: None,
        })
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn output_format(&self) -> &OutputFormat {
        &self.exec_ctx.output_format
    }
}

/// Read and parse a `.lvs` file
pub fn load_script(path: &Path) -> Result<Script> {
    if path.extension().is_none_or(|e| e != SCRIPT_EXTENSION) {
        return Err(LinvisError::ExecutionError(format!(
            "Script file must have .{} extension: {}",
            SCRIPT_EXTENSION,
            path.display()
        )));
    }

    let content = fs::read_to_string(path)?;
    parse_script(&content)
}

/// Explain a script without executing
pub fn explain_script(script: &Script) -> Vec<String> {
    script
        .statements
        .iter()
        .enumerate()
        .map(|(i, cmd)| format!("{}. {}\n   {}", i + 1, cmd, explain_command(cmd)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ResultData;
    use crate::parser::Value;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn quiet_runner() -> ScriptRunner {
        ScriptRunner::new(ExecutionContext::default()).with_echo(false)
    }

    #[test]
    fn test_run_script_keeps_workspace() {
        let mut runner = quiet_runner();
        let script = parse_script("CREATE STACK s; PUSH 1; PUSH 2; POP").unwrap();
        let result = runner.run_script(&script).unwrap();
        assert!(result.success);
        assert_eq!(result.statements_executed, 4);

        let stack = runner.workspace().get("s").unwrap();
        assert_eq!(stack.elements(), vec![Value::Int(1)]);
    }

    #[test]
    fn test_rejection_does_not_stop_script() {
        let mut runner = quiet_runner();
        let script = parse_script("CREATE QUEUE q; DEQUEUE; ENQUEUE 5").unwrap();
        let result = runner.run_script(&script).unwrap();
        assert!(result.success);
        assert!(matches!(result.results[1].data, ResultData::Rejected(_)));
    }

    #[test]
    fn test_hard_error_stops_script() {
        let mut runner = quiet_runner();
        let script = parse_script("APPEND 1; PUSH 2; APPEND 3").unwrap();
        let result = runner.run_script(&script).unwrap();
        assert!(!result.success);
        assert_eq!(result.statements_executed, 1);
        assert!(result.error.unwrap().starts_with("PUSH 2"));
        assert_eq!(runner.workspace().active().unwrap().size(), 1);
    }

    #[test]
    fn test_run_file_requires_extension() {
        let mut runner = quiet_runner();
        let err = runner.run_file(Path::new("script.txt")).unwrap_err();
        assert!(err.to_string().contains(".lvs"));
    }

    #[test]
    fn test_load_script_checks_extension_before_reading() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "PUSH 1;").unwrap();
        let err = load_script(file.path()).unwrap_err();
        assert!(matches!(err, LinvisError::ExecutionError(_)));
    }

    #[test]
    fn test_loaded_script_runs_once() {
        let mut file = tempfile::Builder::new().suffix(".lvs").tempfile().unwrap();
        writeln!(file, "CREATE STACK s; PUSH 1; PUSH 2;").unwrap();

        let script = load_script(file.path()).unwrap();
        assert_eq!(script.statements.len(), 3);

        let mut runner = quiet_runner();
        let result = runner.run_script(&script).unwrap();
        assert_eq!(result.statements_executed, 3);
        assert_eq!(
            runner.workspace().get("s").unwrap().elements(),
            vec![Value::Int(1), Value::Int(2)]
        );
    }

    #[test]
    fn test_run_file() {
        let mut file = tempfile::Builder::new().suffix(".lvs").tempfile().unwrap();
        writeln!(file, "CREATE LIST l FROM [1, 2, 3];\nDELETE AT 1;").unwrap();

        let mut runner = quiet_runner();
        let result = runner.run_file(file.path()).unwrap();
        assert!(result.success);
        assert_eq!(
            runner.workspace().get("l").unwrap().elements(),
            vec![Value::Int(1), Value::Int(3)]
        );
    }

    #[test]
    fn test_explain_script() {
        let script = parse_script("ENQUEUE 5; DEQUEUE").unwrap();
        let explanations = explain_script(&script);
        assert_eq!(explanations.len(), 2);
        assert!(explanations[0].starts_with("1. ENQUEUE 5"));
        assert!(explanations[1].contains("front"));
    }
}
