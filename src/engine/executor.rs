//! Command executor

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ContainerError, LinvisError, Result};
use crate::output::OutputFormat;
use crate::parser::{Command, Operation, StructureCommand, StructureKind, Value};
use crate::workspace::{Container, HistoryEntry, Structure, Workspace};

/// Execution context containing runtime configuration
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            verbose: false,
        }
    }
}

/// Result of command execution
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    /// The statement in source form
    pub statement: String,
    pub data: ResultData,
    /// Contents of the affected structure after the statement ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<StructureView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", content = "value", rename_all = "snake_case")]
pub enum ResultData {
    /// An element was added (insert, append, enqueue, push)
    Stored,
    /// An element was taken out (delete, dequeue, pop)
    Removed(Value),
    /// UPDATE replaced this element
    Replaced(Value),
    /// FIND result; `None` means not found
    Position(Option<usize>),
    /// GET / FRONT / REAR / PEEK
    Element(Option<Value>),
    Size(usize),
    IsEmpty(bool),
    Cleared,
    Shown,
    Structures(Vec<StructureInfo>),
    History(Vec<HistoryEntry>),
    Explanation(String),
    Message(String),
    /// The container refused the operation and is unchanged
    Rejected(ContainerError),
}

/// Snapshot of a structure for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureView {
    pub name: String,
    pub kind: StructureKind,
    pub elements: Vec<Value>,
}

impl StructureView {
    pub fn of(structure: &Structure) -> Self {
        Self {
            name: structure.name.clone(),
            kind: structure.kind(),
            elements: structure.elements(),
        }
    }
}

/// Information about a structure for LIST STRUCTURES
#[derive(Debug, Clone, Serialize)]
pub struct StructureInfo {
    pub name: String,
    pub kind: StructureKind,
    pub size: usize,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Execute a parsed command against a workspace
pub fn execute_command(
    cmd: &Command,
    ctx: &ExecutionContext,
    workspace: &mut Workspace,
) -> Result<ExecutionResult> {
    debug!(statement = %cmd, verbose = ctx.verbose, "executing");
    let statement = cmd.to_string();

    let (data, view) = match cmd {
        Command::Structure(structure_cmd) => execute_structure_cmd(structure_cmd, workspace)?,
        Command::Operation(op) => execute_operation(op, workspace)?,
        Command::ShowHistory => (ResultData::History(workspace.history().to_vec()), None),
        Command::Explain(inner) => (ResultData::Explanation(explain_command(inner)), None),
    };

    Ok(ExecutionResult {
        statement,
        data,
        view,
    })
}

fn execute_structure_cmd(
    cmd: &StructureCommand,
    workspace: &mut Workspace,
) -> Result<(ResultData, Option<StructureView>)> {
    let (message, name) = match cmd {
        StructureCommand::Create(create) => {
            workspace.create(&create.name, create.kind, create.initial.clone())?;
            (
                format!(
                    "Created {} '{}' with {} elements",
                    create.kind,
                    create.name,
                    create.initial.len()
                ),
                create.name.clone(),
            )
        }
        StructureCommand::Use(name) => {
            workspace.switch(name)?;
            (format!("Using '{}'", name), name.clone())
        }
        StructureCommand::Drop(name) => {
            workspace.destroy(name)?;
            (
                format!(
                    "Dropped '{}', now using '{}'",
                    name,
                    workspace.active_name()
                ),
                name.clone(),
            )
        }
        StructureCommand::List => {
            let active = workspace.active_name();
            let infos = workspace
                .list()
                .into_iter()
                .filter_map(|name| workspace.get(name))
                .map(|s| StructureInfo {
                    name: s.name.clone(),
                    kind: s.kind(),
                    size: s.size(),
                    is_active: s.name == active,
                    created_at: s.created_at,
                })
                .collect();
            return Ok((ResultData::Structures(infos), None));
        }
    };

    workspace.record(&name, cmd.to_string(), true);
    let view = StructureView::of(workspace.active()?);
    Ok((ResultData::Message(message), Some(view)))
}

fn execute_operation(
    op: &Operation,
    workspace: &mut Workspace,
) -> Result<(ResultData, Option<StructureView>)> {
    let structure = workspace.active_mut()?;

    let data = match apply(op, &mut structure.container) {
        Ok(data) => data,
        Err(LinvisError::Container(err)) => ResultData::Rejected(err),
        Err(other) => return Err(other),
    };

    let name = structure.name.clone();
    let view = StructureView::of(structure);
    let accepted = !matches!(data, ResultData::Rejected(_));
    debug!(structure = %name, op = %op, accepted, size = view.elements.len(), "executed");
    workspace.record(&name, op.to_string(), accepted);

    Ok((data, Some(view)))
}

/// Run one operation on a container.
///
/// Container refusals come back as `LinvisError::Container`; an operation the
/// container kind does not offer is `UnsupportedOperation`.
fn apply(op: &Operation, container: &mut Container) -> Result<ResultData> {
    match op {
        Operation::Size => return Ok(ResultData::Size(container.snapshot().size())),
        Operation::IsEmpty => return Ok(ResultData::IsEmpty(container.snapshot().is_empty())),
        Operation::Clear => {
            container.snapshot_mut().clear();
            return Ok(ResultData::Cleared);
        }
        Operation::Show => return Ok(ResultData::Shown),
        _ => {}
    }

    let len = container.snapshot().size();

    let data = match (op, &mut *container) {
        (Operation::Insert { value, index }, Container::Array(c)) => {
            c.insert(to_index("insert", *index, len)?, value.clone())?;
            ResultData::Stored
        }
        (Operation::Insert { value, index }, Container::List(c)) => {
            c.insert(to_index("insert", *index, len)?, value.clone())?;
            ResultData::Stored
        }
        (Operation::Append(value), Container::Array(c)) => {
            c.insert(len, value.clone())?;
            ResultData::Stored
        }
        (Operation::Append(value), Container::List(c)) => {
            c.append(value.clone());
            ResultData::Stored
        }
        (Operation::Delete { index }, Container::Array(c)) => {
            ResultData::Removed(c.delete(to_index("delete", *index, len)?)?)
        }
        (Operation::Delete { index }, Container::List(c)) => {
            ResultData::Removed(c.delete(to_index("delete", *index, len)?)?)
        }
        (Operation::Update { index, value }, Container::Array(c)) => {
            ResultData::Replaced(c.update(to_index("update", *index, len)?, value.clone())?)
        }
        (Operation::Get { index }, Container::Array(c)) => ResultData::Element(
            usize::try_from(*index)
                .ok()
                .and_then(|i| c.get(i))
                .cloned(),
        ),
        (Operation::Get { index }, Container::List(c)) => ResultData::Element(
            usize::try_from(*index)
                .ok()
                .and_then(|i| c.get(i))
                .cloned(),
        ),
        (Operation::Find(value), Container::Array(c)) => ResultData::Position(c.find(value)),
        (Operation::Find(value), Container::List(c)) => ResultData::Position(c.find(value)),
        (Operation::Enqueue(value), Container::Queue(c)) => {
            c.enqueue(value.clone());
            ResultData::Stored
        }
        (Operation::Dequeue, Container::Queue(c)) => ResultData::Removed(c.dequeue()?),
        (Operation::Front, Container::Queue(c)) => ResultData::Element(Some(c.front()?.clone())),
        (Operation::Rear, Container::Queue(c)) => ResultData::Element(Some(c.rear()?.clone())),
        (Operation::Push(value), Container::Stack(c)) => {
            c.push(value.clone());
            ResultData::Stored
        }
        (Operation::Pop, Container::Stack(c)) => ResultData::Removed(c.pop()?),
        (Operation::Peek, Container::Stack(c)) => ResultData::Element(Some(c.peek()?.clone())),
        (op, container) => {
            return Err(LinvisError::UnsupportedOperation {
                op: op.keyword().to_string(),
                kind: container.kind().to_string(),
            })
        }
    };

    Ok(data)
}

/// Negative indices never reach a container; they fail like any other bad index.
fn to_index(op: &'static str, index: i64, len: usize) -> std::result::Result<usize, ContainerError> {
    usize::try_from(index).map_err(|_| {
        let err = ContainerError::OutOfBounds { op, index, len };
        warn!(target: "linvis::engine", "{}", err);
        err
    })
}

/// Describe what a command would do, without running it
pub fn explain_command(cmd: &Command) -> String {
    match cmd {
        Command::Structure(StructureCommand::Create(c)) => format!(
            "Create a {} named '{}' holding {} initial elements and make it active",
            c.kind,
            c.name,
            c.initial.len()
        ),
        Command::Structure(StructureCommand::Use(name)) => {
            format!("Make '{}' the target of following operations", name)
        }
        Command::Structure(StructureCommand::Drop(name)) => {
            format!("Discard '{}'; if it is active, fall back to 'main'", name)
        }
        Command::Structure(StructureCommand::List) => "List every structure in the workspace".to_string(),
        Command::ShowHistory => "Show every statement executed so far".to_string(),
        Command::Explain(inner) => explain_command(inner),
        Command::Operation(op) => explain_operation(op),
    }
}

fn explain_operation(op: &Operation) -> String {
    match op {
        Operation::Insert { value, index } => format!(
            "Insert {} at index {}; later elements shift right (ARRAY, LIST; valid 0..=size)",
            value.to_source(),
            index
        ),
        Operation::Append(value) => format!(
            "Add {} after the last element (ARRAY, LIST)",
            value.to_source()
        ),
        Operation::Delete { index } => format!(
            "Remove the element at index {}; later elements shift left (ARRAY, LIST; valid 0..size)",
            index
        ),
        Operation::Update { index, value } => {
            format!(
                "Replace the element at index {} with {} (ARRAY)",
                index,
                value.to_source()
            )
        }
        Operation::Get { index } => format!("Read the element at index {} (ARRAY, LIST)", index),
        Operation::Find(value) => format!(
            "Find the first index holding {}, or report not found (ARRAY, LIST)",
            value.to_source()
        ),
        Operation::Enqueue(value) => format!("Add {} at the rear (QUEUE)", value.to_source()),
        Operation::Dequeue => "Remove and return the front element (QUEUE)".to_string(),
        Operation::Front => "Read the front element without removing it (QUEUE)".to_string(),
        Operation::Rear => "Read the rear element without removing it (QUEUE)".to_string(),
        Operation::Push(value) => format!("Put {} on top (STACK)", value.to_source()),
        Operation::Pop => "Remove and return the top element (STACK)".to_string(),
        Operation::Peek => "Read the top element without removing it (STACK)".to_string(),
        Operation::Size => "Count the elements".to_string(),
        Operation::IsEmpty => "Check whether there are no elements".to_string(),
        Operation::Clear => "Remove every element".to_string(),
        Operation::Show => "Show the current contents".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_command;
    use pretty_assertions::assert_eq;

    fn run(ws: &mut Workspace, input: &str) -> ExecutionResult {
        let cmd = parse_command(input).unwrap();
        execute_command(&cmd, &ExecutionContext::default(), ws).unwrap()
    }

    fn contents(result: &ExecutionResult) -> Vec<Value> {
        result.view.as_ref().unwrap().elements.clone()
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn test_array_insert_scenario() {
        let mut ws = Workspace::new();
        run(&mut ws, "INSERT 'a' AT 0");
        run(&mut ws, "INSERT 'b' AT 1");
        let result = run(&mut ws, "INSERT 'c' AT 0");
        assert!(matches!(result.data, ResultData::Stored));
        assert_eq!(contents(&result), vec![text("c"), text("a"), text("b")]);
    }

    #[test]
    fn test_list_delete_scenario() {
        let mut ws = Workspace::new();
        run(&mut ws, "CREATE LIST l FROM [1, 2, 3]");
        let result = run(&mut ws, "DELETE AT 1");
        assert!(matches!(result.data, ResultData::Removed(Value::Int(2))));
        assert_eq!(contents(&result), vec![Value::Int(1), Value::Int(3)]);
        assert!(matches!(run(&mut ws, "SIZE").data, ResultData::Size(2)));
    }

    #[test]
    fn test_queue_scenario() {
        let mut ws = Workspace::new();
        run(&mut ws, "CREATE QUEUE q");
        let result = run(&mut ws, "DEQUEUE");
        assert!(matches!(
            result.data,
            ResultData::Rejected(ContainerError::Empty { op: "dequeue" })
        ));
        run(&mut ws, "ENQUEUE 5");
        run(&mut ws, "ENQUEUE 6");
        assert!(matches!(run(&mut ws, "DEQUEUE").data, ResultData::Removed(Value::Int(5))));
        assert!(matches!(
            run(&mut ws, "FRONT").data,
            ResultData::Element(Some(Value::Int(6)))
        ));
    }

    #[test]
    fn test_stack_scenario() {
        let mut ws = Workspace::new();
        run(&mut ws, "CREATE STACK s");
        run(&mut ws, "PUSH 1");
        run(&mut ws, "PUSH 2");
        run(&mut ws, "PUSH 3");
        assert!(matches!(run(&mut ws, "POP").data, ResultData::Removed(Value::Int(3))));
        assert!(matches!(
            run(&mut ws, "PEEK").data,
            ResultData::Element(Some(Value::Int(2)))
        ));
        assert!(matches!(run(&mut ws, "SIZE").data, ResultData::Size(2)));
    }

    #[test]
    fn test_negative_index_rejected_without_mutation() {
        for input in ["INSERT 9 AT -1", "DELETE AT -1", "UPDATE AT -1 TO 9"] {
            let mut ws = Workspace::with_main(StructureKind::Array, vec![Value::Int(1)]);
            let result = run(&mut ws, input);
            assert!(
                matches!(result.data, ResultData::Rejected(ContainerError::OutOfBounds { index: -1, .. })),
                "{} should be rejected",
                input
            );
            assert_eq!(contents(&result), vec![Value::Int(1)]);
        }
    }

    #[test]
    fn test_index_past_end_rejected_without_mutation() {
        let mut ws = Workspace::with_main(StructureKind::List, vec![Value::Int(1), Value::Int(2)]);
        let result = run(&mut ws, "INSERT 9 AT 3");
        assert!(matches!(result.data, ResultData::Rejected(_)));
        let result = run(&mut ws, "DELETE AT 2");
        assert!(matches!(result.data, ResultData::Rejected(_)));
        assert_eq!(contents(&result), vec![Value::Int(1), Value::Int(2)]);
        assert!(matches!(run(&mut ws, "GET AT 2").data, ResultData::Element(None)));
        assert!(matches!(run(&mut ws, "GET AT -1").data, ResultData::Element(None)));
    }

    #[test]
    fn test_find_not_found_is_not_rejected() {
        let mut ws = Workspace::with_main(StructureKind::Array, vec![Value::Int(1)]);
        assert!(matches!(run(&mut ws, "FIND 7").data, ResultData::Position(None)));
        assert!(matches!(run(&mut ws, "FIND 1").data, ResultData::Position(Some(0))));
    }

    #[test]
    fn test_unsupported_operation_is_an_error() {
        let mut ws = Workspace::new();
        let cmd = parse_command("PUSH 1").unwrap();
        let result = execute_command(&cmd, &ExecutionContext::default(), &mut ws);
        assert!(matches!(result, Err(LinvisError::UnsupportedOperation { .. })));
        assert_eq!(ws.active().unwrap().size(), 0);
    }

    #[test]
    fn test_update_on_array() {
        let mut ws = Workspace::with_main(StructureKind::Array, vec![text("a"), text("b")]);
        let result = run(&mut ws, "UPDATE AT 0 TO 'z'");
        assert!(matches!(result.data, ResultData::Replaced(Value::Text(ref s)) if s == "a"));
        assert_eq!(contents(&result), vec![text("z"), text("b")]);
    }

    #[test]
    fn test_clear_twice() {
        let mut ws = Workspace::with_main(StructureKind::Queue, vec![Value::Int(1)]);
        assert!(matches!(run(&mut ws, "CLEAR").data, ResultData::Cleared));
        let result = run(&mut ws, "CLEAR");
        assert!(contents(&result).is_empty());
        assert!(matches!(run(&mut ws, "IS EMPTY").data, ResultData::IsEmpty(true)));
    }

    #[test]
    fn test_history_records_acceptance() {
        let mut ws = Workspace::new();
        run(&mut ws, "APPEND 1");
        run(&mut ws, "DELETE AT 5");
        let result = run(&mut ws, "SHOW HISTORY");
        match result.data {
            ResultData::History(entries) => {
                assert_eq!(entries.len(), 2);
                assert!(entries[0].accepted);
                assert!(!entries[1].accepted);
                assert_eq!(entries[1].action, "DELETE AT 5");
            }
            _ => panic!("Expected History result"),
        }
    }

    #[test]
    fn test_list_structures() {
        let mut ws = Workspace::new();
        run(&mut ws, "CREATE STACK s FROM [1]");
        match run(&mut ws, "LIST STRUCTURES").data {
            ResultData::Structures(infos) => {
                assert_eq!(infos.len(), 2);
                assert_eq!(infos[1].name, "s");
                assert!(infos[1].is_active);
                assert_eq!(infos[1].size, 1);
            }
            _ => panic!("Expected Structures result"),
        }
    }

    #[test]
    fn test_drop_reports_fallback() {
        let mut ws = Workspace::new();
        run(&mut ws, "CREATE QUEUE q");
        let result = run(&mut ws, "DROP q");
        assert_eq!(result.view.unwrap().name, "main");
    }

    #[test]
    fn test_explain_does_not_execute() {
        let mut ws = Workspace::new();
        let result = run(&mut ws, "EXPLAIN APPEND 3");
        assert!(matches!(result.data, ResultData::Explanation(_)));
        assert_eq!(ws.active().unwrap().size(), 0);
    }
}
