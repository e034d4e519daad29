//! Abstract Syntax Tree definitions for the Linvis command language

use serde::{Deserialize, Serialize};

/// Top-level command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Structure(StructureCommand),
    Operation(Operation),
    ShowHistory,
    Explain(Box<Command>),
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Structure(s) => write!(f, "{}", s),
            Command::Operation(op) => write!(f, "{}", op),
            Command::ShowHistory => write!(f, "SHOW HISTORY"),
            Command::Explain(inner) => write!(f, "EXPLAIN {}", inner),
        }
    }
}

/// A script is a sequence of commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub statements: Vec<Command>,
}

// ============================================================================
// Workspace Commands
// ============================================================================

/// Commands that manage the named structures of a workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StructureCommand {
    /// Create a new structure, optionally seeded with values
    Create(CreateStructure),
    /// Make another structure the target of operations
    Use(String),
    /// Discard a structure
    Drop(String),
    /// List all structures
    List,
}

impl std::fmt::Display for StructureCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructureCommand::Create(c) => {
                write!(f, "CREATE {} {}", c.kind, c.name)?;
                if !c.initial.is_empty() {
                    let values: Vec<String> = c.initial.iter().map(Value::to_source).collect();
                    write!(f, " FROM [{}]", values.join(", "))?;
                }
                Ok(())
            }
            StructureCommand::Use(name) => write!(f, "USE {}", name),
            StructureCommand::Drop(name) => write!(f, "DROP {}", name),
            StructureCommand::List => write!(f, "LIST STRUCTURES"),
        }
    }
}

/// CREATE command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStructure {
    pub kind: StructureKind,
    pub name: String,
    /// Initial contents in container order (front/bottom first)
    pub initial: Vec<Value>,
}

/// The four container kinds a structure can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    Array,
    List,
    Queue,
    Stack,
}

impl std::fmt::Display for StructureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructureKind::Array => write!(f, "ARRAY"),
            StructureKind::List => write!(f, "LIST"),
            StructureKind::Queue => write!(f, "QUEUE"),
            StructureKind::Stack => write!(f, "STACK"),
        }
    }
}

impl std::str::FromStr for StructureKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ARRAY" => Ok(StructureKind::Array),
            "LIST" | "LINKED" => Ok(StructureKind::List),
            "QUEUE" => Ok(StructureKind::Queue),
            "STACK" => Ok(StructureKind::Stack),
            other => Err(format!("unknown structure kind: {}", other)),
        }
    }
}

// ============================================================================
// Operations
// ============================================================================

/// A single step applied to the active structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    Insert { value: Value, index: i64 },
    Append(Value),
    Delete { index: i64 },
    Update { index: i64, value: Value },
    Get { index: i64 },
    Find(Value),
    Enqueue(Value),
    Dequeue,
    Front,
    Rear,
    Push(Value),
    Pop,
    Peek,
    Size,
    IsEmpty,
    Clear,
    Show,
}

impl Operation {
    /// Leading keyword(s) of the statement
    pub fn keyword(&self) -> &'static str {
        match self {
            Operation::Insert { .. } => "INSERT",
            Operation::Append(_) => "APPEND",
            Operation::Delete { .. } => "DELETE",
            Operation::Update { .. } => "UPDATE",
            Operation::Get { .. } => "GET",
            Operation::Find(_) => "FIND",
            Operation::Enqueue(_) => "ENQUEUE",
            Operation::Dequeue => "DEQUEUE",
            Operation::Front => "FRONT",
            Operation::Rear => "REAR",
            Operation::Push(_) => "PUSH",
            Operation::Pop => "POP",
            Operation::Peek => "PEEK",
            Operation::Size => "SIZE",
            Operation::IsEmpty => "IS EMPTY",
            Operation::Clear => "CLEAR",
            Operation::Show => "SHOW",
        }
    }

    /// Whether a structure of `kind` understands this operation
    pub fn supported_by(&self, kind: StructureKind) -> bool {
        use StructureKind::*;
        match self {
            Operation::Insert { .. }
            | Operation::Append(_)
            | Operation::Delete { .. }
            | Operation::Get { .. }
            | Operation::Find(_) => matches!(kind, Array | List),
            Operation::Update { .. } => kind == Array,
            Operation::Enqueue(_) | Operation::Dequeue | Operation::Front | Operation::Rear => {
                kind == Queue
            }
            Operation::Push(_) | Operation::Pop | Operation::Peek => kind == Stack,
            Operation::Size | Operation::IsEmpty | Operation::Clear | Operation::Show => true,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Insert { value, index } => {
                write!(f, "INSERT {} AT {}", value.to_source(), index)
            }
            Operation::Append(v) => write!(f, "APPEND {}", v.to_source()),
            Operation::Delete { index } => write!(f, "DELETE AT {}", index),
            Operation::Update { index, value } => {
                write!(f, "UPDATE AT {} TO {}", index, value.to_source())
            }
            Operation::Get { index } => write!(f, "GET AT {}", index),
            Operation::Find(v) => write!(f, "FIND {}", v.to_source()),
            Operation::Enqueue(v) => write!(f, "ENQUEUE {}", v.to_source()),
            Operation::Push(v) => write!(f, "PUSH {}", v.to_source()),
            other => write!(f, "{}", other.keyword()),
        }
    }
}

// ============================================================================
// Values
// ============================================================================

/// Element stored in a structure
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Text(String),
}

impl Value {
    /// The literal that parses back to this value.
    ///
    /// String literals have no escapes, so text is wrapped in double quotes
    /// unless it contains one. Text holding both quote characters has no
    /// literal form and comes out double-quoted.
    pub fn to_source(&self) -> String {
        match self {
            Value::Int(n) => n.to_string(),
            Value::Text(s) if s.contains('"') && !s.contains('\'') => format!("'{}'", s),
            Value::Text(s) => format!("\"{}\"", s),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_support_matrix() {
        assert!(Operation::Update { index: 0, value: Value::Int(1) }.supported_by(StructureKind::Array));
        assert!(!Operation::Update { index: 0, value: Value::Int(1) }.supported_by(StructureKind::List));
        assert!(Operation::Append(Value::Int(1)).supported_by(StructureKind::List));
        assert!(!Operation::Pop.supported_by(StructureKind::Queue));
        assert!(Operation::Show.supported_by(StructureKind::Stack));
    }

    #[test]
    fn test_operation_display_is_source_form() {
        let op = Operation::Insert {
            value: "a".into(),
            index: 2,
        };
        assert_eq!(op.to_string(), "INSERT \"a\" AT 2");
        assert_eq!(Operation::IsEmpty.to_string(), "IS EMPTY");
    }

    #[test]
    fn test_value_to_source_picks_quotes() {
        assert_eq!(Value::Int(-4).to_source(), "-4");
        assert_eq!(Value::from("it's").to_source(), "\"it's\"");
        assert_eq!(Value::from("say \"hi\"").to_source(), "'say \"hi\"'");
    }

    #[test]
    fn test_display_parses_back() {
        use crate::parser::parse_command;

        let commands = [
            Command::Operation(Operation::Append(Value::from("say \"hi\""))),
            Command::Operation(Operation::Push(Value::from("it's"))),
            Command::Operation(Operation::Update {
                index: 1,
                value: Value::Int(-3),
            }),
            Command::Structure(StructureCommand::Create(CreateStructure {
                kind: StructureKind::Queue,
                name: "q".to_string(),
                initial: vec![Value::Int(1), Value::from("a \"b\"")],
            })),
            Command::Explain(Box::new(Command::Operation(Operation::Find(Value::from("x"))))),
        ];
        for cmd in commands {
            assert_eq!(parse_command(&cmd.to_string()).unwrap(), cmd);
        }
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("queue".parse::<StructureKind>(), Ok(StructureKind::Queue));
        assert_eq!("linked".parse::<StructureKind>(), Ok(StructureKind::List));
        assert!("tree".parse::<StructureKind>().is_err());
    }

    #[test]
    fn test_value_serializes_untagged() {
        let values = vec![Value::Int(3), Value::from("x")];
        assert_eq!(serde_json::to_string(&values).unwrap(), r#"[3,"x"]"#);
    }
}
