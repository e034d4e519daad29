//! Pest grammar parser for the Linvis command language

use pest::Parser;
use pest_derive::Parser;

use crate::error::{LinvisError, Result};
use crate::parser::ast::*;

#[derive(Parser)]
#[grammar = "../grammar/linvis.pest"]
pub struct LinvisParser;

type Pair<'i> = pest::iterators::Pair<'i, Rule>;

/// Parse a single statement into an AST
pub fn parse_command(input: &str) -> Result<Command> {
    let pairs = LinvisParser::parse(Rule::command, input)
        .map_err(|e| LinvisError::ParseError(e.to_string()))?;

    let pair = pairs
        .into_iter()
        .next()
        .ok_or_else(|| LinvisError::ParseError("Empty input".to_string()))?;

    // command -> statement
    let statement = pair
        .into_inner()
        .next()
        .ok_or_else(|| LinvisError::ParseError("Expected statement".to_string()))?;

    parse_statement(statement)
}

/// Parse a script (multiple statements) into an AST
pub fn parse_script(input: &str) -> Result<Script> {
    let pairs = LinvisParser::parse(Rule::script, input)
        .map_err(|e| LinvisError::ParseError(e.to_string()))?;

    let pair = pairs
        .into_iter()
        .next()
        .ok_or_else(|| LinvisError::ParseError("Empty script".to_string()))?;

    let mut statements = Vec::new();

    for inner in pair.into_inner() {
        if inner.as_rule() == Rule::statement {
            statements.push(parse_statement(inner)?);
        }
    }

    Ok(Script { statements })
}

fn parse_statement(pair: Pair<'_>) -> Result<Command> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| LinvisError::ParseError("Expected statement content".to_string()))?;

    match inner.as_rule() {
        Rule::explain_cmd => {
            let target = inner.into_inner().next().ok_or_else(|| {
                LinvisError::ParseError("Expected command after EXPLAIN".to_string())
            })?;
            Ok(Command::Explain(Box::new(parse_explainable(target)?)))
        }
        _ => parse_explainable(inner),
    }
}

fn parse_explainable(pair: Pair<'_>) -> Result<Command> {
    match pair.as_rule() {
        Rule::structure_cmd => Ok(Command::Structure(parse_structure_cmd(pair)?)),
        Rule::history_cmd => Ok(Command::ShowHistory),
        Rule::operation => Ok(Command::Operation(parse_operation(pair)?)),
        _ => Err(LinvisError::ParseError(format!(
            "Unexpected rule in statement: {:?}",
            pair.as_rule()
        ))),
    }
}

// ============================================================================
// Workspace Command Parsing
// ============================================================================

fn parse_structure_cmd(pair: Pair<'_>) -> Result<StructureCommand> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| LinvisError::ParseError("Expected structure command".to_string()))?;

    match inner.as_rule() {
        Rule::create_cmd => parse_create_cmd(inner),
        Rule::use_cmd => Ok(StructureCommand::Use(parse_name(inner)?)),
        Rule::drop_cmd => Ok(StructureCommand::Drop(parse_name(inner)?)),
        Rule::list_cmd => Ok(StructureCommand::List),
        _ => Err(LinvisError::ParseError(format!(
            "Unknown structure command: {:?}",
            inner.as_rule()
        ))),
    }
}

fn parse_create_cmd(pair: Pair<'_>) -> Result<StructureCommand> {
    let mut inner = pair.into_inner();

    let kind = inner
        .next()
        .ok_or_else(|| LinvisError::ParseError("Expected structure kind".to_string()))?
        .as_str()
        .parse::<StructureKind>()
        .map_err(LinvisError::ParseError)?;

    let name = inner
        .next()
        .ok_or_else(|| LinvisError::ParseError("Expected structure name".to_string()))?
        .as_str()
        .to_string();

    let initial = match inner.next() {
        Some(list) => list
            .into_inner()
            .map(parse_value)
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    Ok(StructureCommand::Create(CreateStructure {
        kind,
        name,
        initial,
    }))
}

/// USE / DROP carry a single name
fn parse_name(pair: Pair<'_>) -> Result<String> {
    pair.into_inner()
        .next()
        .map(|name| name.as_str().to_string())
        .ok_or_else(|| LinvisError::ParseError("Expected structure name".to_string()))
}

// ============================================================================
// Operation Parsing
// ============================================================================

fn parse_operation(pair: Pair<'_>) -> Result<Operation> {
    let op = pair
        .into_inner()
        .next()
        .ok_or_else(|| LinvisError::ParseError("Expected operation".to_string()))?;
    let rule = op.as_rule();
    let mut args = op.into_inner();

    let mut next_arg = |what: &str| {
        args.next()
            .ok_or_else(|| LinvisError::ParseError(format!("Expected {} in {:?}", what, rule)))
    };

    let operation = match rule {
        Rule::insert_op => {
            let value = parse_value(next_arg("value")?)?;
            let index = parse_index(next_arg("index")?)?;
            Operation::Insert { value, index }
        }
        Rule::append_op => Operation::Append(parse_value(next_arg("value")?)?),
        Rule::delete_op => Operation::Delete {
            index: parse_index(next_arg("index")?)?,
        },
        Rule::update_op => {
            let index = parse_index(next_arg("index")?)?;
            let value = parse_value(next_arg("value")?)?;
            Operation::Update { index, value }
        }
        Rule::get_op => Operation::Get {
            index: parse_index(next_arg("index")?)?,
        },
        Rule::find_op => Operation::Find(parse_value(next_arg("value")?)?),
        Rule::enqueue_op => Operation::Enqueue(parse_value(next_arg("value")?)?),
        Rule::dequeue_op => Operation::Dequeue,
        Rule::front_op => Operation::Front,
        Rule::rear_op => Operation::Rear,
        Rule::push_op => Operation::Push(parse_value(next_arg("value")?)?),
        Rule::pop_op => Operation::Pop,
        Rule::peek_op => Operation::Peek,
        Rule::size_op => Operation::Size,
        Rule::is_empty_op => Operation::IsEmpty,
        Rule::clear_op => Operation::Clear,
        Rule::show_op => Operation::Show,
        _ => {
            return Err(LinvisError::ParseError(format!(
                "Unknown operation: {:?}",
                rule
            )))
        }
    };

    Ok(operation)
}

// ============================================================================
// Literal Parsing
// ============================================================================

fn parse_index(pair: Pair<'_>) -> Result<i64> {
    pair.as_str()
        .parse::<i64>()
        .map_err(|e| LinvisError::ParseError(format!("Invalid index '{}': {}", pair.as_str(), e)))
}

fn parse_value(pair: Pair<'_>) -> Result<Value> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| LinvisError::ParseError("Expected value".to_string()))?;

    match inner.as_rule() {
        Rule::integer => inner.as_str().parse::<i64>().map(Value::Int).map_err(|e| {
            LinvisError::ParseError(format!("Invalid integer '{}': {}", inner.as_str(), e))
        }),
        Rule::string => {
            // string -> dq_inner | sq_inner, already stripped of quotes
            let content = inner
                .into_inner()
                .next()
                .map(|s| s.as_str().to_string())
                .unwrap_or_default();
            Ok(Value::Text(content))
        }
        _ => Err(LinvisError::ParseError(format!(
            "Invalid value: {:?}",
            inner.as_rule()
        ))),
    }
}
