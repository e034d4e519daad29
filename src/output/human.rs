//! Human-readable output formatting
//!
//! Every structure kind is drawn the way it is usually sketched on a
//! whiteboard: arrays as indexed cells, linked lists as a chain of arrows,
//! queues between their two ends and stacks as a column with the top first.

use crate::engine::executor::{ExecutionResult, ResultData, StructureView};
use crate::parser::{StructureKind, Value};

pub fn format_human(result: &ExecutionResult) -> String {
    let mut output = format_data(&result.data);

    if let Some(ref view) = result.view {
        if !output.is_empty() {
            output.push_str("\n\n");
        }
        output.push_str(&format_view(view));
    }

    output
}

fn format_data(data: &ResultData) -> String {
    match data {
        ResultData::Stored => "OK".to_string(),
        ResultData::Removed(v) => format!("Removed: {}", v),
        ResultData::Replaced(v) => format!("Replaced: {}", v),
        ResultData::Position(Some(i)) => format!("Found at index {}", i),
        ResultData::Position(None) => "Not found (-1)".to_string(),
        ResultData::Element(Some(v)) => format!("Element: {}", v),
        ResultData::Element(None) => "Element: (none)".to_string(),
        ResultData::Size(n) => format!("Size: {}", n),
        ResultData::IsEmpty(empty) => format!("Empty: {}", if *empty { "yes" } else { "no" }),
        ResultData::Cleared => "Cleared".to_string(),
        ResultData::Shown => String::new(),
        ResultData::Structures(infos) => {
            let mut output = String::from("Structures\n----------\n");
            output.push_str(&format!(
                "{:<20} {:<8} {:>6} {:>8}\n",
                "NAME", "KIND", "SIZE", "ACTIVE"
            ));
            output.push_str(&"-".repeat(45));
            output.push('\n');
            for info in infos {
                output.push_str(&format!(
                    "{:<20} {:<8} {:>6} {:>8}\n",
                    truncate(&info.name, 20),
                    info.kind.to_string(),
                    info.size,
                    if info.is_active { "*" } else { "" }
                ));
            }
            output
        }
        ResultData::History(entries) => {
            if entries.is_empty() {
                return "No history".to_string();
            }
            let mut output = String::from("History\n-------\n");
            for (i, entry) in entries.iter().enumerate() {
                output.push_str(&format!(
                    "{:>4}. {} [{}] {}{}\n",
                    i + 1,
                    entry.timestamp.format("%H:%M:%S"),
                    entry.structure,
                    entry.action,
                    if entry.accepted { "" } else { "  (rejected)" }
                ));
            }
            output
        }
        ResultData::Explanation(explanation) => explanation.clone(),
        ResultData::Message(msg) => msg.clone(),
        ResultData::Rejected(err) => format!("Rejected: {}", err),
    }
}

/// Draw a structure's contents
pub fn format_view(view: &StructureView) -> String {
    let header = format!("{} ({})", view.name, view.kind);
    let body = match view.kind {
        StructureKind::Array => draw_array(&view.elements),
        StructureKind::List => draw_chain(&view.elements),
        StructureKind::Queue => draw_queue(&view.elements),
        StructureKind::Stack => draw_stack(&view.elements),
    };
    format!("{}\n{}", header, body)
}

fn draw_array(elements: &[Value]) -> String {
    if elements.is_empty() {
        return "[ ]".to_string();
    }
    let mut cells = Vec::with_capacity(elements.len());
    let mut indices = Vec::with_capacity(elements.len());
    for (i, value) in elements.iter().enumerate() {
        let value = value.to_string();
        let index = i.to_string();
        let width = value.chars().count().max(index.len());
        cells.push(format!("{:^width$}", value, width = width));
        indices.push(format!("{:^width$}", index, width = width));
    }
    format!("[ {} ]\n  {}", cells.join(" | "), indices.join("   "))
}

fn draw_chain(elements: &[Value]) -> String {
    let mut nodes: Vec<String> = elements.iter().map(|v| v.to_string()).collect();
    nodes.push("null".to_string());
    nodes.join(" -> ")
}

fn draw_queue(elements: &[Value]) -> String {
    if elements.is_empty() {
        return "front [ ] rear".to_string();
    }
    let cells: Vec<String> = elements.iter().map(|v| v.to_string()).collect();
    format!("front [ {} ] rear", cells.join(" | "))
}

fn draw_stack(elements: &[Value]) -> String {
    let width = elements
        .iter()
        .map(|v| v.to_string().chars().count())
        .max()
        .unwrap_or(0)
        .max(3);
    let mut output = String::new();
    if elements.is_empty() {
        output.push_str(&format!("|{:^w$}|\n", "", w = width + 2));
    }
    for (i, value) in elements.iter().rev().enumerate() {
        output.push_str(&format!("| {:^w$} |", value.to_string(), w = width));
        if i == 0 {
            output.push_str(" <- top");
        }
        output.push('\n');
    }
    output.push_str(&format!("+{}+", "-".repeat(width + 2)));
    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContainerError;
    use pretty_assertions::assert_eq;

    fn view(kind: StructureKind, elements: Vec<Value>) -> StructureView {
        StructureView {
            name: "s".to_string(),
            kind,
            elements,
        }
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn test_draw_array_with_indices() {
        let out = format_view(&view(
            StructureKind::Array,
            vec![text("c"), text("a"), text("b")],
        ));
        assert_eq!(out, "s (ARRAY)\n[ c | a | b ]\n  0   1   2");
    }

    #[test]
    fn test_draw_linked_chain() {
        let out = format_view(&view(StructureKind::List, vec![Value::Int(1), Value::Int(3)]));
        assert_eq!(out, "s (LIST)\n1 -> 3 -> null");
        let empty = format_view(&view(StructureKind::List, Vec::new()));
        assert_eq!(empty, "s (LIST)\nnull");
    }

    #[test]
    fn test_draw_queue() {
        let out = format_view(&view(StructureKind::Queue, vec![Value::Int(5), Value::Int(6)]));
        assert_eq!(out, "s (QUEUE)\nfront [ 5 | 6 ] rear");
    }

    #[test]
    fn test_draw_stack_top_first() {
        let out = format_view(&view(StructureKind::Stack, vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(out, "s (STACK)\n|  2  | <- top\n|  1  |\n+-----+");
    }

    #[test]
    fn test_format_rejected() {
        let result = ExecutionResult {
            statement: "POP".to_string(),
            data: ResultData::Rejected(ContainerError::Empty { op: "pop" }),
            view: None,
        };
        assert_eq!(format_human(&result), "Rejected: pop failed: container is empty");
    }

    #[test]
    fn test_format_not_found() {
        assert_eq!(format_data(&ResultData::Position(None)), "Not found (-1)");
    }
}
