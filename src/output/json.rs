//! JSON output formatting

use crate::engine::executor::ExecutionResult;

pub fn format_json(result: &ExecutionResult) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::executor::{ResultData, StructureView};
    use crate::parser::{StructureKind, Value};
    use serde_json::{json, Value as Json};

    #[test]
    fn test_json_contains_result_and_view() {
        let result = ExecutionResult {
            statement: "POP".to_string(),
            data: ResultData::Removed(Value::Int(3)),
            view: Some(StructureView {
                name: "s".to_string(),
                kind: StructureKind::Stack,
                elements: vec![Value::Int(1), Value::Text("two".to_string())],
            }),
        };
        let parsed: Json = serde_json::from_str(&format_json(&result)).unwrap();
        assert_eq!(parsed["data"], json!({ "result": "removed", "value": 3 }));
        assert_eq!(parsed["view"]["kind"], json!("stack"));
        assert_eq!(parsed["view"]["elements"], json!([1, "two"]));
    }

    #[test]
    fn test_json_omits_missing_view() {
        let result = ExecutionResult {
            statement: "EXPLAIN POP".to_string(),
            data: ResultData::Explanation("pop".to_string()),
            view: None,
        };
        let parsed: Json = serde_json::from_str(&format_json(&result)).unwrap();
        assert!(parsed.get("view").is_none());
    }
}
