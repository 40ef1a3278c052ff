//! Model tier → keyword tier behavior through the public API.

use async_trait::async_trait;
use scribe_common::{validate, OperationKind, TableSpec};
use scribe_parser::{
    CommandParser, CompletionProvider, CompletionRequest, CompletionResponse, CompletionResult,
    ParseError, ParserOptions,
};
use std::sync::Arc;
use std::time::Duration;

struct Fixed(&'static str);

#[async_trait]
impl CompletionProvider for Fixed {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn complete(&self, request: CompletionRequest) -> CompletionResult<CompletionResponse> {
        Ok(CompletionResponse {
            content: self.0.to_string(),
            model: request.model,
        })
    }
}

/// Never answers within any reasonable timeout
struct Stalled;

#[async_trait]
impl CompletionProvider for Stalled {
    fn name(&self) -> &str {
        "stalled"
    }

    async fn complete(&self, request: CompletionRequest) -> CompletionResult<CompletionResponse> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(CompletionResponse {
            content: "[]".to_string(),
            model: request.model,
        })
    }
}

fn parser(provider: impl CompletionProvider + 'static) -> CommandParser {
    let options = ParserOptions {
        timeout: Duration::from_secs(5),
        ..ParserOptions::default()
    };
    CommandParser::new(Arc::new(provider), options)
}

#[tokio::test]
async fn test_prose_reply_falls_back_to_keywords() {
    let parser = parser(Fixed("Sure! I would add a table for you."));

    let ops = parser.parse_instruction("生成一个2行4列的表格", "").await;
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].kind, OperationKind::AddTable);
    assert_eq!(ops[0].table, Some(TableSpec::new(2, 4)));
}

#[tokio::test]
async fn test_raw_json_reply_is_accepted() {
    let parser = parser(Fixed(
        r#"[
            {"operation_type": "add_text", "content": "第一段"},
            {"operation_type": "modify_text", "content": "新", "metadata": {"old_text": "旧"}}
        ]"#,
    ));

    let ops = parser.parse_instruction("anything", "").await;
    let kinds: Vec<_> = ops.iter().map(|op| op.kind).collect();
    assert_eq!(kinds, vec![OperationKind::AddText, OperationKind::ModifyText]);
}

#[tokio::test]
async fn test_model_operations_still_go_through_validation() {
    // Parsing keeps well-typed but incomplete operations; validation drops them
    let parser = parser(Fixed(
        r#"```json
[
  {"operation_type": "add_heading"},
  {"operation_type": "add_text", "content": "保留"}
]
```"#,
    ));

    let ops = parser.parse_instruction("whatever", "").await;
    assert_eq!(ops.len(), 2);

    let valid = validate(ops);
    assert_eq!(valid.len(), 1);
    assert_eq!(valid[0].content.as_deref(), Some("保留"));
}

#[tokio::test]
async fn test_non_array_reply_is_a_parse_error() {
    let parser = parser(Fixed(r#"{"operation_type": "add_text", "content": "x"}"#));
    assert!(matches!(
        parser.parse_with_model("x", "").await,
        Err(ParseError::NotAnArray)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_falls_back() {
    let parser = parser(Stalled);

    assert!(matches!(
        parser.parse_with_model("删除“旧段落”", "").await,
        Err(ParseError::Timeout(_))
    ));

    let ops = parser.parse_instruction("删除“旧段落”", "").await;
    assert_eq!(ops[0].kind, OperationKind::DeleteText);
    assert_eq!(ops[0].content.as_deref(), Some("旧段落"));
}

#[tokio::test]
async fn test_list_instruction_without_model() {
    let parser = CommandParser::heuristic_only();

    let ops = parser
        .parse_instruction("添加一个无序列表，包含以下项目：第一项、第二项", "")
        .await;

    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].kind, OperationKind::AddList);
    let items = ops[0].metadata.as_ref().and_then(|m| m.get("items")).cloned();
    assert_eq!(items, Some(serde_json::json!(["第一项", "第二项"])));
}

#[tokio::test]
async fn test_never_empty_for_odd_input() {
    let parser = parser(Fixed("```json\n[\n```"));
    for instruction in ["", "？", "表", "delete", "heading"] {
        let ops = parser.parse_instruction(instruction, "").await;
        assert!(!ops.is_empty(), "no operations for {:?}", instruction);
    }
}
