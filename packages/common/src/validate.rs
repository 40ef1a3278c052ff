//! Operation validation
//!
//! A pure, order-preserving filter: well-formed operations pass through,
//! everything else is logged and dropped. The document is never touched.

use crate::Operation;
use tracing::warn;

/// Keep only operations that convert to an [`Edit`](crate::Edit)
pub fn validate(operations: Vec<Operation>) -> Vec<Operation> {
    let total = operations.len();

    let valid: Vec<Operation> = operations
        .into_iter()
        .enumerate()
        .filter_map(|(index, operation)| match operation.to_edit() {
            Ok(_) => Some(operation),
            Err(reason) => {
                warn!(index, kind = %operation.kind, %reason, "Dropping invalid operation");
                None
            }
        })
        .collect();

    if valid.len() < total {
        warn!(total, valid = valid.len(), "Some operations failed validation");
    }

    valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OperationKind, TableSpec};
    use serde_json::json;

    #[test]
    fn test_required_fields_per_kind() {
        let cases = vec![
            (Operation::new(OperationKind::AddText), false),
            (Operation::add_text(""), false),
            (Operation::add_text("hello"), true),
            (Operation::new(OperationKind::DeleteText), false),
            (Operation::delete_text("hello"), true),
            (Operation::new(OperationKind::AddHeading), false),
            (Operation::add_heading("Title", 2), true),
            (Operation::new(OperationKind::AddTable), false),
            (Operation::add_table(TableSpec::new(2, 2)), true),
            (Operation::add_table(TableSpec::new(0, 2)), false),
            (Operation::new(OperationKind::ModifyText).with_content("new"), false),
            (
                Operation::new(OperationKind::ModifyText)
                    .with_content("new")
                    .with_metadata("old_text", json!("")),
                false,
            ),
            (Operation::modify_text("old", "new"), true),
            (Operation::new(OperationKind::AddList), false),
            (
                Operation::new(OperationKind::AddList).with_metadata("items", json!([])),
                false,
            ),
            (Operation::add_list(["a"], false), true),
            (Operation::new(OperationKind::SetStyle), true),
            (Operation::new(OperationKind::SetFont), true),
            (Operation::new(OperationKind::ModifyTable), true),
            (Operation::new(OperationKind::DeleteTable), true),
            (Operation::new(OperationKind::InsertImage), true),
        ];

        for (operation, expected) in cases {
            let kept = validate(vec![operation.clone()]);
            assert_eq!(kept.len() == 1, expected, "unexpected verdict for {:?}", operation);
        }
    }

    #[test]
    fn test_validate_is_stable_subsequence() {
        let input = vec![
            Operation::add_text("first"),
            Operation::new(OperationKind::AddText),
            Operation::add_heading("second", 1),
            Operation::new(OperationKind::AddTable),
            Operation::delete_text("third"),
        ];

        let output = validate(input.clone());
        assert_eq!(output, vec![input[0].clone(), input[2].clone(), input[4].clone()]);
    }

    #[test]
    fn test_malformed_position_rejected() {
        let op = Operation::add_text("x").with_position("after:last");
        assert!(validate(vec![op]).is_empty());

        let op = Operation::add_text("x").with_position("after:99");
        assert_eq!(validate(vec![op]).len(), 1);
    }
}
