//! Tests for sequences of operations applied in one batch
//!
//! Paragraph indices are positional, so earlier operations in a batch shift
//! the targets of later ones.

use scribe_common::{Operation, OperationKind, Position};
use scribe_editor::Document;
use serde_json::json;

fn document(paragraphs: &[&str]) -> Document {
    let mut doc = Document::new();
    for text in paragraphs {
        doc.add_text(text, Position::End, None);
    }
    doc
}

#[test]
fn test_delete_then_insert_after_uses_shifted_index() {
    let mut doc = document(&["zero", "one", "two"]);

    let results = doc.execute_operations(&[
        Operation::delete_text("zero"),
        Operation::add_text("inserted").with_position("after:0"),
    ]);

    assert_eq!(results, vec![true, true]);
    assert_eq!(doc.text(), "one\ninserted\ntwo");
}

#[test]
fn test_insert_beginning_then_modify() {
    let mut doc = document(&["body"]);

    doc.execute_operations(&[
        Operation::add_text("draft title").with_position("beginning"),
        Operation::modify_text("draft", "final"),
    ]);

    assert_eq!(doc.text(), "final title\nbody");
}

#[test]
fn test_delete_every_matching_paragraph() {
    let mut doc = document(&["TODO", "keep", "TODO", "TODO: later"]);

    let results = doc.execute_operations(&[Operation::delete_text("TODO")]);

    assert_eq!(results, vec![true]);
    assert_eq!(doc.text(), "keep\n: later");
    assert_eq!(doc.paragraph_count(), 2);
}

#[test]
fn test_failed_operations_do_not_change_version() {
    let mut doc = document(&["alpha"]);
    let start = doc.version;

    let results = doc.execute_operations(&[
        Operation::modify_text("beta", "gamma"),
        Operation::new(OperationKind::ModifyTable),
        Operation::new(OperationKind::SetStyle),
        Operation::add_text("ok"),
    ]);

    assert_eq!(results, vec![false, false, false, true]);
    assert_eq!(doc.version, start + 1);
}

#[test]
fn test_table_lifecycle_in_one_batch() {
    let mut doc = Document::new();

    let results = doc.execute_operations(&[
        Operation::add_table(scribe_common::TableSpec::new(2, 2).with_headers(["Name", "Score"])),
        Operation::new(OperationKind::ModifyTable)
            .with_content("Ada")
            .with_metadata("row", json!(1))
            .with_metadata("col", json!(0)),
        Operation::new(OperationKind::DeleteTable).with_metadata("table_index", json!(1)),
    ]);

    assert_eq!(results, vec![true, true, false]);
    let table = doc.tree().tables().next().unwrap();
    assert_eq!(table.rows[1][0].text, "Ada");
}
