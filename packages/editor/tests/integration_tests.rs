//! Integration tests for editor crate

use scribe_common::{Operation, OperationKind, TableSpec};
use scribe_editor::{Block, Document, ParagraphKind};
use serde_json::json;

#[test]
fn test_document_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.sdoc");

    // Create and edit
    let mut doc = Document::new();
    let results = doc.execute_operations(&[
        Operation::add_heading("Report", 1),
        Operation::add_text("Intro"),
    ]);
    assert_eq!(results, vec![true, true]);
    assert_eq!(doc.text(), "Report\nIntro");

    // Save, reload, keep editing
    doc.save(&path).unwrap();
    let mut reloaded = Document::load(&path).unwrap();
    assert_eq!(reloaded.version, 0);
    assert_eq!(reloaded.text(), "Report\nIntro");

    reloaded.execute_operations(&[Operation::modify_text("Intro", "Introduction")]);
    assert_eq!(reloaded.text(), "Report\nIntroduction");
    assert!(reloaded.is_dirty());
}

#[test]
fn test_table_insertion_leaves_text_unchanged() {
    let mut doc = Document::new();
    doc.execute_operations(&[Operation::add_text("Summary")]);
    let before = doc.text();

    let spec = TableSpec::new(2, 2)
        .with_headers(["A", "B"])
        .with_data(vec![vec!["1".to_string(), "2".to_string()]]);
    let results = doc.execute_operations(&[Operation::add_table(spec)]);

    assert_eq!(results, vec![true]);
    assert_eq!(doc.text(), before);

    let table = doc.tree().tables().next().expect("table inserted");
    assert_eq!(table.rows[0][0].text, "A");
    assert_eq!(table.rows[0][0].format.bold, Some(true));
    assert_eq!(table.rows[1][1].text, "2");
}

#[test]
fn test_operations_from_model_json() -> anyhow::Result<()> {
    let payload = json!([
        {"operation_type": "add_heading", "content": "计划", "metadata": {"level": 2}},
        {"operation_type": "add_list", "metadata": {"items": ["调研", "开发"], "ordered": true}},
        {"operation_type": "add_text", "content": "备注", "position": "beginning",
         "style": {"italic": true, "color": "not-a-color"}}
    ]);
    let operations: Vec<Operation> = serde_json::from_value(payload)?;

    let mut doc = Document::new();
    let results = doc.execute_operations(&operations);

    assert_eq!(results, vec![true, true, true]);
    assert_eq!(doc.text(), "备注\n计划\n调研\n开发");

    let kinds: Vec<ParagraphKind> = doc.tree().paragraphs().map(|p| p.kind).collect();
    assert_eq!(kinds[1], ParagraphKind::Heading { level: 2 });
    assert_eq!(kinds[2], ParagraphKind::ListItem { ordered: true });

    let note = doc.tree().paragraphs().next().unwrap();
    assert_eq!(note.runs[0].format.italic, Some(true));
    assert_eq!(note.runs[0].format.color, None);
    Ok(())
}

#[test]
fn test_image_and_table_blocks_persist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blocks.sdoc");

    let mut doc = Document::new();
    doc.execute_operations(&[
        Operation::add_table(TableSpec::new(1, 2)),
        Operation::new(OperationKind::InsertImage)
            .with_content("figure.png")
            .with_metadata("width", json!(3.5)),
    ]);
    doc.save(&path).unwrap();

    let loaded = Document::load(&path).unwrap();
    assert!(matches!(loaded.tree().blocks[0], Block::Table(_)));
    match &loaded.tree().blocks[1] {
        Block::Image(image) => {
            assert_eq!(image.path, "figure.png");
            assert_eq!(image.width, Some(3.5));
        }
        other => panic!("Expected image, got {:?}", other),
    }
}
