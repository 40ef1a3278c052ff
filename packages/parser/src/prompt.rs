//! Prompt for the model tier.
//!
//! The field names listed here are the wire contract with the model and
//! match [`Operation`](scribe_common::Operation)'s serialized form.

/// Characters of the current document included as context
pub const DOCUMENT_CONTEXT_CHARS: usize = 1000;

const INSTRUCTION_PARSE_TEMPLATE: &str = r##"You are an assistant that edits word-processor documents.
Translate the user's instruction into concrete document operations.

Instruction: {instruction}
Current document content: {document}

Return a JSON array of operations. Each operation has these fields:
- operation_type: one of add_text, delete_text, modify_text, add_table, modify_table, delete_table, set_style, set_font, add_heading, add_list, insert_image
- content: the text the operation works with
- position: where to insert ("end", "beginning" or "after:<paragraph index>"), optional, default "end"
- style: optional text style
- table_data: optional table payload
- metadata: optional extra parameters

Operation notes:
1. add_text: add a paragraph of text
2. delete_text: delete the given text
3. modify_text: replace text; put the text to replace in metadata.old_text and the replacement in content
4. add_table: add a table described by table_data
5. add_heading: add a heading; put the level (1-9) in metadata.level
6. add_list: add a list; put the entries in metadata.items and true/false in metadata.ordered
7. set_style: style the paragraphs containing content (all paragraphs when content is empty)
8. set_font: like set_style, only font_name, font_size and color apply

Style fields:
- font_name: font family
- font_size: size in points (integer)
- bold, italic, underline: true/false
- color: hex color such as #FF0000

Reply with JSON only, no explanations:
```json
[
  {
    "operation_type": "add_text",
    "content": "text",
    "position": "end",
    "style": {
      "font_name": "font",
      "font_size": 12,
      "bold": false,
      "italic": false,
      "underline": false,
      "color": "#000000"
    },
    "table_data": {
      "rows": 2,
      "cols": 2,
      "headers": ["header 1", "header 2"],
      "data": [["cell 1", "cell 2"], ["cell 3", "cell 4"]]
    },
    "metadata": {
      "key": "value"
    }
  }
]
```
"##;

/// First `max_chars` characters of `text`
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Prompt asking the model to translate `instruction` into operations
pub fn instruction_prompt(instruction: &str, document_text: &str, context_chars: usize) -> String {
    INSTRUCTION_PARSE_TEMPLATE
        .replacen("{instruction}", instruction, 1)
        .replacen("{document}", truncate_chars(document_text, context_chars), 1)
}
