//! # Operations
//!
//! [`Operation`] is the loose wire shape shared with callers and with the
//! completion model. Field names (`operation_type`, `table_data`, ...) are a
//! compatibility contract and must not change.
//!
//! [`Edit`] is the typed form. [`Operation::to_edit`] is the only place
//! where per-kind required fields are checked.

use crate::{InvalidOperation, Style};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Kind-specific extra parameters (`old_text`, `level`, `items`, ...)
pub type Metadata = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    AddText,
    DeleteText,
    ModifyText,
    AddTable,
    ModifyTable,
    DeleteTable,
    SetStyle,
    SetFont,
    AddHeading,
    AddList,
    InsertImage,
}

impl OperationKind {
    pub const ALL: [OperationKind; 11] = [
        OperationKind::AddText,
        OperationKind::DeleteText,
        OperationKind::ModifyText,
        OperationKind::AddTable,
        OperationKind::ModifyTable,
        OperationKind::DeleteTable,
        OperationKind::SetStyle,
        OperationKind::SetFont,
        OperationKind::AddHeading,
        OperationKind::AddList,
        OperationKind::InsertImage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::AddText => "add_text",
            OperationKind::DeleteText => "delete_text",
            OperationKind::ModifyText => "modify_text",
            OperationKind::AddTable => "add_table",
            OperationKind::ModifyTable => "modify_table",
            OperationKind::DeleteTable => "delete_table",
            OperationKind::SetStyle => "set_style",
            OperationKind::SetFont => "set_font",
            OperationKind::AddHeading => "add_heading",
            OperationKind::AddList => "add_list",
            OperationKind::InsertImage => "insert_image",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = InvalidOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| InvalidOperation::UnknownKind(s.to_string()))
    }
}

/// Largest table an operation may ask for
pub const MAX_TABLE_ROWS: usize = 1000;
pub const MAX_TABLE_COLS: usize = 100;

/// Table payload (`table_data` on the wire)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    #[serde(default = "one")]
    pub rows: usize,

    #[serde(default = "one")]
    pub cols: usize,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "optional_cells")]
    pub headers: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "optional_rows")]
    pub data: Option<Vec<Vec<String>>>,
}

fn one() -> usize {
    1
}

impl TableSpec {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            headers: None,
            data: None,
        }
    }

    pub fn with_headers<S: Into<String>>(mut self, headers: impl IntoIterator<Item = S>) -> Self {
        self.headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_data(mut self, data: Vec<Vec<String>>) -> Self {
        self.data = Some(data);
        self
    }

    /// Grid dimensions must be non-zero and within [`MAX_TABLE_ROWS`] x [`MAX_TABLE_COLS`]
    pub fn check(&self) -> Result<(), InvalidOperation> {
        let (rows, cols) = (self.rows, self.cols);
        if rows == 0 || cols == 0 {
            return Err(InvalidOperation::EmptyTable { rows, cols });
        }
        if rows > MAX_TABLE_ROWS || cols > MAX_TABLE_COLS {
            return Err(InvalidOperation::TableTooLarge { rows, cols });
        }
        Ok(())
    }
}

/// Cells may arrive as numbers or booleans; they are stored as text.
fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn optional_cells<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let cells: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(cells.map(|cells| cells.into_iter().map(cell_text).collect()))
}

fn optional_rows<'de, D>(deserializer: D) -> Result<Option<Vec<Vec<String>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows: Option<Vec<Vec<Value>>> = Option::deserialize(deserializer)?;
    Ok(rows.map(|rows| {
        rows.into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect()
    }))
}

/// Where new text goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    End,
    Beginning,
    /// After the paragraph at this index
    After(usize),
}

impl FromStr for Position {
    type Err = InvalidOperation;

    /// Unrecognised words fall back to `End`; only a malformed `after:` index
    /// is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "beginning" {
            return Ok(Position::Beginning);
        }
        if let Some(index) = s.strip_prefix("after:") {
            return index
                .trim()
                .parse()
                .map(Position::After)
                .map_err(|_| InvalidOperation::InvalidPosition(s.to_string()));
        }
        Ok(Position::End)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::End => f.write_str("end"),
            Position::Beginning => f.write_str("beginning"),
            Position::After(index) => write!(f, "after:{}", index),
        }
    }
}

/// A single document edit as it travels over the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operation_type")]
    pub kind: OperationKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,

    #[serde(rename = "table_data", default, skip_serializing_if = "Option::is_none")]
    pub table: Option<TableSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Operation {
    pub fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            content: None,
            position: None,
            style: None,
            table: None,
            metadata: None,
        }
    }

    pub fn add_text(content: impl Into<String>) -> Self {
        Self::new(OperationKind::AddText).with_content(content)
    }

    pub fn delete_text(target: impl Into<String>) -> Self {
        Self::new(OperationKind::DeleteText).with_content(target)
    }

    pub fn modify_text(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self::new(OperationKind::ModifyText)
            .with_content(new)
            .with_metadata("old_text", Value::String(old.into()))
    }

    pub fn add_heading(content: impl Into<String>, level: u8) -> Self {
        Self::new(OperationKind::AddHeading)
            .with_content(content)
            .with_metadata("level", Value::from(level))
    }

    pub fn add_table(spec: TableSpec) -> Self {
        Self::new(OperationKind::AddTable).with_table(spec)
    }

    pub fn add_list<S: Into<String>>(items: impl IntoIterator<Item = S>, ordered: bool) -> Self {
        let items = items
            .into_iter()
            .map(|item| Value::String(item.into()))
            .collect();
        Self::new(OperationKind::AddList)
            .with_metadata("items", Value::Array(items))
            .with_metadata("ordered", Value::Bool(ordered))
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_table(mut self, table: TableSpec) -> Self {
        self.table = Some(table);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata
            .get_or_insert_with(Metadata::new)
            .insert(key.into(), value);
        self
    }

    fn meta(&self, key: &str) -> Option<&Value> {
        self.metadata.as_ref().and_then(|m| m.get(key))
    }

    fn meta_str(&self, key: &str) -> Option<&str> {
        self.meta(key).and_then(Value::as_str)
    }

    /// Integer metadata; numeric strings are accepted
    fn meta_int(&self, key: &str) -> Option<i64> {
        match self.meta(key)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn meta_index(&self, key: &str) -> Option<usize> {
        self.meta_int(key).and_then(|i| usize::try_from(i).ok())
    }

    fn meta_bool(&self, key: &str) -> Option<bool> {
        match self.meta(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn non_empty_content(&self) -> Result<String, InvalidOperation> {
        match self.content.as_deref() {
            Some(content) if !content.is_empty() => Ok(content.to_string()),
            _ => Err(InvalidOperation::MissingContent { kind: self.kind }),
        }
    }

    /// Check the fields this kind requires and build the typed edit
    pub fn to_edit(&self) -> Result<Edit, InvalidOperation> {
        let style = self.style.clone();

        let edit = match self.kind {
            OperationKind::AddText => Edit::AddText {
                content: self.non_empty_content()?,
                position: match self.position.as_deref() {
                    Some(position) => position.parse()?,
                    None => Position::End,
                },
                style,
            },

            OperationKind::DeleteText => Edit::DeleteText {
                target: self.non_empty_content()?,
            },

            OperationKind::ModifyText => {
                let new = self.non_empty_content()?;
                let old = match self.meta_str("old_text") {
                    Some(old) if !old.is_empty() => old.to_string(),
                    _ => return Err(InvalidOperation::MissingOldText),
                };
                Edit::ModifyText { old, new, style }
            }

            OperationKind::AddTable => {
                let spec = self.table.clone().ok_or(InvalidOperation::MissingTable)?;
                spec.check()?;
                Edit::AddTable { spec, style }
            }

            OperationKind::ModifyTable => {
                if let Some(spec) = &self.table {
                    spec.check()?;
                }
                let cell = match (self.meta_index("row"), self.meta_index("col")) {
                    (Some(row), Some(col)) => Some(CellEdit {
                        row,
                        col,
                        content: self.content.clone().unwrap_or_default(),
                    }),
                    _ => None,
                };
                Edit::ModifyTable {
                    index: self.meta_index("table_index"),
                    cell,
                    spec: self.table.clone(),
                    style,
                }
            }

            OperationKind::DeleteTable => Edit::DeleteTable {
                index: self.meta_index("table_index"),
            },

            OperationKind::SetStyle => Edit::SetStyle {
                target: self.content.clone().filter(|c| !c.is_empty()),
                style,
            },

            OperationKind::SetFont => Edit::SetFont {
                target: self.content.clone().filter(|c| !c.is_empty()),
                style,
            },

            OperationKind::AddHeading => Edit::AddHeading {
                content: self.non_empty_content()?,
                level: self.meta_int("level").unwrap_or(1),
                style,
            },

            OperationKind::AddList => {
                let items: Vec<String> = match self.meta("items") {
                    Some(Value::Array(items)) => {
                        items.iter().cloned().map(cell_text).collect()
                    }
                    _ => Vec::new(),
                };
                if items.is_empty() {
                    return Err(InvalidOperation::MissingItems);
                }
                Edit::AddList {
                    items,
                    ordered: self.meta_bool("ordered").unwrap_or(false),
                    style,
                }
            }

            OperationKind::InsertImage => Edit::InsertImage {
                path: self.content.clone().filter(|c| !c.is_empty()),
                width: self.meta("width").and_then(Value::as_f64),
            },
        };

        Ok(edit)
    }
}

/// Target cell for a single-cell table edit
#[derive(Debug, Clone, PartialEq)]
pub struct CellEdit {
    pub row: usize,
    pub col: usize,
    pub content: String,
}

/// Well-formed, typed edit. Produced only by [`Operation::to_edit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    AddText {
        content: String,
        position: Position,
        style: Option<Style>,
    },

    DeleteText {
        target: String,
    },

    /// Replace every occurrence of `old` with `new`
    ModifyText {
        old: String,
        new: String,
        style: Option<Style>,
    },

    AddTable {
        spec: TableSpec,
        style: Option<Style>,
    },

    /// Edit one cell, or replace the table contents with `spec`.
    /// `index: None` targets the last table.
    ModifyTable {
        index: Option<usize>,
        cell: Option<CellEdit>,
        spec: Option<TableSpec>,
        style: Option<Style>,
    },

    DeleteTable {
        index: Option<usize>,
    },

    /// Style paragraphs containing `target` (all paragraphs when `None`)
    SetStyle {
        target: Option<String>,
        style: Option<Style>,
    },

    /// Like `SetStyle`, restricted to font name, size and color
    SetFont {
        target: Option<String>,
        style: Option<Style>,
    },

    /// `level` is passed through as given; the editor clamps it
    AddHeading {
        content: String,
        level: i64,
        style: Option<Style>,
    },

    AddList {
        items: Vec<String>,
        ordered: bool,
        style: Option<Style>,
    },

    InsertImage {
        path: Option<String>,
        /// Inches
        width: Option<f64>,
    },
}

impl Edit {
    pub fn kind(&self) -> OperationKind {
        match self {
            Edit::AddText { .. } => OperationKind::AddText,
            Edit::DeleteText { .. } => OperationKind::DeleteText,
            Edit::ModifyText { .. } => OperationKind::ModifyText,
            Edit::AddTable { .. } => OperationKind::AddTable,
            Edit::ModifyTable { .. } => OperationKind::ModifyTable,
            Edit::DeleteTable { .. } => OperationKind::DeleteTable,
            Edit::SetStyle { .. } => OperationKind::SetStyle,
            Edit::SetFont { .. } => OperationKind::SetFont,
            Edit::AddHeading { .. } => OperationKind::AddHeading,
            Edit::AddList { .. } => OperationKind::AddList,
            Edit::InsertImage { .. } => OperationKind::InsertImage,
        }
    }
}
