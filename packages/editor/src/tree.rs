//! # Document Tree
//!
//! Ordered blocks: paragraphs, tables and images. A paragraph is addressed by
//! its position among paragraphs only; tables and images do not count.
//!
//! The tree is also the native on-disk format (serialized as JSON).

use scribe_common::{Rgb, Style, TableSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentTree {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    Image(Image),
}

impl DocumentTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        self.blocks.iter_mut().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs().count()
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn table_count(&self) -> usize {
        self.tables().count()
    }

    /// Block index of the `index`-th paragraph
    pub fn paragraph_block_index(&self, index: usize) -> Option<usize> {
        Self::nth_block_where(&self.blocks, index, |b| matches!(b, Block::Paragraph(_)))
    }

    /// Block index of the `index`-th table
    pub fn table_block_index(&self, index: usize) -> Option<usize> {
        Self::nth_block_where(&self.blocks, index, |b| matches!(b, Block::Table(_)))
    }

    fn nth_block_where(blocks: &[Block], n: usize, pred: impl Fn(&Block) -> bool) -> Option<usize> {
        blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| pred(block))
            .nth(n)
            .map(|(i, _)| i)
    }

    /// Paragraph texts joined by newlines, in tree order
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// What a paragraph is, beyond its text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum ParagraphKind {
    #[default]
    Body,
    Heading { level: u8 },
    ListItem { ordered: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub kind: ParagraphKind,

    #[serde(default)]
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, kind: ParagraphKind) -> Self {
        Self {
            kind,
            runs: vec![Run::plain(text)],
        }
    }

    pub fn body(text: impl Into<String>) -> Self {
        Self::new(text, ParagraphKind::Body)
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Replace the text with a single run. The first run's formatting is kept.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let format = self
            .runs
            .first()
            .map(|run| run.format.clone())
            .unwrap_or_default();
        self.runs = vec![Run {
            text: text.into(),
            format,
        }];
    }

    /// Apply `style` to every run
    pub fn apply_style(&mut self, style: &Style) {
        for run in &mut self.runs {
            run.format.apply(style);
        }
    }
}

/// A span of text sharing one format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,

    #[serde(default, skip_serializing_if = "RunFormat::is_plain")]
    pub format: RunFormat,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: RunFormat::default(),
        }
    }
}

/// Concrete character formatting. `None` means inherited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
}

impl RunFormat {
    pub fn is_plain(&self) -> bool {
        self == &RunFormat::default()
    }

    /// Overlay the fields `style` sets. A malformed color is skipped.
    pub fn apply(&mut self, style: &Style) {
        if let Some(name) = &style.font_name {
            self.font_name = Some(name.clone());
        }
        if let Some(size) = style.font_size {
            self.font_size = Some(size);
        }
        if style.bold.is_some() {
            self.bold = style.bold;
        }
        if style.italic.is_some() {
            self.italic = style.italic;
        }
        if style.underline.is_some() {
            self.underline = style.underline;
        }
        if let Some(rgb) = style.rgb() {
            self.color = Some(rgb);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,

    #[serde(default, skip_serializing_if = "RunFormat::is_plain")]
    pub format: RunFormat,
}

impl Table {
    /// Blank `rows` x `cols` grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: vec![vec![Cell::default(); cols]; rows],
        }
    }

    /// Grid sized by `spec` and filled from it.
    ///
    /// Headers go to row 0 in bold; data rows follow (from row 0 when there
    /// are no headers). Cells beyond the grid are dropped, missing ones stay
    /// blank.
    pub fn from_spec(spec: &TableSpec) -> Self {
        let mut table = Self::new(spec.rows, spec.cols);

        if let Some(headers) = &spec.headers {
            if let Some(row) = table.rows.first_mut() {
                for (cell, header) in row.iter_mut().zip(headers) {
                    cell.text = header.clone();
                    cell.format.bold = Some(true);
                }
            }
        }

        if let Some(data) = &spec.data {
            let start = usize::from(spec.headers.is_some());
            for (row, values) in table.rows.iter_mut().skip(start).zip(data) {
                for (cell, value) in row.iter_mut().zip(values) {
                    cell.text = value.clone();
                }
            }
        }

        table
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row).and_then(|r| r.get_mut(col))
    }

    pub fn apply_style(&mut self, style: &Style) {
        for cell in self.rows.iter_mut().flatten() {
            cell.format.apply(style);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub path: String,

    /// Inches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}
