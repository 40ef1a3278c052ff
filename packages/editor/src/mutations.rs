//! # Document Mutations
//!
//! Edits applied to the document tree.
//!
//! ## Mutation Semantics
//!
//! ### AddText
//! - `beginning` inserts before the first paragraph
//! - `after:i` inserts right after paragraph `i`, or appends when `i` is out
//!   of range
//!
//! ### ModifyText
//! - Every occurrence in every matching paragraph is replaced
//! - Fails when no paragraph contains the old text
//!
//! ### DeleteText
//! - A paragraph whose trimmed text equals the trimmed target is removed
//! - Otherwise only the occurrences are stripped
//!
//! Only paragraphs are searched; table cells are left alone.

use crate::tree::{Block, Image, Paragraph, ParagraphKind, Table};
use crate::{Document, EditorError};
use scribe_common::{CellEdit, Edit, Position, Style, TableSpec};
use tracing::{debug, warn};

const MIN_HEADING_LEVEL: i64 = 1;
const MAX_HEADING_LEVEL: i64 = 9;

/// What [`Document::delete_text`] did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    /// Paragraphs removed outright
    pub removed: usize,
    /// Paragraphs that had occurrences stripped
    pub stripped: usize,
}

impl Document {
    /// Apply a single edit
    pub fn apply(&mut self, edit: &Edit) -> Result<(), EditorError> {
        debug!(kind = %edit.kind(), "Applying edit");

        match edit {
            Edit::AddText { content, position, style } => {
                self.add_text(content, *position, style.as_ref());
            }

            Edit::DeleteText { target } => {
                self.delete_text(target)?;
            }

            Edit::ModifyText { old, new, style } => {
                if !self.modify_text(old, new, style.as_ref())? {
                    return Err(EditorError::TextNotFound(old.clone()));
                }
            }

            Edit::AddTable { spec, style } => {
                self.add_table(spec, style.as_ref())?;
            }

            Edit::ModifyTable { index, cell, spec, style } => {
                self.modify_table(*index, cell.as_ref(), spec.as_ref(), style.as_ref())?;
            }

            Edit::DeleteTable { index } => {
                self.delete_table(*index)?;
            }

            Edit::SetStyle { target, style } => {
                let style = style.as_ref().ok_or(EditorError::MissingStyle)?;
                self.styled(target.as_deref(), style)?;
            }

            Edit::SetFont { target, style } => {
                let style = style.as_ref().ok_or(EditorError::MissingStyle)?.font_only();
                if style.is_empty() {
                    return Err(EditorError::MissingStyle);
                }
                self.styled(target.as_deref(), &style)?;
            }

            Edit::AddHeading { content, level, style } => {
                self.add_heading(content, *level, style.as_ref());
            }

            Edit::AddList { items, ordered, style } => {
                self.add_list(items, *ordered, style.as_ref());
            }

            Edit::InsertImage { path, width } => {
                let path = path.as_deref().ok_or(EditorError::MissingImagePath)?;
                self.insert_image(path, *width);
            }
        }

        self.touch();
        Ok(())
    }

    /// Insert a body paragraph. Returns its paragraph index.
    pub fn add_text(&mut self, content: &str, position: Position, style: Option<&Style>) -> usize {
        let mut paragraph = Paragraph::body(content);
        if let Some(style) = style {
            paragraph.apply_style(style);
        }

        let count = self.tree.paragraph_count();
        let (block_index, paragraph_index) = match position {
            Position::Beginning => (self.tree.paragraph_block_index(0).unwrap_or(0), 0),
            Position::After(i) if i < count => match self.tree.paragraph_block_index(i) {
                Some(block) => (block + 1, i + 1),
                None => (self.tree.blocks.len(), count),
            },
            Position::After(_) | Position::End => (self.tree.blocks.len(), count),
        };

        self.tree.blocks.insert(block_index, Block::Paragraph(paragraph));
        paragraph_index
    }

    /// Append a heading. Levels outside 1–9 are clamped.
    pub fn add_heading(&mut self, content: &str, level: i64, style: Option<&Style>) {
        let clamped = level.clamp(MIN_HEADING_LEVEL, MAX_HEADING_LEVEL);
        if clamped != level {
            warn!(level, clamped, "Heading level out of range");
        }

        let mut heading = Paragraph::new(
            content,
            ParagraphKind::Heading {
                level: clamped as u8,
            },
        );
        if let Some(style) = style {
            heading.apply_style(style);
        }
        self.tree.blocks.push(Block::Paragraph(heading));
    }

    /// Append a table built from `spec`. Returns the table index.
    pub fn add_table(&mut self, spec: &TableSpec, style: Option<&Style>) -> Result<usize, EditorError> {
        spec.check()?;

        let mut table = Table::from_spec(spec);
        if let Some(style) = style {
            table.apply_style(style);
        }

        let index = self.tree.table_count();
        self.tree.blocks.push(Block::Table(table));
        Ok(index)
    }

    /// Replace `old` with `new` in every paragraph containing it.
    /// Returns whether any paragraph matched.
    pub fn modify_text(&mut self, old: &str, new: &str, style: Option<&Style>) -> Result<bool, EditorError> {
        if old.is_empty() {
            return Err(EditorError::EmptyTarget);
        }

        let mut modified = false;
        for paragraph in self.tree.paragraphs_mut() {
            let text = paragraph.text();
            if !text.contains(old) {
                continue;
            }

            paragraph.set_text(text.replace(old, new));
            if let Some(style) = style {
                paragraph.apply_style(style);
            }
            modified = true;
        }

        Ok(modified)
    }

    /// Remove `target` from every paragraph containing it; paragraphs that
    /// consist of nothing but the target are removed.
    pub fn delete_text(&mut self, target: &str) -> Result<DeleteSummary, EditorError> {
        if target.is_empty() {
            return Err(EditorError::EmptyTarget);
        }

        let trimmed_target = target.trim();
        let mut summary = DeleteSummary::default();

        self.tree.blocks.retain_mut(|block| {
            let Block::Paragraph(paragraph) = block else {
                return true;
            };

            let text = paragraph.text();
            if !text.contains(target) {
                return true;
            }

            if text.trim() == trimmed_target {
                summary.removed += 1;
                false
            } else {
                paragraph.set_text(text.replace(target, ""));
                summary.stripped += 1;
                true
            }
        });

        debug!(removed = summary.removed, stripped = summary.stripped, "Deleted text");
        Ok(summary)
    }

    /// Append one list-item paragraph per item
    pub fn add_list(&mut self, items: &[String], ordered: bool, style: Option<&Style>) {
        for item in items {
            let mut paragraph = Paragraph::new(item.as_str(), ParagraphKind::ListItem { ordered });
            if let Some(style) = style {
                paragraph.apply_style(style);
            }
            self.tree.blocks.push(Block::Paragraph(paragraph));
        }
    }

    /// Apply `style` to paragraphs containing `target`, or to every
    /// paragraph when `target` is `None`. Returns how many were styled.
    pub fn set_style(&mut self, target: Option<&str>, style: &Style) -> usize {
        let mut styled = 0;
        for paragraph in self.tree.paragraphs_mut() {
            if target.map_or(true, |t| paragraph.text().contains(t)) {
                paragraph.apply_style(style);
                styled += 1;
            }
        }
        styled
    }

    /// Like [`Document::set_style`] but only font name, size and color
    pub fn set_font(&mut self, target: Option<&str>, style: &Style) -> usize {
        self.set_style(target, &style.font_only())
    }

    fn styled(&mut self, target: Option<&str>, style: &Style) -> Result<(), EditorError> {
        let styled = self.set_style(target, style);
        match target {
            Some(target) if styled == 0 => Err(EditorError::TextNotFound(target.to_string())),
            _ => Ok(()),
        }
    }

    fn table_block(&self, index: Option<usize>) -> Result<usize, EditorError> {
        let found = match index {
            Some(i) => self.tree.table_block_index(i),
            None => self
                .tree
                .table_count()
                .checked_sub(1)
                .and_then(|last| self.tree.table_block_index(last)),
        };

        found.ok_or_else(|| {
            EditorError::TableNotFound(index.map_or_else(|| "last".to_string(), |i| i.to_string()))
        })
    }

    /// Edit one cell, or replace the whole table with `spec`.
    /// `index: None` targets the last table.
    pub fn modify_table(
        &mut self,
        index: Option<usize>,
        cell: Option<&CellEdit>,
        spec: Option<&TableSpec>,
        style: Option<&Style>,
    ) -> Result<(), EditorError> {
        let block = self.table_block(index)?;
        let Block::Table(table) = &mut self.tree.blocks[block] else {
            return Err(EditorError::TableNotFound(block.to_string()));
        };

        match (cell, spec) {
            (Some(edit), _) => {
                let (rows, cols) = (table.row_count(), table.col_count());
                let target = table.cell_mut(edit.row, edit.col).ok_or(EditorError::CellOutOfRange {
                    row: edit.row,
                    col: edit.col,
                    rows,
                    cols,
                })?;
                target.text = edit.content.clone();
                if let Some(style) = style {
                    target.format.apply(style);
                }
            }
            (None, Some(spec)) => {
                spec.check()?;
                *table = Table::from_spec(spec);
                if let Some(style) = style {
                    table.apply_style(style);
                }
            }
            (None, None) => return Err(EditorError::NothingToModify),
        }

        Ok(())
    }

    /// Remove a table. `index: None` removes the last one.
    pub fn delete_table(&mut self, index: Option<usize>) -> Result<(), EditorError> {
        let block = self.table_block(index)?;
        self.tree.blocks.remove(block);
        Ok(())
    }

    /// Append an image block
    pub fn insert_image(&mut self, path: &str, width: Option<f64>) {
        self.tree.blocks.push(Block::Image(Image {
            path: path.to_string(),
            width,
        }));
    }
}
