use crate::error::{LayoutError, Result};
use crate::geometry::{Axis, Rect, SmartRect};
use crate::render::{Surface, Theme};

use super::node::{Hierarchical, LayoutItem, LayoutLeaf, LayoutNode, Paintable, Sizeable, Sizing};
use super::stack::LayoutStack;

// Upper bound on width/height refinement rounds in one pass.
const SETTLE_PASSES: usize = 4;

/// One table row: a rect spanning the table width plus its cells.
pub struct TableRow {
    node: LayoutNode,
    cells: Vec<Box<dyn LayoutItem>>,
}

impl TableRow {
    pub fn rect(&self) -> &SmartRect {
        &self.node.rect
    }

    pub fn cells(&self) -> impl Iterator<Item = &dyn LayoutItem> {
        self.cells.iter().map(|cell| cell.as_ref())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Rows of cells crossed with one shared horizontal column stack.
///
/// Flexible columns are as wide as the widest single-column cell that
/// starts in them. A cell's `span` merges that many extra columns to its
/// right. Row height is the tallest cell at its merged width; shorter
/// cells are centred in the row band.
pub struct Table {
    node: LayoutNode,
    columns: LayoutStack,
    rows: Vec<TableRow>,
    margin: i32,
    row_heights: Vec<i32>,
}

impl Table {
    pub fn new(node: LayoutNode) -> Self {
        Self {
            node,
            columns: LayoutStack::horizontal(LayoutNode::flexible()),
            rows: Vec::new(),
            margin: 0,
            row_heights: Vec::new(),
        }
    }

    /// Gap between rows and between columns.
    pub fn with_margin(mut self, margin: i32) -> Self {
        self.margin = margin.max(0);
        self.columns.set_margin(self.margin);
        self
    }

    pub fn margin(&self) -> i32 {
        self.margin
    }

    pub fn add_column(&mut self, node: LayoutNode) -> usize {
        self.columns.push(LayoutLeaf::new(node))
    }

    pub fn add_row(&mut self, node: LayoutNode) -> usize {
        self.rows.push(TableRow {
            node,
            cells: Vec::new(),
        });
        self.rows.len() - 1
    }

    pub fn add_cell(&mut self, row: usize, cell: impl LayoutItem + 'static) -> Result<()> {
        let len = self.rows.len();
        let target = self
            .rows
            .get_mut(row)
            .ok_or(LayoutError::IndexOutOfRange { index: row, len })?;
        target.cells.push(Box::new(cell));
        Ok(())
    }

    /// Append a cell to the most recently added row.
    pub fn push_cell(&mut self, cell: impl LayoutItem + 'static) -> Result<()> {
        let row = self
            .rows
            .last_mut()
            .ok_or_else(|| LayoutError::InvalidOperation("add a row before adding cells".into()))?;
        row.cells.push(Box::new(cell));
        Ok(())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column(&self, index: usize) -> Option<&SmartRect> {
        self.columns.child(index).map(|column| column.rect())
    }

    pub fn row(&self, index: usize) -> Option<&TableRow> {
        self.rows.get(index)
    }

    pub fn cell(&self, row: usize, index: usize) -> Option<&dyn LayoutItem> {
        self.rows.get(row)?.cells.get(index).map(|cell| cell.as_ref())
    }

    /// Heights from the last measuring pass.
    pub fn row_heights(&self) -> &[i32] {
        &self.row_heights
    }

    fn check_spans(&self) -> Result<()> {
        let len = self.columns.len();
        for row in &self.rows {
            let mut cursor = 0;
            for cell in &row.cells {
                let last = cursor + cell.node().span;
                if last >= len {
                    return Err(LayoutError::IndexOutOfRange { index: last, len });
                }
                cursor = last + 1;
            }
        }
        Ok(())
    }

    fn column_rects(&self) -> Vec<Rect> {
        self.columns.children().map(|column| column.rect().get()).collect()
    }

    /// Size the columns for `width`, then measure every row.
    ///
    /// Flexible columns are measured against row heights, which depend on
    /// the column widths. Both are settled here starting from the table
    /// height, so the result depends only on the current rects.
    ///
    /// Returns the total height including one margin per row.
    pub fn compute_height(&mut self, width: i32) -> Result<i32> {
        self.check_spans()?;

        let rect = self.node.rect.get();
        let rail = rect.height().max(1);
        self.columns
            .rect()
            .set(rect.left(), rect.top(), rect.left() + width, rect.top() + rail);

        let mut rails = vec![rail; self.rows.len()];
        let mut total = 0;
        for _ in 0..SETTLE_PASSES {
            self.size_flexible_columns(&rails);
            self.columns.try_layout_children()?;
            total = self.measure_rows();

            let settled: Vec<i32> = self
                .row_heights
                .iter()
                .map(|&height| if height > 0 { height } else { rail })
                .collect();
            if settled == rails {
                break;
            }
            rails = settled;
        }
        Ok(total)
    }

    fn size_flexible_columns(&mut self, rails: &[i32]) {
        for column in 0..self.columns.len() {
            let flexible = self
                .columns
                .child(column)
                .is_some_and(|item| item.node().sizing == Sizing::Flexible);
            if !flexible {
                continue;
            }
            let mut widest = 0u32;
            for (row, row_rail) in self.rows.iter_mut().zip(rails) {
                let mut cursor = 0;
                for cell in row.cells.iter_mut() {
                    let span = cell.node().span;
                    if cursor == column && span == 0 && !cell.is_hidden() {
                        widest = widest.max(cell.desired_track(Axis::Horizontal, *row_rail));
                    }
                    cursor += span + 1;
                }
            }
            if let Some(item) = self.columns.child_mut(column) {
                item.node_mut().track = widest;
            }
        }
    }

    fn measure_rows(&mut self) -> i32 {
        let columns = self.column_rects();
        let mut heights = Vec::with_capacity(self.rows.len());
        let mut total = 0;
        for row in self.rows.iter_mut() {
            if row.node.hidden {
                heights.push(0);
                continue;
            }
            let mut cursor = 0;
            let mut height = 0;
            for cell in row.cells.iter_mut() {
                let last = cursor + cell.node().span;
                let width = columns[last].right() - columns[cursor].left();
                if !cell.is_hidden() {
                    height = height.max(cell.desired_track(Axis::Vertical, width) as i32);
                }
                cursor = last + 1;
            }
            heights.push(height);
            total += height + self.margin;
        }
        self.row_heights = heights;
        total
    }
}

impl Sizeable for Table {
    fn node(&self) -> &LayoutNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut LayoutNode {
        &mut self.node
    }

    fn desired_track(&mut self, axis: Axis, rail: i32) -> u32 {
        match axis {
            Axis::Vertical => self.compute_height(rail).map_or(0, |height| height.max(0) as u32),
            Axis::Horizontal => {
                let mut total = 0u32;
                for column in 0..self.columns.len() {
                    let Some(item) = self.columns.child(column) else {
                        continue;
                    };
                    let node = item.node();
                    let width = match node.sizing {
                        Sizing::Fixed => node.track,
                        // last measured width; measuring afresh needs a layout pass
                        Sizing::Flexible => item.rect().width().max(0) as u32,
                        Sizing::Percent | Sizing::Auto => 0,
                    };
                    total = total.saturating_add(width);
                }
                let gaps = self.margin * self.columns.len().saturating_sub(1) as i32;
                total.saturating_add(gaps as u32)
            }
        }
    }

    fn try_layout_children(&mut self) -> Result<()> {
        let rect = self.node.rect.get();
        self.compute_height(rect.width())?;

        let columns = self.column_rects();
        let mut top = rect.top();
        for (index, row) in self.rows.iter_mut().enumerate() {
            if row.node.hidden {
                continue;
            }
            let height = self.row_heights[index];
            row.node.rect.set(rect.left(), top, rect.right(), top + height);

            let mut cursor = 0;
            for cell in row.cells.iter_mut() {
                let last = cursor + cell.node().span;
                let left = columns[cursor].left();
                let right = columns[last].right();
                cursor = last + 1;
                if cell.is_hidden() {
                    continue;
                }

                let wanted = cell.desired_track(Axis::Vertical, right - left) as i32;
                let (cell_top, mut cell_bottom) = (top, top + height);
                let cell_top = if wanted < height {
                    let slack = (height - wanted) / 2;
                    cell_bottom -= slack;
                    cell_top + slack
                } else {
                    cell_top
                };
                cell.rect().set(left, cell_top, right, cell_bottom.max(cell_top));
                cell.layout_children();
            }
            top += height + self.margin;
        }
        Ok(())
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.node.hidden = hidden;
        for row in &mut self.rows {
            for cell in &mut row.cells {
                cell.set_hidden(hidden);
            }
        }
    }
}

impl Paintable for Table {
    fn paint(&self, surface: &mut dyn Surface, theme: &Theme) {
        if self.node.hidden {
            return;
        }
        self.node.paint_background(surface, theme);

        let rect = self.node.rect.get();
        for (index, column) in self.columns.children().enumerate() {
            if let Some(color) = theme.stripe(index) {
                let band = column.rect().get();
                let stripe = Rect::new(band.left(), rect.top(), band.right(), rect.bottom());
                surface.fill_rect(&stripe, color);
            }
        }

        for row in self.rows.iter().filter(|row| !row.node.hidden) {
            for cell in row.cells.iter().filter(|cell| !cell.is_hidden()) {
                cell.paint(surface, theme);
            }
        }
    }
}

impl Hierarchical for Table {
    fn visit_children(&self, visit: &mut dyn FnMut(&dyn LayoutItem)) {
        for cell in self.rows.iter().flat_map(|row| row.cells.iter()) {
            visit(cell.as_ref());
        }
    }

    fn visit_children_mut(&mut self, visit: &mut dyn FnMut(&mut dyn LayoutItem)) {
        for cell in self.rows.iter_mut().flat_map(|row| row.cells.iter_mut()) {
            visit(cell.as_mut());
        }
    }

    fn child_count(&self) -> usize {
        self.rows.iter().map(TableRow::len).sum()
    }
}
