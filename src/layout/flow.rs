use crate::error::Result;
use crate::geometry::{Axis, Locus, Size};
use crate::render::{Surface, Theme};

use super::node::{Hierarchical, LayoutItem, LayoutNode, Paintable, Sizeable};

/// Equally sized items flowed left to right, top to bottom.
///
/// A fitted grid sizes its items so they form a near-square block filling
/// the rect. Leftover width on each row is spread between the columns.
pub struct FlowGrid {
    node: LayoutNode,
    items: Vec<Box<dyn LayoutItem>>,
    item_size: Size,
    fit_items: bool,
    springy: bool,
    spacing: i32,
    columns: Vec<i32>,
}

impl FlowGrid {
    /// Items of a constant size.
    pub fn with_item_size(node: LayoutNode, item_size: Size) -> Self {
        Self {
            node,
            items: Vec::new(),
            item_size,
            fit_items: false,
            springy: true,
            spacing: 0,
            columns: Vec::new(),
        }
    }

    /// Items resized on every pass to fill the rect.
    pub fn fitted(node: LayoutNode) -> Self {
        Self {
            fit_items: true,
            ..Self::with_item_size(node, Size::default())
        }
    }

    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing.max(0);
        self
    }

    /// Without spring every column shifts by the same share of the slack.
    pub fn with_springy(mut self, springy: bool) -> Self {
        self.springy = springy;
        self
    }

    pub fn push(&mut self, item: impl LayoutItem + 'static) -> usize {
        self.items.push(Box::new(item));
        self.items.len() - 1
    }

    pub fn item(&self, index: usize) -> Option<&dyn LayoutItem> {
        self.items.get(index).map(|item| item.as_ref())
    }

    pub fn item_size(&self) -> Size {
        self.item_size
    }

    /// Column start positions from the last measure.
    pub fn columns(&self) -> &[i32] {
        &self.columns
    }

    fn visible_count(&self) -> usize {
        self.items.iter().filter(|item| !item.is_hidden()).count()
    }

    /// Pick an item size so the items form a near-square block.
    pub fn item_size_calculate(&mut self) {
        let count = self.visible_count() as i32;
        let root = (count as f64).sqrt().ceil() as i32;
        let mut extent = (root, root);
        // drop the last row when it would stay empty
        if count <= root * root - root {
            extent.1 -= 1;
        }

        let rect = self.node.rect.get();
        let mut size = Size::new(rect.width(), rect.height());
        if count > 1 {
            let padding = self.node.padding;
            let gaps = ((extent.0 - 1).max(0), (extent.1 - 1).max(0));
            size.width -= padding.left() + padding.right() + self.spacing * gaps.0;
            size.height -= padding.top() + padding.bottom() + self.spacing * gaps.1;
            size.width = (size.width / extent.0.max(1)).max(0);
            size.height = (size.height / extent.1.max(1)).max(0);
        }
        self.item_size = size;
    }

    /// Fill `columns` with the item starts that fit in `left..right` and
    /// return the row height. The first item is always admitted.
    fn find_dimensions(&mut self, left: i32, right: i32) -> i32 {
        let padding = self.node.padding;
        let mut run_right = left;
        let mut height = 0;
        self.columns.clear();

        for count in 0..self.visible_count() {
            let run = run_right + padding.left() + self.item_size.width + padding.right();
            if run > right && count > 0 {
                break;
            }
            self.columns.push(run_right + padding.left());
            run_right = run;
            height = height.max(self.item_size.height);
        }

        let slack = right - run_right;
        if slack > 0 && !self.columns.is_empty() {
            let step = slack / (self.columns.len() as i32 + 1);
            let mut offset = step;
            for start in &mut self.columns {
                *start += offset;
                if self.springy {
                    offset += step;
                }
            }
        }
        height
    }
}

impl Sizeable for FlowGrid {
    fn node(&self) -> &LayoutNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut LayoutNode {
        &mut self.node
    }

    fn desired_track(&mut self, axis: Axis, rail: i32) -> u32 {
        let padding = self.node.padding;
        let count = self.visible_count() as i32;
        if axis == Axis::Horizontal {
            let cell = padding.left() + self.item_size.width + padding.right();
            return (cell * count).max(0) as u32;
        }

        let left = self.node.rect.left();
        let height = self.find_dimensions(left, left + rail);
        let vertical_padding = padding.top() + padding.bottom();
        if self.columns.is_empty() {
            return vertical_padding.max(0) as u32;
        }
        let rows = (count + self.columns.len() as i32 - 1) / self.columns.len() as i32;
        let gaps = if rows > 1 { (rows - 1) * self.spacing } else { 0 };
        (rows * height + gaps + vertical_padding).max(0) as u32
    }

    fn try_layout_children(&mut self) -> Result<()> {
        if self.fit_items {
            self.item_size_calculate();
        }
        let rect = self.node.rect.get();
        let height = self.find_dimensions(rect.left(), rect.right());
        if self.columns.is_empty() {
            return Ok(());
        }

        let size = self.item_size;
        let mut top = rect.top() + self.node.padding.top();
        let mut visible = self.items.iter_mut().filter(|item| !item.is_hidden());
        'rows: loop {
            for &start in &self.columns {
                let Some(item) = visible.next() else {
                    break 'rows;
                };
                item.rect()
                    .set_anchored(Locus::UPPER_LEFT, start, top, size.width, size.height);
                item.layout_children();
            }
            top += height + self.spacing;
        }
        Ok(())
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.node.hidden = hidden;
        for item in &mut self.items {
            item.set_hidden(hidden);
        }
    }
}

impl Paintable for FlowGrid {
    fn paint(&self, surface: &mut dyn Surface, theme: &Theme) {
        if self.node.hidden {
            return;
        }
        self.node.paint_background(surface, theme);
        for item in self.items.iter().filter(|item| !item.is_hidden()) {
            item.paint(surface, theme);
        }
    }
}

impl Hierarchical for FlowGrid {
    fn visit_children(&self, visit: &mut dyn FnMut(&dyn LayoutItem)) {
        for item in &self.items {
            visit(item.as_ref());
        }
    }

    fn visit_children_mut(&mut self, visit: &mut dyn FnMut(&mut dyn LayoutItem)) {
        for item in &mut self.items {
            visit(item.as_mut());
        }
    }

    fn child_count(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::layout::LayoutLeaf;

    fn grid_with(mut grid: FlowGrid, count: usize) -> FlowGrid {
        for _ in 0..count {
            grid.push(LayoutLeaf::new(LayoutNode::fixed(0)));
        }
        grid
    }

    #[test]
    fn fitted_grid_tiles_a_square() {
        let mut grid = grid_with(FlowGrid::fitted(LayoutNode::flexible()), 4);
        grid.rect().set(0, 0, 20, 20);
        assert!(grid.layout_children());
        assert_eq!(grid.item_size(), Size::new(10, 10));
        assert_eq!(grid.item(3).unwrap().rect().get(), Rect::new(10, 10, 20, 20));
    }

    #[test]
    fn fitted_grid_drops_an_empty_row() {
        let mut grid = grid_with(FlowGrid::fitted(LayoutNode::flexible()), 2);
        grid.rect().set(0, 0, 20, 20);
        grid.item_size_calculate();
        assert_eq!(grid.item_size(), Size::new(10, 20));
    }

    #[test]
    fn slack_springs_columns_apart() {
        let node = LayoutNode::flexible();
        let mut grid = grid_with(FlowGrid::with_item_size(node, Size::new(4, 2)), 3);
        grid.rect().set(0, 0, 20, 10);
        assert!(grid.layout_children());
        assert_eq!(grid.columns(), &[2, 8, 14]);

        let mut flat = grid_with(
            FlowGrid::with_item_size(LayoutNode::flexible(), Size::new(4, 2)).with_springy(false),
            3,
        );
        flat.rect().set(0, 0, 20, 10);
        assert!(flat.layout_children());
        assert_eq!(flat.columns(), &[2, 6, 10]);
    }

    #[test]
    fn desired_height_counts_rows_and_spacing() {
        let node = LayoutNode::flexible();
        let mut grid = grid_with(
            FlowGrid::with_item_size(node, Size::new(4, 2)).with_spacing(1),
            7,
        );
        assert_eq!(grid.desired_track(Axis::Vertical, 20), 2 * 2 + 1);
        assert_eq!(grid.desired_track(Axis::Horizontal, 0), 28);
    }

    #[test]
    fn empty_grid_is_harmless() {
        let mut grid = FlowGrid::fitted(LayoutNode::flexible().with_padding(Rect::new(0, 1, 0, 2)));
        grid.rect().set(0, 0, 10, 10);
        assert!(grid.layout_children());
        assert_eq!(grid.desired_track(Axis::Vertical, 10), 3);
    }
}
