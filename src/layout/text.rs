use crate::geometry::Axis;
use crate::render::{Surface, Theme};
use crate::width::{display_width, widest_line, wrap_to_width};

use super::node::{Align, Hierarchical, LayoutNode, Paintable, Sizeable};

/// Text measured in display cells.
///
/// Along a horizontal track it wants its widest line; along a vertical
/// track it wants as many rows as the text wraps to at the rail width.
#[derive(Debug, Clone)]
pub struct TextBlock {
    node: LayoutNode,
    text: String,
}

impl TextBlock {
    pub fn new(node: LayoutNode, text: impl Into<String>) -> Self {
        Self {
            node,
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Lines as painted at `width` cells.
    pub fn lines(&self, width: i32) -> Vec<String> {
        wrap_to_width(&self.text, width.max(0) as usize)
    }
}

impl Sizeable for TextBlock {
    fn node(&self) -> &LayoutNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut LayoutNode {
        &mut self.node
    }

    fn desired_track(&mut self, axis: Axis, rail: i32) -> u32 {
        match axis {
            Axis::Horizontal => widest_line(&self.text) as u32,
            Axis::Vertical => self.lines(rail).len() as u32,
        }
    }
}

impl Paintable for TextBlock {
    fn paint(&self, surface: &mut dyn Surface, theme: &Theme) {
        if self.node.hidden {
            return;
        }
        self.node.paint_background(surface, theme);

        let rect = self.node.rect.get();
        for (row, line) in self.lines(rect.width()).iter().enumerate() {
            let y = rect.top() + row as i32;
            if y >= rect.bottom() {
                break;
            }
            let slack = rect.width() - display_width(line) as i32;
            let x = match self.node.align {
                Align::Left => rect.left(),
                Align::Center => rect.left() + slack.max(0) / 2,
                Align::Right => rect.left() + slack.max(0),
            };
            surface.put_str(x, y, line, theme.text);
        }
    }
}

impl Hierarchical for TextBlock {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::CellSurface;

    #[test]
    fn measures_widest_line_and_wrapped_rows() {
        let mut block = TextBlock::new(LayoutNode::flexible(), "hello world\nhi");
        assert_eq!(block.desired_track(Axis::Horizontal, 1), 11);
        assert_eq!(block.desired_track(Axis::Vertical, 5), 3);
        assert_eq!(block.desired_track(Axis::Vertical, 20), 2);
    }

    #[test]
    fn paints_clipped_and_aligned() {
        let block = TextBlock::new(LayoutNode::flexible().with_align(Align::Right), "ab\ncd\nef");
        block.rect().set(1, 0, 5, 2);
        let mut surface = CellSurface::new(6, 3);
        block.paint(&mut surface, &Theme::default());

        assert_eq!(surface.row_text(0), "   ab ");
        assert_eq!(surface.row_text(1), "   cd ");
        assert_eq!(surface.row_text(2), "      ");
    }
}
