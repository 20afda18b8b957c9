use crate::error::{LayoutError, Result};
use crate::geometry::{Axis, Locus, Rect, Size};
use crate::render::{Surface, Theme};

use super::node::{Hierarchical, LayoutNode, Paintable, Sizeable};

/// Content with a fixed world size whose aspect must be preserved.
#[derive(Debug, Clone)]
pub struct AspectBox {
    node: LayoutNode,
    world: Size,
}

impl AspectBox {
    pub fn new(node: LayoutNode, world: Size) -> Result<Self> {
        if world.width <= 0 || world.height <= 0 {
            return Err(LayoutError::InvalidOperation(format!(
                "aspect box needs a positive world size, got {}x{}",
                world.width, world.height
            )));
        }
        Ok(Self { node, world })
    }

    pub fn world(&self) -> Size {
        self.world
    }

    /// Width over height.
    pub fn aspect(&self) -> f32 {
        self.world.width as f32 / self.world.height as f32
    }

    /// Centred viewport for the content inside the current rect.
    ///
    /// Content larger than the rect shrinks to fit with its aspect kept;
    /// smaller content keeps its world size.
    pub fn fit_viewport(&self) -> Rect {
        let rect = self.node.rect.get();
        let mut size = self.world;
        let window_aspect = rect.width() as f32 / rect.height().max(1) as f32;

        if window_aspect > self.aspect() {
            if size.height > rect.height() {
                size.height = rect.height();
                size.width = (rect.height() as f32 * self.aspect()) as i32;
            }
        } else if size.width > rect.width() {
            size.width = rect.width();
            size.height = (rect.width() as f32 / self.aspect()) as i32;
        }

        let center = rect.center();
        Rect::anchored(Locus::CENTER, center.x, center.y, size.width, size.height)
    }
}

impl Sizeable for AspectBox {
    fn node(&self) -> &LayoutNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut LayoutNode {
        &mut self.node
    }

    fn desired_track(&mut self, axis: Axis, rail: i32) -> u32 {
        let rail = rail.max(0) as u32;
        Rect::extent_desired(self.aspect(), rail, axis)
    }
}

impl Paintable for AspectBox {
    fn paint(&self, surface: &mut dyn Surface, theme: &Theme) {
        if self.node.hidden {
            return;
        }
        self.node.paint_background(surface, theme);
        surface.fill_rect(&self.fit_viewport(), theme.viewport);
    }
}

impl Hierarchical for AspectBox {}
