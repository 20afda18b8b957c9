use crate::error::{LayoutError, Result};
use crate::geometry::{Axis, Extent};
use crate::render::{Surface, Theme};

use super::node::{Hierarchical, LayoutItem, LayoutNode, Paintable, Sizeable, Sizing};

/// Ordered children laid out along one axis.
///
/// Space is handed out in passes: Fixed children first, then Flexible
/// children by their desired track, then the remainder to Auto children
/// (or, when there are none, to Percent children). Hidden children are
/// skipped entirely and collapse their margin.
pub struct LayoutStack {
    node: LayoutNode,
    axis: Axis,
    margin: i32,
    children: Vec<Box<dyn LayoutItem>>,
}

impl LayoutStack {
    pub fn new(axis: Axis, node: LayoutNode) -> Self {
        Self {
            node,
            axis,
            margin: 0,
            children: Vec::new(),
        }
    }

    pub fn horizontal(node: LayoutNode) -> Self {
        Self::new(Axis::Horizontal, node)
    }

    pub fn vertical(node: LayoutNode) -> Self {
        Self::new(Axis::Vertical, node)
    }

    pub fn with_margin(mut self, margin: i32) -> Self {
        self.margin = margin.max(0);
        self
    }

    pub fn with_child(mut self, child: impl LayoutItem + 'static) -> Self {
        self.push(child);
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn margin(&self) -> i32 {
        self.margin
    }

    pub fn set_margin(&mut self, margin: i32) {
        self.margin = margin.max(0);
    }

    /// Append a child, returning its index.
    pub fn push(&mut self, child: impl LayoutItem + 'static) -> usize {
        self.push_boxed(Box::new(child))
    }

    pub fn push_boxed(&mut self, child: Box<dyn LayoutItem>) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    pub fn insert(&mut self, index: usize, child: Box<dyn LayoutItem>) -> Result<()> {
        if index > self.children.len() {
            return Err(LayoutError::IndexOutOfRange {
                index,
                len: self.children.len(),
            });
        }
        self.children.insert(index, child);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Box<dyn LayoutItem>> {
        if index >= self.children.len() {
            return Err(LayoutError::IndexOutOfRange {
                index,
                len: self.children.len(),
            });
        }
        Ok(self.children.remove(index))
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, index: usize) -> Option<&dyn LayoutItem> {
        self.children.get(index).map(|child| child.as_ref())
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut (dyn LayoutItem + 'static)> {
        self.children.get_mut(index).map(|child| child.as_mut())
    }

    pub fn children(&self) -> impl Iterator<Item = &dyn LayoutItem> {
        self.children.iter().map(|child| child.as_ref())
    }

    fn visible_count(&self) -> usize {
        self.children.iter().filter(|child| !child.is_hidden()).count()
    }

    fn gap_total(&self, visible: usize) -> i32 {
        self.margin * visible.saturating_sub(1) as i32
    }

    /// Track per child for a padded track of `length`; hidden children get 0.
    pub fn distribute(&mut self, length: i32, rail: i32) -> Vec<i32> {
        let axis = self.axis;
        let available = (length - self.gap_total(self.visible_count())).max(0);
        let mut tracks = vec![0; self.children.len()];
        let mut remaining = available;

        for (slot, child) in tracks.iter_mut().zip(self.children.iter()) {
            let node = child.node();
            if node.hidden || node.sizing != Sizing::Fixed {
                continue;
            }
            let wanted = clamp_to(to_track(node.track), available, node.max_percent);
            *slot = wanted.min(remaining).max(0);
            remaining -= *slot;
        }

        let pre_flex = remaining;
        for (slot, child) in tracks.iter_mut().zip(self.children.iter_mut()) {
            if child.is_hidden() || child.node().sizing != Sizing::Flexible {
                continue;
            }
            let desired = to_track(child.desired_track(axis, rail));
            let wanted = clamp_to(desired, pre_flex, child.node().max_percent);
            *slot = wanted.min(remaining).max(0);
            remaining -= *slot;
        }

        let autos = self
            .children
            .iter()
            .filter(|child| !child.is_hidden() && child.node().sizing == Sizing::Auto)
            .count() as i32;

        if autos > 0 {
            let share = remaining / autos;
            for (slot, child) in tracks.iter_mut().zip(self.children.iter()) {
                if !child.is_hidden() && child.node().sizing == Sizing::Auto {
                    *slot = share;
                }
            }
        } else {
            let pre_percent = remaining;
            for (slot, child) in tracks.iter_mut().zip(self.children.iter()) {
                let node = child.node();
                if node.hidden || node.sizing != Sizing::Percent {
                    continue;
                }
                let wanted = (pre_percent as i64 * node.track as i64 / 100) as i32;
                *slot = wanted.min(remaining).max(0);
                remaining -= *slot;
            }
        }

        tracks
    }
}

fn to_track(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn clamp_to(wanted: i32, budget: i32, max_percent: Option<f32>) -> i32 {
    match max_percent {
        Some(fraction) => wanted.min((budget as f32 * fraction) as i32),
        None => wanted,
    }
}

impl Sizeable for LayoutStack {
    fn node(&self) -> &LayoutNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut LayoutNode {
        &mut self.node
    }

    fn desired_track(&mut self, axis: Axis, rail: i32) -> u32 {
        let mut visible = 0usize;
        let mut total = 0u32;
        let mut widest = 0u32;
        for child in self.children.iter_mut().filter(|child| !child.is_hidden()) {
            let desired = child.desired_track(axis, rail);
            total = total.saturating_add(desired);
            widest = widest.max(desired);
            visible += 1;
        }

        if axis != self.axis {
            return widest;
        }
        let (lead, trail) = self.node.padding_along(axis);
        let extra = self.gap_total(visible) + lead + trail;
        total.saturating_add(extra.max(0) as u32)
    }

    fn try_layout_children(&mut self) -> Result<()> {
        let rect = self.node.rect.get();
        let rail = rect.rail(self.axis);
        if rail.distance() <= 0 {
            return Err(LayoutError::InsufficientRail {
                rail: rail.distance(),
            });
        }
        let track = self.node.padded_track(self.axis)?;
        let tracks = self.distribute(track.distance(), rail.distance());

        let last_visible = self.children.iter().rposition(|child| !child.is_hidden());
        let mut cursor = track.start;
        for (index, child) in self.children.iter_mut().enumerate() {
            if child.is_hidden() {
                continue;
            }
            let span = Extent::new(cursor, (cursor + tracks[index]).min(track.stop));
            match self.axis {
                Axis::Horizontal => child.rect().set(span.start, rail.start, span.stop, rail.stop),
                Axis::Vertical => child.rect().set(rail.start, span.start, rail.stop, span.stop),
            }
            cursor = span.stop;
            // Margins that no longer fit collapse at the track stop.
            if Some(index) != last_visible {
                cursor = (cursor + self.margin).min(track.stop);
            }
            // A child that refuses keeps its old interior; siblings still run.
            child.layout_children();
        }
        Ok(())
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.node.hidden = hidden;
        for child in &mut self.children {
            child.set_hidden(hidden);
        }
    }
}

impl Paintable for LayoutStack {
    fn paint(&self, surface: &mut dyn Surface, theme: &Theme) {
        if self.node.hidden {
            return;
        }
        self.node.paint_background(surface, theme);
        for child in self.children.iter().filter(|child| !child.is_hidden()) {
            child.paint(surface, theme);
        }
    }
}

impl Hierarchical for LayoutStack {
    fn visit_children(&self, visit: &mut dyn FnMut(&dyn LayoutItem)) {
        for child in &self.children {
            visit(child.as_ref());
        }
    }

    fn visit_children_mut(&mut self, visit: &mut dyn FnMut(&mut dyn LayoutItem)) {
        for child in &mut self.children {
            visit(child.as_mut());
        }
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }
}
