use crate::error::Result;
use crate::geometry::{Axis, Extent, Rect, SmartRect};
use crate::render::{Surface, Theme};

/// How a node claims space along its parent's track axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    /// Declared track in cells.
    Fixed,
    /// Declared track in percent of what Fixed and Flexible siblings leave.
    Percent,
    /// Track taken from the item's own `desired_track`.
    Flexible,
    /// Even share of the remainder.
    Auto,
}

/// Horizontal alignment hint for content painted inside a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Sizing metadata plus the shared rect a parent writes into.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    pub rect: SmartRect,
    pub sizing: Sizing,
    pub track: u32,
    /// Upper clamp as a fraction of the parent's budget, in (0, 1].
    pub max_percent: Option<f32>,
    /// Extra table columns merged into this cell.
    pub span: usize,
    pub hidden: bool,
    /// Insets, applied along the track axis only.
    pub padding: Rect,
    pub align: Align,
    /// Theme background name.
    pub background: Option<String>,
}

impl LayoutNode {
    pub fn new(sizing: Sizing, track: u32) -> Self {
        Self {
            rect: SmartRect::default(),
            sizing,
            track,
            max_percent: None,
            span: 0,
            hidden: false,
            padding: Rect::default(),
            align: Align::default(),
            background: None,
        }
    }

    pub fn fixed(track: u32) -> Self {
        Self::new(Sizing::Fixed, track)
    }

    pub fn percent(percent: u32) -> Self {
        Self::new(Sizing::Percent, percent)
    }

    pub fn flexible() -> Self {
        Self::new(Sizing::Flexible, 0)
    }

    pub fn auto() -> Self {
        Self::new(Sizing::Auto, 0)
    }

    pub fn with_max_percent(mut self, max_percent: f32) -> Self {
        self.max_percent = Some(max_percent.clamp(f32::EPSILON, 1.0));
        self
    }

    pub fn with_span(mut self, span: usize) -> Self {
        self.span = span;
        self
    }

    pub fn with_padding(mut self, padding: Rect) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_background(mut self, name: impl Into<String>) -> Self {
        self.background = Some(name.into());
        self
    }

    pub fn with_rect(mut self, rect: SmartRect) -> Self {
        self.rect = rect;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Track extent along `axis` after padding, floored at zero length.
    pub fn padded_track(&self, axis: Axis) -> Result<Extent> {
        let track = self.rect.get().track(axis)?;
        let (lead, trail) = self.padding_along(axis);
        let start = track.start + lead;
        let stop = (track.stop - trail).max(start);
        Ok(Extent::new(start, stop))
    }

    pub fn padding_along(&self, axis: Axis) -> (i32, i32) {
        match axis {
            Axis::Horizontal => (self.padding.left(), self.padding.right()),
            Axis::Vertical => (self.padding.top(), self.padding.bottom()),
        }
    }

    /// Fill the node's rect with its named theme background, if any.
    pub fn paint_background(&self, surface: &mut dyn Surface, theme: &Theme) {
        let Some(name) = self.background.as_deref() else {
            return;
        };
        if let Some(color) = theme.background(name) {
            surface.fill_rect(&self.rect.get(), color);
        }
    }
}

/// Anything a container can size and place.
pub trait Sizeable {
    fn node(&self) -> &LayoutNode;

    fn node_mut(&mut self) -> &mut LayoutNode;

    fn rect(&self) -> &SmartRect {
        &self.node().rect
    }

    /// Preferred extent along `axis` given the cross-axis `rail`.
    fn desired_track(&mut self, _axis: Axis, _rail: i32) -> u32 {
        self.node().track
    }

    /// Place children inside the current rect.
    fn try_layout_children(&mut self) -> Result<()> {
        Ok(())
    }

    /// `false` when the pass was refused; geometry is then left as it was.
    ///
    /// # Panics
    /// Panics on an error outside the recoverable layout failures, such as
    /// I/O or a relayout during a drag; those are caller defects.
    fn layout_children(&mut self) -> bool {
        match self.try_layout_children() {
            Ok(()) => true,
            Err(err) if err.is_layout_failure() => false,
            Err(err) => panic!("layout pass hit a non-layout error: {err}"),
        }
    }

    fn is_hidden(&self) -> bool {
        self.node().hidden
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.node_mut().hidden = hidden;
    }
}

pub trait Paintable {
    /// Paint self, then visible children.
    fn paint(&self, surface: &mut dyn Surface, theme: &Theme);
}

pub trait Hierarchical {
    fn visit_children(&self, _visit: &mut dyn FnMut(&dyn LayoutItem)) {}

    fn visit_children_mut(&mut self, _visit: &mut dyn FnMut(&mut dyn LayoutItem)) {}

    fn child_count(&self) -> usize {
        0
    }
}

/// A node in the layout tree.
pub trait LayoutItem: Sizeable + Paintable + Hierarchical {}

impl<T: Sizeable + Paintable + Hierarchical + ?Sized> LayoutItem for T {}

/// Childless item whose desired track is its declared track.
#[derive(Debug, Clone)]
pub struct LayoutLeaf {
    node: LayoutNode,
}

impl LayoutLeaf {
    pub fn new(node: LayoutNode) -> Self {
        Self { node }
    }
}

impl From<LayoutNode> for LayoutLeaf {
    fn from(node: LayoutNode) -> Self {
        Self::new(node)
    }
}

impl Sizeable for LayoutLeaf {
    fn node(&self) -> &LayoutNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut LayoutNode {
        &mut self.node
    }
}

impl Paintable for LayoutLeaf {
    fn paint(&self, surface: &mut dyn Surface, theme: &Theme) {
        if !self.node.hidden {
            self.node.paint_background(surface, theme);
        }
    }
}

impl Hierarchical for LayoutLeaf {}
