use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::geometry::{Inflation, Rect, Scalar, SmartRect};
use crate::layout::{Hierarchical, LayoutNode, Paintable, Sizeable};
use crate::render::{Surface, Theme};

use super::controller::GrabController;

/// A grab controller shared between the layout tree and a host.
pub type SharedGrab = Rc<RefCell<GrabController>>;

/// Layout leaf that hosts a grab frame. Its rect is the outer frame; the
/// controller's inner rect is placed one border width inside it.
pub struct GrabLayout {
    node: LayoutNode,
    grab: SharedGrab,
}

impl GrabLayout {
    pub fn new(node: LayoutNode, grab: SharedGrab) -> Self {
        Self { node, grab }
    }

    /// Wrap `guest` in a live-drag frame on every side.
    pub fn around(node: LayoutNode, guest: SmartRect, border: i32) -> Result<Self> {
        let grab = GrabController::new(guest, border, true, Scalar::ALL)?;
        Ok(Self::new(node, Rc::new(RefCell::new(grab))))
    }

    pub fn grab(&self) -> &SharedGrab {
        &self.grab
    }
}

impl Sizeable for GrabLayout {
    fn node(&self) -> &LayoutNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut LayoutNode {
        &mut self.node
    }

    fn try_layout_children(&mut self) -> Result<()> {
        let grab = self.grab.borrow();
        let mut inner: Rect = self.node.rect.get();
        inner.inflate(-1, Inflation::Uniform(grab.border()));
        if grab.inner().get() != inner {
            grab.inner().copy_from(&inner);
        }
        Ok(())
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.node.hidden = hidden;
        self.grab.borrow_mut().set_hidden(hidden);
    }
}

impl Paintable for GrabLayout {
    // The frame itself is painted by whoever drives the pointer, on top of
    // the tree.
    fn paint(&self, surface: &mut dyn Surface, theme: &Theme) {
        if !self.node.hidden {
            self.node.paint_background(surface, theme);
        }
    }
}

impl Hierarchical for GrabLayout {}
