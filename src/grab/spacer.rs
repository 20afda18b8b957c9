use std::cell::Cell;
use std::rc::Rc;

use crate::geometry::{Axis, Rect, Scalar, SetMode, SmartRect, Subscription, WeakRect};
use crate::layout::{Hierarchical, LayoutNode, Paintable, Sizeable};
use crate::render::{Surface, Theme};

use super::controller::ShowState;
use super::drag::DragSession;

/// Draggable bar between two panes.
///
/// Whenever the spacer's rect changes, pane one's trailing edge is moved to
/// the spacer's leading edge and pane two's leading edge to its trailing edge.
/// `Axis::Vertical` separates panes stacked top to bottom.
pub struct Spacer {
    node: LayoutNode,
    axis: Axis,
    state: Rc<Cell<ShowState>>,
    glue: Subscription,
}

impl Spacer {
    pub fn new(axis: Axis, track: u32, one: &SmartRect, two: &SmartRect) -> Self {
        let node = LayoutNode::fixed(track);
        let glue = glue(&node.rect, axis, one.downgrade(), two.downgrade());
        Self {
            node,
            axis,
            state: Rc::new(Cell::new(ShowState::Inactive)),
            glue,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn show(&self) -> ShowState {
        self.state.get()
    }

    /// Pointer-facing view of this spacer, shared with a host.
    pub fn handle(&self) -> SpacerHandle {
        SpacerHandle {
            rect: self.node.rect.clone(),
            axis: self.axis,
            state: Rc::clone(&self.state),
        }
    }
}

impl Drop for Spacer {
    fn drop(&mut self) {
        self.node.rect.unsubscribe(self.glue);
    }
}

fn glue(rect: &SmartRect, axis: Axis, one: WeakRect, two: WeakRect) -> Subscription {
    let (leading, trailing) = match axis {
        Axis::Vertical => (Scalar::TOP, Scalar::BOTTOM),
        Axis::Horizontal => (Scalar::LEFT, Scalar::RIGHT),
    };
    rect.subscribe(move |spacer, _| {
        let bar = spacer.get();
        if let Some(one) = one.upgrade() {
            if one.scalar(trailing) != bar.scalar(leading) {
                one.set_scalar(SetMode::Stretch, trailing, bar.scalar(leading));
            }
        }
        if let Some(two) = two.upgrade() {
            if two.scalar(leading) != bar.scalar(trailing) {
                two.set_scalar(SetMode::Stretch, leading, bar.scalar(trailing));
            }
        }
    })
}

impl Sizeable for Spacer {
    fn node(&self) -> &LayoutNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut LayoutNode {
        &mut self.node
    }
}

impl Paintable for Spacer {
    fn paint(&self, surface: &mut dyn Surface, theme: &Theme) {
        if self.node.hidden {
            return;
        }
        surface.fill_rect(&self.node.rect.get(), theme.spacer.for_state(self.state.get()));
    }
}

impl Hierarchical for Spacer {}

/// Shares a spacer's rect and show state without owning the spacer.
#[derive(Debug, Clone)]
pub struct SpacerHandle {
    rect: SmartRect,
    axis: Axis,
    state: Rc<Cell<ShowState>>,
}

impl SpacerHandle {
    pub fn rect(&self) -> Rect {
        self.rect.get()
    }

    pub fn show(&self) -> ShowState {
        self.state.get()
    }

    pub fn set_show(&self, show: ShowState) {
        self.state.set(show);
    }

    pub fn is_inside(&self, x: i32, y: i32) -> bool {
        let rect = self.rect.get();
        !rect.is_empty() && rect.is_inside(x, y)
    }

    pub fn hover_changed(&self, x: i32, y: i32) -> bool {
        let inside = self.is_inside(x, y);
        let hovering = self.state.get() == ShowState::Hovering;
        match (inside, self.state.get()) {
            (true, ShowState::Inactive) => self.state.set(ShowState::Hovering),
            (false, ShowState::Hovering) => self.state.set(ShowState::Inactive),
            _ => {}
        }
        hovering != (self.state.get() == ShowState::Hovering)
    }

    /// Axis-locked rigid drag of the spacer rect.
    pub fn begin_drag(&self, x: i32, y: i32) -> Option<DragSession> {
        if !self.is_inside(x, y) {
            return None;
        }
        Some(DragSession::spacer(self.rect.clone(), self.axis, x, y))
    }
}
