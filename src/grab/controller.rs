use crate::error::{LayoutError, Result};
use crate::geometry::{Inflation, Locus, Point, Rect, Scalar, SetMode, SmartRect, Subscription};
use crate::render::{Surface, Theme};

use super::drag::DragSession;

/// Paint state of a grab or spacer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowState {
    #[default]
    Inactive,
    Hovering,
    Focused,
    Active,
}

/// How a fixed-ratio grab reacts to a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    FreeStyle,
    FixedRatio,
}

/// What part of a grab a point landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Edge,
    Corner,
    Midpoint,
    Inside,
}

/// A handle rect and the edges it drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrabHandle {
    pub rect: Rect,
    pub locus: Locus,
}

impl GrabHandle {
    pub fn is_inside(&self, x: i32, y: i32) -> bool {
        self.rect.is_inside(x, y)
    }
}

const SIDES: [Locus; 4] = [Locus::LEFT, Locus::TOP, Locus::RIGHT, Locus::BOTTOM];
const SIDE_SCALARS: [Scalar; 4] = [Scalar::LEFT, Scalar::TOP, Scalar::RIGHT, Scalar::BOTTOM];
const CORNERS: [Locus; 4] = [
    Locus::UPPER_LEFT,
    Locus::UPPER_RIGHT,
    Locus::LOWER_RIGHT,
    Locus::LOWER_LEFT,
];

/// Resize frame around a guest rect.
///
/// The controller keeps its own inner rect in step with the guest: guest
/// changes are copied in, and with live drag on, inner changes are copied
/// back out as they happen. Handle geometry is derived from the inner rect
/// on every query, in LEFT, TOP, RIGHT, BOTTOM order.
pub struct GrabController {
    inner: SmartRect,
    guest: SmartRect,
    border: i32,
    live_drag: bool,
    movable: Scalar,
    show: ShowState,
    hovering: bool,
    mode: DragMode,
    aspect: Point,
    hidden: bool,
    inner_watch: Subscription,
    guest_watch: Subscription,
}

impl GrabController {
    pub fn new(guest: SmartRect, border: i32, live_drag: bool, movable: Scalar) -> Result<Self> {
        if border < 2 {
            return Err(LayoutError::InvalidBorder(border));
        }
        Ok(Self::build(guest, border, live_drag, movable))
    }

    /// Thin non-invertible selection frame with no guest write-back.
    pub fn selection() -> Self {
        let guest = SmartRect::new(Rect::default().non_invertible());
        Self::build(guest, 7, false, Scalar::ALL)
    }

    fn build(guest: SmartRect, border: i32, live_drag: bool, movable: Scalar) -> Self {
        let inner = SmartRect::new(guest.get());
        let (inner_watch, guest_watch) = wire(&inner, &guest, live_drag);
        Self {
            inner,
            guest,
            border,
            live_drag,
            movable,
            show: ShowState::Inactive,
            hovering: false,
            mode: DragMode::FreeStyle,
            aspect: Point::new(1, 1),
            hidden: false,
            inner_watch,
            guest_watch,
        }
    }

    /// Swap the guest, taking on its geometry.
    pub fn set_guest(&mut self, guest: SmartRect) {
        self.inner.unsubscribe(self.inner_watch);
        self.guest.unsubscribe(self.guest_watch);
        self.guest = guest;
        let (inner_watch, guest_watch) = wire(&self.inner, &self.guest, self.live_drag);
        self.inner_watch = inner_watch;
        self.guest_watch = guest_watch;
        self.inner.copy_from(&self.guest.get());
    }

    pub fn inner(&self) -> &SmartRect {
        &self.inner
    }

    pub fn guest(&self) -> &SmartRect {
        &self.guest
    }

    pub fn border(&self) -> i32 {
        self.border
    }

    pub fn movable(&self) -> Scalar {
        self.movable
    }

    pub fn show(&self) -> ShowState {
        self.show
    }

    pub fn set_show(&mut self, show: ShowState) {
        self.show = show;
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn hover_stop(&mut self) {
        self.hovering = false;
        if self.show == ShowState::Hovering {
            self.show = ShowState::Inactive;
        }
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DragMode) {
        self.mode = mode;
    }

    /// Width:height ratio kept by fixed-ratio corner drags.
    pub fn aspect(&self) -> Point {
        self.aspect
    }

    pub fn set_aspect(&mut self, aspect: Point) {
        self.aspect = aspect;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Inner rect grown by the border, unless hidden.
    pub fn outer(&self) -> Rect {
        let mut outer = self.inner.get();
        if !self.hidden {
            outer.inflate(1, Inflation::Uniform(self.border));
        }
        outer
    }

    fn side_enabled(&self, side: usize) -> bool {
        self.movable.contains(SIDE_SCALARS[side])
    }

    /// Bars from the outer side to the inner side, full outer length.
    pub fn edge_bars(&self) -> [Rect; 4] {
        let outer = self.outer();
        let inner = self.inner.get();
        std::array::from_fn(|side| {
            let opposite = (side + 2) % 4;
            let mut bar = outer;
            bar.set_scalar(SetMode::Stretch, SIDE_SCALARS[opposite], inner.scalar(SIDE_SCALARS[side]));
            bar
        })
    }

    /// `border`-sized squares centred along each bar.
    pub fn midpoints(&self) -> [Rect; 4] {
        let inner = self.inner.get();
        let center = self.outer().center();
        let half = self.border >> 1;
        std::array::from_fn(|side| {
            let opposite = (side + 2) % 4;
            let mut square = Rect::anchored(
                Locus::UPPER_LEFT,
                center.x - half,
                center.y - half,
                self.border,
                self.border,
            );
            square.set_scalar(SetMode::Rigid, SIDE_SCALARS[opposite], inner.scalar(SIDE_SCALARS[side]));
            square
        })
    }

    /// Overlaps of adjacent bars: upper-left, upper-right, lower-right,
    /// lower-left.
    pub fn corners(&self) -> [Rect; 4] {
        let bars = self.edge_bars();
        std::array::from_fn(|index| bars[index].intersection(&bars[(index + 1) % 4]))
    }

    /// Enabled midpoint and corner handles.
    pub fn handles(&self) -> Vec<GrabHandle> {
        let midpoints = self.midpoints();
        let corners = self.corners();
        let mut handles = Vec::with_capacity(8);
        for index in 0..4 {
            if self.side_enabled(index) {
                handles.push(GrabHandle {
                    rect: midpoints[index],
                    locus: SIDES[index],
                });
            }
            let corner = Scalar::from_bits_retain(CORNERS[index].bits());
            if self.movable.contains(corner) {
                handles.push(GrabHandle {
                    rect: corners[index],
                    locus: CORNERS[index],
                });
            }
        }
        handles
    }

    /// Inside first, then midpoints, then bars. Two bars make a corner.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<(Hit, Locus)> {
        if self.inner.is_inside(x, y) {
            return Some((Hit::Inside, Locus::empty()));
        }

        let midpoints = self.midpoints();
        let midpoint = (0..4)
            .filter(|&side| self.side_enabled(side) && midpoints[side].is_inside(x, y))
            .last();
        if let Some(side) = midpoint {
            return Some((Hit::Midpoint, SIDES[side]));
        }

        let bars = self.edge_bars();
        let mut locus = Locus::empty();
        let mut hits = 0;
        for side in 0..4 {
            if self.side_enabled(side) && bars[side].is_inside(x, y) {
                locus |= SIDES[side];
                hits += 1;
            }
        }
        match hits {
            0 => None,
            1 => Some((Hit::Edge, locus)),
            _ => Some((Hit::Corner, locus)),
        }
    }

    /// True over the frame itself, not the guest it wraps.
    pub fn is_inside(&self, x: i32, y: i32) -> bool {
        if self.hidden {
            return false;
        }
        matches!(
            self.hit_test(x, y),
            Some((Hit::Edge | Hit::Corner | Hit::Midpoint, _))
        )
    }

    /// Track hover; returns whether it changed.
    pub fn hover_changed(&mut self, x: i32, y: i32) -> bool {
        let inside = self.is_inside(x, y);
        let changed = inside != self.hovering;
        if changed {
            self.hovering = inside;
            match (inside, self.show) {
                (true, ShowState::Inactive) => self.show = ShowState::Hovering,
                (false, ShowState::Hovering) => self.show = ShowState::Inactive,
                _ => {}
            }
        }
        changed
    }

    /// Start a drag from (`x`, `y`). `None` when the point misses.
    pub fn begin_drag(
        &self,
        x: i32,
        y: i32,
        aspect: Point,
        bounds: Option<Rect>,
    ) -> Option<DragSession> {
        if self.hidden {
            return None;
        }
        let (hit, locus) = self.hit_test(x, y)?;
        let target = self.inner.clone();
        let session = match (self.mode, hit) {
            (DragMode::FreeStyle, Hit::Corner | Hit::Midpoint) => {
                DragSession::new(target, SetMode::Stretch, locus, x, y, bounds)
            }
            (DragMode::FreeStyle, Hit::Inside) => {
                DragSession::new(target, SetMode::Rigid, Locus::UPPER_LEFT, x, y, bounds)
            }
            (DragMode::FreeStyle, Hit::Edge) => {
                DragSession::new(target, SetMode::Rigid, locus, x, y, bounds)
            }
            (DragMode::FixedRatio, Hit::Corner) => {
                DragSession::aspect(target, SetMode::Stretch, locus, x, y, bounds, aspect)
            }
            (DragMode::FixedRatio, _) => {
                DragSession::new(target, SetMode::Rigid, Locus::UPPER_LEFT, x, y, bounds)
            }
        };
        Some(session)
    }

    pub fn paint(&self, surface: &mut dyn Surface, theme: &Theme) {
        if self.hidden {
            return;
        }
        let frame = theme.grab.for_state(self.show);
        for bar in self.edge_bars() {
            surface.fill_rect(&bar, frame);
        }
        if self.hovering || self.show != ShowState::Inactive {
            for handle in self.handles() {
                surface.fill_rect(&handle.rect, theme.handle);
            }
        }
    }
}

impl Drop for GrabController {
    fn drop(&mut self) {
        self.inner.unsubscribe(self.inner_watch);
        self.guest.unsubscribe(self.guest_watch);
    }
}

/// Two-way copy between inner and guest, each guarded by equality.
fn wire(inner: &SmartRect, guest: &SmartRect, live_drag: bool) -> (Subscription, Subscription) {
    let weak_guest = guest.downgrade();
    let inner_watch = inner.subscribe(move |inner, _| {
        if !live_drag {
            return;
        }
        if let Some(guest) = weak_guest.upgrade() {
            if guest.get() != inner.get() {
                guest.copy_from(&inner.get());
            }
        }
    });

    let weak_inner = inner.downgrade();
    let guest_watch = guest.subscribe(move |guest, _| {
        if let Some(inner) = weak_inner.upgrade() {
            if inner.get() != guest.get() {
                inner.copy_from(&guest.get());
            }
        }
    });
    (inner_watch, guest_watch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framed() -> (GrabController, SmartRect) {
        let guest = SmartRect::new(Rect::new(20, 20, 60, 40));
        let grab = GrabController::new(guest.clone(), 6, true, Scalar::ALL).unwrap();
        (grab, guest)
    }

    #[test]
    fn border_must_be_at_least_two() {
        let guest = SmartRect::default();
        assert!(matches!(
            GrabController::new(guest, 1, true, Scalar::ALL),
            Err(LayoutError::InvalidBorder(1))
        ));
    }

    #[test]
    fn outer_wraps_inner_unless_hidden() {
        let (mut grab, _) = framed();
        assert_eq!(grab.outer(), Rect::new(14, 14, 66, 46));
        grab.set_hidden(true);
        assert_eq!(grab.outer(), Rect::new(20, 20, 60, 40));
        assert!(!grab.is_inside(15, 30));
        assert!(grab.begin_drag(15, 30, Point::new(1, 1), None).is_none());
    }

    #[test]
    fn handle_geometry() {
        let (grab, _) = framed();
        let bars = grab.edge_bars();
        assert_eq!(bars[0], Rect::new(14, 14, 20, 46));
        assert_eq!(bars[1], Rect::new(14, 14, 66, 20));
        assert_eq!(bars[2], Rect::new(60, 14, 66, 46));
        assert_eq!(bars[3], Rect::new(14, 40, 66, 46));

        let corners = grab.corners();
        assert_eq!(corners[0], Rect::new(14, 14, 20, 20));
        assert_eq!(corners[2], Rect::new(60, 40, 66, 46));

        let midpoints = grab.midpoints();
        assert_eq!(midpoints[0], Rect::new(14, 27, 20, 33));
        assert_eq!(midpoints[3], Rect::new(37, 40, 43, 46));

        assert_eq!(grab.handles().len(), 8);
    }

    #[test]
    fn hit_test_order() {
        let (grab, _) = framed();
        assert_eq!(grab.hit_test(30, 30), Some((Hit::Inside, Locus::empty())));
        assert_eq!(grab.hit_test(15, 30), Some((Hit::Midpoint, Locus::LEFT)));
        assert_eq!(grab.hit_test(15, 22), Some((Hit::Edge, Locus::LEFT)));
        assert_eq!(grab.hit_test(15, 15), Some((Hit::Corner, Locus::UPPER_LEFT)));
        assert_eq!(grab.hit_test(64, 45), Some((Hit::Corner, Locus::LOWER_RIGHT)));
        assert_eq!(grab.hit_test(0, 0), None);
    }

    #[test]
    fn disabled_sides_do_not_hit() {
        let guest = SmartRect::new(Rect::new(20, 20, 60, 40));
        let grab = GrabController::new(guest, 6, true, Scalar::RIGHT | Scalar::BOTTOM).unwrap();
        assert_eq!(grab.hit_test(15, 30), None);
        assert_eq!(grab.hit_test(15, 15), None);
        assert_eq!(grab.hit_test(64, 45), Some((Hit::Corner, Locus::LOWER_RIGHT)));
        // RIGHT and BOTTOM midpoints plus the lower-right corner
        assert_eq!(grab.handles().len(), 3);
    }

    #[test]
    fn guest_and_inner_stay_in_step() {
        let (grab, guest) = framed();
        guest.set(0, 0, 10, 10);
        assert_eq!(grab.inner().get(), Rect::new(0, 0, 10, 10));
        assert_eq!(grab.corners()[0], Rect::new(-6, -6, 0, 0));

        grab.inner().set(5, 5, 15, 15);
        assert_eq!(guest.get(), Rect::new(5, 5, 15, 15));
    }

    #[test]
    fn selection_does_not_write_back() {
        let mut grab = GrabController::selection();
        assert_eq!(grab.border(), 7);
        grab.inner().set(1, 1, 5, 5);
        assert_eq!(grab.guest().get(), Rect::default());
        assert!(!grab.inner().invertible());

        grab.set_guest(SmartRect::new(Rect::new(2, 2, 4, 4)));
        assert_eq!(grab.inner().get(), Rect::new(2, 2, 4, 4));
    }

    #[test]
    fn hover_toggles_show_state() {
        let (mut grab, _) = framed();
        assert!(grab.hover_changed(15, 30));
        assert_eq!(grab.show(), ShowState::Hovering);
        assert!(!grab.hover_changed(16, 30));
        assert!(grab.hover_changed(30, 30));
        assert_eq!(grab.show(), ShowState::Inactive);
    }

    #[test]
    fn begin_drag_picks_discipline() {
        let (mut grab, guest) = framed();
        let aspect = Point::new(4, 3);

        let mut corner = grab.begin_drag(64, 44, aspect, None).unwrap();
        assert_eq!(corner.mode(), SetMode::Stretch);
        corner.move_to(74, 54);
        assert_eq!(guest.get(), Rect::new(20, 20, 70, 50));
        corner.dispose();

        let mut inside = grab.begin_drag(30, 30, aspect, None).unwrap();
        assert_eq!(inside.locus(), Locus::UPPER_LEFT);
        inside.move_to(31, 32);
        assert_eq!(guest.get(), Rect::new(21, 22, 71, 52));
        inside.dispose();

        grab.set_mode(DragMode::FixedRatio);
        let edge = grab.begin_drag(16, 25, aspect, None).unwrap();
        assert_eq!((edge.mode(), edge.locus()), (SetMode::Rigid, Locus::UPPER_LEFT));
    }
}
