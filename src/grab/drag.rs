use crate::geometry::{Axis, Locus, Point, Rect, Scalar, SetMode, SmartRect};

/// Called once when a drag session ends, with the guest and the last
/// pointer position.
pub type DragFinished = Box<dyn FnOnce(&SmartRect, Point)>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Free,
    /// Pointer projected onto a line through the anchor corner.
    Aspect { slope: f32, intercept: f32 },
    /// Only the given axis follows the pointer.
    Locked(Axis),
}

/// One pointer-driven edit of a rect, from button down to button up.
///
/// The pointer-to-anchor offset is captured at the start so the grabbed
/// point does not jump to the cursor. Dropping an undisposed session
/// disposes it.
pub struct DragSession {
    guest: SmartRect,
    mode: SetMode,
    locus: Locus,
    start: Rect,
    offset: Point,
    last: Point,
    bounds: Option<Rect>,
    motion: Motion,
    finished: Option<DragFinished>,
    disposed: bool,
}

impl DragSession {
    pub fn new(
        guest: SmartRect,
        mode: SetMode,
        locus: Locus,
        x: i32,
        y: i32,
        bounds: Option<Rect>,
    ) -> Self {
        let start = guest.get();
        let anchor = start.point(locus);
        let mut offset = Point::default();
        if !locus.x_edges().is_empty() {
            offset.x = anchor.x - x;
        }
        if !locus.y_edges().is_empty() {
            offset.y = anchor.y - y;
        }
        Self {
            guest,
            mode,
            locus,
            start,
            offset,
            last: Point::new(x, y),
            bounds,
            motion: Motion::Free,
            finished: None,
            disposed: false,
        }
    }

    /// Corner drag that keeps `aspect` (x:y). The corner opposite `locus`
    /// stays put.
    pub fn aspect(
        guest: SmartRect,
        mode: SetMode,
        locus: Locus,
        x: i32,
        y: i32,
        bounds: Option<Rect>,
        aspect: Point,
    ) -> Self {
        let mut session = Self::new(guest, mode, locus, x, y, bounds);
        let run = if aspect.x == 0 { 1 } else { aspect.x };
        let mut slope = aspect.y as f32 / run as f32;
        if locus == Locus::UPPER_RIGHT || locus == Locus::LOWER_LEFT {
            slope = -slope;
        }
        let anchor = session
            .start
            .try_point(locus.invert())
            .unwrap_or_else(|_| session.start.point(Locus::UPPER_LEFT));
        let intercept = anchor.y as f32 - slope * anchor.x as f32;
        session.motion = Motion::Aspect { slope, intercept };
        session
    }

    /// Rigid move along `axis` only; the cross coordinate stays at its start.
    pub fn spacer(guest: SmartRect, axis: Axis, x: i32, y: i32) -> Self {
        let mut session = Self::new(guest, SetMode::Rigid, Locus::UPPER_LEFT, x, y, None);
        session.motion = Motion::Locked(axis);
        session
    }

    pub fn with_finished<F>(mut self, finished: F) -> Self
    where
        F: FnOnce(&SmartRect, Point) + 'static,
    {
        self.finished = Some(Box::new(finished));
        self
    }

    pub fn guest(&self) -> &SmartRect {
        &self.guest
    }

    pub fn mode(&self) -> SetMode {
        self.mode
    }

    pub fn locus(&self) -> Locus {
        self.locus
    }

    pub fn start(&self) -> Rect {
        self.start
    }

    pub fn last_point(&self) -> Point {
        self.last
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Follow the pointer.
    pub fn move_to(&mut self, x: i32, y: i32) {
        if self.disposed {
            return;
        }
        self.last = Point::new(x, y);
        let mut target = Point::new(x + self.offset.x, y + self.offset.y);

        match self.motion {
            Motion::Free => {}
            Motion::Locked(Axis::Vertical) => target.x = self.start.left(),
            Motion::Locked(Axis::Horizontal) => target.y = self.start.top(),
            Motion::Aspect { slope, intercept } => {
                // A flat line has no X for a given Y; stay on it instead.
                if target.y > self.start.bottom() && slope != 0.0 {
                    target.x = ((target.y as f32 - intercept) / slope).round() as i32;
                } else {
                    target.y = (slope * target.x as f32 + intercept).round() as i32;
                }
                self.commit_aspect(target);
                return;
            }
        }

        let Some(bounds) = self.bounds else {
            self.guest.set_point(self.mode, self.locus, target.x, target.y);
            return;
        };

        let mut scratch = self.guest.get();
        scratch.set_point(self.mode, self.locus, target.x, target.y);
        if !bounds.contains(&scratch) {
            match self.mode {
                SetMode::Rigid => keep_inside(&mut scratch, &bounds),
                SetMode::Stretch | SetMode::Increment => {
                    clamp_moving_edges(&mut scratch, &bounds, self.locus)
                }
            }
        }
        self.guest.copy_from(&scratch);
    }

    // An out-of-bounds projection is dropped whole so the ratio holds.
    fn commit_aspect(&mut self, target: Point) {
        let mut scratch = self.guest.get();
        scratch.set_point(self.mode, self.locus, target.x, target.y);
        match self.bounds {
            Some(bounds) if !bounds.contains(&scratch) => {}
            _ => self.guest.copy_from(&scratch),
        }
    }

    /// End the session; the finish callback runs at most once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if let Some(finished) = self.finished.take() {
            finished(&self.guest, self.last);
        }
    }
}

impl Drop for DragSession {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Translate so the top-left stays within the room `bounds` leaves for
/// a rect of this size.
fn keep_inside(rect: &mut Rect, bounds: &Rect) {
    let max_left = bounds.right() - rect.width();
    let max_top = bounds.bottom() - rect.height();
    if rect.top() < bounds.top() {
        rect.set_scalar(SetMode::Rigid, Scalar::TOP, bounds.top());
    }
    if rect.top() > max_top {
        rect.set_scalar(SetMode::Rigid, Scalar::TOP, max_top);
    }
    if rect.left() < bounds.left() {
        rect.set_scalar(SetMode::Rigid, Scalar::LEFT, bounds.left());
    }
    if rect.left() > max_left {
        rect.set_scalar(SetMode::Rigid, Scalar::LEFT, max_left);
    }
}

fn clamp_moving_edges(rect: &mut Rect, bounds: &Rect, locus: Locus) {
    let moving = rect.point(locus);
    let along_y = Scalar::from_bits_retain(locus.y_edges().bits());
    let along_x = Scalar::from_bits_retain(locus.x_edges().bits());

    if !along_y.is_empty() {
        if moving.y < bounds.top() {
            rect.set_scalar(SetMode::Stretch, along_y, bounds.top());
        }
        if moving.y > bounds.bottom() {
            rect.set_scalar(SetMode::Stretch, along_y, bounds.bottom());
        }
    }
    if !along_x.is_empty() {
        if moving.x < bounds.left() {
            rect.set_scalar(SetMode::Stretch, along_x, bounds.left());
        }
        if moving.x > bounds.right() {
            rect.set_scalar(SetMode::Stretch, along_x, bounds.right());
        }
    }
}

/// Turns pointer motion on one edge into a new declared track.
///
/// The track is the distance from the opposite edge captured at the start,
/// floored at zero; a zero track reports the owner as hidden.
pub struct TrackDrag {
    edge: Locus,
    anchor: i32,
    offset: i32,
    last: Option<u32>,
    on_track: Box<dyn FnMut(u32, bool)>,
}

impl TrackDrag {
    /// `edge` must be a single side of `target`.
    pub fn new<F>(target: &SmartRect, edge: Locus, pointer: Point, on_track: F) -> Self
    where
        F: FnMut(u32, bool) + 'static,
    {
        let rect = target.get();
        let grabbed = rect.point(edge);
        let opposite = rect.point(edge.invert());
        let (anchor, offset) = if edge.x_edges().is_empty() {
            (opposite.y, grabbed.y - pointer.y)
        } else {
            (opposite.x, grabbed.x - pointer.x)
        };
        Self {
            edge,
            anchor,
            offset,
            last: None,
            on_track: Box::new(on_track),
        }
    }

    /// Report and return the track for a pointer at (`x`, `y`).
    pub fn move_to(&mut self, x: i32, y: i32) -> u32 {
        let coordinate = if self.edge.x_edges().is_empty() { y } else { x } + self.offset;
        let distance = if self.edge.intersects(Locus::LEFT | Locus::TOP) {
            self.anchor - coordinate
        } else {
            coordinate - self.anchor
        };
        let track = distance.max(0) as u32;
        self.last = Some(track);
        (self.on_track)(track, track == 0);
        track
    }

    pub fn last_track(&self) -> Option<u32> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn offset_keeps_the_grabbed_point_under_the_pointer() {
        let guest = SmartRect::new(Rect::new(10, 10, 30, 20));
        let mut session = DragSession::new(guest.clone(), SetMode::Rigid, Locus::UPPER_LEFT, 15, 12, None);
        session.move_to(25, 22);
        assert_eq!(guest.get(), Rect::new(20, 20, 40, 30));
    }

    #[test]
    fn edge_offset_only_on_touched_axis() {
        let guest = SmartRect::new(Rect::new(10, 10, 30, 20));
        let mut session = DragSession::new(guest.clone(), SetMode::Stretch, Locus::RIGHT, 29, 15, None);
        session.move_to(39, 99);
        assert_eq!(guest.get(), Rect::new(10, 10, 40, 20));
    }

    #[test]
    fn rigid_drag_is_kept_inside_bounds() {
        let guest = SmartRect::new(Rect::new(10, 10, 20, 20));
        let bounds = Rect::new(0, 0, 50, 50);
        let mut session =
            DragSession::new(guest.clone(), SetMode::Rigid, Locus::UPPER_LEFT, 10, 10, Some(bounds));
        session.move_to(90, -30);
        assert_eq!(guest.get(), Rect::new(40, 0, 50, 10));
    }

    #[test]
    fn stretch_drag_clamps_the_moving_corner() {
        let guest = SmartRect::new(Rect::new(10, 10, 20, 20));
        let bounds = Rect::new(0, 0, 50, 50);
        let mut session = DragSession::new(
            guest.clone(),
            SetMode::Stretch,
            Locus::LOWER_RIGHT,
            20,
            20,
            Some(bounds),
        );
        session.move_to(80, 30);
        assert_eq!(guest.get(), Rect::new(10, 10, 50, 30));
    }

    #[test]
    fn aspect_drag_holds_the_ratio() {
        for (locus, sign) in [
            (Locus::LOWER_RIGHT, 1.0),
            (Locus::UPPER_LEFT, 1.0),
            (Locus::UPPER_RIGHT, -1.0),
            (Locus::LOWER_LEFT, -1.0),
        ] {
            let guest = SmartRect::new(Rect::new(100, 100, 140, 130));
            let start = guest.get();
            let corner = start.point(locus);
            let anchor = start.point(locus.invert());
            let mut session = DragSession::aspect(
                guest.clone(),
                SetMode::Stretch,
                locus,
                corner.x,
                corner.y,
                None,
                Point::new(4, 3),
            );

            for (dx, dy) in [(8, 3), (-5, 20), (17, -9), (40, 40)] {
                session.move_to(corner.x + dx, corner.y + dy);
                let moved = guest.get().point(locus);
                let expected = sign * 0.75 * (moved.x - anchor.x) as f32;
                let actual = (moved.y - anchor.y) as f32;
                assert!(
                    (actual - expected).abs() <= 1.0,
                    "{locus:?}: moved to {moved:?}, anchor {anchor:?}"
                );
                assert_eq!(guest.get().point(locus.invert()), anchor);
            }
        }
    }

    #[test]
    fn aspect_drag_rejects_moves_leaving_bounds() {
        let guest = SmartRect::new(Rect::new(0, 0, 40, 30));
        let bounds = Rect::new(-1, -1, 60, 60);
        let mut session = DragSession::aspect(
            guest.clone(),
            SetMode::Stretch,
            Locus::LOWER_RIGHT,
            40,
            30,
            Some(bounds),
            Point::new(4, 3),
        );
        session.move_to(48, 36);
        assert_eq!(guest.get(), Rect::new(0, 0, 48, 36));
        session.move_to(100, 100);
        assert_eq!(guest.get(), Rect::new(0, 0, 48, 36));
    }

    #[test]
    fn aspect_projection_axis_depends_on_start_bottom() {
        let guest = SmartRect::new(Rect::new(0, 0, 40, 30));
        let mut session = DragSession::aspect(
            guest.clone(),
            SetMode::Stretch,
            Locus::LOWER_RIGHT,
            40,
            30,
            None,
            Point::new(4, 3),
        );
        // below the start bottom: x follows y
        session.move_to(80, 33);
        assert_eq!(guest.get(), Rect::new(0, 0, 44, 33));
        // above it: y follows x
        session.move_to(48, 20);
        assert_eq!(guest.get(), Rect::new(0, 0, 48, 36));
    }

    #[test]
    fn flat_aspect_keeps_the_corner_on_its_line() {
        let guest = SmartRect::new(Rect::new(0, 0, 40, 30));
        let mut session = DragSession::aspect(
            guest.clone(),
            SetMode::Stretch,
            Locus::LOWER_RIGHT,
            40,
            30,
            None,
            Point::new(4, 0),
        );
        session.move_to(50, 20);
        assert_eq!(guest.get(), Rect::new(0, 0, 50, 0));
        session.move_to(60, 45);
        assert_eq!(guest.get(), Rect::new(0, 0, 60, 0));
    }

    #[test]
    fn zero_run_aspect_is_treated_as_one() {
        let guest = SmartRect::new(Rect::new(0, 0, 10, 10));
        let mut session = DragSession::aspect(
            guest.clone(),
            SetMode::Stretch,
            Locus::LOWER_RIGHT,
            10,
            10,
            None,
            Point::new(0, 2),
        );
        session.move_to(10, 20);
        assert_eq!(guest.get(), Rect::new(0, 0, 10, 20));
    }

    #[test]
    fn spacer_drag_is_axis_locked() {
        let guest = SmartRect::new(Rect::new(0, 10, 20, 12));
        let mut session = DragSession::spacer(guest.clone(), Axis::Vertical, 5, 11);
        session.move_to(50, 21);
        assert_eq!(guest.get(), Rect::new(0, 20, 20, 22));

        let column = SmartRect::new(Rect::new(10, 0, 12, 20));
        let mut session = DragSession::spacer(column.clone(), Axis::Horizontal, 11, 5);
        session.move_to(16, 90);
        assert_eq!(column.get(), Rect::new(15, 0, 17, 20));
    }

    #[test]
    fn dispose_runs_finish_once() {
        let calls = Rc::new(Cell::new(0));
        let last = Rc::new(Cell::new(Point::default()));
        let guest = SmartRect::new(Rect::new(0, 0, 5, 5));
        {
            let (calls, last) = (Rc::clone(&calls), Rc::clone(&last));
            let mut session = DragSession::new(guest, SetMode::Rigid, Locus::UPPER_LEFT, 1, 1, None)
                .with_finished(move |_, point| {
                    calls.set(calls.get() + 1);
                    last.set(point);
                });
            session.move_to(3, 4);
            session.dispose();
            session.dispose();
            session.move_to(9, 9);
            assert!(session.is_disposed());
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(last.get(), Point::new(3, 4));
    }

    #[test]
    fn dropping_disposes() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let guest = SmartRect::default();
        let session = DragSession::new(guest, SetMode::Rigid, Locus::UPPER_LEFT, 0, 0, None)
            .with_finished(move |_, _| counter.set(counter.get() + 1));
        drop(session);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn track_drag_reports_distance_from_opposite_edge() {
        let pane = SmartRect::new(Rect::new(10, 0, 40, 10));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut drag = TrackDrag::new(&pane, Locus::RIGHT, Point::new(39, 5), move |track, hidden| {
            sink.borrow_mut().push((track, hidden));
        });
        assert_eq!(drag.move_to(49, 5), 40);
        assert_eq!(drag.move_to(0, 5), 0);
        assert_eq!(*seen.borrow(), vec![(40, false), (0, true)]);

        let mut top = TrackDrag::new(&pane, Locus::TOP, Point::new(0, 0), |_, _| {});
        assert_eq!(top.move_to(0, -5), 15);
        assert_eq!(top.last_track(), Some(15));
    }
}
