use std::fmt;

use bitflags::bitflags;
use thiserror::Error;

/// Layout axis. Tracks run along the axis, rails across it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn cross(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// Integer size of a layout surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A half-open span along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    pub start: i32,
    pub stop: i32,
}

impl Extent {
    pub const fn new(start: i32, stop: i32) -> Self {
        Self { start, stop }
    }

    pub fn distance(&self) -> i32 {
        self.stop - self.start
    }
}

bitflags! {
    /// Single edges, paired edges and the computed pseudo loci used to read
    /// and write rectangle coordinates.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Locus: u32 {
        const LEFT = 0x01;
        const TOP = 0x02;
        const RIGHT = 0x04;
        const BOTTOM = 0x08;
        const WIDTH = 0x10;
        const HEIGHT = 0x20;
        const EXTENT = 0x40;
        const ORIGIN = 0x80;
        const CENTER = 0x100;
        const UPPER_LEFT = Self::TOP.bits() | Self::LEFT.bits();
        const UPPER_RIGHT = Self::TOP.bits() | Self::RIGHT.bits();
        const LOWER_LEFT = Self::BOTTOM.bits() | Self::LEFT.bits();
        const LOWER_RIGHT = Self::BOTTOM.bits() | Self::RIGHT.bits();
        const ALL = Self::LEFT.bits() | Self::TOP.bits() | Self::RIGHT.bits() | Self::BOTTOM.bits();
    }
}

bitflags! {
    /// Edge addressing for single value reads and writes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Scalar: u32 {
        const LEFT = 0x01;
        const TOP = 0x02;
        const RIGHT = 0x04;
        const BOTTOM = 0x08;
        const WIDTH = 0x10;
        const HEIGHT = 0x20;
        const ALL = Self::LEFT.bits() | Self::TOP.bits() | Self::RIGHT.bits() | Self::BOTTOM.bits();
    }
}

impl Locus {
    /// Edge bit for side index 0..4 (left, top, right, bottom).
    pub fn from_side(side: usize) -> Self {
        Self::from_bits_retain(1 << side)
    }

    /// Swap every edge for its opposite. `UPPER_LEFT` becomes `LOWER_RIGHT`.
    pub fn invert(self) -> Self {
        let mut opposite = Locus::empty();
        if self.contains(Locus::LEFT) {
            opposite |= Locus::RIGHT;
        }
        if self.contains(Locus::RIGHT) {
            opposite |= Locus::LEFT;
        }
        if self.contains(Locus::TOP) {
            opposite |= Locus::BOTTOM;
        }
        if self.contains(Locus::BOTTOM) {
            opposite |= Locus::TOP;
        }
        opposite
    }

    /// The edge bits only.
    pub fn edges(self) -> Self {
        self & Locus::ALL
    }

    /// Edge bits along the x axis (left/right).
    pub fn x_edges(self) -> Self {
        self & (Locus::LEFT | Locus::RIGHT)
    }

    /// Edge bits along the y axis (top/bottom).
    pub fn y_edges(self) -> Self {
        self & (Locus::TOP | Locus::BOTTOM)
    }
}

impl From<Scalar> for Locus {
    fn from(scalar: Scalar) -> Self {
        Locus::from_bits_retain(scalar.bits())
    }
}

/// Edge mutation discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMode {
    /// Move the named edge, changing the extent.
    Stretch,
    /// Add the value to the named edge (outward positive).
    Increment,
    /// Move the named edge and drag the opposite edge along.
    Rigid,
}

/// Inflation amounts for [`Rect::inflate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Inflation {
    Uniform(i32),
    Edges(Rect),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("unrecognized combination of locus flags: {0:?}")]
    InvalidLocus(Locus),
    #[error("invalid scalar request: {0:?}")]
    InvalidScalar(Scalar),
    #[error("track along {0:?} has a negative extent")]
    NegativeTrack(Axis),
}

const LEFT: usize = 0;
const TOP: usize = 1;
const RIGHT: usize = 2;
const BOTTOM: usize = 3;

/// Outward direction of each edge: left, top, right, bottom.
const EDGE_SIGN: [i32; 4] = [-1, -1, 1, 1];

/// Axis-aligned rectangle stored as four edges.
///
/// Width and height are derived. By convention `right >= left` and
/// `bottom >= top`; an `invertible` rect may turn inside out while being
/// dragged, a non-invertible one refuses edge moves that would do so (per
/// axis, so the other axis can still move).
#[derive(Debug, Clone, Copy)]
pub struct Rect {
    edges: [i32; 4],
    pub invertible: bool,
}

impl Default for Rect {
    fn default() -> Self {
        Self {
            edges: [0; 4],
            invertible: true,
        }
    }
}

impl PartialEq for Rect {
    fn eq(&self, other: &Self) -> bool {
        self.edges == other.edges
    }
}

impl Eq for Rect {}

impl std::hash::Hash for Rect {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.edges.hash(state);
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{},{},{})",
            self.edges[LEFT], self.edges[TOP], self.edges[RIGHT], self.edges[BOTTOM]
        )
    }
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            edges: [left, top, right, bottom],
            invertible: true,
        }
    }

    /// Build a `w`×`h` rect whose `anchor` sits at (`x`, `y`).
    pub fn anchored(anchor: Locus, x: i32, y: i32, width: i32, height: i32) -> Self {
        let mut rect = Rect::default();
        rect.set_anchored(anchor, x, y, width, height);
        rect
    }

    pub fn non_invertible(mut self) -> Self {
        self.invertible = false;
        self
    }

    pub fn left(&self) -> i32 {
        self.edges[LEFT]
    }

    pub fn top(&self) -> i32 {
        self.edges[TOP]
    }

    pub fn right(&self) -> i32 {
        self.edges[RIGHT]
    }

    pub fn bottom(&self) -> i32 {
        self.edges[BOTTOM]
    }

    pub fn width(&self) -> i32 {
        self.edges[RIGHT] - self.edges[LEFT]
    }

    pub fn height(&self) -> i32 {
        self.edges[BOTTOM] - self.edges[TOP]
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Edge by side index: 0 left, 1 top, 2 right, 3 bottom.
    pub fn side(&self, side: usize) -> Option<i32> {
        self.edges.get(side).copied()
    }

    pub fn set(&mut self, left: i32, top: i32, right: i32, bottom: i32) {
        self.edges = [left, top, right, bottom];
    }

    /// Copy the four edges of `other`, keeping our own `invertible` flag.
    pub fn copy_edges(&mut self, other: &Rect) {
        self.edges = other.edges;
    }

    pub fn set_anchored(&mut self, anchor: Locus, x: i32, y: i32, width: i32, height: i32) {
        self.edges = [0, 0, width, height];
        if anchor == Locus::CENTER {
            self.set_center(x, y);
        } else {
            self.apply_edges(SetMode::Rigid, anchor, x, y);
        }
    }

    /// Move the edge(s) named by `locus` using the given discipline.
    ///
    /// # Panics
    /// Panics if `locus` carries `EXTENT` without any edge to measure from.
    pub fn set_point(&mut self, mode: SetMode, locus: Locus, x: i32, y: i32) {
        if locus.contains(Locus::EXTENT) {
            self.set_extent(locus, x, y);
        } else if locus == Locus::CENTER {
            self.set_center(x, y);
        } else {
            self.apply_edges(mode, locus, x, y);
        }
    }

    pub fn set_scalar(&mut self, mode: SetMode, scalar: Scalar, value: i32) {
        self.apply_edges(mode, Locus::from(scalar), value, value);
    }

    fn set_center(&mut self, x: i32, y: i32) {
        let width = self.width();
        let height = self.height();
        self.edges = [0, 0, width, height];
        self.apply_edges(SetMode::Rigid, Locus::UPPER_LEFT, x - (width >> 1), y - (height >> 1));
    }

    fn set_extent(&mut self, locus: Locus, x: i32, y: i32) {
        assert!(
            !locus.edges().is_empty(),
            "extent must be relative to an edge"
        );
        let adjust = [x, y];
        for side in 0..4 {
            if locus.contains(Locus::from_side(side)) {
                let opposite = (side + 2) % 4;
                self.edges[opposite] = self.edges[side] - adjust[side % 2] * EDGE_SIGN[side];
            }
        }
    }

    // Shared by stretch, increment and rigid so the sign convention lives in
    // one place.
    fn apply_edges(&mut self, mode: SetMode, locus: Locus, x: i32, y: i32) {
        let adjust = [x, y];
        for side in 0..4 {
            if !locus.contains(Locus::from_side(side)) {
                continue;
            }
            let opposite = (side + 2) % 4;
            let value = match mode {
                SetMode::Increment => self.edges[side] + adjust[side % 2] * EDGE_SIGN[side],
                SetMode::Stretch | SetMode::Rigid => adjust[side % 2],
            };

            if mode == SetMode::Rigid {
                let extent = self.edges[opposite] - self.edges[side];
                self.edges[side] = value;
                self.edges[opposite] = value + extent;
            } else if self.invertible || (value - self.edges[opposite]) * EDGE_SIGN[side] >= 0 {
                self.edges[side] = value;
            }
        }
    }

    /// Read a coordinate pair.
    ///
    /// # Panics
    /// Panics on a locus that does not name a single point, e.g.
    /// `LEFT | RIGHT`. Use [`Rect::try_point`] for the fallible form.
    pub fn point(&self, locus: Locus) -> Point {
        match self.try_point(locus) {
            Ok(point) => point,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_point(&self, locus: Locus) -> Result<Point, GeometryError> {
        let locus = if locus == Locus::ORIGIN {
            Locus::UPPER_LEFT
        } else {
            locus
        };

        if locus == Locus::CENTER {
            return Ok(self.center());
        }
        if locus == Locus::EXTENT {
            return Ok(Point::new(self.width(), self.height()));
        }

        let single = [
            Locus::LEFT,
            Locus::TOP,
            Locus::RIGHT,
            Locus::BOTTOM,
            Locus::UPPER_LEFT,
            Locus::UPPER_RIGHT,
            Locus::LOWER_LEFT,
            Locus::LOWER_RIGHT,
        ];
        if !single.contains(&locus) {
            return Err(GeometryError::InvalidLocus(locus));
        }

        let mut point = Point::default();
        if locus.contains(Locus::LEFT) {
            point.x = self.left();
        }
        if locus.contains(Locus::RIGHT) {
            point.x = self.right();
        }
        if locus.contains(Locus::TOP) {
            point.y = self.top();
        }
        if locus.contains(Locus::BOTTOM) {
            point.y = self.bottom();
        }
        Ok(point)
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.left() + (self.width() >> 1),
            self.top() + (self.height() >> 1),
        )
    }

    /// Read exactly one edge, or the width/height.
    ///
    /// # Panics
    /// Panics when `scalar` names zero or several edges.
    pub fn scalar(&self, scalar: Scalar) -> i32 {
        match self.try_scalar(scalar) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_scalar(&self, scalar: Scalar) -> Result<i32, GeometryError> {
        if scalar == Scalar::WIDTH {
            return Ok(self.width());
        }
        if scalar == Scalar::HEIGHT {
            return Ok(self.height());
        }

        let mut found = None;
        for side in 0..4 {
            if scalar.bits() & (1 << side) != 0 {
                if found.is_some() {
                    return Err(GeometryError::InvalidScalar(scalar));
                }
                found = Some(self.edges[side]);
            }
        }
        found.ok_or(GeometryError::InvalidScalar(scalar))
    }

    /// True when every edge named by `scalar` matches `other`.
    pub fn is_equal(&self, scalar: Scalar, other: &Rect) -> bool {
        (0..4)
            .filter(|side| scalar.bits() & (1 << side) != 0)
            .all(|side| self.edges[side] == other.edges[side])
    }

    /// Half-open hit test: `left <= x < right`, `top <= y < bottom`.
    ///
    /// The one exception is the empty rect at the origin, which reports
    /// `is_inside(0, 0)`. Empty rects anywhere else hit nothing.
    pub fn is_inside(&self, x: i32, y: i32) -> bool {
        if *self == Rect::default() {
            return x == 0 && y == 0;
        }
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }

    /// Containment of another rect. Right and bottom must be strictly inside.
    pub fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() < self.right()
            && other.top() >= self.top()
            && other.bottom() < self.bottom()
    }

    /// Touching edges count as intersecting.
    pub fn is_intersecting(&self, other: &Rect) -> bool {
        !(other.left() > self.right()
            || other.right() < self.left()
            || other.top() > self.bottom()
            || other.bottom() < self.top())
    }

    /// Which way (x, y) lies relative to us. `CENTER` when inside.
    pub fn is_where(&self, x: i32, y: i32) -> Locus {
        if self.is_inside(x, y) {
            return Locus::CENTER;
        }
        let mut locus = Locus::empty();
        if x < self.left() {
            locus |= Locus::LEFT;
        }
        if x > self.right() {
            locus |= Locus::RIGHT;
        }
        if y < self.top() {
            locus |= Locus::TOP;
        }
        if y > self.bottom() {
            locus |= Locus::BOTTOM;
        }
        locus
    }

    /// Overlap of two rects, or an empty rect at the origin when they share
    /// no area.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        let mut out = Rect {
            edges: [0; 4],
            invertible: self.invertible,
        };
        if left < right && top < bottom {
            out.edges = [left, top, right, bottom];
        }
        out
    }

    pub fn union(&mut self, other: &Rect) {
        self.edges[LEFT] = self.edges[LEFT].min(other.left());
        self.edges[TOP] = self.edges[TOP].min(other.top());
        self.edges[RIGHT] = self.edges[RIGHT].max(other.right());
        self.edges[BOTTOM] = self.edges[BOTTOM].max(other.bottom());
    }

    /// Push every edge outward by `multiplier × amount`. A negative
    /// multiplier deflates.
    pub fn inflate(&mut self, multiplier: i32, amount: Inflation) {
        for side in 0..4 {
            let step = match amount {
                Inflation::Uniform(size) => size,
                Inflation::Edges(rect) => rect.edges[side],
            };
            self.edges[side] += multiplier * EDGE_SIGN[side] * step;
        }
    }

    /// Collapse to a zero extent at `corner`.
    pub fn empty(&mut self, corner: Locus) {
        let point = self.point(corner);
        let opposite = Locus::ALL - corner.edges();
        self.apply_edges(SetMode::Stretch, opposite, point.x, point.y);
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Extent across `axis`: the cross-axis span children inherit.
    pub fn rail(&self, axis: Axis) -> Extent {
        match axis {
            Axis::Horizontal => Extent::new(self.top(), self.bottom()),
            Axis::Vertical => Extent::new(self.left(), self.right()),
        }
    }

    /// Extent along `axis`. Fails on an inside-out rect.
    pub fn track(&self, axis: Axis) -> Result<Extent, GeometryError> {
        let extent = match axis {
            Axis::Horizontal => Extent::new(self.left(), self.right()),
            Axis::Vertical => Extent::new(self.top(), self.bottom()),
        };
        if extent.distance() < 0 {
            return Err(GeometryError::NegativeTrack(axis));
        }
        Ok(extent)
    }

    pub fn extent(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width(),
            Axis::Vertical => self.height(),
        }
    }

    /// Slope of the diagonal from the point opposite `locus` to `locus`.
    pub fn slope(&self, locus: Locus) -> f32 {
        let this_side = self.point(locus);
        let that_side = self.point(locus.invert());
        (this_side.y - that_side.y) as f32 / (this_side.x - that_side.x) as f32
    }

    pub fn intercept(&self, slope: f32, locus: Locus) -> f32 {
        let point = self.point(locus);
        point.y as f32 - point.x as f32 * slope
    }

    /// Given a width/height aspect and one fixed dimension, size the other.
    pub fn extent_desired(aspect_wh: f32, fixed: u32, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => (fixed as f32 * aspect_wh) as u32,
            Axis::Vertical => (fixed as f32 / aspect_wh) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rigid_upper_left_translates() {
        let mut rect = Rect::new(0, 0, 10, 10);
        rect.set_point(SetMode::Rigid, Locus::UPPER_LEFT, 5, 5);
        assert_eq!(rect, Rect::new(5, 5, 15, 15));
        assert_eq!(rect.width(), 10);
    }

    #[test]
    fn stretch_moves_only_the_named_edge() {
        let mut rect = Rect::new(0, 0, 10, 10);
        rect.set_point(SetMode::Stretch, Locus::RIGHT, 20, 99);
        assert_eq!(rect.right(), 20);
        assert_eq!(rect.width(), 20);
        assert_eq!(rect.left(), 0);
        assert_eq!(rect.height(), 10);
    }

    #[test]
    fn increment_pushes_edges_outward() {
        let mut rect = Rect::new(10, 10, 20, 20);
        rect.set_scalar(SetMode::Increment, Scalar::ALL, 2);
        assert_eq!(rect, Rect::new(8, 8, 22, 22));
    }

    #[test]
    fn non_invertible_rejects_each_axis_independently() {
        let mut rect = Rect::new(0, 0, 10, 10).non_invertible();
        // x would invert, y is fine
        rect.set_point(SetMode::Stretch, Locus::LOWER_RIGHT, -5, 4);
        assert_eq!(rect, Rect::new(0, 0, 10, 4));

        let mut inverted = Rect::new(0, 0, 10, 10);
        inverted.set_point(SetMode::Stretch, Locus::LOWER_RIGHT, -5, 4);
        assert_eq!(inverted.right(), -5);
    }

    #[test]
    fn anchored_constructors() {
        assert_eq!(
            Rect::anchored(Locus::UPPER_LEFT, 3, 4, 10, 5),
            Rect::new(3, 4, 13, 9)
        );
        assert_eq!(
            Rect::anchored(Locus::LOWER_RIGHT, 20, 20, 10, 5),
            Rect::new(10, 15, 20, 20)
        );
        assert_eq!(
            Rect::anchored(Locus::CENTER, 50, 50, 10, 6),
            Rect::new(45, 47, 55, 53)
        );
    }

    #[test]
    fn extent_locus_places_opposite_edges() {
        let mut rect = Rect::new(5, 5, 6, 6);
        rect.set_point(SetMode::Rigid, Locus::UPPER_LEFT | Locus::EXTENT, 4, 3);
        assert_eq!(rect, Rect::new(5, 5, 9, 8));

        let mut from_lower = Rect::new(0, 0, 10, 10);
        from_lower.set_point(SetMode::Rigid, Locus::LOWER_RIGHT | Locus::EXTENT, 4, 4);
        assert_eq!(from_lower, Rect::new(6, 6, 10, 10));
    }

    #[test]
    #[should_panic(expected = "extent must be relative to an edge")]
    fn extent_without_edge_panics() {
        let mut rect = Rect::new(0, 0, 10, 10);
        rect.set_point(SetMode::Stretch, Locus::EXTENT, 1, 1);
    }

    #[test]
    fn point_reads_corners_and_pseudo_loci() {
        let rect = Rect::new(2, 4, 12, 10);
        assert_eq!(rect.point(Locus::LOWER_RIGHT), Point::new(12, 10));
        assert_eq!(rect.point(Locus::ORIGIN), Point::new(2, 4));
        assert_eq!(rect.point(Locus::EXTENT), Point::new(10, 6));
        assert_eq!(rect.point(Locus::CENTER), Point::new(7, 7));
    }

    #[test]
    #[should_panic(expected = "unrecognized combination")]
    fn point_with_opposite_edges_panics() {
        Rect::new(0, 0, 10, 10).point(Locus::LEFT | Locus::RIGHT);
    }

    #[test]
    fn scalar_rejects_multiple_edges() {
        let rect = Rect::new(1, 2, 3, 4);
        assert_eq!(rect.scalar(Scalar::BOTTOM), 4);
        assert_eq!(rect.scalar(Scalar::WIDTH), 2);
        assert_eq!(
            rect.try_scalar(Scalar::LEFT | Scalar::TOP),
            Err(GeometryError::InvalidScalar(Scalar::LEFT | Scalar::TOP))
        );
    }

    #[test]
    fn hit_testing_is_half_open() {
        let rect = Rect::new(0, 0, 10, 10);
        assert!(rect.is_inside(0, 0));
        assert!(rect.is_inside(9, 9));
        assert!(!rect.is_inside(10, 5));
        assert!(!rect.is_inside(5, 10));

        let point = Rect::default();
        assert!(point.is_inside(0, 0));
        assert!(!point.is_inside(1, 0));
    }

    #[test]
    fn only_the_origin_empty_rect_hits_its_corner() {
        assert!(Rect::new(0, 0, 0, 0).is_inside(0, 0));
        assert!(!Rect::new(5, 5, 5, 5).is_inside(5, 5));
        assert!(!Rect::new(5, 5, 5, 9).is_inside(5, 6));
        assert_eq!(Rect::new(5, 5, 5, 5).is_where(5, 5), Locus::empty());
    }

    #[test]
    fn containment_and_intersection() {
        let outer = Rect::new(0, 0, 100, 100);
        assert!(outer.contains(&Rect::new(10, 10, 20, 20)));
        assert!(!outer.contains(&Rect::new(10, 10, 100, 20)));

        let a = Rect::new(0, 0, 10, 10);
        assert!(a.is_intersecting(&Rect::new(10, 10, 20, 20)));
        assert!(!a.is_intersecting(&Rect::new(11, 0, 20, 10)));

        assert_eq!(a.intersection(&Rect::new(5, 5, 20, 20)), Rect::new(5, 5, 10, 10));
        assert!(a.intersection(&Rect::new(20, 20, 30, 30)).is_empty());
    }

    #[test]
    fn union_inflate_and_empty() {
        let mut rect = Rect::new(5, 5, 10, 10);
        rect.union(&Rect::new(0, 8, 7, 20));
        assert_eq!(rect, Rect::new(0, 5, 10, 20));

        rect.inflate(-1, Inflation::Uniform(2));
        assert_eq!(rect, Rect::new(2, 7, 8, 18));

        rect.inflate(1, Inflation::Edges(Rect::new(1, 0, 0, 3)));
        assert_eq!(rect, Rect::new(1, 7, 8, 21));

        rect.empty(Locus::LOWER_RIGHT);
        assert_eq!(rect, Rect::new(8, 21, 8, 21));
        assert!(rect.is_empty());
    }

    #[test]
    fn is_where_reports_outside_sides() {
        let rect = Rect::new(0, 0, 10, 10);
        assert_eq!(rect.is_where(5, 5), Locus::CENTER);
        assert_eq!(rect.is_where(-1, 20), Locus::LOWER_LEFT);
        assert_eq!(rect.is_where(11, 5), Locus::RIGHT);
    }

    #[test]
    fn rail_and_track_follow_the_axis() {
        let rect = Rect::new(0, 10, 40, 30);
        assert_eq!(rect.rail(Axis::Horizontal), Extent::new(10, 30));
        assert_eq!(rect.track(Axis::Horizontal), Ok(Extent::new(0, 40)));
        assert_eq!(
            Rect::new(10, 0, 0, 5).track(Axis::Horizontal),
            Err(GeometryError::NegativeTrack(Axis::Horizontal))
        );
    }

    #[test]
    fn slope_and_invert() {
        assert_eq!(Locus::UPPER_LEFT.invert(), Locus::LOWER_RIGHT);
        assert_eq!(Locus::TOP.invert(), Locus::BOTTOM);
        let rect = Rect::new(0, 0, 40, 30);
        assert_eq!(rect.slope(Locus::LOWER_RIGHT), 0.75);
        assert_eq!(rect.intercept(0.75, Locus::LOWER_RIGHT), 0.0);
    }
}
